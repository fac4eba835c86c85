//! Default error-recovery strategy (spec §4.4): single-token
//! insertion/deletion plus context-sensitive FOLLOW-set resynchronization.
//!
//! `Parser` never hand-rolls recovery; it calls into an `ErrorStrategy`
//! through the narrow `RecoveringParser` seam this module defines, the
//! same composition-over-inheritance split already used for the
//! channel-filtered token stream and the ATN-simulator collaborator
//! traits.

use std::rc::Rc;
use std::sync::Arc;

use crate::atn::ATN;
use crate::error_listener::SyntaxErrorInfo;
use crate::errors::{escape_ws, render_expected, ANTLRError};
use crate::interval_set::IntervalSet;
use crate::token::{OwningToken, Token, TOKEN_EOF, TOKEN_EPSILON};
use crate::token_factory::TokenFactory;
use crate::token_stream::TokenStream;
use crate::vocabulary::Vocabulary;

/// The slice of `Parser` that `ErrorStrategy` needs: lookahead, the
/// current ATN position and call stack, and the ability to consume a
/// token or mint a conjured one. Kept separate from `Recognizer` because
/// an interpreter-driven parser (spec §4.5) needs the exact same surface
/// without necessarily being a generated recognizer.
pub trait RecoveringParser {
    fn atn(&self) -> &Arc<ATN>;
    fn input(&mut self) -> &mut dyn TokenStream;
    fn vocabulary(&self) -> &dyn Vocabulary;
    fn token_factory(&self) -> &dyn TokenFactory;

    /// Current ATN state number.
    fn state(&self) -> isize;

    /// Chain of ATN states that invoked each enclosing rule, innermost
    /// first — `ATN::next_tokens`'s `invoking_states` argument.
    fn call_stack(&self) -> Vec<usize>;

    /// Advances the input by one token, attaching it to the parse tree as
    /// a terminal or error node depending on recovery state (spec §4.2
    /// `consume`). Returns the consumed token.
    fn consume(&mut self) -> Result<Rc<OwningToken>, ANTLRError>;

    fn notify_syntax_error(&mut self, err: &SyntaxErrorInfo) -> Result<(), ANTLRError>;
}

fn la(p: &mut dyn RecoveringParser, k: isize) -> isize {
    match p.input().lt(k) {
        Some(t) => t.get_token_type(),
        None => TOKEN_EOF,
    }
}

fn expected_tokens(p: &mut dyn RecoveringParser) -> IntervalSet {
    let state = p.state() as usize;
    let stack = p.call_stack();
    p.atn().next_tokens(state, &stack)
}

fn display(p: &mut dyn RecoveringParser, set: &IntervalSet) -> String {
    render_expected(set, |t| p.vocabulary().get_display_name(t))
}

pub trait ErrorStrategy {
    fn reset(&mut self);
    fn report_error(&mut self, p: &mut dyn RecoveringParser, err: &ANTLRError) -> Result<(), ANTLRError>;
    fn recover(&mut self, p: &mut dyn RecoveringParser, err: &ANTLRError) -> Result<(), ANTLRError>;
    fn sync(&mut self, p: &mut dyn RecoveringParser) -> Result<(), ANTLRError>;
    fn recover_inline(&mut self, p: &mut dyn RecoveringParser, expecting: isize) -> Result<Rc<OwningToken>, ANTLRError>;
    fn in_error_recovery_mode(&self) -> bool;
    fn report_match(&mut self, p: &mut dyn RecoveringParser);
}

/// Single-token insertion/deletion plus FOLLOW-driven resync (spec §4.4).
#[derive(Default)]
pub struct DefaultErrorStrategy {
    error_recovery_mode: bool,
    last_error_index: isize,
    last_error_states: Option<IntervalSet>,
}

impl DefaultErrorStrategy {
    pub fn new() -> Self {
        DefaultErrorStrategy::default()
    }

    fn begin_error_recovery_mode(&mut self) {
        self.error_recovery_mode = true;
    }

    fn end_error_recovery_mode(&mut self) {
        self.error_recovery_mode = false;
    }

    fn error_message(&self, err: &ANTLRError) -> String {
        match err {
            ANTLRError::NoViableAlt { input_text, .. } => {
                format!("no viable alternative at input '{}'", escape_ws(input_text))
            }
            ANTLRError::InputMismatch { offending_token, expecting } => {
                let tok = offending_token
                    .as_ref()
                    .map(|t| escape_ws(&t.get_text()))
                    .unwrap_or_else(|| "<unknown>".to_owned());
                format!("mismatched input '{tok}' expecting {expecting}")
            }
            ANTLRError::FailedPredicate { rule_name, message, .. } => {
                format!("rule {rule_name} {message}")
            }
            other => format!("unknown recognition error type: {other}"),
        }
    }

    /// `consumeUntil(set)`: advance past tokens outside `set` (spec §4.4
    /// `recover`'s final step).
    fn consume_until(&mut self, p: &mut dyn RecoveringParser, set: &IntervalSet) -> Result<(), ANTLRError> {
        let mut ttype = la(p, 1);
        while ttype != TOKEN_EOF && !set.contains(ttype) {
            p.consume()?;
            ttype = la(p, 1);
        }
        Ok(())
    }

    fn report_unwanted_token(&mut self, p: &mut dyn RecoveringParser) -> Result<(), ANTLRError> {
        if self.error_recovery_mode {
            return Ok(());
        }
        self.begin_error_recovery_mode();
        let offending = p.input().lt(1);
        let expected = expected_tokens(p);
        let expecting = display(p, &expected);
        let tok_text = offending
            .as_ref()
            .map(|t| escape_ws(&t.get_text()))
            .unwrap_or_else(|| "<unknown>".to_owned());
        let msg = format!("extraneous input '{tok_text}' expecting {expecting}");
        self.notify(p, offending, msg)
    }

    fn report_missing_token(&mut self, p: &mut dyn RecoveringParser) -> Result<(), ANTLRError> {
        if self.error_recovery_mode {
            return Ok(());
        }
        self.begin_error_recovery_mode();
        let offending = p.input().lt(1);
        let expected = expected_tokens(p);
        let expecting = display(p, &expected);
        let tok_text = offending
            .as_ref()
            .map(|t| escape_ws(&t.get_text()))
            .unwrap_or_else(|| "<unknown>".to_owned());
        let msg = format!("missing {expecting} at '{tok_text}'");
        self.notify(p, offending, msg)
    }

    fn notify(
        &mut self,
        p: &mut dyn RecoveringParser,
        offending: Option<Rc<OwningToken>>,
        message: String,
    ) -> Result<(), ANTLRError> {
        let (line, column) = offending
            .as_ref()
            .map(|t| (t.get_line(), t.get_column()))
            .unwrap_or((-1, -1));
        p.notify_syntax_error(&SyntaxErrorInfo {
            line,
            column,
            message,
            offending_symbol: offending,
            exception: None,
        })
    }

    /// Whether deleting `lookAhead(1)` would put `lookAhead(2)` back onto
    /// an expected token (spec §4.4 `recoverInline` step 1).
    fn single_token_deletion_possible(&self, p: &mut dyn RecoveringParser) -> bool {
        la(p, 2) != TOKEN_EOF && expected_tokens(p).contains(la(p, 2))
    }

    /// Whether the current lookahead is consistent with what legally
    /// follows the token we're trying to match (spec §4.4 `recoverInline`
    /// step 2: "if `lookAhead(1) ∈ nextTokens(stateAfterCurrent)`") — i.e.
    /// the rest of the input looks fine once this one token is assumed
    /// present, so it's safe to conjure it rather than report a mismatch.
    fn single_token_insertion_possible(&self, p: &mut dyn RecoveringParser) -> bool {
        let current_state = p.state() as usize;
        let Some(next_state) = p.atn().state(current_state).transitions.first().map(|t| t.target()) else {
            return false;
        };
        let stack = p.call_stack();
        p.atn().next_tokens(next_state, &stack).contains(la(p, 1))
    }
}

impl ErrorStrategy for DefaultErrorStrategy {
    fn reset(&mut self) {
        self.end_error_recovery_mode();
        self.last_error_index = -1;
        self.last_error_states = None;
    }

    fn in_error_recovery_mode(&self) -> bool {
        self.error_recovery_mode
    }

    fn report_match(&mut self, _p: &mut dyn RecoveringParser) {
        self.end_error_recovery_mode();
    }

    fn report_error(&mut self, p: &mut dyn RecoveringParser, err: &ANTLRError) -> Result<(), ANTLRError> {
        if self.error_recovery_mode {
            return Ok(());
        }
        self.begin_error_recovery_mode();
        let message = self.error_message(err);
        let offending = err.offending_token().cloned().map(Rc::new);
        self.notify(p, offending, message)
    }

    fn recover(&mut self, p: &mut dyn RecoveringParser, _err: &ANTLRError) -> Result<(), ANTLRError> {
        let index = p.input().index();
        let state = p.state();
        if self.last_error_index == index {
            if let Some(states) = &self.last_error_states {
                if states.contains(state) {
                    p.consume()?;
                }
            }
        }
        self.last_error_index = p.input().index();
        let mut states = self.last_error_states.take().unwrap_or_else(IntervalSet::new);
        states.add_one(state);
        self.last_error_states = Some(states);

        let follow = expected_tokens(p).subtract(&IntervalSet::of(TOKEN_EPSILON));
        self.consume_until(p, &follow)
    }

    fn sync(&mut self, p: &mut dyn RecoveringParser) -> Result<(), ANTLRError> {
        if self.error_recovery_mode {
            return Ok(());
        }
        let state_num = p.state() as usize;
        let next_in_rule = p.atn().next_tokens_in_same_rule(state_num);
        let look = la(p, 1);
        if next_in_rule.contains(look) || look == TOKEN_EOF || expected_tokens(p).contains(look) {
            return Ok(());
        }

        let state_type = p.atn().state(state_num).state_type.clone();
        if state_type.is_block_start_family() {
            if self.single_token_deletion_possible(p) {
                self.report_unwanted_token(p)?;
                p.consume()?;
                return Ok(());
            }
            let offending = p.input().lt(1).map(|t| (*t).clone());
            let expected = expected_tokens(p);
            let expecting = display(p, &expected);
            return Err(ANTLRError::InputMismatch {
                offending_token: offending,
                expecting,
            });
        }
        if state_type.is_loop_back_family() {
            self.report_unwanted_token(p)?;
            let mut set = expected_tokens(p);
            set.add_set(&p.atn().next_tokens_in_same_rule(state_num));
            self.consume_until(p, &set)?;
        }
        Ok(())
    }

    fn recover_inline(&mut self, p: &mut dyn RecoveringParser, expecting: isize) -> Result<Rc<OwningToken>, ANTLRError> {
        // single-token deletion: delete the unexpected token, then actually
        // match the one after it (the caller's `match` does not consume
        // again on this path, so the returned token must already be
        // consumed).
        if self.single_token_deletion_possible(p) {
            self.report_unwanted_token(p)?;
            p.consume()?;
            self.report_match(p);
            return p.consume();
        }

        // single-token insertion
        if self.single_token_insertion_possible(p) {
            self.report_missing_token(p)?;
            let name = p.vocabulary().get_display_name(expecting);
            let (line, column) = p
                .input()
                .lt(1)
                .map(|t| (t.get_line(), t.get_column()))
                .unwrap_or((-1, -1));
            let mut conjured = p.token_factory().create_thin(expecting, &format!("<missing {name}>"));
            conjured.line = line;
            conjured.column = column;
            return Ok(Rc::new(conjured));
        }

        let offending = p.input().lt(1).map(|t| (*t).clone());
        let expected = expected_tokens(p);
        let expecting_str = display(p, &expected);
        Err(ANTLRError::InputMismatch {
            offending_token: offending,
            expecting: expecting_str,
        })
    }
}
