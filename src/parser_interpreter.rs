//! Parser interpreter (spec §4.5): walks the ATN directly instead of
//! running generated rule methods, for grammars only available as a
//! deserialized ATN (dynamic/tool-time parsing). Composes over `Parser`
//! exactly as `CommonTokenStream` composes over `BufferedTokenStream` —
//! it reuses `match_token`/`enter_rule`/`enter_recursion_rule`/
//! `push_new_recursion_context`/`unroll_recursion_contexts`/
//! `adaptive_predict`/`report_error`/`recover` rather than reimplementing
//! any of them, and adds only the transition-dispatch loop and the
//! auxiliary parent-context stack left-recursive `RULE_STOP` needs.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use crate::atn_state::{ATNStateType, INVALID_STATE_NUMBER};
use crate::errors::ANTLRError;
use crate::int_stream::IntStream;
use crate::parser::{Parser, RuleCtxRef};
use crate::parser_rule_context::ParserRuleContextBase;
use crate::recognizer::Recognizer;
use crate::rule_context::RuleContext;
use crate::token::TOKEN_MIN_USER_TOKEN_TYPE;
use crate::token_stream::TokenStream;
use crate::transition::Transition;

/// Upper bound on `Transition::matches`' label range, fixed by spec §4.5
/// rather than read from the ATN's own `max_token_type`.
const MAX_TOKEN_TYPE: isize = 65535;

pub struct ParserInterpreter {
    pub parser: Parser,
    /// States flagged eagerly at construction, as spec §4.5 requires:
    /// `StarLoopEntryState.precedenceRuleDecision`, grouped by the rule
    /// that owns them so `rule_is_left_recursive` is an O(1) lookup.
    precedence_rules: HashSet<usize>,
    /// Mirrors the reference runtimes' auxiliary parent-context stack:
    /// `(caller's context, caller's ATN state)` pushed for every
    /// left-recursive rule invocation, popped at its `RULE_STOP` to
    /// unroll back to the right frame (ordinary rules don't need this —
    /// `exit_rule` already restores `invokingState` for them).
    parent_context_stack: Vec<(Option<RuleCtxRef>, usize)>,
}

impl ParserInterpreter {
    pub fn new(parser: Parser) -> Self {
        let mut precedence_rules = HashSet::new();
        for state in &parser.base.atn.states {
            if matches!(state.state_type, ATNStateType::StarLoopEntry { precedence_rule_decision: true, .. }) {
                precedence_rules.insert(state.rule_index);
            }
        }
        ParserInterpreter { parser, precedence_rules, parent_context_stack: Vec::new() }
    }

    fn rule_is_left_recursive(&self, rule_index: usize) -> bool {
        self.precedence_rules.contains(&rule_index)
    }

    /// Parses starting at `start_rule_index`, returning the root context.
    pub fn parse(&mut self, start_rule_index: usize) -> Result<RuleCtxRef, ANTLRError> {
        let atn = self.parser.base.atn.clone();
        let start_state = atn.rule_to_start_state[start_rule_index];
        let root_ctx: RuleCtxRef = Rc::new(RefCell::new(ParserRuleContextBase::new(None, -1, start_rule_index)));

        if self.rule_is_left_recursive(start_rule_index) {
            self.parent_context_stack.push((None, INVALID_STATE_NUMBER));
            self.parser.enter_recursion_rule(root_ctx.clone(), start_state as isize, start_rule_index, 0);
        } else {
            self.parser.enter_rule(root_ctx.clone(), start_state as isize, start_rule_index);
        }

        loop {
            let state = self.parser.get_state() as usize;
            if matches!(atn.state(state).state_type, ATNStateType::RuleStop) {
                if let Some(done) = self.visit_rule_stop(state, &root_ctx)? {
                    return Ok(done);
                }
                continue;
            }
            if let Err(e) = self.visit_state(state) {
                let rule_index = atn.state(state).rule_index;
                self.parser.set_state(atn.rule_to_stop_state[rule_index] as isize);
                self.parser.report_error(&e)?;
                self.parser.recover(&e)?;
            }
        }
    }

    /// Handles a `RULE_STOP` state. Returns `Some(ctx)` once the parse
    /// that started at `parse`'s own `start_rule_index` has fully
    /// returned; otherwise leaves the interpreter positioned to resume
    /// the caller and returns `None`.
    fn visit_rule_stop(&mut self, state: usize, root_ctx: &RuleCtxRef) -> Result<Option<RuleCtxRef>, ANTLRError> {
        let atn = self.parser.base.atn.clone();
        let rule_index = atn.state(state).rule_index;

        if self.rule_is_left_recursive(rule_index) {
            let (parent_ctx, call_site) = self
                .parent_context_stack
                .pop()
                .expect("a RULE_STOP inside a left-recursive rule always has a matching push");
            let result = self.parser.get_rule_context();
            self.parser.unroll_recursion_contexts(parent_ctx);
            if call_site == INVALID_STATE_NUMBER {
                return Ok(Some(result.expect("unroll_recursion_contexts always leaves a context behind")));
            }
            self.parser.set_state(call_site as isize);
        } else {
            let is_outermost = self
                .parser
                .get_rule_context()
                .map(|c| c.borrow().get_parent().is_none())
                .unwrap_or(true);
            self.parser.exit_rule();
            if is_outermost {
                return Ok(Some(root_ctx.clone()));
            }
        }

        // `call_stack` state left behind is the call site, whose own
        // transition is the `RULE` dispatch this invocation returned
        // from — resume just past it.
        let call_site = self.parser.get_state() as usize;
        match atn.state(call_site).transitions.first() {
            Some(Transition::Rule { follow_state, .. }) => {
                self.parser.set_state(*follow_state as isize);
            }
            _ => {
                return Err(ANTLRError::IllegalStateError(
                    "rule-invocation call site did not hold a RULE transition".to_owned(),
                ))
            }
        }
        Ok(None)
    }

    /// Dispatches the transition chosen at `state` (spec §4.5's fixed
    /// serialization-type list), then advances to its target.
    fn visit_state(&mut self, state: usize) -> Result<(), ANTLRError> {
        let atn = self.parser.base.atn.clone();
        let s = atn.state(state);
        let rule_index = s.rule_index;

        let alt = if s.transitions.len() > 1 {
            let decision = s.decision.expect("a multi-transition state is always a decision state");
            self.parser.adaptive_predict(decision)?
        } else {
            1
        };
        let transition = s.transitions[(alt - 1) as usize].clone();

        match &transition {
            Transition::Epsilon { .. } => {
                let is_precedence_loop_entry =
                    matches!(s.state_type, ATNStateType::StarLoopEntry { precedence_rule_decision: true, .. });
                let takes_loop_body = !matches!(atn.state(transition.target()).state_type, ATNStateType::LoopEnd { .. });
                if is_precedence_loop_entry && takes_loop_body {
                    let new_ctx: RuleCtxRef = Rc::new(RefCell::new(ParserRuleContextBase::new(None, -1, rule_index)));
                    let rule_start = atn.rule_to_start_state[rule_index];
                    self.parser.push_new_recursion_context(new_ctx, rule_start as isize, rule_index);
                }
            }

            Transition::Atom { label, .. } => {
                self.parser.match_token(*label)?;
            }

            Transition::Range { .. } | Transition::Set { .. } | Transition::NotSet { .. } | Transition::Wildcard { .. } => {
                let la1 = self.parser.input().la(1);
                if transition.matches(la1, TOKEN_MIN_USER_TOKEN_TYPE, MAX_TOKEN_TYPE) {
                    self.parser.match_wildcard()?;
                } else {
                    let offending = self.parser.input().lt(1).map(|t| (*t).clone());
                    let expected = self.parser.get_expected_tokens();
                    let vocabulary = self.parser.base.vocabulary.clone();
                    let expecting = crate::errors::render_expected(&expected, |t| vocabulary.get_display_name(t));
                    return Err(ANTLRError::InputMismatch { offending_token: offending, expecting });
                }
            }

            Transition::Rule { rule_start, rule_index: callee_rule, precedence, .. } => {
                let parent_ctx = self.parser.get_rule_context();
                let new_ctx: RuleCtxRef = Rc::new(RefCell::new(ParserRuleContextBase::new(
                    parent_ctx.as_ref().map(Rc::downgrade),
                    state as isize,
                    *callee_rule,
                )));
                if self.rule_is_left_recursive(*callee_rule) {
                    self.parent_context_stack.push((parent_ctx, state));
                    self.parser.enter_recursion_rule(new_ctx, *rule_start as isize, *callee_rule, *precedence);
                } else {
                    self.parser.enter_rule(new_ctx, *rule_start as isize, *callee_rule);
                }
            }

            Transition::Predicate { rule_index: pred_rule, pred_index, .. } => {
                if !Recognizer::sempred(&mut self.parser, None, *pred_rule, *pred_index) {
                    return Err(ANTLRError::FailedPredicate {
                        rule_name: self.rule_name(*pred_rule),
                        message: format!("predicate failed: pred_index {pred_index}"),
                        predicate: None,
                    });
                }
            }

            Transition::Action { rule_index: act_rule, action_index, .. } => {
                Recognizer::action(&mut self.parser, None, *act_rule, *action_index);
            }

            Transition::Precedence { precedence, .. } => {
                if !self.parser.precpred(*precedence) {
                    return Err(ANTLRError::FailedPredicate {
                        rule_name: self.rule_name(rule_index),
                        message: format!("precedence predicate failed: {{{precedence}>=prec}}?"),
                        predicate: None,
                    });
                }
            }
        }

        self.parser.set_state(transition.target() as isize);
        Ok(())
    }

    fn rule_name(&self, rule_index: usize) -> String {
        self.parser
            .base
            .rule_names
            .get(rule_index)
            .map(|s| (*s).to_owned())
            .unwrap_or_else(|| rule_index.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::atn::{ATN, GrammarType};
    use crate::atn_state::ATNState;
    use crate::error_strategy::DefaultErrorStrategy;
    use crate::parser_atn_simulator::DefaultParserATNSimulator;
    use crate::recognizer::RecognizerBase;
    use crate::token::{OwningToken, TOKEN_DEFAULT_CHANNEL, TOKEN_EOF};
    use crate::token_factory::{CommonTokenFactory, TokenFactory};
    use crate::token_source::TokenSource;
    use crate::token_stream::BufferedTokenStream;
    use crate::vocabulary::VocabularyImpl;

    struct VecTokenSource {
        tokens: Vec<OwningToken>,
        next: usize,
        factory: CommonTokenFactory,
    }

    impl TokenSource for VecTokenSource {
        fn next_token(&mut self) -> Result<OwningToken, ANTLRError> {
            if self.next < self.tokens.len() {
                let t = self.tokens[self.next].clone();
                self.next += 1;
                Ok(t)
            } else {
                Ok(OwningToken::new_eof(1, 0, self.tokens.len() as isize))
            }
        }
        fn get_line(&self) -> isize {
            1
        }
        fn get_char_position_in_line(&self) -> isize {
            0
        }
        fn get_source_name(&self) -> String {
            "<test>".to_owned()
        }
        fn get_token_factory(&self) -> &dyn TokenFactory {
            &self.factory
        }
    }

    fn tok(ttype: isize, idx: isize, text: &str) -> OwningToken {
        OwningToken {
            token_type: ttype,
            channel: TOKEN_DEFAULT_CHANNEL,
            start: 0,
            stop: 0,
            line: 1,
            column: 0,
            token_index: idx,
            text_override: Some(text.to_owned()),
            source_text: None,
            source_name: "<test>".to_owned(),
        }
    }

    const ID: isize = 1;
    const SEMI: isize = 2;

    /// `stat: ID ';' ;` — the simplest possible ATN shape, just enough to
    /// exercise the `ATOM` dispatch and ordinary `RULE_STOP` return.
    fn build_interpreter(tokens: Vec<OwningToken>) -> ParserInterpreter {
        let mut atn = ATN::new(GrammarType::Parser, SEMI);
        let start = atn.add_state(ATNState::new(0, 0, ATNStateType::RuleStart));
        let mid = atn.add_state(ATNState::new(0, 0, ATNStateType::Basic));
        let stop = atn.add_state(ATNState::new(0, 0, ATNStateType::RuleStop));
        atn.state_mut(start).add_transition(Transition::Atom { target: mid, label: ID });
        atn.state_mut(mid).add_transition(Transition::Atom { target: stop, label: SEMI });
        atn.rule_to_start_state = vec![start];
        atn.rule_to_stop_state = vec![stop];
        let atn = Arc::new(atn);

        let base = RecognizerBase::new(
            "Test.g4",
            &["stat"],
            Arc::new(VocabularyImpl::default()),
            atn.clone(),
            Arc::new(CommonTokenFactory::new()),
        );
        let source = Box::new(VecTokenSource { tokens, next: 0, factory: CommonTokenFactory::new() });
        let input = Box::new(BufferedTokenStream::new(source));
        let interpreter = Box::new(DefaultParserATNSimulator::new(atn));
        let parser = Parser::new(base, input, interpreter, Box::new(DefaultErrorStrategy::new()));
        ParserInterpreter::new(parser)
    }

    #[test]
    fn walks_atom_chain_to_rule_stop() {
        let mut interp = build_interpreter(vec![tok(ID, 0, "x"), tok(SEMI, 1, ";")]);
        let ctx = interp.parse(0).unwrap();
        assert_eq!(ctx.borrow().get_text(), "x;");
        assert_eq!(interp.parser.input().la(1), TOKEN_EOF);
    }

    /// `top: sub ';' ; sub: ID ;` — exercises the `RULE` dispatch and the
    /// ordinary (non-left-recursive) `RULE_STOP` unwind back to the
    /// caller's follow state.
    #[test]
    fn rule_transition_enters_and_returns_from_callee() {
        let mut atn = ATN::new(GrammarType::Parser, SEMI);
        let start0 = atn.add_state(ATNState::new(0, 0, ATNStateType::RuleStart));
        let after_call0 = atn.add_state(ATNState::new(0, 0, ATNStateType::Basic));
        let stop0 = atn.add_state(ATNState::new(0, 0, ATNStateType::RuleStop));
        let start1 = atn.add_state(ATNState::new(0, 1, ATNStateType::RuleStart));
        let stop1 = atn.add_state(ATNState::new(0, 1, ATNStateType::RuleStop));

        atn.state_mut(start0).add_transition(Transition::Rule {
            target: start1,
            rule_start: start1,
            rule_index: 1,
            precedence: 0,
            follow_state: after_call0,
        });
        atn.state_mut(after_call0).add_transition(Transition::Atom { target: stop0, label: SEMI });
        atn.state_mut(start1).add_transition(Transition::Atom { target: stop1, label: ID });
        atn.rule_to_start_state = vec![start0, start1];
        atn.rule_to_stop_state = vec![stop0, stop1];
        let atn = Arc::new(atn);

        let base = RecognizerBase::new(
            "Test.g4",
            &["top", "sub"],
            Arc::new(VocabularyImpl::default()),
            atn.clone(),
            Arc::new(CommonTokenFactory::new()),
        );
        let source = Box::new(VecTokenSource {
            tokens: vec![tok(ID, 0, "x"), tok(SEMI, 1, ";")],
            next: 0,
            factory: CommonTokenFactory::new(),
        });
        let input = Box::new(BufferedTokenStream::new(source));
        let sim = Box::new(DefaultParserATNSimulator::new(atn));
        let parser = Parser::new(base, input, sim, Box::new(DefaultErrorStrategy::new()));
        let mut interp = ParserInterpreter::new(parser);

        let ctx = interp.parse(0).unwrap();
        assert_eq!(ctx.borrow().get_text(), "x;");
    }

    #[test]
    fn mismatched_token_reports_input_mismatch() {
        // Neither a deletion (nothing legal follows) nor an insertion
        // (this type isn't what the next state expects either) applies,
        // so recovery falls through to a hard mismatch.
        let mut interp = build_interpreter(vec![tok(99, 0, "?")]);
        let err = interp.parse(0);
        assert!(err.is_err());
    }
}
