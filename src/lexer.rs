//! `Lexer`: drives `LexerATNSimulator::lexer_match` to pull a token at a
//! time from a char source (spec §4.3).

use std::sync::Arc;

use crate::atn::ATN;
use crate::char_stream::CharStream;
use crate::error_listener::SyntaxErrorInfo;
use crate::errors::{escape_ws, ANTLRError};
use crate::int_stream::{IntStream, EOF};
use crate::recognizer::{Recognizer, RecognizerBase};
use crate::token::{OwningToken, TOKEN_DEFAULT_CHANNEL, TOKEN_EOF, TOKEN_INVALID_TYPE};
use crate::token_factory::{SourcePair, TokenFactory};
use crate::token_source::TokenSource;
use crate::vocabulary::Vocabulary;

pub const DEFAULT_MODE: usize = 0;
/// Sentinel `token_type` values a lexer action assigns mid-match (spec
/// §4.3 `skip`/`more`), matching the reference runtimes' reserved values.
pub const MORE: isize = -2;
pub const SKIP: isize = -3;
pub const DEFAULT_TOKEN_CHANNEL: isize = TOKEN_DEFAULT_CHANNEL;
pub const HIDDEN: isize = crate::token::TOKEN_HIDDEN_CHANNEL;
pub const MIN_CHAR_VALUE: isize = 0x0000;
pub const MAX_CHAR_VALUE: isize = 0x10FFFF;

pub struct Lexer {
    pub base: RecognizerBase,
    input: Box<dyn CharStream>,
    interpreter: Box<dyn crate::atn_simulator::LexerATNSimulator>,
    mode: usize,
    mode_stack: Vec<usize>,

    token_type: isize,
    channel: isize,
    token_start_char_index: isize,
    token_start_line: isize,
    token_start_column: isize,
    text_override: Option<String>,
    token: Option<OwningToken>,
    hit_eof: bool,
}

impl Lexer {
    pub fn new(
        base: RecognizerBase,
        input: Box<dyn CharStream>,
        interpreter: Box<dyn crate::atn_simulator::LexerATNSimulator>,
    ) -> Self {
        Lexer {
            base,
            input,
            interpreter,
            mode: DEFAULT_MODE,
            mode_stack: Vec::new(),
            token_type: TOKEN_INVALID_TYPE,
            channel: TOKEN_DEFAULT_CHANNEL,
            token_start_char_index: -1,
            token_start_line: 1,
            token_start_column: 0,
            text_override: None,
            token: None,
            hit_eof: false,
        }
    }

    pub fn input(&self) -> &dyn CharStream {
        self.input.as_ref()
    }

    pub fn get_char_index(&self) -> isize {
        self.input.index()
    }

    /// Text matched so far for the token under construction (spec §4.3
    /// `emit`'s default text source), before any `set_text` override.
    pub fn get_text(&self) -> String {
        if let Some(t) = &self.text_override {
            return t.clone();
        }
        let stop = (self.input.index() - 1).max(self.token_start_char_index - 1);
        self.input.get_text(crate::interval_set::Interval::new(self.token_start_char_index, stop))
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text_override = Some(text.into());
    }

    pub fn set_token_type(&mut self, ttype: isize) {
        self.token_type = ttype;
    }

    pub fn set_channel(&mut self, channel: isize) {
        self.channel = channel;
    }

    pub fn skip(&mut self) {
        self.token_type = SKIP;
    }

    pub fn more(&mut self) {
        self.token_type = MORE;
    }

    pub fn mode(&mut self, m: usize) {
        self.mode = m;
    }

    pub fn current_mode(&self) -> usize {
        self.mode
    }

    pub fn push_mode(&mut self, m: usize) {
        self.mode_stack.push(self.mode);
        self.mode = m;
    }

    pub fn pop_mode(&mut self) -> Result<usize, ANTLRError> {
        let m = self
            .mode_stack
            .pop()
            .ok_or_else(|| ANTLRError::IllegalStateError("cannot pop an empty lexer mode stack".to_owned()))?;
        self.mode = m;
        Ok(m)
    }

    /// Mint the token accumulated since the last `reset_token_state`,
    /// using the recognizer's token factory (spec §4.3 step 3).
    fn emit(&mut self) {
        if self.token_type == TOKEN_EOF {
            self.token = Some(self.make_eof_token());
            return;
        }
        let source_name = self.input.get_source_name();
        let text = self.text_override.clone();
        let stop = self.input.index() - 1;
        let tok = self.base.token_factory.create(
            SourcePair { source_name: &source_name },
            self.token_type,
            text.as_deref(),
            self.channel,
            self.token_start_char_index,
            stop,
            self.token_start_line,
            self.token_start_column,
        );
        self.token = Some(tok);
    }

    fn make_eof_token(&self) -> OwningToken {
        OwningToken::new_eof(self.interpreter.line(), self.interpreter.char_position_in_line(), -1)
    }

    fn reset_token_state(&mut self) {
        self.token = None;
        self.token_type = TOKEN_INVALID_TYPE;
        self.channel = TOKEN_DEFAULT_CHANNEL;
        self.token_start_char_index = self.input.index();
        self.token_start_line = self.interpreter.line();
        self.token_start_column = self.interpreter.char_position_in_line();
        self.text_override = None;
    }

    fn notify_lexer_error(&mut self, start_index: isize, bad_text: &str) -> Result<(), ANTLRError> {
        let err = ANTLRError::LexerNoViableAlt {
            start_index,
            bad_text: bad_text.to_owned(),
        };
        let message = format!("token recognition error at: '{}'", escape_ws(bad_text));
        self.base.notify_syntax_error(&SyntaxErrorInfo {
            line: self.interpreter.line(),
            column: self.interpreter.char_position_in_line(),
            message,
            offending_symbol: None,
            exception: Some(err),
        })
    }

    /// Consume one code unit and keep going, unless already at EOF (spec
    /// §4.3 `LexerNoViableAltException` handling).
    fn recover_lexer_error(&mut self) {
        if self.input.la(1) != EOF {
            self.interpreter.consume(self.input.as_mut());
        }
    }

    /// `nextToken()` (spec §4.3): drives the match loop, handling
    /// recognition failures, `SKIP`/`MORE`, and the EOF latch.
    pub fn next_token(&mut self) -> Result<OwningToken, ANTLRError> {
        if self.hit_eof {
            return Ok(self.make_eof_token());
        }

        let marker = self.input.mark();
        let result = self.run_match_loop();
        self.input.release(marker);
        result
    }

    fn run_match_loop(&mut self) -> Result<OwningToken, ANTLRError> {
        'outer: loop {
            self.reset_token_state();

            if self.input.la(1) == EOF {
                self.hit_eof = true;
                self.token_type = TOKEN_EOF;
                self.emit();
                break 'outer;
            }

            loop {
                match self.interpreter.lexer_match(&mut *self.input, self.mode) {
                    Ok(ttype) => self.token_type = ttype,
                    Err(ANTLRError::LexerNoViableAlt { start_index, bad_text }) => {
                        self.notify_lexer_error(start_index, &bad_text)?;
                        self.recover_lexer_error();
                        self.token_type = SKIP;
                    }
                    Err(e) => return Err(e),
                }
                if self.input.la(1) == EOF {
                    self.hit_eof = true;
                }
                if self.token_type == SKIP {
                    continue 'outer;
                }
                if self.token_type != MORE {
                    break;
                }
            }
            if self.token.is_none() {
                self.emit();
            }
            break;
        }

        Ok(self
            .token
            .take()
            .expect("run_match_loop always assigns a token before returning"))
    }
}

impl Recognizer for Lexer {
    fn get_rule_names(&self) -> &[&str] {
        self.base.rule_names
    }

    fn get_vocabulary(&self) -> &dyn Vocabulary {
        self.base.vocabulary.as_ref()
    }

    fn get_grammar_file_name(&self) -> &str {
        self.base.grammar_file_name
    }

    fn get_atn(&self) -> &Arc<ATN> {
        &self.base.atn
    }

    fn get_state(&self) -> isize {
        self.base.get_state()
    }

    fn set_state(&mut self, state: isize) {
        self.base.set_state(state)
    }
}

impl TokenSource for Lexer {
    fn next_token(&mut self) -> Result<OwningToken, ANTLRError> {
        Lexer::next_token(self)
    }

    fn get_line(&self) -> isize {
        self.interpreter.line()
    }

    fn get_char_position_in_line(&self) -> isize {
        self.interpreter.char_position_in_line()
    }

    fn get_source_name(&self) -> String {
        self.input.get_source_name()
    }

    fn get_token_factory(&self) -> &dyn TokenFactory {
        self.base.token_factory.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atn::GrammarType;
    use crate::atn_state::{ATNState, ATNStateType};
    use crate::char_stream::InputStream;
    use crate::lexer_atn_simulator::DefaultLexerATNSimulator;
    use crate::token::Token;
    use crate::token_factory::CommonTokenFactory;
    use crate::transition::Transition;
    use crate::vocabulary::VocabularyImpl;

    fn build_lexer(src: &str) -> Lexer {
        let mut atn = ATN::new(GrammarType::Lexer, 127);
        let mode_start = atn.add_state(ATNState::new(0, usize::MAX, ATNStateType::TokenStart));
        let rule_start = atn.add_state(ATNState::new(0, 0, ATNStateType::RuleStart));
        let rule_stop = atn.add_state(ATNState::new(0, 0, ATNStateType::RuleStop));
        atn.state_mut(mode_start).add_transition(Transition::Epsilon { target: rule_start });
        atn.state_mut(rule_start).add_transition(Transition::Atom {
            target: rule_stop,
            label: 'x' as isize,
        });
        atn.rule_to_start_state = vec![rule_start];
        atn.rule_to_stop_state = vec![rule_stop];
        atn.mode_to_start_state = vec![mode_start];
        let atn = Arc::new(atn);

        let base = RecognizerBase::new(
            "Test.g4",
            &["X"],
            Arc::new(VocabularyImpl::default()),
            atn.clone(),
            Arc::new(CommonTokenFactory::new()),
        );
        let interpreter = Box::new(DefaultLexerATNSimulator::new(atn, vec![1]));
        Lexer::new(base, Box::new(InputStream::new(src)), interpreter)
    }

    #[test]
    fn emits_matched_token_then_eof() {
        let mut lexer = build_lexer("x");
        let t1 = lexer.next_token().unwrap();
        assert_eq!(t1.get_token_type(), 1);
        assert_eq!(t1.get_text(), "x");

        let t2 = lexer.next_token().unwrap();
        assert_eq!(t2.get_token_type(), TOKEN_EOF);
    }

    #[test]
    fn unmatched_input_reports_error_and_skips_one_char() {
        let mut lexer = build_lexer("yx");
        let t1 = lexer.next_token().unwrap();
        // "y" fails to match; recovery consumes it and restarts, landing on "x".
        assert_eq!(t1.get_token_type(), 1);
        assert_eq!(t1.get_text(), "x");
    }

    #[test]
    fn pop_mode_on_empty_stack_is_an_error() {
        let mut lexer = build_lexer("x");
        assert!(lexer.pop_mode().is_err());
    }
}
