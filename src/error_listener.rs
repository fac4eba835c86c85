//! Observer streams (spec §6): a single observer model — one subscriber
//! list per event kind, fanned out by a proxy dispatcher that isolates a
//! failing subscriber from the rest (spec §9 "Observer fan-out").

use std::rc::Rc;

use crate::atn_config_set::ATNConfigSet;
use crate::bit_set::BitSet;
use crate::dfa::DFA;
use crate::errors::ANTLRError;
use crate::token::OwningToken;

/// A lexer or parser syntax error. `offending_symbol` is populated only
/// for parser errors (spec §6: "for parser errors, the `ParserSyntaxError`
/// variant additionally carries `offendingSymbol`").
#[derive(Debug, Clone)]
pub struct SyntaxErrorInfo {
    pub line: isize,
    pub column: isize,
    pub message: String,
    pub offending_symbol: Option<Rc<OwningToken>>,
    pub exception: Option<ANTLRError>,
}

#[derive(Debug, Clone)]
pub struct AmbiguityEvent {
    pub start_index: isize,
    pub stop_index: isize,
    pub exact: bool,
    pub ambig_alts: BitSet,
}

#[derive(Debug, Clone)]
pub struct AttemptingFullContextEvent {
    pub start_index: isize,
    pub stop_index: isize,
    pub conflicting_alts: Option<BitSet>,
}

#[derive(Debug, Clone)]
pub struct ContextSensitivityEvent {
    pub start_index: isize,
    pub stop_index: isize,
    pub prediction: isize,
}

/// Subscriber to all four observer streams. Only `syntax_error` is
/// mandatory; the ATN-simulator-diagnostic streams default to no-ops so a
/// listener interested only in errors does not have to know about them.
pub trait ANTLRErrorListener {
    fn syntax_error(&mut self, err: &SyntaxErrorInfo) -> Result<(), ANTLRError> {
        let _ = err;
        Ok(())
    }
    fn report_ambiguity(&mut self, _dfa: &DFA, _event: &AmbiguityEvent, _configs: &ATNConfigSet) {}
    fn report_attempting_full_context(&mut self, _dfa: &DFA, _event: &AttemptingFullContextEvent, _configs: &ATNConfigSet) {}
    fn report_context_sensitivity(&mut self, _dfa: &DFA, _event: &ContextSensitivityEvent, _configs: &ATNConfigSet) {}
}

/// Prints syntax errors to stderr, matching the reference runtimes'
/// `ConsoleErrorListener` default.
#[derive(Default)]
pub struct ConsoleErrorListener;

impl ANTLRErrorListener for ConsoleErrorListener {
    fn syntax_error(&mut self, err: &SyntaxErrorInfo) -> Result<(), ANTLRError> {
        eprintln!("line {}:{} {}", err.line, err.column, err.message);
        Ok(())
    }
}

/// Fans a `syntax_error` call out to every registered listener, isolating
/// a failing listener from the rest (it still receives the event; the
/// first failure is what ultimately propagates to the caller of
/// `next_token`/the parse entry point, per spec §7).
#[derive(Default)]
pub struct ProxyErrorListener {
    listeners: Vec<Box<dyn ANTLRErrorListener>>,
}

impl ProxyErrorListener {
    pub fn new() -> Self {
        ProxyErrorListener { listeners: Vec::new() }
    }

    pub fn add(&mut self, listener: Box<dyn ANTLRErrorListener>) {
        self.listeners.push(listener);
    }

    pub fn remove_all(&mut self) {
        self.listeners.clear();
    }

    pub fn dispatch_syntax_error(&mut self, err: &SyntaxErrorInfo) -> Result<(), ANTLRError> {
        let mut first_failure = None;
        for listener in &mut self.listeners {
            if let Err(e) = listener.syntax_error(err) {
                log::debug!("error listener failed while reporting a syntax error: {e}");
                if first_failure.is_none() {
                    first_failure = Some(e);
                }
            }
        }
        match first_failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    pub fn dispatch_ambiguity(&mut self, dfa: &DFA, event: &AmbiguityEvent, configs: &ATNConfigSet) {
        for listener in &mut self.listeners {
            listener.report_ambiguity(dfa, event, configs);
        }
    }

    pub fn dispatch_attempting_full_context(&mut self, dfa: &DFA, event: &AttemptingFullContextEvent, configs: &ATNConfigSet) {
        for listener in &mut self.listeners {
            listener.report_attempting_full_context(dfa, event, configs);
        }
    }

    pub fn dispatch_context_sensitivity(&mut self, dfa: &DFA, event: &ContextSensitivityEvent, configs: &ATNConfigSet) {
        for listener in &mut self.listeners {
            listener.report_context_sensitivity(dfa, event, configs);
        }
    }
}
