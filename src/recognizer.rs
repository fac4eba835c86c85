//! Shared recognizer state and the semantic-action hooks generated lexers
//! and parsers override (spec §6 "Recognizer base + observer streams").
//!
//! `Lexer` and `Parser` each embed a `RecognizerBase` rather than
//! inheriting from a common superclass (the composition pattern already
//! used for `CommonTokenStream` over `BufferedTokenStream`): the
//! rule/token-name tables, the error-listener registry, and the ATN handle
//! live here once, and the two concrete recognizers expose them through
//! the `Recognizer` trait.

use std::collections::HashMap;
use std::sync::Arc;

use crate::atn::ATN;
use crate::error_listener::{ANTLRErrorListener, ProxyErrorListener, SyntaxErrorInfo};
use crate::errors::ANTLRError;
use crate::rule_context::RuleContext;
use crate::token::TOKEN_INVALID_TYPE;
use crate::token_factory::TokenFactory;
use crate::vocabulary::Vocabulary;

/// Hooks a generated recognizer overrides to evaluate the embedded
/// semantic/precedence predicates and actions a grammar declares (spec
/// §4.2 "action"/predicate-gated transitions). The base runtime never
/// knows what a particular predicate or action means; it only knows when
/// to call into one.
pub trait Recognizer {
    fn get_rule_names(&self) -> &[&str];
    fn get_vocabulary(&self) -> &dyn Vocabulary;
    fn get_grammar_file_name(&self) -> &str;
    fn get_atn(&self) -> &Arc<ATN>;
    fn get_state(&self) -> isize;
    fn set_state(&mut self, state: isize);

    /// Evaluate semantic predicate `pred_index` declared in `rule_index`.
    /// Predicate-free recognizers (and this default) always succeed.
    fn sempred(&mut self, _ctx: Option<&dyn RuleContext>, _rule_index: usize, _pred_index: isize) -> bool {
        true
    }

    /// Evaluate a left-recursive rule's precedence predicate (spec §4.2
    /// "left-recursion promotion"): `true` iff the current invocation may
    /// bind at `precedence`.
    fn precpred(&mut self, _ctx: Option<&dyn RuleContext>, _precedence: isize) -> bool {
        true
    }

    /// Run embedded action `action_index` declared in `rule_index`.
    fn action(&mut self, _ctx: Option<&dyn RuleContext>, _rule_index: usize, _action_index: isize) {}
}

/// Token-type name lookup plus the observer registry, shared verbatim by
/// `Lexer` and `Parser` (spec §6: "token/rule-name tables, error-listener
/// registration ... held by the recognizer base").
pub struct RecognizerBase {
    pub grammar_file_name: &'static str,
    pub rule_names: &'static [&'static str],
    pub vocabulary: Arc<dyn Vocabulary>,
    pub atn: Arc<ATN>,
    token_type_map: HashMap<String, isize>,
    rule_index_map: HashMap<&'static str, usize>,
    pub error_listeners: ProxyErrorListener,
    pub token_factory: Arc<dyn TokenFactory>,
    state: isize,
}

impl RecognizerBase {
    pub fn new(
        grammar_file_name: &'static str,
        rule_names: &'static [&'static str],
        vocabulary: Arc<dyn Vocabulary>,
        atn: Arc<ATN>,
        token_factory: Arc<dyn TokenFactory>,
    ) -> Self {
        let mut rule_index_map = HashMap::with_capacity(rule_names.len());
        for (i, name) in rule_names.iter().enumerate() {
            rule_index_map.insert(*name, i);
        }

        let mut token_type_map = HashMap::new();
        for t in 0..=vocabulary.max_token_type() {
            if let Some(lit) = vocabulary.get_literal_name(t) {
                token_type_map.insert(lit.to_owned(), t);
            }
            if let Some(sym) = vocabulary.get_symbolic_name(t) {
                token_type_map.insert(sym.to_owned(), t);
            }
        }
        token_type_map.insert("EOF".to_owned(), crate::token::TOKEN_EOF);

        RecognizerBase {
            grammar_file_name,
            rule_names,
            vocabulary,
            atn,
            token_type_map,
            rule_index_map,
            error_listeners: {
                let mut p = ProxyErrorListener::new();
                p.add(Box::new(crate::error_listener::ConsoleErrorListener));
                p
            },
            token_factory,
            state: -1,
        }
    }

    pub fn get_token_type(&self, token_name: &str) -> isize {
        *self.token_type_map.get(token_name).unwrap_or(&TOKEN_INVALID_TYPE)
    }

    pub fn get_rule_index(&self, rule_name: &str) -> Option<usize> {
        self.rule_index_map.get(rule_name).copied()
    }

    pub fn get_state(&self) -> isize {
        self.state
    }

    pub fn set_state(&mut self, state: isize) {
        self.state = state;
    }

    pub fn add_error_listener(&mut self, listener: Box<dyn ANTLRErrorListener>) {
        self.error_listeners.add(listener);
    }

    pub fn remove_error_listeners(&mut self) {
        self.error_listeners.remove_all();
    }

    pub fn notify_syntax_error(&mut self, err: &SyntaxErrorInfo) -> Result<(), ANTLRError> {
        self.error_listeners.dispatch_syntax_error(err)
    }

    /// `"line L:C "` prefix used ahead of a rendered error message (spec §7
    /// message templates), or an empty string when the error carries no
    /// offending-token position.
    pub fn error_header(&self, err: &ANTLRError) -> String {
        match err.offending_token() {
            Some(t) => format!("line {}:{} ", t.get_line(), t.get_column()),
            None => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atn::{GrammarType, ATN};
    use crate::token_factory::CommonTokenFactory;
    use crate::vocabulary::VocabularyImpl;

    fn base() -> RecognizerBase {
        let vocab: Arc<dyn Vocabulary> = Arc::new(VocabularyImpl::new(
            vec![None, Some("'='".to_owned())],
            vec![None, Some("ASSIGN".to_owned())],
        ));
        let atn = Arc::new(ATN::new(GrammarType::Parser, 1));
        RecognizerBase::new("Test.g4", &["stat"], vocab, atn, Arc::new(CommonTokenFactory::new()))
    }

    #[test]
    fn token_type_resolves_literal_and_symbolic_names() {
        let r = base();
        assert_eq!(r.get_token_type("'='"), 1);
        assert_eq!(r.get_token_type("ASSIGN"), 1);
        assert_eq!(r.get_token_type("EOF"), crate::token::TOKEN_EOF);
        assert_eq!(r.get_token_type("NOPE"), TOKEN_INVALID_TYPE);
    }

    #[test]
    fn rule_index_resolves_known_rule_names() {
        let r = base();
        assert_eq!(r.get_rule_index("stat"), Some(0));
        assert_eq!(r.get_rule_index("nope"), None);
    }

    #[test]
    fn state_defaults_to_negative_one_and_is_settable() {
        let mut r = base();
        assert_eq!(r.get_state(), -1);
        r.set_state(4);
        assert_eq!(r.get_state(), 4);
    }
}
