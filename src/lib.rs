//! Runtime support for parsers generated from ANTLR4-style grammars:
//! token buffering, ATN-driven lexing/parsing, tree construction, and
//! error recovery (see `SPEC_FULL.md`). Generated lexers/parsers are not
//! part of this crate — they're produced by an external grammar tool and
//! compiled against the traits and base types exposed here (`Recognizer`,
//! `Lexer`, `Parser`, the ATN simulator collaborator traits).
//!
//! Module layout mirrors the pipeline data flows through: char stream →
//! lexer → token stream → parser → rule-context tree, with the ATN/DFA
//! machinery and error handling sitting alongside as shared collaborators.

pub mod atn;
pub mod atn_config;
pub mod atn_config_set;
pub mod atn_deserializer;
pub mod atn_simulator;
pub mod atn_state;
pub mod bit_set;
pub mod char_stream;
pub mod common_token_stream;
pub mod dfa;
pub mod error_listener;
pub mod error_strategy;
pub mod errors;
pub mod int_stream;
pub mod interval_set;
pub mod lexer;
pub mod lexer_atn_simulator;
pub mod ll1_analyzer;
pub mod murmur_hash;
pub mod parser;
pub mod parser_atn_simulator;
pub mod parser_interpreter;
pub mod parser_rule_context;
pub mod prediction_context;
pub mod recognizer;
pub mod rule_context;
pub mod token;
pub mod token_factory;
pub mod token_source;
pub mod token_stream;
pub mod transition;
pub mod tree;
pub mod trees;
pub mod utils;
pub mod vocabulary;

/// Re-exports the types a generated recognizer touches on every line, so
/// consumer crates can `use antlr_rust::prelude::*;` instead of reaching
/// into each module individually.
pub mod prelude {
    pub use crate::atn::{GrammarType, ATN};
    pub use crate::atn_simulator::{ATNSimulator, LexerATNSimulator, ParserATNSimulator};
    pub use crate::char_stream::{CharStream, InputStream};
    pub use crate::common_token_stream::CommonTokenStream;
    pub use crate::error_listener::{ANTLRErrorListener, ConsoleErrorListener, SyntaxErrorInfo};
    pub use crate::error_strategy::{DefaultErrorStrategy, ErrorStrategy, RecoveringParser};
    pub use crate::errors::ANTLRError;
    pub use crate::int_stream::IntStream;
    pub use crate::interval_set::{Interval, IntervalSet};
    pub use crate::lexer::Lexer;
    pub use crate::lexer_atn_simulator::DefaultLexerATNSimulator;
    pub use crate::parser::{ParseTreeListener, Parser, RuleCtxRef};
    pub use crate::parser_atn_simulator::DefaultParserATNSimulator;
    pub use crate::parser_interpreter::ParserInterpreter;
    pub use crate::parser_rule_context::{ParseTreeChild, ParserRuleContext, ParserRuleContextBase};
    pub use crate::recognizer::{Recognizer, RecognizerBase};
    pub use crate::rule_context::{ParentLink, RuleContext, RuleContextBase};
    pub use crate::token::{OwningToken, Token, TOKEN_EOF, TOKEN_INVALID_TYPE};
    pub use crate::token_factory::{CommonTokenFactory, TokenFactory};
    pub use crate::token_source::TokenSource;
    pub use crate::token_stream::{BufferedTokenStream, TokenStream};
    pub use crate::tree::{ErrorNode, ParseTree, TerminalNode};
    pub use crate::vocabulary::{Vocabulary, VocabularyImpl};
}
