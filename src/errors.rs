//! The error taxonomy described in spec §7, modeled as a tagged sum rather
//! than the subclass hierarchy the Java/C++ runtimes use (§9 design note:
//! "Polymorphism across error kinds ... model as a tagged sum").

use std::sync::Arc;

use crate::interval_set::IntervalSet;
use crate::token::{OwningToken, Token};

/// Recognition- and usage-level failures raised by the core runtime.
///
/// `NoViableAlt`, `InputMismatch`, `FailedPredicate` and
/// `LexerNoViableAlt` are the four *recognition* kinds of §7; `IllegalState`
/// and `IllegalArgument` are the two *usage* kinds. Recognition errors are
/// caught by the surrounding rule's generated epilog and routed to
/// `ErrorStrategy::report_error`/`recover` — they never escape a top-level
/// rule invocation unless recovery re-raises. Usage errors propagate to the
/// caller unchanged.
#[derive(thiserror::Error, Debug, Clone)]
pub enum ANTLRError {
    /// Prediction found no viable alternative.
    #[error("no viable alternative at input '{input_text}'")]
    NoViableAlt {
        start_token: Option<OwningToken>,
        offending_token: Option<OwningToken>,
        /// Rendered text between `start_token` and `offending_token`.
        input_text: String,
    },

    /// A token of the wrong type was matched and inline recovery failed.
    #[error("mismatched input '{}' expecting {expecting}", display_offending(.offending_token))]
    InputMismatch {
        offending_token: Option<OwningToken>,
        expecting: String,
    },

    /// A semantic or precedence predicate evaluated to `false`.
    #[error("rule {rule_name} {message}")]
    FailedPredicate {
        rule_name: String,
        message: String,
        predicate: Option<String>,
    },

    /// No lexer rule matched the next code unit(s).
    #[error("token recognition error at: '{bad_text}'")]
    LexerNoViableAlt {
        start_index: isize,
        bad_text: String,
    },

    /// Attempt to consume past EOF, pop an empty mode stack, mutate a
    /// read-only config set, or otherwise violate a usage precondition.
    #[error("illegal state: {0}")]
    IllegalStateError(String),

    /// Out-of-bounds token index, negative bit index, and similar.
    #[error("illegal argument: {0}")]
    IllegalArgumentError(String),

    /// A registered observer callback failed; wraps the failure so it can
    /// propagate to the caller of `next_token`/`parse` per §7.
    #[error("error listener failed: {0}")]
    FallThrough(Arc<str>),
}

fn display_offending(tok: &Option<OwningToken>) -> String {
    match tok {
        Some(t) => escape_ws(&t.get_text()),
        None => "<unknown>".to_owned(),
    }
}

/// Escapes `\n \r \t` for single-quoted display per spec §7.
pub fn escape_ws(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}

impl ANTLRError {
    pub fn offending_token(&self) -> Option<&OwningToken> {
        match self {
            ANTLRError::NoViableAlt {
                offending_token, ..
            } => offending_token.as_ref(),
            ANTLRError::InputMismatch {
                offending_token, ..
            } => offending_token.as_ref(),
            _ => None,
        }
    }
}

/// Renders an `IntervalSet` of expected token types using vocabulary
/// display names, as used by `InputMismatch`'s `expecting` field and by
/// `sync`'s generic fallback message.
pub fn render_expected(set: &IntervalSet, display_name: impl Fn(isize) -> String) -> String {
    let types = set.to_vec();
    if types.is_empty() {
        return "{}".to_owned();
    }
    if types.len() == 1 {
        return display_name(types[0]);
    }
    let mut s = String::from("{");
    for (i, t) in types.iter().enumerate() {
        if i > 0 {
            s.push_str(", ");
        }
        s.push_str(&display_name(*t));
    }
    s.push('}');
    s
}
