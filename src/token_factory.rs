//! Token allocation policy (spec §3 "Token factory").

use crate::token::OwningToken;

/// Identifies the (lexer, char source) pair a factory is minting tokens for.
/// Purely informational here since `OwningToken` stores its provenance as
/// plain strings rather than live references (see `token.rs`).
#[derive(Debug, Clone, Copy, Default)]
pub struct SourcePair<'a> {
    pub source_name: &'a str,
}

pub trait TokenFactory {
    /// Produce a token from the raw pieces a lexer collects while matching.
    #[allow(clippy::too_many_arguments)]
    fn create(
        &self,
        source: SourcePair,
        ttype: isize,
        text: Option<&str>,
        channel: isize,
        start: isize,
        stop: isize,
        line: isize,
        column: isize,
    ) -> OwningToken;

    /// Produce a token carrying only text (used for conjured/"<missing
    /// X>" tokens where there is no underlying source span).
    fn create_thin(&self, ttype: isize, text: &str) -> OwningToken;

    /// Whether text should be eagerly materialized from the char source at
    /// construction time (`true`) or resolved lazily (`false`); the latter
    /// matters only for char sources that cannot cheaply re-slice later,
    /// e.g. an unbuffered stream. See spec §3.
    fn copy_text(&self) -> bool;
}

/// The default factory used when a `Lexer`/`Parser` is not configured with
/// a custom one.
pub struct CommonTokenFactory {
    copy_text: bool,
}

impl CommonTokenFactory {
    pub fn new() -> Self {
        CommonTokenFactory { copy_text: false }
    }

    pub fn with_copy_text(copy_text: bool) -> Self {
        CommonTokenFactory { copy_text }
    }
}

impl Default for CommonTokenFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenFactory for CommonTokenFactory {
    fn create(
        &self,
        source: SourcePair,
        ttype: isize,
        text: Option<&str>,
        channel: isize,
        start: isize,
        stop: isize,
        line: isize,
        column: isize,
    ) -> OwningToken {
        OwningToken {
            token_type: ttype,
            channel,
            start,
            stop,
            line,
            column,
            token_index: -1,
            text_override: text.map(|t| t.to_owned()),
            source_text: None,
            source_name: source.source_name.to_owned(),
        }
    }

    fn create_thin(&self, ttype: isize, text: &str) -> OwningToken {
        OwningToken {
            token_type: ttype,
            channel: crate::token::TOKEN_DEFAULT_CHANNEL,
            start: -1,
            stop: -1,
            line: 0,
            column: -1,
            token_index: -1,
            text_override: Some(text.to_owned()),
            source_text: None,
            source_name: "<unknown>".to_owned(),
        }
    }

    fn copy_text(&self) -> bool {
        self.copy_text
    }
}

lazy_static::lazy_static! {
    /// Process-wide default instance, mirroring the reference runtimes'
    /// `CommonTokenFactory.DEFAULT` singleton. Only used when a recognizer
    /// has not been given its own factory; a port may always prefer an
    /// explicitly-owned instance (see spec §9 "Global-state caches").
    pub static ref DEFAULT_TOKEN_FACTORY: CommonTokenFactory = CommonTokenFactory::new();
}
