//! The `Token` record (spec §3) plus the read/write split the generated
//! lexer needs while a token is still under construction.

use std::fmt;
use std::rc::Weak;

use crate::char_stream::CharStream;
use crate::token_source::TokenSource;

/// Reserved token types.
pub const TOKEN_INVALID_TYPE: isize = 0;
pub const TOKEN_EPSILON: isize = -2;
pub const TOKEN_EOF: isize = -1;
pub const TOKEN_MIN_USER_TOKEN_TYPE: isize = 1;

/// Reserved channels.
pub const TOKEN_DEFAULT_CHANNEL: isize = 0;
pub const TOKEN_HIDDEN_CHANNEL: isize = 1;

/// Read-only view of a token, as seen by the parser and by tree nodes.
pub trait Token: fmt::Debug {
    fn get_token_type(&self) -> isize;
    fn get_channel(&self) -> isize;
    fn get_start(&self) -> isize;
    fn get_stop(&self) -> isize;
    fn get_line(&self) -> isize;
    fn get_column(&self) -> isize;
    fn get_token_index(&self) -> isize;
    /// `text_override` if set; else the char-source slice `[start,stop]`;
    /// else `"<EOF>"`, per spec §3.
    fn get_text(&self) -> String;
    fn get_token_source(&self) -> Option<Weak<dyn TokenSource>>;
    fn get_input_stream(&self) -> Option<Weak<dyn CharStream>>;
}

/// The subset of `Token` a factory/lexer may still mutate while a token is
/// being assembled (before it is handed to the buffer and treated as
/// immutable).
pub trait WritableToken: Token {
    fn set_token_type(&mut self, ttype: isize);
    fn set_channel(&mut self, channel: isize);
    fn set_start(&mut self, start: isize);
    fn set_stop(&mut self, stop: isize);
    fn set_line(&mut self, line: isize);
    fn set_column(&mut self, column: isize);
    fn set_token_index(&mut self, index: isize);
    fn set_text(&mut self, text: Option<String>);
}

/// Concrete, owning token implementation. Text is always materialized
/// eagerly in this port (the `copyText=false` knob from the reference
/// runtimes exists only to avoid a redundant copy when a `CharStream` can
/// hand back a slice cheaply; here `CommonTokenFactory::copy_text` still
/// controls whether `text_override` is populated at construction time or
/// left to be resolved lazily from the recorded source text).
#[derive(Debug, Clone)]
pub struct OwningToken {
    pub token_type: isize,
    pub channel: isize,
    pub start: isize,
    pub stop: isize,
    pub line: isize,
    pub column: isize,
    pub token_index: isize,
    pub text_override: Option<String>,
    /// Materialized source text for `[start, stop]`, used when
    /// `text_override` is absent. Stored directly rather than as a live
    /// back-reference into the char source, since char sources in this
    /// port are not guaranteed to outlive the token buffer.
    pub source_text: Option<String>,
    pub source_name: String,
}

impl OwningToken {
    pub fn new_eof(line: isize, column: isize, token_index: isize) -> Self {
        OwningToken {
            token_type: TOKEN_EOF,
            channel: TOKEN_DEFAULT_CHANNEL,
            start: -1,
            stop: -1,
            line,
            column,
            token_index,
            text_override: None,
            source_text: None,
            source_name: "<unknown>".to_owned(),
        }
    }

    /// A conjured token produced by single-token insertion (spec §4.4):
    /// `token_index = -1`, text `"<missing NAME>"`.
    pub fn missing(ttype: isize, name: &str, channel: isize, at: isize, line: isize, column: isize) -> Self {
        OwningToken {
            token_type: ttype,
            channel,
            start: at,
            stop: at - 1,
            line,
            column,
            token_index: -1,
            text_override: Some(format!("<missing {name}>")),
            source_text: None,
            source_name: "<unknown>".to_owned(),
        }
    }
}

impl Token for OwningToken {
    fn get_token_type(&self) -> isize {
        self.token_type
    }
    fn get_channel(&self) -> isize {
        self.channel
    }
    fn get_start(&self) -> isize {
        self.start
    }
    fn get_stop(&self) -> isize {
        self.stop
    }
    fn get_line(&self) -> isize {
        self.line
    }
    fn get_column(&self) -> isize {
        self.column
    }
    fn get_token_index(&self) -> isize {
        self.token_index
    }
    fn get_text(&self) -> String {
        if let Some(t) = &self.text_override {
            return t.clone();
        }
        if let Some(t) = &self.source_text {
            return t.clone();
        }
        "<EOF>".to_owned()
    }
    fn get_token_source(&self) -> Option<Weak<dyn TokenSource>> {
        None
    }
    fn get_input_stream(&self) -> Option<Weak<dyn CharStream>> {
        None
    }
}

impl WritableToken for OwningToken {
    fn set_token_type(&mut self, ttype: isize) {
        self.token_type = ttype;
    }
    fn set_channel(&mut self, channel: isize) {
        self.channel = channel;
    }
    fn set_start(&mut self, start: isize) {
        self.start = start;
    }
    fn set_stop(&mut self, stop: isize) {
        self.stop = stop;
    }
    fn set_line(&mut self, line: isize) {
        self.line = line;
    }
    fn set_column(&mut self, column: isize) {
        self.column = column;
    }
    fn set_token_index(&mut self, index: isize) {
        self.token_index = index;
    }
    fn set_text(&mut self, text: Option<String>) {
        self.text_override = text;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eof_text_is_angle_eof() {
        let t = OwningToken::new_eof(1, 0, 5);
        assert_eq!(t.get_text(), "<EOF>");
    }

    #[test]
    fn missing_token_has_synthetic_index_and_text() {
        let t = OwningToken::missing(7, "ID", TOKEN_DEFAULT_CHANNEL, 3, 1, 2);
        assert_eq!(t.get_token_index(), -1);
        assert_eq!(t.get_text(), "<missing ID>");
    }

    #[test]
    fn text_override_wins_over_source_text() {
        let mut t = OwningToken::new_eof(1, 0, 0);
        t.source_text = Some("ignored".into());
        t.set_text(Some("kept".into()));
        assert_eq!(t.get_text(), "kept");
    }
}
