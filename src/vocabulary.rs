//! Token-type ↔ display-name tables (spec §3 "Token factory", §6
//! "Recognizer base ... token/rule-name tables").

use crate::token::{TOKEN_EOF, TOKEN_INVALID_TYPE};

/// Maps token type numbers to the literal/symbolic/display names a grammar
/// declares for them.
pub trait Vocabulary {
    fn max_token_type(&self) -> isize;
    fn get_literal_name(&self, token_type: isize) -> Option<&str>;
    fn get_symbolic_name(&self, token_type: isize) -> Option<&str>;

    /// Best-effort human-readable name: literal, else symbolic, else the
    /// bare integer, matching the reference runtimes' `getDisplayName`.
    fn get_display_name(&self, token_type: isize) -> String {
        if token_type == TOKEN_EOF {
            return "EOF".to_owned();
        }
        if token_type == TOKEN_INVALID_TYPE {
            return "<INVALID>".to_owned();
        }
        if let Some(lit) = self.get_literal_name(token_type) {
            return lit.to_owned();
        }
        if let Some(sym) = self.get_symbolic_name(token_type) {
            return sym.to_owned();
        }
        token_type.to_string()
    }
}

#[derive(Debug, Clone, Default)]
pub struct VocabularyImpl {
    literal_names: Vec<Option<String>>,
    symbolic_names: Vec<Option<String>>,
}

impl VocabularyImpl {
    pub fn new(literal_names: Vec<Option<String>>, symbolic_names: Vec<Option<String>>) -> Self {
        VocabularyImpl { literal_names, symbolic_names }
    }

    pub const EMPTY_VOCABULARY: VocabularyImpl = VocabularyImpl {
        literal_names: Vec::new(),
        symbolic_names: Vec::new(),
    };
}

impl Vocabulary for VocabularyImpl {
    fn max_token_type(&self) -> isize {
        self.literal_names.len().max(self.symbolic_names.len()) as isize - 1
    }

    fn get_literal_name(&self, token_type: isize) -> Option<&str> {
        if token_type < 0 {
            return None;
        }
        self.literal_names
            .get(token_type as usize)
            .and_then(|o| o.as_deref())
    }

    fn get_symbolic_name(&self, token_type: isize) -> Option<&str> {
        if token_type == TOKEN_EOF {
            return Some("EOF");
        }
        if token_type < 0 {
            return None;
        }
        self.symbolic_names
            .get(token_type as usize)
            .and_then(|o| o.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_prefers_literal() {
        let v = VocabularyImpl::new(
            vec![None, Some("'='".to_owned())],
            vec![None, Some("ASSIGN".to_owned())],
        );
        assert_eq!(v.get_display_name(1), "'='");
    }

    #[test]
    fn display_name_falls_back_to_number() {
        let v = VocabularyImpl::default();
        assert_eq!(v.get_display_name(42), "42");
    }

    #[test]
    fn eof_display_name() {
        let v = VocabularyImpl::default();
        assert_eq!(v.get_display_name(TOKEN_EOF), "EOF");
    }
}
