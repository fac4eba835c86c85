//! Token provider contract (spec §6 "Token provider").

use crate::errors::ANTLRError;
use crate::token::OwningToken;
use crate::token_factory::TokenFactory;

/// Anything that can hand out a stream of tokens one at a time. Implemented
/// by `Lexer`; consumed by `BufferedTokenStream`.
pub trait TokenSource {
    fn next_token(&mut self) -> Result<OwningToken, ANTLRError>;
    fn get_line(&self) -> isize;
    fn get_char_position_in_line(&self) -> isize;
    fn get_source_name(&self) -> String;
    fn get_token_factory(&self) -> &dyn TokenFactory;
}
