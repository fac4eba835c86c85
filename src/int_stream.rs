//! Uniform pull interface over a stream of signed integer symbols.
//!
//! `IntStream` is the root abstraction every symbol source in this crate
//! implements: raw character sources, the lexer's code-point view, and the
//! parser's token view all expose the same mark/seek/lookahead contract.

use crate::errors::ANTLRError;

/// One-past-end sentinel returned by `IntStream::la` once the stream is
/// exhausted. Also reused as the reserved `Token` type for end-of-file.
pub const EOF: isize = -1;

/// A pull-based stream of signed integer symbols with bounded-nesting marks.
///
/// Implementors: `consume` must always advance the stream by at least one
/// underlying position, and must fail rather than advance past `EOF`.
pub trait IntStream {
    /// Advances the stream by one symbol.
    ///
    /// # Errors
    /// Returns `ANTLRError::IllegalStateError` if the current symbol is
    /// already `EOF`.
    fn consume(&mut self) -> Result<(), ANTLRError>;

    /// Returns the symbol `i` positions ahead of the current position
    /// (1-based). `i < 0` looks behind; the magnitude must not exceed what
    /// has already been consumed since the closest open `mark`.
    /// Returns `EOF` for any position at or beyond the end of input.
    fn la(&mut self, i: isize) -> isize;

    /// Opens a new mark at the current position, returning a handle used by
    /// `release`. Marks nest; `seek` is only guaranteed total within the
    /// window between a live mark and the current index.
    fn mark(&mut self) -> isize;

    /// Closes the mark with the given handle. Marks must be released in the
    /// reverse order they were opened.
    fn release(&mut self, marker: isize);

    /// Current zero-based index into the underlying symbol sequence.
    fn index(&self) -> isize;

    /// Repositions the stream to absolute index `index`. May fast-forward
    /// through filtered symbols in token-level streams.
    fn seek(&mut self, index: isize);

    /// Total number of symbols, if known in advance (unbuffered/streaming
    /// sources may not know this).
    fn size(&self) -> Option<isize>;

    /// A human-readable name for diagnostics (file name, `"<unknown>"`, ...).
    fn get_source_name(&self) -> String;
}
