//! The channel-filtering subclass of `BufferedTokenStream` (spec §4.1
//! "Filtered subclass (channel filter)"): the parser's actual view of the
//! token buffer, which differs from the raw buffer only in
//! `adjust_seek_index`, `lt`, and `lookBack` (spec §9 "model by
//! composition (filter holds a buffer and overrides only those hooks)").

use std::rc::Rc;

use crate::errors::ANTLRError;
use crate::int_stream::{IntStream, EOF};
use crate::interval_set::Interval;
use crate::token::{OwningToken, Token, TOKEN_EOF};
use crate::token_source::TokenSource;
use crate::token_stream::{BufferedTokenStream, TokenStream};

pub struct CommonTokenStream {
    buffer: BufferedTokenStream,
    channel: isize,
}

impl CommonTokenStream {
    pub fn new(source: Box<dyn TokenSource>) -> Self {
        CommonTokenStream {
            buffer: BufferedTokenStream::new(source),
            channel: crate::token::TOKEN_DEFAULT_CHANNEL,
        }
    }

    pub fn new_on_channel(source: Box<dyn TokenSource>, channel: isize) -> Self {
        CommonTokenStream { buffer: BufferedTokenStream::new(source), channel }
    }

    /// Skips forward from `i` to the next token on the tuned channel,
    /// fetching more input if the buffer runs out before finding one.
    fn next_token_on_channel(&mut self, mut i: isize) -> isize {
        self.buffer.fill();
        loop {
            if i < 0 || i as usize >= self.buffer.size() {
                return self.buffer.size() as isize - 1;
            }
            let tok = self.buffer.get(i as usize);
            if tok.get_channel() == self.channel || tok.get_token_type() == TOKEN_EOF {
                return i;
            }
            i += 1;
        }
    }

    fn previous_token_on_channel(&mut self, mut i: isize) -> isize {
        while i >= 0 {
            let tok = self.buffer.get(i as usize);
            if tok.get_channel() == self.channel {
                return i;
            }
            i -= 1;
        }
        i
    }

    /// Counts on-channel tokens up to and including index `i`; EOF counts
    /// at most once (spec §4.1 `numberOfOnChannelTokens`).
    pub fn number_of_on_channel_tokens(&mut self) -> usize {
        self.buffer.fill();
        let mut n = 0;
        let mut counted_eof = false;
        for idx in 0..self.buffer.size() {
            let tok = self.buffer.get(idx);
            if tok.get_token_type() == TOKEN_EOF {
                if !counted_eof {
                    n += 1;
                    counted_eof = true;
                }
                break;
            }
            if tok.get_channel() == self.channel {
                n += 1;
            }
        }
        n
    }

    pub fn get_hidden_tokens_to_right(&mut self, i: usize, channel: isize) -> Option<Vec<Rc<OwningToken>>> {
        self.buffer.get_hidden_tokens_to_right(i, channel)
    }

    pub fn get_hidden_tokens_to_left(&mut self, i: usize, channel: isize) -> Option<Vec<Rc<OwningToken>>> {
        self.buffer.get_hidden_tokens_to_left(i, channel)
    }

    pub fn get_tokens(&mut self, from: isize, to: isize, types: Option<&[isize]>) -> Option<Vec<Rc<OwningToken>>> {
        self.buffer.get_tokens(from, to, types)
    }

    pub fn fill(&mut self) {
        self.buffer.fill();
    }
}

impl IntStream for CommonTokenStream {
    /// Overrides the base `consume`: `BufferedTokenStream::consume` only
    /// ever runs the identity `adjust_seek_index` (there is no virtual
    /// dispatch into this composed-over filter), so the channel skip has
    /// to be re-applied here or the cursor can land on a hidden token.
    fn consume(&mut self) -> Result<(), ANTLRError> {
        self.buffer.consume()?;
        let next = self.next_token_on_channel(self.buffer.index());
        self.buffer.seek(next);
        Ok(())
    }

    fn la(&mut self, i: isize) -> isize {
        self.lt(i).map(|t| t.get_token_type()).unwrap_or(EOF)
    }

    fn mark(&mut self) -> isize {
        self.buffer.mark()
    }

    fn release(&mut self, marker: isize) {
        self.buffer.release(marker)
    }

    fn index(&self) -> isize {
        self.buffer.index()
    }

    fn seek(&mut self, index: isize) {
        self.buffer.seek(index);
    }

    fn size(&self) -> Option<isize> {
        IntStream::size(&self.buffer)
    }

    fn get_source_name(&self) -> String {
        IntStream::get_source_name(&self.buffer)
    }
}

impl TokenStream for CommonTokenStream {
    fn get(&self, i: usize) -> Rc<OwningToken> {
        self.buffer.get(i)
    }

    /// Overrides the base `lookToken`: counts only on-channel tokens while
    /// walking the buffer (spec §4.1).
    fn lt(&mut self, k: isize) -> Option<Rc<OwningToken>> {
        self.buffer.ensure_initialized();
        if k == 0 {
            return None;
        }
        if k < 0 {
            return self.lb(-k);
        }
        let mut i = self.buffer.index();
        let mut n = 1;
        while n < k {
            i = self.next_token_on_channel(i + 1);
            n += 1;
        }
        let i = i.max(0) as usize;
        if i >= self.buffer.size() {
            return self.buffer.get_eof();
        }
        Some(self.buffer.get(i))
    }

    fn get_token_source(&self) -> &dyn TokenSource {
        self.buffer.get_token_source()
    }

    fn get_text_range(&mut self, interval: Interval) -> String {
        self.buffer.get_text_range(interval)
    }

    fn get_all_text(&mut self) -> String {
        self.buffer.get_all_text()
    }
}

impl CommonTokenStream {
    fn lb(&mut self, k: isize) -> Option<Rc<OwningToken>> {
        if k == 0 || self.buffer.index() - k < 0 {
            return None;
        }
        let mut i = self.buffer.index();
        let mut n = 1;
        while n <= k && i > 0 {
            i = self.previous_token_on_channel(i - 1);
            n += 1;
        }
        if i < 0 {
            None
        } else {
            Some(self.buffer.get(i as usize))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{OwningToken, TOKEN_DEFAULT_CHANNEL};
    use crate::token_factory::{CommonTokenFactory, TokenFactory};

    struct VecTokenSource {
        tokens: Vec<OwningToken>,
        next: usize,
        factory: CommonTokenFactory,
    }

    impl TokenSource for VecTokenSource {
        fn next_token(&mut self) -> Result<OwningToken, ANTLRError> {
            if self.next < self.tokens.len() {
                let t = self.tokens[self.next].clone();
                self.next += 1;
                Ok(t)
            } else {
                Ok(OwningToken::new_eof(1, 0, self.tokens.len() as isize))
            }
        }
        fn get_line(&self) -> isize {
            1
        }
        fn get_char_position_in_line(&self) -> isize {
            0
        }
        fn get_source_name(&self) -> String {
            "<test>".to_owned()
        }
        fn get_token_factory(&self) -> &dyn TokenFactory {
            &self.factory
        }
    }

    fn tok(ttype: isize, channel: isize, idx: isize, text: &str) -> OwningToken {
        OwningToken {
            token_type: ttype,
            channel,
            start: 0,
            stop: 0,
            line: 1,
            column: 0,
            token_index: idx,
            text_override: Some(text.to_owned()),
            source_text: None,
            source_name: "<test>".to_owned(),
        }
    }

    #[test]
    fn channel_filter_skips_hidden_tokens() {
        let tokens = vec![
            tok(1, TOKEN_DEFAULT_CHANNEL, 0, "x"),
            tok(99, 1, 1, " "),
            tok(2, TOKEN_DEFAULT_CHANNEL, 2, "="),
        ];
        let mut cts = CommonTokenStream::new(Box::new(VecTokenSource {
            tokens,
            next: 0,
            factory: CommonTokenFactory::new(),
        }));
        assert_eq!(cts.la(1), 1);
        cts.consume().unwrap();
        assert_eq!(cts.la(1), 2);
    }
}
