//! The buffered token source pipeline (spec §4.1): a tokens-by-index view
//! over a lazily-pumped lexer.

use std::rc::Rc;

use crate::errors::ANTLRError;
use crate::int_stream::{IntStream, EOF};
use crate::interval_set::Interval;
use crate::token::{OwningToken, Token, TOKEN_DEFAULT_CHANNEL, TOKEN_EOF};
use crate::token_source::TokenSource;

const FILL_BLOCK_SIZE: usize = 1000;

pub trait TokenStream: IntStream {
    fn get(&self, i: usize) -> Rc<OwningToken>;
    /// `lookToken(k)` from spec §4.1: `k>0` fetches forward as needed,
    /// `k<0` returns previously-seen tokens, `k=0` is undefined (`None`).
    fn lt(&mut self, k: isize) -> Option<Rc<OwningToken>>;
    fn get_token_source(&self) -> &dyn TokenSource;
    fn get_text_range(&mut self, interval: Interval) -> String;
    fn get_all_text(&mut self) -> String;
}

/// `Uninitialized(-1) -> Normal -> Terminal`, per spec §4.1's state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BufferState {
    Uninitialized,
    Normal,
    Terminal,
}

pub struct BufferedTokenStream {
    source: Box<dyn TokenSource>,
    tokens: Vec<Rc<OwningToken>>,
    p: isize,
    fetched_eof: bool,
    marks: Vec<isize>,
}

impl BufferedTokenStream {
    pub fn new(source: Box<dyn TokenSource>) -> Self {
        BufferedTokenStream {
            source,
            tokens: Vec::new(),
            p: -1,
            fetched_eof: false,
            marks: Vec::new(),
        }
    }

    fn state(&self) -> BufferState {
        if self.p == -1 {
            BufferState::Uninitialized
        } else if self.fetched_eof && self.p as usize == self.tokens.len() - 1 {
            BufferState::Terminal
        } else {
            BufferState::Normal
        }
    }

    fn lazy_init(&mut self) {
        if self.p == -1 {
            self.setup_initial_buffer();
        }
    }

    /// Exposed for composing wrappers (e.g. `CommonTokenStream`) that need
    /// the buffer initialized before applying their own channel-aware
    /// lookahead logic.
    pub(crate) fn ensure_initialized(&mut self) {
        self.lazy_init();
    }

    /// The buffer's EOF token, if it has been fetched.
    pub(crate) fn get_eof(&self) -> Option<Rc<OwningToken>> {
        if self.fetched_eof {
            self.tokens.last().cloned()
        } else {
            None
        }
    }

    fn setup_initial_buffer(&mut self) {
        self.fetch(1);
        self.p = self.adjust_seek_index(0);
    }

    /// Pulls up to `n` tokens from the source; returns the number actually
    /// fetched (fewer than `n` signals EOF was reached).
    fn fetch(&mut self, n: usize) -> usize {
        if self.fetched_eof {
            return 0;
        }
        let mut fetched = 0;
        for _ in 0..n {
            match self.source.next_token() {
                Ok(mut tok) => {
                    let idx = self.tokens.len() as isize;
                    if tok.get_token_index() < 0 {
                        tok.token_index = idx;
                    }
                    let is_eof = tok.get_token_type() == TOKEN_EOF;
                    self.tokens.push(Rc::new(tok));
                    fetched += 1;
                    if is_eof {
                        self.fetched_eof = true;
                        break;
                    }
                }
                Err(_) => break,
            }
        }
        fetched
    }

    /// Base-class hook the channel filter overrides; the unfiltered buffer
    /// treats every token as "on channel".
    fn adjust_seek_index(&self, i: isize) -> isize {
        i
    }

    pub fn fill(&mut self) {
        self.lazy_init();
        loop {
            let n = self.fetch(FILL_BLOCK_SIZE);
            if n < FILL_BLOCK_SIZE {
                break;
            }
        }
    }

    pub fn size(&self) -> usize {
        self.tokens.len()
    }

    pub fn get_tokens(
        &mut self,
        from: isize,
        to: isize,
        types: Option<&[isize]>,
    ) -> Option<Vec<Rc<OwningToken>>> {
        self.lazy_init();
        if from < 0 || to < 0 {
            return None;
        }
        self.fill();
        let to = to.min(self.tokens.len() as isize - 1);
        if from > to {
            return None;
        }
        let mut out = Vec::new();
        for i in from..=to {
            let tok = &self.tokens[i as usize];
            if types.map_or(true, |ts| ts.contains(&tok.get_token_type())) {
                out.push(tok.clone());
            }
        }
        if out.is_empty() {
            None
        } else {
            Some(out)
        }
    }

    pub fn get_hidden_tokens_to_right(&mut self, i: usize, channel: isize) -> Option<Vec<Rc<OwningToken>>> {
        self.lazy_init();
        self.fill();
        if i >= self.tokens.len() {
            return None;
        }
        let mut out = Vec::new();
        for tok in &self.tokens[i + 1..] {
            if tok.get_channel() == TOKEN_DEFAULT_CHANNEL || tok.get_token_type() == TOKEN_EOF {
                break;
            }
            if channel == -1 || tok.get_channel() == channel {
                out.push(tok.clone());
            }
        }
        if out.is_empty() {
            None
        } else {
            Some(out)
        }
    }

    pub fn get_hidden_tokens_to_left(&mut self, i: usize, channel: isize) -> Option<Vec<Rc<OwningToken>>> {
        self.lazy_init();
        self.fill();
        if i == 0 || i > self.tokens.len() {
            return None;
        }
        let mut out = Vec::new();
        let mut j = i;
        while j > 0 {
            j -= 1;
            let tok = &self.tokens[j];
            if tok.get_channel() == TOKEN_DEFAULT_CHANNEL {
                break;
            }
            if channel == -1 || tok.get_channel() == channel {
                out.push(tok.clone());
            }
        }
        out.reverse();
        if out.is_empty() {
            None
        } else {
            Some(out)
        }
    }
}

impl IntStream for BufferedTokenStream {
    fn consume(&mut self) -> Result<(), ANTLRError> {
        self.lazy_init();
        let at_eof = self.p >= 0
            && (self.p as usize) < self.tokens.len()
            && self.tokens[self.p as usize].get_token_type() == TOKEN_EOF;
        if at_eof {
            return Err(ANTLRError::IllegalStateError(
                "cannot consume EOF".to_owned(),
            ));
        }
        if (self.p as usize) + 1 >= self.tokens.len() {
            self.fetch(1);
        }
        self.p = self.adjust_seek_index(self.p + 1);
        Ok(())
    }

    fn la(&mut self, i: isize) -> isize {
        self.lt(i).map(|t| t.get_token_type()).unwrap_or(EOF)
    }

    fn mark(&mut self) -> isize {
        self.marks.push(self.p);
        -(self.marks.len() as isize)
    }

    fn release(&mut self, marker: isize) {
        let expected = -(self.marks.len() as isize);
        assert_eq!(marker, expected, "marks must be released in reverse order");
        self.marks.pop();
    }

    fn index(&self) -> isize {
        self.p
    }

    fn seek(&mut self, index: isize) {
        self.lazy_init();
        self.p = self.adjust_seek_index(index);
    }

    fn size(&self) -> Option<isize> {
        Some(self.tokens.len() as isize)
    }

    fn get_source_name(&self) -> String {
        self.source.get_source_name()
    }
}

impl TokenStream for BufferedTokenStream {
    fn get(&self, i: usize) -> Rc<OwningToken> {
        self.tokens[i].clone()
    }

    fn lt(&mut self, k: isize) -> Option<Rc<OwningToken>> {
        self.lazy_init();
        if k == 0 {
            return None;
        }
        if k < 0 {
            let idx = self.p + k;
            return if idx >= 0 {
                Some(self.tokens[idx as usize].clone())
            } else {
                None
            };
        }
        let target = self.p + k - 1; // 0-based index of the token k positions ahead
        while target as usize >= self.tokens.len() && !self.fetched_eof {
            self.fetch(FILL_BLOCK_SIZE);
        }
        let idx = (target as usize).min(self.tokens.len() - 1);
        Some(self.tokens[idx].clone())
    }

    fn get_token_source(&self) -> &dyn TokenSource {
        self.source.as_ref()
    }

    fn get_text_range(&mut self, interval: Interval) -> String {
        self.fill();
        let a = interval.a.max(0) as usize;
        let b = (interval.b as usize).min(self.tokens.len().saturating_sub(1));
        let mut s = String::new();
        for i in a..=b {
            s.push_str(&self.tokens[i].get_text());
        }
        s
    }

    fn get_all_text(&mut self) -> String {
        self.fill();
        let len = self.tokens.len();
        if len == 0 {
            return String::new();
        }
        self.get_text_range(Interval::new(0, len as isize - 1))
    }
}
