//! A minimal, fully-working `LexerATNSimulator`: NFA-style maximal-munch
//! simulation over the ATN graph (epsilon-closure + one-symbol step,
//! repeated until no configuration survives), picking the longest match
//! and, on ties, the earliest-declared rule — the conventional ANTLR tie
//! break. This intentionally does not build/cache a lexer DFA; it exists
//! to give the rest of the crate (and the seed tests) a real collaborator
//! to run against behind the `LexerATNSimulator` trait (see
//! `atn_simulator.rs`).

use std::collections::HashSet;
use std::sync::Arc;

use crate::atn::ATN;
use crate::atn_simulator::{ATNSimulator, ATNSimulatorState, LexerATNSimulator};
use crate::atn_state::ATNStateType;
use crate::char_stream::CharStream;
use crate::errors::ANTLRError;
use crate::int_stream::{IntStream, EOF};
use crate::transition::Transition;

pub struct DefaultLexerATNSimulator {
    state: ATNSimulatorState,
    line: isize,
    column: isize,
    /// Token type minted when rule `i` reaches its stop state. Assigning
    /// token types from rule declaration order is the ANTLR convention;
    /// a real grammar-tool-emitted ATN would carry this mapping directly.
    pub rule_to_token_type: Vec<isize>,
}

impl DefaultLexerATNSimulator {
    pub fn new(atn: Arc<ATN>, rule_to_token_type: Vec<isize>) -> Self {
        DefaultLexerATNSimulator {
            state: ATNSimulatorState::new(atn),
            line: 1,
            column: 0,
            rule_to_token_type,
        }
    }

    fn closure(&self, atn: &ATN, seeds: &HashSet<usize>) -> HashSet<usize> {
        let mut stack: Vec<usize> = seeds.iter().copied().collect();
        let mut result = HashSet::new();
        while let Some(s) = stack.pop() {
            if !result.insert(s) {
                continue;
            }
            for t in &atn.state(s).transitions {
                if t.is_epsilon() {
                    let target = match t {
                        Transition::Rule { rule_start, .. } => *rule_start,
                        other => other.target(),
                    };
                    stack.push(target);
                }
            }
        }
        result
    }

    fn step(&self, atn: &ATN, current: &HashSet<usize>, symbol: isize) -> HashSet<usize> {
        let mut next = HashSet::new();
        for &s in current {
            for t in &atn.state(s).transitions {
                if !t.is_epsilon() && t.matches(symbol, 0, atn.max_token_type) {
                    next.insert(t.target());
                }
            }
        }
        next
    }

    fn check_accept(&self, atn: &ATN, current: &HashSet<usize>) -> Option<isize> {
        let mut best_rule: Option<usize> = None;
        for &s in current {
            let st = atn.state(s);
            if matches!(st.state_type, ATNStateType::RuleStop) {
                best_rule = Some(match best_rule {
                    Some(r) => r.min(st.rule_index),
                    None => st.rule_index,
                });
            }
        }
        best_rule.map(|r| self.rule_to_token_type.get(r).copied().unwrap_or(0))
    }
}

impl ATNSimulator for DefaultLexerATNSimulator {
    fn atn(&self) -> &Arc<ATN> {
        &self.state.atn
    }

    fn reset(&mut self) {
        self.state.reset();
        self.line = 1;
        self.column = 0;
    }
}

impl LexerATNSimulator for DefaultLexerATNSimulator {
    fn lexer_match(&mut self, input: &mut dyn CharStream, mode: usize) -> Result<isize, ANTLRError> {
        let atn = self.state.atn.clone();
        let start_state = atn.mode_to_start_state[mode];
        let start_index = input.index();
        let mut current = self.closure(&atn, &HashSet::from([start_state]));
        let mut best: Option<(isize, isize)> = None; // (token_type, inclusive stop index)

        loop {
            if let Some(ttype) = self.check_accept(&atn, &current) {
                best = Some((ttype, input.index() - 1));
            }
            let c = input.la(1);
            if c == EOF {
                break;
            }
            let next = self.step(&atn, &current, c);
            if next.is_empty() {
                break;
            }
            input.consume()?;
            self.column += 1;
            current = self.closure(&atn, &next);
        }

        match best {
            Some((ttype, stop)) => {
                input.seek(stop + 1);
                Ok(ttype)
            }
            None => {
                input.seek(start_index);
                let bad_text = if input.la(1) == EOF {
                    String::new()
                } else {
                    let c = input.la(1);
                    char::from_u32(c as u32).map(|c| c.to_string()).unwrap_or_default()
                };
                Err(ANTLRError::LexerNoViableAlt { start_index, bad_text })
            }
        }
    }

    fn consume(&mut self, input: &mut dyn CharStream) {
        if input.la(1) == ('\n' as isize) {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        let _ = input.consume();
    }

    fn line(&self) -> isize {
        self.line
    }

    fn char_position_in_line(&self) -> isize {
        self.column
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atn::GrammarType;
    use crate::atn_state::ATNState;
    use crate::char_stream::InputStream;

    /// Builds a tiny lexer ATN recognizing the literal `"x"` as rule 0.
    fn build_x_atn() -> Arc<ATN> {
        let mut atn = ATN::new(GrammarType::Lexer, 127);
        let mode_start = atn.add_state(ATNState::new(0, usize::MAX, ATNStateType::TokenStart));
        let rule_start = atn.add_state(ATNState::new(0, 0, ATNStateType::RuleStart));
        let rule_stop = atn.add_state(ATNState::new(0, 0, ATNStateType::RuleStop));
        atn.state_mut(mode_start)
            .add_transition(Transition::Epsilon { target: rule_start });
        atn.state_mut(rule_start).add_transition(Transition::Atom {
            target: rule_stop,
            label: 'x' as isize,
        });
        atn.rule_to_start_state = vec![rule_start];
        atn.rule_to_stop_state = vec![rule_stop];
        atn.mode_to_start_state = vec![mode_start];
        Arc::new(atn)
    }

    #[test]
    fn matches_single_literal_token() {
        let atn = build_x_atn();
        let mut sim = DefaultLexerATNSimulator::new(atn, vec![1]);
        let mut input = InputStream::new("x");
        let ttype = sim.lexer_match(&mut input, 0).unwrap();
        assert_eq!(ttype, 1);
        assert_eq!(input.index(), 1);
    }

    #[test]
    fn no_viable_alt_on_mismatch() {
        let atn = build_x_atn();
        let mut sim = DefaultLexerATNSimulator::new(atn, vec![1]);
        let mut input = InputStream::new("y");
        let err = sim.lexer_match(&mut input, 0);
        assert!(matches!(err, Err(ANTLRError::LexerNoViableAlt { .. })));
    }
}
