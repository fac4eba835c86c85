//! The ATN graph itself (spec §3 "ATN configuration set", §4.5).
//!
//! Building, caching and walking the *deep* prediction algorithm (closure,
//! reach, SLL→LL fallback, DFA-state caching across calls) is the ATN
//! simulator's job and stays behind the `LexerATNSimulator`/
//! `ParserATNSimulator` collaborator traits (see `atn_simulator.rs`). What
//! lives here is the graph data structure plus the bounded, in-scope
//! traversal spec §4.2/§4.4 name directly: `nextTokensInSameRule` (FOLLOW
//! within the current rule, used by `isExpectedToken` and `sync`).

use std::collections::HashSet;

use crate::atn_state::{ATNState, ATNStateType, INVALID_STATE_NUMBER};
use crate::interval_set::IntervalSet;
use crate::token::TOKEN_EPSILON;
use crate::transition::Transition;

pub const INVALID_ALT_NUMBER: isize = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrammarType {
    Lexer,
    Parser,
}

#[derive(Debug, Clone)]
pub struct ATN {
    pub grammar_type: GrammarType,
    pub max_token_type: isize,
    pub states: Vec<ATNState>,
    pub rule_to_start_state: Vec<usize>,
    pub rule_to_stop_state: Vec<usize>,
    /// State number for each decision, indexed by decision number.
    pub decision_to_state: Vec<usize>,
    /// Lexer mode start states, indexed by mode number.
    pub mode_to_start_state: Vec<usize>,
}

impl ATN {
    pub fn new(grammar_type: GrammarType, max_token_type: isize) -> Self {
        ATN {
            grammar_type,
            max_token_type,
            states: Vec::new(),
            rule_to_start_state: Vec::new(),
            rule_to_stop_state: Vec::new(),
            decision_to_state: Vec::new(),
            mode_to_start_state: Vec::new(),
        }
    }

    pub fn state(&self, n: usize) -> &ATNState {
        &self.states[n]
    }

    pub fn state_mut(&mut self, n: usize) -> &mut ATNState {
        &mut self.states[n]
    }

    pub fn add_state(&mut self, mut state: ATNState) -> usize {
        let n = self.states.len();
        state.state_number = n;
        self.states.push(state);
        n
    }

    /// `nextTokensInSameRule` from spec §4.2/§4.4: the set of atoms that can
    /// legally appear at `state` without needing to look outside the rule
    /// that owns `state`. Recurses through `RULE` transitions into callees
    /// (their grammar-level FOLLOW genuinely is "what comes next here"),
    /// but treats reaching the owning rule's stop state as the boundary —
    /// recorded by including `TOKEN_EPSILON` as a sentinel, exactly as
    /// `isExpectedToken`'s contract describes ("until ... no longer
    /// contains the ε sentinel").
    pub fn next_tokens_in_same_rule(&self, state: usize) -> IntervalSet {
        let owning_rule = self.states[state].rule_index;
        let mut visited = HashSet::new();
        self.closure_follow(state, owning_rule, &mut visited)
    }

    fn closure_follow(&self, state: usize, owning_rule: usize, visited: &mut HashSet<usize>) -> IntervalSet {
        let mut set = IntervalSet::new();
        if !visited.insert(state) {
            return set;
        }
        let s = &self.states[state];
        if matches!(s.state_type, ATNStateType::RuleStop) {
            if s.rule_index == owning_rule {
                set.add_one(TOKEN_EPSILON);
            }
            return set;
        }
        for t in &s.transitions {
            match t {
                Transition::Rule { rule_start, follow_state, .. } => {
                    let sub = self.closure_follow(*rule_start, owning_rule, visited);
                    if sub.contains(TOKEN_EPSILON) {
                        let mut without_eps = sub.clone();
                        // continuing past the called rule: fold in its
                        // caller-side follow state instead of the epsilon
                        // sentinel, since the call itself is not a rule
                        // boundary for `owning_rule`.
                        without_eps.add_set(&self.closure_follow(*follow_state, owning_rule, visited));
                        set.add_set(&without_eps);
                    } else {
                        set.add_set(&sub);
                    }
                }
                _ if t.is_epsilon() => {
                    set.add_set(&self.closure_follow(t.target(), owning_rule, visited));
                }
                _ => {
                    if let Some(label) = t.label() {
                        set.add_set(&label);
                    }
                }
            }
        }
        set
    }

    /// Full FOLLOW at `state`, crossing out of `owning_rule` by walking the
    /// caller's invocation chain when the local computation bottoms out at
    /// the rule's stop state. `invoking_states` is the chain of ATN states
    /// that called into each enclosing rule, innermost first — exactly the
    /// rule-context parent chain `Parser::is_expected_token` walks.
    pub fn next_tokens(&self, state: usize, invoking_states: &[usize]) -> IntervalSet {
        let mut set = self.next_tokens_in_same_rule(state);
        if !set.contains(TOKEN_EPSILON) {
            return set;
        }
        set = set.subtract(&IntervalSet::of(TOKEN_EPSILON));
        if let Some((&invoking, rest)) = invoking_states.split_first() {
            if invoking != INVALID_STATE_NUMBER {
                // resume just past the call site in the caller.
                let follow_state = self.states[invoking].transitions.iter().find_map(|t| {
                    if let Transition::Rule { follow_state, .. } = t {
                        Some(*follow_state)
                    } else {
                        None
                    }
                });
                if let Some(fs) = follow_state {
                    set.add_set(&self.next_tokens(fs, rest));
                    return set;
                }
            }
        }
        // no enclosing rule: end of input is legal here.
        set.add_one(crate::token::TOKEN_EOF);
        set
    }
}
