//! The wire format a grammar tool emits is an external collaborator's
//! contract (spec §6: "Persisted state: none. ATN is deserialized from a
//! grammar-tool-emitted byte string; the format is an external
//! collaborator's contract."). This module therefore does not attempt to
//! reproduce that binary format; instead it gives generated-parser-style
//! code (and this crate's own tests) a constructive builder for the
//! handful of ATN shapes a real grammar tool would otherwise emit.

use crate::atn::{GrammarType, ATN};
use crate::atn_state::{ATNState, ATNStateType};
use crate::transition::Transition;

/// Incrementally builds an `ATN`, tracking state numbers for the caller so
/// call sites read close to how a grammar rule is structured (start state,
/// body transitions, stop state).
pub struct ATNBuilder {
    atn: ATN,
}

impl ATNBuilder {
    pub fn new(grammar_type: GrammarType, max_token_type: isize) -> Self {
        ATNBuilder { atn: ATN::new(grammar_type, max_token_type) }
    }

    pub fn add_state(&mut self, rule_index: usize, state_type: ATNStateType) -> usize {
        self.atn.add_state(ATNState::new(0, rule_index, state_type))
    }

    pub fn add_transition(&mut self, from: usize, transition: Transition) {
        self.atn.state_mut(from).add_transition(transition);
    }

    pub fn set_decision(&mut self, state: usize) -> usize {
        let decision = self.atn.decision_to_state.len();
        self.atn.decision_to_state.push(state);
        self.atn.state_mut(state).decision = Some(decision);
        decision
    }

    /// Declares a new rule, returning its `(start, stop)` state numbers.
    /// `rule_index` must equal `rule_to_start_state.len()` at call time,
    /// i.e. rules must be declared in index order — the same order a
    /// grammar tool assigns rule indices.
    pub fn add_rule(&mut self, rule_index: usize) -> (usize, usize) {
        assert_eq!(rule_index, self.atn.rule_to_start_state.len());
        let start = self.add_state(rule_index, ATNStateType::RuleStart);
        let stop = self.add_state(rule_index, ATNStateType::RuleStop);
        self.atn.rule_to_start_state.push(start);
        self.atn.rule_to_stop_state.push(stop);
        (start, stop)
    }

    pub fn add_mode(&mut self, start_state: usize) {
        self.atn.mode_to_start_state.push(start_state);
    }

    pub fn build(self) -> ATN {
        self.atn
    }
}
