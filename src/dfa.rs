//! Lazily-seeded lookahead cache keyed per decision (spec §2 "DFA"
//! glossary entry; §5 "the DFA cache ... held by an ATN simulator").

use std::collections::HashMap;

use crate::atn_config_set::ATNConfigSet;

#[derive(Debug)]
pub struct DFAState {
    pub state_number: usize,
    pub configs: ATNConfigSet,
    pub is_accept_state: bool,
    pub prediction: isize,
    pub edges: HashMap<isize, usize>,
}

impl DFAState {
    pub fn new(state_number: usize, configs: ATNConfigSet) -> Self {
        DFAState {
            state_number,
            configs,
            is_accept_state: false,
            prediction: crate::atn::INVALID_ALT_NUMBER,
            edges: HashMap::new(),
        }
    }
}

/// One DFA per decision. `states` grows lazily as prediction explores new
/// lookahead sequences; it is never reset except by `ATNSimulator::reset`.
#[derive(Debug, Default)]
pub struct DFA {
    pub decision: usize,
    pub states: Vec<DFAState>,
    pub s0: Option<usize>,
}

impl DFA {
    pub fn new(decision: usize) -> Self {
        DFA { decision, states: Vec::new(), s0: None }
    }

    pub fn add_state(&mut self, state: DFAState) -> usize {
        let n = self.states.len();
        self.states.push(state);
        n
    }
}
