//! ATN state kinds (spec §4.5 lists the exact set a parser interpreter must
//! dispatch on: `BLOCK_START | STAR_BLOCK_START | PLUS_BLOCK_START |
//! STAR_LOOP_ENTRY`, `PLUS_LOOP_BACK | STAR_LOOP_BACK`, and plain states).

use crate::transition::Transition;

pub const INVALID_STATE_NUMBER: usize = usize::MAX;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ATNStateType {
    Basic,
    RuleStart,
    RuleStop,
    TokenStart,
    BlockStart { end_state: usize },
    BlockEnd { start_state: usize },
    PlusBlockStart { loop_back_state: usize },
    StarBlockStart,
    PlusLoopBack,
    StarLoopBack,
    StarLoopEntry {
        loop_back_state: usize,
        /// Set by the interpreter driver (spec §4.5: "identifies
        /// `StarLoopEntryState.precedenceRuleDecision` states eagerly").
        precedence_rule_decision: bool,
    },
    LoopEnd { loop_back_state: usize },
}

impl ATNStateType {
    /// `BLOCK_START | STAR_BLOCK_START | PLUS_BLOCK_START |
    /// STAR_LOOP_ENTRY` — sync()'s first recovery family (spec §4.4).
    pub fn is_block_start_family(&self) -> bool {
        matches!(
            self,
            ATNStateType::BlockStart { .. }
                | ATNStateType::StarBlockStart
                | ATNStateType::PlusBlockStart { .. }
                | ATNStateType::StarLoopEntry { .. }
        )
    }

    /// `PLUS_LOOP_BACK | STAR_LOOP_BACK` — sync()'s second recovery family.
    pub fn is_loop_back_family(&self) -> bool {
        matches!(self, ATNStateType::PlusLoopBack | ATNStateType::StarLoopBack)
    }
}

#[derive(Debug, Clone)]
pub struct ATNState {
    pub state_number: usize,
    pub rule_index: usize,
    pub state_type: ATNStateType,
    pub transitions: Vec<Transition>,
    /// `Some(n)` if this is a decision state (prediction is invoked here);
    /// `n` indexes `ATN::decision_to_state`.
    pub decision: Option<usize>,
}

impl ATNState {
    pub fn new(state_number: usize, rule_index: usize, state_type: ATNStateType) -> Self {
        ATNState {
            state_number,
            rule_index,
            state_type,
            transitions: Vec::new(),
            decision: None,
        }
    }

    pub fn add_transition(&mut self, t: Transition) {
        self.transitions.push(t);
    }

    pub fn only_has_epsilon_transitions(&self) -> bool {
        self.transitions.iter().all(|t| t.is_epsilon())
    }
}
