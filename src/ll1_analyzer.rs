//! Thin façade over `ATN::next_tokens`/`next_tokens_in_same_rule`, named
//! after the reference runtimes' `LL1Analyzer` (SPEC_FULL.md supplemental
//! features: the prediction-context/FOLLOW-set analysis both the ATN
//! simulator and the default error strategy lean on).

use crate::atn::ATN;
use crate::atn_simulator::CallStack;
use crate::interval_set::IntervalSet;
use crate::token::TOKEN_EPSILON;

pub struct Ll1Analyzer<'a> {
    atn: &'a ATN,
}

impl<'a> Ll1Analyzer<'a> {
    pub fn new(atn: &'a ATN) -> Self {
        Ll1Analyzer { atn }
    }

    /// FOLLOW(state) restricted to the rule that owns it; the ε sentinel
    /// marks "this rule's stop state was reached" (spec §4.2).
    pub fn look_same_rule(&self, state: usize) -> IntervalSet {
        self.atn.next_tokens_in_same_rule(state)
    }

    /// FOLLOW(state), resolved across rule boundaries via `call_stack`
    /// (innermost invoking state first), with EOF substituted once the
    /// outermost rule's stop state is reached with no further caller.
    pub fn look(&self, state: usize, call_stack: &CallStack) -> IntervalSet {
        self.atn.next_tokens(state, call_stack)
    }

    pub fn contains_epsilon_sentinel(set: &IntervalSet) -> bool {
        set.contains(TOKEN_EPSILON)
    }
}
