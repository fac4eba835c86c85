//! ATN transition kinds. Spec §4.5 fixes the serialization types an
//! interpreter driver must honor: `EPSILON, ATOM, RANGE, SET, NOT_SET,
//! WILDCARD, RULE, PREDICATE, ACTION, PRECEDENCE`.

use crate::int_stream::EOF;
use crate::interval_set::IntervalSet;

#[derive(Debug, Clone)]
pub enum Transition {
    Epsilon {
        target: usize,
    },
    Atom {
        target: usize,
        label: isize,
    },
    Range {
        target: usize,
        start: isize,
        stop: isize,
    },
    Set {
        target: usize,
        set: IntervalSet,
    },
    NotSet {
        target: usize,
        set: IntervalSet,
    },
    Wildcard {
        target: usize,
    },
    Rule {
        target: usize,
        /// Start state of the invoked rule.
        rule_start: usize,
        rule_index: usize,
        precedence: isize,
        /// State to resume at once the invoked rule returns.
        follow_state: usize,
    },
    Predicate {
        target: usize,
        rule_index: usize,
        pred_index: usize,
        is_ctx_dependent: bool,
    },
    Action {
        target: usize,
        rule_index: usize,
        action_index: isize,
        is_ctx_dependent: bool,
    },
    Precedence {
        target: usize,
        precedence: isize,
    },
}

impl Transition {
    pub fn target(&self) -> usize {
        match self {
            Transition::Epsilon { target }
            | Transition::Atom { target, .. }
            | Transition::Range { target, .. }
            | Transition::Set { target, .. }
            | Transition::NotSet { target, .. }
            | Transition::Wildcard { target }
            | Transition::Rule { target, .. }
            | Transition::Predicate { target, .. }
            | Transition::Action { target, .. }
            | Transition::Precedence { target, .. } => *target,
        }
    }

    pub fn is_epsilon(&self) -> bool {
        matches!(
            self,
            Transition::Epsilon { .. }
                | Transition::Rule { .. }
                | Transition::Predicate { .. }
                | Transition::Action { .. }
                | Transition::Precedence { .. }
        )
    }

    /// Whether this transition consumes `symbol`, restricted to the
    /// `[min_user_token_type, max_token_type]` range as spec §4.5 requires
    /// for set-valued transitions guarding `matchWildcard`.
    pub fn matches(&self, symbol: isize, min_user_token_type: isize, max_token_type: isize) -> bool {
        match self {
            Transition::Atom { label, .. } => symbol == *label,
            Transition::Range { start, stop, .. } => symbol >= *start && symbol <= *stop,
            Transition::Set { set, .. } => set.contains(symbol),
            Transition::NotSet { set, .. } => {
                symbol != EOF
                    && symbol >= min_user_token_type
                    && symbol <= max_token_type
                    && !set.contains(symbol)
            }
            Transition::Wildcard { .. } => symbol >= min_user_token_type && symbol <= max_token_type,
            _ => false,
        }
    }

    /// The set of atoms this transition can consume, when it is
    /// label-bearing; used by FOLLOW-set computation.
    pub fn label(&self) -> Option<IntervalSet> {
        match self {
            Transition::Atom { label, .. } => Some(IntervalSet::of(*label)),
            Transition::Range { start, stop, .. } => Some(IntervalSet::of_range(*start, *stop)),
            Transition::Set { set, .. } => Some(set.clone()),
            _ => None,
        }
    }
}
