//! Prediction-context graph: hash-consed parent-pointer chains recording
//! "what rule-invocation state(s) should I return to" (spec §3 "ATN
//! configuration set", §9 "the ATN config set's merged-context graph must
//! tolerate sharing; use hash-consing keyed by structural identity").

use std::rc::Rc;

use crate::atn_state::INVALID_STATE_NUMBER;

/// `EMPTY_RETURN_STATE` marks "the bottom of the stack" — a config whose
/// context is exhausted, i.e. prediction that has returned to the
/// outermost (start) rule.
pub const EMPTY_RETURN_STATE: usize = INVALID_STATE_NUMBER;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PredictionContext {
    /// The empty/root context.
    Empty,
    /// A single parent with one return state, the overwhelmingly common
    /// case for non-ambiguous call sites.
    Singleton {
        parent: Option<Rc<PredictionContext>>,
        return_state: usize,
    },
    /// Multiple parents/return-states, produced when merging contexts from
    /// different call sites that reach the same ATN state (left-recursive
    /// rules and rule sharing across alternatives).
    Array {
        parents: Vec<Option<Rc<PredictionContext>>>,
        return_states: Vec<usize>,
    },
}

impl PredictionContext {
    pub fn empty() -> Rc<PredictionContext> {
        thread_local! {
            static EMPTY: Rc<PredictionContext> = Rc::new(PredictionContext::Empty);
        }
        EMPTY.with(|e| e.clone())
    }

    pub fn singleton(parent: Option<Rc<PredictionContext>>, return_state: usize) -> Rc<PredictionContext> {
        Rc::new(PredictionContext::Singleton { parent, return_state })
    }

    /// Merges two contexts into one that represents "either of these call
    /// histories", deduplicating identical `(parent, return_state)` pairs.
    /// This is the hash-consing "merge" idiom spec §9 points at; full
    /// conflict-set minimization across `Array` variants is left to the
    /// ATN simulator collaborator, which is the only caller that needs it
    /// at scale.
    pub fn merge(a: &Rc<PredictionContext>, b: &Rc<PredictionContext>) -> Rc<PredictionContext> {
        if Rc::ptr_eq(a, b) {
            return a.clone();
        }
        let mut parents = Vec::new();
        let mut return_states = Vec::new();
        for ctx in [a, b] {
            match ctx.as_ref() {
                PredictionContext::Empty => {
                    parents.push(None);
                    return_states.push(EMPTY_RETURN_STATE);
                }
                PredictionContext::Singleton { parent, return_state } => {
                    parents.push(parent.clone());
                    return_states.push(*return_state);
                }
                PredictionContext::Array { parents: p, return_states: r } => {
                    parents.extend(p.iter().cloned());
                    return_states.extend(r.iter().copied());
                }
            }
        }
        let mut seen = std::collections::HashSet::new();
        let mut dedup_parents = Vec::new();
        let mut dedup_states = Vec::new();
        for (p, r) in parents.into_iter().zip(return_states) {
            let key = (p.as_ref().map(|rc| Rc::as_ptr(rc) as usize), r);
            if seen.insert(key) {
                dedup_parents.push(p);
                dedup_states.push(r);
            }
        }
        if dedup_states.len() == 1 {
            return PredictionContext::singleton(dedup_parents.into_iter().next().unwrap(), dedup_states[0]);
        }
        Rc::new(PredictionContext::Array { parents: dedup_parents, return_states: dedup_states })
    }

    pub fn return_states(&self) -> Vec<usize> {
        match self {
            PredictionContext::Empty => vec![EMPTY_RETURN_STATE],
            PredictionContext::Singleton { return_state, .. } => vec![*return_state],
            PredictionContext::Array { return_states, .. } => return_states.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_identical_contexts_is_idempotent() {
        let a = PredictionContext::singleton(None, 5);
        let merged = PredictionContext::merge(&a, &a);
        assert_eq!(merged.return_states(), vec![5]);
    }

    #[test]
    fn merge_distinct_contexts_unions_return_states() {
        let a = PredictionContext::singleton(None, 5);
        let b = PredictionContext::singleton(None, 9);
        let merged = PredictionContext::merge(&a, &b);
        let mut states = merged.return_states();
        states.sort();
        assert_eq!(states, vec![5, 9]);
    }
}
