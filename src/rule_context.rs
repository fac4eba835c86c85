//! Rule-invocation tree node (spec §3 "Rule context").

use std::rc::{Rc, Weak};

use crate::interval_set::{Interval, INVALID};
use crate::parser_rule_context::ParserRuleContext;

/// Shared ownership handle used throughout the tree: a context's parent is
/// a non-owning `Weak` back-reference (spec §9: "weak reference: relation
/// + lookup, never ownership"), while its children are owned `Rc`s.
pub type RuleContextRef<T> = Rc<std::cell::RefCell<T>>;

/// Parent back-reference type shared by every tree node (rule contexts and
/// the two leaf kinds alike): every node in this tree is ultimately a
/// `ParserRuleContext` or a leaf hanging off one, so the parent pointer
/// always targets the former.
pub type ParentLink = Option<Weak<std::cell::RefCell<dyn ParserRuleContext>>>;

pub trait RuleContext {
    /// ATN state number that invoked this frame; `-1` at the root.
    fn get_invoking_state(&self) -> isize;
    fn set_invoking_state(&mut self, state: isize);
    fn get_rule_index(&self) -> usize;
    fn get_parent(&self) -> ParentLink;
    fn set_parent(&mut self, parent: ParentLink);

    /// Depth of the invocation stack, root is depth 1 (matches reference
    /// runtimes' `getRuleContext().depth()`, used in diagnostics/tests).
    fn depth(&self) -> usize;
}

/// Minimal, concrete `RuleContext` used as the root "no parent" sentinel
/// and as the base generated contexts delegate field access to. Generated
/// contexts are expected to hold one of these rather than re-implement the
/// bookkeeping.
pub struct RuleContextBase {
    pub parent: ParentLink,
    pub invoking_state: isize,
    pub rule_index: usize,
}

impl RuleContextBase {
    pub fn new(parent: ParentLink, invoking_state: isize, rule_index: usize) -> Self {
        RuleContextBase { parent, invoking_state, rule_index }
    }

    pub fn root(rule_index: usize) -> Self {
        RuleContextBase { parent: None, invoking_state: -1, rule_index }
    }
}

impl RuleContext for RuleContextBase {
    fn get_invoking_state(&self) -> isize {
        self.invoking_state
    }

    fn set_invoking_state(&mut self, state: isize) {
        self.invoking_state = state;
    }

    fn get_rule_index(&self) -> usize {
        self.rule_index
    }

    fn get_parent(&self) -> ParentLink {
        self.parent.clone()
    }

    fn set_parent(&mut self, parent: ParentLink) {
        self.parent = parent;
    }

    fn depth(&self) -> usize {
        let mut depth = 1;
        let mut cur = self.parent.clone();
        while let Some(weak) = cur {
            if let Some(rc) = weak.upgrade() {
                depth += 1;
                cur = rc.borrow().get_parent();
            } else {
                break;
            }
        }
        depth
    }
}

/// `sourceInterval = [start.tokenIndex, stop.tokenIndex]` helper shared by
/// `ParserRuleContext` (spec §3 invariant (b)).
pub fn source_interval(start_index: Option<isize>, stop_index: Option<isize>) -> Interval {
    match (start_index, stop_index) {
        (Some(a), Some(b)) => Interval::new(a, b),
        _ => INVALID,
    }
}
