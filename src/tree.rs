//! Leaf node kinds of the parse tree (spec §4.2: "terminal node"/"error
//! node"). Rule nodes are `ParserRuleContext`s themselves (see
//! `parser_rule_context.rs`); this module covers the two leaf kinds a
//! generated rule method never subclasses.

use std::rc::Rc;

use crate::interval_set::Interval;
use crate::rule_context::ParentLink;
use crate::token::{OwningToken, Token};

/// Shared, object-safe "is this a leaf/error/rule node" view over the tree,
/// independent of the concrete payload.
pub trait ParseTree {
    fn get_text(&self) -> String;
    fn get_source_interval(&self) -> Interval;
}

/// A matched token attached to the tree as a child (spec §4.2 `consume`:
/// "adds ... as a terminal node to the current context's children").
pub struct TerminalNode {
    pub symbol: Rc<OwningToken>,
    pub parent: ParentLink,
}

impl TerminalNode {
    pub fn new(symbol: Rc<OwningToken>) -> Self {
        TerminalNode { symbol, parent: None }
    }
}

impl ParseTree for TerminalNode {
    fn get_text(&self) -> String {
        self.symbol.get_text()
    }

    fn get_source_interval(&self) -> Interval {
        let i = self.symbol.get_token_index();
        Interval::new(i, i)
    }
}

/// A token attached during error recovery — same shape as `TerminalNode`
/// but tagged distinctly so tree walkers can dispatch `visitErrorNode`
/// instead of `visitTerminal` (spec §4.2, §8 property 5) without a runtime
/// type check.
pub struct ErrorNode {
    pub symbol: Rc<OwningToken>,
    pub parent: ParentLink,
}

impl ErrorNode {
    pub fn new(symbol: Rc<OwningToken>) -> Self {
        ErrorNode { symbol, parent: None }
    }
}

impl ParseTree for ErrorNode {
    fn get_text(&self) -> String {
        self.symbol.get_text()
    }

    fn get_source_interval(&self) -> Interval {
        let i = self.symbol.get_token_index();
        Interval::new(i, i)
    }
}
