//! `ParserRuleContext` (spec §3): rule-tree nodes with children, start/stop
//! tokens, and an optional recovery exception.

use std::rc::Rc;

use better_any::Tid;

use crate::errors::ANTLRError;
use crate::interval_set::{Interval, INVALID};
use crate::rule_context::{ParentLink, RuleContext, RuleContextBase};
use crate::token::{OwningToken, Token};
use crate::tree::{ErrorNode, ParseTree, TerminalNode};

/// One slot in a rule context's ordered children (spec §3: "`children`
/// (ordered sequence, may include terminal/error nodes)").
pub enum ParseTreeChild {
    Terminal(Rc<TerminalNode>),
    Error(Rc<ErrorNode>),
    Rule(Rc<std::cell::RefCell<dyn ParserRuleContext>>),
}

impl ParseTreeChild {
    pub fn get_text(&self) -> String {
        match self {
            ParseTreeChild::Terminal(t) => t.get_text(),
            ParseTreeChild::Error(e) => e.get_text(),
            ParseTreeChild::Rule(r) => r.borrow().get_text(),
        }
    }
}

/// Rule-invocation tree node with children, matched span, and an optional
/// recovery exception (spec §3 "Rule context", invariants (a)-(c)).
///
/// `Tid<'static>` lets generated subclasses (which add grammar-specific
/// fields alongside this shape) be recovered from a `dyn ParserRuleContext`
/// trait object via downcasting (spec §9: "a closed-but-extensible
/// polymorphic hierarchy").
pub trait ParserRuleContext: RuleContext + Tid<'static> {
    fn children(&self) -> &[ParseTreeChild];
    fn add_child(&mut self, child: ParseTreeChild);

    fn get_start(&self) -> Option<Rc<OwningToken>>;
    fn set_start(&mut self, token: Option<Rc<OwningToken>>);
    fn get_stop(&self) -> Option<Rc<OwningToken>>;
    fn set_stop(&mut self, token: Option<Rc<OwningToken>>);

    fn exception(&self) -> Option<&ANTLRError>;
    fn set_exception(&mut self, e: ANTLRError);

    /// `[start.tokenIndex, stop.tokenIndex]`, or the invalid interval
    /// before either is set (spec §3 invariant (b)).
    fn source_interval(&self) -> Interval {
        match (self.get_start(), self.get_stop()) {
            (Some(s), Some(e)) => Interval::new(s.get_token_index(), e.get_token_index()),
            _ => INVALID,
        }
    }

    /// Concatenated text of all children, default-channel terminals only
    /// (spec §8 property 1). Error nodes still contribute their (often
    /// synthetic) text, matching the reference runtimes' `getText`.
    fn get_text(&self) -> String {
        let mut s = String::new();
        for c in self.children() {
            s.push_str(&c.get_text());
        }
        s
    }

    /// Drops children carrying no information once the rule has exited,
    /// when `trimParseTree` is enabled (spec §5 "Rule contexts own their
    /// children; when `trimParseTree` is enabled, trimming removes
    /// null/unused slots on rule exit."). The base shape never produces
    /// null slots, so this is a no-op hook generated contexts may override.
    fn trim(&mut self) {}
}

impl ParseTree for dyn ParserRuleContext {
    fn get_text(&self) -> String {
        ParserRuleContext::get_text(self)
    }

    fn get_source_interval(&self) -> Interval {
        self.source_interval()
    }
}

/// The context shape used directly by dynamic-grammar interpreters and as
/// the field generated contexts embed for their common bookkeeping.
#[derive(Tid)]
pub struct ParserRuleContextBase {
    pub base: RuleContextBase,
    pub start: Option<Rc<OwningToken>>,
    pub stop: Option<Rc<OwningToken>>,
    pub children: Vec<ParseTreeChild>,
    pub exception: Option<ANTLRError>,
}

impl ParserRuleContextBase {
    pub fn new(parent: ParentLink, invoking_state: isize, rule_index: usize) -> Self {
        ParserRuleContextBase {
            base: RuleContextBase::new(parent, invoking_state, rule_index),
            start: None,
            stop: None,
            children: Vec::new(),
            exception: None,
        }
    }
}

impl RuleContext for ParserRuleContextBase {
    fn get_invoking_state(&self) -> isize {
        self.base.get_invoking_state()
    }
    fn set_invoking_state(&mut self, state: isize) {
        self.base.set_invoking_state(state)
    }
    fn get_rule_index(&self) -> usize {
        self.base.get_rule_index()
    }
    fn get_parent(&self) -> ParentLink {
        self.base.get_parent()
    }
    fn set_parent(&mut self, parent: ParentLink) {
        self.base.set_parent(parent)
    }
    fn depth(&self) -> usize {
        self.base.depth()
    }
}

impl ParserRuleContext for ParserRuleContextBase {
    fn children(&self) -> &[ParseTreeChild] {
        &self.children
    }
    fn add_child(&mut self, child: ParseTreeChild) {
        self.children.push(child);
    }
    fn get_start(&self) -> Option<Rc<OwningToken>> {
        self.start.clone()
    }
    fn set_start(&mut self, token: Option<Rc<OwningToken>>) {
        self.start = token;
    }
    fn get_stop(&self) -> Option<Rc<OwningToken>> {
        self.stop.clone()
    }
    fn set_stop(&mut self, token: Option<Rc<OwningToken>>) {
        self.stop = token;
    }
    fn exception(&self) -> Option<&ANTLRError> {
        self.exception.as_ref()
    }
    fn set_exception(&mut self, e: ANTLRError) {
        self.exception = Some(e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(idx: isize, text: &str) -> Rc<OwningToken> {
        Rc::new(OwningToken {
            token_type: 1,
            channel: 0,
            start: 0,
            stop: 0,
            line: 1,
            column: 0,
            token_index: idx,
            text_override: Some(text.to_owned()),
            source_text: None,
            source_name: "<test>".to_owned(),
        })
    }

    #[test]
    fn source_interval_uses_start_and_stop_token_index() {
        let mut ctx = ParserRuleContextBase::new(None, -1, 0);
        ctx.set_start(Some(tok(2, "x")));
        ctx.set_stop(Some(tok(5, "y")));
        assert_eq!(ctx.source_interval(), Interval::new(2, 5));
    }

    #[test]
    fn text_concatenates_terminal_children() {
        let mut ctx = ParserRuleContextBase::new(None, -1, 0);
        ctx.add_child(ParseTreeChild::Terminal(Rc::new(TerminalNode::new(tok(0, "x")))));
        ctx.add_child(ParseTreeChild::Terminal(Rc::new(TerminalNode::new(tok(1, "=")))));
        assert_eq!(ParserRuleContext::get_text(&ctx), "x=");
    }
}
