//! Free-standing tree-walking helpers, mirroring the reference runtimes'
//! `Trees` utility class: functions over `ParseTree`s rather than methods
//! on them, since not every tree node wants every utility in its vtable.

use crate::parser_rule_context::{ParseTreeChild, ParserRuleContext};

/// Depth-first pre-order list of a rule context's descendant rule nodes
/// (terminal/error leaves are skipped; callers that want every leaf should
/// walk `children()` directly).
pub fn rule_descendants(ctx: &dyn ParserRuleContext) -> Vec<std::rc::Rc<std::cell::RefCell<dyn ParserRuleContext>>> {
    let mut out = Vec::new();
    for child in ctx.children() {
        if let ParseTreeChild::Rule(r) = child {
            out.push(r.clone());
            out.extend(rule_descendants(&*r.borrow()));
        }
    }
    out
}

/// Number of terminal/error leaves directly under `ctx` (not recursive).
pub fn leaf_child_count(ctx: &dyn ParserRuleContext) -> usize {
    ctx.children()
        .iter()
        .filter(|c| !matches!(c, ParseTreeChild::Rule(_)))
        .count()
}
