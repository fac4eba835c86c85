//! Small free functions shared by more than one module that don't belong to
//! any single collaborator (spec crate layout lists `utils` alongside the
//! rest of the module set).

use std::rc::Rc;

use crate::parser_rule_context::ParserRuleContext;

/// Rule names from the current context up to the root, innermost first —
/// the same "invocation stack" reference ANTLR runtimes render in
/// diagnostics (`Parser.getRuleInvocationStack`) and tests print on
/// failure. `rule_names` is the recognizer's `Recognizer::get_rule_names()`
/// table; an index past its end (shouldn't happen for a well-formed ATN)
/// renders as `"<unknown>"` rather than panicking.
pub fn rule_invocation_stack(
    ctx: &Rc<std::cell::RefCell<dyn ParserRuleContext>>,
    rule_names: &[&str],
) -> Vec<String> {
    use crate::rule_context::RuleContext;

    let mut stack = Vec::new();
    let mut cur = Some(Rc::clone(ctx));
    while let Some(rc) = cur {
        let borrowed = rc.borrow();
        let idx = borrowed.get_rule_index();
        stack.push(rule_names.get(idx).copied().unwrap_or("<unknown>").to_owned());
        cur = borrowed.get_parent().and_then(|weak| weak.upgrade());
    }
    stack
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser_rule_context::ParserRuleContextBase;
    use std::cell::RefCell;

    #[test]
    fn stack_lists_rule_names_innermost_first() {
        let root: Rc<RefCell<dyn ParserRuleContext>> =
            Rc::new(RefCell::new(ParserRuleContextBase::new(None, -1, 0)));
        let child: Rc<RefCell<dyn ParserRuleContext>> = Rc::new(RefCell::new(
            ParserRuleContextBase::new(Some(Rc::downgrade(&root)), 0, 1),
        ));

        let names = ["stat", "expr"];
        assert_eq!(rule_invocation_stack(&child, &names), vec!["expr", "stat"]);
    }

    #[test]
    fn unknown_rule_index_does_not_panic() {
        let root: Rc<RefCell<dyn ParserRuleContext>> =
            Rc::new(RefCell::new(ParserRuleContextBase::new(None, -1, 7)));
        assert_eq!(rule_invocation_stack(&root, &["stat"]), vec!["<unknown>"]);
    }
}
