//! Rule trait for defining lint rules.

use crate::context::FileContext;
use crate::syntax::SyntaxTree;
use crate::types::{Severity, Violation};

/// A per-file lint rule over the lowered syntax tree.
///
/// Rules receive the parsed tree and usually walk it with a
/// [`Visit`](crate::visit::Visit) implementation. A rule holds no mutable
/// state, so one instance can check many files concurrently.
///
/// # Example
///
/// ```ignore
/// use norb_lint_core::{FileContext, Rule, SyntaxTree, Violation};
/// use norb_lint_core::visit::{visit_tree, Visit};
///
/// pub struct NoCase;
///
/// impl Rule for NoCase {
///     fn name(&self) -> &'static str { "no-case" }
///     fn code(&self) -> &'static str { "NB900" }
///
///     fn check(&self, ctx: &FileContext, tree: &SyntaxTree) -> Vec<Violation> {
///         let mut visitor = CaseVisitor::new(ctx, self);
///         visit_tree(&mut visitor, tree);
///         visitor.violations
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "branching-logic").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "NB003").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Whether this rule requires a reason when using allow directives.
    ///
    /// By default, rules with `Severity::Error` require a reason.
    fn requires_allow_reason(&self) -> bool {
        self.default_severity() == Severity::Error
    }

    /// Checks a single file and returns any violations found, in document
    /// order.
    fn check(&self, ctx: &FileContext, tree: &SyntaxTree) -> Vec<Violation>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{NodeKind, Span, SyntaxNode};
    use std::path::Path;

    struct TestRule;

    impl Rule for TestRule {
        fn name(&self) -> &'static str {
            "test-rule"
        }
        fn code(&self) -> &'static str {
            "TEST001"
        }
        fn description(&self) -> &'static str {
            "A test rule"
        }

        fn check(&self, ctx: &FileContext, tree: &SyntaxTree) -> Vec<Violation> {
            vec![Violation::new(
                self.code(),
                self.name(),
                self.default_severity(),
                ctx.location(tree.root().span()),
                "Test violation",
            )]
        }
    }

    #[test]
    fn test_rule_trait() {
        let rule = TestRule;
        assert_eq!(rule.name(), "test-rule");
        assert_eq!(rule.code(), "TEST001");
        assert_eq!(rule.default_severity(), Severity::Error);
        assert!(rule.requires_allow_reason());
    }

    #[test]
    fn test_rule_check() {
        let ctx = FileContext::new(Path::new("/app/models/a.rb"), "", Path::new("/app"));
        let tree = SyntaxTree::new(SyntaxNode::new(
            NodeKind::Program,
            Span::new(0, 0, 1, 1),
        ));
        let violations = TestRule.check(&ctx, &tree);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].location.file, Path::new("models/a.rb"));
    }
}
