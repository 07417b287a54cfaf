//! Rule keeping branching logic inside business classes.
//!
//! # Rationale
//!
//! Decisions belong to business objects. A controller that branches on
//! model state usually duplicates a rule the model should own; yielding
//! from the model (`@user.with_id { |id| ... }`) keeps the decision in one
//! place.
//!
//! # Detected Patterns
//!
//! - `if` / `unless` / `elsif`, including modifier forms and the ternary
//! - `case ... when` and `case ... in`
//! - `rescue` clauses and the `rescue` modifier
//! - `&&` / `and` / `||` / `or`
//!
//! # Configuration
//!
//! Usually restricted to controllers through `include` patterns.

use norb_lint_core::visit::{visit_children, visit_tree, Visit};
use norb_lint_core::{FileContext, Rule, Severity, SyntaxNode, SyntaxTree, Violation};

/// Rule code for branching-logic.
pub const CODE: &str = "NB003";

/// Rule name for branching-logic.
pub const NAME: &str = "branching-logic";

const MESSAGE: &str = "This branching logic is not allowed here.";

/// Forbids conditionals, `case`, `rescue` and boolean operators.
#[derive(Debug, Clone)]
pub struct BranchingLogic {
    severity: Severity,
}

impl Default for BranchingLogic {
    fn default() -> Self {
        Self::new()
    }
}

impl BranchingLogic {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Warning,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for BranchingLogic {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids branching logic outside business classes"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext, tree: &SyntaxTree) -> Vec<Violation> {
        let mut visitor = BranchVisitor {
            ctx,
            severity: self.severity,
            violations: Vec::new(),
        };

        visit_tree(&mut visitor, tree);
        visitor.violations
    }
}

struct BranchVisitor<'a> {
    ctx: &'a FileContext<'a>,
    severity: Severity,
    violations: Vec<Violation>,
}

impl BranchVisitor<'_> {
    fn report(&mut self, node: &SyntaxNode) {
        self.violations.push(Violation::new(
            CODE,
            NAME,
            self.severity,
            self.ctx.location(node.span()),
            MESSAGE,
        ));
    }
}

impl<'ast> Visit<'ast> for BranchVisitor<'_> {
    fn visit_if(&mut self, node: &'ast SyntaxNode) {
        self.report(node);
        visit_children(self, node);
    }

    fn visit_case(&mut self, node: &'ast SyntaxNode) {
        self.report(node);
        visit_children(self, node);
    }

    fn visit_rescue(&mut self, node: &'ast SyntaxNode) {
        self.report(node);
        visit_children(self, node);
    }

    fn visit_and(&mut self, node: &'ast SyntaxNode) {
        self.report(node);
        visit_children(self, node);
    }

    fn visit_or(&mut self, node: &'ast SyntaxNode) {
        self.report(node);
        visit_children(self, node);
    }
}
