//! Rule keeping operator logic inside business classes.
//!
//! # Rationale
//!
//! Comparisons and arithmetic in controllers or views are business
//! decisions in disguise. They belong on the model.
//!
//! # Detected Patterns
//!
//! - comparison: `==` `===` `!=` `eql?` `equal?` `=~` `!~` `<` `>` `<=>` `<=` `>=`
//! - negation: `!` and `not`
//! - arithmetic: `+` `-` `*` `/` `%` `**`
//! - bitwise: `|` `^` `&` `<<` `>>`
//! - boolean: `&&` `and` `||` `or`
//!
//! Plain assignment, compound assignment (`+=`, `||=`) and index
//! assignment are not operator calls and are never reported.
//!
//! # Configuration
//!
//! Usually restricted to controllers through `include` patterns.

use norb_lint_core::visit::{visit_children, visit_tree, Visit};
use norb_lint_core::{FileContext, Rule, Severity, SyntaxNode, SyntaxTree, Violation};

/// Rule code for binary-operation.
pub const CODE: &str = "NB004";

/// Rule name for binary-operation.
pub const NAME: &str = "binary-operation";

const MESSAGE: &str = "This comparison operator logic is not allowed here.";

/// Method names reported when sent.
pub const OPERATORS: &[&str] = &[
    "==", "===", "!=", "eql?", "equal?", "=~", "!~", "<", ">", "<=>", "<=", ">=", "!", "+", "-",
    "*", "/", "%", "**", "<<", ">>", "|", "^", "&",
];

/// Forbids comparison, arithmetic, bitwise and boolean operators.
#[derive(Debug, Clone)]
pub struct BinaryOperation {
    severity: Severity,
}

impl Default for BinaryOperation {
    fn default() -> Self {
        Self::new()
    }
}

impl BinaryOperation {
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

impl Rule for BinaryOperation {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids comparison and arithmetic operators outside business classes"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext, tree: &SyntaxTree) -> Vec<Violation> {
        let mut visitor = OperatorVisitor {
            ctx,
            severity: self.severity,
            violations: Vec::new(),
        };

        visit_tree(&mut visitor, tree);
        visitor.violations
    }
}

struct OperatorVisitor<'a> {
    ctx: &'a FileContext<'a>,
    severity: Severity,
    violations: Vec<Violation>,
}

impl OperatorVisitor<'_> {
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

impl<'ast> Visit<'ast> for OperatorVisitor<'_> {
    fn visit_send(&mut self, node: &'ast SyntaxNode) {
        if node.name().is_some_and(|name| OPERATORS.contains(&name)) {
            self.report(node);
        }
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

#[cfg(test)]
mod tests {
    use super::*;
    use norb_lint_core::SourceParser;
    use norb_lint_ruby::RubyParser;
    use std::path::Path;

    fn check_code(code: &str) -> Vec<Violation> {
        let tree = RubyParser::new().parse(code).expect("Failed to parse");
        let ctx = FileContext::new(
            Path::new("app/controllers/users_controller.rb"),
            code,
            Path::new(""),
        );
        BinaryOperation::new().check(&ctx, &tree)
    }

    #[test]
    fn test_assignments_are_not_operators() {
        assert!(check_code("test = 0\n").is_empty());
        assert!(check_code("flash[:notice] = I18n.t('users.created')\n").is_empty());
        assert!(check_code("@var ||= MyClass.new\n").is_empty());
        assert!(check_code("count += 1\n").is_empty());
    }

    #[test]
    fn test_each_operator_reported_once() {
        let cases = [
            "0 || 0", "0 or 0", "0 && 0", "0 and 0", "0 | 0", "0 ^ 0", "0 & 0", "0 << 0",
            "0 >> 0", "0 == 0", "0 === 0", "0 != 0", "0.eql? 0", "0.equal? 0", "0 > 0",
            "0 >= 0", "0 < 0", "0 <= 0", "0 <=> 0", "0 =~ 0", "0 !~ 0", "!0", "not(0)",
            "0 + 0", "0 - 0", "0 * 0", "0 / 0", "0 % 0", "0 ** 0",
        ];
        for case in cases {
            let violations = check_code(&format!("{case}\n"));
            assert_eq!(violations.len(), 1, "expected one offense in {case:?}");
            assert_eq!(violations[0].message, MESSAGE);
        }
    }

    #[test]
    fn test_nested_operators() {
        let violations = check_code("redirect_to root_path if user.age >= 18 && admin\n");
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn test_plain_calls() {
        assert!(check_code("@user = User.find(params[:id])\nredirect_to @user\n").is_empty());
    }
}
