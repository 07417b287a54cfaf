//! Rule keeping direct ActiveRecord access inside business objects.
//!
//! # Rationale
//!
//! Controllers, views, jobs and other Rails plumbing should reach the
//! database through business classes. Referencing the ActiveRecord
//! namespace from there couples the delivery layer to table layout.
//!
//! # Detected Patterns
//!
//! Any constant reference whose path contains the ActiveRecord namespace
//! segment:
//!
//! ```ruby
//! # bad (app/controllers/articles_controller.rb)
//! def show
//!   Ar::Article.find(params[:id])
//! end
//!
//! # good
//! def show
//!   Article.for(params[:id])
//! end
//! ```
//!
//! Class and module names are declarations, not references, and are never
//! reported.
//!
//! # Configuration
//!
//! The namespace comes from the shared [`RulePolicy`], read from the
//! `namespaced-active-record` table. Where the rule applies is controlled by
//! the usual `include`/`exclude` patterns.

use crate::policy::RulePolicy;
use norb_lint_core::visit::{visit_children, visit_declaration_body, visit_tree, Visit};
use norb_lint_core::{FileContext, Rule, Severity, Suggestion, SyntaxNode, SyntaxTree, Violation};

/// Rule code for active-record-through-business.
pub const CODE: &str = "NB002";

/// Rule name for active-record-through-business.
pub const NAME: &str = "active-record-through-business";

const MESSAGE: &str = "Direct ActiveRecord calls should come from business objects.";

/// Forbids references to the ActiveRecord namespace outside business code.
#[derive(Debug, Clone)]
pub struct ActiveRecordThroughBusiness {
    policy: RulePolicy,
    severity: Severity,
}

impl Default for ActiveRecordThroughBusiness {
    fn default() -> Self {
        Self::new()
    }
}

impl ActiveRecordThroughBusiness {
    /// Creates a new rule with the default policy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_policy(RulePolicy::default())
    }

    /// Creates a new rule using the namespace of `policy`.
    #[must_use]
    pub fn with_policy(policy: RulePolicy) -> Self {
        Self {
            policy,
            severity: Severity::Error,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for ActiveRecordThroughBusiness {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids direct ActiveRecord references outside business objects"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext, tree: &SyntaxTree) -> Vec<Violation> {
        let mut visitor = ReferenceVisitor {
            ctx,
            rule: self,
            violations: Vec::new(),
        };

        visit_tree(&mut visitor, tree);
        visitor.violations
    }
}

struct ReferenceVisitor<'a> {
    ctx: &'a FileContext<'a>,
    rule: &'a ActiveRecordThroughBusiness,
    violations: Vec<Violation>,
}

impl<'ast> Visit<'ast> for ReferenceVisitor<'_> {
    fn visit_class(&mut self, node: &'ast SyntaxNode) {
        visit_declaration_body(self, node);
    }

    fn visit_module(&mut self, node: &'ast SyntaxNode) {
        visit_declaration_body(self, node);
    }

    fn visit_const(&mut self, node: &'ast SyntaxNode) {
        let namespace = self.rule.policy.required_namespace();
        if node.const_path().contains(namespace) {
            self.violations.push(
                Violation::new(
                    CODE,
                    NAME,
                    self.rule.severity,
                    self.ctx.location(node.span()),
                    MESSAGE,
                )
                .with_suggestion(Suggestion::new(
                    "Move the query into a business object and call that instead",
                )),
            );
        }

        visit_children(self, node);
    }
}
