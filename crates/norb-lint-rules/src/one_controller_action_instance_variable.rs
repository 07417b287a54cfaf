//! Rule limiting controller actions to a single instance variable.
//!
//! # Rationale
//!
//! Every instance variable an action sets is state the view depends on. An
//! action that hands one object to its view keeps the view's contract small;
//! when more is needed, wrap it in a presenter or business object.
//!
//! # Detected Patterns
//!
//! A public instance method that assigns two or more distinct `@ivars`
//! anywhere in its body, including inside conditionals, blocks, `||=` and
//! multiple assignment. Assigning the same variable twice counts once.
//!
//! ```ruby
//! # bad
//! def index
//!   @post = Post.new(blog_id: params[:id])
//!   @comments = Comment.where(blog_id: params[:id])
//! end
//!
//! # good
//! def index
//!   @blog_post = BlogPost.new(id: params[:id])
//! end
//! ```
//!
//! Private and protected methods, singleton methods and methods inside
//! `class << self` are not actions and are ignored.

use crate::visibility::public_instance_methods;
use norb_lint_core::{FileContext, NodeKind, Rule, Severity, Suggestion, SyntaxNode, SyntaxTree, Violation};

/// Rule code for one-controller-action-instance-variable.
pub const CODE: &str = "NB005";

/// Rule name for one-controller-action-instance-variable.
pub const NAME: &str = "one-controller-action-instance-variable";

/// Forbids actions that set more than one instance variable.
#[derive(Debug, Clone)]
pub struct OneControllerActionInstanceVariable {
    severity: Severity,
}

impl Default for OneControllerActionInstanceVariable {
    fn default() -> Self {
        Self::new()
    }
}

impl OneControllerActionInstanceVariable {
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

impl Rule for OneControllerActionInstanceVariable {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Limits controller actions to one instance variable"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext, tree: &SyntaxTree) -> Vec<Violation> {
        public_instance_methods(tree.root())
            .into_iter()
            .filter(|action| assigned_ivars(action).len() > 1)
            .map(|action| {
                let name = action.name().unwrap_or_default();
                Violation::new(
                    CODE,
                    NAME,
                    self.severity,
                    ctx.location(action.span()),
                    format!("`{name}` instantiates more than one @instance variable."),
                )
                .with_suggestion(Suggestion::new(
                    "Expose a single object to the view, e.g. a presenter",
                ))
            })
            .collect()
    }
}

/// Distinct instance variable names assigned within `node`.
fn assigned_ivars(node: &SyntaxNode) -> Vec<&str> {
    let mut names = Vec::new();
    collect_ivars(node, &mut names);
    names
}

fn collect_ivars<'a>(node: &'a SyntaxNode, names: &mut Vec<&'a str>) {
    for child in node.children() {
        if child.kind() == NodeKind::IvarAssign {
            if let Some(name) = child.name() {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        collect_ivars(child, names);
    }
}
