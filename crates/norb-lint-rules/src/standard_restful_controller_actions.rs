//! Rule restricting controllers to the standard RESTful actions.
//!
//! # Rationale
//!
//! A controller limited to `index`, `show`, `new`, `edit`, `create`,
//! `update` and `destroy` has one responsibility. An action that does not
//! fit usually wants its own controller, which tends to collect related
//! actions soon after.
//!
//! # Detected Patterns
//!
//! ```ruby
//! # bad
//! class BlogController < ApplicationController
//!   def ajax_comments
//!   end
//! end
//!
//! # good
//! class BlogCommentsController < ApplicationController
//!   def index
//!   end
//! end
//! ```
//!
//! Private and protected methods, singleton methods and methods inside
//! `class << self` are ignored.

use crate::visibility::public_instance_methods;
use norb_lint_core::{FileContext, Rule, Severity, Suggestion, SyntaxTree, Violation};

/// Rule code for standard-restful-controller-actions.
pub const CODE: &str = "NB006";

/// Rule name for standard-restful-controller-actions.
pub const NAME: &str = "standard-restful-controller-actions";

/// Action names a controller may define publicly.
pub const RESTFUL_ACTIONS: &[&str] = &["index", "show", "new", "edit", "create", "update", "destroy"];

/// Forbids public controller methods outside the RESTful action set.
#[derive(Debug, Clone)]
pub struct StandardRestfulControllerActions {
    severity: Severity,
}

impl Default for StandardRestfulControllerActions {
    fn default() -> Self {
        Self::new()
    }
}

impl StandardRestfulControllerActions {
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

impl Rule for StandardRestfulControllerActions {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Restricts controllers to index, show, new, edit, create, update and destroy"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext, tree: &SyntaxTree) -> Vec<Violation> {
        public_instance_methods(tree.root())
            .into_iter()
            .filter_map(|action| {
                let name = action.name()?;
                if RESTFUL_ACTIONS.contains(&name) {
                    return None;
                }
                Some(
                    Violation::new(
                        CODE,
                        NAME,
                        self.severity,
                        ctx.location(action.span()),
                        format!("`{name}` is not a standard RESTful controller action."),
                    )
                    .with_suggestion(Suggestion::new(
                        "Move the action to a new controller, or make it private",
                    )),
                )
            })
            .collect()
    }
}
