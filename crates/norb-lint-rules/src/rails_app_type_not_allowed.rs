//! Rule restricting which `app/<type>` directories may hold Ruby code.
//!
//! # Rationale
//!
//! Helpers, decorators, services and the like under `app/` tend to attract
//! business logic that belongs in models or `lib`.
//!
//! # Detected Patterns
//!
//! Any Ruby file under `app/<type>/`, where `<type>` is made of ASCII
//! letters. The finding is reported once, at the top of the file.
//!
//! ```text
//! # bad
//! app/helpers/foo_helper.rb
//!
//! # good
//! app/models/foo.rb
//! ```
//!
//! # Configuration
//!
//! The rule fires for every file it applies to, so the permitted types are
//! listed as `exclude` patterns (e.g. `**/app/models/**`).

use norb_lint_core::{FileContext, Rule, Severity, Suggestion, SyntaxTree, Violation};

/// Rule code for rails-app-type-not-allowed.
pub const CODE: &str = "NB007";

/// Rule name for rails-app-type-not-allowed.
pub const NAME: &str = "rails-app-type-not-allowed";

/// Forbids Ruby files in `app/` directories that are not explicitly excluded.
#[derive(Debug, Clone)]
pub struct RailsAppTypeNotAllowed {
    severity: Severity,
}

impl Default for RailsAppTypeNotAllowed {
    fn default() -> Self {
        Self::new()
    }
}

impl RailsAppTypeNotAllowed {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
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

impl Rule for RailsAppTypeNotAllowed {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids Ruby code in app/ directories that are not allowed"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext, _tree: &SyntaxTree) -> Vec<Violation> {
        let relative = ctx.relative_str();
        let Some(app_type) = app_type(&relative) else {
            return Vec::new();
        };

        vec![Violation::new(
            CODE,
            NAME,
            self.severity,
            ctx.file_location(),
            format!("This Rails app/{app_type} type is not allowed."),
        )
        .with_suggestion(Suggestion::new(
            "Move the code into app/models or lib",
        ))]
    }
}

/// Extracts `<type>` from the leftmost `app/<type>/` of a `.rb` path.
#[must_use]
pub fn app_type(path: &str) -> Option<&str> {
    if !path.ends_with(".rb") {
        return None;
    }

    path.match_indices("app/").find_map(|(at, marker)| {
        let rest = &path[at + marker.len()..];
        let len = rest
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(rest.len());
        (len > 0 && rest[len..].starts_with('/')).then(|| &rest[..len])
    })
}
