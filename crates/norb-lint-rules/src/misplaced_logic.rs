//! Rule keeping code in the locations designated for it.
//!
//! # Rationale
//!
//! Business logic stays together when it can only live in a few places,
//! such as business models or `lib`. Anything elsewhere is misplaced.
//!
//! # Detected Patterns
//!
//! Every file the rule is enabled for is reported once, at the top of the
//! file. The permitted locations are the rule's `exclude` patterns, which
//! also keep the rule from running there:
//!
//! ```toml
//! [rules.misplaced-logic]
//! enabled = true
//! exclude = ["**/app/models/**", "**/lib/**"]
//! ```
//!
//! With that configuration `app/helpers/blog_helper.rb` is reported with
//! `Code should only be placed in **/app/models/**|**/lib/**.`

use norb_lint_core::{FileContext, Rule, Severity, SyntaxTree, Violation};

/// Rule code for misplaced-logic.
pub const CODE: &str = "NB008";

/// Rule name for misplaced-logic.
pub const NAME: &str = "misplaced-logic";

/// Reports every file outside the permitted locations.
#[derive(Debug, Clone)]
pub struct MisplacedLogic {
    allowed: Vec<String>,
    severity: Severity,
}

impl Default for MisplacedLogic {
    fn default() -> Self {
        Self::new()
    }
}

impl MisplacedLogic {
    /// Creates a new rule with no permitted locations.
    #[must_use]
    pub fn new() -> Self {
        Self {
            allowed: Vec::new(),
            severity: Severity::Error,
        }
    }

    /// Sets the permitted locations named in the message.
    #[must_use]
    pub fn allowed<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for MisplacedLogic {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires code to live in the permitted locations"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &FileContext, _tree: &SyntaxTree) -> Vec<Violation> {
        vec![Violation::new(
            CODE,
            NAME,
            self.severity,
            ctx.file_location(),
            format!("Code should only be placed in {}.", self.allowed.join("|")),
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use norb_lint_core::SourceParser;
    use norb_lint_ruby::RubyParser;
    use std::path::Path;

    fn check_with(rule: &MisplacedLogic, path: &str) -> Vec<Violation> {
        let code = "puts var\n";
        let tree = RubyParser::new().parse(code).expect("Failed to parse");
        let ctx = FileContext::new(Path::new(path), code, Path::new(""));
        rule.check(&ctx, &tree)
    }

    #[test]
    fn test_reports_file() {
        let rule = MisplacedLogic::new().allowed(["**/app/models/**", "**/lib/**"]);
        let violations = check_with(&rule, "company/blog/app/helpers/blog_helper.rb");
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].message,
            "Code should only be placed in **/app/models/**|**/lib/**."
        );
        assert_eq!((violations[0].location.line, violations[0].location.column), (1, 1));
        assert_eq!(violations[0].severity, Severity::Error);
    }

    #[test]
    fn test_no_permitted_locations() {
        let violations = check_with(&MisplacedLogic::new(), "app/helpers/blog_helper.rb");
        assert_eq!(violations[0].message, "Code should only be placed in .");
    }
}
