//! Comment-based allowance directives.
//!
//! Supports directives like:
//! ```text
//! # norb-lint: allow(branching-logic) reason="legacy controller, see #412"
//! ```
//!
//! A directive applies to the line it sits on (as a trailing comment) and to
//! the line directly below it.

use std::collections::HashSet;

/// Result of checking for an allow directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowCheck {
    /// Rule is not allowed.
    Denied,
    /// Rule is allowed with optional reason.
    Allowed {
        /// The reason provided (if any).
        reason: Option<String>,
    },
}

impl AllowCheck {
    /// Returns true if allowed.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }

    /// Returns the reason if allowed.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Allowed { reason } => reason.as_deref(),
            Self::Denied => None,
        }
    }
}

/// Parsed allowance directive.
#[derive(Debug, Clone)]
struct AllowDirective {
    rules: HashSet<String>,
    reason: Option<String>,
}

/// Checks source code for an allow directive covering `rule_name` at `line`.
///
/// # Arguments
///
/// * `content` - Source code content
/// * `line` - Line number to check (1-indexed)
/// * `rule_name` - Name of the rule to check for
#[must_use]
pub fn check_allow_with_reason(content: &str, line: usize, rule_name: &str) -> AllowCheck {
    let lines: Vec<&str> = content.lines().collect();

    for check_line in [line, line.saturating_sub(1)] {
        if check_line == 0 || check_line > lines.len() {
            continue;
        }

        if let Some(directive) = parse_allow_directive(lines[check_line - 1]) {
            if directive.rules.contains(rule_name) || directive.rules.contains("all") {
                return AllowCheck::Allowed {
                    reason: directive.reason,
                };
            }
        }
    }

    AllowCheck::Denied
}

/// Parses an allowance directive from a source line.
fn parse_allow_directive(line: &str) -> Option<AllowDirective> {
    let comment = line
        .match_indices('#')
        .map(|(i, _)| line[i + 1..].trim_start())
        .find(|rest| rest.starts_with("norb-lint:"))?;

    let directive = comment.strip_prefix("norb-lint:")?.trim_start();
    let allow_content = directive.strip_prefix("allow(")?;

    let paren_end = allow_content.find(')')?;
    let rules: HashSet<String> = allow_content[..paren_end]
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if rules.is_empty() {
        return None;
    }

    let rest = allow_content[paren_end + 1..].trim();
    let reason = rest
        .strip_prefix("reason=")
        .map(str::trim)
        .and_then(|quoted| quoted.strip_prefix('"'))
        .and_then(|quoted| quoted.find('"').map(|end| quoted[..end].to_string()))
        .filter(|reason| !reason.trim().is_empty());

    Some(AllowDirective { rules, reason })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_allow_directive() {
        let directive = parse_allow_directive("# norb-lint: allow(branching-logic)").unwrap();
        assert!(directive.rules.contains("branching-logic"));
        assert!(directive.reason.is_none());
    }

    #[test]
    fn test_parse_allow_directive_with_reason() {
        let directive =
            parse_allow_directive("  # norb-lint: allow(binary-operation) reason=\"pagination\"")
                .unwrap();
        assert!(directive.rules.contains("binary-operation"));
        assert_eq!(directive.reason.as_deref(), Some("pagination"));
    }

    #[test]
    fn test_parse_multiple_rules() {
        let directive = parse_allow_directive("#norb-lint: allow(rule1, rule2, rule3)").unwrap();
        assert_eq!(directive.rules.len(), 3);
        assert!(directive.rules.contains("rule2"));
    }

    #[test]
    fn test_trailing_comment() {
        let directive =
            parse_allow_directive("x = a || b # norb-lint: allow(branching-logic)").unwrap();
        assert!(directive.rules.contains("branching-logic"));
    }

    #[test]
    fn test_ignores_plain_comments() {
        assert!(parse_allow_directive("# allow(branching-logic)").is_none());
        assert!(parse_allow_directive("# norb-lint: allow()").is_none());
        assert!(parse_allow_directive("puts '#{x}'").is_none());
    }

    #[test]
    fn test_check_allow_previous_line() {
        let content = "def show\n  # norb-lint: allow(branching-logic) reason=\"guard clause\"\n  return if x\nend\n";

        let result = check_allow_with_reason(content, 3, "branching-logic");
        assert!(result.is_allowed());
        assert_eq!(result.reason(), Some("guard clause"));

        assert_eq!(
            check_allow_with_reason(content, 3, "binary-operation"),
            AllowCheck::Denied
        );
    }

    #[test]
    fn test_check_allow_all() {
        let content = "x = a + b # norb-lint: allow(all)\n";
        assert!(check_allow_with_reason(content, 1, "binary-operation").is_allowed());
    }

    #[test]
    fn test_check_allow_denied_far_away() {
        let content = "# norb-lint: allow(branching-logic)\n\nreturn if x\n";
        assert!(!check_allow_with_reason(content, 3, "branching-logic").is_allowed());
    }
}
