//! Namespace policy shared by the ActiveRecord rules.
//!
//! # Configuration
//!
//! Read from the `[rules.namespaced-active-record]` table:
//!
//! - `namespace`: module ActiveRecord classes must live in (default: `Ar`)
//! - `superclasses`: simple names that mark a class as ActiveRecord
//!   (default: `["ActiveRecord", "ApplicationRecord"]`); a single string is
//!   accepted too
//!
//! Missing, empty, blank or mistyped values fall back to the defaults.

use norb_lint_core::{Identifier, RuleConfig};
use std::collections::BTreeSet;

/// Option key for the required namespace.
pub const NAMESPACE_KEY: &str = "namespace";

/// Option key for the accepted superclasses.
pub const SUPERCLASSES_KEY: &str = "superclasses";

const DEFAULT_NAMESPACE: &str = "Ar";
const DEFAULT_SUPERCLASSES: &[&str] = &["ActiveRecord", "ApplicationRecord"];

/// Resolved namespace policy.
///
/// Both fields are always non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RulePolicy {
    required_namespace: Identifier,
    accepted_superclasses: BTreeSet<Identifier>,
}

impl Default for RulePolicy {
    fn default() -> Self {
        Self {
            required_namespace: Identifier::new(DEFAULT_NAMESPACE),
            accepted_superclasses: DEFAULT_SUPERCLASSES
                .iter()
                .copied()
                .map(Identifier::from)
                .collect(),
        }
    }
}

impl RulePolicy {
    /// Builds a policy from raw values, substituting defaults for blanks.
    #[must_use]
    pub fn new<S: AsRef<str>>(namespace: &str, superclasses: &[S]) -> Self {
        let defaults = Self::default();

        let namespace = namespace.trim();
        let required_namespace = if namespace.is_empty() {
            defaults.required_namespace
        } else {
            Identifier::new(namespace)
        };

        let accepted: BTreeSet<Identifier> = superclasses
            .iter()
            .map(|s| s.as_ref().trim())
            .filter(|s| !s.is_empty())
            .map(Identifier::from)
            .collect();
        let accepted_superclasses = if accepted.is_empty() {
            defaults.accepted_superclasses
        } else {
            accepted
        };

        Self {
            required_namespace,
            accepted_superclasses,
        }
    }

    /// Resolves the policy from a rule's configuration table.
    ///
    /// Never fails; see the module docs for the fallback rules.
    #[must_use]
    pub fn resolve(config: Option<&RuleConfig>) -> Self {
        let Some(config) = config else {
            return Self::default();
        };
        Self::new(
            config.get_str(NAMESPACE_KEY, ""),
            &config.get_str_array(SUPERCLASSES_KEY),
        )
    }

    /// Module ActiveRecord classes must be nested in.
    #[must_use]
    pub fn required_namespace(&self) -> &Identifier {
        &self.required_namespace
    }

    /// Superclass names that make a class an ActiveRecord class.
    #[must_use]
    pub fn accepted_superclasses(&self) -> &BTreeSet<Identifier> {
        &self.accepted_superclasses
    }

    /// Checks a simple constant name against the accepted superclasses.
    #[must_use]
    pub fn accepts_superclass(&self, name: &Identifier) -> bool {
        self.accepted_superclasses.contains(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use norb_lint_core::Config;

    fn rule_config(toml: &str) -> RuleConfig {
        let config = Config::parse(&format!("[rules.namespaced-active-record]\n{toml}"))
            .expect("valid toml");
        config.rules["namespaced-active-record"].clone()
    }

    fn names(set: &BTreeSet<Identifier>) -> Vec<&str> {
        set.iter().map(Identifier::as_str).collect()
    }

    #[test]
    fn defaults_without_config() {
        let policy = RulePolicy::resolve(None);
        assert_eq!(policy.required_namespace(), &Identifier::new("Ar"));
        assert_eq!(
            names(policy.accepted_superclasses()),
            ["ActiveRecord", "ApplicationRecord"]
        );
    }

    #[test]
    fn defaults_for_empty_table() {
        assert_eq!(RulePolicy::resolve(Some(&rule_config(""))), RulePolicy::default());
    }

    #[test]
    fn explicit_values() {
        let policy = RulePolicy::resolve(Some(&rule_config(
            "namespace = \"Custom\"\nsuperclasses = [\"Base\"]\n",
        )));
        assert_eq!(policy.required_namespace().as_str(), "Custom");
        assert_eq!(names(policy.accepted_superclasses()), ["Base"]);
    }

    #[test]
    fn single_string_superclass() {
        let policy = RulePolicy::resolve(Some(&rule_config("superclasses = \"Base\"\n")));
        assert_eq!(policy.required_namespace().as_str(), "Ar");
        assert_eq!(names(policy.accepted_superclasses()), ["Base"]);
    }

    #[test]
    fn blank_values_fall_back() {
        let policy = RulePolicy::resolve(Some(&rule_config(
            "namespace = \"  \"\nsuperclasses = [\"\", \" \"]\n",
        )));
        assert_eq!(policy, RulePolicy::default());
    }

    #[test]
    fn mistyped_values_fall_back() {
        let policy = RulePolicy::resolve(Some(&rule_config(
            "namespace = 42\nsuperclasses = [1, 2]\n",
        )));
        assert_eq!(policy, RulePolicy::default());
    }

    #[test]
    fn values_are_trimmed() {
        let policy = RulePolicy::new(" Db ", &[" Model "]);
        assert_eq!(policy.required_namespace().as_str(), "Db");
        assert!(policy.accepts_superclass(&Identifier::new("Model")));
        assert!(!policy.accepts_superclass(&Identifier::new("ActiveRecord")));
    }
}
