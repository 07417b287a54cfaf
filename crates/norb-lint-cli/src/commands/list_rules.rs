//! List rules command implementation.
//!
//! Shows every built-in rule as the resolved configuration leaves it: on or
//! off under the active preset and rule tables, and at which severity.

use anyhow::Result;
use norb_lint_core::{Config, Severity};
use norb_lint_rules::{
    all_rules_with_config, configured_rules, namespaced_active_record, Preset, RulePolicy,
};

use crate::config_resolver::ConfigSource;

/// One line of the rule table.
#[derive(Debug, PartialEq, Eq)]
struct RuleRow {
    code: &'static str,
    name: &'static str,
    severity: Severity,
    active: bool,
    description: &'static str,
}

/// Runs the list-rules command against the resolved configuration.
pub fn run(source: &ConfigSource) -> Result<()> {
    let config = super::check::load_config(source)?;
    let policy = RulePolicy::resolve(config.rules.get(namespaced_active_record::NAME));

    println!("Configuration: {source}");
    println!("Preset:        {}", Preset::from_config(&config).name());
    println!(
        "Namespace:     {} (superclasses: {})",
        policy.required_namespace(),
        policy
            .accepted_superclasses()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!();

    println!(
        "{:<7} {:<40} {:<8} {:<4} Description",
        "Code", "Name", "Severity", "On"
    );
    println!("{}", "-".repeat(110));
    for row in rule_rows(&config) {
        println!(
            "{:<7} {:<40} {:<8} {:<4} {}",
            row.code,
            row.name,
            row.severity.to_string(),
            if row.active { "yes" } else { "no" },
            row.description
        );
    }

    println!("\nRun a subset with --rules, by name or code:");
    println!("  norb-lint check --rules NB001,branching-logic app/");
    Ok(())
}

/// Every rule with its effective state under `config`.
fn rule_rows(config: &Config) -> Vec<RuleRow> {
    let active: Vec<&'static str> = configured_rules(config)
        .iter()
        .map(|rule| rule.name())
        .filter(|name| config.is_rule_enabled(name))
        .collect();

    all_rules_with_config(config)
        .iter()
        .map(|rule| RuleRow {
            code: rule.code(),
            name: rule.name(),
            severity: config
                .rule_severity(rule.name())
                .unwrap_or_else(|| rule.default_severity()),
            active: active.contains(&rule.name()),
            description: rule.description(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use norb_lint_rules::default_config;

    fn config(overrides: &str) -> Config {
        default_config()
            .unwrap()
            .merge(Config::parse(overrides).unwrap())
    }

    fn active_codes(rows: &[RuleRow]) -> Vec<&'static str> {
        rows.iter().filter(|r| r.active).map(|r| r.code).collect()
    }

    #[test]
    fn recommended_leaves_misplaced_logic_off() {
        let rows = rule_rows(&config(""));
        assert_eq!(rows.len(), 8);
        assert_eq!(
            active_codes(&rows),
            ["NB001", "NB002", "NB003", "NB004", "NB005", "NB006", "NB007"]
        );
    }

    #[test]
    fn minimal_preset_with_explicit_enable() {
        let rows = rule_rows(&config(
            "preset = \"minimal\"\n[rules.branching-logic]\nenabled = true\n",
        ));
        assert_eq!(active_codes(&rows), ["NB001", "NB003"]);
    }

    #[test]
    fn disabled_rule_and_severity_override() {
        let rows = rule_rows(&config(
            "[rules.standard-restful-controller-actions]\nenabled = false\n\
             [rules.branching-logic]\nseverity = \"error\"\n",
        ));
        assert!(!active_codes(&rows).contains(&"NB006"));

        let branching = rows
            .iter()
            .find(|r| r.name == "branching-logic")
            .expect("branching-logic row");
        assert_eq!(branching.severity, Severity::Error);
    }
}
