//! Check command implementation.

use anyhow::{Context, Result};
use norb_lint_core::{Analyzer, Config, RuleBox};
use norb_lint_rules::{all_rules_with_config, configured_rules, default_config, Preset};
use norb_lint_ruby::RubyParser;
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Runs the check command.
pub fn run(
    path: &Path,
    format: OutputFormat,
    rules_filter: Option<String>,
    exclude: Vec<String>,
    source: &ConfigSource,
) -> Result<()> {
    let config = load_config(source)?;
    let fail_on = config.fail_on();

    let rules = match rules_filter {
        Some(filter) => {
            let wanted: Vec<&str> = filter.split(',').map(str::trim).collect();
            filter_rules(all_rules_with_config(&config), &wanted)
        }
        None => configured_rules(&config),
    };

    let analyzer = Analyzer::builder()
        .root(path)
        .parser(RubyParser::new())
        .excludes(exclude)
        .rules(rules)
        .config(config)
        .build()
        .context("Failed to build analyzer")?;

    tracing::info!(
        "Analyzing {:?} with {} rules (preset: {})",
        path,
        analyzer.rule_count(),
        Preset::from_config(analyzer.config()).name()
    );

    let result = analyzer.analyze().context("Analysis failed")?;

    super::output::print(&result, format, analyzer.root())?;

    if result.has_violations_at(fail_on) {
        std::process::exit(1);
    }

    Ok(())
}

/// Layers the resolved config file, if any, over the built-in defaults.
pub(crate) fn load_config(source: &ConfigSource) -> Result<Config> {
    let defaults = default_config().context("Built-in configuration is invalid")?;

    tracing::info!("Configuration: {}", source);
    let Some(path) = source.path() else {
        return Ok(defaults);
    };

    let file = Config::from_file(path)
        .with_context(|| format!("Failed to load config: {}", path.display()))?;
    Ok(defaults.merge(file))
}

/// Keeps the rules named in `wanted`, by name or code.
fn filter_rules(rules: Vec<RuleBox>, wanted: &[&str]) -> Vec<RuleBox> {
    for name in wanted {
        if !rules
            .iter()
            .any(|r| r.name() == *name || r.code().eq_ignore_ascii_case(name))
        {
            tracing::warn!("Unknown rule: {}", name);
        }
    }

    rules
        .into_iter()
        .filter(|r| {
            wanted
                .iter()
                .any(|name| r.name() == *name || r.code().eq_ignore_ascii_case(name))
        })
        .collect()
}
