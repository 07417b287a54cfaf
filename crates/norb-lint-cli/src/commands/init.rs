//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

const CONFIG_FILE_NAME: &str = "norb-lint.toml";

const DEFAULT_CONFIG: &str = r#"# norb-lint configuration
# Values here are layered over the built-in defaults.

# Rule set: "recommended" (default), "strict" or "minimal"
preset = "recommended"

# Exit with status 1 when a violation at or above this severity is found
# fail_on = "error"

[analyzer]
# Glob patterns to exclude from analysis (added to vendor/, node_modules/, tmp/)
exclude = [
    "**/db/schema.rb",
]

# Respect .gitignore files
respect_gitignore = true

# Worker threads; 1 analyzes files sequentially
# parallelism = 4

[rules.namespaced-active-record]
# Module every ActiveRecord class must be nested in
namespace = "Ar"
# Superclass names that mark a class as ActiveRecord
superclasses = ["ActiveRecord", "ApplicationRecord"]

# [rules.branching-logic]
# severity = "error"  # Override default severity
# include = ["**/app/controllers/**", "**/app/views/**"]

# [rules.misplaced-logic]
# enabled = true
# exclude = ["**/app/models/**", "**/lib/**"]
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new(CONFIG_FILE_NAME), force)?;

    println!("Created {CONFIG_FILE_NAME}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE_NAME} to configure rules");
    println!("  2. Run: norb-lint check");

    Ok(())
}

fn write_config(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use norb_lint_core::Config;
    use norb_lint_rules::RulePolicy;
    use tempfile::TempDir;

    #[test]
    fn template_is_valid_config() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.preset.as_deref(), Some("recommended"));
        assert_eq!(
            RulePolicy::resolve(config.rules.get("namespaced-active-record")),
            RulePolicy::default()
        );
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "# mine\n").unwrap();

        assert!(write_config(&path, false).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine\n");

        write_config(&path, true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    }
}
