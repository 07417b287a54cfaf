//! Configuration file resolution with global fallback.
//!
//! Resolves the configuration file using a fixed priority order:
//!
//! 1. `--config` flag (explicit path)
//! 2. `norb-lint.toml` or `.norb-lint.toml` in the analyzed directory or one
//!    of its ancestors, up to and including the Rails root (the first
//!    directory holding a `Gemfile`)
//! 3. `$NORB_LINT_CONFIG_DIR/config.toml` or `~/.norb-lint/config.toml`
//! 4. No config found → built-in defaults
//!
//! Whatever is found is layered over the built-in defaults by the caller.

use std::fmt;
use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Explicitly specified via `--config`.
    Explicit(PathBuf),
    /// Found in the project.
    Project(PathBuf),
    /// Loaded from the global config directory.
    Global(PathBuf),
    /// No config file; built-in defaults only.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(p) => write!(f, "{} (--config)", p.display()),
            Self::Project(p) => write!(f, "{} (project)", p.display()),
            Self::Global(p) => write!(f, "{} (global)", p.display()),
            Self::Default => f.write_str("built-in defaults"),
        }
    }
}

/// Project-level config file names, checked in order within a directory.
const PROJECT_CONFIG_NAMES: &[&str] = &["norb-lint.toml", ".norb-lint.toml"];

/// Marks the root of a Rails project; the upward search stops there.
const PROJECT_ROOT_MARKER: &str = "Gemfile";

/// Config file name within the global config directory.
const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Resolves the configuration file for analyzing `project_dir`.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    // `ancestors()` of a relative path stops at its first component.
    let project_dir = project_dir
        .canonicalize()
        .unwrap_or_else(|_| project_dir.to_path_buf());
    resolve_inner(&project_dir, explicit, global_config_dir())
}

fn resolve_inner(
    project_dir: &Path,
    explicit: Option<&Path>,
    global_dir: Option<PathBuf>,
) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    if let Some(found) = find_project_config(project_dir) {
        tracing::debug!("Found project config: {}", found.display());
        return ConfigSource::Project(found);
    }

    if let Some(dir) = global_dir {
        let candidate = dir.join(GLOBAL_CONFIG_NAME);
        if candidate.is_file() {
            tracing::debug!("Found global config: {}", candidate.display());
            return ConfigSource::Global(candidate);
        }
    }

    ConfigSource::Default
}

fn find_project_config(project_dir: &Path) -> Option<PathBuf> {
    for dir in project_dir.ancestors() {
        for name in PROJECT_CONFIG_NAMES {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
        if dir.join(PROJECT_ROOT_MARKER).is_file() {
            break;
        }
    }
    None
}

/// Returns the global config directory.
///
/// `$NORB_LINT_CONFIG_DIR` when set, else `~/.norb-lint/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os("NORB_LINT_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".norb-lint"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// A Rails root with a `Gemfile` and an `app/controllers` directory.
    fn rails_project() -> TempDir {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("Gemfile"), "source 'https://rubygems.org'\n").unwrap();
        fs::create_dir_all(tmp.path().join("app/controllers")).unwrap();
        tmp
    }

    #[test]
    fn explicit_wins_and_is_not_checked() {
        let project = rails_project();
        fs::write(project.path().join("norb-lint.toml"), "").unwrap();

        let result = resolve_inner(project.path(), Some(Path::new("/nonexistent.toml")), None);
        assert_eq!(
            result,
            ConfigSource::Explicit(PathBuf::from("/nonexistent.toml"))
        );
    }

    #[test]
    fn project_config_in_analyzed_dir() {
        let project = rails_project();
        fs::write(project.path().join(".norb-lint.toml"), "").unwrap();

        let result = resolve_inner(project.path(), None, None);
        assert_eq!(
            result,
            ConfigSource::Project(project.path().join(".norb-lint.toml"))
        );
    }

    #[test]
    fn plain_name_preferred_over_dot_prefix() {
        let project = rails_project();
        fs::write(project.path().join("norb-lint.toml"), "").unwrap();
        fs::write(project.path().join(".norb-lint.toml"), "").unwrap();

        let result = resolve_inner(project.path(), None, None);
        assert_eq!(
            result,
            ConfigSource::Project(project.path().join("norb-lint.toml"))
        );
    }

    #[test]
    fn subdirectory_finds_rails_root_config() {
        let project = rails_project();
        fs::write(project.path().join("norb-lint.toml"), "").unwrap();

        let result = resolve_inner(&project.path().join("app/controllers"), None, None);
        assert_eq!(
            result,
            ConfigSource::Project(project.path().join("norb-lint.toml"))
        );
    }

    #[test]
    fn search_stops_at_rails_root() {
        let outer = TempDir::new().unwrap();
        fs::write(outer.path().join("norb-lint.toml"), "").unwrap();
        let app = outer.path().join("blog");
        fs::create_dir(&app).unwrap();
        fs::write(app.join("Gemfile"), "").unwrap();

        let result = resolve_inner(&app, None, None);
        assert_eq!(result, ConfigSource::Default);
    }

    #[test]
    fn global_fallback_when_no_project_config() {
        let project = rails_project();
        let global = TempDir::new().unwrap();
        fs::write(global.path().join("config.toml"), "").unwrap();

        let result = resolve_inner(project.path(), None, Some(global.path().to_path_buf()));
        assert_eq!(
            result,
            ConfigSource::Global(global.path().join("config.toml"))
        );
        assert!(result.to_string().ends_with("config.toml (global)"));
    }

    #[test]
    fn project_config_shadows_global() {
        let project = rails_project();
        fs::write(project.path().join("norb-lint.toml"), "").unwrap();
        let global = TempDir::new().unwrap();
        fs::write(global.path().join("config.toml"), "").unwrap();

        let result = resolve_inner(project.path(), None, Some(global.path().to_path_buf()));
        assert!(matches!(result, ConfigSource::Project(_)));
    }

    #[test]
    fn empty_global_dir_means_defaults() {
        let project = rails_project();
        let global = TempDir::new().unwrap();

        let result = resolve_inner(project.path(), None, Some(global.path().to_path_buf()));
        assert_eq!(result, ConfigSource::Default);
        assert!(result.path().is_none());
        assert_eq!(result.to_string(), "built-in defaults");
    }
}
