//! Configuration types for norb-lint.

use crate::types::Severity;
use crate::utils::patterns::matches_any;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Top-level configuration for norb-lint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Preset to use (e.g., "recommended", "strict", "minimal").
    #[serde(default)]
    pub preset: Option<String>,

    /// Severity threshold for a failing run (default: "error").
    #[serde(default)]
    pub fail_on: Option<Severity>,

    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Per-rule configurations.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Layers `overrides` on top of `self`.
    ///
    /// Scalar settings in `overrides` win when set. Rule tables are merged
    /// per rule (see [`RuleConfig::merge`]) and analyzer excludes are
    /// unioned.
    #[must_use]
    pub fn merge(mut self, overrides: Self) -> Self {
        if overrides.preset.is_some() {
            self.preset = overrides.preset;
        }
        if overrides.fail_on.is_some() {
            self.fail_on = overrides.fail_on;
        }
        self.analyzer = self.analyzer.merge(overrides.analyzer);

        for (name, rule) in overrides.rules {
            let merged = match self.rules.remove(&name) {
                Some(base) => base.merge(rule),
                None => rule,
            };
            self.rules.insert(name, merged);
        }
        self
    }

    /// Severity threshold for a failing run.
    #[must_use]
    pub fn fail_on(&self) -> Severity {
        self.fail_on.unwrap_or(Severity::Error)
    }

    /// Checks if a rule is enabled.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        self.rules
            .get(rule_name)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }

    /// Gets the severity override for a rule.
    #[must_use]
    pub fn rule_severity(&self, rule_name: &str) -> Option<Severity> {
        self.rules.get(rule_name).and_then(|c| c.severity)
    }

    /// Checks a rule's include/exclude patterns against a relative path.
    #[must_use]
    pub fn rule_applies(&self, rule_name: &str, relative_path: &str) -> bool {
        self.rules
            .get(rule_name)
            .map_or(true, |c| c.applies_to(relative_path))
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Root directory to analyze (default: current directory).
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Glob patterns to exclude from analysis.
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// Glob patterns to include (if empty, every Ruby file).
    #[serde(default)]
    pub include: Vec<String>,

    /// Whether to respect .gitignore files.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,

    /// Number of worker threads; `1` analyzes files sequentially.
    #[serde(default)]
    pub parallelism: Option<usize>,
}

impl AnalyzerConfig {
    fn merge(mut self, overrides: Self) -> Self {
        if overrides.root != default_root() {
            self.root = overrides.root;
        }
        for pattern in overrides.exclude {
            if !self.exclude.contains(&pattern) {
                self.exclude.push(pattern);
            }
        }
        if !overrides.include.is_empty() {
            self.include = overrides.include;
        }
        self.respect_gitignore = overrides.respect_gitignore;
        if overrides.parallelism.is_some() {
            self.parallelism = overrides.parallelism;
        }
        self
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            exclude: default_exclude(),
            include: Vec::new(),
            respect_gitignore: true,
            parallelism: None,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_exclude() -> Vec<String> {
    vec![
        "**/vendor/**".to_string(),
        "**/node_modules/**".to_string(),
        "**/tmp/**".to_string(),
    ]
}

fn default_true() -> bool {
    true
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<Severity>,

    /// Glob patterns of files this rule is limited to (empty: all files).
    #[serde(default)]
    pub include: Vec<String>,

    /// Glob patterns of files this rule skips.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Rule-specific options as key-value pairs.
    #[serde(flatten)]
    pub options: HashMap<String, toml::Value>,
}

impl RuleConfig {
    /// Layers `overrides` on top of `self`.
    ///
    /// A non-empty pattern list replaces the base list; options merge key by
    /// key.
    #[must_use]
    pub fn merge(mut self, overrides: Self) -> Self {
        if overrides.enabled.is_some() {
            self.enabled = overrides.enabled;
        }
        if overrides.severity.is_some() {
            self.severity = overrides.severity;
        }
        if !overrides.include.is_empty() {
            self.include = overrides.include;
        }
        if !overrides.exclude.is_empty() {
            self.exclude = overrides.exclude;
        }
        self.options.extend(overrides.options);
        self
    }

    /// Checks include/exclude patterns against a `/`-separated relative path.
    #[must_use]
    pub fn applies_to(&self, relative_path: &str) -> bool {
        if !self.include.is_empty() && !matches_any(&self.include, relative_path) {
            return false;
        }
        !matches_any(&self.exclude, relative_path)
    }

    /// Gets an option value as a specific type.
    #[must_use]
    pub fn get_option<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.options
            .get(key)
            .and_then(|v| v.clone().try_into().ok())
    }

    /// Gets a string option with a default value.
    #[must_use]
    pub fn get_str<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.options
            .get(key)
            .and_then(|v| v.as_str())
            .unwrap_or(default)
    }

    /// Gets a string array option. A single string counts as a one-element
    /// array; non-string entries are skipped.
    #[must_use]
    pub fn get_str_array(&self, key: &str) -> Vec<String> {
        match self.options.get(key) {
            Some(toml::Value::String(s)) => vec![s.clone()],
            Some(toml::Value::Array(arr)) => arr
                .iter()
                .filter_map(|v| v.as_str().map(String::from))
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}
