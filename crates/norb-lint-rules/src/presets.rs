//! Rule presets and the built-in configuration.

use crate::policy::RulePolicy;
use crate::{
    active_record_through_business, binary_operation, branching_logic, misplaced_logic,
    namespaced_active_record, one_controller_action_instance_variable,
    rails_app_type_not_allowed, standard_restful_controller_actions,
};
use crate::{
    ActiveRecordThroughBusiness, BinaryOperation, BranchingLogic, MisplacedLogic,
    NamespacedActiveRecord, OneControllerActionInstanceVariable, RailsAppTypeNotAllowed,
    StandardRestfulControllerActions,
};
use norb_lint_core::{Config, ConfigError, RuleBox};
use tracing::{debug, warn};

const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

/// Preset configurations for norb-lint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Every rule except `misplaced-logic`.
    Recommended,
    /// Every rule.
    Strict,
    /// Only the namespace requirement, for gradual adoption.
    Minimal,
}

impl Preset {
    /// Looks up a preset by its config name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "recommended" => Some(Self::Recommended),
            "strict" => Some(Self::Strict),
            "minimal" => Some(Self::Minimal),
            _ => None,
        }
    }

    /// The preset selected by `config`, falling back to `Recommended` when
    /// none is set or the name is unknown.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        match config.preset.as_deref() {
            None => Self::Recommended,
            Some(name) => Self::from_name(name).unwrap_or_else(|| {
                warn!("Unknown preset '{}', using recommended", name);
                Self::Recommended
            }),
        }
    }

    /// The config name of this preset.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Recommended => "recommended",
            Self::Strict => "strict",
            Self::Minimal => "minimal",
        }
    }

    /// Returns the rules for this preset.
    #[must_use]
    pub fn rules(self) -> Vec<RuleBox> {
        match self {
            Self::Recommended => recommended_rules(),
            Self::Strict => strict_rules(),
            Self::Minimal => minimal_rules(),
        }
    }

    /// Checks whether the preset turns on the rule named `name`.
    #[must_use]
    pub fn includes(self, name: &str) -> bool {
        match self {
            Self::Strict => true,
            Self::Recommended => name != misplaced_logic::NAME,
            Self::Minimal => name == namespaced_active_record::NAME,
        }
    }
}

/// Returns the recommended set of rules.
///
/// Includes every rule except `misplaced-logic` (NB008), which reports
/// every file it runs on and only makes sense with project-specific
/// `exclude` patterns.
#[must_use]
pub fn recommended_rules() -> Vec<RuleBox> {
    preset_rules(Preset::Recommended)
}

/// Returns the strict set of rules: all of them.
#[must_use]
pub fn strict_rules() -> Vec<RuleBox> {
    all_rules()
}

/// Returns the minimal set of rules.
///
/// For gradual adoption, only includes `namespaced-active-record` (NB001).
#[must_use]
pub fn minimal_rules() -> Vec<RuleBox> {
    preset_rules(Preset::Minimal)
}

/// Returns all available rules with default settings.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    build_rules(&RulePolicy::default(), Vec::new())
}

fn preset_rules(preset: Preset) -> Vec<RuleBox> {
    all_rules()
        .into_iter()
        .filter(|rule| preset.includes(rule.name()))
        .collect()
}

fn build_rules(policy: &RulePolicy, allowed_locations: Vec<String>) -> Vec<RuleBox> {
    vec![
        Box::new(NamespacedActiveRecord::with_policy(policy.clone())),
        Box::new(ActiveRecordThroughBusiness::with_policy(policy.clone())),
        Box::new(BranchingLogic::new()),
        Box::new(BinaryOperation::new()),
        Box::new(OneControllerActionInstanceVariable::new()),
        Box::new(StandardRestfulControllerActions::new()),
        Box::new(RailsAppTypeNotAllowed::new()),
        Box::new(MisplacedLogic::new().allowed(allowed_locations)),
    ]
}

/// Builds the rule set described by `config`.
///
/// The preset (default `recommended`) picks the rules; a rule outside the
/// preset is added when its table says `enabled = true`.
#[must_use]
pub fn configured_rules(config: &Config) -> Vec<RuleBox> {
    let preset = Preset::from_config(config);

    all_rules_with_config(config)
        .into_iter()
        .filter(|rule| {
            preset.includes(rule.name())
                || config.rules.get(rule.name()).and_then(|c| c.enabled) == Some(true)
        })
        .collect()
}

/// Builds every rule, configured from `config` but regardless of preset.
///
/// The namespace policy is resolved once from the
/// `namespaced-active-record` table and shared by both ActiveRecord rules.
#[must_use]
pub fn all_rules_with_config(config: &Config) -> Vec<RuleBox> {
    let policy = RulePolicy::resolve(config.rules.get(namespaced_active_record::NAME));
    debug!(
        "Namespace policy: {} for {:?}",
        policy.required_namespace(),
        policy.accepted_superclasses()
    );

    let allowed_locations = config
        .rules
        .get(misplaced_logic::NAME)
        .map(|c| c.exclude.clone())
        .unwrap_or_default();

    for name in config.rules.keys() {
        if !RULE_NAMES.contains(&name.as_str()) {
            warn!("Unknown rule '{}' in configuration", name);
        }
    }

    build_rules(&policy, allowed_locations)
}

/// Names of every built-in rule, in code order.
pub const RULE_NAMES: &[&str] = &[
    namespaced_active_record::NAME,
    active_record_through_business::NAME,
    branching_logic::NAME,
    binary_operation::NAME,
    one_controller_action_instance_variable::NAME,
    standard_restful_controller_actions::NAME,
    rails_app_type_not_allowed::NAME,
    misplaced_logic::NAME,
];

/// The built-in configuration every config file is layered on.
///
/// # Errors
///
/// Returns an error if the embedded defaults fail to parse.
pub fn default_config() -> Result<Config, ConfigError> {
    Config::parse(DEFAULT_CONFIG)
}
