//! # norb-lint-rules
//!
//! Built-in architecture rules for Ruby on Rails code bases.
//!
//! The centerpiece is `namespaced-active-record`: classes extending an
//! ActiveRecord superclass must live inside one namespace module (`Ar` by
//! default), which keeps persistence apart from business objects. The other
//! rules keep Rails plumbing thin.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | NB001 | `namespaced-active-record` | ActiveRecord classes must be nested in the namespace |
//! | NB002 | `active-record-through-business` | No direct references to the namespace outside business code |
//! | NB003 | `branching-logic` | No conditionals, `case`, `rescue` or boolean operators |
//! | NB004 | `binary-operation` | No comparison, arithmetic or bitwise operators |
//! | NB005 | `one-controller-action-instance-variable` | Actions set at most one `@ivar` |
//! | NB006 | `standard-restful-controller-actions` | Only `index show new edit create update destroy` |
//! | NB007 | `rails-app-type-not-allowed` | No code in unlisted `app/<type>` directories |
//! | NB008 | `misplaced-logic` | Code only in the permitted locations |
//!
//! ## Usage
//!
//! ```ignore
//! use norb_lint_core::Analyzer;
//! use norb_lint_rules::{configured_rules, default_config};
//! use norb_lint_ruby::RubyParser;
//!
//! let config = default_config()?;
//! let analyzer = Analyzer::builder()
//!     .root(".")
//!     .parser(RubyParser::new())
//!     .rules(configured_rules(&config))
//!     .config(config)
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod active_record_through_business;
pub mod binary_operation;
pub mod branching_logic;
pub mod misplaced_logic;
pub mod namespaced_active_record;
pub mod one_controller_action_instance_variable;
mod policy;
mod presets;
pub mod rails_app_type_not_allowed;
pub mod standard_restful_controller_actions;
mod visibility;

pub use active_record_through_business::ActiveRecordThroughBusiness;
pub use binary_operation::BinaryOperation;
pub use branching_logic::BranchingLogic;
pub use misplaced_logic::MisplacedLogic;
pub use namespaced_active_record::{contributed_namespaces, ClassType, NamespacedActiveRecord};
pub use one_controller_action_instance_variable::OneControllerActionInstanceVariable;
pub use policy::{RulePolicy, NAMESPACE_KEY, SUPERCLASSES_KEY};
pub use presets::{
    all_rules, all_rules_with_config, configured_rules, default_config, minimal_rules,
    recommended_rules, strict_rules, Preset, RULE_NAMES,
};
pub use rails_app_type_not_allowed::RailsAppTypeNotAllowed;
pub use standard_restful_controller_actions::StandardRestfulControllerActions;

/// Re-export core types for convenience.
pub use norb_lint_core::{Rule, Severity, Violation};
