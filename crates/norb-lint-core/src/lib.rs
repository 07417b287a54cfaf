//! # norb-lint-core
//!
//! Core framework for linting the architecture of Ruby on Rails code bases.
//!
//! This crate is parser-agnostic. It provides:
//!
//! - [`SyntaxNode`] / [`SyntaxTree`], the read-only tree rules inspect
//! - [`SourceParser`], the seam a language crate implements
//! - [`Rule`] trait for per-file rules, plus a [`visit::Visit`] walker
//! - [`utils`] for constant-path matching, scope walking and allow directives
//! - [`Analyzer`] for orchestrating lint execution
//! - [`Violation`] for representing lint findings
//!
//! ## Example
//!
//! ```ignore
//! use norb_lint_core::Analyzer;
//! use norb_lint_ruby::RubyParser;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./app")
//!     .parser(RubyParser::new())
//!     .rule(MyRule::new())
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! println!("{}", result.summary());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod parser;
mod rule;
mod syntax;
mod types;

/// Utility modules for rule implementations.
pub mod utils;
pub mod visit;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig};
pub use context::FileContext;
pub use parser::{ParseError, SourceParser};
pub use rule::{Rule, RuleBox};
pub use syntax::{Identifier, NodeKind, Span, SyntaxNode, SyntaxTree};
pub use types::{LintResult, Location, Severity, Suggestion, Violation, ViolationDiagnostic};
pub use utils::allowance::AllowCheck;
