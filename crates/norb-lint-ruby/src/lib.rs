//! # norb-lint-ruby
//!
//! Tree-sitter powered Ruby front end for norb-lint.
//!
//! [`RubyParser`] implements [`norb_lint_core::SourceParser`]: it parses
//! Ruby source with `tree-sitter-ruby` and lowers the concrete syntax tree
//! into the grammar-independent [`norb_lint_core::SyntaxTree`] that rules
//! inspect.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod lower;
pub mod parser;

pub use parser::RubyParser;
