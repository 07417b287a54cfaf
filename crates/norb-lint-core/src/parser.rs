//! Parser seam.
//!
//! The analyzer never turns text into trees itself; a [`SourceParser`]
//! implementation (see the `norb-lint-ruby` crate) does.

use crate::syntax::SyntaxTree;
use thiserror::Error;

/// Errors a parser can report for one file.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The grammar could not be loaded into the parser.
    #[error("failed to load {language} grammar: {message}")]
    Language {
        /// Language identifier.
        language: &'static str,
        /// Loader message.
        message: String,
    },

    /// The parser gave up without producing a tree.
    #[error("parser produced no tree")]
    NoTree,

    /// The source contains a syntax error.
    #[error("syntax error at {line}:{column}")]
    Syntax {
        /// Line of the first error (1-indexed).
        line: usize,
        /// Column of the first error (1-indexed).
        column: usize,
    },
}

/// Turns source text into a [`SyntaxTree`].
///
/// Implementations must be stateless across calls: the analyzer shares one
/// parser between worker threads.
pub trait SourceParser: Send + Sync {
    /// Language identifier (e.g., `"ruby"`).
    fn language_id(&self) -> &'static str;

    /// File extensions this parser handles (e.g., `&[".rb"]`).
    fn extensions(&self) -> &'static [&'static str];

    /// Parses one file.
    ///
    /// # Errors
    ///
    /// Returns an error when the source cannot be parsed into a well-formed tree.
    fn parse(&self, source: &str) -> Result<SyntaxTree, ParseError>;
}
