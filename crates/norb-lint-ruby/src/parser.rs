//! Ruby parser using Tree-sitter.

use norb_lint_core::{ParseError, SourceParser, SyntaxTree};
use tracing::trace;
use tree_sitter::{Language, Parser};

use crate::lower::{first_error, Lowering};

/// Parses Ruby source into a [`SyntaxTree`].
pub struct RubyParser {
    language: Language,
}

impl RubyParser {
    /// Creates a new Ruby parser.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_ruby::LANGUAGE.into(),
        }
    }
}

impl Default for RubyParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceParser for RubyParser {
    fn language_id(&self) -> &'static str {
        "ruby"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".rb", ".rake"]
    }

    fn parse(&self, source: &str) -> Result<SyntaxTree, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| ParseError::Language {
                language: "ruby",
                message: e.to_string(),
            })?;

        let tree = parser.parse(source, None).ok_or(ParseError::NoTree)?;
        let root = tree.root_node();

        if root.has_error() {
            let (line, column) = first_error(root).map_or((1, 1), |node| {
                let start = node.start_position();
                (start.row + 1, start.column + 1)
            });
            trace!("ruby syntax error at {}:{}", line, column);
            return Err(ParseError::Syntax { line, column });
        }

        Ok(SyntaxTree::new(Lowering::new(source.as_bytes()).program(root)))
    }
}
