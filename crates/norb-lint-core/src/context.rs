//! Context types for rule execution.

use crate::syntax::Span;
use crate::types::Location;
use std::path::{Path, PathBuf};

/// Context provided to per-file rules.
#[derive(Debug, Clone)]
pub struct FileContext<'a> {
    /// Absolute path to the file.
    pub path: &'a Path,
    /// File contents as a string.
    pub content: &'a str,
    /// Path relative to the analysis root.
    pub relative_path: PathBuf,
}

impl<'a> FileContext<'a> {
    /// Creates a new file context.
    #[must_use]
    pub fn new(path: &'a Path, content: &'a str, root: &Path) -> Self {
        let relative_path = path
            .strip_prefix(root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);

        Self {
            path,
            content,
            relative_path,
        }
    }

    /// Relative path with `/` separators, as matched by include/exclude
    /// patterns and path-based rules.
    #[must_use]
    pub fn relative_str(&self) -> String {
        self.relative_path
            .components()
            .filter_map(|c| match c {
                std::path::Component::Normal(s) => Some(s.to_string_lossy()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Builds the reported location of a node.
    #[must_use]
    pub fn location(&self, span: Span) -> Location {
        Location::from_span(self.relative_path.clone(), span)
    }

    /// Location of the start of the file, for file-level findings.
    #[must_use]
    pub fn file_location(&self) -> Location {
        Location::new(self.relative_path.clone(), 1, 1)
    }
}
