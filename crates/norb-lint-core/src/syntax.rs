//! Read-only syntax tree handed to rules.
//!
//! Parsers lower their concrete trees into [`SyntaxNode`]s so that rules never
//! depend on a particular grammar. The tree is a strict ownership hierarchy:
//! every node owns its children, there are no parent links, and nothing in
//! the tree is mutated after the parser hands it over.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A simple (unqualified) constant name, e.g. `Base` in `ActiveRecord::Base`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Creates an identifier from a simple name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identifier {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Identifier {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Identifier {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Identifier {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Location of a node in its source file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    /// Byte offset of the first byte.
    pub start: usize,
    /// Byte offset one past the last byte.
    pub end: usize,
    /// Line of the first byte (1-indexed).
    pub line: usize,
    /// Column of the first byte (1-indexed).
    pub column: usize,
}

impl Span {
    /// Creates a span.
    #[must_use]
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    /// Length of the span in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true for a zero-width span.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Closed set of node kinds rules can reason about.
///
/// Anything a rule has no use for is lowered to [`NodeKind::Other`] and only
/// contributes its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// File root.
    Program,
    /// `class Name < Superclass ... end`
    Class,
    /// `module Name ... end`
    Module,
    /// `class << self ... end`
    SingletonClass,
    /// A (possibly qualified) constant reference such as `ActiveRecord::Base`.
    Const,
    /// `def name ... end`
    MethodDef,
    /// `def self.name ... end`
    SingletonMethodDef,
    /// A method call, including operator calls like `a + b` and `!a`.
    Send,
    /// `a && b`, `a and b`
    And,
    /// `a || b`, `a or b`
    Or,
    /// `if`, `unless`, `elsif`, modifier forms and the ternary operator.
    If,
    /// `case ... when` and `case ... in`
    Case,
    /// A `rescue` clause or `expr rescue fallback`.
    Rescue,
    /// Assignment to an instance variable (`@x = ...`, `@x ||= ...`).
    IvarAssign,
    /// `do ... end` and `{ ... }` blocks.
    Block,
    /// Any other construct.
    Other,
}

impl NodeKind {
    /// Returns true for kinds that open a named lexical namespace.
    #[must_use]
    pub fn is_declaration(self) -> bool {
        matches!(self, Self::Class | Self::Module)
    }
}

/// A node of the lowered syntax tree.
///
/// Children are kept in document order. Role-bearing children (a class's
/// identifier and superclass, a send's receiver) live in `children` too and
/// are addressed by index, so a plain walk over `children` sees every node
/// exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    kind: NodeKind,
    span: Span,
    children: Vec<SyntaxNode>,
    identifier: Option<usize>,
    superclass: Option<usize>,
    receiver: Option<usize>,
    const_path: Vec<Identifier>,
    name: Option<String>,
}

impl SyntaxNode {
    /// Creates a childless node.
    #[must_use]
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Self {
            kind,
            span,
            children: Vec::new(),
            identifier: None,
            superclass: None,
            receiver: None,
            const_path: Vec::new(),
            name: None,
        }
    }

    /// Creates a constant reference from its segments.
    #[must_use]
    pub fn constant<I, S>(segments: I, span: Span) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Identifier>,
    {
        Self::new(NodeKind::Const, span).with_const_path(segments)
    }

    /// Appends the declaration's name node.
    #[must_use]
    pub fn with_identifier(mut self, node: SyntaxNode) -> Self {
        self.identifier = Some(self.children.len());
        self.children.push(node);
        self
    }

    /// Appends the class's superclass expression.
    #[must_use]
    pub fn with_superclass(mut self, node: SyntaxNode) -> Self {
        self.superclass = Some(self.children.len());
        self.children.push(node);
        self
    }

    /// Appends the send's receiver expression.
    #[must_use]
    pub fn with_receiver(mut self, node: SyntaxNode) -> Self {
        self.receiver = Some(self.children.len());
        self.children.push(node);
        self
    }

    /// Appends an ordinary child.
    #[must_use]
    pub fn with_child(mut self, node: SyntaxNode) -> Self {
        self.children.push(node);
        self
    }

    /// Appends ordinary children.
    #[must_use]
    pub fn with_children(mut self, nodes: impl IntoIterator<Item = SyntaxNode>) -> Self {
        self.children.extend(nodes);
        self
    }

    /// Sets the constant path segments.
    #[must_use]
    pub fn with_const_path<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Identifier>,
    {
        self.const_path = segments.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the method, operator, or variable name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Kind tag.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Source span.
    #[must_use]
    pub fn span(&self) -> Span {
        self.span
    }

    /// All children in document order.
    #[must_use]
    pub fn children(&self) -> &[SyntaxNode] {
        &self.children
    }

    /// Name node of a class or module declaration.
    #[must_use]
    pub fn identifier(&self) -> Option<&SyntaxNode> {
        self.identifier.and_then(|i| self.children.get(i))
    }

    /// Superclass expression of a class declaration.
    #[must_use]
    pub fn superclass(&self) -> Option<&SyntaxNode> {
        self.superclass.and_then(|i| self.children.get(i))
    }

    /// Receiver of a send.
    #[must_use]
    pub fn receiver(&self) -> Option<&SyntaxNode> {
        self.receiver.and_then(|i| self.children.get(i))
    }

    /// Children other than the declaration's identifier.
    pub fn body(&self) -> impl Iterator<Item = &SyntaxNode> {
        let identifier = self.identifier;
        self.children
            .iter()
            .enumerate()
            .filter(move |(i, _)| Some(*i) != identifier)
            .map(|(_, child)| child)
    }

    /// Segments of a constant reference; empty for other kinds.
    #[must_use]
    pub fn const_path(&self) -> &[Identifier] {
        &self.const_path
    }

    /// Method, operator, or variable name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// A parsed source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTree {
    root: SyntaxNode,
}

impl SyntaxTree {
    /// Wraps a root node.
    #[must_use]
    pub fn new(root: SyntaxNode) -> Self {
        Self { root }
    }

    /// The `Program` node.
    #[must_use]
    pub fn root(&self) -> &SyntaxNode {
        &self.root
    }
}
