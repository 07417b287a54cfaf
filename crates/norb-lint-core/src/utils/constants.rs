//! Constant-path matching.
//!
//! Classes refer to their namespace either through nested `module` blocks or
//! through compact paths such as `Ar::Article`. Both shapes normalize to a
//! flat list of simple identifiers here, so callers compare names rather than
//! source text.

use crate::syntax::{Identifier, SyntaxNode};

/// Returns the segments of a constant reference.
///
/// `ActiveRecord::Base` yields `["ActiveRecord", "Base"]`. Any node that is
/// not a constant reference yields an empty vector.
#[must_use]
pub fn const_path(node: &SyntaxNode) -> Vec<Identifier> {
    node.const_path().to_vec()
}

/// Returns the leading segment of a compact constant path.
///
/// For `Ar::Email::Article` this is `Ar`; a bare `Article` or a
/// non-constant node has none.
#[must_use]
pub fn compact_root(node: &SyntaxNode) -> Option<&Identifier> {
    match node.const_path() {
        [first, _, ..] => Some(first),
        _ => None,
    }
}

/// Collects the segments of every constant reference declared directly
/// within `node`.
///
/// The search covers `node`'s whole subtree but does not enter nested
/// class or module declarations, so an inner class never leaks its constant
/// references into an outer one. `node` itself may be a declaration.
#[must_use]
pub fn search_constants(node: &SyntaxNode) -> Vec<Identifier> {
    search_constants_until(node, |child| child.kind().is_declaration())
}

/// Like [`search_constants`], with a caller-supplied boundary.
///
/// `stop` is consulted for every descendant (never for `node` itself); a
/// descendant for which it returns true is skipped together with its
/// subtree.
pub fn search_constants_until<F>(node: &SyntaxNode, stop: F) -> Vec<Identifier>
where
    F: Fn(&SyntaxNode) -> bool,
{
    let mut found = Vec::new();
    collect(node, &stop, &mut found);
    found
}

fn collect<F>(node: &SyntaxNode, stop: &F, found: &mut Vec<Identifier>)
where
    F: Fn(&SyntaxNode) -> bool,
{
    found.extend(const_path(node));
    for child in node.children() {
        if !stop(child) {
            collect(child, stop, found);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{NodeKind, Span};

    fn ids(names: &[&str]) -> Vec<Identifier> {
        names.iter().copied().map(Identifier::from).collect()
    }

    fn constant(path: &[&str]) -> SyntaxNode {
        SyntaxNode::constant(path.iter().copied(), Span::default())
    }

    #[test]
    fn const_path_of_qualified_reference() {
        assert_eq!(
            const_path(&constant(&["ActiveRecord", "Base"])),
            ids(&["ActiveRecord", "Base"])
        );
    }

    #[test]
    fn const_path_of_other_node_is_empty() {
        let send = SyntaxNode::new(NodeKind::Send, Span::default()).with_name("new");
        assert!(const_path(&send).is_empty());
    }

    #[test]
    fn compact_root_is_first_of_several_segments() {
        assert_eq!(
            compact_root(&constant(&["Blog", "Ar", "Article"])),
            Some(&Identifier::from("Blog"))
        );
        assert_eq!(compact_root(&constant(&["Article"])), None);
        assert_eq!(
            compact_root(&SyntaxNode::new(NodeKind::Send, Span::default())),
            None
        );
    }

    #[test]
    fn search_finds_nested_references() {
        // Struct.new(Foo::Bar)
        let send = SyntaxNode::new(NodeKind::Send, Span::default())
            .with_name("new")
            .with_receiver(constant(&["Struct"]))
            .with_child(constant(&["Foo", "Bar"]));

        assert_eq!(search_constants(&send), ids(&["Struct", "Foo", "Bar"]));
    }

    #[test]
    fn search_stops_at_nested_declarations() {
        let inner = SyntaxNode::new(NodeKind::Class, Span::default())
            .with_identifier(constant(&["Inner"]))
            .with_superclass(constant(&["Leaked"]));
        let outer = SyntaxNode::new(NodeKind::Module, Span::default())
            .with_identifier(constant(&["Outer"]))
            .with_child(inner);

        assert_eq!(search_constants(&outer), ids(&["Outer"]));
    }

    #[test]
    fn search_root_declaration_is_entered() {
        let class = SyntaxNode::new(NodeKind::Class, Span::default())
            .with_identifier(constant(&["Article", "Comment"]));
        assert_eq!(search_constants(&class), ids(&["Article", "Comment"]));
    }

    #[test]
    fn custom_boundary() {
        let block = SyntaxNode::new(NodeKind::Block, Span::default())
            .with_child(constant(&["Hidden"]));
        let send = SyntaxNode::new(NodeKind::Send, Span::default())
            .with_receiver(constant(&["Visible"]))
            .with_child(block);

        let found = search_constants_until(&send, |n| n.kind() == NodeKind::Block);
        assert_eq!(found, ids(&["Visible"]));
    }
}
