//! Scope walking over declarations.

use crate::syntax::SyntaxNode;

/// Returns the class and module declarations met before `target` in a
/// document-order walk of `root`.
///
/// Every declaration the walk enters before reaching `target` is collected,
/// so the chain holds `target`'s lexical ancestors (outermost first) along
/// with any declaration that opened and closed earlier in the file. The walk
/// stops at the first node that is `target` (by identity, not by value), and
/// `target` itself is never part of the result. A target that does not occur
/// under `root` yields an empty chain.
#[must_use]
pub fn enclosing_scopes<'a>(root: &'a SyntaxNode, target: &SyntaxNode) -> Vec<&'a SyntaxNode> {
    let mut seen = Vec::new();
    if walk(root, target, &mut seen) {
        seen
    } else {
        Vec::new()
    }
}

fn walk<'a>(node: &'a SyntaxNode, target: &SyntaxNode, seen: &mut Vec<&'a SyntaxNode>) -> bool {
    if std::ptr::eq(node, target) {
        return true;
    }
    if node.kind().is_declaration() {
        seen.push(node);
    }
    node.children().iter().any(|child| walk(child, target, seen))
}
