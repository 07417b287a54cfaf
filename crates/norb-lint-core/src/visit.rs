//! Syntax tree traversal in the style of `syn::visit`.
//!
//! Each hook defaults to walking the node's children in document order.
//! Override the hooks a rule cares about and call the matching free
//! function (usually [`visit_children`]) to keep descending.

use crate::syntax::{NodeKind, SyntaxNode, SyntaxTree};

/// Visitor over a [`SyntaxTree`].
pub trait Visit<'ast> {
    /// Dispatches on the node kind.
    fn visit_node(&mut self, node: &'ast SyntaxNode) {
        visit_node(self, node);
    }

    /// `class ... end`
    fn visit_class(&mut self, node: &'ast SyntaxNode) {
        visit_children(self, node);
    }

    /// `module ... end`
    fn visit_module(&mut self, node: &'ast SyntaxNode) {
        visit_children(self, node);
    }

    /// `class << self ... end`
    fn visit_singleton_class(&mut self, node: &'ast SyntaxNode) {
        visit_children(self, node);
    }

    /// Constant reference.
    fn visit_const(&mut self, node: &'ast SyntaxNode) {
        visit_children(self, node);
    }

    /// Instance method definition.
    fn visit_method_def(&mut self, node: &'ast SyntaxNode) {
        visit_children(self, node);
    }

    /// Singleton method definition (`def self.x`).
    fn visit_singleton_method_def(&mut self, node: &'ast SyntaxNode) {
        visit_children(self, node);
    }

    /// Method or operator call.
    fn visit_send(&mut self, node: &'ast SyntaxNode) {
        visit_children(self, node);
    }

    /// `&&` / `and`
    fn visit_and(&mut self, node: &'ast SyntaxNode) {
        visit_children(self, node);
    }

    /// `||` / `or`
    fn visit_or(&mut self, node: &'ast SyntaxNode) {
        visit_children(self, node);
    }

    /// Conditional.
    fn visit_if(&mut self, node: &'ast SyntaxNode) {
        visit_children(self, node);
    }

    /// `case` expression.
    fn visit_case(&mut self, node: &'ast SyntaxNode) {
        visit_children(self, node);
    }

    /// `rescue` clause or modifier.
    fn visit_rescue(&mut self, node: &'ast SyntaxNode) {
        visit_children(self, node);
    }

    /// Instance variable assignment.
    fn visit_ivar_assign(&mut self, node: &'ast SyntaxNode) {
        visit_children(self, node);
    }

    /// Block.
    fn visit_block(&mut self, node: &'ast SyntaxNode) {
        visit_children(self, node);
    }
}

/// Routes `node` to the visitor hook for its kind.
pub fn visit_node<'ast, V>(v: &mut V, node: &'ast SyntaxNode)
where
    V: Visit<'ast> + ?Sized,
{
    match node.kind() {
        NodeKind::Class => v.visit_class(node),
        NodeKind::Module => v.visit_module(node),
        NodeKind::SingletonClass => v.visit_singleton_class(node),
        NodeKind::Const => v.visit_const(node),
        NodeKind::MethodDef => v.visit_method_def(node),
        NodeKind::SingletonMethodDef => v.visit_singleton_method_def(node),
        NodeKind::Send => v.visit_send(node),
        NodeKind::And => v.visit_and(node),
        NodeKind::Or => v.visit_or(node),
        NodeKind::If => v.visit_if(node),
        NodeKind::Case => v.visit_case(node),
        NodeKind::Rescue => v.visit_rescue(node),
        NodeKind::IvarAssign => v.visit_ivar_assign(node),
        NodeKind::Block => v.visit_block(node),
        NodeKind::Program | NodeKind::Other => visit_children(v, node),
    }
}

/// Visits every child of `node` in document order.
pub fn visit_children<'ast, V>(v: &mut V, node: &'ast SyntaxNode)
where
    V: Visit<'ast> + ?Sized,
{
    for child in node.children() {
        v.visit_node(child);
    }
}

/// Visits a declaration's children, skipping its name node.
pub fn visit_declaration_body<'ast, V>(v: &mut V, node: &'ast SyntaxNode)
where
    V: Visit<'ast> + ?Sized,
{
    for child in node.body() {
        v.visit_node(child);
    }
}

/// Visits a whole tree.
pub fn visit_tree<'ast, V>(v: &mut V, tree: &'ast SyntaxTree)
where
    V: Visit<'ast> + ?Sized,
{
    v.visit_node(tree.root());
}
