//! Lowering from the tree-sitter Ruby grammar to [`SyntaxNode`]s.
//!
//! Only the shapes rules reason about get their own [`NodeKind`]; every
//! other named node becomes [`NodeKind::Other`] and keeps its children.
//! Anonymous tokens (keywords, punctuation, operators) never become nodes.

use norb_lint_core::{NodeKind, Span, SyntaxNode};
use tree_sitter::Node;

/// Lowers one parsed file.
pub(crate) struct Lowering<'src> {
    src: &'src [u8],
}

impl<'src> Lowering<'src> {
    pub(crate) fn new(src: &'src [u8]) -> Self {
        Self { src }
    }

    /// Lowers the `program` root.
    pub(crate) fn program(&self, root: Node<'_>) -> SyntaxNode {
        SyntaxNode::new(NodeKind::Program, span(root)).with_children(self.children(root, false))
    }

    fn text(&self, node: Node<'_>) -> &'src str {
        node.utf8_text(self.src).unwrap_or("")
    }

    /// Lowers a node into zero or more nodes.
    ///
    /// Statement and argument containers are spliced into their parent so
    /// that a class's methods and a call's arguments are direct children.
    /// `target` marks assignment-target position.
    fn lower(&self, node: Node<'_>, target: bool) -> Vec<SyntaxNode> {
        match node.kind() {
            "comment" => Vec::new(),
            "body_statement" | "block_body" | "argument_list" | "then" => {
                self.children(node, target)
            }
            _ => vec![self.lower_one(node, target)],
        }
    }

    fn lower_one(&self, node: Node<'_>, target: bool) -> SyntaxNode {
        match node.kind() {
            "class" => self.declaration(node, NodeKind::Class),
            "module" => self.declaration(node, NodeKind::Module),
            "singleton_class" => self.wrap(NodeKind::SingletonClass, node, false),
            "constant" | "scope_resolution" => self.constant(node),
            "method" => self.method(node, NodeKind::MethodDef),
            "singleton_method" => self.method(node, NodeKind::SingletonMethodDef),
            "call" => self.call(node),
            "identifier" => SyntaxNode::new(NodeKind::Send, span(node)).with_name(self.text(node)),
            "binary" => self.binary(node),
            "unary" | "parenthesized_unary" => self.unary(node),
            "if" | "unless" | "elsif" | "if_modifier" | "unless_modifier" | "conditional" => {
                self.wrap(NodeKind::If, node, false)
            }
            "case" | "case_match" => self.wrap(NodeKind::Case, node, false),
            "rescue" | "rescue_modifier" => self.wrap(NodeKind::Rescue, node, false),
            "do_block" | "block" => self.wrap(NodeKind::Block, node, false),
            "assignment" | "operator_assignment" => self.assignment(node),
            "left_assignment_list" | "destructured_left_assignment" | "rest_assignment" => {
                self.wrap(NodeKind::Other, node, target)
            }
            "instance_variable" if target => {
                SyntaxNode::new(NodeKind::IvarAssign, span(node)).with_name(self.text(node))
            }
            _ => self.wrap(NodeKind::Other, node, false),
        }
    }

    fn children(&self, node: Node<'_>, target: bool) -> Vec<SyntaxNode> {
        named_children(node)
            .into_iter()
            .flat_map(|(_, child)| self.lower(child, target))
            .collect()
    }

    fn wrap(&self, kind: NodeKind, node: Node<'_>, target: bool) -> SyntaxNode {
        SyntaxNode::new(kind, span(node)).with_children(self.children(node, target))
    }

    fn declaration(&self, node: Node<'_>, kind: NodeKind) -> SyntaxNode {
        let mut decl = SyntaxNode::new(kind, span(node));
        for (field, child) in named_children(node) {
            decl = match field {
                Some("name") => decl.with_identifier(self.lower_one(child, false)),
                Some("superclass") => match named_children(child).into_iter().next() {
                    Some((_, expr)) => decl.with_superclass(self.lower_one(expr, false)),
                    None => decl,
                },
                _ => decl.with_children(self.lower(child, false)),
            };
        }
        decl
    }

    fn constant(&self, node: Node<'_>) -> SyntaxNode {
        let mut segments = Vec::new();
        let mut rest = Vec::new();
        self.flatten_constant(node, &mut segments, &mut rest);
        SyntaxNode::constant(segments, span(node)).with_children(rest)
    }

    /// Collects `A::B::C` into segments; a non-constant scope such as
    /// `record.class::C` is lowered as a child instead.
    fn flatten_constant(&self, node: Node<'_>, segments: &mut Vec<&'src str>, rest: &mut Vec<SyntaxNode>) {
        match node.kind() {
            "constant" => segments.push(self.text(node)),
            "scope_resolution" => {
                for (field, child) in named_children(node) {
                    match field {
                        Some("scope") => self.flatten_constant(child, segments, rest),
                        Some("name") if child.kind() == "constant" => {
                            segments.push(self.text(child));
                        }
                        _ => rest.extend(self.lower(child, false)),
                    }
                }
            }
            _ => rest.extend(self.lower(node, false)),
        }
    }

    fn method(&self, node: Node<'_>, kind: NodeKind) -> SyntaxNode {
        let mut def = SyntaxNode::new(kind, span(node));
        for (field, child) in named_children(node) {
            def = match field {
                Some("name") => def.with_name(self.text(child)),
                Some("object") => def,
                _ => def.with_children(self.lower(child, false)),
            };
        }
        def
    }

    fn call(&self, node: Node<'_>) -> SyntaxNode {
        let mut send = SyntaxNode::new(NodeKind::Send, span(node));
        let mut name = "call";
        for (field, child) in named_children(node) {
            send = match field {
                Some("method") => {
                    name = self.text(child);
                    send
                }
                Some("receiver") => send.with_receiver(self.lower_one(child, false)),
                _ => send.with_children(self.lower(child, false)),
            };
        }
        send.with_name(name)
    }

    fn binary(&self, node: Node<'_>) -> SyntaxNode {
        let operator = node
            .child_by_field_name("operator")
            .map_or("", |op| self.text(op));

        let kind = match operator {
            "and" | "&&" => NodeKind::And,
            "or" | "||" => NodeKind::Or,
            _ => NodeKind::Send,
        };

        let mut lowered = SyntaxNode::new(kind, span(node));
        if kind == NodeKind::Send {
            lowered = lowered.with_name(operator);
        }
        for (field, child) in named_children(node) {
            lowered = match field {
                Some("left") if kind == NodeKind::Send => {
                    lowered.with_receiver(self.lower_one(child, false))
                }
                _ => lowered.with_children(self.lower(child, false)),
            };
        }
        lowered
    }

    fn unary(&self, node: Node<'_>) -> SyntaxNode {
        let operator = node
            .child_by_field_name("operator")
            .map_or("", |op| self.text(op));
        let name = match operator {
            "!" | "not" => "!",
            "-" => "-@",
            "+" => "+@",
            other => other,
        };

        let mut send = SyntaxNode::new(NodeKind::Send, span(node)).with_name(name);
        for (field, child) in named_children(node) {
            send = match field {
                Some("operand") => send.with_receiver(self.lower_one(child, false)),
                _ => send.with_children(self.lower(child, false)),
            };
        }
        send
    }

    fn assignment(&self, node: Node<'_>) -> SyntaxNode {
        let mut assign = SyntaxNode::new(NodeKind::Other, span(node));
        for (field, child) in named_children(node) {
            let target = field == Some("left");
            assign = assign.with_children(self.lower(child, target));
        }
        assign
    }
}

/// Named children of `node` with the field each occupies.
fn named_children(node: Node<'_>) -> Vec<(Option<&'static str>, Node<'_>)> {
    let mut children = Vec::new();
    let mut cursor = node.walk();
    if cursor.goto_first_child() {
        loop {
            let child = cursor.node();
            if child.is_named() {
                children.push((cursor.field_name(), child));
            }
            if !cursor.goto_next_sibling() {
                break;
            }
        }
    }
    children
}

/// First `ERROR` or missing node in document order.
pub(crate) fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find_map(first_error);
    found
}

fn span(node: Node<'_>) -> Span {
    let start = node.start_position();
    Span::new(node.start_byte(), node.end_byte(), start.row + 1, start.column + 1)
}
