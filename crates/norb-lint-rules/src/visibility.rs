//! Method visibility tracking for the controller action rules.

use norb_lint_core::{NodeKind, SyntaxNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visibility {
    Public,
    NonPublic,
}

/// Returns every public instance method definition under `root`, in
/// document order.
///
/// A bare `private` or `protected` in a body hides the definitions after it
/// until a bare `public`. `private def x` hides only `x`. Each class,
/// module and block body starts out public. Singleton methods and
/// `class << self` bodies are class-level and never returned.
#[must_use]
pub(crate) fn public_instance_methods(root: &SyntaxNode) -> Vec<&SyntaxNode> {
    let mut found = Vec::new();
    scan_body(&mut root.children().iter(), &mut found);
    found
}

fn scan_body<'a>(body: &mut dyn Iterator<Item = &'a SyntaxNode>, found: &mut Vec<&'a SyntaxNode>) {
    let mut visibility = Visibility::Public;

    for node in body {
        match node.kind() {
            NodeKind::MethodDef => {
                if visibility == Visibility::Public {
                    found.push(node);
                }
            }
            NodeKind::SingletonMethodDef | NodeKind::SingletonClass => {}
            NodeKind::Class | NodeKind::Module => scan_body(&mut node.body(), found),
            NodeKind::Send => match modifier(node) {
                Some(Modifier::Bare(next)) => visibility = next,
                Some(Modifier::Wrapping(Visibility::NonPublic)) => {
                    scan_body(&mut node.children().iter().filter(|c| !is_def(c)), found);
                }
                _ => scan_body(&mut node.children().iter(), found),
            },
            _ => scan_body(&mut node.children().iter(), found),
        }
    }
}

enum Modifier {
    /// `private` on its own line.
    Bare(Visibility),
    /// `private def x ... end`
    Wrapping(Visibility),
}

fn modifier(send: &SyntaxNode) -> Option<Modifier> {
    if send.receiver().is_some() {
        return None;
    }
    let visibility = match send.name()? {
        "public" => Visibility::Public,
        "private" | "protected" => Visibility::NonPublic,
        _ => return None,
    };
    if send.children().is_empty() {
        Some(Modifier::Bare(visibility))
    } else {
        Some(Modifier::Wrapping(visibility))
    }
}

fn is_def(node: &SyntaxNode) -> bool {
    matches!(
        node.kind(),
        NodeKind::MethodDef | NodeKind::SingletonMethodDef
    )
}
