//! Depth-first tree traversal with in-place node substitution.

use crate::tree::{Node, NodeKind};

/// Summary of an ancestor handed to splice callbacks.
///
/// The ancestor itself is not reachable while its children are being
/// rewritten, so only its kind and hinted element name are exposed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ancestor {
    /// Ancestor node kind.
    pub kind: NodeKind,
    /// Element name from the ancestor's render hint, if any.
    pub element: Option<String>,
}

impl Ancestor {
    fn of(node: &Node) -> Self {
        Self {
            kind: node.kind(),
            element: node.hint().and_then(|hint| hint.element.clone()),
        }
    }
}

/// Outcome of a splice callback for a single child.
#[derive(Debug)]
pub enum Rewrite {
    /// Keep the node (possibly mutated) and descend into it.
    Keep(Node),
    /// Replace the node with zero or more nodes. Replacements are not visited.
    Replace(Vec<Node>),
}

/// Visits every node in pre-order. The callback runs before the node's
/// children are visited, so children it installs are walked too.
pub fn visit_mut<F>(node: &mut Node, f: &mut F)
where
    F: FnMut(&mut Node),
{
    f(node);
    if let Some(children) = node.children_mut() {
        for child in children.iter_mut() {
            visit_mut(child, f);
        }
    }
}

/// Rewrites every descendant of `root` (not `root` itself), letting the
/// callback splice each child into zero or more nodes.
///
/// The callback receives the chain of ancestors from `root` down to the
/// child's parent.
pub fn splice_mut<F>(root: &mut Node, f: &mut F)
where
    F: FnMut(Node, &[Ancestor]) -> Rewrite,
{
    let mut ancestors = Vec::new();
    splice_children(root, &mut ancestors, f);
}

fn splice_children<F>(node: &mut Node, ancestors: &mut Vec<Ancestor>, f: &mut F)
where
    F: FnMut(Node, &[Ancestor]) -> Rewrite,
{
    let ancestor = Ancestor::of(node);
    let Some(children) = node.children_mut() else {
        return;
    };

    ancestors.push(ancestor);
    let previous = std::mem::take(children);
    let mut next = Vec::with_capacity(previous.len());
    for child in previous {
        match f(child, ancestors) {
            Rewrite::Keep(mut kept) => {
                splice_children(&mut kept, ancestors, f);
                next.push(kept);
            }
            Rewrite::Replace(nodes) => next.extend(nodes),
        }
    }
    *children = next;
    ancestors.pop();
}
