//! Read-only chain of enclosing nodes, threaded down the walk.

use crate::model::{Node, NodeKind};

/// A node together with the chain of its ancestors.
///
/// Lives on the stack of the recursive walk; each frame borrows its parent's
/// frame, so no node needs a back-pointer.
#[derive(Debug, Clone, Copy)]
pub struct Ancestry<'a> {
    node: &'a Node,
    parent: Option<&'a Ancestry<'a>>,
}

impl<'a> Ancestry<'a> {
    /// Start a chain at a root node.
    pub fn root(node: &'a Node) -> Self {
        Self { node, parent: None }
    }

    /// Extend the chain with a child of the current node.
    pub fn child<'b>(&'b self, node: &'b Node) -> Ancestry<'b>
    where
        'a: 'b,
    {
        Ancestry {
            node,
            parent: Some(self),
        }
    }

    /// The current node.
    pub fn node(&self) -> &'a Node {
        self.node
    }

    /// The enclosing frame.
    pub fn parent(&self) -> Option<&'a Ancestry<'a>> {
        self.parent
    }

    /// The enclosing node.
    pub fn parent_node(&self) -> Option<&'a Node> {
        self.parent.map(|p| p.node)
    }

    /// The node two levels up.
    pub fn grandparent_node(&self) -> Option<&'a Node> {
        self.parent.and_then(Ancestry::parent_node)
    }

    /// Check the kind of the enclosing node.
    pub fn parent_is(&self, kind: &NodeKind) -> bool {
        self.parent_node().is_some_and(|p| &p.kind == kind)
    }

    /// Check the kind of the node two levels up.
    pub fn grandparent_is(&self, kind: &NodeKind) -> bool {
        self.grandparent_node().is_some_and(|p| &p.kind == kind)
    }
}
