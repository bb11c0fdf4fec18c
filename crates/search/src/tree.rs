//! Arena-allocated MCTS tree.
//!
//! Nodes are stored in a contiguous vector; parent and child links are
//! indices into it. The arena is reused across searches.

use crate::node::{Node, NodeId};

#[derive(Debug)]
pub struct Tree<S, A> {
    nodes: Vec<Node<S, A>>,
}

impl<S, A> Tree<S, A> {
    /// Create an empty tree; call [`Tree::reset`] before use.
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Drop every node and install a fresh root holding `state`.
    pub fn reset(&mut self, state: S) {
        self.nodes.clear();
        self.nodes.push(Node::new(state, None, None));
    }

    /// # Panics
    /// Panics if the NodeId is invalid.
    pub fn get(&self, id: NodeId) -> &Node<S, A> {
        &self.nodes[id.0]
    }

    /// # Panics
    /// Panics if the NodeId is invalid.
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node<S, A> {
        &mut self.nodes[id.0]
    }

    /// Add a child of `parent` and link it, returning its ID.
    pub fn add_child(&mut self, parent: NodeId, state: S, action: A) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(state, Some(action), Some(parent)));
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> &Node<S, A> {
        self.get(NodeId::ROOT)
    }
}

impl<S, A> Default for Tree<S, A> {
    fn default() -> Self {
        Self::new()
    }
}
