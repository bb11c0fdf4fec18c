//! MCTS node types for tree storage.
//!
//! Nodes live in an arena and refer to their parent and children by index,
//! so ownership stays with the tree.

use abalone_core::Side;

/// Index into the node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The root node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

/// Playout statistics of a node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NodeStats {
    /// Playouts that passed through this node
    pub visits: u32,
    /// Decisive playouts won, indexed by `Side::index()`
    pub wins: [u32; 2],
}

impl NodeStats {
    /// Record one playout; `None` is an undecided result.
    pub fn record(&mut self, winner: Option<Side>) {
        self.visits += 1;
        if let Some(side) = winner {
            self.wins[side.index()] += 1;
        }
    }

    /// Fraction of playouts won by `side`, 0 for an unvisited node.
    pub fn win_rate(&self, side: Side) -> f32 {
        if self.visits == 0 {
            0.0
        } else {
            self.wins[side.index()] as f32 / self.visits as f32
        }
    }

    /// UCT score seen from `root_side`.
    ///
    /// `mean + c * sqrt(ln(parent_visits + 1) / visits)`; an unvisited node
    /// scores infinity so it is tried before any visited sibling.
    pub fn uct(&self, parent_visits: u32, root_side: Side, exploration: f32) -> f32 {
        if self.visits == 0 {
            return f32::INFINITY;
        }
        let visits = self.visits as f32;
        let explore = ((parent_visits as f32 + 1.0).ln() / visits).sqrt();
        self.win_rate(root_side) + exploration * explore
    }
}

/// A node in the MCTS tree.
#[derive(Clone, Debug)]
pub struct Node<S, A> {
    pub state: S,
    /// Move that led here (`None` for the root)
    pub action: Option<A>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub stats: NodeStats,
    /// Children have been generated (a terminal node expands to none)
    pub expanded: bool,
}

impl<S, A> Node<S, A> {
    pub fn new(state: S, action: Option<A>, parent: Option<NodeId>) -> Self {
        Self {
            state,
            action,
            parent,
            children: Vec::new(),
            stats: NodeStats::default(),
            expanded: false,
        }
    }
}
