use petgraph::graph::NodeIndex;
use std::ops::{Index, IndexMut};

/// Search bookkeeping of a single node.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NodeState {
    /// Cost of the best known route from the start.
    pub g: f32,
    /// Estimated remaining cost to the goal.
    pub h: f32,
    pub visited: bool,
    /// Node this one was reached from, [None] for the start and undiscovered nodes.
    pub parent: Option<NodeIndex>,
}

impl NodeState {
    pub fn f(&self) -> f32 {
        self.g + self.h
    }
}

/// Per-search table of [NodeState] indexed by node, kept apart from the model so the model
/// itself is never mutated by a search.
#[derive(Clone, Debug, Default)]
pub struct SearchState {
    nodes: Vec<NodeState>,
}

impl SearchState {
    pub fn new(node_count: usize) -> SearchState {
        SearchState {
            nodes: vec![NodeState::default(); node_count],
        }
    }
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
    /// Number of nodes discovered so far.
    pub fn visited_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.visited).count()
    }
}

impl Index<NodeIndex> for SearchState {
    type Output = NodeState;
    fn index(&self, index: NodeIndex) -> &NodeState {
        &self.nodes[index.index()]
    }
}

impl IndexMut<NodeIndex> for SearchState {
    fn index_mut(&mut self, index: NodeIndex) -> &mut NodeState {
        &mut self.nodes[index.index()]
    }
}
