use petgraph::graph::NodeIndex;

/// Geometry of a single graph node. Search state lives in the planner, so a [Node] is a cheap
/// snapshot which can be copied into a [Route](crate::Route).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Node {
    /// External identifier, e.g. the id used by the map file the graph was loaded from.
    pub id: u64,
    pub x: f32,
    pub y: f32,
}

impl Node {
    pub fn new(id: u64, x: f32, y: f32) -> Node {
        Node { id, x, y }
    }
    /// Straight-line distance in model units.
    pub fn distance(&self, other: &Node) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// The graph a [RoutePlanner](crate::RoutePlanner) searches. Owns topology and geometry, nodes
/// are referred to by dense [NodeIndex] values in `0..node_count()`.
pub trait RouteModel {
    fn node_count(&self) -> usize;
    fn node(&self, index: NodeIndex) -> Node;
    /// Closest node to a position given as fractions of the map extent. Must be total over
    /// `[0, 1] x [0, 1]` for any non-empty model.
    fn find_closest_node(&self, x: f32, y: f32) -> Option<NodeIndex>;
    /// Computes and caches the neighbours of `node`. Calling it again is a no-op.
    fn find_neighbors(&mut self, node: NodeIndex);
    /// Cached neighbours of `node` with their distances, empty before [find_neighbors](Self::find_neighbors).
    fn neighbors(&self, node: NodeIndex) -> &[(NodeIndex, f32)];
    /// Symmetric, non-negative distance obeying the triangle inequality.
    fn distance(&self, a: NodeIndex, b: NodeIndex) -> f32 {
        self.node(a).distance(&self.node(b))
    }
    /// Factor converting model units to metres.
    fn metric_scale(&self) -> f32;
    /// Receives the result of a search for external consumption.
    fn set_path(&mut self, path: Vec<Node>);
    /// Cheap pre-check whether `goal` can be reached from `start`. [None] means the model does
    /// not know, which is the default, and lets the search find out.
    fn reachability(&self, _start: NodeIndex, _goal: NodeIndex) -> Option<bool> {
        None
    }
}
