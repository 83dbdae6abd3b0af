use crate::model::{Node, RouteModel};
use crate::{DEFAULT_METRIC_SCALE, N_SMALLVEC_SIZE};
use core::fmt;
use fxhash::FxBuildHasher;
use indexmap::IndexMap;
use log::{debug, info};
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;
type Neighbours = SmallVec<[(NodeIndex, f32); N_SMALLVEC_SIZE]>;

/// [RouteGraph] stores the road network as an undirected [UnGraph] whose node weights are
/// [Node] positions in fractions of the map extent. In addition it maintains information about
/// connected components using a [UnionFind] structure and a lazily filled neighbour cache.
/// Implements [RouteModel].
#[derive(Clone, Debug)]
pub struct RouteGraph {
    pub graph: UnGraph<Node, ()>,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
    /// Length in metres of one model unit.
    pub metric_scale: f32,
    ids: FxIndexMap<u64, NodeIndex>,
    neighbours: Vec<Option<Neighbours>>,
    path: Vec<Node>,
}

impl Default for RouteGraph {
    fn default() -> RouteGraph {
        RouteGraph {
            graph: UnGraph::default(),
            components: UnionFind::new(0),
            components_dirty: false,
            metric_scale: DEFAULT_METRIC_SCALE,
            ids: FxIndexMap::default(),
            neighbours: Vec::new(),
            path: Vec::new(),
        }
    }
}

impl RouteGraph {
    pub fn new() -> RouteGraph {
        RouteGraph::default()
    }
    pub fn with_metric_scale(metric_scale: f32) -> RouteGraph {
        RouteGraph {
            metric_scale,
            ..RouteGraph::default()
        }
    }
    /// Adds a node with external identifier `id` at `(x, y)`. Adding an identifier twice returns
    /// the index of the existing node and leaves its position untouched.
    pub fn add_node(&mut self, id: u64, x: f32, y: f32) -> NodeIndex {
        if let Some(&index) = self.ids.get(&id) {
            debug!("Node {} already present as {:?}", id, index);
            return index;
        }
        let index = self.graph.add_node(Node::new(id, x, y));
        self.ids.insert(id, index);
        self.neighbours.push(None);
        // The union-find structure has a fixed size, so it has to be regenerated.
        self.components_dirty = true;
        index
    }
    /// Connects two nodes. Joins their components and invalidates their cached neighbours.
    pub fn add_edge(&mut self, a: NodeIndex, b: NodeIndex) {
        self.graph.update_edge(a, b, ());
        self.neighbours[a.index()] = None;
        self.neighbours[b.index()] = None;
        if !self.components_dirty {
            self.components.union(a.index(), b.index());
        }
    }
    /// Disconnects two nodes, returning whether they were connected. Components are flagged as
    /// dirty since they may (potentially) be broken apart into multiple.
    pub fn remove_edge(&mut self, a: NodeIndex, b: NodeIndex) -> bool {
        match self.graph.find_edge(a, b) {
            Some(edge) => {
                self.graph.remove_edge(edge);
                self.neighbours[a.index()] = None;
                self.neighbours[b.index()] = None;
                self.components_dirty = true;
                true
            }
            None => false,
        }
    }
    /// Looks up the index of the node with external identifier `id`.
    pub fn index_of(&self, id: u64) -> Option<NodeIndex> {
        self.ids.get(&id).copied()
    }
    /// The path last written back by a planner.
    pub fn path(&self) -> &[Node] {
        &self.path
    }
    /// Retrieves the component id a given node belongs to.
    pub fn get_component(&self, node: NodeIndex) -> usize {
        self.components.find(node.index())
    }
    /// Checks if start and goal are on the same component. Stale components cannot rule out a
    /// path, so they count as reachable.
    pub fn reachable(&self, start: NodeIndex, goal: NodeIndex) -> bool {
        self.reachability(start, goal).unwrap_or(true)
    }
    /// Checks if start and goal are known to be on different components.
    pub fn unreachable(&self, start: NodeIndex, goal: NodeIndex) -> bool {
        !self.reachable(start, goal)
    }
    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }
    /// Generates a new [UnionFind] structure and links up graph neighbours to the same components.
    pub fn generate_components(&mut self) {
        info!(
            "Generating connected components for {} nodes",
            self.graph.node_count()
        );
        self.components = UnionFind::new(self.graph.node_count());
        self.components_dirty = false;
        for edge in self.graph.raw_edges() {
            self.components
                .union(edge.source().index(), edge.target().index());
        }
    }
}

impl RouteModel for RouteGraph {
    fn node_count(&self) -> usize {
        self.graph.node_count()
    }
    fn node(&self, index: NodeIndex) -> Node {
        self.graph[index]
    }
    /// Linear scan over all nodes, ties go to the lowest index.
    fn find_closest_node(&self, x: f32, y: f32) -> Option<NodeIndex> {
        let query = Node::new(0, x, y);
        self.graph
            .node_indices()
            .min_by(|&a, &b| {
                self.graph[a]
                    .distance(&query)
                    .total_cmp(&self.graph[b].distance(&query))
            })
    }
    /// Coincident nodes (zero distance) are not neighbours of each other.
    fn find_neighbors(&mut self, node: NodeIndex) {
        if self.neighbours[node.index()].is_some() {
            return;
        }
        let position = self.graph[node];
        let mut found = self
            .graph
            .neighbors(node)
            .map(|n| (n, position.distance(&self.graph[n])))
            .filter(|(_, distance)| *distance > 0.0)
            .collect::<Neighbours>();
        found.sort_unstable_by_key(|(n, _)| *n);
        self.neighbours[node.index()] = Some(found);
    }
    fn neighbors(&self, node: NodeIndex) -> &[(NodeIndex, f32)] {
        self.neighbours[node.index()].as_deref().unwrap_or(&[])
    }
    fn metric_scale(&self) -> f32 {
        self.metric_scale
    }
    fn set_path(&mut self, path: Vec<Node>) {
        self.path = path;
    }
    /// Stale components know nothing, in that case the search has to find out.
    fn reachability(&self, start: NodeIndex, goal: NodeIndex) -> Option<bool> {
        if self.components_dirty {
            return None;
        }
        Some(self.components.equiv(start.index(), goal.index()))
    }
}

impl fmt::Display for RouteGraph {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Nodes:")?;
        for index in self.graph.node_indices() {
            let node = self.graph[index];
            let mut adjacent = self
                .graph
                .neighbors(index)
                .map(|n| self.graph[n].id)
                .collect::<Vec<u64>>();
            adjacent.sort_unstable();
            writeln!(f, "{} ({}, {}) -> {:?}", node.id, node.x, node.y, adjacent)?;
        }
        Ok(())
    }
}
