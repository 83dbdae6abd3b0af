//! A* search between two map coordinates on a [RouteModel].
mod frontier;
mod state;

pub use frontier::Frontier;
pub use state::{NodeState, SearchState};

use crate::error::PlannerError;
use crate::model::{Node, RouteModel};
use crate::{N_SMALLVEC_SIZE, PERCENT_TO_FRACTION};
use itertools::Itertools;
use log::{debug, info, warn};
use petgraph::graph::NodeIndex;
use smallvec::SmallVec;

/// What happens when a node that was already discovered shows up as a neighbour again.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Rediscovery {
    /// Only undiscovered neighbours are considered and each of them is assigned
    /// unconditionally. A node is never re-parented once discovered, so the first route found
    /// to it sticks and the result may be longer than the shortest route. Only a neighbour
    /// listed twice by the model is assigned twice, the later entry wins and both are pushed.
    #[default]
    FirstDiscovery,
    /// Every neighbour is considered but only updated if the new cost is strictly lower.
    /// Outdated frontier entries are skipped. Finds shortest routes for admissible heuristics.
    KeepBest,
}

/// A found route, ordered from start to goal.
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    /// Model indices of the route nodes.
    pub indices: Vec<NodeIndex>,
    /// Snapshots of the route nodes, parallel to `indices`.
    pub nodes: Vec<Node>,
    /// Length in metres.
    pub distance: f32,
}

impl Route {
    /// Number of nodes, a route from a node to itself has length 1.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    /// Never true for a route returned by a search.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
    /// Node positions in fractions of the map extent.
    pub fn points(&self) -> Vec<(f32, f32)> {
        self.nodes.iter().map(|n| (n.x, n.y)).collect()
    }
}

/// Sums the distances between consecutive nodes of `path` and converts the result to metres.
pub fn path_length<M: RouteModel>(model: &M, path: &[NodeIndex]) -> f32 {
    path.iter()
        .tuple_windows()
        .map(|(&a, &b)| model.distance(a, b))
        .sum::<f32>()
        * model.metric_scale()
}

/// Plans a route between two coordinates on a [RouteModel] using A* with the straight-line
/// distance to the goal as heuristic.
pub struct RoutePlanner<'a, M: RouteModel> {
    model: &'a mut M,
    pub start: NodeIndex,
    pub end: NodeIndex,
    pub rediscovery: Rediscovery,
    /// Scales the heuristic. Values above 1.0 give weighted A*, which is greedier and may
    /// return longer routes.
    pub heuristic_factor: f32,
    /// Length in metres of the route last written back by [search_write_back](Self::search_write_back).
    pub distance: f32,
    state: SearchState,
    frontier: Frontier,
}

impl<'a, M: RouteModel> RoutePlanner<'a, M> {
    /// Resolves start and end, given as percentages (0 to 100) of the map extent, to the
    /// closest nodes of `model`.
    pub fn new(
        model: &'a mut M,
        start_x: f32,
        start_y: f32,
        end_x: f32,
        end_y: f32,
    ) -> Result<RoutePlanner<'a, M>, PlannerError> {
        for value in [start_x, start_y, end_x, end_y] {
            if !(0.0..=100.0).contains(&value) {
                debug!("Coordinate {} lies outside of the map extent", value);
            }
        }
        let start = model
            .find_closest_node(start_x * PERCENT_TO_FRACTION, start_y * PERCENT_TO_FRACTION)
            .ok_or(PlannerError::EmptyModel)?;
        let end = model
            .find_closest_node(end_x * PERCENT_TO_FRACTION, end_y * PERCENT_TO_FRACTION)
            .ok_or(PlannerError::EmptyModel)?;
        debug!("Resolved start to {:?} and end to {:?}", start, end);
        Ok(RoutePlanner {
            model,
            start,
            end,
            rediscovery: Rediscovery::default(),
            heuristic_factor: 1.0,
            distance: 0.0,
            state: SearchState::default(),
            frontier: Frontier::new(),
        })
    }

    pub fn model(&self) -> &M {
        &*self.model
    }

    /// Search state left behind by the last search.
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn calculate_h_value(&self, node: NodeIndex) -> f32 {
        self.model.distance(node, self.end) * self.heuristic_factor
    }

    /// Discovers the neighbours of `current`, sets their parent and costs and adds them to the
    /// frontier.
    fn add_neighbors(&mut self, current: NodeIndex) {
        self.model.find_neighbors(current);
        let current_g = self.state[current].g;
        let state = &self.state;
        let candidates = self
            .model
            .neighbors(current)
            .iter()
            .filter(|(n, _)| match self.rediscovery {
                Rediscovery::FirstDiscovery => !state[*n].visited,
                Rediscovery::KeepBest => *n != self.start,
            })
            .copied()
            .collect::<SmallVec<[(NodeIndex, f32); N_SMALLVEC_SIZE]>>();
        for (neighbor, distance) in candidates {
            let g = current_g + distance;
            if self.rediscovery == Rediscovery::KeepBest {
                let known = &self.state[neighbor];
                if known.visited && known.g <= g {
                    continue;
                }
            }
            let h = self.calculate_h_value(neighbor);
            let entry = &mut self.state[neighbor];
            entry.parent = Some(current);
            entry.h = h;
            entry.g = g;
            entry.visited = true;
            self.frontier.push(neighbor, g, h);
        }
    }

    /// Pops the frontier node with the smallest `f = g + h` together with its `g` at push time.
    fn next_node(&mut self) -> Result<(NodeIndex, f32), PlannerError> {
        self.frontier.pop().ok_or(PlannerError::EmptyFrontier)
    }

    /// Walks the parents back from `current` to the start.
    fn construct_final_path(&self, current: NodeIndex) -> Result<Route, PlannerError> {
        let limit = self.model.node_count();
        let mut distance = 0.0;
        let mut indices = vec![current];
        let mut iterator = current;
        while iterator != self.start {
            // A route never holds more nodes than the model, so a longer chain is a cycle.
            let parent = self.state[iterator]
                .parent
                .filter(|_| indices.len() < limit)
                .ok_or(PlannerError::BrokenParentChain {
                    start: self.start,
                    goal: current,
                })?;
            distance += self.model.distance(iterator, parent);
            iterator = parent;
            indices.push(iterator);
        }
        indices.reverse();
        let nodes = indices.iter().map(|&i| self.model.node(i)).collect();
        Ok(Route {
            indices,
            nodes,
            distance: distance * self.model.metric_scale(),
        })
    }

    /// Runs A* from the start to the end node. Returns `Ok(None)` if the end cannot be reached.
    /// Every call starts from a fresh search state.
    pub fn search(&mut self) -> Result<Option<Route>, PlannerError> {
        self.state = SearchState::new(self.model.node_count());
        self.frontier = Frontier::new();
        let reachability = self.model.reachability(self.start, self.end);
        if reachability == Some(false) {
            info!("{:?} is not reachable from {:?}", self.end, self.start);
            return Ok(None);
        }
        info!("Searching route from {:?} to {:?}", self.start, self.end);
        self.state[self.start].visited = true;
        self.frontier.push(self.start, 0.0, 0.0);
        self.add_neighbors(self.start);

        while !self.frontier.is_empty() {
            let (current, g) = self.next_node()?;
            if self.rediscovery == Rediscovery::KeepBest && g > self.state[current].g {
                continue;
            }
            if current == self.end {
                let route = self.construct_final_path(current)?;
                info!(
                    "Found route of {} nodes and {} m after {} frontier pushes",
                    route.len(),
                    route.distance,
                    self.frontier.pushed()
                );
                return Ok(Some(route));
            }
            self.add_neighbors(current);
        }
        if reachability == Some(true) {
            warn!(
                "Reachable goal {:?} could not be pathed to from {:?}, is the model consistent?",
                self.end, self.start
            );
        } else {
            info!(
                "Frontier exhausted after visiting {} nodes: {:?} is not reachable from {:?}",
                self.state.visited_count(),
                self.end,
                self.start
            );
        }
        Ok(None)
    }

    /// Runs [search](Self::search) and hands the result to the model through
    /// [RouteModel::set_path], an empty path if there is none. Records the distance on the
    /// planner and returns whether a route was found.
    pub fn search_write_back(&mut self) -> Result<bool, PlannerError> {
        match self.search()? {
            Some(route) => {
                self.distance = route.distance;
                self.model.set_path(route.nodes);
                Ok(true)
            }
            None => {
                self.distance = 0.0;
                self.model.set_path(Vec::new());
                Ok(false)
            }
        }
    }
}
