//! # route_planning
//!
//! Route planning on a weighted, undirected spatial graph derived from a map. Implements
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) with a straight-line (Euclidean)
//! heuristic. Query coordinates are given as percentages of the map extent and are resolved to
//! the closest graph nodes before searching.
//!
//! The search only depends on the [RouteModel] trait; [RouteGraph] is a ready-made model backed
//! by a [petgraph] graph which also pre-computes
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory))
//! to avoid exhausting the whole reachable graph if no path exists.
//!
//! ```
//! use route_planning::{RouteGraph, RoutePlanner};
//!
//! let mut graph = RouteGraph::new();
//! let a = graph.add_node(0, 0.0, 0.0);
//! let b = graph.add_node(1, 1.0, 0.0);
//! let c = graph.add_node(2, 1.0, 1.0);
//! graph.add_edge(a, b);
//! graph.add_edge(b, c);
//! graph.generate_components();
//!
//! let mut planner = RoutePlanner::new(&mut graph, 0.0, 0.0, 100.0, 100.0).unwrap();
//! let route = planner.search().unwrap().unwrap();
//! assert_eq!(route.len(), 3);
//! assert_eq!(route.distance, 2.0);
//! ```
pub mod error;
pub mod model;
pub mod planner;
pub mod route_graph;

pub use error::PlannerError;
pub use model::{Node, RouteModel};
pub use planner::{Rediscovery, Route, RoutePlanner};
pub use petgraph::graph::NodeIndex;
pub use route_graph::RouteGraph;

/// Query coordinates are percentages of the map extent, models work with fractions.
pub const PERCENT_TO_FRACTION: f32 = 0.01;
/// Metric scale of a freshly created [RouteGraph]: model units are metres.
pub const DEFAULT_METRIC_SCALE: f32 = 1.0;
/// Inline capacity for adjacency lists, most road network nodes have few neighbours.
pub const N_SMALLVEC_SIZE: usize = 8;
