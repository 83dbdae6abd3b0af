use petgraph::graph::NodeIndex;
use thiserror::Error;

/// Failures of the planner itself. An unreachable goal is not an error, [search](crate::RoutePlanner::search)
/// reports it as `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlannerError {
    /// The model has no nodes to resolve query coordinates to.
    #[error("route model contains no nodes")]
    EmptyModel,
    /// The frontier was popped while empty.
    #[error("frontier is empty")]
    EmptyFrontier,
    /// Walking the parents back from the goal did not reach the start.
    #[error("parent chain from {goal:?} does not reach start {start:?}")]
    BrokenParentChain { start: NodeIndex, goal: NodeIndex },
}
