use petgraph::graph::NodeIndex;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Clone, Copy, Debug)]
struct SmallestCostHolder {
    estimated_cost: f32,
    cost: f32,
    node: NodeIndex,
    sequence: usize,
}

impl Eq for SmallestCostHolder {}

impl PartialEq for SmallestCostHolder {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl PartialOrd for SmallestCostHolder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SmallestCostHolder {
    fn cmp(&self, other: &Self) -> Ordering {
        // First orders per estimated cost, then creates subordering
        // based on cost, favoring exploration of largest cost nodes first.
        // Remaining ties go to the lowest node index, then the earliest push.
        match other.estimated_cost.total_cmp(&self.estimated_cost) {
            Ordering::Equal => self
                .cost
                .total_cmp(&other.cost)
                .then_with(|| other.node.cmp(&self.node))
                .then_with(|| other.sequence.cmp(&self.sequence)),
            s => s,
        }
    }
}

/// Open set of the search. Entries are never deduplicated, a node pushed twice is popped twice.
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<SmallestCostHolder>,
    pushed: usize,
}

impl Frontier {
    pub fn new() -> Frontier {
        Frontier::default()
    }
    pub fn push(&mut self, node: NodeIndex, g: f32, h: f32) {
        self.heap.push(SmallestCostHolder {
            estimated_cost: g + h,
            cost: g,
            node,
            sequence: self.pushed,
        });
        self.pushed += 1;
    }
    /// Removes the entry with the smallest `f = g + h`, returning the node and its `g` at the
    /// time it was pushed.
    pub fn pop(&mut self) -> Option<(NodeIndex, f32)> {
        self.heap.pop().map(|holder| (holder.node, holder.cost))
    }
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
    /// Total number of pushes, duplicates included.
    pub fn pushed(&self) -> usize {
        self.pushed
    }
}
