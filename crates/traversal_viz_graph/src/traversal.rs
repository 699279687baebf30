// SPDX-License-Identifier: MIT OR Apache-2.0
//! Breadth-first and depth-first visitation order.
//!
//! Both modes visit the same set of nodes (everything reachable from the
//! start node) in generally different orders. Neither can fail: a start node
//! that is not in the graph simply yields an empty order.

use crate::graph::Graph;
use crate::node::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

/// Traversal mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TraversalMode {
    /// Level order using a FIFO frontier
    #[default]
    BreadthFirst,
    /// Pre-order depth-first
    DepthFirst,
}

impl TraversalMode {
    /// Get all modes for UI
    pub fn all() -> &'static [TraversalMode] {
        &[TraversalMode::BreadthFirst, TraversalMode::DepthFirst]
    }

    /// Short name ("BFS" / "DFS")
    pub fn short_name(&self) -> &'static str {
        match self {
            TraversalMode::BreadthFirst => "BFS",
            TraversalMode::DepthFirst => "DFS",
        }
    }

    /// Full display name
    pub fn name(&self) -> &'static str {
        match self {
            TraversalMode::BreadthFirst => "Breadth-First Search",
            TraversalMode::DepthFirst => "Depth-First Search",
        }
    }
}

/// Ordered, duplicate-free sequence of visited nodes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<NodeId>", into = "Vec<NodeId>")]
pub struct TraversalOrder(Vec<NodeId>);

impl TraversalOrder {
    /// Number of visited nodes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing was visited
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Node at a step index
    pub fn get(&self, index: usize) -> Option<&NodeId> {
        self.0.get(index)
    }

    /// Iterate in visitation order
    pub fn iter(&self) -> std::slice::Iter<'_, NodeId> {
        self.0.iter()
    }

    /// View as a slice
    pub fn as_slice(&self) -> &[NodeId] {
        &self.0
    }

    /// Step index of a node, if visited
    pub fn position(&self, node_id: &NodeId) -> Option<usize> {
        self.0.iter().position(|n| n == node_id)
    }
}

impl<'a> IntoIterator for &'a TraversalOrder {
    type Item = &'a NodeId;
    type IntoIter = std::slice::Iter<'a, NodeId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<NodeId> for TraversalOrder {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        let mut seen = HashSet::new();
        Self(iter.into_iter().filter(|n| seen.insert(n.clone())).collect())
    }
}

impl From<Vec<NodeId>> for TraversalOrder {
    fn from(nodes: Vec<NodeId>) -> Self {
        nodes.into_iter().collect()
    }
}

impl From<TraversalOrder> for Vec<NodeId> {
    fn from(order: TraversalOrder) -> Self {
        order.0
    }
}

/// Frontier statistics gathered during a traversal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraversalStats {
    /// Entries pushed onto the frontier, duplicates included
    pub pushed: usize,
    /// Entries removed from the frontier that had already been visited
    pub discarded: usize,
    /// Largest frontier size observed
    pub peak_frontier: usize,
}

/// Compute the visitation order from `start`
pub fn compute(graph: &Graph, start: &NodeId, mode: TraversalMode) -> TraversalOrder {
    compute_with_stats(graph, start, mode).0
}

/// Compute the visitation order along with frontier statistics
pub fn compute_with_stats(
    graph: &Graph,
    start: &NodeId,
    mode: TraversalMode,
) -> (TraversalOrder, TraversalStats) {
    if !graph.contains(start) {
        return (TraversalOrder::default(), TraversalStats::default());
    }

    match mode {
        TraversalMode::BreadthFirst => breadth_first(graph, start),
        TraversalMode::DepthFirst => depth_first(graph, start),
    }
}

/// Every node reachable from `start` (including `start` when it is in the graph)
pub fn reachable_from(graph: &Graph, start: &NodeId) -> HashSet<NodeId> {
    let mut reached = HashSet::new();
    if !graph.contains(start) {
        return reached;
    }

    let mut pending = vec![start.clone()];
    while let Some(node) = pending.pop() {
        if reached.insert(node.clone()) {
            pending.extend(graph.successors(&node).iter().cloned());
        }
    }
    reached
}

// Successors are enqueued without checking `visited`; duplicates are dropped
// when they reach the front of the queue.
fn breadth_first(graph: &Graph, start: &NodeId) -> (TraversalOrder, TraversalStats) {
    let mut visited = HashSet::new();
    let mut order = Vec::new();
    let mut stats = TraversalStats::default();
    let mut frontier = VecDeque::from([start.clone()]);
    stats.pushed = 1;
    stats.peak_frontier = 1;

    while let Some(node) = frontier.pop_front() {
        if !visited.insert(node.clone()) {
            stats.discarded += 1;
            continue;
        }

        let successors = graph.successors(&node);
        order.push(node);
        frontier.extend(successors.iter().cloned());
        stats.pushed += successors.len();
        stats.peak_frontier = stats.peak_frontier.max(frontier.len());
    }

    (TraversalOrder(order), stats)
}

// Explicit-stack pre-order. Pushing successors in reverse and checking
// `visited` at pop time reproduces the recursive visiting order.
fn depth_first(graph: &Graph, start: &NodeId) -> (TraversalOrder, TraversalStats) {
    let mut visited = HashSet::new();
    let mut order = Vec::new();
    let mut stats = TraversalStats::default();
    let mut stack = vec![start.clone()];
    stats.pushed = 1;
    stats.peak_frontier = 1;

    while let Some(node) = stack.pop() {
        if !visited.insert(node.clone()) {
            stats.discarded += 1;
            continue;
        }

        let successors = graph.successors(&node);
        order.push(node);
        stack.extend(successors.iter().rev().cloned());
        stats.pushed += successors.len();
        stats.peak_frontier = stats.peak_frontier.max(stack.len());
    }

    (TraversalOrder(order), stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::{demo_graph, demo_start};

    fn labels(order: &TraversalOrder) -> Vec<&str> {
        order.iter().map(NodeId::as_str).collect()
    }

    fn diamond() -> Graph {
        Graph::from_adjacency(
            "diamond",
            [("a", vec!["b", "c"]), ("b", vec!["d"]), ("c", vec!["d"]), ("d", vec![])],
        )
    }

    #[test]
    fn test_demo_breadth_first() {
        let order = compute(&demo_graph(), &demo_start(), TraversalMode::BreadthFirst);
        let expected: Vec<String> = (1..=20).map(|n| n.to_string()).collect();
        assert_eq!(labels(&order), expected);
    }

    #[test]
    fn test_demo_depth_first() {
        let order = compute(&demo_graph(), &demo_start(), TraversalMode::DepthFirst);
        assert_eq!(
            labels(&order),
            [
                "1", "2", "5", "10", "6", "11", "17", "12", "3", "7", "8", "13", "18", "14", "4",
                "9", "15", "16", "19", "20"
            ]
        );
    }

    #[test]
    fn test_visits_exactly_reachable_set() {
        let graph = Graph::from_adjacency(
            "mixed",
            [
                ("s", vec!["x", "y"]),
                ("x", vec!["y", "z"]),
                ("y", vec!["s"]),
                ("island", vec!["s"]),
            ],
        );
        let start = NodeId::from("s");
        let reachable = reachable_from(&graph, &start);

        for mode in TraversalMode::all() {
            let order = compute(&graph, &start, *mode);
            let visited: HashSet<_> = order.iter().cloned().collect();
            assert_eq!(visited.len(), order.len(), "duplicate in {mode:?}");
            assert_eq!(visited, reachable);
            assert!(order.position(&"island".into()).is_none());
        }
    }

    #[test]
    fn test_orders_differ_but_cover_same_nodes() {
        let graph = demo_graph();
        let bfs = compute(&graph, &demo_start(), TraversalMode::BreadthFirst);
        let dfs = compute(&graph, &demo_start(), TraversalMode::DepthFirst);
        assert_ne!(bfs, dfs);

        let mut bfs_sorted = bfs.as_slice().to_vec();
        let mut dfs_sorted = dfs.as_slice().to_vec();
        bfs_sorted.sort();
        dfs_sorted.sort();
        assert_eq!(bfs_sorted, dfs_sorted);
    }

    #[test]
    fn test_deterministic() {
        let graph = demo_graph();
        for mode in TraversalMode::all() {
            assert_eq!(
                compute(&graph, &demo_start(), *mode),
                compute(&graph, &demo_start(), *mode)
            );
        }
    }

    #[test]
    fn test_leaf_start_yields_single_node() {
        let graph = demo_graph();
        for mode in TraversalMode::all() {
            let order = compute(&graph, &"7".into(), *mode);
            assert_eq!(labels(&order), ["7"]);
        }
    }

    #[test]
    fn test_missing_start_yields_empty() {
        let graph = demo_graph();
        for mode in TraversalMode::all() {
            assert!(compute(&graph, &"42".into(), *mode).is_empty());
        }
        assert!(reachable_from(&graph, &"42".into()).is_empty());
    }

    #[test]
    fn test_cycle_terminates() {
        let graph = Graph::from_adjacency("cycle", [("a", vec!["b"]), ("b", vec!["c"]), ("c", vec!["a"])]);
        let order = compute(&graph, &"a".into(), TraversalMode::DepthFirst);
        assert_eq!(labels(&order), ["a", "b", "c"]);
        let order = compute(&graph, &"b".into(), TraversalMode::BreadthFirst);
        assert_eq!(labels(&order), ["b", "c", "a"]);
    }

    #[test]
    fn test_breadth_first_keeps_duplicate_frontier_entries() {
        let (order, stats) = compute_with_stats(&diamond(), &"a".into(), TraversalMode::BreadthFirst);
        assert_eq!(labels(&order), ["a", "b", "c", "d"]);
        // "d" is enqueued by both "b" and "c"
        assert_eq!(stats.pushed, 5);
        assert_eq!(stats.discarded, 1);
    }

    #[test]
    fn test_depth_first_matches_recursive_order() {
        let graph = Graph::from_adjacency(
            "shared",
            [("a", vec!["b", "c", "d"]), ("b", vec!["d", "e"]), ("c", vec!["e"]), ("e", vec!["d"])],
        );
        let order = compute(&graph, &"a".into(), TraversalMode::DepthFirst);
        assert_eq!(labels(&order), ["a", "b", "d", "e", "c"]);
    }

    #[test]
    fn test_order_from_iter_dedups() {
        let order: TraversalOrder = ["a", "b", "a", "c"].into_iter().map(NodeId::from).collect();
        assert_eq!(labels(&order), ["a", "b", "c"]);
    }

    #[test]
    fn test_deserialized_order_dedups() {
        let order: TraversalOrder = ron::from_str(r#"["a", "b", "a", "c", "b"]"#).unwrap();
        assert_eq!(labels(&order), ["a", "b", "c"]);

        let text = ron::to_string(&order).unwrap();
        let back: TraversalOrder = ron::from_str(&text).unwrap();
        assert_eq!(back, order);
    }
}
