// SPDX-License-Identifier: MIT OR Apache-2.0
//! The built-in twenty-node teaching graph.

use crate::graph::Graph;
use crate::node::NodeId;
use std::sync::{Arc, LazyLock};

/// Start node used for every demo traversal
pub const DEMO_START: &str = "1";

const DEMO_ADJACENCY: [(&str, &[&str]); 20] = [
    ("1", &["2", "3", "4"]),
    ("2", &["5", "6"]),
    ("3", &["7", "8"]),
    ("4", &["9"]),
    ("5", &["10"]),
    ("6", &["11", "12"]),
    ("7", &[]),
    ("8", &["13", "14"]),
    ("9", &["15", "16"]),
    ("10", &[]),
    ("11", &["17"]),
    ("12", &[]),
    ("13", &["18"]),
    ("14", &[]),
    ("15", &[]),
    ("16", &["19", "20"]),
    ("17", &[]),
    ("18", &[]),
    ("19", &[]),
    ("20", &[]),
];

static DEMO_GRAPH: LazyLock<Arc<Graph>> = LazyLock::new(|| {
    Arc::new(Graph::from_adjacency(
        "Traversal Demo",
        DEMO_ADJACENCY.iter().map(|(node, successors)| (*node, successors.iter().copied())),
    ))
});

/// Shared handle to the demo graph, built on first use
pub fn demo_graph() -> Arc<Graph> {
    Arc::clone(&DEMO_GRAPH)
}

/// The demo start node
pub fn demo_start() -> NodeId {
    NodeId::from(DEMO_START)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_graph_shape() {
        let graph = demo_graph();
        assert_eq!(graph.node_count(), 20);
        assert_eq!(graph.edge_count(), 19);
        assert!(graph.contains(&demo_start()));
    }

    #[test]
    fn test_demo_graph_is_shared() {
        assert!(Arc::ptr_eq(&demo_graph(), &demo_graph()));
    }
}
