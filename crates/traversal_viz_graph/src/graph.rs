// SPDX-License-Identifier: MIT OR Apache-2.0
//! Static directed graph stored as an insertion-ordered adjacency list.

use crate::node::NodeId;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// A directed graph keyed by node ID.
///
/// Successor lists keep their listed order, and key order is insertion
/// order, so every traversal over a graph is deterministic. A node that only
/// ever appears as a successor has no successors of its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Graph {
    /// Graph name
    pub name: String,
    /// Adjacency list
    adjacency: IndexMap<NodeId, Vec<NodeId>>,
}

impl Graph {
    /// Start building a graph
    pub fn builder(name: impl Into<String>) -> GraphBuilder {
        GraphBuilder {
            graph: Self {
                name: name.into(),
                adjacency: IndexMap::new(),
            },
        }
    }

    /// Build a graph from `(node, successors)` pairs
    pub fn from_adjacency<I, N, S>(name: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = (N, S)>,
        N: Into<NodeId>,
        S: IntoIterator,
        S::Item: Into<NodeId>,
    {
        let mut builder = Self::builder(name);
        for (node, successors) in entries {
            builder = builder.node(node, successors);
        }
        builder.build()
    }

    /// Successors of a node in listed order (empty for unknown nodes)
    pub fn successors(&self, node_id: &NodeId) -> &[NodeId] {
        self.adjacency.get(node_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether the node is a key of the adjacency list
    pub fn contains(&self, node_id: &NodeId) -> bool {
        self.adjacency.contains_key(node_id)
    }

    /// All node IDs: keys first, then successor-only leaves in first-seen order
    pub fn node_ids(&self) -> impl Iterator<Item = &NodeId> {
        let mut ids: IndexSet<&NodeId> = self.adjacency.keys().collect();
        for successors in self.adjacency.values() {
            ids.extend(successors.iter());
        }
        ids.into_iter()
    }

    /// Get the number of distinct nodes (keys and leaves)
    pub fn node_count(&self) -> usize {
        self.node_ids().count()
    }

    /// All directed edges in adjacency order
    pub fn edges(&self) -> impl Iterator<Item = (&NodeId, &NodeId)> {
        self.adjacency
            .iter()
            .flat_map(|(from, successors)| successors.iter().map(move |to| (from, to)))
    }

    /// Get the number of directed edges
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }
}

/// Builder for [`Graph`]; the graph is read-only once built
#[derive(Debug)]
pub struct GraphBuilder {
    graph: Graph,
}

impl GraphBuilder {
    /// Add a node with its successor list, appending to any existing list
    pub fn node<S>(mut self, node: impl Into<NodeId>, successors: S) -> Self
    where
        S: IntoIterator,
        S::Item: Into<NodeId>,
    {
        self.graph
            .adjacency
            .entry(node.into())
            .or_default()
            .extend(successors.into_iter().map(Into::into));
        self
    }

    /// Add a single directed edge
    pub fn edge(self, from: impl Into<NodeId>, to: impl Into<NodeId>) -> Self {
        self.node(from, [to.into()])
    }

    /// Finish building
    pub fn build(self) -> Graph {
        self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Graph {
        Graph::from_adjacency("sample", [("a", vec!["b", "c"]), ("b", vec!["d"])])
    }

    #[test]
    fn test_successors_keep_listed_order() {
        let graph = sample();
        let successors: Vec<_> = graph.successors(&"a".into()).iter().map(NodeId::as_str).collect();
        assert_eq!(successors, ["b", "c"]);
    }

    #[test]
    fn test_missing_key_has_no_successors() {
        let graph = sample();
        assert!(graph.successors(&"c".into()).is_empty());
        assert!(graph.successors(&"zzz".into()).is_empty());
        assert!(!graph.contains(&"c".into()));
    }

    #[test]
    fn test_node_ids_include_leaves() {
        let graph = sample();
        let ids: Vec<_> = graph.node_ids().map(NodeId::as_str).collect();
        assert_eq!(ids, ["a", "b", "c", "d"]);
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn test_builder_edges_append() {
        let graph = Graph::builder("edges").edge("x", "y").edge("x", "z").build();
        assert_eq!(graph.successors(&"x".into()).len(), 2);
        let edges: Vec<_> = graph.edges().map(|(f, t)| (f.as_str(), t.as_str())).collect();
        assert_eq!(edges, [("x", "y"), ("x", "z")]);
    }

    #[test]
    fn test_serialization() {
        let graph = sample();
        let ron_str = ron::ser::to_string_pretty(&graph, ron::ser::PrettyConfig::default()).unwrap();
        let loaded: Graph = ron::from_str(&ron_str).unwrap();
        assert_eq!(loaded.name, "sample");
        assert_eq!(loaded.edge_count(), graph.edge_count());
    }
}
