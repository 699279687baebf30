// SPDX-License-Identifier: MIT OR Apache-2.0
//! Deterministic layered layout.
//!
//! Nodes are placed in rows by breadth-first depth from a root. Within the
//! spanning tree (each node hangs under the first parent that reaches it)
//! leaves take consecutive columns and parents sit centered over their
//! children. Nodes the root cannot reach go in one extra row at the bottom.

use crate::graph::Graph;
use crate::node::NodeId;
use indexmap::IndexMap;
use std::collections::VecDeque;

/// Horizontal distance between adjacent leaf columns
pub const COLUMN_SPACING: f32 = 90.0;
/// Vertical distance between rows
pub const ROW_SPACING: f32 = 110.0;

/// Graph-space node positions
#[derive(Debug, Clone, Default)]
pub struct GraphLayout {
    positions: IndexMap<NodeId, [f32; 2]>,
}

impl GraphLayout {
    /// Lay out `graph` with `root` in the top row
    pub fn layered(graph: &Graph, root: &NodeId) -> Self {
        let tree = SpanningTree::build(graph, root);

        let mut columns: IndexMap<NodeId, f32> = IndexMap::new();
        let mut next_column = 0.0;
        if tree.depth.contains_key(root) {
            tree.assign_columns(root, &mut next_column, &mut columns);
        }

        let mut max_depth = tree.depth.values().copied().max().unwrap_or(0);
        let orphans: Vec<&NodeId> = graph
            .node_ids()
            .filter(|id| !tree.depth.contains_key(*id))
            .collect();
        if !orphans.is_empty() && !tree.depth.is_empty() {
            max_depth += 1;
        }

        let span = next_column.max(orphans.len() as f32);
        let center = (span - 1.0).max(0.0) / 2.0;

        let mut positions = IndexMap::new();
        for id in graph.node_ids() {
            if let (Some(column), Some(depth)) = (columns.get(id), tree.depth.get(id)) {
                positions.insert(
                    id.clone(),
                    [(column - center) * COLUMN_SPACING, *depth as f32 * ROW_SPACING],
                );
            }
        }
        for (i, id) in orphans.into_iter().enumerate() {
            positions.insert(
                id.clone(),
                [(i as f32 - center) * COLUMN_SPACING, max_depth as f32 * ROW_SPACING],
            );
        }

        Self { positions }
    }

    /// Position of a node
    pub fn position(&self, node_id: &NodeId) -> Option<[f32; 2]> {
        self.positions.get(node_id).copied()
    }

    /// Iterate over all positioned nodes
    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, [f32; 2])> {
        self.positions.iter().map(|(id, pos)| (id, *pos))
    }

    /// Number of positioned nodes
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the layout is empty
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Bounding box as `(min, max)`
    pub fn bounds(&self) -> Option<([f32; 2], [f32; 2])> {
        self.positions.values().fold(None, |acc, p| {
            Some(match acc {
                None => (*p, *p),
                Some((min, max)) => (
                    [min[0].min(p[0]), min[1].min(p[1])],
                    [max[0].max(p[0]), max[1].max(p[1])],
                ),
            })
        })
    }
}

struct SpanningTree {
    depth: IndexMap<NodeId, usize>,
    children: IndexMap<NodeId, Vec<NodeId>>,
}

impl SpanningTree {
    fn build(graph: &Graph, root: &NodeId) -> Self {
        let mut depth = IndexMap::new();
        let mut children: IndexMap<NodeId, Vec<NodeId>> = IndexMap::new();
        if graph.node_ids().all(|id| id != root) {
            return Self { depth, children };
        }

        depth.insert(root.clone(), 0);
        let mut queue = VecDeque::from([root.clone()]);
        while let Some(node) = queue.pop_front() {
            let level = depth.get(&node).copied().unwrap_or(0);
            for next in graph.successors(&node) {
                if !depth.contains_key(next) {
                    depth.insert(next.clone(), level + 1);
                    children.entry(node.clone()).or_default().push(next.clone());
                    queue.push_back(next.clone());
                }
            }
        }

        Self { depth, children }
    }

    fn assign_columns(&self, node: &NodeId, next_column: &mut f32, columns: &mut IndexMap<NodeId, f32>) {
        let kids = self.children.get(node).map(Vec::as_slice).unwrap_or(&[]);
        if kids.is_empty() {
            columns.insert(node.clone(), *next_column);
            *next_column += 1.0;
            return;
        }

        for child in kids {
            self.assign_columns(child, next_column, columns);
        }
        let first = kids.first().and_then(|k| columns.get(k)).copied().unwrap_or(0.0);
        let last = kids.last().and_then(|k| columns.get(k)).copied().unwrap_or(first);
        columns.insert(node.clone(), (first + last) / 2.0);
    }
}
