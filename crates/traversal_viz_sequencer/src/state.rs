// SPDX-License-Identifier: MIT OR Apache-2.0
//! Per-node animation state.

use crate::surface::RenderSurface;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use traversal_viz_graph::NodeId;

/// Visual state of a single node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NodeState {
    /// Not reached yet in the current run
    #[default]
    Pending,
    /// Currently highlighted
    Active,
    /// Already visited
    Visited,
}

/// State plus the step at which the node was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NodeVisual {
    /// Current state
    pub state: NodeState,
    /// Zero-based step index, once reached
    pub step: Option<usize>,
}

impl NodeVisual {
    /// Label shown on the canvas ("Node 3" or "Node 3\n(4)")
    pub fn label(&self, node_id: &NodeId) -> String {
        match self.step {
            Some(step) => format!("{}\n({})", node_id.display_label(), step + 1),
            None => node_id.display_label(),
        }
    }
}

/// Animation state for every node of a graph.
///
/// At most one node is [`NodeState::Active`] at any time.
#[derive(Debug, Clone, Default)]
pub struct AnimationState {
    nodes: IndexMap<NodeId, NodeVisual>,
    active: Option<NodeId>,
}

impl AnimationState {
    /// Create an all-pending state for the given nodes
    pub fn new<I>(node_ids: I) -> Self
    where
        I: IntoIterator<Item = NodeId>,
    {
        Self {
            nodes: node_ids.into_iter().map(|id| (id, NodeVisual::default())).collect(),
            active: None,
        }
    }

    /// Visual for a node (pending for unknown nodes)
    pub fn visual(&self, node_id: &NodeId) -> NodeVisual {
        self.nodes.get(node_id).copied().unwrap_or_default()
    }

    /// State of a node
    pub fn state(&self, node_id: &NodeId) -> NodeState {
        self.visual(node_id).state
    }

    /// The active node, if any
    pub fn active(&self) -> Option<&NodeId> {
        self.active.as_ref()
    }

    /// Number of nodes in the given state
    pub fn count(&self, state: NodeState) -> usize {
        self.nodes.values().filter(|v| v.state == state).count()
    }

    /// Iterate over all nodes
    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &NodeVisual)> {
        self.nodes.iter()
    }
}

impl RenderSurface for AnimationState {
    fn reset(&mut self) {
        for visual in self.nodes.values_mut() {
            *visual = NodeVisual::default();
        }
        self.active = None;
    }

    fn mark_active(&mut self, node_id: &NodeId, step: usize) {
        if self.active.as_ref().is_some_and(|current| current != node_id) {
            self.clear_active();
        }
        let visual = self.nodes.entry(node_id.clone()).or_default();
        visual.state = NodeState::Active;
        visual.step = Some(step);
        self.active = Some(node_id.clone());
    }

    fn mark_visited(&mut self, node_id: &NodeId) {
        let visual = self.nodes.entry(node_id.clone()).or_default();
        visual.state = NodeState::Visited;
        if self.active.as_ref() == Some(node_id) {
            self.active = None;
        }
    }

    // An interrupted node goes back to pending; it was never visited.
    fn clear_active(&mut self) {
        if let Some(node_id) = self.active.take() {
            if let Some(visual) = self.nodes.get_mut(&node_id) {
                *visual = NodeVisual::default();
            }
        }
    }
}
