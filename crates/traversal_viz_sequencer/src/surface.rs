// SPDX-License-Identifier: MIT OR Apache-2.0
//! Rendering surface driven by the sequencer.

use traversal_viz_graph::NodeId;

/// Sink for per-step visual updates.
///
/// Only the sequencer's live run writes to a surface, so implementations
/// never see interleaved updates from two runs.
pub trait RenderSurface {
    /// Return every node to pending and restore its plain label
    fn reset(&mut self);

    /// Highlight `node_id` as the node at zero-based `step`
    fn mark_active(&mut self, node_id: &NodeId, step: usize);

    /// Mark `node_id` as visited
    fn mark_visited(&mut self, node_id: &NodeId);

    /// Drop the active highlight, if any
    fn clear_active(&mut self);

    /// Bring `node_id` into view; purely cosmetic
    fn focus(&mut self, _node_id: &NodeId) {}
}
