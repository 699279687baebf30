// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph canvas as a sequencer render surface.

use crate::config::AnimationConfig;
use crate::theme::NodePalette;
use std::sync::Arc;
use traversal_viz_graph::{Graph, GraphLayout, GraphViewState, NodeId, NodeStyle};
use traversal_viz_sequencer::{AnimationState, NodeState, RenderSurface};

/// Everything the graph tab draws, updated through [`RenderSurface`]
pub struct GraphSurface {
    graph: Arc<Graph>,
    layout: GraphLayout,
    state: AnimationState,
    /// Canvas pan/zoom
    pub view: GraphViewState,
    palette: NodePalette,
    focus_scale: f32,
    focus_secs: f32,
}

impl GraphSurface {
    /// Lay out `graph` from `root` and start with every node pending
    pub fn new(graph: Arc<Graph>, root: &NodeId, animation: &AnimationConfig, palette: NodePalette) -> Self {
        let layout = GraphLayout::layered(&graph, root);
        let state = AnimationState::new(graph.node_ids().cloned());
        Self {
            graph,
            layout,
            state,
            view: GraphViewState::new(),
            palette,
            focus_scale: animation.focus_scale,
            focus_secs: animation.focus_duration_ms as f32 / 1000.0,
        }
    }

    /// Graph being shown
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Per-node animation state
    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    /// Draw the canvas with an optional overlay line
    pub fn ui(&mut self, ui: &mut egui::Ui, overlay: Option<&str>) {
        let Self {
            graph,
            layout,
            state,
            view,
            palette,
            ..
        } = self;
        view.ui(
            ui,
            &**graph,
            layout,
            |node_id| node_style(state, palette, node_id),
            overlay,
        );
    }
}

/// How `node_id` should be drawn right now
fn node_style(state: &AnimationState, palette: &NodePalette, node_id: &NodeId) -> NodeStyle {
    let visual = state.visual(node_id);
    let colors = palette.colors(visual.state);
    NodeStyle {
        fill: colors.fill,
        border: palette.border,
        text: colors.text,
        label: visual.label(node_id),
        selected: visual.state == NodeState::Active,
    }
}

impl RenderSurface for GraphSurface {
    fn reset(&mut self) {
        self.state.reset();
    }

    fn mark_active(&mut self, node_id: &NodeId, step: usize) {
        self.state.mark_active(node_id, step);
    }

    fn mark_visited(&mut self, node_id: &NodeId) {
        self.state.mark_visited(node_id);
    }

    fn clear_active(&mut self) {
        self.state.clear_active();
    }

    fn focus(&mut self, node_id: &NodeId) {
        if let Some(position) = self.layout.position(node_id) {
            self.view.focus_on(position, self.focus_scale, self.focus_secs);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use traversal_viz_graph::{demo_graph, demo_start};

    fn surface() -> GraphSurface {
        GraphSurface::new(
            demo_graph(),
            &demo_start(),
            &AnimationConfig::default(),
            NodePalette::default(),
        )
    }

    fn style(surface: &GraphSurface, node_id: &NodeId) -> NodeStyle {
        node_style(&surface.state, &surface.palette, node_id)
    }

    #[test]
    fn test_styles_follow_state() {
        let mut surface = surface();
        let palette = NodePalette::default();
        let one = NodeId::from("1");
        let two = NodeId::from("2");

        let pending = style(&surface, &one);
        assert_eq!(pending.fill, palette.pending.fill);
        assert_eq!(pending.label, "Node 1");
        assert!(!pending.selected);

        surface.mark_active(&one, 0);
        let active = style(&surface, &one);
        assert_eq!(active.fill, palette.active.fill);
        assert_eq!(active.label, "Node 1\n(1)");
        assert!(active.selected);

        surface.mark_visited(&one);
        surface.mark_active(&two, 1);
        assert_eq!(style(&surface, &one).fill, palette.visited.fill);
        assert_eq!(style(&surface, &two).label, "Node 2\n(2)");

        surface.reset();
        assert_eq!(style(&surface, &one).label, "Node 1");
        assert_eq!(surface.state().count(NodeState::Pending), 20);
    }

    #[test]
    fn test_focus_starts_view_transition() {
        let mut surface = surface();
        assert!(!surface.view.is_animating());
        surface.focus(&NodeId::from("10"));
        assert!(surface.view.is_animating());

        surface.view.advance(1.0);
        let target = surface.layout.position(&NodeId::from("10")).unwrap();
        assert_eq!(surface.view.pan, egui::Vec2::new(-target[0], -target[1]));
        assert!((surface.view.zoom - 1.2).abs() < 1e-6);
    }

    #[test]
    fn test_focus_unknown_node_is_ignored() {
        let mut surface = surface();
        surface.focus(&NodeId::from("missing"));
        assert!(!surface.view.is_animating());
    }
}
