// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph panel - animated traversal canvas.

use crate::surface::GraphSurface;
use traversal_viz_sequencer::{AnimationSequencer, CurrentStep, NodeState};

/// The graph panel
pub struct GraphViewPanel {
    /// Show the status overlay while a run plays
    pub show_overlay: bool,
}

impl GraphViewPanel {
    /// Create a new graph panel
    pub fn new() -> Self {
        Self { show_overlay: true }
    }

    /// Render the graph panel
    pub fn ui(&mut self, ui: &mut egui::Ui, surface: &mut GraphSurface, sequencer: &AnimationSequencer) {
        ui.horizontal(|ui| {
            let state = surface.state();
            ui.label(format!(
                "Visited: {} / {}",
                state.count(NodeState::Visited),
                surface.graph().node_count()
            ));
            ui.separator();
            ui.checkbox(&mut surface.view.show_grid, "Grid");
            ui.checkbox(&mut self.show_overlay, "Overlay");
            if ui.button("Fit").on_hover_text("Fit graph to view (double-click)").clicked() {
                surface.view.request_fit();
            }
        });

        ui.separator();

        let overlay = sequencer
            .current_step()
            .filter(|_| self.show_overlay)
            .map(|step| overlay_text(&step));
        surface.ui(ui, overlay.as_deref());
    }
}

impl Default for GraphViewPanel {
    fn default() -> Self {
        Self::new()
    }
}

/// "Traversing Node: 5 (3/20)"
fn overlay_text(step: &CurrentStep<'_>) -> String {
    format!("Traversing Node: {} ({}/{})", step.node, step.index + 1, step.total)
}
