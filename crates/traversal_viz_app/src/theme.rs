// SPDX-License-Identifier: MIT OR Apache-2.0
//! Application theme.
//!
//! A dark egui style for the surrounding chrome plus the fixed node colors
//! used on the graph canvas.

use egui::{Color32, Rounding, Stroke, Style, Visuals};
use traversal_viz_graph::CanvasPalette;
use traversal_viz_sequencer::NodeState;

/// Fill and label colors for one node state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeColors {
    /// Circle fill
    pub fill: Color32,
    /// Label color
    pub text: Color32,
}

/// Node colors by animation state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodePalette {
    /// Not yet reached
    pub pending: NodeColors,
    /// Currently highlighted
    pub active: NodeColors,
    /// Already played
    pub visited: NodeColors,
    /// Circle border, shared by every state
    pub border: Color32,
}

impl Default for NodePalette {
    fn default() -> Self {
        Self {
            pending: NodeColors {
                fill: Color32::from_rgb(0xec, 0xf0, 0xf1),
                text: Color32::from_rgb(0x34, 0x49, 0x5e),
            },
            active: NodeColors {
                fill: Color32::from_rgb(0xe7, 0x4c, 0x3c),
                text: Color32::WHITE,
            },
            visited: NodeColors {
                fill: Color32::from_rgb(0x2e, 0xcc, 0x71),
                text: Color32::WHITE,
            },
            border: Color32::from_rgb(0x34, 0x49, 0x5e),
        }
    }
}

impl NodePalette {
    /// Colors for a node in `state`
    pub fn colors(&self, state: NodeState) -> NodeColors {
        match state {
            NodeState::Pending => self.pending,
            NodeState::Active => self.active,
            NodeState::Visited => self.visited,
        }
    }
}

/// Theme colors for the surrounding UI
#[derive(Debug, Clone)]
pub struct ThemeColors {
    /// Primary background color
    pub bg_primary: Color32,
    /// Secondary background (windows, tabs)
    pub bg_secondary: Color32,
    /// Tertiary background (widgets)
    pub bg_tertiary: Color32,
    /// Primary text color
    pub text_primary: Color32,
    /// Accent color for highlights
    pub accent: Color32,
    /// Accent color for hover states
    pub accent_hover: Color32,
    /// Accent color for pressed states
    pub accent_active: Color32,
    /// Border color
    pub border: Color32,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg_primary: Color32::from_rgb(30, 30, 30),
            bg_secondary: Color32::from_rgb(37, 37, 38),
            bg_tertiary: Color32::from_rgb(45, 45, 48),
            text_primary: Color32::from_rgb(220, 220, 220),
            accent: Color32::from_rgb(66, 133, 244),
            accent_hover: Color32::from_rgb(100, 160, 255),
            accent_active: Color32::from_rgb(40, 100, 200),
            border: Color32::from_rgb(60, 60, 60),
        }
    }
}

/// Complete application theme
#[derive(Debug, Clone)]
pub struct AppTheme {
    /// Chrome colors
    pub colors: ThemeColors,
    /// Node colors on the canvas
    pub nodes: NodePalette,
    /// Widget corner rounding
    pub widget_rounding: f32,
    /// Item spacing
    pub item_spacing: f32,
}

impl Default for AppTheme {
    fn default() -> Self {
        Self {
            colors: ThemeColors::default(),
            nodes: NodePalette::default(),
            widget_rounding: 4.0,
            item_spacing: 6.0,
        }
    }
}

impl AppTheme {
    /// Canvas palette matching the node colors
    pub fn canvas_palette(&self) -> CanvasPalette {
        CanvasPalette {
            background: self.colors.bg_primary,
            ..CanvasPalette::default()
        }
    }

    /// Convert to egui Style
    pub fn to_egui_style(&self) -> Style {
        let mut style = Style::default();
        style.visuals = self.to_egui_visuals();
        style.spacing.item_spacing = egui::vec2(self.item_spacing, self.item_spacing);
        style.spacing.button_padding = egui::vec2(8.0, 4.0);
        style
    }

    /// Convert to egui Visuals
    pub fn to_egui_visuals(&self) -> Visuals {
        let colors = &self.colors;
        let rounding = Rounding::same(self.widget_rounding);
        let mut visuals = Visuals::dark();

        visuals.window_fill = colors.bg_secondary;
        visuals.window_stroke = Stroke::new(1.0, colors.border);
        visuals.panel_fill = colors.bg_primary;

        visuals.widgets.noninteractive.bg_fill = colors.bg_tertiary;
        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, colors.text_primary);
        visuals.widgets.noninteractive.rounding = rounding;

        visuals.widgets.inactive.bg_fill = colors.bg_tertiary;
        visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, colors.border);
        visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, colors.text_primary);
        visuals.widgets.inactive.rounding = rounding;

        visuals.widgets.hovered.bg_fill = colors.accent_hover;
        visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, colors.accent);
        visuals.widgets.hovered.rounding = rounding;

        visuals.widgets.active.bg_fill = colors.accent_active;
        visuals.widgets.active.bg_stroke = Stroke::new(1.0, colors.accent);
        visuals.widgets.active.fg_stroke = Stroke::new(1.0, Color32::WHITE);
        visuals.widgets.active.rounding = rounding;

        visuals.selection.bg_fill = Color32::from_rgba_unmultiplied(66, 133, 244, 80);
        visuals.selection.stroke = Stroke::new(1.0, colors.accent);
        visuals.hyperlink_color = colors.accent;
        visuals.extreme_bg_color = colors.bg_primary;
        visuals.faint_bg_color = colors.bg_tertiary;

        visuals
    }

    /// Apply this theme to an egui context
    pub fn apply(&self, ctx: &egui::Context) {
        ctx.set_style(self.to_egui_style());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_palette_by_state() {
        let palette = NodePalette::default();
        assert_eq!(palette.colors(NodeState::Pending).fill, Color32::from_rgb(0xec, 0xf0, 0xf1));
        assert_eq!(palette.colors(NodeState::Active).fill, Color32::from_rgb(0xe7, 0x4c, 0x3c));
        assert_eq!(palette.colors(NodeState::Visited).fill, Color32::from_rgb(0x2e, 0xcc, 0x71));
        assert_eq!(palette.colors(NodeState::Active).text, Color32::WHITE);
    }

    #[test]
    fn test_canvas_uses_theme_background() {
        let theme = AppTheme::default();
        assert_eq!(theme.canvas_palette().background, theme.colors.bg_primary);
        assert_eq!(theme.canvas_palette().edge, CanvasPalette::default().edge);
    }
}
