// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph canvas rendering.
//!
//! Features:
//! - Circle nodes with per-node fill, text color and label
//! - Directed edges with arrow heads
//! - Pan/zoom navigation (drag, scroll wheel, double-click to fit)
//! - Animated focus on a node (ease-in-out)
//! - Status line and optional overlay text

use crate::graph::Graph;
use crate::layout::GraphLayout;
use crate::node::NodeId;
use egui::{Color32, Pos2, Rect, Stroke, Vec2};

/// Node visual dimensions
const NODE_RADIUS: f32 = 24.0;
const NODE_BORDER: f32 = 2.0;
const LABEL_SIZE: f32 = 11.0;

/// Edge visual parameters
const EDGE_THICKNESS: f32 = 1.5;
const ARROW_LENGTH: f32 = 9.0;
const ARROW_WIDTH: f32 = 5.0;

/// Grid parameters
const GRID_SPACING: f32 = 40.0;

/// Margin kept around the graph when fitting it into view
const FIT_MARGIN: f32 = 60.0;

/// How a single node is drawn
#[derive(Debug, Clone, PartialEq)]
pub struct NodeStyle {
    /// Fill color
    pub fill: Color32,
    /// Border color
    pub border: Color32,
    /// Label color
    pub text: Color32,
    /// Label text (may span lines)
    pub label: String,
    /// Draw a selection ring
    pub selected: bool,
}

/// Canvas-wide colors
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasPalette {
    /// Background fill
    pub background: Color32,
    /// Grid line color
    pub grid: Color32,
    /// Edge and arrow color
    pub edge: Color32,
    /// Selection ring color
    pub selection: Color32,
    /// Status line color
    pub status: Color32,
}

impl Default for CanvasPalette {
    fn default() -> Self {
        Self {
            background: Color32::from_rgb(28, 30, 34),
            grid: Color32::from_rgba_unmultiplied(70, 70, 70, 90),
            edge: Color32::from_rgb(0x95, 0xa5, 0xa6),
            selection: Color32::from_rgb(0xd3, 0x54, 0x00),
            status: Color32::from_gray(150),
        }
    }
}

/// In-flight pan/zoom transition
#[derive(Debug, Clone, Copy)]
struct FocusAnimation {
    from_pan: Vec2,
    to_pan: Vec2,
    from_zoom: f32,
    to_zoom: f32,
    elapsed: f32,
    duration: f32,
}

impl FocusAnimation {
    fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }
}

/// Graph canvas UI state
pub struct GraphViewState {
    /// Current pan offset (graph space)
    pub pan: Vec2,
    /// Current zoom level
    pub zoom: f32,
    /// Show background grid
    pub show_grid: bool,
    /// Canvas colors
    pub palette: CanvasPalette,
    /// Fit the graph into view on the next frame
    needs_fit: bool,
    /// Active focus transition
    focus: Option<FocusAnimation>,
}

impl GraphViewState {
    /// Create a new graph view state
    pub fn new() -> Self {
        Self {
            pan: Vec2::ZERO,
            zoom: 1.0,
            show_grid: true,
            palette: CanvasPalette::default(),
            needs_fit: true,
            focus: None,
        }
    }

    /// Convert screen position to graph position
    pub fn screen_to_graph(&self, screen_pos: Pos2, rect: Rect) -> Pos2 {
        let center = rect.center();
        Pos2::new(
            (screen_pos.x - center.x) / self.zoom - self.pan.x,
            (screen_pos.y - center.y) / self.zoom - self.pan.y,
        )
    }

    /// Convert graph position to screen position
    pub fn graph_to_screen(&self, graph_pos: Pos2, rect: Rect) -> Pos2 {
        let center = rect.center();
        Pos2::new(
            (graph_pos.x + self.pan.x) * self.zoom + center.x,
            (graph_pos.y + self.pan.y) * self.zoom + center.y,
        )
    }

    /// Request that the whole graph be fitted into view
    pub fn request_fit(&mut self) {
        self.needs_fit = true;
        self.focus = None;
    }

    /// Start an eased transition that centers `position` at `zoom`
    pub fn focus_on(&mut self, position: [f32; 2], zoom: f32, duration_secs: f32) {
        self.focus = Some(FocusAnimation {
            from_pan: self.pan,
            to_pan: Vec2::new(-position[0], -position[1]),
            from_zoom: self.zoom,
            to_zoom: zoom.clamp(0.1, 4.0),
            elapsed: 0.0,
            duration: duration_secs.max(0.0),
        });
    }

    /// Whether a focus transition is running
    pub fn is_animating(&self) -> bool {
        self.focus.is_some()
    }

    /// Advance the focus transition by `dt` seconds
    pub fn advance(&mut self, dt: f32) {
        let Some(focus) = self.focus.as_mut() else {
            return;
        };

        focus.elapsed += dt;
        let t = ease_in_out_quad(focus.progress());
        self.pan = focus.from_pan + (focus.to_pan - focus.from_pan) * t;
        self.zoom = focus.from_zoom + (focus.to_zoom - focus.from_zoom) * t;

        if focus.progress() >= 1.0 {
            self.focus = None;
        }
    }

    fn fit(&mut self, layout: &GraphLayout, rect: Rect) {
        let Some((min, max)) = layout.bounds() else {
            return;
        };
        let width = (max[0] - min[0]) + 2.0 * (NODE_RADIUS + FIT_MARGIN);
        let height = (max[1] - min[1]) + 2.0 * (NODE_RADIUS + FIT_MARGIN);
        self.zoom = (rect.width() / width).min(rect.height() / height).clamp(0.1, 2.0);
        self.pan = Vec2::new(-(min[0] + max[0]) / 2.0, -(min[1] + max[1]) / 2.0);
        self.needs_fit = false;
    }

    /// Render the graph
    ///
    /// `style_of` decides how each node looks; `overlay` is drawn in the
    /// bottom-left corner when present.
    pub fn ui(
        &mut self,
        ui: &mut egui::Ui,
        graph: &Graph,
        layout: &GraphLayout,
        style_of: impl Fn(&NodeId) -> NodeStyle,
        overlay: Option<&str>,
    ) {
        let rect = ui.available_rect_before_wrap();
        let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        if self.needs_fit {
            self.fit(layout, rect);
        }

        self.advance(ui.input(|i| i.stable_dt));
        if self.is_animating() {
            ui.ctx().request_repaint();
        }

        self.handle_input(ui, &response, rect, layout);

        painter.rect_filled(rect, 0.0, self.palette.background);
        if self.show_grid {
            self.draw_grid(&painter, rect);
        }

        self.draw_edges(&painter, rect, graph, layout);
        self.draw_nodes(&painter, rect, layout, &style_of);

        if let Some(text) = overlay {
            self.draw_overlay(&painter, rect, text);
        }
        self.draw_status_bar(&painter, rect, graph);
    }

    fn handle_input(&mut self, ui: &egui::Ui, response: &egui::Response, rect: Rect, layout: &GraphLayout) {
        if response.double_clicked() {
            self.fit(layout, rect);
            self.focus = None;
            return;
        }

        if response.dragged() {
            let delta = response.drag_delta();
            self.pan += delta / self.zoom;
            self.focus = None;
        }

        // Zoom with scroll wheel, toward the mouse position
        let Some(mouse_pos) = response.hover_pos() else {
            return;
        };
        let scroll_delta = ui.input(|i| i.raw_scroll_delta.y);
        if scroll_delta != 0.0 {
            let mouse_graph = self.screen_to_graph(mouse_pos, rect);
            let old_zoom = self.zoom;
            self.zoom = (self.zoom * (1.0 + scroll_delta * 0.001)).clamp(0.1, 4.0);
            if self.zoom != old_zoom {
                // Keep the graph point under the cursor fixed on screen
                self.pan = (mouse_pos - rect.center()) / self.zoom - mouse_graph.to_vec2();
                self.focus = None;
            }
        }
    }

    fn draw_grid(&self, painter: &egui::Painter, rect: Rect) {
        let spacing = GRID_SPACING * self.zoom;
        if spacing < 4.0 {
            return;
        }
        let stroke = Stroke::new(1.0, self.palette.grid);

        let origin = self.graph_to_screen(Pos2::ZERO, rect);
        let mut x = rect.left() + (origin.x - rect.left()).rem_euclid(spacing);
        while x < rect.right() {
            painter.line_segment([Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())], stroke);
            x += spacing;
        }

        let mut y = rect.top() + (origin.y - rect.top()).rem_euclid(spacing);
        while y < rect.bottom() {
            painter.line_segment([Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)], stroke);
            y += spacing;
        }
    }

    fn draw_edges(&self, painter: &egui::Painter, rect: Rect, graph: &Graph, layout: &GraphLayout) {
        let stroke = Stroke::new(EDGE_THICKNESS * self.zoom.max(0.5), self.palette.edge);
        let radius = NODE_RADIUS * self.zoom;

        for (from, to) in graph.edges() {
            let (Some(a), Some(b)) = (layout.position(from), layout.position(to)) else {
                continue;
            };
            let start = self.graph_to_screen(Pos2::new(a[0], a[1]), rect);
            let end = self.graph_to_screen(Pos2::new(b[0], b[1]), rect);
            let dir = (end - start).normalized();
            if !dir.x.is_finite() || !dir.y.is_finite() {
                continue;
            }

            let tail = start + dir * radius;
            let tip = end - dir * radius;
            painter.line_segment([tail, tip], stroke);

            let back = tip - dir * ARROW_LENGTH * self.zoom;
            let normal = dir.rot90() * ARROW_WIDTH * self.zoom;
            painter.add(egui::Shape::convex_polygon(
                vec![tip, back + normal, back - normal],
                self.palette.edge,
                Stroke::NONE,
            ));
        }
    }

    fn draw_nodes(
        &self,
        painter: &egui::Painter,
        rect: Rect,
        layout: &GraphLayout,
        style_of: &impl Fn(&NodeId) -> NodeStyle,
    ) {
        let radius = NODE_RADIUS * self.zoom;

        for (node_id, pos) in layout.iter() {
            let center = self.graph_to_screen(Pos2::new(pos[0], pos[1]), rect);
            if !rect.expand(radius).contains(center) {
                continue;
            }

            let style = style_of(node_id);
            painter.circle(center, radius, style.fill, Stroke::new(NODE_BORDER, style.border));
            if style.selected {
                painter.circle_stroke(
                    center,
                    radius + 3.0 * self.zoom,
                    Stroke::new(2.0, self.palette.selection),
                );
            }

            painter.text(
                center,
                egui::Align2::CENTER_CENTER,
                &style.label,
                egui::FontId::proportional(LABEL_SIZE * self.zoom),
                style.text,
            );
        }
    }

    fn draw_overlay(&self, painter: &egui::Painter, rect: Rect, text: &str) {
        let galley = painter.layout_no_wrap(
            text.to_owned(),
            egui::FontId::proportional(13.0),
            Color32::from_rgb(55, 65, 81),
        );
        let min = Pos2::new(rect.left() + 10.0, rect.bottom() - 36.0 - galley.size().y);
        let box_rect = Rect::from_min_size(min, galley.size() + Vec2::new(20.0, 12.0));
        painter.rect_filled(box_rect, 6.0, Color32::WHITE);
        painter.galley(min + Vec2::new(10.0, 6.0), galley, Color32::BLACK);
    }

    fn draw_status_bar(&self, painter: &egui::Painter, rect: Rect, graph: &Graph) {
        painter.text(
            Pos2::new(rect.left() + 8.0, rect.bottom() - 10.0),
            egui::Align2::LEFT_CENTER,
            format!(
                "Nodes: {} | Edges: {} | Zoom: {:.0}%",
                graph.node_count(),
                graph.edge_count(),
                self.zoom * 100.0,
            ),
            egui::FontId::proportional(11.0),
            self.palette.status,
        );
    }
}

impl Default for GraphViewState {
    fn default() -> Self {
        Self::new()
    }
}

/// Quadratic ease-in-out over `t` in `[0, 1]`
pub fn ease_in_out_quad(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_graph_roundtrip() {
        let mut view = GraphViewState::new();
        view.pan = Vec2::new(30.0, -12.0);
        view.zoom = 1.5;
        let rect = Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0));
        let graph_pos = Pos2::new(10.0, 20.0);
        let back = view.screen_to_graph(view.graph_to_screen(graph_pos, rect), rect);
        assert!((back - graph_pos).length() < 1e-3);
    }

    #[test]
    fn test_ease_endpoints() {
        assert_eq!(ease_in_out_quad(0.0), 0.0);
        assert_eq!(ease_in_out_quad(0.5), 0.5);
        assert_eq!(ease_in_out_quad(1.0), 1.0);
    }

    #[test]
    fn test_focus_animation_reaches_target() {
        let mut view = GraphViewState::new();
        view.focus_on([100.0, 50.0], 1.2, 0.7);
        assert!(view.is_animating());

        view.advance(0.35);
        assert!(view.is_animating());
        assert!(view.zoom > 1.0 && view.zoom < 1.2);

        view.advance(0.5);
        assert!(!view.is_animating());
        assert_eq!(view.pan, Vec2::new(-100.0, -50.0));
        assert!((view.zoom - 1.2).abs() < 1e-6);
    }

    #[test]
    fn test_zero_duration_focus_jumps() {
        let mut view = GraphViewState::new();
        view.focus_on([5.0, 5.0], 2.0, 0.0);
        view.advance(0.0);
        assert_eq!(view.zoom, 2.0);
        assert!(!view.is_animating());
    }
}
