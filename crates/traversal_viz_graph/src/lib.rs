// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph model for the traversal visualizer.
//!
//! This crate provides:
//! - A static directed graph with insertion-ordered adjacency
//! - The built-in twenty-node demo graph
//! - Breadth-first and depth-first visitation order
//! - A deterministic layered layout
//! - An egui canvas that draws the graph with per-node styling

pub mod node;
pub mod graph;
pub mod demo;
pub mod traversal;
pub mod layout;
pub mod ui;

pub use node::NodeId;
pub use graph::{Graph, GraphBuilder};
pub use demo::{demo_graph, demo_start, DEMO_START};
pub use traversal::{compute, compute_with_stats, reachable_from, TraversalMode, TraversalOrder, TraversalStats};
pub use layout::GraphLayout;
pub use ui::{CanvasPalette, GraphViewState, NodeStyle};
