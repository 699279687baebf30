// SPDX-License-Identifier: MIT OR Apache-2.0
//! Traversal Visualizer - split-screen BFS/DFS playback
//!
//! Shows the source of a graph traversal next to a canvas that replays it
//! node by node:
//! - Code listing for the selected algorithm and language
//! - Animated graph with pending / active / visited nodes
//! - In-app console fed by `tracing`
//!
//! ## Architecture
//!
//! Traversal orders come from `traversal_viz_graph`; playback timing,
//! cancellation and re-entrancy live in `traversal_viz_sequencer`. This
//! crate owns the window, the docked panels and the frame loop that drives
//! the sequencer.

mod app;
mod config;
mod controls;
mod listings;
mod panel_types;
mod panels;
mod surface;
mod theme;

use app::VisualizerApp;
use config::AppConfig;
use panels::console::TracingBridge;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use traversal_viz_graph::demo_graph;

const DEFAULT_FILTER: &str = "traversal_viz_app=debug,traversal_viz_sequencer=debug,wgpu=warn,naga=warn";

fn main() {
    // Create the console tracing bridge (channel pair)
    let (bridge_layer, tracing_rx) = TracingBridge::new();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(bridge_layer)
        .init();

    tracing::info!("Starting Traversal Visualizer v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(tracing_rx) {
        tracing::error!("Visualizer failed: {e}");
        std::process::exit(1);
    }
}

fn run(tracing_rx: std::sync::mpsc::Receiver<panels::console::TracingEvent>) -> app::Result<()> {
    let (config, source) = AppConfig::discover()?;
    match &source {
        Some(path) => tracing::info!("Loaded config from {}", path.display()),
        None => tracing::info!("No config file found, using defaults"),
    }

    let graph = demo_graph();
    config.validate(&graph)?;
    tracing::debug!("Effective config:\n{}", config.to_ron()?);
    tracing::debug!(
        graph = %graph.name,
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "Graph ready"
    );

    VisualizerApp::new(config, graph, Some(tracing_rx)).run()
}
