// SPDX-License-Identifier: MIT OR Apache-2.0
//! Docked panel implementations.

mod code_listing;
pub mod console;
mod graph_view;

pub use code_listing::CodeListingPanel;
pub use console::ConsolePanel;
pub use graph_view::GraphViewPanel;
