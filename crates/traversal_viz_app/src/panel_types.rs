// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shared panel type definitions.

/// Panel types that can be docked in the window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelType {
    /// Source listing for the selected algorithm
    Code,
    /// Animated graph canvas
    Graph,
    /// Log output
    Console,
}

impl PanelType {
    /// Get the display name for this panel type
    pub fn name(&self) -> &'static str {
        match self {
            Self::Code => "Code",
            Self::Graph => "Graph",
            Self::Console => "Console",
        }
    }

    /// Get the icon for this panel type
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Code => "\u{1f4c4}",    // page
            Self::Graph => "\u{1f500}",   // branch
            Self::Console => "\u{1f4bb}", // terminal
        }
    }
}
