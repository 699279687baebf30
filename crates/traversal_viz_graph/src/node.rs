// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node identifiers.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Unique string label for a graph vertex
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Create a node ID from any string-like label
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Get the raw label
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Display label used by the graph canvas ("Node 7")
    pub fn display_label(&self) -> String {
        format!("Node {}", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for NodeId {
    fn from(label: String) -> Self {
        Self(label)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_label() {
        let id = NodeId::from("7");
        assert_eq!(id.to_string(), "7");
        assert_eq!(id.display_label(), "Node 7");
    }

    #[test]
    fn test_borrow_lookup() {
        let mut map = indexmap::IndexMap::new();
        map.insert(NodeId::from("a"), 1);
        assert_eq!(map.get("a"), Some(&1));
    }
}
