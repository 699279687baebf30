// SPDX-License-Identifier: MIT OR Apache-2.0
//! Application configuration.
//!
//! Settings are read from a RON file:
//! - the path in `TRAVERSAL_VIZ_CONFIG`, which must exist, or
//! - `traversal_viz.ron` in the working directory, if present.
//!
//! Without either, the built-in defaults are used.

use crate::listings::Language;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use traversal_viz_graph::{Graph, NodeId, TraversalMode, DEMO_START};
use traversal_viz_sequencer::{SequencerConfig, MAX_SPEED, MIN_SPEED};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "TRAVERSAL_VIZ_CONFIG";

/// Config file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "traversal_viz.ron";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// RON parse error
    #[error("Failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// RON serialization error
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] ron::Error),

    /// A value is out of range
    #[error("Invalid config value for `{field}`: {reason}")]
    Invalid {
        /// Offending field
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

/// Window settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Initial width in logical pixels
    pub width: u32,
    /// Initial height in logical pixels
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Graph Traversal Visualizer".to_string(),
            width: 1400,
            height: 820,
        }
    }
}

/// Playback settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// How long each node stays highlighted, in milliseconds
    pub dwell_ms: u64,
    /// Delay between a cancelled run settling and the next run starting
    pub cancel_grace_ms: u64,
    /// Playback speed multiplier
    pub speed: f32,
    /// Pan/zoom to each newly active node
    pub focus_enabled: bool,
    /// Zoom level used when focusing a node
    pub focus_scale: f32,
    /// Length of the focus transition, in milliseconds
    pub focus_duration_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            dwell_ms: 1000,
            cancel_grace_ms: 100,
            speed: 1.0,
            focus_enabled: true,
            focus_scale: 1.2,
            focus_duration_ms: 700,
        }
    }
}

impl AnimationConfig {
    /// Sequencer timing derived from these settings
    pub fn sequencer_config(&self) -> SequencerConfig {
        SequencerConfig {
            dwell: Duration::from_millis(self.dwell_ms),
            grace: Duration::from_millis(self.cancel_grace_ms),
            speed: self.speed,
            focus: self.focus_enabled,
        }
    }
}

/// Traversal defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraversalConfig {
    /// Start node for every run
    pub start_node: String,
    /// Algorithm selected at startup
    pub default_mode: TraversalMode,
    /// Listing language selected at startup
    pub default_language: Language,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            start_node: DEMO_START.to_string(),
            default_mode: TraversalMode::BreadthFirst,
            default_language: Language::JavaScript,
        }
    }
}

impl TraversalConfig {
    /// Start node as an ID
    pub fn start(&self) -> NodeId {
        NodeId::from(self.start_node.as_str())
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Window settings
    pub window: WindowConfig,
    /// Playback settings
    pub animation: AnimationConfig,
    /// Traversal defaults
    pub traversal: TraversalConfig,
}

impl AppConfig {
    /// Resolve the config source and load it.
    ///
    /// Returns the config and the path it came from, if any.
    pub fn discover() -> Result<(Self, Option<PathBuf>), ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            let path = PathBuf::from(path);
            return Ok((Self::load(&path)?, Some(path)));
        }

        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.is_file() {
            return Ok((Self::load(&local)?, Some(local)));
        }

        Ok((Self::default(), None))
    }

    /// Load config from a RON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_ron(&content)
    }

    /// Parse config from RON text
    pub fn from_ron(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = ron::from_str(content)?;
        Ok(config)
    }

    /// Serialize to pretty RON
    pub fn to_ron(&self) -> Result<String, ConfigError> {
        let pretty = ron::ser::PrettyConfig::default()
            .depth_limit(3)
            .separate_tuple_members(true);
        Ok(ron::ser::to_string_pretty(self, pretty)?)
    }

    /// Check values against the graph they will be used with
    pub fn validate(&self, graph: &Graph) -> Result<(), ConfigError> {
        if self.animation.dwell_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "animation.dwell_ms",
                reason: "must be greater than zero".to_string(),
            });
        }

        let speed = self.animation.speed;
        if !speed.is_finite() || !(MIN_SPEED..=MAX_SPEED).contains(&speed) {
            return Err(ConfigError::Invalid {
                field: "animation.speed",
                reason: format!("must be between {MIN_SPEED} and {MAX_SPEED}, got {speed}"),
            });
        }

        if !self.animation.focus_scale.is_finite() || self.animation.focus_scale <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "animation.focus_scale",
                reason: "must be a positive number".to_string(),
            });
        }

        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid {
                field: "window",
                reason: "width and height must be non-zero".to_string(),
            });
        }

        if !graph.contains(&self.traversal.start()) {
            return Err(ConfigError::Invalid {
                field: "traversal.start_node",
                reason: format!("node `{}` is not in graph `{}`", self.traversal.start_node, graph.name),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use traversal_viz_graph::demo_graph;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.animation.dwell_ms, 1000);
        assert_eq!(config.animation.cancel_grace_ms, 100);
        assert_eq!(config.traversal.start_node, "1");
        assert_eq!(config.traversal.default_mode, TraversalMode::BreadthFirst);
        assert!(config.validate(&demo_graph()).is_ok());
    }

    #[test]
    fn test_serialization() {
        let mut config = AppConfig::default();
        config.traversal.default_mode = TraversalMode::DepthFirst;
        config.traversal.default_language = Language::Go;

        let ron_str = config.to_ron().unwrap();
        let loaded = AppConfig::from_ron(&ron_str).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = AppConfig::from_ron("(animation: (dwell_ms: 250))").unwrap();
        assert_eq!(config.animation.dwell_ms, 250);
        assert_eq!(config.animation.cancel_grace_ms, 100);
        assert_eq!(config.window, WindowConfig::default());

        let timing = config.animation.sequencer_config();
        assert_eq!(timing.dwell, Duration::from_millis(250));
        assert!(timing.focus);
    }

    #[test]
    fn test_parse_error() {
        let err = AppConfig::from_ron("(animation: (dwell_ms: \"fast\"))").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_rejects_zero_dwell() {
        let mut config = AppConfig::default();
        config.animation.dwell_ms = 0;
        let err = config.validate(&demo_graph()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "animation.dwell_ms", .. }));
    }

    #[test]
    fn test_validation_rejects_unknown_start() {
        let mut config = AppConfig::default();
        config.traversal.start_node = "99".to_string();
        let err = config.validate(&demo_graph()).unwrap_err();
        assert!(err.to_string().contains("99"));
    }

    #[test]
    fn test_validation_rejects_speed_out_of_range() {
        let mut config = AppConfig::default();
        config.animation.speed = 10.0;
        assert!(config.validate(&demo_graph()).is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = AppConfig::load(Path::new("/nonexistent/traversal_viz.ron")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
