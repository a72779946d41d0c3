//! Navigation configuration
//!
//! User preferences for the navigation engine. Serializable so a host can
//! persist them next to its own settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How continuous reading learns that an utterance finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadMode {
    /// The host calls `on_speech_complete` after each utterance
    #[default]
    Callback,
    /// The host calls `poll_reading` periodically
    Polling,
}

/// Navigation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Maximum remembered positions
    pub history_capacity: usize,
    /// Soft wrap width (in characters) of the visual line walker
    pub line_width: usize,
    /// Minimum time between polls in polling read mode
    pub poll_interval_ms: u64,
    /// Continuous reading advance strategy
    pub read_mode: ReadMode,
    /// Enter data tables automatically when group navigation lands in one
    pub auto_table_mode: bool,
    /// Treat iframes as plain objects instead of handing navigation over
    pub ignore_iframes: bool,
    /// Longest group description before it gets cut at a word boundary
    pub max_group_chars: usize,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            history_capacity: 32,
            line_width: 80,
            poll_interval_ms: 1000,
            read_mode: ReadMode::Callback,
            auto_table_mode: true,
            ignore_iframes: false,
            max_group_chars: 2000,
        }
    }
}

impl NavConfig {
    /// Polling interval as a duration
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Parse a JSON preferences blob, keeping defaults for missing keys
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NavConfig::default();
        assert_eq!(config.history_capacity, 32);
        assert_eq!(config.poll_interval(), Duration::from_secs(1));
        assert_eq!(config.read_mode, ReadMode::Callback);
        assert!(config.auto_table_mode);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = NavConfig::from_json(r#"{"read_mode":"polling","line_width":40}"#).unwrap();
        assert_eq!(config.read_mode, ReadMode::Polling);
        assert_eq!(config.line_width, 40);
        assert_eq!(config.history_capacity, 32);
    }
}
