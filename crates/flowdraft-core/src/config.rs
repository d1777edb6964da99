//! Editor tunables.

use crate::shapes::TextMetrics;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Every tunable constant of the editor core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Maximum gap between the two presses of a double-click.
    pub double_click_ms: u64,
    /// Maximum pointer travel between the two presses, in pixels.
    pub double_click_distance: f64,
    /// Half-size of the square hit box around a connection dot.
    pub dot_hit_radius: f64,
    /// How close the pointer must be to a connection point to snap a line to it.
    pub connection_tolerance: f64,
    pub autosave_interval_secs: u64,
    /// Number of backups kept after rotation.
    pub backup_count: usize,
    pub backup_dir: PathBuf,
    pub text_metrics: TextMetrics,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            double_click_ms: 500,
            double_click_distance: 0.0,
            dot_hit_radius: 6.0,
            connection_tolerance: 10.0,
            autosave_interval_secs: 30,
            backup_count: 5,
            backup_dir: default_backup_dir(),
            text_metrics: TextMetrics::default(),
        }
    }
}

impl EditorConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn double_click_window(&self) -> Duration {
        Duration::from_millis(self.double_click_ms)
    }

    pub fn autosave_interval(&self) -> Duration {
        Duration::from_secs(self.autosave_interval_secs)
    }
}

/// `<local data dir>/flowdraft/backups`, or a relative `backups` dir when the
/// platform has no data dir.
pub fn default_backup_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("flowdraft").join("backups"))
        .unwrap_or_else(|| PathBuf::from("backups"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = EditorConfig::from_json(r#"{ "backup_count": 2, "dot_hit_radius": 4.5 }"#).unwrap();
        assert_eq!(config.backup_count, 2);
        assert_eq!(config.dot_hit_radius, 4.5);
        assert_eq!(config.double_click_window(), Duration::from_millis(500));
        assert_eq!(config.connection_tolerance, 10.0);
    }

    #[test]
    fn test_backup_dir_ends_with_app_folder() {
        let dir = default_backup_dir();
        assert!(dir.ends_with("backups"));
    }
}
