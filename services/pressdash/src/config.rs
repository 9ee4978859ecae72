//! Configuration for the dashboard client

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_poll_interval")]
    pub poll_interval_seconds: u64,
    #[serde(default = "default_refresh_delay")]
    pub refresh_delay_seconds: u64,
    /// Row range submitted by the canned action control
    #[serde(default)]
    pub canned_rows: RowRange,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            poll_interval_seconds: default_poll_interval(),
            refresh_delay_seconds: default_refresh_delay(),
            canned_rows: RowRange::default(),
        }
    }
}

/// An inclusive range of spreadsheet rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowRange {
    #[serde(default = "default_canned_start")]
    pub start: i64,
    #[serde(default = "default_canned_end")]
    pub end: i64,
}

impl Default for RowRange {
    fn default() -> Self {
        Self {
            start: default_canned_start(),
            end: default_canned_end(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_poll_interval() -> u64 {
    30
}

fn default_refresh_delay() -> u64 {
    2
}

fn default_canned_start() -> i64 {
    26
}

fn default_canned_end() -> i64 {
    27
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        crate::DashboardError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    let config: Config = serde_json::from_str(&content)?;
    Ok(config)
}
