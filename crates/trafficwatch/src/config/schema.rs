use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Largest upload the dashboard admits (100 MiB).
pub const DEFAULT_MAX_FILE_BYTES: u64 = 100 * 1024 * 1024;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub simulator: SimulatorConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origins: default_allowed_origins(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://localhost:3000".to_string(),
    ]
}

/// Timing and acceptance rules for the mock upload pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulatorConfig {
    /// Interval between upload progress ticks.
    #[serde(default = "default_upload_tick_ms")]
    pub upload_tick_ms: u64,
    /// Lower bound (inclusive) of the per-tick progress increment.
    #[serde(default = "default_min_increment")]
    pub min_increment: u8,
    /// Upper bound (exclusive) of the per-tick progress increment.
    #[serde(default = "default_max_increment")]
    pub max_increment: u8,
    /// Delay between the end of the upload phase and the first processing step.
    #[serde(default = "default_handoff_delay_ms")]
    pub handoff_delay_ms: u64,
    /// Interval between processing step changes.
    #[serde(default = "default_processing_tick_ms")]
    pub processing_tick_ms: u64,
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
    #[serde(default = "default_allowed_mime_types")]
    pub allowed_mime_types: Vec<String>,
    /// Ordered processing step labels.
    #[serde(default = "default_steps")]
    pub steps: Vec<String>,
}

impl SimulatorConfig {
    pub fn upload_tick(&self) -> Duration {
        Duration::from_millis(self.upload_tick_ms)
    }

    pub fn handoff_delay(&self) -> Duration {
        Duration::from_millis(self.handoff_delay_ms)
    }

    pub fn processing_tick(&self) -> Duration {
        Duration::from_millis(self.processing_tick_ms)
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            upload_tick_ms: default_upload_tick_ms(),
            min_increment: default_min_increment(),
            max_increment: default_max_increment(),
            handoff_delay_ms: default_handoff_delay_ms(),
            processing_tick_ms: default_processing_tick_ms(),
            max_file_bytes: default_max_file_bytes(),
            allowed_mime_types: default_allowed_mime_types(),
            steps: default_steps(),
        }
    }
}

fn default_upload_tick_ms() -> u64 {
    200
}

fn default_min_increment() -> u8 {
    5
}

fn default_max_increment() -> u8 {
    20
}

fn default_handoff_delay_ms() -> u64 {
    1000
}

fn default_processing_tick_ms() -> u64 {
    2000
}

fn default_max_file_bytes() -> u64 {
    DEFAULT_MAX_FILE_BYTES
}

fn default_allowed_mime_types() -> Vec<String> {
    ["video/mp4", "video/avi", "video/mov", "image/jpeg", "image/png"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_steps() -> Vec<String> {
    [
        "Extracting frames",
        "Running AI detection",
        "Analyzing violations",
        "Generating evidence",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardConfig {
    /// Number of entries kept in the recent-activity feed.
    #[serde(default = "default_activity_capacity")]
    pub activity_capacity: usize,
    /// Fixture file replacing the embedded demo data.
    #[serde(default)]
    pub fixture_path: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            activity_capacity: default_activity_capacity(),
            fixture_path: None,
        }
    }
}

fn default_activity_capacity() -> usize {
    20
}
