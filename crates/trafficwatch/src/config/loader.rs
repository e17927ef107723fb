use std::path::{Path, PathBuf};

use crate::config::schema::Config;
use crate::error::ConfigError;

const CONFIG_FILE_NAME: &str = "config.json";

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    load_config_from_str(&content)
}

pub fn load_config_from_str(content: &str) -> Result<Config, ConfigError> {
    let config: Config = serde_json::from_str(content)?;

    validate_config(&config)?;

    Ok(config)
}

/// Loads the config at `path` if given, otherwise the platform default
/// location. A missing default file yields the built-in defaults.
pub fn load_config_or_default(path: Option<&Path>) -> Result<Config, ConfigError> {
    if let Some(path) = path {
        return load_config(path);
    }

    match default_config_path() {
        Some(path) if path.exists() => {
            log::info!("Loading config from {}", path.display());
            load_config(path)
        }
        _ => {
            log::debug!("No config file found, using defaults");
            Ok(Config::default())
        }
    }
}

/// Returns the default config file path for the current platform.
/// - macOS: ~/Library/Application Support/trafficwatch/config.json
/// - Linux: ~/.config/trafficwatch/config.json
/// - Windows: %APPDATA%/trafficwatch/config.json
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("trafficwatch").join(CONFIG_FILE_NAME))
}

/// Rejects configs the simulator or dashboard cannot run with.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let sim = &config.simulator;

    if sim.upload_tick_ms == 0 || sim.processing_tick_ms == 0 {
        return Err(ConfigError::Validation {
            message: "Tick intervals must be greater than zero".to_string(),
        });
    }

    if sim.min_increment == 0 {
        return Err(ConfigError::Validation {
            message: "minIncrement must be greater than zero".to_string(),
        });
    }

    if sim.min_increment >= sim.max_increment {
        return Err(ConfigError::Validation {
            message: format!(
                "minIncrement ({}) must be less than maxIncrement ({})",
                sim.min_increment, sim.max_increment
            ),
        });
    }

    if sim.steps.is_empty() {
        return Err(ConfigError::Validation {
            message: "At least one processing step is required".to_string(),
        });
    }

    if let Some(step) = sim.steps.iter().find(|s| s.trim().is_empty()) {
        return Err(ConfigError::Validation {
            message: format!("Processing step label must not be blank: {:?}", step),
        });
    }

    if sim.allowed_mime_types.is_empty() {
        return Err(ConfigError::Validation {
            message: "At least one allowed MIME type is required".to_string(),
        });
    }

    if config.dashboard.activity_capacity == 0 {
        return Err(ConfigError::Validation {
            message: "activityCapacity must be greater than zero".to_string(),
        });
    }

    Ok(())
}
