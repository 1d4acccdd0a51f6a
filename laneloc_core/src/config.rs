//! Configuration file loading
//!
//! Any `Deserialize` type can be read from YAML, TOML or JSON. The format is
//! picked from the file extension.

use crate::error::{LaneError, LaneResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Supported on-disk formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
    Json,
}

impl ConfigFormat {
    /// Guess the format from a path's extension
    pub fn from_path(path: &Path) -> LaneResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("yaml") | Some("yml") => Ok(ConfigFormat::Yaml),
            Some("toml") => Ok(ConfigFormat::Toml),
            Some("json") => Ok(ConfigFormat::Json),
            _ => Err(LaneError::config(format!(
                "unrecognized config extension: {}",
                path.display()
            ))),
        }
    }
}

/// Parse a config from a string in the given format
pub fn parse_config<T: DeserializeOwned>(text: &str, format: ConfigFormat) -> LaneResult<T> {
    let value = match format {
        ConfigFormat::Yaml => serde_yaml::from_str(text)?,
        ConfigFormat::Toml => toml::from_str(text)?,
        ConfigFormat::Json => serde_json::from_str(text)?,
    };
    Ok(value)
}

/// Load a config file, dispatching on its extension
pub fn load_config<T: DeserializeOwned>(path: &Path) -> LaneResult<T> {
    let format = ConfigFormat::from_path(path)?;
    let text = std::fs::read_to_string(path)?;
    log::debug!("loading {:?} config from {}", format, path.display());
    parse_config(&text, format)
}

/// Save a config as YAML, creating parent directories as needed
pub fn save_yaml<T: Serialize>(value: &T, path: &Path) -> LaneResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let yaml = serde_yaml::to_string(value)?;
    std::fs::write(path, yaml)?;
    Ok(())
}
