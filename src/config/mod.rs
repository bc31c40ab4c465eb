//! Configuration management for Shiori.
//!
//! Configuration is read from `~/.config/shiori/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is
//! created. Missing fields fall back to defaults.

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::sync::DEFAULT_POLL_MS;

pub const DEFAULT_BACKEND_KEY: &str = "bookmarks";

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub sync: SyncConfig,
}

/// Where the collection lives: the backend data directory and the fixed
/// key the serialized collection is stored under.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub dir: Option<PathBuf>,
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: None,
            key: DEFAULT_BACKEND_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// How often the watcher fingerprints the backend slot, in ms.
    pub poll_ms: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            poll_ms: DEFAULT_POLL_MS,
        }
    }
}

impl Config {
    /// Load configuration from the default path, creating a commented
    /// default file on first run.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: config_path,
            source: e,
        })?;

        Ok(config)
    }

    /// `~/.config/shiori/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("shiori").join("config.toml"))
    }

    fn create_default_config(path: &PathBuf) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let default_config = Self::default_config_content();

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        file.write_all(default_config.as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.clone(),
                source: e,
            })?;

        Ok(())
    }

    fn default_config_content() -> String {
        r##"# Shiori Configuration

[storage]
# Directory holding the bookmark data. Defaults to the platform data dir
# (e.g. ~/.local/share/shiori). Every process pointed at the same
# directory shares one collection.
# dir = "/path/to/data"

# Key the serialized collection is stored under.
key = "bookmarks"

[sync]
# How often running instances check for changes made by other instances,
# in milliseconds.
poll_ms = 500
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_deserializes() {
        let content = Config::default_config_content();
        let config: Config = toml::from_str(&content).expect("Default config should be valid TOML");

        assert_eq!(config.storage.key, "bookmarks");
        assert_eq!(config.sync.poll_ms, DEFAULT_POLL_MS);
        assert!(config.storage.dir.is_none());
    }

    #[test]
    fn test_partial_config() {
        let content = r#"
[sync]
poll_ms = 2000
"#;
        let config: Config = toml::from_str(content).expect("Partial config should work");

        assert_eq!(config.sync.poll_ms, 2000);
        // Defaults fill in the rest
        assert_eq!(config.storage.key, "bookmarks");
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").expect("Empty config should work");
        assert_eq!(config.storage.key, DEFAULT_BACKEND_KEY);
        assert_eq!(config.sync.poll_ms, DEFAULT_POLL_MS);
    }
}
