//! Configuration management for rcat
//!
//! Handles loading and saving of rcat defaults so invocations can omit
//! the usual flags.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{RcatError, Result};

/// Main configuration for rcat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RcatConfig {
    /// Port used when a command does not specify one
    pub default_port: u16,

    /// Dial timeout in seconds for connect mode
    pub dial_timeout_secs: u64,

    /// Enable debug logging
    pub debug: bool,
}

impl Default for RcatConfig {
    fn default() -> Self {
        Self {
            default_port: 9999,
            dial_timeout_secs: 10,
            debug: false,
        }
    }
}

impl RcatConfig {
    /// Creates a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file
    pub fn load(path: &PathBuf) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| RcatError::ConfigError(e.to_string()))
    }

    /// Saves configuration to a file
    pub fn save(&self, path: &PathBuf) -> Result<()> {
        let contents =
            toml::to_string_pretty(self).map_err(|e| RcatError::ConfigError(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Returns the default configuration directory
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("rcat")
    }

    /// Returns the default configuration file path
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Builder pattern: set the default port
    pub fn with_default_port(mut self, port: u16) -> Self {
        self.default_port = port;
        self
    }

    /// Builder pattern: set the dial timeout
    pub fn with_dial_timeout(mut self, secs: u64) -> Self {
        self.dial_timeout_secs = secs;
        self
    }

    /// Builder pattern: enable/disable debug logging
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RcatConfig::default();
        assert_eq!(config.default_port, 9999);
        assert_eq!(config.dial_timeout_secs, 10);
        assert!(!config.debug);
    }

    #[test]
    fn test_builder_pattern() {
        let config = RcatConfig::new()
            .with_default_port(4444)
            .with_dial_timeout(3)
            .with_debug(true);

        assert_eq!(config.default_port, 4444);
        assert_eq!(config.dial_timeout_secs, 3);
        assert!(config.debug);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = RcatConfig::new().with_default_port(31337);
        config.save(&path).unwrap();

        let loaded = RcatConfig::load(&path).unwrap();
        assert_eq!(loaded.default_port, 31337);
        assert_eq!(loaded.dial_timeout_secs, config.dial_timeout_secs);
    }
}
