//! Configuration with user-level overrides.
//!
//! Priority: `FORMBENCH_DATA_DIR` env var > user config
//! (`~/.config/formbench/config.toml`) > built-in defaults. A missing or
//! malformed config file falls back to defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
  /// Where the key-value store lives; defaults to the platform data dir
  #[serde(default)]
  pub data_dir: Option<PathBuf>,

  #[serde(default)]
  pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
  /// off | error | warn | info | debug | trace
  #[serde(default = "default_log_level")]
  pub level: String,
  /// daily | hourly | never
  #[serde(default = "default_log_rotation")]
  pub rotation: String,
}

fn default_log_level() -> String {
  "info".to_string()
}

fn default_log_rotation() -> String {
  "daily".to_string()
}

impl Default for LogConfig {
  fn default() -> Self {
    Self {
      level: default_log_level(),
      rotation: default_log_rotation(),
    }
  }
}

impl Config {
  /// Path of the user config file
  pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("formbench").join("config.toml"))
  }

  /// Load the user config, falling back to defaults
  pub fn load() -> Self {
    match Self::user_config_path() {
      Some(path) => Self::load_from(&path),
      None => Self::default(),
    }
  }

  /// Load from an explicit path, falling back to defaults
  pub fn load_from(path: &Path) -> Self {
    let Ok(raw) = std::fs::read_to_string(path) else {
      return Self::default();
    };
    match toml::from_str(&raw) {
      Ok(config) => config,
      Err(e) => {
        warn!("Ignoring malformed config at {}: {}", path.display(), e);
        Self::default()
      }
    }
  }

  /// Resolve the data directory for the key-value store
  pub fn data_dir(&self) -> PathBuf {
    if let Ok(dir) = std::env::var("FORMBENCH_DATA_DIR")
      && !dir.is_empty()
    {
      return PathBuf::from(dir);
    }
    if let Some(ref dir) = self.data_dir {
      return dir.clone();
    }
    dirs::data_dir().unwrap_or_else(|| PathBuf::from(".")).join("formbench")
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.log.level, "info");
    assert_eq!(config.log.rotation, "daily");
    assert!(config.data_dir.is_none());
  }

  #[test]
  fn test_missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load_from(&dir.path().join("nope.toml"));
    assert_eq!(config.log.level, "info");
  }

  #[test]
  fn test_malformed_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "log = [not toml").unwrap();
    let config = Config::load_from(&path);
    assert_eq!(config.log.rotation, "daily");
  }

  #[test]
  fn test_partial_config_parses() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "data_dir = \"/tmp/fb\"\n\n[log]\nlevel = \"debug\"\n").unwrap();
    let config = Config::load_from(&path);
    assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/fb")));
    assert_eq!(config.log.level, "debug");
    assert_eq!(config.log.rotation, "daily");
  }
}
