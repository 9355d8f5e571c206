//! Application configuration management.
//!
//! Configuration is stored at `~/.config/pokegrid/config.json`. Every field
//! is optional; a missing file means defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Application name used for config/cache directory paths
const APP_NAME: &str = "pokegrid";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Public PokeAPI endpoint
pub const DEFAULT_API_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// HTTP request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory for the log file: `log_dir` from the file, else
    /// `<cache dir>/pokegrid`
    pub fn log_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.log_dir {
            return Ok(dir.clone());
        }
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    pub fn api_base_url(&self) -> &str {
        self.api_base_url
            .as_deref()
            .map(|url| url.trim_end_matches('/'))
            .unwrap_or(DEFAULT_API_BASE_URL)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .filter(|&secs| secs > 0)
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api_base_url(), DEFAULT_API_BASE_URL);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_overrides() {
        let config: Config = serde_json::from_str(
            r#"{"api_base_url": "http://localhost:8080/api/v2/", "request_timeout_secs": 3}"#,
        )
        .expect("Failed to parse config test JSON");
        assert_eq!(config.api_base_url(), "http://localhost:8080/api/v2");
        assert_eq!(config.request_timeout(), Duration::from_secs(3));
    }

    #[test]
    fn test_zero_timeout_falls_back() {
        let config = Config {
            request_timeout_secs: Some(0),
            ..Config::default()
        };
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let path = std::env::temp_dir().join("pokegrid-config-does-not-exist.json");
        let config = Config::load_from(&path).expect("missing file should load");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_log_dir_override() {
        let config: Config = serde_json::from_str(r#"{"log_dir": "/var/log/pokegrid"}"#)
            .expect("Failed to parse config test JSON");
        assert_eq!(
            config.log_dir().expect("log dir"),
            PathBuf::from("/var/log/pokegrid")
        );
    }

    #[test]
    fn test_default_log_dir_is_app_cache_dir() {
        if let Ok(dir) = Config::default().log_dir() {
            assert!(dir.ends_with(APP_NAME));
        }
    }

    #[test]
    fn test_empty_object_parses() {
        let config: Config = serde_json::from_str("{}").expect("Failed to parse empty config");
        assert_eq!(config, Config::default());
    }
}
