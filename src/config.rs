use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

// Deployment profile is a build-time decision: the h5 build runs behind a
// reverse proxy and uses a relative path, every other build talks to the
// fixed external origin.
#[cfg(feature = "h5")]
const DEFAULT_BASE_URL: &str = "/api";
#[cfg(not(feature = "h5"))]
const DEFAULT_BASE_URL: &str = "https://api.example.com";

/// Optional startup configuration, read once and never written back.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Config {
    pub api_origin: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Base URL for the generation backend: the configured override when
    /// present, otherwise the build-profile default.
    pub fn base_url(&self) -> String {
        self.api_origin
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("studio").join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert!(config.api_origin.is_none());
    }

    #[cfg(not(feature = "h5"))]
    #[test]
    fn default_base_url_is_the_external_origin() {
        assert_eq!(Config::new().base_url(), "https://api.example.com");
    }

    #[test]
    fn configured_origin_overrides_the_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"api_origin":"http://localhost:8000"}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.base_url(), "http://localhost:8000");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();

        assert!(Config::load_from(&path).is_err());
    }
}
