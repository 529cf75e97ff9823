//! Configuration management for the oilfinder CLI

use anyhow::{Context, Result};
use oilfinder::CatalogLayout;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Catalog file used when nothing is configured
pub const DEFAULT_DATA: &str = "data/data.json";

/// API server used when nothing is configured
pub const DEFAULT_SERVER: &str = "http://localhost:5000";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    pub data: Option<PathBuf>,
    pub layout: Option<CatalogLayout>,
    pub products: Option<PathBuf>,
    pub server: Option<String>,
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("oilfinder");

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from file, or create default if it doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        toml::from_str(&contents).context("Failed to parse config file")
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory at {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, contents)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        Ok(())
    }

    /// Catalog path, falling back to [`DEFAULT_DATA`]
    pub fn data_path(&self) -> PathBuf {
        self.data.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_DATA))
    }

    pub fn layout(&self) -> CatalogLayout {
        self.layout.unwrap_or_default()
    }

    /// Server base URL without a trailing slash
    pub fn server_url(&self) -> &str {
        self.server
            .as_deref()
            .unwrap_or(DEFAULT_SERVER)
            .trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.data_path(), PathBuf::from(DEFAULT_DATA));
        assert_eq!(config.layout(), CatalogLayout::Nested);
        assert_eq!(config.server_url(), DEFAULT_SERVER);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config {
            data: Some(PathBuf::from("/srv/oil/data.json")),
            layout: Some(CatalogLayout::Flat),
            products: None,
            server: Some("https://oil.example/".to_string()),
        };
        config.save_to(&path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("layout = \"flat\""));

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.server_url(), "https://oil.example");
    }

    #[test]
    fn test_bad_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "layout = [").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_config_path() {
        if let Ok(path) = Config::config_path() {
            assert!(path.ends_with("oilfinder/config.toml"));
        }
    }
}
