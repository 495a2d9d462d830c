//! Configuration module for Touchline

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::api::thesportsdb::{DEFAULT_API_KEY, DEFAULT_BASE_URL};
use crate::favourites::DEFAULT_STORAGE_KEY;
use crate::models::EntityId;
use crate::paths;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// TheSportsDB host
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// TheSportsDB API key ("3" is the free tier)
    #[serde(default = "default_api_key")]
    pub api_key: String,

    /// Sport shown in the league list
    #[serde(default = "default_sport")]
    pub sport: String,

    /// Maximum number of leagues to list
    #[serde(default = "default_league_limit")]
    pub league_limit: usize,

    /// Leagues whose teams are searched when listing favourite teams
    #[serde(default = "default_favourite_leagues")]
    pub favourite_leagues: Vec<EntityId>,

    /// Key the favourites are stored under
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

fn default_api_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_api_key() -> String {
    DEFAULT_API_KEY.to_string()
}

fn default_sport() -> String {
    "Cricket".to_string()
}

fn default_league_limit() -> usize {
    20
}

fn default_favourite_leagues() -> Vec<EntityId> {
    [4328, 4425, 4530, 4606]
        .into_iter()
        .filter_map(|raw| EntityId::new(raw).ok())
        .collect()
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            api_key: default_api_key(),
            sport: default_sport(),
            league_limit: default_league_limit(),
            favourite_leagues: default_favourite_leagues(),
            storage_key: default_storage_key(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        paths::config_path()
    }

    /// Load config from the default path or create default
    pub fn load() -> Result<Self> {
        let path = Self::default_path()?;
        Self::load_from(&path)
    }

    /// Load config from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path).context("Failed to read config file")?;
            toml::from_str(&content).context("Failed to parse config file")
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::default_path()?;
        self.save_to(&path)
    }

    /// Save config to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content).context("Failed to write config file")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.favourite_leagues.len(), 4);
        assert_eq!(config.storage_key, "favourites");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "sport = \"Soccer\"\nfavourite_leagues = [4328]\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.sport, "Soccer");
        assert_eq!(config.favourite_leagues, vec![EntityId::new(4328).unwrap()]);
        assert_eq!(config.api_key, "3");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            league_limit: 5,
            ..Config::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_rejects_zero_league() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "favourite_leagues = [0]\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
