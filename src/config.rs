//! User configuration and preferences

use crate::error::{RecentsError, Result};
use crate::registry::JsonRegistry;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct UserConfig {
    /// Where the registry document lives, instead of the platform data directory
    #[serde(default)]
    pub registry_path: Option<PathBuf>,
    /// Application name recorded on registered entries
    #[serde(default)]
    pub app_name: Option<String>,
}

impl UserConfig {
    /// Get the config file path (~/.config/recents/config.json)
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("recents").join("config.json"))
    }

    /// Load config from file, or defaults if it doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path().ok_or_else(|| {
            RecentsError::ConfigError("Could not determine config directory".to_string())
        })?;

        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| {
            RecentsError::ConfigError(format!("Failed to read config file: {}", e))
        })?;

        serde_json::from_str(&contents).map_err(|e| {
            RecentsError::ConfigError(format!("Failed to parse config file: {}", e))
        })
    }

    /// Registry location: command-line override, then config, then the platform default
    pub fn registry_path(&self, cli_override: Option<PathBuf>) -> Result<PathBuf> {
        cli_override
            .or_else(|| self.registry_path.clone())
            .or_else(JsonRegistry::default_path)
            .ok_or_else(|| {
                RecentsError::ConfigError("Could not determine data directory".to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = UserConfig::default();
        assert!(config.registry_path.is_none());
        assert!(config.app_name.is_none());
    }

    #[test]
    fn test_config_serialization() {
        let config = UserConfig {
            registry_path: Some(PathBuf::from("/tmp/recent.json")),
            app_name: Some("scripts".to_string()),
        };
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: UserConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: UserConfig = serde_json::from_str(r#"{"app_name": "x"}"#).unwrap();
        assert_eq!(config.app_name.as_deref(), Some("x"));
        assert!(config.registry_path.is_none());
    }

    #[test]
    fn test_load_from_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = UserConfig::load_from(&temp_dir.path().join("config.json")).unwrap();
        assert_eq!(config, UserConfig::default());
    }

    #[test]
    fn test_load_from_invalid_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();

        let err = UserConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, RecentsError::ConfigError(_)));
    }

    #[test]
    fn test_registry_path_priority() {
        let config = UserConfig {
            registry_path: Some(PathBuf::from("/from/config.json")),
            app_name: None,
        };

        assert_eq!(
            config
                .registry_path(Some(PathBuf::from("/from/cli.json")))
                .unwrap(),
            PathBuf::from("/from/cli.json")
        );
        assert_eq!(
            config.registry_path(None).unwrap(),
            PathBuf::from("/from/config.json")
        );
    }
}
