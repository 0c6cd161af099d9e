//! Maps configuration.
//!
//! The credential can come from the command line, the environment or
//! `<config dir>/where-to-move/config.json`, in that order. A missing or
//! placeholder credential is a valid configuration: the map background is
//! simply disabled.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::map::DEFAULT_MAPS_ENDPOINT;

/// Value shipped in example configs; treated the same as no key
pub const PLACEHOLDER_API_KEY: &str = "your_api_key_here";

pub const API_KEY_ENV: &str = "WHERE_TO_MOVE_MAPS_API_KEY";
pub const ENDPOINT_ENV: &str = "WHERE_TO_MOVE_MAPS_ENDPOINT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// On-disk config file
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
    #[serde(default)]
    pub maps_api_key: Option<String>,
    #[serde(default)]
    pub maps_endpoint: Option<String>,
}

/// Settings for the map background
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapsConfig {
    pub api_key: Option<String>,
    pub endpoint: String,
}

impl Default for MapsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_MAPS_ENDPOINT.to_string(),
        }
    }
}

impl MapsConfig {
    #[cfg(test)]
    pub fn with_api_key(api_key: &str) -> Self {
        Self {
            api_key: Some(api_key.to_string()),
            ..Self::default()
        }
    }

    /// The usable credential, or `None` when absent, blank or the placeholder
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && *key != PLACEHOLDER_API_KEY)
    }

    pub fn is_enabled(&self) -> bool {
        self.credential().is_some()
    }

    /// Merge sources; earlier arguments win
    pub fn from_sources(
        cli_key: Option<String>,
        env_key: Option<String>,
        env_endpoint: Option<String>,
        file: ConfigFile,
    ) -> Self {
        let api_key = cli_key.or(env_key).or(file.maps_api_key);
        let endpoint = env_endpoint
            .or(file.maps_endpoint)
            .unwrap_or_else(|| DEFAULT_MAPS_ENDPOINT.to_string());
        Self { api_key, endpoint }
    }

    /// Read the environment and the config file. `offline` disables the map
    /// regardless of what is configured.
    pub fn load(cli_key: Option<String>, offline: bool) -> Result<Self, ConfigError> {
        if offline {
            tracing::info!("offline mode, map background disabled");
            return Ok(Self::default());
        }
        let file = match config_path() {
            Some(path) => load_config_file(&path)?,
            None => ConfigFile::default(),
        };
        Ok(Self::from_sources(
            cli_key,
            std::env::var(API_KEY_ENV).ok(),
            std::env::var(ENDPOINT_ENV).ok(),
            file,
        ))
    }
}

/// `<config dir>/where-to-move/config.json`
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("where-to-move").join("config.json"))
}

/// Load a config file; a missing file yields the defaults
pub fn load_config_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    if !path.exists() {
        return Ok(ConfigFile::default());
    }
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("where-to-move-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_placeholder_key_is_not_a_credential() {
        assert_eq!(MapsConfig::with_api_key(PLACEHOLDER_API_KEY).credential(), None);
        assert!(!MapsConfig::with_api_key(PLACEHOLDER_API_KEY).is_enabled());
    }

    #[test]
    fn test_blank_key_is_not_a_credential() {
        assert_eq!(MapsConfig::with_api_key("   ").credential(), None);
        assert_eq!(MapsConfig::default().credential(), None);
    }

    #[test]
    fn test_real_key_is_trimmed() {
        assert_eq!(MapsConfig::with_api_key(" abc123 ").credential(), Some("abc123"));
    }

    #[test]
    fn test_source_precedence() {
        let file = ConfigFile {
            maps_api_key: Some("file".to_string()),
            maps_endpoint: Some("http://file".to_string()),
        };
        let config = MapsConfig::from_sources(
            Some("cli".to_string()),
            Some("env".to_string()),
            None,
            file.clone(),
        );
        assert_eq!(config.api_key.as_deref(), Some("cli"));
        assert_eq!(config.endpoint, "http://file");

        let config = MapsConfig::from_sources(None, Some("env".to_string()), None, file.clone());
        assert_eq!(config.api_key.as_deref(), Some("env"));

        let config = MapsConfig::from_sources(None, None, Some("http://env".to_string()), file);
        assert_eq!(config.api_key.as_deref(), Some("file"));
        assert_eq!(config.endpoint, "http://env");
    }

    #[test]
    fn test_defaults_without_sources() {
        let config = MapsConfig::from_sources(None, None, None, ConfigFile::default());
        assert_eq!(config, MapsConfig::default());
        assert_eq!(config.endpoint, DEFAULT_MAPS_ENDPOINT);
    }

    #[test]
    fn test_offline_ignores_cli_key() {
        let config = MapsConfig::load(Some("cli".to_string()), true).unwrap();
        assert!(!config.is_enabled());
    }

    #[test]
    fn test_missing_config_file_is_default() {
        let path = std::env::temp_dir().join("where-to-move-no-such-config.json");
        assert_eq!(load_config_file(&path).unwrap(), ConfigFile::default());
    }

    #[test]
    fn test_config_file_camel_case() {
        let path = temp_file(
            "config.json",
            r#"{"mapsApiKey": "k", "mapsEndpoint": "http://localhost"}"#,
        );
        let file = load_config_file(&path).unwrap();
        assert_eq!(file.maps_api_key.as_deref(), Some("k"));
        assert_eq!(file.maps_endpoint.as_deref(), Some("http://localhost"));
    }

    #[test]
    fn test_malformed_config_file() {
        let path = temp_file("broken.json", "{ mapsApiKey");
        assert!(matches!(
            load_config_file(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
