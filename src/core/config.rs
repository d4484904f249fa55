//! Configuration - defaults for matching and scanning
//!
//! Looked up in order: the file named by `BRICKYARD_CONFIG`, `./brickyard.yaml`,
//! then `config.yaml` in the user config directory. Command-line flags win
//! over anything loaded here.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::core::matcher::MatchMode;
use crate::core::substitution::SubstitutionStrategy;

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "BRICKYARD_CONFIG";

/// Config file looked for in the working directory
const LOCAL_CONFIG: &str = "brickyard.yaml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default match mode
    pub mode: MatchMode,

    /// Default substitution strategy
    pub strategy: SubstitutionStrategy,

    /// Directory holding `<set id>.json` detail files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details_dir: Option<PathBuf>,

    /// Stop a scan after this many seconds and report what was found
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_timeout_secs: Option<u64>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid config {path}: {message}")]
    Parse { path: String, message: String },
}

impl Config {
    /// Load the first config found, falling back to defaults
    ///
    /// Never fails; an unreadable or invalid file is logged and ignored.
    pub fn load() -> Self {
        for path in Self::search_paths() {
            if !path.is_file() {
                continue;
            }
            match Self::load_from(&path) {
                Ok(config) => {
                    tracing::debug!(path = %path.display(), "loaded config");
                    return config;
                }
                Err(e) => {
                    tracing::warn!("{}; using defaults", e);
                    return Self::default();
                }
            }
        }
        Self::default()
    }

    /// Load a specific config file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_yml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Candidate config locations, highest priority first
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(explicit) = std::env::var_os(CONFIG_ENV) {
            paths.push(PathBuf::from(explicit));
        }
        paths.push(PathBuf::from(LOCAL_CONFIG));
        if let Some(dirs) = directories::ProjectDirs::from("", "", "brickyard") {
            paths.push(dirs.config_dir().join("config.yaml"));
        }
        paths
    }

    pub fn scan_timeout(&self) -> Option<Duration> {
        self.scan_timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.mode, MatchMode::Strict);
        assert_eq!(config.strategy, SubstitutionStrategy::TwoPhase);
        assert!(config.details_dir.is_none());
        assert!(config.scan_timeout().is_none());
    }

    #[test]
    fn test_load_from_yaml() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("brickyard.yaml");
        fs::write(
            &path,
            "mode: substitution\nstrategy: single-pass\ndetails_dir: sets\nscan_timeout_secs: 30\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.mode, MatchMode::Substitution);
        assert_eq!(config.strategy, SubstitutionStrategy::SinglePass);
        assert_eq!(config.details_dir, Some(PathBuf::from("sets")));
        assert_eq!(config.scan_timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("brickyard.yaml");
        fs::write(&path, "mode: substitution\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.mode, MatchMode::Substitution);
        assert_eq!(config.strategy, SubstitutionStrategy::TwoPhase);
    }

    #[test]
    fn test_invalid_config_is_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("brickyard.yaml");
        fs::write(&path, "mode: sideways\n").unwrap();

        assert!(matches!(Config::load_from(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_search_paths_include_local_file() {
        let paths = Config::search_paths();
        assert!(paths.contains(&PathBuf::from("brickyard.yaml")));
    }
}
