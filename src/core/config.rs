use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::query::ClusterDirection;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub release: ReleaseConfig,
    #[serde(default)]
    pub query: QueryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseConfig {
    /// Directory holding one sub-directory per release version
    pub data_dir: Option<String>,
    /// Release sub-directory to load ("CURRENT" tracks the newest)
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    pub cluster_window: u64,
    pub cluster_direction: ClusterDirection,
    pub high_confidence_only: bool,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            data_dir: None, // Will default to ~/.mirus/releases
            version: "CURRENT".to_string(),
        }
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            cluster_window: 10_000,
            cluster_direction: ClusterDirection::Both,
            high_confidence_only: false,
        }
    }
}

impl Config {
    pub fn data_dir(&self) -> PathBuf {
        self.release
            .data_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(super::paths::mirus_releases_dir)
    }

    /// Directory of the configured release version
    pub fn release_dir(&self) -> PathBuf {
        self.data_dir().join(&self.release.version)
    }
}

pub fn default_config() -> Config {
    Config::default()
}

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, crate::MirusError> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| crate::MirusError::Config(format!("Failed to parse config: {}", e)))?;
    Ok(config)
}

pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> Result<(), crate::MirusError> {
    let contents = toml::to_string_pretty(config)
        .map_err(|e| crate::MirusError::Config(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_round_trip_through_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mirus.toml");

        let mut config = default_config();
        config.release.version = "22.1".to_string();
        config.release.data_dir = Some("/data/mirbase".to_string());
        config.query.cluster_direction = ClusterDirection::Upstream;
        save_config(&path, &config).unwrap();

        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded.release.version, "22.1");
        assert_eq!(loaded.query.cluster_direction, ClusterDirection::Upstream);
        assert_eq!(loaded.release_dir(), PathBuf::from("/data/mirbase/22.1"));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("[release]\nversion = \"21\"\ndata_dir = \"/tmp/m\"\n").unwrap();
        assert_eq!(config.query.cluster_window, 10_000);
        assert!(!config.query.high_confidence_only);
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "release = [").unwrap();
        assert!(matches!(load_config(&path), Err(crate::MirusError::Config(_))));
    }
}
