use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Global reclaim configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Files larger than this (MB) are fingerprinted by sampling
    /// head/middle/tail regions instead of hashing the full content
    #[serde(default = "default_large_file_mb")]
    pub large_file_threshold_mb: u64,

    /// Size (KB) of each sampled region for large-file fingerprints
    #[serde(default = "default_sample_region_kb")]
    pub sample_region_kb: u64,

    /// Minimum file size (bytes) considered by the duplicate finder
    #[serde(default = "default_min_duplicate_size")]
    pub min_duplicate_size: u64,

    /// Parent directory for pre-clean backups; system temp dir if unset
    #[serde(default)]
    pub backup_dir: Option<PathBuf>,

    /// Path substrings the cleaner refuses to touch
    #[serde(default)]
    pub exclude_paths: Vec<String>,
}

fn default_large_file_mb() -> u64 {
    100
}
fn default_sample_region_kb() -> u64 {
    80
}
fn default_min_duplicate_size() -> u64 {
    1024
}

impl Default for Config {
    fn default() -> Self {
        Self {
            large_file_threshold_mb: default_large_file_mb(),
            sample_region_kb: default_sample_region_kb(),
            min_duplicate_size: default_min_duplicate_size(),
            backup_dir: None,
            exclude_paths: Vec::new(),
        }
    }
}

impl Config {
    /// Get the reclaim data directory (~/.reclaim)
    pub fn data_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp"))
            .join(".reclaim")
    }

    /// Get the config file path
    pub fn config_path() -> PathBuf {
        Self::data_dir().join("config.toml")
    }

    /// Load config from file, or defaults if the file does not exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            let config: Config = toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config: {}", path.display()))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        let dir = path.parent().unwrap();
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create config dir: {}", dir.display()))?;
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    /// Large-file threshold in bytes
    pub fn large_file_threshold_bytes(&self) -> u64 {
        self.large_file_threshold_mb * 1024 * 1024
    }

    /// Sampled-region size in bytes
    pub fn sample_region_bytes(&self) -> u64 {
        self.sample_region_kb * 1024
    }

    /// Parent directory under which backups are created
    pub fn backup_parent(&self) -> PathBuf {
        self.backup_dir
            .clone()
            .unwrap_or_else(std::env::temp_dir)
    }

    /// Check if a path matches the configured exclusion substrings
    pub fn is_excluded(&self, path: &Path) -> bool {
        let path_str = path.display().to_string();
        self.exclude_paths.iter().any(|p| path_str.contains(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.large_file_threshold_bytes(), 100 * 1024 * 1024);
        assert_eq!(config.sample_region_bytes(), 80 * 1024);
        assert_eq!(config.min_duplicate_size, 1024);
        assert!(config.backup_dir.is_none());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = toml::from_str("large_file_threshold_mb = 10").unwrap();
        assert_eq!(config.large_file_threshold_mb, 10);
        assert_eq!(config.sample_region_kb, 80);
        assert_eq!(config.min_duplicate_size, 1024);
    }

    #[test]
    fn test_is_excluded() {
        let config = Config {
            exclude_paths: vec!["/important".to_string()],
            ..Config::default()
        };
        assert!(config.is_excluded(Path::new("/important/data.txt")));
        assert!(!config.is_excluded(Path::new("/tmp/scratch.txt")));
    }
}
