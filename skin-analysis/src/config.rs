//! Analyzer configuration and its on-disk storage.
//!
//! Stored settings live in ~/.skin_config/ by default. Only the input-handling
//! knobs are configurable; region anchors and thresholds are fixed.

use crate::working_size::ResampleFilter;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default upper bound on an encoded upload (10 MiB)
pub const DEFAULT_MAX_INPUT_BYTES: u64 = 10 * 1024 * 1024;

/// Analyzer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Filter used to normalize the source to the working size
    pub resample: ResampleFilter,
    /// Largest encoded payload accepted before decoding
    pub max_input_bytes: u64,
    /// Emit indented JSON
    pub pretty: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            resample: ResampleFilter::default(),
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            pretty: false,
        }
    }
}

impl AnalyzerConfig {
    /// Save to JSON file
    pub fn save_to_file(&self, path: &Path) -> Result<(), std::io::Error> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, json)
    }

    /// Load from JSON file; missing keys take their defaults
    pub fn load_from_file(path: &Path) -> Result<Self, std::io::Error> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}

/// Configuration storage manager
#[derive(Debug, Clone)]
pub struct ConfigStorage {
    root_path: PathBuf,
}

impl ConfigStorage {
    /// Storage rooted at ~/.skin_config, or ./.skin_config when HOME is unset
    pub fn new() -> Self {
        let root_path = match std::env::var("HOME") {
            Ok(home) => PathBuf::from(home).join(".skin_config"),
            Err(_) => PathBuf::from(".skin_config"),
        };
        Self { root_path }
    }

    pub fn with_path(root_path: PathBuf) -> Self {
        Self { root_path }
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    fn analyzer_config_path(&self) -> PathBuf {
        self.root_path.join("analyzer.json")
    }

    /// Get the stored analyzer config.
    ///
    /// Returns None if nothing is stored.
    /// Returns Some(Err) if the file exists but cannot be loaded.
    pub fn get_analyzer_config(&self) -> Option<Result<AnalyzerConfig, std::io::Error>> {
        let path = self.analyzer_config_path();

        if !path.exists() {
            return None;
        }

        Some(AnalyzerConfig::load_from_file(&path))
    }

    /// Save the analyzer config, creating the directory if needed.
    ///
    /// Returns the path written.
    pub fn save_analyzer_config(&self, config: &AnalyzerConfig) -> std::io::Result<PathBuf> {
        std::fs::create_dir_all(&self.root_path)?;

        let path = self.analyzer_config_path();
        config.save_to_file(&path)?;
        Ok(path)
    }

    /// Returns Ok(true) if the file was deleted, Ok(false) if it didn't exist.
    pub fn delete_analyzer_config(&self) -> std::io::Result<bool> {
        let path = self.analyzer_config_path();

        if !path.exists() {
            return Ok(false);
        }

        std::fs::remove_file(path)?;
        Ok(true)
    }
}

impl Default for ConfigStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.resample, ResampleFilter::Triangle);
        assert_eq!(config.max_input_bytes, 10_485_760);
        assert!(!config.pretty);
    }

    #[test]
    fn test_analyzer_config_storage() {
        let temp_dir = TempDir::new().unwrap();
        let storage = ConfigStorage::with_path(temp_dir.path().to_path_buf());

        assert!(storage.get_analyzer_config().is_none());

        let config = AnalyzerConfig {
            resample: ResampleFilter::CatmullRom,
            max_input_bytes: 4096,
            pretty: true,
        };
        let path = storage.save_analyzer_config(&config).unwrap();
        assert!(path.exists());

        let loaded = storage.get_analyzer_config().unwrap().unwrap();
        assert_eq!(loaded, config);

        assert!(storage.delete_analyzer_config().unwrap());
        assert!(!storage.delete_analyzer_config().unwrap());
        assert!(storage.get_analyzer_config().is_none());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("partial.json");
        std::fs::write(&path, r#"{"resample": "nearest"}"#).unwrap();

        let config = AnalyzerConfig::load_from_file(&path).unwrap();
        assert_eq!(config.resample, ResampleFilter::Nearest);
        assert_eq!(config.max_input_bytes, DEFAULT_MAX_INPUT_BYTES);
    }

    #[test]
    fn test_malformed_file_is_invalid_data() {
        let temp_dir = TempDir::new().unwrap();
        let storage = ConfigStorage::with_path(temp_dir.path().to_path_buf());
        std::fs::write(temp_dir.path().join("analyzer.json"), "{ not json").unwrap();

        let err = storage.get_analyzer_config().unwrap().unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_unknown_filter_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.json");
        std::fs::write(&path, r#"{"resample": "bicubic"}"#).unwrap();

        let err = AnalyzerConfig::load_from_file(&path).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }
}
