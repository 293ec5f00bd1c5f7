/// Configuration module for medref.
///
/// Handles loading, validating, and providing default configuration values.
use std::num::NonZeroUsize;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::pagination::DEFAULT_PAGE_SIZE;

pub const DEFAULT_CONFIG_PATH: &str = "medref.json";

// ── Default value functions ──────────────────────────────────────────

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE.get()
}

fn default_site_url() -> String {
    "https://www.example-health.ai".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_demo_interval_ms() -> u64 {
    2500
}

fn default_toast_duration_ms() -> u64 {
    3000
}

// ── Config structs ───────────────────────────────────────────────────

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    /// Listing page size.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Base of canonical URLs and sitemap locations.
    #[serde(default = "default_site_url")]
    pub site_url: String,

    /// `tracing` filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub demo: DemoConfig,

    #[serde(default)]
    pub toast: ToastConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DemoConfig {
    #[serde(default = "default_demo_interval_ms")]
    pub interval_ms: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ToastConfig {
    #[serde(default = "default_toast_duration_ms")]
    pub duration_ms: u64,
}

/// Where a loaded [`Config`] came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(String),
    /// File absent at a custom path: defaults, no template.
    Missing(String),
    TemplateGenerated(String),
    TemplateFailed { path: String, error: String },
    InvalidJson { path: String, error: String },
}

impl ConfigSource {
    /// Whether defaults were used in place of a readable config file.
    pub fn is_fallback(&self) -> bool {
        !matches!(self, Self::File(_))
    }

    pub fn log(&self) {
        match self {
            Self::File(path) => info!("Loaded configuration from {path}"),
            Self::Missing(path) => info!("{path} not found, using defaults"),
            Self::TemplateGenerated(path) => {
                info!("{path} not found, using defaults");
                info!("Generated config template: {path}");
            }
            Self::TemplateFailed { path, error } => {
                info!("{path} not found, using defaults");
                warn!("Failed to generate config template: {error}");
            }
            Self::InvalidJson { path, error } => {
                warn!("Invalid JSON in {path}: {error}");
                warn!("Using default configuration");
            }
        }
    }
}

// ── Default impls ────────────────────────────────────────────────────

impl Default for Config {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            site_url: default_site_url(),
            log_level: default_log_level(),
            demo: DemoConfig::default(),
            toast: ToastConfig::default(),
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_demo_interval_ms(),
        }
    }
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_toast_duration_ms(),
        }
    }
}

// ── Config implementation ────────────────────────────────────────────

impl Config {
    /// Load configuration from a JSON file, logging how it was obtained.
    ///
    /// If `config_path` is empty, defaults to `"medref.json"`.
    /// If the file does not exist, returns a default config and generates a
    /// template file for the default path.
    pub fn load(config_path: &str) -> Result<Self> {
        let (cfg, source) = Self::load_with_source(config_path)?;
        source.log();
        Ok(cfg)
    }

    /// Like [`Config::load`], but returns the outcome instead of logging it,
    /// for callers that install a subscriber only once the config is known.
    pub fn load_with_source(config_path: &str) -> Result<(Self, ConfigSource)> {
        let path = if config_path.is_empty() {
            DEFAULT_CONFIG_PATH
        } else {
            config_path
        };

        if !Path::new(path).exists() {
            let cfg = Self::default();
            let source = if path == DEFAULT_CONFIG_PATH {
                match cfg.save(path) {
                    Ok(()) => ConfigSource::TemplateGenerated(path.to_string()),
                    Err(e) => ConfigSource::TemplateFailed {
                        path: path.to_string(),
                        error: e.to_string(),
                    },
                }
            } else {
                ConfigSource::Missing(path.to_string())
            };
            return Ok((cfg, source));
        }

        let data = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {path}"))?;

        match serde_json::from_str(&data) {
            Ok(cfg) => Ok((cfg, ConfigSource::File(path.to_string()))),
            Err(e) => Ok((
                Self::default(),
                ConfigSource::InvalidJson {
                    path: path.to_string(),
                    error: e.to_string(),
                },
            )),
        }
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &str) -> Result<()> {
        let data = serde_json::to_string_pretty(self).context("failed to marshal config")?;
        std::fs::write(path, data).with_context(|| format!("failed to write config: {path}"))?;
        Ok(())
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.page_size > 0, "page_size must be positive");
        anyhow::ensure!(
            self.demo.interval_ms > 0,
            "demo.interval_ms must be positive"
        );
        anyhow::ensure!(
            self.toast.duration_ms > 0,
            "toast.duration_ms must be positive"
        );
        anyhow::ensure!(
            self.site_url.starts_with("http://") || self.site_url.starts_with("https://"),
            "site_url must be an http(s) URL: {}",
            self.site_url
        );
        Ok(())
    }

    /// Page size, falling back to the default when unset.
    #[must_use]
    pub fn page_size(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.page_size).unwrap_or(DEFAULT_PAGE_SIZE)
    }

    #[must_use]
    pub fn demo_interval(&self) -> Duration {
        Duration::from_millis(self.demo.interval_ms)
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.page_size, 9);
        assert_eq!(config.demo.interval_ms, 2500);
        assert_eq!(config.toast.duration_ms, 3000);
        assert_eq!(config.log_level, "info");
        assert!(config.site_url.starts_with("https://"));
    }

    #[test]
    fn test_load_from_json() {
        let json = r#"{"page_size": 12, "site_url": "https://medref.test"}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.page_size, 12);
        assert_eq!(config.site_url, "https://medref.test");
        // Other fields should have defaults
        assert_eq!(config.demo.interval_ms, 2500);
        assert_eq!(config.toast.duration_ms, 3000);
    }

    #[test]
    fn test_validate_ok() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_bad_page_size() {
        let mut config = Config::default();
        config.page_size = 0;
        assert!(config.validate().is_err());
        assert_eq!(config.page_size(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_validate_bad_site_url() {
        let mut config = Config::default();
        config.site_url = "example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_interval() {
        let mut config = Config::default();
        config.demo.interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let config = Config::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.page_size, 9);
        // Templates are only generated for the default path
        assert!(!path.exists());
    }

    #[test]
    fn test_load_invalid_json_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("medref.json");
        std::fs::write(&path, "{ not json").unwrap();
        let config = Config::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.page_size, 9);
    }

    #[test]
    fn test_invalid_json_reports_fallback() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();

        let (config, source) = Config::load_with_source(path.to_str().unwrap()).unwrap();
        assert_eq!(config.page_size, 9);
        assert!(source.is_fallback());
        match source {
            ConfigSource::InvalidJson { path: reported, error } => {
                assert!(reported.ends_with("bad.json"));
                assert!(!error.is_empty());
            }
            other => panic!("expected invalid JSON, got {other:?}"),
        }
    }

    #[test]
    fn test_load_with_source_reports_file_and_missing() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let (_, source) = Config::load_with_source(missing.to_str().unwrap()).unwrap();
        assert!(matches!(source, ConfigSource::Missing(_)));

        let present = dir.path().join("present.json");
        std::fs::write(&present, r#"{"page_size": 3}"#).unwrap();
        let (config, source) = Config::load_with_source(present.to_str().unwrap()).unwrap();
        assert_eq!(config.page_size, 3);
        assert!(!source.is_fallback());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom.json");
        let path = path.to_str().unwrap();

        let mut config = Config::default();
        config.page_size = 4;
        config.demo.interval_ms = 1000;
        config.save(path).unwrap();

        let loaded = Config::load(path).unwrap();
        assert_eq!(loaded.page_size, 4);
        assert_eq!(loaded.demo_interval(), Duration::from_millis(1000));
    }
}
