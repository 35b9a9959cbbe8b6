use hue_engine::{AggregateOptions, QuantizeOptions};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// Environment variable naming a config file when `--config` is not given.
pub const CONFIG_ENV: &str = "PINHUE_CONFIG";

/// Application configuration loaded from a YAML file.
///
/// Every field has a default, so an empty file (or no file) is valid.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    pub analysis: AnalysisConfig,
    pub fetch: FetchConfig,
    pub collector: CollectorConfig,
}

/// Color extraction and aggregation parameters
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Dominant colors per image (K)
    pub palette_size: usize,
    /// Merge distance in RGB units (D)
    pub merge_distance: f32,
    /// Colors in the exposed palette (top-N)
    pub palette_limit: usize,
    /// k-means++ seed
    pub seed: u64,
    pub max_iterations: u32,
    /// Images are downsampled so their longer edge is at most this
    pub max_edge: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            palette_size: 10,
            merge_distance: 24.0,
            palette_limit: 10,
            seed: hue_engine::quantize::DEFAULT_SEED,
            max_iterations: 20,
            max_edge: 800,
        }
    }
}

/// Image download parameters
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct FetchConfig {
    /// Images processed concurrently
    pub workers: usize,
    pub timeout_secs: u64,
    /// Byte ceiling per image
    pub max_bytes: u64,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            workers: 4,
            timeout_secs: 15,
            max_bytes: 10 * 1024 * 1024,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/124.0 Safari/537.36"
                .to_string(),
        }
    }
}

/// Board collection parameters
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct CollectorConfig {
    /// Image references kept per board
    pub max_pins: usize,
    /// Extra attempts after a transient page-access failure
    pub retries: u32,
    /// Backoff unit; attempt `n` waits `n` times this
    pub retry_backoff_ms: u64,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            max_pins: 30,
            retries: 2,
            retry_backoff_ms: 500,
        }
    }
}

impl AppConfig {
    /// Load from `path`, falling back to defaults with a warning when the
    /// file is missing, unreadable or invalid.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            tracing::debug!("No config file given, using defaults");
            return Self::default();
        };

        match Self::from_file(path) {
            Ok(config) => {
                tracing::info!(
                    path = %path.display(),
                    palette_size = config.analysis.palette_size,
                    workers = config.fetch.workers,
                    "Loaded configuration"
                );
                config
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), %e, "Failed to load config, using defaults");
                Self::default()
            }
        }
    }

    /// Like [`AppConfig::load`], but a given file that cannot be read or
    /// parsed is an error instead of a warning.
    pub fn load_strict(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Strict load: any problem is an error.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not to a mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.analysis.palette_size == 0 {
            return Err(ConfigError::Invalid(
                "analysis.palette_size must be at least 1".to_string(),
            ));
        }
        if self.analysis.palette_limit == 0 {
            return Err(ConfigError::Invalid(
                "analysis.palette_limit must be at least 1".to_string(),
            ));
        }
        if !self.analysis.merge_distance.is_finite() || self.analysis.merge_distance < 0.0 {
            return Err(ConfigError::Invalid(
                "analysis.merge_distance must be a non-negative number".to_string(),
            ));
        }
        if self.analysis.max_edge == 0 {
            return Err(ConfigError::Invalid(
                "analysis.max_edge must be at least 1".to_string(),
            ));
        }
        if self.fetch.workers == 0 {
            return Err(ConfigError::Invalid(
                "fetch.workers must be at least 1".to_string(),
            ));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "fetch.timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn quantize_options(&self) -> QuantizeOptions {
        QuantizeOptions::default()
            .max_colors(self.analysis.palette_size)
            .max_iterations(self.analysis.max_iterations)
            .seed(self.analysis.seed)
    }

    pub fn aggregate_options(&self) -> AggregateOptions {
        AggregateOptions::default()
            .merge_distance(self.analysis.merge_distance)
            .palette_limit(self.analysis.palette_limit)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }
}
