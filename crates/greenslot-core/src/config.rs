// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of GreenSlot.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

//! TOML configuration for the planner, the scanner and the edge adapters.
//!
//! Every field has a default, so an empty file (or no file) yields the
//! standard 25/50/70 thresholds, top-3 ranking with a 2-point score band and
//! the 5/10 stability bands.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GreenSlotConfig {
    #[serde(default)]
    pub thresholds: ThresholdConfig,

    #[serde(default)]
    pub windows: WindowConfig,

    #[serde(default)]
    pub decision: DecisionConfig,

    #[serde(default)]
    pub data: DataConfig,
}

/// Percentiles the color thresholds are cut at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Below this percentile a bucket is red
    #[serde(default = "default_low_percentile")]
    pub low_percentile: f64,

    /// At or above this percentile a bucket is at least yellow
    #[serde(default = "default_mid_percentile")]
    pub mid_percentile: f64,

    /// At or above this percentile a bucket is green
    #[serde(default = "default_high_percentile")]
    pub high_percentile: f64,
}

/// Window scanning and ranking parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Duration used when the caller does not pick one
    #[serde(default = "default_duration_minutes")]
    pub default_duration_minutes: u32,

    /// How many ranked windows to surface
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Average scores closer than this are ranked by stability instead
    #[serde(default = "default_score_band")]
    pub score_band: f64,

    /// Largest max-min range still rated high stability
    #[serde(default = "default_stability_high_max")]
    pub stability_high_max: f64,

    /// Largest max-min range still rated medium stability
    #[serde(default = "default_stability_medium_max")]
    pub stability_medium_max: f64,

    /// Half-to-half mean difference beyond which a window trends
    #[serde(default = "default_trend_threshold")]
    pub trend_threshold: f64,

    /// Points above the current score for a bucket to count as "better"
    #[serde(default = "default_better_margin")]
    pub better_margin: f64,

    /// Day-wide max-min range below which differences are called subtle
    #[serde(default = "default_subtle_range")]
    pub subtle_range: f64,
}

/// Where the start-decision service lives and how hard to try reaching it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

/// Location of the colored prediction files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_directory")]
    pub directory: String,
}

// Default value functions
fn default_low_percentile() -> f64 {
    25.0
}

fn default_mid_percentile() -> f64 {
    50.0
}

fn default_high_percentile() -> f64 {
    70.0
}

fn default_duration_minutes() -> u32 {
    60
}

fn default_top_n() -> usize {
    crate::ranker::DEFAULT_TOP_N
}

fn default_score_band() -> f64 {
    crate::ranker::DEFAULT_SCORE_BAND
}

fn default_stability_high_max() -> f64 {
    5.0
}

fn default_stability_medium_max() -> f64 {
    10.0
}

fn default_trend_threshold() -> f64 {
    3.0
}

fn default_better_margin() -> f64 {
    crate::overview::DEFAULT_BETTER_MARGIN
}

fn default_subtle_range() -> f64 {
    crate::overview::DEFAULT_SUBTLE_RANGE
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_owned()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    500
}

fn default_data_directory() -> String {
    "backend/data".to_owned()
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            low_percentile: default_low_percentile(),
            mid_percentile: default_mid_percentile(),
            high_percentile: default_high_percentile(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            default_duration_minutes: default_duration_minutes(),
            top_n: default_top_n(),
            score_band: default_score_band(),
            stability_high_max: default_stability_high_max(),
            stability_medium_max: default_stability_medium_max(),
            trend_threshold: default_trend_threshold(),
            better_margin: default_better_margin(),
            subtle_range: default_subtle_range(),
        }
    }
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            directory: default_data_directory(),
        }
    }
}

impl GreenSlotConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config = Self::from_toml_str(&content)
            .with_context(|| format!("Failed to load config: {}", path.display()))?;

        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.thresholds;
        for (name, value) in [
            ("low_percentile", t.low_percentile),
            ("mid_percentile", t.mid_percentile),
            ("high_percentile", t.high_percentile),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "thresholds.{name} must be within 0-100, got {value}"
                )));
            }
        }
        if t.low_percentile > t.mid_percentile || t.mid_percentile > t.high_percentile {
            return Err(ConfigError::Invalid(
                "thresholds must satisfy low <= mid <= high".to_owned(),
            ));
        }

        let w = &self.windows;
        if w.top_n == 0 {
            return Err(ConfigError::Invalid("windows.top_n must be at least 1".to_owned()));
        }
        if w.default_duration_minutes == 0 {
            return Err(ConfigError::Invalid(
                "windows.default_duration_minutes must be positive".to_owned(),
            ));
        }
        if w.score_band < 0.0 || w.trend_threshold < 0.0 {
            return Err(ConfigError::Invalid(
                "windows.score_band and windows.trend_threshold must not be negative".to_owned(),
            ));
        }
        if w.stability_high_max > w.stability_medium_max {
            return Err(ConfigError::Invalid(
                "windows.stability_high_max must not exceed stability_medium_max".to_owned(),
            ));
        }

        if self.decision.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("decision.base_url is empty".to_owned()));
        }

        Ok(())
    }

    /// Example configuration with every option spelled out
    pub fn example_toml() -> String {
        r#"# GreenSlot configuration

[thresholds]
low_percentile = 25.0     # below: red
mid_percentile = 50.0     # at or above: yellow
high_percentile = 70.0    # at or above: green

[windows]
default_duration_minutes = 60
top_n = 3
score_band = 2.0          # averages this close are ranked by stability
stability_high_max = 5.0
stability_medium_max = 10.0
trend_threshold = 3.0
better_margin = 10.0
subtle_range = 20.0

[decision]
base_url = "http://127.0.0.1:5000"
timeout_secs = 10
max_retries = 3
retry_delay_ms = 500

[data]
directory = "backend/data"
"#
        .to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = GreenSlotConfig::from_toml_str("").unwrap();
        assert_eq!(config, GreenSlotConfig::default());
        assert_eq!(config.thresholds.high_percentile, 70.0);
        assert_eq!(config.windows.top_n, 3);
        assert_eq!(config.decision.base_url, "http://127.0.0.1:5000");
    }

    #[test]
    fn test_example_round_trips_to_defaults() {
        let config = GreenSlotConfig::from_toml_str(&GreenSlotConfig::example_toml()).unwrap();
        assert_eq!(config, GreenSlotConfig::default());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = GreenSlotConfig::from_toml_str(
            r#"
            [windows]
            top_n = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.windows.top_n, 5);
        assert_eq!(config.windows.score_band, 2.0);
        assert_eq!(config.thresholds, ThresholdConfig::default());
    }

    #[test]
    fn test_rejects_unordered_percentiles() {
        let err = GreenSlotConfig::from_toml_str(
            r#"
            [thresholds]
            low_percentile = 60.0
            mid_percentile = 50.0
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_zero_top_n() {
        let err = GreenSlotConfig::from_toml_str("[windows]\ntop_n = 0\n").unwrap_err();
        assert!(err.to_string().contains("top_n"));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let err = GreenSlotConfig::from_toml_str("[windows\ntop_n = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[data]\ndirectory = \"/srv/predictions\"").unwrap();

        let config = GreenSlotConfig::from_file(file.path()).unwrap();
        assert_eq!(config.data.directory, "/srv/predictions");

        assert!(GreenSlotConfig::from_file("/nonexistent/greenslot.toml").is_err());
    }
}
