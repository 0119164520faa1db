//! Dashboard configuration.
//!
//! Every constant the pipeline uses (window lengths, axis range, threshold
//! lines, canvas size, titles) lives here and is passed explicitly into the
//! assemblers. The config is stored as TOML; any field left out of the file
//! takes its default.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Chart titles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartTitles {
    pub overlay: String,
    /// Title of the second, otherwise identical, overlay chart.
    pub overlay_test: String,
    pub index: String,
    pub rentability: String,
    pub latency: String,
}

impl Default for ChartTitles {
    fn default() -> Self {
        Self {
            overlay: "Prices and Decisions".into(),
            overlay_test: "Prices and Decisions (Test)".into(),
            index: "Decision Index".into(),
            rentability: "Rentability and Quantity over Time".into(),
            latency: "Module Execution Time (minutes)".into(),
        }
    }
}

/// Configuration for one dashboard build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Trailing window of the decision overlay charts.
    pub window_hours: i64,
    /// Days covered by the rentability aggregate.
    pub rentability_days: i64,
    /// Days covered by the process log aggregate. The store query applies
    /// this bound; log rows carry no timestamp once aggregated.
    pub log_days: i64,
    /// Maximum number of decision rows read from the feed.
    pub decision_row_limit: usize,
    /// Value axis range of the decision index chart.
    pub index_axis_range: [f64; 2],
    /// Threshold lines of the decision index chart, `[upper, lower]`.
    pub thresholds: [f64; 2],
    pub chart_height: u32,
    pub chart_width: u32,
    pub titles: ChartTitles,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            window_hours: 24,
            rentability_days: 5,
            log_days: 1,
            decision_row_limit: 1000,
            index_axis_range: [-1.5, 1.5],
            thresholds: [0.9, -0.9],
            chart_height: 300,
            chart_width: 800,
            titles: ChartTitles::default(),
        }
    }
}

impl DashboardConfig {
    /// Load and validate a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("window_hours", self.window_hours),
            ("rentability_days", self.rentability_days),
            ("log_days", self.log_days),
        ];
        for (name, value) in positive {
            if value <= 0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if Duration::try_hours(self.window_hours).is_none() {
            return Err(ConfigError::Invalid(format!(
                "window_hours {} is out of range",
                self.window_hours
            )));
        }
        let days = [
            ("rentability_days", self.rentability_days),
            ("log_days", self.log_days),
        ];
        for (name, value) in days {
            if Duration::try_days(value).is_none() {
                return Err(ConfigError::Invalid(format!(
                    "{name} {value} is out of range"
                )));
            }
        }
        if self.decision_row_limit == 0 {
            return Err(ConfigError::Invalid(
                "decision_row_limit must be positive".into(),
            ));
        }
        if self.chart_height == 0 || self.chart_width == 0 {
            return Err(ConfigError::Invalid(format!(
                "chart size must be non-zero, got {}x{}",
                self.chart_width, self.chart_height
            )));
        }

        let [axis_min, axis_max] = self.index_axis_range;
        if !(axis_min < axis_max) {
            return Err(ConfigError::Invalid(format!(
                "index_axis_range must be ascending, got [{axis_min}, {axis_max}]"
            )));
        }
        let (upper, lower) = (self.upper_threshold(), self.lower_threshold());
        if !(upper > lower) {
            return Err(ConfigError::Invalid(format!(
                "upper threshold {upper} must exceed lower threshold {lower}"
            )));
        }
        if lower < axis_min || upper > axis_max {
            return Err(ConfigError::Invalid(format!(
                "thresholds [{upper}, {lower}] fall outside index_axis_range [{axis_min}, {axis_max}]"
            )));
        }
        Ok(())
    }

    pub fn upper_threshold(&self) -> f64 {
        self.thresholds[0]
    }

    pub fn lower_threshold(&self) -> f64 {
        self.thresholds[1]
    }

    /// Trailing window of the decision overlay charts.
    ///
    /// Saturates at `Duration::MAX` for values `validate()` rejects.
    pub fn decision_window(&self) -> Duration {
        Duration::try_hours(self.window_hours).unwrap_or(Duration::MAX)
    }

    pub fn rentability_window(&self) -> Duration {
        Duration::try_days(self.rentability_days).unwrap_or(Duration::MAX)
    }
}
