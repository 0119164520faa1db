//! Build runner: fetches the feeds from a source and builds one dashboard.
//!
//! The decision feed is fetched first. If it comes back empty the build is
//! aborted before the aggregate feeds are queried.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;
use thiserror::Error;
use tracing::{info, warn};

use decisionboard_core::domain::{DecisionRow, LogRow, RentabilityRow};
use decisionboard_core::{
    build_dashboard, BuildError, BuildWarning, ConfigError, Dashboard, DashboardConfig,
    DashboardFeeds,
};

use crate::source::{FeedQuery, FeedSource, SourceError};

/// Current schema version for persisted artifacts.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("source error: {0}")]
    Source(#[from] SourceError),
    #[error(transparent)]
    Build(#[from] BuildError),
}

impl RunError {
    /// True when the build was aborted because no decision data exists.
    pub fn is_empty_feed(&self) -> bool {
        matches!(self, RunError::Build(BuildError::EmptyFeed))
    }
}

/// Row counts of the three feeds as fetched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedCounts {
    pub decisions: usize,
    pub windowed: usize,
    pub rentability_days: usize,
    pub processes: usize,
}

/// Metadata about the build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetadata {
    pub source: String,
    pub built_at: NaiveDateTime,
    pub duration_secs: f64,
    pub input_hash: String,
    pub counts: FeedCounts,
    pub schema_version: u32,
}

impl RunMetadata {
    /// Identifier of the build: evaluation instant plus a short input hash.
    pub fn build_id(&self) -> String {
        let short = self.input_hash.get(..8).unwrap_or(&self.input_hash);
        format!("{}-{short}", self.built_at.format("%Y%m%dT%H%M%S"))
    }
}

/// Complete result of one dashboard build.
#[derive(Debug, Clone)]
pub struct DashboardRun {
    pub dashboard: Dashboard,
    pub config: DashboardConfig,
    pub metadata: RunMetadata,
}

impl DashboardRun {
    pub fn warnings(&self) -> Vec<BuildWarning> {
        self.dashboard.warnings()
    }
}

/// Load the config at `path`, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<DashboardConfig, RunError> {
    match path {
        Some(path) => Ok(DashboardConfig::from_file(path)?),
        None => Ok(DashboardConfig::default()),
    }
}

/// Fetch the feeds from `source` and build the dashboard as of `now`.
pub fn run_dashboard(
    source: &dyn FeedSource,
    config: &DashboardConfig,
    now: NaiveDateTime,
) -> Result<DashboardRun, RunError> {
    let start = Instant::now();
    let query = FeedQuery::from_config(config, now);

    let decisions = source.decisions(&query)?;
    if decisions.is_empty() {
        warn!(source = %source.name(), "decision feed is empty");
        return Err(BuildError::EmptyFeed.into());
    }

    let feeds = DashboardFeeds {
        decisions,
        rentability: source.rentability(&query)?,
        process_logs: source.process_logs(&query)?,
    };
    let input_hash = compute_input_hash(&feeds);
    let dashboard = build_dashboard(&feeds, config, now)?;

    let counts = FeedCounts {
        decisions: feeds.decisions.len(),
        windowed: dashboard.windowed.len(),
        rentability_days: feeds.rentability.len(),
        processes: feeds.process_logs.len(),
    };
    let duration_secs = start.elapsed().as_secs_f64();
    info!(
        source = %source.name(),
        windowed = counts.windowed,
        duration_secs,
        "dashboard run complete"
    );

    Ok(DashboardRun {
        dashboard,
        config: config.clone(),
        metadata: RunMetadata {
            source: source.name(),
            built_at: now,
            duration_secs,
            input_hash,
            counts,
            schema_version: SCHEMA_VERSION,
        },
    })
}

/// BLAKE3 hash over every fetched row, in feed order.
pub fn compute_input_hash(feeds: &DashboardFeeds) -> String {
    let mut hasher = blake3::Hasher::new();

    for DecisionRow {
        timestamp,
        index_value,
        decision_code,
        price,
    } in &feeds.decisions
    {
        match timestamp {
            Some(ts) => hasher.update(ts.to_string().as_bytes()),
            None => hasher.update(b"-"),
        };
        hasher.update(&index_value.to_le_bytes());
        hasher.update(&decision_code.to_le_bytes());
        hasher.update(&price.to_le_bytes());
    }

    // Feed separators.
    hasher.update(b"|rentability|");
    for RentabilityRow {
        date,
        rentability_sum,
        decision_count,
    } in &feeds.rentability
    {
        hasher.update(date.to_string().as_bytes());
        hasher.update(&rentability_sum.to_le_bytes());
        hasher.update(&decision_count.to_le_bytes());
    }

    hasher.update(b"|process_log|");
    for LogRow {
        process_name,
        average_duration_minutes,
    } in &feeds.process_logs
    {
        hasher.update(process_name.as_bytes());
        hasher.update(&[0]);
        hasher.update(&average_duration_minutes.to_le_bytes());
    }

    hasher.finalize().to_hex().to_string()
}
