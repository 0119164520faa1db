//! Feed sources for the three dashboard feeds.
//!
//! The [`FeedSource`] trait abstracts over the store so the runner can be fed
//! from CSV exports of the store queries, or from in-memory fixtures in
//! tests. Query bounds travel in a [`FeedQuery`] built from the dashboard
//! config.

use chrono::{Duration, NaiveDateTime};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use decisionboard_core::domain::{DecisionRow, LogRow, RentabilityRow};
use decisionboard_core::window::window_start;
use decisionboard_core::DashboardConfig;

use crate::store::{
    decode_decision_row, decode_log_row, decode_rentability_row, RowError, StoreValue,
};

pub const DECISIONS_FILE: &str = "decisions.csv";
pub const RENTABILITY_FILE: &str = "rentability.csv";
pub const PROCESS_LOG_FILE: &str = "process_log.csv";

/// Structured error types for feed access.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("store unreachable: {0}")]
    Unreachable(String),

    #[error("decision export not found at {}", path.display())]
    MissingExport { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{feed} feed, row {row}: {source}")]
    Row {
        feed: &'static str,
        row: usize,
        #[source]
        source: RowError,
    },
}

/// Bounds of the three store queries.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedQuery {
    /// Evaluation instant of the build.
    pub now: NaiveDateTime,
    /// Maximum decision rows returned.
    pub decision_limit: usize,
    /// Trailing span of the rentability aggregate.
    pub rentability_window: Duration,
}

impl FeedQuery {
    pub fn from_config(config: &DashboardConfig, now: NaiveDateTime) -> Self {
        Self {
            now,
            decision_limit: config.decision_row_limit,
            rentability_window: config.rentability_window(),
        }
    }
}

/// Trait for feed sources (store exports, fixtures).
pub trait FeedSource {
    /// Human-readable source name for logs and manifests.
    fn name(&self) -> String;

    /// Decision rows, newest first.
    fn decisions(&self, query: &FeedQuery) -> Result<Vec<DecisionRow>, SourceError>;

    /// Daily rentability rows, oldest first.
    fn rentability(&self, query: &FeedQuery) -> Result<Vec<RentabilityRow>, SourceError>;

    /// Average duration per process.
    fn process_logs(&self, query: &FeedQuery) -> Result<Vec<LogRow>, SourceError>;
}

/// Reads headerless positional CSV exports of the three store queries.
///
/// Layout: `{dir}/decisions.csv`, `{dir}/rentability.csv`,
/// `{dir}/process_log.csv`. A missing or unreadable directory is
/// [`SourceError::Unreachable`]. Inside it the decision export is required;
/// a missing aggregate export reads as an empty table.
///
/// Exports are treated as query results: row order is kept as written. The
/// decision row limit and the rentability day bound are re-applied so that
/// a raw table dump behaves like the store query. The process log export
/// arrives already aggregated over the configured `log_days`.
#[derive(Debug, Clone)]
pub struct CsvExportSource {
    dir: PathBuf,
    has_headers: bool,
}

impl CsvExportSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            has_headers: false,
        }
    }

    /// Skip a header line at the top of each export.
    pub fn with_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    fn ensure_reachable(&self) -> Result<(), SourceError> {
        match std::fs::read_dir(&self.dir) {
            Ok(_) => Ok(()),
            Err(err) => Err(SourceError::Unreachable(format!(
                "export directory {}: {err}",
                self.dir.display()
            ))),
        }
    }

    fn read_cells(&self, path: &Path) -> Result<Vec<Vec<StoreValue>>, SourceError> {
        let csv_err = |source: csv::Error| SourceError::Csv {
            path: path.to_path_buf(),
            source,
        };
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(self.has_headers)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(csv_err)?;

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(csv_err)?;
            rows.push(record.iter().map(StoreValue::from_text).collect());
        }
        Ok(rows)
    }

    fn read_optional<T>(
        &self,
        file: &str,
        feed: &'static str,
        decode_row: fn(&[StoreValue]) -> Result<T, RowError>,
    ) -> Result<Vec<T>, SourceError> {
        self.ensure_reachable()?;
        let path = self.dir.join(file);
        if !path.exists() {
            debug!(path = %path.display(), feed, "export missing; using empty table");
            return Ok(Vec::new());
        }
        decode_all(&self.read_cells(&path)?, feed, decode_row)
    }
}

fn decode_all<T>(
    rows: &[Vec<StoreValue>],
    feed: &'static str,
    decode_row: fn(&[StoreValue]) -> Result<T, RowError>,
) -> Result<Vec<T>, SourceError> {
    rows.iter()
        .enumerate()
        .map(|(i, cells)| {
            decode_row(cells).map_err(|source| SourceError::Row {
                feed,
                row: i + 1,
                source,
            })
        })
        .collect()
}

impl FeedSource for CsvExportSource {
    fn name(&self) -> String {
        format!("csv:{}", self.dir.display())
    }

    fn decisions(&self, query: &FeedQuery) -> Result<Vec<DecisionRow>, SourceError> {
        self.ensure_reachable()?;
        let path = self.dir.join(DECISIONS_FILE);
        if !path.exists() {
            return Err(SourceError::MissingExport { path });
        }
        let mut rows = decode_all(&self.read_cells(&path)?, "decision", decode_decision_row)?;
        rows.truncate(query.decision_limit);
        Ok(rows)
    }

    fn rentability(&self, query: &FeedQuery) -> Result<Vec<RentabilityRow>, SourceError> {
        let first_day = window_start(query.now, query.rentability_window).date();
        let rows = self.read_optional(RENTABILITY_FILE, "rentability", decode_rentability_row)?;
        Ok(rows.into_iter().filter(|row| row.date >= first_day).collect())
    }

    fn process_logs(&self, _query: &FeedQuery) -> Result<Vec<LogRow>, SourceError> {
        self.read_optional(PROCESS_LOG_FILE, "process log", decode_log_row)
    }
}

/// Serves fixed, already typed feeds.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pub decisions: Vec<DecisionRow>,
    pub rentability: Vec<RentabilityRow>,
    pub process_logs: Vec<LogRow>,
}

impl FeedSource for MemorySource {
    fn name(&self) -> String {
        "memory".into()
    }

    fn decisions(&self, query: &FeedQuery) -> Result<Vec<DecisionRow>, SourceError> {
        Ok(self
            .decisions
            .iter()
            .take(query.decision_limit)
            .cloned()
            .collect())
    }

    fn rentability(&self, _query: &FeedQuery) -> Result<Vec<RentabilityRow>, SourceError> {
        Ok(self.rentability.clone())
    }

    fn process_logs(&self, _query: &FeedQuery) -> Result<Vec<LogRow>, SourceError> {
        Ok(self.process_logs.clone())
    }
}
