//! DecisionBoard Runner — feed access, build orchestration, artifact export.
//!
//! This crate builds on `decisionboard-core` to provide:
//! - Store boundary decoding (positional result cells to typed rows)
//! - Feed sources (CSV export directory, in-memory fixtures)
//! - Single-build runner with input hashing and run metadata
//! - Artifact export (chart JSON, manifest, series CSV/Parquet, Markdown report)

pub mod reporting;
pub mod runner;
pub mod source;
pub mod store;

pub use reporting::{export_build_with_report, ArtifactManager, ArtifactPaths};
pub use runner::{
    compute_input_hash, load_config, run_dashboard, DashboardRun, FeedCounts, RunError,
    RunMetadata, SCHEMA_VERSION,
};
pub use source::{CsvExportSource, FeedQuery, FeedSource, MemorySource, SourceError};
pub use store::{RowError, StoreValue};
