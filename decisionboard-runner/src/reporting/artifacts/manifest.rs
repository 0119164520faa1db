//! Build manifest export (JSON).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use decisionboard_core::{BuildWarning, ChartSlot, DashboardConfig};

use crate::runner::{DashboardRun, FeedCounts};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildManifest {
    pub build_id: String,
    pub schema_version: u32,
    pub source: String,
    pub built_at: chrono::NaiveDateTime,
    pub duration_secs: f64,
    pub input_hash: String,
    pub counts: FeedCounts,
    /// Chart slots per dashboard column.
    pub columns: [Vec<ChartSlot>; 2],
    pub warnings: Vec<BuildWarning>,
    pub config: DashboardConfig,
}

impl BuildManifest {
    pub fn from_run(run: &DashboardRun) -> Self {
        let meta = &run.metadata;
        Self {
            build_id: meta.build_id(),
            schema_version: meta.schema_version,
            source: meta.source.clone(),
            built_at: meta.built_at,
            duration_secs: meta.duration_secs,
            input_hash: meta.input_hash.clone(),
            counts: meta.counts,
            columns: run.dashboard.columns(),
            warnings: run.warnings(),
            config: run.config.clone(),
        }
    }
}

pub fn write_manifest(path: &Path, run: &DashboardRun) -> Result<()> {
    let manifest = BuildManifest::from_run(run);
    let json = serde_json::to_string_pretty(&manifest)
        .context("Failed to serialize build manifest")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write manifest to {}", path.display()))?;
    Ok(())
}
