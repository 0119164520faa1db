//! Artifact manager for persisting build outputs.

mod charts;
mod manifest;
mod series;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::runner::DashboardRun;

pub use manifest::BuildManifest;

/// Artifact paths returned after export.
#[derive(Debug, Clone)]
pub struct ArtifactPaths {
    pub build_dir: PathBuf,
    pub manifest: PathBuf,
    /// One JSON chart spec per slot, in slot order.
    pub charts: Vec<PathBuf>,
    pub decisions_csv: PathBuf,
    pub decisions_parquet: PathBuf,
    pub report_markdown: Option<PathBuf>,
}

/// Manages writing all artifacts for a build.
#[derive(Debug, Clone)]
pub struct ArtifactManager {
    output_dir: PathBuf,
}

impl ArtifactManager {
    pub fn new(output_dir: impl AsRef<Path>) -> Result<Self> {
        let output_dir = output_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&output_dir)
            .context("Failed to create artifact output directory")?;
        Ok(Self { output_dir })
    }

    /// Save complete build artifacts under `{output_dir}/{build_id}/`.
    pub fn save_build(&self, run: &DashboardRun) -> Result<ArtifactPaths> {
        let build_dir = self.output_dir.join(run.metadata.build_id());
        std::fs::create_dir_all(&build_dir)
            .context("Failed to create build artifact directory")?;

        let charts = charts::write_charts(&build_dir.join("charts"), &run.dashboard)?;

        let manifest_path = build_dir.join("manifest.json");
        manifest::write_manifest(&manifest_path, run)?;

        let decisions_csv = build_dir.join("decisions.csv");
        let decisions_parquet = build_dir.join("decisions.parquet");
        series::write_series_csv(&decisions_csv, &run.dashboard.windowed)?;
        series::write_series_parquet(&decisions_parquet, &run.dashboard.windowed)?;

        Ok(ArtifactPaths {
            build_dir,
            manifest: manifest_path,
            charts,
            decisions_csv,
            decisions_parquet,
            report_markdown: None,
        })
    }
}
