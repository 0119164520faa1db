//! Export orchestrator for artifacts and reports.

use anyhow::{Context, Result};
use std::path::Path;

use crate::reporting::artifacts::{ArtifactManager, ArtifactPaths};
use crate::reporting::reports::MarkdownReportGenerator;
use crate::runner::DashboardRun;

pub fn export_build_with_report(
    output_dir: impl AsRef<Path>,
    run: &DashboardRun,
    include_report: bool,
) -> Result<ArtifactPaths> {
    let manager = ArtifactManager::new(output_dir)?;
    let mut paths = manager.save_build(run)?;

    if include_report {
        let report_path = paths.build_dir.join("report.md");
        let report = MarkdownReportGenerator.generate(run);
        std::fs::write(&report_path, report)
            .with_context(|| format!("Failed to write report to {}", report_path.display()))?;
        paths.report_markdown = Some(report_path);
    }

    Ok(paths)
}
