//! Chart spec export (one JSON file per slot).

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use decisionboard_core::Dashboard;

pub fn write_charts(dir: &Path, dashboard: &Dashboard) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).context("Failed to create chart directory")?;

    let mut paths = Vec::with_capacity(5);
    for (slot, chart) in dashboard.charts() {
        let path = dir.join(format!("{}.json", slot.id()));
        let json = chart
            .to_json()
            .with_context(|| format!("Failed to serialize {} chart", slot.id()))?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write chart to {}", path.display()))?;
        paths.push(path);
    }
    Ok(paths)
}
