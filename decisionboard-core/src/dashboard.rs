//! Dashboard build: runs the whole pipeline once.
//!
//! Feeds → classified series → 24h window → per-signal annotations → five
//! chart specs. An empty decision feed aborts the build before any chart is
//! assembled. Empty signal series only cost their labels and are reported
//! as warnings.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::chart::{
    annotate_signals, decision_index_chart, decision_overlay_chart, process_latency_chart,
    rentability_chart, ChartSpec,
};
use crate::classify::{classify, ClassifiedSeries};
use crate::config::DashboardConfig;
use crate::domain::{DecisionRow, LogRow, RentabilityRow};
use crate::extrema::Annotation;
use crate::window::trailing_window;

/// Errors that abort a whole build.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("No decision data found; dashboard build aborted.")]
    EmptyFeed,
}

/// Non-fatal conditions met while building.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BuildWarning {
    /// A signal series had no values inside the window; its labels were skipped.
    EmptySeries { series: String },
}

impl std::fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildWarning::EmptySeries { series } => {
                write!(f, "series '{series}' has no values; labels skipped")
            }
        }
    }
}

/// Row-shaped inputs of one build, already decoded into typed rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardFeeds {
    pub decisions: Vec<DecisionRow>,
    pub rentability: Vec<RentabilityRow>,
    pub process_logs: Vec<LogRow>,
}

/// Position of a chart on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartSlot {
    Overlay,
    OverlayTest,
    Index,
    Rentability,
    Latency,
}

impl ChartSlot {
    pub const ALL: [ChartSlot; 5] = [
        ChartSlot::Overlay,
        ChartSlot::OverlayTest,
        ChartSlot::Index,
        ChartSlot::Rentability,
        ChartSlot::Latency,
    ];

    /// Stable identifier, also used as the artifact file stem.
    pub fn id(self) -> &'static str {
        match self {
            ChartSlot::Overlay => "overlay",
            ChartSlot::OverlayTest => "overlay_test",
            ChartSlot::Index => "index",
            ChartSlot::Rentability => "rentability",
            ChartSlot::Latency => "latency",
        }
    }
}

/// Result of one build: five chart specs plus the table they came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    /// Evaluation instant used for windowing.
    pub built_at: NaiveDateTime,
    /// Classified rows inside the decision window.
    pub windowed: ClassifiedSeries,
    /// Hold, buy and sell annotations of `windowed`.
    pub annotations: [Annotation; 3],
    pub overlay: ChartSpec,
    pub overlay_test: ChartSpec,
    pub index: ChartSpec,
    pub rentability: ChartSpec,
    pub latency: ChartSpec,
}

impl Dashboard {
    pub fn chart(&self, slot: ChartSlot) -> &ChartSpec {
        match slot {
            ChartSlot::Overlay => &self.overlay,
            ChartSlot::OverlayTest => &self.overlay_test,
            ChartSlot::Index => &self.index,
            ChartSlot::Rentability => &self.rentability,
            ChartSlot::Latency => &self.latency,
        }
    }

    /// All charts with their slots.
    pub fn charts(&self) -> impl Iterator<Item = (ChartSlot, &ChartSpec)> {
        ChartSlot::ALL.into_iter().map(|slot| (slot, self.chart(slot)))
    }

    /// Two-column grid: A = overlay, index, latency; B = overlay (test), rentability.
    pub fn columns(&self) -> [Vec<ChartSlot>; 2] {
        [
            vec![ChartSlot::Overlay, ChartSlot::Index, ChartSlot::Latency],
            vec![ChartSlot::OverlayTest, ChartSlot::Rentability],
        ]
    }

    pub fn warnings(&self) -> Vec<BuildWarning> {
        self.annotations
            .iter()
            .filter_map(|annotation| match annotation {
                Annotation::EmptySeries { series } => Some(BuildWarning::EmptySeries {
                    series: series.clone(),
                }),
                Annotation::Labels { .. } => None,
            })
            .collect()
    }
}

/// Build every chart of the dashboard.
///
/// `now` is the evaluation instant of this build; the caller reads the clock
/// once and passes it in.
pub fn build_dashboard(
    feeds: &DashboardFeeds,
    config: &DashboardConfig,
    now: NaiveDateTime,
) -> Result<Dashboard, BuildError> {
    if feeds.decisions.is_empty() {
        return Err(BuildError::EmptyFeed);
    }

    let classified = classify(&feeds.decisions);
    let windowed = trailing_window(&classified, now, config.decision_window());
    debug!(
        rows = classified.len(),
        windowed = windowed.len(),
        window_hours = config.window_hours,
        "classified decision feed"
    );

    let annotations = annotate_signals(&windowed);

    // Both overlays come from the same windowed table; only the title differs.
    let overlay = decision_overlay_chart(&windowed, &annotations, &config.titles.overlay, config);
    let overlay_test =
        decision_overlay_chart(&windowed, &annotations, &config.titles.overlay_test, config);
    let index = decision_index_chart(&feeds.decisions, config);
    let rentability = rentability_chart(&feeds.rentability, config);
    let latency = process_latency_chart(&feeds.process_logs, config);

    info!(
        decisions = feeds.decisions.len(),
        days = feeds.rentability.len(),
        processes = feeds.process_logs.len(),
        "dashboard built"
    );

    Ok(Dashboard {
        built_at: now,
        windowed,
        annotations,
        overlay,
        overlay_test,
        index,
        rentability,
        latency,
    })
}
