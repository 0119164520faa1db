//! DecisionBoard Core — decision classification and chart assembly.
//!
//! This crate turns decoded store rows into chart specifications:
//! - Domain rows (decisions, daily rentability, process logs)
//! - Record classifier (hold / buy / sell price series)
//! - Trailing time window filter
//! - Extrema annotator (last / max / min labels)
//! - Chart specs and the four chart assemblers
//! - Dashboard configuration and the end-to-end build

pub mod chart;
pub mod classify;
pub mod config;
pub mod dashboard;
pub mod domain;
pub mod extrema;
pub mod window;

pub use chart::ChartSpec;
pub use config::{ConfigError, DashboardConfig};
pub use dashboard::{
    build_dashboard, BuildError, BuildWarning, ChartSlot, Dashboard, DashboardFeeds,
};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: build inputs and outputs are Send + Sync, so a
    /// long-running service can build dashboards off the main thread.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::DecisionRow>();
        require_sync::<domain::DecisionRow>();
        require_send::<domain::RentabilityRow>();
        require_sync::<domain::RentabilityRow>();
        require_send::<domain::LogRow>();
        require_sync::<domain::LogRow>();
        require_send::<classify::ClassifiedRow>();
        require_sync::<classify::ClassifiedRow>();
        require_send::<extrema::Annotation>();
        require_sync::<extrema::Annotation>();
        require_send::<ChartSpec>();
        require_sync::<ChartSpec>();
        require_send::<DashboardConfig>();
        require_sync::<DashboardConfig>();
        require_send::<Dashboard>();
        require_sync::<Dashboard>();
        require_send::<DashboardFeeds>();
        require_sync::<DashboardFeeds>();
    }

    /// Assemblers return a chart, never a Result.
    #[test]
    fn assemblers_are_infallible() {
        let config = DashboardConfig::default();
        let _: ChartSpec = chart::decision_index_chart(&[], &config);
        let _: ChartSpec = chart::rentability_chart(&[], &config);
        let _: ChartSpec = chart::process_latency_chart(&[], &config);
        let _: ChartSpec = chart::decision_overlay_chart(&[], &[], "overlay", &config);
    }
}
