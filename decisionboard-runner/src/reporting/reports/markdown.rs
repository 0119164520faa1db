//! Markdown report generator.

use decisionboard_core::extrema::Annotation;

use crate::runner::DashboardRun;

pub struct MarkdownReportGenerator;

impl MarkdownReportGenerator {
    pub fn generate(&self, run: &DashboardRun) -> String {
        let meta = &run.metadata;
        let mut report = format!(
            "# DecisionBoard Build Report\n\n\
Build ID: `{}`\n\n\
## Summary\n\
- Built at: {}\n\
- Source: {}\n\
- Decisions fetched: {}\n\
- In {}h window: {}\n\
- Rentability days: {}\n\
- Processes (last {}d): {}\n\
- Input hash: `{}`\n",
            meta.build_id(),
            meta.built_at.format("%Y-%m-%d %H:%M:%S"),
            meta.source,
            meta.counts.decisions,
            run.config.window_hours,
            meta.counts.windowed,
            meta.counts.rentability_days,
            run.config.log_days,
            meta.counts.processes,
            meta.input_hash,
        );

        report.push_str("\n## Signal Extrema\n\n");
        report.push_str("| Series | Last | Max | Min |\n");
        report.push_str("|--------|------|-----|-----|\n");
        for annotation in &run.dashboard.annotations {
            match annotation {
                Annotation::Labels { labels } => {
                    let [last, max, min] = labels;
                    report.push_str(&format!(
                        "| {} | {} @ {} | {} @ {} | {} @ {} |\n",
                        last.series,
                        last.text(),
                        last.timestamp.format("%H:%M"),
                        max.text(),
                        max.timestamp.format("%H:%M"),
                        min.text(),
                        min.timestamp.format("%H:%M"),
                    ));
                }
                Annotation::EmptySeries { series } => {
                    report.push_str(&format!("| {series} | - | - | - |\n"));
                }
            }
        }

        let warnings = run.warnings();
        if !warnings.is_empty() {
            report.push_str("\n## Warnings\n\n");
            for warning in &warnings {
                report.push_str(&format!("- {warning}\n"));
            }
        }

        report.push_str("\n## Layout\n\n");
        for (i, column) in run.dashboard.columns().iter().enumerate() {
            let titles: Vec<&str> = column
                .iter()
                .map(|slot| run.dashboard.chart(*slot).title())
                .collect();
            report.push_str(&format!("- Column {}: {}\n", i + 1, titles.join(", ")));
        }

        report
    }
}
