//! Decision index chart: index value over time against fixed thresholds.

use crate::config::DashboardConfig;
use crate::domain::DecisionRow;

use super::{AxisLayout, ChartSpec, Layout, LineDash, ReferenceLine, Trace, XValue};

const UPPER_COLOR: &str = "orange";
const LOWER_COLOR: &str = "green";

/// Build the index chart from the full decision feed (no windowing).
///
/// Rows without a timestamp cannot be placed on the time axis and are
/// skipped.
pub fn decision_index_chart(rows: &[DecisionRow], config: &DashboardConfig) -> ChartSpec {
    let mut layout = Layout::new(&config.titles.index, config.chart_height, config.chart_width);
    layout.y_axis = AxisLayout::default().with_range(config.index_axis_range);

    let upper = config.upper_threshold();
    let lower = config.lower_threshold();
    layout.reference_lines = vec![
        ReferenceLine {
            y: upper,
            dash: LineDash::Dash,
            color: UPPER_COLOR.into(),
            annotation: format!("Upper limit ({upper:+})"),
        },
        ReferenceLine {
            y: lower,
            dash: LineDash::Dash,
            color: LOWER_COLOR.into(),
            annotation: format!("Lower limit ({lower:+})"),
        },
    ];

    let (x, y): (Vec<XValue>, Vec<Option<f64>>) = rows
        .iter()
        .filter_map(|row| {
            row.timestamp
                .map(|ts| (XValue::Timestamp(ts), Some(row.index_value)))
        })
        .unzip();

    let mut chart = ChartSpec::new(layout);
    chart.push(Trace::line("Index", x, y));
    chart
}
