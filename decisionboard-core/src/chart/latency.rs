//! Process latency chart: average run time per pipeline module.

use crate::config::DashboardConfig;
use crate::domain::LogRow;

use super::{Anchor, AxisLayout, ChartSpec, Layout, Legend, TextPosition, Trace, XValue};

pub fn process_latency_chart(rows: &[LogRow], config: &DashboardConfig) -> ChartSpec {
    let mut layout = Layout::new(&config.titles.latency, config.chart_height, config.chart_width);
    layout.title_x = Some(0.5);
    layout.legend = Some(Legend::above(Anchor::Center, 0.5));
    layout.x_axis = AxisLayout::hidden().with_title("Process");
    layout.y_axis = AxisLayout::hidden().with_title("Average time (min)");

    let names: Vec<XValue> = rows
        .iter()
        .map(|row| XValue::Category(row.process_name.clone()))
        .collect();
    let minutes: Vec<Option<f64>> = rows.iter().map(|row| Some(row.rounded_minutes())).collect();
    let labels: Vec<String> = rows.iter().map(LogRow::formatted_minutes).collect();

    let mut chart = ChartSpec::new(layout);
    chart.push(Trace::bar("Average time", names, minutes).with_text(labels, TextPosition::Outside));
    chart
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<LogRow> {
        vec![
            LogRow {
                process_name: "collector".into(),
                average_duration_minutes: 0.456,
            },
            LogRow {
                process_name: "model".into(),
                average_duration_minutes: 12.0,
            },
        ]
    }

    #[test]
    fn bar_per_process_with_two_decimal_labels() {
        let chart = process_latency_chart(&rows(), &DashboardConfig::default());
        assert_eq!(chart.traces.len(), 1);

        let bars = &chart.traces[0];
        assert_eq!(
            bars.x,
            vec![
                XValue::Category("collector".into()),
                XValue::Category("model".into())
            ]
        );
        assert_eq!(bars.y, vec![Some(0.46), Some(12.0)]);
        assert_eq!(bars.text, Some(vec!["0.46".to_string(), "12.00".to_string()]));
        assert_eq!(bars.text_position, Some(TextPosition::Outside));
    }

    #[test]
    fn both_axes_hide_tick_labels() {
        let chart = process_latency_chart(&rows(), &DashboardConfig::default());
        assert!(!chart.layout.x_axis.show_tick_labels);
        assert!(!chart.layout.y_axis.show_tick_labels);
        assert_eq!(chart.layout.title_x, Some(0.5));
    }
}
