//! Rentability vs. quantity chart: daily bars with a decision-count overlay.

use crate::config::DashboardConfig;
use crate::domain::RentabilityRow;

use super::{Anchor, AxisLayout, ChartSpec, Layout, Legend, TextPosition, Trace, XValue};

const QUANTITY_COLOR: &str = "firebrick";

/// One bar per day on the primary axis, one point per day on a secondary
/// axis sharing the same dates. Neither value axis shows tick labels; they
/// only scale the two traces against each other.
pub fn rentability_chart(rows: &[RentabilityRow], config: &DashboardConfig) -> ChartSpec {
    let mut layout = Layout::new(
        &config.titles.rentability,
        config.chart_height,
        config.chart_width,
    );
    layout.title_x = Some(0.5);
    layout.legend = Some(Legend::above(Anchor::Center, 0.5));
    layout.x_axis = AxisLayout::hidden().with_title("Date");
    layout.y_axis = AxisLayout::hidden().with_title("Rentability");
    layout.y_axis2 = Some(AxisLayout::hidden().with_title("Quantity").overlaying_primary());

    let dates: Vec<XValue> = rows.iter().map(|row| XValue::Date(row.date)).collect();
    let rentability: Vec<Option<f64>> = rows.iter().map(|row| Some(row.rentability_sum)).collect();
    let labels: Vec<String> = rows.iter().map(|row| row.rentability_sum.to_string()).collect();
    let quantity: Vec<Option<f64>> = rows
        .iter()
        .map(|row| Some(row.decision_count as f64))
        .collect();

    let mut chart = ChartSpec::new(layout);
    chart.push(
        Trace::bar("Rentability", dates.clone(), rentability)
            .with_text(labels, TextPosition::Outside),
    );
    chart.push(
        Trace::line_markers("Quantity", dates, quantity)
            .with_color(QUANTITY_COLOR)
            .on_secondary_axis(),
    );
    chart
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{AxisSide, RenderKind};
    use chrono::NaiveDate;

    fn rows() -> Vec<RentabilityRow> {
        (1..=3)
            .map(|d| RentabilityRow {
                date: NaiveDate::from_ymd_opt(2024, 8, d).unwrap(),
                rentability_sum: d as f64 * 1.5,
                decision_count: d as u64 * 4,
            })
            .collect()
    }

    #[test]
    fn one_bar_and_one_point_per_day() {
        let chart = rentability_chart(&rows(), &DashboardConfig::default());
        let bars = chart.trace("Rentability").unwrap();
        let points = chart.trace("Quantity").unwrap();

        assert_eq!(bars.kind, RenderKind::Bar);
        assert_eq!(points.kind, RenderKind::LineMarkers);
        assert_eq!(bars.len(), 3);
        assert_eq!(bars.x, points.x);
        assert_eq!(points.y, vec![Some(4.0), Some(8.0), Some(12.0)]);
    }

    #[test]
    fn bars_carry_their_own_value_outside() {
        let chart = rentability_chart(&rows(), &DashboardConfig::default());
        let bars = chart.trace("Rentability").unwrap();
        assert_eq!(bars.text_position, Some(TextPosition::Outside));
        assert_eq!(
            bars.text.as_deref(),
            Some(&["1.5".to_string(), "3".to_string(), "4.5".to_string()][..])
        );
    }

    #[test]
    fn quantity_sits_on_hidden_secondary_axis() {
        let chart = rentability_chart(&rows(), &DashboardConfig::default());
        assert_eq!(chart.trace("Quantity").unwrap().axis, AxisSide::Secondary);
        assert_eq!(chart.trace("Rentability").unwrap().axis, AxisSide::Primary);

        let y2 = chart.layout.y_axis2.as_ref().unwrap();
        assert!(y2.overlays_primary);
        assert!(!y2.show_tick_labels);
        assert!(!y2.show_grid);
        assert!(!chart.layout.y_axis.show_tick_labels);
    }

    #[test]
    fn empty_aggregate_gives_empty_traces() {
        let chart = rentability_chart(&[], &DashboardConfig::default());
        assert_eq!(chart.traces.len(), 2);
        assert!(chart.traces.iter().all(|t| t.is_empty()));
    }
}
