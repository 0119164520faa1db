//! Decision overlay chart: hold/buy/sell price lines with extrema labels.

use crate::classify::ClassifiedRow;
use crate::config::DashboardConfig;
use crate::domain::Signal;
use crate::extrema::{annotate, Annotation};

use super::{Anchor, AxisLayout, ChartSpec, Layout, Legend, Margin, Trace, XValue};

/// Annotate hold, buy and sell independently, in that order.
///
/// An empty column yields [`Annotation::EmptySeries`] and does not affect the
/// other two.
pub fn annotate_signals(series: &[ClassifiedRow]) -> [Annotation; 3] {
    Signal::ALL.map(|signal| annotate(series, signal))
}

/// Build the overlay chart from an already windowed series.
///
/// Rows without a timestamp cannot be placed on the time axis and are
/// skipped. `annotations` are drawn as label traces after the three lines;
/// empty series contribute nothing.
pub fn decision_overlay_chart(
    series: &[ClassifiedRow],
    annotations: &[Annotation],
    title: &str,
    config: &DashboardConfig,
) -> ChartSpec {
    let mut layout = Layout::new(title, config.chart_height, config.chart_width);
    layout.legend = Some(Legend::above(Anchor::Right, 0.95));
    layout.x_axis = AxisLayout::bare();
    layout.y_axis = AxisLayout::hidden();
    layout.margin = Some(Margin {
        left: 0,
        right: 0,
        top: 30,
        bottom: 0,
    });

    let mut chart = ChartSpec::new(layout);

    let (x, placed): (Vec<XValue>, Vec<&ClassifiedRow>) = series
        .iter()
        .filter_map(|row| row.timestamp.map(|ts| (XValue::Timestamp(ts), row)))
        .unzip();

    for signal in Signal::ALL {
        let y = placed.iter().map(|row| row.value(signal)).collect();
        chart.push(Trace::line(signal.name(), x.clone(), y));
    }

    for label in annotations.iter().flat_map(Annotation::labels) {
        chart.push(Trace::label(label));
    }

    chart
}
