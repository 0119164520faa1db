//! Extrema annotator: last / max / min labels for one series.
//!
//! Missing values (and NaN) are skipped. "Last" is the highest-index row that
//! has a value, which need not be the final row of the table. Ties for max
//! and min resolve to the first occurrence in row order.
//!
//! A series with no values at all is not an error: the annotator returns
//! [`Annotation::EmptySeries`], logs a warning, and the chart renders
//! without labels for that series.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::classify::ClassifiedRow;
use crate::domain::Signal;

/// Which extremum a label marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtremaKind {
    Last,
    Max,
    Min,
}

impl ExtremaKind {
    pub const ALL: [ExtremaKind; 3] = [ExtremaKind::Last, ExtremaKind::Max, ExtremaKind::Min];

    /// Prefix of the label trace name.
    pub fn prefix(self) -> &'static str {
        match self {
            ExtremaKind::Last => "Last",
            ExtremaKind::Max => "Max",
            ExtremaKind::Min => "Min",
        }
    }
}

/// Position of an extremum inside a series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtremaPoint {
    pub index: usize,
    pub value: f64,
}

/// Last, max and min of a series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extrema {
    pub last: ExtremaPoint,
    pub max: ExtremaPoint,
    pub min: ExtremaPoint,
}

impl Extrema {
    pub fn get(&self, kind: ExtremaKind) -> ExtremaPoint {
        match kind {
            ExtremaKind::Last => self.last,
            ExtremaKind::Max => self.max,
            ExtremaKind::Min => self.min,
        }
    }
}

/// Compute extrema over the present values of `values`.
///
/// Returns `None` when no value is present.
pub fn find_extrema(values: &[Option<f64>]) -> Option<Extrema> {
    let mut present = values
        .iter()
        .enumerate()
        .filter_map(|(index, value)| {
            value
                .filter(|v| !v.is_nan())
                .map(|value| ExtremaPoint { index, value })
        });

    let first = present.next()?;
    let mut extrema = Extrema {
        last: first,
        max: first,
        min: first,
    };

    for point in present {
        extrema.last = point;
        // Strict comparisons keep the first occurrence on ties.
        if point.value > extrema.max.value {
            extrema.max = point;
        }
        if point.value < extrema.min.value {
            extrema.min = point;
        }
    }

    Some(extrema)
}

/// A labeled extremum, ready to be drawn as a marker with text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtremaLabel {
    pub series: String,
    pub timestamp: NaiveDateTime,
    pub value: f64,
    pub kind: ExtremaKind,
}

impl ExtremaLabel {
    /// Display text: the value with two decimals.
    pub fn text(&self) -> String {
        format!("{:.2}", self.value)
    }

    /// Trace name, e.g. `Max Buy`.
    pub fn trace_name(&self) -> String {
        format!("{} {}", self.kind.prefix(), self.series)
    }
}

/// Outcome of annotating one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Annotation {
    /// Labels in `[last, max, min]` order.
    Labels { labels: [ExtremaLabel; 3] },
    /// The series had no values; nothing to label.
    EmptySeries { series: String },
}

impl Annotation {
    pub fn labels(&self) -> &[ExtremaLabel] {
        match self {
            Annotation::Labels { labels } => labels,
            Annotation::EmptySeries { .. } => &[],
        }
    }

    pub fn is_empty_series(&self) -> bool {
        matches!(self, Annotation::EmptySeries { .. })
    }
}

/// Annotate a named series given as `(timestamp, value)` pairs.
///
/// Pairs without a timestamp count as missing values.
pub fn annotate_points(
    series: &str,
    points: &[(Option<NaiveDateTime>, Option<f64>)],
) -> Annotation {
    let values: Vec<Option<f64>> = points
        .iter()
        .map(|(ts, value)| ts.and(*value))
        .collect();

    let labels = find_extrema(&values).and_then(|extrema| {
        let label = |kind: ExtremaKind| {
            let point = extrema.get(kind);
            points[point.index].0.map(|timestamp| ExtremaLabel {
                series: series.to_string(),
                timestamp,
                value: point.value,
                kind,
            })
        };
        Some([
            label(ExtremaKind::Last)?,
            label(ExtremaKind::Max)?,
            label(ExtremaKind::Min)?,
        ])
    });

    match labels {
        Some(labels) => Annotation::Labels { labels },
        None => {
            warn!(series, "no valid values in series; skipping extrema labels");
            Annotation::EmptySeries {
                series: series.to_string(),
            }
        }
    }
}

/// Annotate one signal column of a classified table.
pub fn annotate(series: &[ClassifiedRow], signal: Signal) -> Annotation {
    let points: Vec<_> = series
        .iter()
        .map(|row| (row.timestamp, row.value(signal)))
        .collect();
    annotate_points(signal.name(), &points)
}
