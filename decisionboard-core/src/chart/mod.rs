//! Chart specifications and the four chart assemblers.
//!
//! A [`ChartSpec`] is plain data: an ordered list of traces plus layout
//! metadata. It has no rendering behavior; the display surface turns it into
//! pixels. Assemblers never fail. Anything that goes wrong while annotating
//! a series is absorbed and the chart is returned without those labels.

pub mod decision;
pub mod index;
pub mod latency;
pub mod rentability;

pub use decision::{annotate_signals, decision_overlay_chart};
pub use index::decision_index_chart;
pub use latency::process_latency_chart;
pub use rentability::rentability_chart;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::extrema::{ExtremaKind, ExtremaLabel};

/// One x coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum XValue {
    Timestamp(NaiveDateTime),
    Date(NaiveDate),
    Category(String),
}

/// How a trace is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderKind {
    Line,
    Bar,
    LineMarkers,
    MarkerText,
}

/// Value axis a trace is plotted against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisSide {
    Primary,
    Secondary,
}

/// Where a trace's text labels sit relative to the point or bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextPosition {
    TopRight,
    BottomRight,
    Outside,
}

/// A single data series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    pub name: String,
    pub kind: RenderKind,
    pub axis: AxisSide,
    pub x: Vec<XValue>,
    pub y: Vec<Option<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_position: Option<TextPosition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub show_legend: bool,
}

impl Trace {
    fn new(name: impl Into<String>, kind: RenderKind, x: Vec<XValue>, y: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            kind,
            axis: AxisSide::Primary,
            x,
            y,
            text: None,
            text_position: None,
            color: None,
            show_legend: true,
        }
    }

    pub fn line(name: impl Into<String>, x: Vec<XValue>, y: Vec<Option<f64>>) -> Self {
        Self::new(name, RenderKind::Line, x, y)
    }

    pub fn bar(name: impl Into<String>, x: Vec<XValue>, y: Vec<Option<f64>>) -> Self {
        Self::new(name, RenderKind::Bar, x, y)
    }

    pub fn line_markers(name: impl Into<String>, x: Vec<XValue>, y: Vec<Option<f64>>) -> Self {
        Self::new(name, RenderKind::LineMarkers, x, y)
    }

    /// Single-point marker with the label's value as text.
    ///
    /// `last` and `min` text sits below-right of the point, `max` above-right.
    /// Label traces stay out of the legend.
    pub fn label(label: &ExtremaLabel) -> Self {
        let position = match label.kind {
            ExtremaKind::Max => TextPosition::TopRight,
            ExtremaKind::Last | ExtremaKind::Min => TextPosition::BottomRight,
        };
        let mut trace = Self::new(
            label.trace_name(),
            RenderKind::MarkerText,
            vec![XValue::Timestamp(label.timestamp)],
            vec![Some(label.value)],
        )
        .with_text(vec![label.text()], position);
        trace.show_legend = false;
        trace
    }

    pub fn with_text(mut self, text: Vec<String>, position: TextPosition) -> Self {
        self.text = Some(text);
        self.text_position = Some(position);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn on_secondary_axis(mut self) -> Self {
        self.axis = AxisSide::Secondary;
        self
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    Left,
    Center,
    Right,
    Top,
    Middle,
    Bottom,
}

/// Legend placement in paper coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    pub orientation: Orientation,
    pub x_anchor: Anchor,
    pub y_anchor: Anchor,
    pub x: f64,
    pub y: f64,
}

impl Legend {
    /// Horizontal legend sitting just above the plot area.
    pub fn above(x_anchor: Anchor, x: f64) -> Self {
        Self {
            orientation: Orientation::Horizontal,
            x_anchor,
            y_anchor: Anchor::Bottom,
            x,
            y: 1.02,
        }
    }
}

/// Which side of the plot an axis is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisPlacement {
    Left,
    Right,
}

/// Visibility flags and overrides for one axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisLayout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub show_line: bool,
    pub show_grid: bool,
    pub zero_line: bool,
    pub show_tick_labels: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
    /// Set on a secondary axis drawn over the primary one.
    #[serde(default)]
    pub overlays_primary: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement: Option<AxisPlacement>,
}

impl Default for AxisLayout {
    fn default() -> Self {
        Self {
            title: None,
            show_line: true,
            show_grid: true,
            zero_line: true,
            show_tick_labels: true,
            range: None,
            overlays_primary: false,
            placement: None,
        }
    }
}

impl AxisLayout {
    /// No line, grid or zero-line. Tick labels stay.
    pub fn bare() -> Self {
        Self {
            show_line: false,
            show_grid: false,
            zero_line: false,
            ..Self::default()
        }
    }

    /// Nothing drawn at all, tick labels included.
    pub fn hidden() -> Self {
        Self {
            show_tick_labels: false,
            ..Self::bare()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_range(mut self, range: [f64; 2]) -> Self {
        self.range = Some(range);
        self
    }

    /// Turn this axis into a right-hand overlay of the primary value axis.
    pub fn overlaying_primary(mut self) -> Self {
        self.overlays_primary = true;
        self.placement = Some(AxisPlacement::Right);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineDash {
    Solid,
    Dash,
}

/// Horizontal line across the plot at a fixed value, with a text label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceLine {
    pub y: f64,
    pub dash: LineDash,
    pub color: String,
    pub annotation: String,
}

/// Layout metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub title: String,
    /// Horizontal title position in paper coordinates; `None` = renderer default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_x: Option<f64>,
    pub height: u32,
    pub width: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
    pub x_axis: AxisLayout,
    pub y_axis: AxisLayout,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y_axis2: Option<AxisLayout>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margin>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reference_lines: Vec<ReferenceLine>,
}

impl Layout {
    pub fn new(title: impl Into<String>, height: u32, width: u32) -> Self {
        Self {
            title: title.into(),
            title_x: None,
            height,
            width,
            legend: None,
            x_axis: AxisLayout::default(),
            y_axis: AxisLayout::default(),
            y_axis2: None,
            margin: None,
            reference_lines: Vec::new(),
        }
    }
}

/// Renderer-independent chart description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub traces: Vec<Trace>,
    pub layout: Layout,
}

impl ChartSpec {
    pub fn new(layout: Layout) -> Self {
        Self {
            traces: Vec::new(),
            layout,
        }
    }

    pub fn push(&mut self, trace: Trace) {
        self.traces.push(trace);
    }

    pub fn title(&self) -> &str {
        &self.layout.title
    }

    /// First trace with the given name.
    pub fn trace(&self, name: &str) -> Option<&Trace> {
        self.traces.iter().find(|t| t.name == name)
    }

    /// Traces drawn as marker+text labels.
    pub fn label_traces(&self) -> impl Iterator<Item = &Trace> {
        self.traces
            .iter()
            .filter(|t| t.kind == RenderKind::MarkerText)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
