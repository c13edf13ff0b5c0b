//! Chart sink — the injected rendering capability.
//!
//! The controller never talks to a plotting backend directly; it drives a
//! [`ChartSink`]. `render` draws the chart from scratch with a layout,
//! `update` replaces only the data of the existing traces — redrawing every
//! tick is visibly more expensive and flickers, so the controller calls
//! `render` exactly once per coin selection and `update` thereafter.

use crate::domain::history::HistorySeries;

/// Rendering backend for the price/volume chart and the numeric readout.
pub trait ChartSink {
    /// Initial draw: two panes sharing a time axis, styled per `layout`.
    fn render(&mut self, series: &HistorySeries, layout: &ChartLayout);

    /// In-place data replacement. Layout and styling configured by the
    /// preceding `render` call must be preserved.
    fn update(&mut self, series: &HistorySeries);

    /// Plain numeric price readout.
    fn show_price(&mut self, display_price: &str);
}

/// A sink that discards everything. Useful headless and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ChartSink for NullSink {
    fn render(&mut self, _series: &HistorySeries, _layout: &ChartLayout) {}
    fn update(&mut self, _series: &HistorySeries) {}
    fn show_price(&mut self, _display_price: &str) {}
}

// ─── Layout descriptors ──────────────────────────────────────────────────────

/// An RGB color, backend-agnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };
    pub const STEEL: Rgb = Rgb {
        r: 49,
        g: 130,
        b: 189,
    };
}

/// How a trace is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceKind {
    /// Connected line with sample markers.
    LineWithMarkers { marker_size: u8 },
    /// Vertical bars.
    Bars,
}

/// Styling for one trace.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceStyle {
    pub name: String,
    pub color: Rgb,
    pub opacity: f64,
    pub kind: TraceKind,
}

/// Vertical span of a pane, as fractions of the chart height (0 = bottom).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaneDomain {
    pub from: f64,
    pub to: f64,
}

impl PaneDomain {
    /// Fraction of the full height this pane occupies.
    pub fn height(&self) -> f64 {
        self.to - self.from
    }
}

/// Full chart layout: an upper price pane and a lower volume pane sharing
/// the time axis.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub show_legend: bool,
    pub price_pane: PaneDomain,
    pub volume_pane: PaneDomain,
    pub price_trace: TraceStyle,
    pub volume_trace: TraceStyle,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            show_legend: false,
            price_pane: PaneDomain { from: 0.1, to: 1.0 },
            volume_pane: PaneDomain { from: 0.0, to: 0.1 },
            price_trace: TraceStyle {
                name: "Price ($)".into(),
                color: Rgb::BLUE,
                opacity: 1.0,
                kind: TraceKind::LineWithMarkers { marker_size: 3 },
            },
            volume_trace: TraceStyle {
                name: "Volume ($B)".into(),
                color: Rgb::STEEL,
                opacity: 0.7,
                kind: TraceKind::Bars,
            },
        }
    }
}
