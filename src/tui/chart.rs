//! Terminal chart backend — `TuiSink` over a drawable `ChartModel`.
//!
//! ratatui is immediate-mode, so the sink does not draw; it maintains the
//! model a frame is drawn from. `render` captures the layout and rebuilds
//! everything; `update` replaces the data arrays (and the bounds derived
//! from them) while keeping the styling captured at render time.

use crate::domain::history::HistorySeries;
use crate::shared::fmt;
use crate::ticker::sink::{ChartLayout, ChartSink};

/// Drawable state for one chart: data points, axis bounds, labels, layout.
#[derive(Debug, Clone, Default)]
pub struct ChartModel {
    pub layout: ChartLayout,
    /// `(timestamp_ms, price)` pairs for the price dataset.
    pub price_points: Vec<(f64, f64)>,
    /// Volume bars for the sparkline pane.
    pub volume_bars: Vec<u64>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    pub x_labels: Vec<String>,
    pub y_labels: Vec<String>,
    pub peak_volume: f64,
    pub price_text: Option<String>,
    pub has_chart: bool,
}

impl ChartModel {
    fn rebuild_data(&mut self, series: &HistorySeries) {
        self.price_points = series
            .timestamps()
            .iter()
            .zip(series.prices())
            .map(|(t, p)| (t.timestamp_millis() as f64, *p))
            .collect();
        self.volume_bars = series.volumes().iter().map(|v| v.max(0.0) as u64).collect();
        self.peak_volume = series.volumes().iter().cloned().fold(0.0, f64::max);

        let (x_min, x_max) = match (self.price_points.first(), self.price_points.last()) {
            (Some(first), Some(last)) if last.0 > first.0 => (first.0, last.0),
            (Some(first), _) => (first.0, first.0 + 1.0),
            _ => (0.0, 1.0),
        };
        self.x_bounds = [x_min, x_max];

        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        for &(_, p) in &self.price_points {
            y_min = y_min.min(p);
            y_max = y_max.max(p);
        }
        if !y_min.is_finite() || !y_max.is_finite() {
            y_min = 0.0;
            y_max = 1.0;
        }
        if y_max - y_min < f64::EPSILON {
            y_min -= 1.0;
            y_max += 1.0;
        }
        self.y_bounds = [y_min, y_max];

        self.x_labels = [x_min, (x_min + x_max) / 2.0, x_max]
            .iter()
            .map(|ms| time_label(*ms))
            .collect();
        self.y_labels = [y_min, (y_min + y_max) / 2.0, y_max]
            .iter()
            .map(|p| fmt::display_price(*p))
            .collect();
    }
}

fn time_label(ms: f64) -> String {
    chrono::DateTime::from_timestamp_millis(ms as i64)
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_default()
}

/// `ChartSink` backend for the terminal dashboard.
#[derive(Debug, Clone, Default)]
pub struct TuiSink {
    model: ChartModel,
}

impl TuiSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn model(&self) -> &ChartModel {
        &self.model
    }
}

impl ChartSink for TuiSink {
    fn render(&mut self, series: &HistorySeries, layout: &ChartLayout) {
        self.model.layout = layout.clone();
        self.model.rebuild_data(series);
        self.model.has_chart = true;
    }

    fn update(&mut self, series: &HistorySeries) {
        self.model.rebuild_data(series);
    }

    fn show_price(&mut self, display_price: &str) {
        self.model.price_text = Some(display_price.to_string());
    }
}
