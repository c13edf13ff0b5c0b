//! Terminal dashboard widgets.

pub mod chart;

pub use chart::{ChartModel, TuiSink};

use crate::shared::fmt;
use crate::ticker::sink::{Rgb, TraceKind};
use crate::ticker::state::{Phase, TickerState};

use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Sparkline};
use ratatui::Frame;

fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

/// Draw one frame: price readout header, price pane, volume pane, key hints.
pub fn draw(frame: &mut Frame, state: &TickerState, model: &ChartModel) {
    let price_weight = (model.layout.price_pane.height() * 100.0) as u16;
    let volume_weight = (model.layout.volume_pane.height() * 100.0) as u16;
    let [header, price_area, volume_area, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Fill(price_weight.max(1)),
        Constraint::Fill(volume_weight.max(1)),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_header(frame, state, model, header);

    if model.has_chart {
        draw_price_pane(frame, model, price_area);
        draw_volume_pane(frame, model, volume_area);
    } else {
        let placeholder = match state.phase() {
            Phase::Loading => "loading…",
            _ => "no data yet",
        };
        frame.render_widget(
            Paragraph::new(placeholder).block(Block::default().borders(Borders::ALL)),
            price_area,
        );
    }

    frame.render_widget(
        Paragraph::new("←/→ switch coin · q quit").style(Style::default().fg(Color::DarkGray)),
        footer,
    );
}

fn draw_header(
    frame: &mut Frame,
    state: &TickerState,
    model: &ChartModel,
    area: ratatui::layout::Rect,
) {
    let name = state
        .selected_coin()
        .map(|c| c.name.as_str())
        .unwrap_or("no coin selected");
    let price = model.price_text.as_deref().unwrap_or("—");
    let phase = match state.phase() {
        Phase::Idle => "idle",
        Phase::Loading => "loading",
        Phase::Ready => "live",
    };

    let line = Line::from(vec![
        Span::styled(name, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("   $ "),
        Span::styled(
            price,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("   [{phase}]")),
    ]);
    frame.render_widget(
        Paragraph::new(line).block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn draw_price_pane(frame: &mut Frame, model: &ChartModel, area: ratatui::layout::Rect) {
    let style = &model.layout.price_trace;
    let mut dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .style(Style::default().fg(color(style.color)))
        .data(&model.price_points);
    dataset = match style.kind {
        TraceKind::LineWithMarkers { .. } => dataset.graph_type(GraphType::Line),
        TraceKind::Bars => dataset.graph_type(GraphType::Bar),
    };
    if model.layout.show_legend {
        dataset = dataset.name(style.name.clone());
    }

    let chart = Chart::new(vec![dataset])
        .block(Block::default().borders(Borders::ALL))
        .x_axis(
            Axis::default()
                .bounds(model.x_bounds)
                .labels(model.x_labels.iter().cloned())
                .style(Style::default().fg(Color::Gray)),
        )
        .y_axis(
            Axis::default()
                .bounds(model.y_bounds)
                .labels(model.y_labels.iter().cloned())
                .style(Style::default().fg(Color::Gray)),
        );
    frame.render_widget(chart, area);
}

fn draw_volume_pane(frame: &mut Frame, model: &ChartModel, area: ratatui::layout::Rect) {
    let style = &model.layout.volume_trace;
    let title = format!("{} · peak {}", style.name, fmt::abbreviate(model.peak_volume));
    let sparkline = Sparkline::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .style(Style::default().fg(color(style.color)))
        .data(model.volume_bars.iter().copied());
    frame.render_widget(sparkline, area);
}
