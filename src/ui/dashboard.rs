//! Dashboard rendering: the two live line charts.
//!
//! Both charts are rebuilt from [`crate::data::ChartState`] on every draw.
//! The availability axis is fixed at 0-100; raw status values above that are
//! clipped by the chart widget.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::ChartPanel;

/// Upper bound of the availability axis.
const AVAILABILITY_Y_MAX: f64 = 100.0;

/// Render the dashboard: response time chart above, availability below.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    if app.charts.is_empty() {
        let waiting = Paragraph::new("Waiting for first snapshot...")
            .style(Style::default().add_modifier(Modifier::DIM))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(app.theme.border_type)
                    .border_style(Style::default().fg(app.theme.border)),
            );
        frame.render_widget(waiting, area);
        return;
    }

    let chunks =
        Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)]).split(area);

    let response_max = (app.charts.response_time.max_value() * 1.1).max(10.0);
    render_panel(
        frame,
        app,
        &app.charts.response_time,
        " Response Time (ms) ",
        [0.0, response_max],
        chunks[0],
    );
    render_panel(
        frame,
        app,
        &app.charts.availability,
        " Availability (%) ",
        [0.0, AVAILABILITY_Y_MAX],
        chunks[1],
    );
}

/// Render one chart panel with a series per target.
fn render_panel(
    frame: &mut Frame,
    app: &App,
    panel: &ChartPanel,
    title: &str,
    y_bounds: [f64; 2],
    area: Rect,
) {
    let datasets: Vec<Dataset> = panel
        .series
        .iter()
        .map(|series| {
            Dataset::default()
                .name(series.target.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(series.color))
                .data(&series.points)
        })
        .collect();

    let x_max = (panel.width().saturating_sub(1)).max(1) as f64;

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .x_axis(
            Axis::default()
                .style(Style::default().fg(app.theme.border))
                .bounds([0.0, x_max])
                .labels(x_labels(panel)),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(app.theme.border))
                .bounds(y_bounds)
                .labels(y_labels(y_bounds)),
        );

    frame.render_widget(chart, area);
}

/// First, middle, and last timestamp labels for the x-axis.
fn x_labels(panel: &ChartPanel) -> Vec<String> {
    let labels = &panel.labels;
    match labels.len() {
        0 => Vec::new(),
        1 => vec![labels[0].clone()],
        2 => vec![labels[0].clone(), labels[1].clone()],
        n => vec![
            labels[0].clone(),
            labels[n / 2].clone(),
            labels[n - 1].clone(),
        ],
    }
}

/// Min, midpoint, and max labels for the y-axis.
fn y_labels(bounds: [f64; 2]) -> Vec<String> {
    vec![
        format!("{:.0}", bounds[0]),
        format!("{:.0}", (bounds[0] + bounds[1]) / 2.0),
        format!("{:.0}", bounds[1]),
    ]
}
