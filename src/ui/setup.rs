//! Setup form rendering.
//!
//! Shows the URL rows and the two numeric settings, with the focused field
//! highlighted. Validation errors appear in the status bar, not here.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::input::FormFocus;

/// Render the setup form.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let form = &app.form;
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled("Websites", app.theme.header)));
    for (i, url) in form.urls.iter().enumerate() {
        lines.push(field_line(
            app,
            &format!("URL {}", i + 1),
            url,
            form.focus == FormFocus::Url(i),
        ));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Settings", app.theme.header)));
    lines.push(field_line(
        app,
        "Interval (s)",
        &form.interval,
        form.focus == FormFocus::Interval,
    ));
    lines.push(field_line(
        app,
        "Requests/check",
        &form.requests,
        form.focus == FormFocus::Requests,
    ));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter starts monitoring · Ctrl+N adds another URL",
        app.theme.hint,
    )));

    let block = Block::default()
        .title(" Monitor setup ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// One labeled input row; the focused one gets a marker and highlight.
fn field_line<'a>(app: &App, label: &str, value: &'a str, focused: bool) -> Line<'a> {
    let marker = if focused { "▸ " } else { "  " };
    let value_style = if focused {
        app.theme.focused
    } else {
        Style::default()
    };

    // Show a block cursor in the focused field
    let shown = if focused {
        format!("{}▏", value)
    } else if value.is_empty() {
        "·".to_string()
    } else {
        value.to_string()
    };

    Line::from(vec![
        Span::raw(marker.to_string()),
        Span::styled(format!("{:<15}", label), app.theme.header),
        Span::styled(shown, value_style),
    ])
}
