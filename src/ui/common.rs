//! Common UI components shared across views.
//!
//! This module contains the header bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, Mode};

/// Render the header bar with loop state and cycle counters.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let (indicator, indicator_style) = if app.is_monitoring() {
        ("●", Style::default().fg(app.theme.healthy))
    } else {
        ("○", Style::default().fg(app.theme.critical))
    };

    let mut spans = vec![
        Span::styled(format!(" {} ", indicator), indicator_style),
        Span::styled("SITEWATCH ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::raw(app.endpoint().to_string()),
    ];

    if let Some((cycles, failures)) = app.cycle_counts() {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            format!("{}", cycles),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(" cycles "));
        if failures > 0 {
            spans.push(Span::styled(
                format!("{}", failures),
                Style::default().fg(app.theme.warning),
            ));
        } else {
            spans.push(Span::styled("0", Style::default().add_modifier(Modifier::DIM)));
        }
        spans.push(Span::raw(" failed"));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the status bar at the bottom.
///
/// Shows context-sensitive controls; temporary status messages (including
/// validation errors) take precedence.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    // Check for temporary status message first
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let controls = match app.mode {
        Mode::Setup => {
            " Tab/↑↓:field Ctrl+N:add URL Ctrl+D:remove Enter:start F1:help Esc:quit"
        }
        Mode::Dashboard => " s:stop/start e:export Enter:back to setup ?:help q:quit",
    };

    let paragraph = Paragraph::new(controls).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Setup",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  Tab/↑↓    Move between fields"),
        Line::from("  Ctrl+N    Add another URL row"),
        Line::from("  Ctrl+D    Remove the focused URL row"),
        Line::from("  Enter     Start monitoring"),
        Line::from("  Esc       Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Dashboard",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  s         Stop / restart the loop"),
        Line::from("  e         Export last snapshot to JSON"),
        Line::from("  Enter     Back to setup (stops the loop)"),
        Line::from("  q         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 46u16.min(area.width.saturating_sub(4));
    let help_height = 21u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(ratatui::widgets::Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
