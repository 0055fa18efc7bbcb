//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for the failure counter when failures occurred.
    pub warning: Color,
    /// Color for a stopped loop indicator.
    pub critical: Color,
    /// Color for a running loop indicator.
    pub healthy: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for panel titles and field labels.
    pub header: Style,
    /// Style for the focused form field.
    pub focused: Style,
    /// Style for dimmed hint text.
    pub hint: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            warning: Color::Yellow,
            critical: Color::Red,
            healthy: Color::Green,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            focused: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            hint: Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            warning: Color::Yellow,
            critical: Color::Red,
            healthy: Color::Green,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            focused: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            hint: Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        // Use terminal-light crate to detect background luminance
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }
}
