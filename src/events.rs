use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Mode};

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    match app.mode {
        Mode::Setup => handle_setup_key(app, key),
        Mode::Dashboard => handle_dashboard_key(app, key),
    }
}

/// Keys on the setup form.
///
/// Plain characters go into the focused field, so global shortcuts here are
/// control chords or non-character keys.
fn handle_setup_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        // Start monitoring; a validation error lands in the status bar
        KeyCode::Enter => app.start_monitoring(),

        // Field focus
        KeyCode::Tab | KeyCode::Down => app.form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.form.focus_prev(),

        // The "add another URL" affordance
        KeyCode::Char('n') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.form.add_url_row();
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.form.remove_url_row();
        }

        KeyCode::F(1) => app.toggle_help(),

        // Text editing in the focused field
        KeyCode::Backspace => app.form.pop_char(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.form.push_char(c);
        }

        _ => {}
    }
}

/// Keys on the dashboard.
fn handle_dashboard_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.quit(),

        // Stop or restart the loop with the current form
        KeyCode::Char('s') => {
            if app.is_monitoring() {
                app.stop_monitoring();
            } else {
                app.start_monitoring();
            }
        }

        // Back to the form (stops the loop)
        KeyCode::Enter | KeyCode::Esc | KeyCode::Backspace => app.back_to_setup(),

        // Export the last snapshot
        KeyCode::Char('e') => {
            let export_path = PathBuf::from("sitewatch_export.json");
            match app.export_snapshot(&export_path) {
                Ok(()) => {
                    app.set_status_message(format!("exported to {}", export_path.display()));
                }
                Err(e) => {
                    app.set_status_message(format!("export failed: {}", e));
                }
            }
        }

        KeyCode::Char('?') | KeyCode::F(1) => app.toggle_help(),

        _ => {}
    }
}
