//! Application state and lifecycle.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use tokio::runtime::Handle;
use tokio::sync::watch;

use crate::client::MonitorClient;
use crate::data::{ChartState, MonitoringSnapshot};
use crate::input::{self, TargetForm};
use crate::monitor::Supervisor;
use crate::settings::Settings;
use crate::ui::Theme;

/// The current screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Target form: URLs, interval, requests per check.
    Setup,
    /// The two live charts.
    Dashboard,
}

/// Main application state.
///
/// Owns the chart state (created at startup, mutated only from the draw
/// loop) and the supervisor for the background monitoring loop. Snapshots
/// cross from the loop task via a watch channel; [`App::poll_snapshots`] is
/// called once per draw iteration and is non-blocking.
pub struct App {
    pub running: bool,
    pub mode: Mode,
    pub show_help: bool,

    /// Setup form state.
    pub form: TargetForm,
    /// Data behind the two dashboard charts.
    pub charts: ChartState,
    /// Most recent snapshot, kept for export.
    pub latest: Option<MonitoringSnapshot>,

    // Loop lifecycle
    supervisor: Supervisor,
    snapshots_tx: watch::Sender<Option<MonitoringSnapshot>>,
    snapshots_rx: watch::Receiver<Option<MonitoringSnapshot>>,
    endpoint: String,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create the app with settings-derived form defaults.
    pub fn new(settings: &Settings, runtime: Handle) -> Self {
        let (snapshots_tx, snapshots_rx) = watch::channel(None);
        Self {
            running: true,
            mode: Mode::Setup,
            show_help: false,
            form: TargetForm::new(settings.interval, settings.requests),
            charts: ChartState::new(),
            latest: None,
            supervisor: Supervisor::new(runtime),
            snapshots_tx,
            snapshots_rx,
            endpoint: settings.endpoint.clone(),
            theme: Theme::auto_detect(),
            status_message: None,
        }
    }

    /// The backend endpoint in use, for the header bar.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < std::time::Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// Validate the form and start (or restart) the monitoring loop.
    ///
    /// On a validation error the loop does not start and the error is shown
    /// in the status bar; the app stays on the setup screen.
    pub fn start_monitoring(&mut self) {
        match input::collect(&self.form) {
            Ok(plan) => {
                let client = MonitorClient::new(&self.endpoint);
                self.supervisor.start(client, plan, self.snapshots_tx.clone());
                self.mode = Mode::Dashboard;
                self.set_status_message("monitoring started".to_string());
            }
            Err(err) => {
                self.set_status_message(err.to_string());
            }
        }
    }

    /// Cancel the active loop, if any.
    pub fn stop_monitoring(&mut self) {
        self.supervisor.stop();
        self.set_status_message("monitoring stopped".to_string());
    }

    /// True while the loop task is active.
    pub fn is_monitoring(&self) -> bool {
        self.supervisor.is_running()
    }

    /// Cycle and failure counters of the active loop.
    pub fn cycle_counts(&self) -> Option<(u64, u64)> {
        self.supervisor.stats().map(|s| (s.cycles(), s.failures()))
    }

    /// Stop the loop and return to the setup form.
    pub fn back_to_setup(&mut self) {
        self.stop_monitoring();
        self.mode = Mode::Setup;
    }

    /// Apply any newly published snapshot to the charts.
    ///
    /// Non-blocking; returns true when the charts were updated.
    pub fn poll_snapshots(&mut self) -> bool {
        if self.snapshots_rx.has_changed().unwrap_or(false) {
            let snapshot = self.snapshots_rx.borrow_and_update().clone();
            if let Some(snapshot) = snapshot {
                self.charts.render(&snapshot);
                self.latest = Some(snapshot);
                return true;
            }
        }
        false
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.supervisor.stop();
        self.running = false;
    }

    /// Write the most recent snapshot to a JSON file.
    pub fn export_snapshot(&self, path: &Path) -> Result<()> {
        let Some(ref snapshot) = self.latest else {
            anyhow::bail!("no snapshot to export");
        };

        let json = serde_json::to_string_pretty(snapshot)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::TargetSeries;

    fn test_settings() -> Settings {
        Settings {
            endpoint: "http://localhost:8000".to_string(),
            interval: 30,
            requests: 3,
            log_file: "sitewatch.log".into(),
        }
    }

    fn test_app() -> App {
        App::new(&test_settings(), Handle::current())
    }

    #[tokio::test]
    async fn test_validation_error_keeps_setup_mode() {
        let mut app = test_app();
        // Form starts with one blank URL row
        app.start_monitoring();

        assert_eq!(app.mode, Mode::Setup);
        assert!(!app.is_monitoring());
        assert!(app.get_status_message().unwrap().contains("URL"));
    }

    #[tokio::test]
    async fn test_start_switches_to_dashboard() {
        let mut app = test_app();
        app.form.urls[0] = "https://example.com".to_string();
        app.start_monitoring();

        assert_eq!(app.mode, Mode::Dashboard);
        assert!(app.is_monitoring());
        app.quit();
    }

    #[tokio::test]
    async fn test_poll_snapshots_updates_charts() {
        let mut app = test_app();

        let mut snapshot = MonitoringSnapshot::new();
        snapshot.insert(
            "https://a.com".to_string(),
            TargetSeries {
                timestamps: vec!["t1".into()],
                response_times: vec![10.0],
                status_codes: vec![200.0],
            },
        );
        app.snapshots_tx.send(Some(snapshot)).unwrap();

        assert!(app.poll_snapshots());
        assert_eq!(app.charts.response_time.series.len(), 1);
        assert!(app.latest.is_some());

        // Nothing new on the channel
        assert!(!app.poll_snapshots());
    }

    #[tokio::test]
    async fn test_export_without_snapshot_fails() {
        let app = test_app();
        let dir = tempfile::tempdir().unwrap();
        assert!(app.export_snapshot(&dir.path().join("out.json")).is_err());
    }

    #[tokio::test]
    async fn test_export_writes_latest_snapshot() {
        let mut app = test_app();
        let mut snapshot = MonitoringSnapshot::new();
        snapshot.insert(
            "https://a.com".to_string(),
            TargetSeries {
                timestamps: vec!["t1".into()],
                response_times: vec![10.0],
                status_codes: vec![200.0],
            },
        );
        app.latest = Some(snapshot);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        app.export_snapshot(&path).unwrap();

        let written: MonitoringSnapshot =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(written.contains_key("https://a.com"));
    }
}
