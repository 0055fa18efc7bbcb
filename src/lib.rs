// Library crate: public API items may not be used by the binary
#![allow(unused)]

//! # sitewatch
//!
//! A terminal dashboard and library for website uptime and latency
//! monitoring.
//!
//! The user enters website URLs plus two settings (check interval, requests
//! per check) in a setup form; a background loop then submits the targets to
//! a monitoring backend over HTTP, fetches the aggregated measurement
//! snapshot, and feeds two live line charts (response time in milliseconds,
//! availability against a 0-100 axis).
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                         Application                            │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌──────────┐   │
//! │  │  input  │───▶│ monitor  │───▶│  data   │───▶│ ui       │   │
//! │  │ (form)  │    │ (loop)   │    │ (charts)│    │ (render) │   │
//! │  └─────────┘    └────┬─────┘    └─────────┘    └──────────┘   │
//! │                      │                                         │
//! │                      ▼                                         │
//! │                 ┌─────────┐     POST /api/monitor              │
//! │                 │ client  │◀──▶ GET  /api/data                 │
//! │                 └─────────┘                                    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`input`]**: The target form and its validation ([`collect`] turns it
//!   into a [`MonitorPlan`] or a [`ValidationError`])
//! - **[`client`]**: HTTP client for the backend's two endpoints
//! - **[`monitor`]**: The polling loop - submit, fetch, publish, sleep - with
//!   a cancellation flag checked at every suspension point, and the
//!   [`Supervisor`] enforcing at most one active loop
//! - **[`data`]**: Wire types ([`MonitoringSnapshot`]) and the chart state
//!   rebuilt wholesale from each snapshot
//! - **[`ui`]**: Terminal rendering using ratatui - setup form, the two
//!   charts, theme support
//!
//! ## Failure model
//!
//! Transport failures during a cycle are caught at the loop boundary, logged
//! once, and swallowed; the loop sleeps and retries indefinitely with no
//! backoff. Validation failures surface before the loop starts. Neither is
//! ever fatal.
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Interactive dashboard against a local backend
//! sitewatch --url https://example.com --interval 30 --requests 3
//!
//! # Three cycles without the TUI, last snapshot on stdout
//! sitewatch --url https://example.com --headless 3
//! ```
//!
//! ### Validating a form
//!
//! ```
//! use sitewatch::{collect, TargetForm};
//!
//! let mut form = TargetForm::new(30, 3);
//! form.urls[0] = "https://example.com".to_string();
//! let plan = collect(&form).expect("valid form");
//! assert_eq!(plan.targets.len(), 1);
//! ```
//!
//! ### Rendering a snapshot into chart state
//!
//! ```
//! use sitewatch::{ChartState, MonitoringSnapshot, TargetSeries};
//!
//! let mut snapshot = MonitoringSnapshot::new();
//! snapshot.insert(
//!     "https://example.com".to_string(),
//!     TargetSeries {
//!         timestamps: vec!["09:00:00".into()],
//!         response_times: vec![42.0],
//!         status_codes: vec![100.0],
//!     },
//! );
//!
//! let mut charts = ChartState::new();
//! charts.render(&snapshot);
//! assert_eq!(charts.response_time.series.len(), 1);
//! ```

pub mod app;
pub mod client;
pub mod data;
pub mod events;
pub mod input;
pub mod logging;
pub mod monitor;
pub mod settings;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, Mode};
pub use client::{MonitorClient, TransportError};
pub use data::{ChartPanel, ChartState, MonitorTarget, MonitoringSnapshot, SeriesData, TargetSeries};
pub use input::{collect, FormFocus, MonitorPlan, TargetForm, ValidationError};
pub use monitor::{run_loop, CycleStats, MonitorHandle, Supervisor};
pub use settings::Settings;
