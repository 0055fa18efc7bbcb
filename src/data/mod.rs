//! Data model for snapshots and chart state.
//!
//! ## Submodules
//!
//! - [`snapshot`]: Wire types shared with the backend ([`MonitoringSnapshot`],
//!   [`TargetSeries`], [`MonitorTarget`]) and snapshot validation
//! - [`charts`]: [`ChartState`] rebuilt from each validated snapshot
//!
//! ## Data Flow
//!
//! ```text
//! GET /api/data (raw JSON)
//!        │
//!        ▼
//! MonitoringSnapshot ──▶ snapshot::validate()
//!        │
//!        ▼
//! ChartState::render()  (labels + per-target series, fully replaced)
//! ```

pub mod charts;
pub mod snapshot;

pub use charts::{ChartPanel, ChartState, SeriesData};
pub use snapshot::{validate, MonitorTarget, MonitoringSnapshot, TargetSeries};
