//! Wire types shared with the monitoring backend.
//!
//! These types match the JSON exchanged over the backend's two endpoints:
//! `POST /api/monitor` (an array of [`MonitorTarget`]) and `GET /api/data`
//! (a [`MonitoringSnapshot`]).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One monitored URL plus its check cadence and per-cycle request count.
///
/// This is the element type of the `POST /api/monitor` request body. The
/// interval and request count are repeated per target on the wire even though
/// the client submits the same two values for every target in one call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorTarget {
    /// Website URL to check.
    pub url: String,
    /// Check interval in seconds.
    pub interval: u64,
    /// Number of requests issued per check.
    pub requests: u32,
}

/// The aggregated measurement set for all targets at one point in time.
///
/// Maps target URL to its measurement series. Supplied wholesale by the
/// backend on each poll; the client holds no history of its own, so each
/// snapshot fully replaces the previous one in the charts.
pub type MonitoringSnapshot = BTreeMap<String, TargetSeries>;

/// Measurement series for a single target.
///
/// The three arrays are positionally aligned: index `i` of each describes the
/// same check cycle. See [`TargetSeries::is_aligned`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetSeries {
    /// Time labels, one per check (e.g. "14:02:31").
    pub timestamps: Vec<String>,
    /// Average response time per check, in milliseconds.
    pub response_times: Vec<f64>,
    /// Availability signal per check. The backend reports a percentage of
    /// successful requests, but the value is plotted raw either way.
    pub status_codes: Vec<f64>,
}

impl TargetSeries {
    /// True when all three arrays have the same length.
    pub fn is_aligned(&self) -> bool {
        self.timestamps.len() == self.response_times.len()
            && self.timestamps.len() == self.status_codes.len()
    }

    /// Number of check cycles recorded in this series.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// True when the series contains no data points.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

/// Validate that every series in a snapshot is internally aligned.
///
/// The renderer assumes alignment, so callers must validate a snapshot before
/// handing it over. Returns the offending URL on failure.
pub fn validate(snapshot: &MonitoringSnapshot) -> Result<(), String> {
    for (url, series) in snapshot {
        if !series.is_aligned() {
            return Err(format!(
                "misaligned series for {}: {} timestamps, {} response times, {} status codes",
                url,
                series.timestamps.len(),
                series.response_times.len(),
                series.status_codes.len()
            ));
        }
    }
    Ok(())
}
