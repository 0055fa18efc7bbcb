//! HTTP client for the monitoring backend.
//!
//! Wraps the two endpoints the dashboard depends on:
//!
//! - `POST {endpoint}/api/monitor` with the full target array. The response
//!   body is unused; only completion with a success status matters.
//! - `GET {endpoint}/api/data` returning the aggregated snapshot.

use reqwest::Client;
use thiserror::Error;

use crate::data::{snapshot, MonitorTarget, MonitoringSnapshot};

/// Errors from the backend calls made during a monitoring cycle.
///
/// These are never fatal: the monitor loop catches them at the cycle
/// boundary, logs one diagnostic event, and retries on the next cycle.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection to the backend failed.
    #[error("connection failed: {0}")]
    Connection(String),

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Backend answered with a non-success status.
    #[error("backend returned status {0}")]
    Http(reqwest::StatusCode),

    /// Response body could not be parsed.
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// Snapshot parsed but failed alignment validation.
    #[error("malformed snapshot: {0}")]
    Snapshot(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connection(err.to_string())
        } else if err.is_decode() {
            TransportError::Parse(err.to_string())
        } else {
            TransportError::Connection(err.to_string())
        }
    }
}

/// Client for the backend's check-trigger and data endpoints.
#[derive(Debug, Clone)]
pub struct MonitorClient {
    http: Client,
    endpoint: String,
}

impl MonitorClient {
    /// Create a client for the given base endpoint (e.g. `http://localhost:8000`).
    pub fn new(endpoint: &str) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    /// The base endpoint this client talks to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Ask the backend to run checks for all targets.
    ///
    /// The body repeats interval and requests per target, matching the wire
    /// contract even though every entry carries the same two values.
    pub async fn submit_checks(&self, targets: &[MonitorTarget]) -> Result<(), TransportError> {
        let url = format!("{}/api/monitor", self.endpoint);

        let response = self.http.post(&url).json(targets).send().await?;
        if !response.status().is_success() {
            return Err(TransportError::Http(response.status()));
        }

        Ok(())
    }

    /// Fetch the current aggregated snapshot.
    ///
    /// The snapshot is alignment-validated here so the renderer can assume a
    /// well-formed shape.
    pub async fn fetch_snapshot(&self) -> Result<MonitoringSnapshot, TransportError> {
        let url = format!("{}/api/data", self.endpoint);

        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(TransportError::Http(response.status()));
        }

        let parsed: MonitoringSnapshot = response
            .json()
            .await
            .map_err(|e| TransportError::Parse(e.to_string()))?;

        snapshot::validate(&parsed).map_err(TransportError::Snapshot)?;
        Ok(parsed)
    }
}
