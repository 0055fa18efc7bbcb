//! The monitoring loop and its lifecycle.
//!
//! One cycle: submit all targets to the backend, fetch the aggregated
//! snapshot, publish it on a watch channel for the UI, then sleep the
//! configured interval. Transport failures are caught at the cycle boundary,
//! logged once, and swallowed; the loop sleeps and retries with no backoff
//! and no failure limit.
//!
//! The loop checks a cancellation flag at every suspension point (the network
//! calls and the sleep), so stopping is deterministic. [`Supervisor`]
//! enforces the single-loop invariant: starting while a loop is active
//! cancels the previous loop first.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::client::MonitorClient;
use crate::data::{MonitorTarget, MonitoringSnapshot};
use crate::input::MonitorPlan;

/// Counters updated by the loop and read by the dashboard header.
#[derive(Debug, Default)]
pub struct CycleStats {
    cycles: AtomicU64,
    failures: AtomicU64,
}

impl CycleStats {
    /// Completed cycles, successful or not.
    pub fn cycles(&self) -> u64 {
        self.cycles.load(Ordering::Relaxed)
    }

    /// Cycles that ended in a transport failure.
    pub fn failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }

    fn record_cycle(&self) {
        self.cycles.fetch_add(1, Ordering::Relaxed);
    }

    fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }
}

/// Run monitoring cycles until cancelled.
///
/// Snapshots are published on `snapshots`; the latest value wins. A cycle
/// that fails anywhere (submit, fetch, or snapshot validation) records one
/// failure and logs one warning, then the loop proceeds to the sleep as
/// usual. When `max_cycles` is set the loop stops after that many cycles,
/// which the headless mode and tests use for deterministic termination.
pub async fn run_loop(
    client: MonitorClient,
    targets: Vec<MonitorTarget>,
    delay: Duration,
    snapshots: watch::Sender<Option<MonitoringSnapshot>>,
    mut cancel: watch::Receiver<bool>,
    stats: Arc<CycleStats>,
    max_cycles: Option<u64>,
) {
    loop {
        if *cancel.borrow() {
            break;
        }

        let cycle = async {
            // Trigger the checks; the response body is unused.
            client.submit_checks(&targets).await?;
            client.fetch_snapshot().await
        };

        tokio::select! {
            result = cycle => match result {
                Ok(snapshot) => {
                    debug!(targets = snapshot.len(), "received snapshot");
                    let _ = snapshots.send(Some(snapshot));
                }
                Err(err) => {
                    stats.record_failure();
                    warn!(error = %err, "monitoring cycle failed");
                }
            },
            changed = cancel.changed() => {
                // A dropped sender counts as cancellation
                if changed.is_err() || *cancel.borrow() {
                    break;
                }
            }
        }

        stats.record_cycle();
        if let Some(max) = max_cycles {
            if stats.cycles() >= max {
                break;
            }
        }

        tokio::select! {
            _ = tokio::time::sleep(delay) => {}
            changed = cancel.changed() => {
                if changed.is_err() || *cancel.borrow() {
                    break;
                }
            }
        }
    }

    info!("monitoring loop stopped");
}

/// Handle to a running loop.
#[derive(Debug)]
pub struct MonitorHandle {
    cancel: watch::Sender<bool>,
    task: JoinHandle<()>,
    stats: Arc<CycleStats>,
}

impl MonitorHandle {
    /// Signal the loop to stop at its next suspension point.
    pub fn stop(&self) {
        let _ = self.cancel.send(true);
    }

    /// True once the loop task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Counters for this loop instance.
    pub fn stats(&self) -> &Arc<CycleStats> {
        &self.stats
    }
}

/// Owns the at-most-one active monitoring loop.
///
/// The TUI runs on the main thread; the supervisor spawns loops onto the
/// tokio runtime running in the background.
#[derive(Debug)]
pub struct Supervisor {
    runtime: Handle,
    active: Option<MonitorHandle>,
}

impl Supervisor {
    /// Create a supervisor that spawns onto the given runtime.
    pub fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            active: None,
        }
    }

    /// Start a loop for `plan`, cancelling any previously active loop first.
    pub fn start(
        &mut self,
        client: MonitorClient,
        plan: MonitorPlan,
        snapshots: watch::Sender<Option<MonitoringSnapshot>>,
    ) {
        // Replace on restart: never two loops at once.
        self.stop();

        let (cancel_tx, cancel_rx) = watch::channel(false);
        let stats = Arc::new(CycleStats::default());
        let delay = Duration::from_secs(plan.interval);

        info!(
            targets = plan.targets.len(),
            interval_secs = plan.interval,
            "starting monitoring loop"
        );

        let task = self.runtime.spawn(run_loop(
            client,
            plan.targets,
            delay,
            snapshots,
            cancel_rx,
            stats.clone(),
            None,
        ));

        self.active = Some(MonitorHandle {
            cancel: cancel_tx,
            task,
            stats,
        });
    }

    /// Cancel the active loop, if any.
    pub fn stop(&mut self) {
        if let Some(handle) = self.active.take() {
            handle.stop();
        }
    }

    /// True while a loop is active and has not exited.
    pub fn is_running(&self) -> bool {
        self.active.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Counters of the active loop, if any.
    pub fn stats(&self) -> Option<Arc<CycleStats>> {
        self.active.as_ref().map(|h| h.stats.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn targets() -> Vec<MonitorTarget> {
        vec![MonitorTarget {
            url: "https://a.com".into(),
            interval: 5,
            requests: 1,
        }]
    }

    async fn healthy_server() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/monitor"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/data"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "https://a.com": {
                    "timestamps": ["t1"],
                    "response_times": [12.5],
                    "status_codes": [200]
                }
            })))
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn test_successful_cycle_publishes_snapshot() {
        let server = healthy_server().await;
        let client = MonitorClient::new(&server.uri());
        let (tx, rx) = watch::channel(None);
        let (_cancel_tx, cancel_rx) = watch::channel(false);
        let stats = Arc::new(CycleStats::default());

        run_loop(
            client,
            targets(),
            Duration::from_millis(5),
            tx,
            cancel_rx,
            stats.clone(),
            Some(1),
        )
        .await;

        assert_eq!(stats.cycles(), 1);
        assert_eq!(stats.failures(), 0);
        let snapshot = rx.borrow().clone().expect("snapshot published");
        assert!(snapshot.contains_key("https://a.com"));
    }

    #[tokio::test]
    async fn test_loop_survives_failing_backend() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/monitor"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = MonitorClient::new(&server.uri());
        let (tx, rx) = watch::channel(None);
        let (_cancel_tx, cancel_rx) = watch::channel(false);
        let stats = Arc::new(CycleStats::default());

        // The loop must not terminate on failure; it runs to the cycle cap.
        run_loop(
            client,
            targets(),
            Duration::from_millis(5),
            tx,
            cancel_rx,
            stats.clone(),
            Some(3),
        )
        .await;

        assert_eq!(stats.cycles(), 3);
        assert_eq!(stats.failures(), 3);
        assert!(rx.borrow().is_none());
    }

    #[tokio::test]
    async fn test_one_failure_recorded_per_bad_cycle() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/monitor"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        // Data endpoint missing -> 404 on fetch
        let client = MonitorClient::new(&server.uri());
        let (tx, _rx) = watch::channel(None);
        let (_cancel_tx, cancel_rx) = watch::channel(false);
        let stats = Arc::new(CycleStats::default());

        run_loop(
            client,
            targets(),
            Duration::from_millis(5),
            tx,
            cancel_rx,
            stats.clone(),
            Some(1),
        )
        .await;

        assert_eq!(stats.failures(), 1);
    }

    #[tokio::test]
    async fn test_cancellation_stops_loop_during_sleep() {
        let server = healthy_server().await;
        let client = MonitorClient::new(&server.uri());
        let (tx, _rx) = watch::channel(None);
        let (cancel_tx, cancel_rx) = watch::channel(false);
        let stats = Arc::new(CycleStats::default());

        let task = tokio::spawn(run_loop(
            client,
            targets(),
            Duration::from_secs(60),
            tx,
            cancel_rx,
            stats.clone(),
            None,
        ));

        // Let the first cycle complete, then cancel mid-sleep.
        tokio::time::sleep(Duration::from_millis(100)).await;
        cancel_tx.send(true).unwrap();

        tokio::time::timeout(Duration::from_secs(5), task)
            .await
            .expect("loop stopped after cancellation")
            .unwrap();
        assert_eq!(stats.cycles(), 1);
    }

    #[tokio::test]
    async fn test_supervisor_replaces_active_loop() {
        let server = healthy_server().await;
        let client = MonitorClient::new(&server.uri());
        let (tx, _rx) = watch::channel(None);

        let mut supervisor = Supervisor::new(Handle::current());
        let plan = MonitorPlan {
            targets: targets(),
            interval: 5,
        };

        supervisor.start(client.clone(), plan.clone(), tx.clone());
        let first_stats = supervisor.stats().unwrap();
        assert!(supervisor.is_running());

        supervisor.start(client, plan, tx);
        let second_stats = supervisor.stats().unwrap();
        assert!(!Arc::ptr_eq(&first_stats, &second_stats));

        supervisor.stop();
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(!supervisor.is_running());
    }
}
