//! Heartbeat worker implementation.

use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::Result;

/// Owns a dedicated background task that runs a heartbeat action on a fixed
/// delay: run once immediately, then wait `interval` measured from the end
/// of each run before running again. Drift accumulates by design; this is a
/// run-then-wait loop, not a fixed-rate timer.
///
/// At most one task is armed per worker. Cancellation is cooperative: a pass
/// already executing when `cancel` is called may finish, but nothing further
/// is scheduled.
pub struct HeartbeatWorker {
    interval: Duration,
    /// Cancellation handle for the armed task; present exactly while armed.
    shutdown: Option<watch::Sender<bool>>,
}

impl HeartbeatWorker {
    /// Create a worker with the given rescheduling interval. Nothing runs
    /// until `arm` is called.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            shutdown: None,
        }
    }

    /// Spawn the execution context and start the heartbeat loop.
    ///
    /// The action runs once before `arm` schedules anything else, then again
    /// after every interval. A failing action is logged and the loop
    /// continues; a failure never kills the schedule.
    ///
    /// Arming an already-armed worker is a warn-level no-op, keeping the
    /// single-schedule invariant.
    pub fn arm<F>(&mut self, mut action: F)
    where
        F: FnMut() -> Result<()> + Send + 'static,
    {
        if self.shutdown.is_some() {
            warn!("Heartbeat worker already armed");
            return;
        }

        let (shutdown, mut cancelled) = watch::channel(false);
        let interval = self.interval;

        debug!("Heartbeat worker armed (interval={}s)", interval.as_secs());

        tokio::spawn(async move {
            loop {
                if *cancelled.borrow() {
                    break;
                }

                if let Err(e) = action() {
                    warn!("Heartbeat action failed: {}", e);
                }

                tokio::select! {
                    _ = tokio::time::sleep(interval) => {}
                    // Wakes on cancel or when the worker is dropped; either
                    // way, stop rescheduling.
                    _ = cancelled.changed() => break,
                }
            }
            debug!("Heartbeat worker stopped");
        });

        self.shutdown = Some(shutdown);
    }

    /// Remove the pending scheduled pass, if any.
    ///
    /// After `cancel` returns no new pass starts; a pass already running is
    /// allowed to finish. The execution context shuts down on its own once
    /// the loop exits; we do not wait for it. Cancelling an unarmed worker
    /// is a no-op.
    pub fn cancel(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(true);
            debug!("Heartbeat worker cancelled");
        }
    }

    /// Whether a heartbeat task is currently armed.
    pub fn is_armed(&self) -> bool {
        self.shutdown.is_some()
    }
}

impl Drop for HeartbeatWorker {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// The standard heartbeat action: emit a log record with the configured tag
/// and the current wall-clock timestamp.
pub fn heartbeat_action(tag: &str) -> impl FnMut() -> Result<()> + Send + 'static {
    let tag = tag.to_string();
    move || {
        info!("{}: working at {}", tag, chrono::Utc::now().timestamp_millis());
        Ok(())
    }
}
