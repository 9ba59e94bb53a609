//! Service supervisor - the long-lived component that owns foreground
//! status and the heartbeat worker.
//!
//! The supervisor is a two-state machine: Inactive -> Active -> Inactive.
//! Activation acquires foreground status through the [`ForegroundHost`] and
//! arms the heartbeat; deactivation unwinds both. Restart-after-kill is the
//! host's job, declared through [`RestartDirective::Sticky`]; the supervisor
//! carries no retry or backoff of its own.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::{Result, VigilError};
use crate::heartbeat::{heartbeat_action, HeartbeatWorker};
use crate::presence::{build_persistent_notification, ChannelRegistry, ChannelSpec, ForegroundHost};

/// Directive returned to the host when it asks how to handle an unexpected
/// process kill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestartDirective {
    /// Recreate the supervisor with fresh activation semantics; do not
    /// redeliver the original start parameters.
    Sticky,
    /// Recreate the supervisor and redeliver the last start parameters.
    StickyRedeliver,
    /// Stay dead until explicitly restarted.
    NotSticky,
}

/// Supervisor lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorState {
    Inactive,
    Active,
}

/// Long-lived supervisor owning the presence notification and the heartbeat
/// execution context.
pub struct Supervisor {
    config: Config,
    host: Arc<dyn ForegroundHost>,
    inner: Mutex<Inner>,
}

struct Inner {
    registry: ChannelRegistry,
    /// Present exactly while Active. Owns the execution context.
    worker: Option<HeartbeatWorker>,
    foreground: bool,
}

impl Supervisor {
    /// Create an Inactive supervisor bound to a foreground host.
    pub fn new(config: Config, host: Arc<dyn ForegroundHost>) -> Self {
        Self {
            config,
            host,
            inner: Mutex::new(Inner {
                registry: ChannelRegistry::new(),
                worker: None,
                foreground: false,
            }),
        }
    }

    /// Enter the Active state.
    ///
    /// Side effects, in order: ensure the notification channel exists,
    /// declare foreground status with a persistent notification, create the
    /// execution context and arm the heartbeat. The foreground declaration
    /// must complete within the configured deadline; missing it fails the
    /// attempt and leaves the supervisor Inactive.
    ///
    /// Activating an already-Active supervisor is a warn-level no-op: the
    /// live execution context is kept and no duplicate is created.
    pub async fn activate(&self) -> Result<()> {
        let mut inner = self.inner.lock().await;
        if inner.worker.is_some() {
            warn!("Supervisor already active; ignoring activation");
            return Ok(());
        }

        let presence = &self.config.presence;
        inner.registry.ensure_channel(ChannelSpec::low_silent(
            &presence.channel_id,
            &presence.channel_name,
        ));

        let notification =
            build_persistent_notification(&presence.channel_id, &presence.title, &presence.body);

        let deadline = self.config.foreground_deadline();
        match tokio::time::timeout(deadline, self.host.enter_foreground(&notification)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                error!("Host rejected foreground declaration: {}", e);
                return Err(e);
            }
            Err(_) => {
                let msg = format!("deadline of {}ms exceeded", deadline.as_millis());
                error!("Foreground declaration timed out: {}", msg);
                return Err(VigilError::Foreground(msg));
            }
        }
        inner.foreground = true;

        let mut worker = HeartbeatWorker::new(self.config.heartbeat_interval());
        worker.arm(heartbeat_action(&self.config.heartbeat.tag));
        inner.worker = Some(worker);

        info!(
            "Supervisor active (heartbeat every {}s)",
            self.config.heartbeat_interval().as_secs()
        );
        Ok(())
    }

    /// Leave the Active state: cancel the heartbeat, let the execution
    /// context quit on its own (an in-flight pass may finish; nothing
    /// further is scheduled), then release foreground status.
    ///
    /// Safe on an Inactive supervisor and after a partially failed
    /// activation; unwinding what was never set up is a no-op.
    pub async fn deactivate(&self) {
        let mut inner = self.inner.lock().await;
        let was_active = inner.worker.is_some() || inner.foreground;

        if let Some(mut worker) = inner.worker.take() {
            worker.cancel();
        }

        if inner.foreground {
            self.host.exit_foreground().await;
            inner.foreground = false;
        }

        if was_active {
            info!("Supervisor inactive");
        }
    }

    /// Restart policy declared to the host: sticky, without redelivery of
    /// the original start parameters.
    pub fn restart_directive(&self) -> RestartDirective {
        RestartDirective::Sticky
    }

    /// Current lifecycle state.
    pub async fn state(&self) -> SupervisorState {
        if self.inner.lock().await.worker.is_some() {
            SupervisorState::Active
        } else {
            SupervisorState::Inactive
        }
    }

    /// Whether the supervisor is Active.
    pub async fn is_active(&self) -> bool {
        self.state().await == SupervisorState::Active
    }

    /// Number of notification channels materialized so far. Channels outlive
    /// deactivation; only the host can remove them.
    pub async fn channel_count(&self) -> usize {
        self.inner.lock().await.registry.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presence::Notification;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Host that counts foreground transitions.
    #[derive(Default)]
    struct RecordingHost {
        entered: AtomicUsize,
        exited: AtomicUsize,
    }

    #[async_trait]
    impl ForegroundHost for RecordingHost {
        async fn enter_foreground(&self, _notification: &Notification) -> Result<()> {
            self.entered.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn exit_foreground(&self) {
            self.exited.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// Host that rejects every foreground declaration.
    struct RejectingHost;

    #[async_trait]
    impl ForegroundHost for RejectingHost {
        async fn enter_foreground(&self, _notification: &Notification) -> Result<()> {
            Err(VigilError::Foreground("permission denied".to_string()))
        }

        async fn exit_foreground(&self) {}
    }

    /// Host that never answers within the deadline.
    struct StalledHost;

    #[async_trait]
    impl ForegroundHost for StalledHost {
        async fn enter_foreground(&self, _notification: &Notification) -> Result<()> {
            tokio::time::sleep(Duration::from_secs(600)).await;
            Ok(())
        }

        async fn exit_foreground(&self) {}
    }

    fn supervisor_with(host: Arc<dyn ForegroundHost>) -> Supervisor {
        Supervisor::new(Config::default(), host)
    }

    #[tokio::test]
    async fn test_activate_then_deactivate_single_cycle() {
        let host = Arc::new(RecordingHost::default());
        let supervisor = supervisor_with(host.clone());

        supervisor.activate().await.unwrap();
        assert_eq!(supervisor.state().await, SupervisorState::Active);
        assert_eq!(host.entered.load(Ordering::SeqCst), 1);

        supervisor.deactivate().await;
        assert_eq!(supervisor.state().await, SupervisorState::Inactive);
        assert_eq!(host.exited.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_double_activate_is_noop() {
        let host = Arc::new(RecordingHost::default());
        let supervisor = supervisor_with(host.clone());

        supervisor.activate().await.unwrap();
        supervisor.activate().await.unwrap();

        // One live execution context, one foreground declaration.
        assert_eq!(host.entered.load(Ordering::SeqCst), 1);
        assert!(supervisor.is_active().await);

        supervisor.deactivate().await;
        assert_eq!(host.exited.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_deactivate_inactive_is_noop() {
        let host = Arc::new(RecordingHost::default());
        let supervisor = supervisor_with(host.clone());

        supervisor.deactivate().await;
        assert_eq!(supervisor.state().await, SupervisorState::Inactive);
        assert_eq!(host.exited.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_deactivate_is_idempotent() {
        let host = Arc::new(RecordingHost::default());
        let supervisor = supervisor_with(host.clone());

        supervisor.activate().await.unwrap();
        supervisor.deactivate().await;
        supervisor.deactivate().await;
        assert_eq!(host.exited.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_rejected_foreground_leaves_inactive() {
        let supervisor = supervisor_with(Arc::new(RejectingHost));

        let err = supervisor.activate().await.unwrap_err();
        assert!(matches!(err, VigilError::Foreground(_)));
        assert_eq!(supervisor.state().await, SupervisorState::Inactive);

        // Unwinding the failed attempt must be safe.
        supervisor.deactivate().await;
        assert_eq!(supervisor.state().await, SupervisorState::Inactive);
    }

    #[tokio::test(start_paused = true)]
    async fn test_foreground_deadline_enforced() {
        let supervisor = supervisor_with(Arc::new(StalledHost));

        let err = supervisor.activate().await.unwrap_err();
        match err {
            VigilError::Foreground(msg) => assert!(msg.contains("deadline")),
            other => panic!("expected foreground error, got {:?}", other),
        }
        assert_eq!(supervisor.state().await, SupervisorState::Inactive);
    }

    #[tokio::test]
    async fn test_restart_directive_is_sticky() {
        let supervisor = supervisor_with(Arc::new(RecordingHost::default()));
        assert_eq!(supervisor.restart_directive(), RestartDirective::Sticky);
    }

    #[tokio::test]
    async fn test_channel_survives_reactivation() {
        let host = Arc::new(RecordingHost::default());
        let supervisor = supervisor_with(host.clone());

        supervisor.activate().await.unwrap();
        supervisor.deactivate().await;
        supervisor.activate().await.unwrap();
        supervisor.deactivate().await;

        // Same channel id is re-ensured, never duplicated.
        assert_eq!(supervisor.channel_count().await, 1);
    }
}
