//! Settings surface - one-shot notification permission request.
//!
//! The daemon never depends on the outcome: with permission denied the
//! presence notification silently stays invisible while the supervisor and
//! heartbeat run unaffected.

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Outcome of a permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionDecision {
    Granted,
    Denied,
}

/// Host-provided permission dialog.
///
/// Hosts that do not gate notification posting behind a runtime permission
/// should answer `Granted` without prompting.
#[async_trait]
pub trait PermissionHost: Send + Sync {
    /// Ask the user for permission to post notifications.
    async fn request_notification_permission(&self) -> PermissionDecision;
}

/// One-shot permission prompt. The host is asked at most once; later calls
/// return the recorded decision.
pub struct PermissionPrompt<H: PermissionHost> {
    host: H,
    decision: Mutex<Option<PermissionDecision>>,
}

impl<H: PermissionHost> PermissionPrompt<H> {
    /// Create a prompt that has not yet asked.
    pub fn new(host: H) -> Self {
        Self {
            host,
            decision: Mutex::new(None),
        }
    }

    /// Request notification permission, prompting the host only on the
    /// first call.
    pub async fn request(&self) -> PermissionDecision {
        let mut decision = self.decision.lock().await;
        if let Some(existing) = *decision {
            return existing;
        }

        let answer = self.host.request_notification_permission().await;
        match answer {
            PermissionDecision::Granted => info!("Notification permission granted"),
            PermissionDecision::Denied => {
                warn!("Notification permission denied; presence notification will not display")
            }
        }
        *decision = Some(answer);
        answer
    }
}

/// Host for environments without a runtime notification permission.
#[derive(Debug, Default)]
pub struct AlwaysGrantedHost;

#[async_trait]
impl PermissionHost for AlwaysGrantedHost {
    async fn request_notification_permission(&self) -> PermissionDecision {
        PermissionDecision::Granted
    }
}
