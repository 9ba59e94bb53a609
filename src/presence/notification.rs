//! Persistent notification descriptor and the foreground-status seam.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::presence::Importance;

/// An immutable notification descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Channel this notification posts to.
    pub channel_id: String,
    /// Notification title.
    pub title: String,
    /// Notification body.
    pub body: String,
    /// Whether the notification is non-dismissable while the owner lives.
    pub ongoing: bool,
    /// Whether the notification suppresses sound.
    pub silent: bool,
    /// Importance tier.
    pub importance: Importance,
}

/// Build the ongoing, silent, low-importance notification used to declare
/// foreground status. Pure construction, no side effects.
pub fn build_persistent_notification(channel_id: &str, title: &str, body: &str) -> Notification {
    Notification {
        channel_id: channel_id.to_string(),
        title: title.to_string(),
        body: body.to_string(),
        ongoing: true,
        silent: true,
        importance: Importance::Low,
    }
}

/// Host-provided "declare foreground with this notification" operation.
///
/// The supervisor calls `enter_foreground` during activation and enforces
/// the activation deadline around the call; implementations should not add
/// their own timeout. `exit_foreground` is best-effort and infallible.
#[async_trait]
pub trait ForegroundHost: Send + Sync {
    /// Request foreground status, presenting `notification` to the user.
    async fn enter_foreground(&self, notification: &Notification) -> Result<()>;

    /// Release foreground status and withdraw the notification.
    async fn exit_foreground(&self);
}

/// Default host that records foreground transitions in the log.
///
/// Useful for headless deployments where process supervision (systemd,
/// containers) already provides the keepalive guarantee and the notification
/// is purely informational.
#[derive(Debug, Default)]
pub struct LogForegroundHost;

#[async_trait]
impl ForegroundHost for LogForegroundHost {
    async fn enter_foreground(&self, notification: &Notification) -> Result<()> {
        info!(
            "Entered foreground: [{}] {} - {}",
            notification.channel_id, notification.title, notification.body
        );
        Ok(())
    }

    async fn exit_foreground(&self) {
        info!("Released foreground status");
    }
}
