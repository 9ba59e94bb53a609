//! Boot trigger - explicit handler for the host's boot-completed signal.

use std::sync::Arc;

use tracing::{debug, info};

use crate::error::Result;
use crate::supervisor::Supervisor;

/// Action string carried by a boot-completed signal.
pub const ACTION_BOOT_COMPLETED: &str = "boot-completed";

/// A lifecycle signal delivered by the host environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootEvent {
    /// Host-defined action string.
    pub action: String,
}

impl BootEvent {
    /// The canonical boot-completed event.
    pub fn boot_completed() -> Self {
        Self {
            action: ACTION_BOOT_COMPLETED.to_string(),
        }
    }
}

/// Activates the supervisor when the host reports a completed boot.
///
/// The action string is inspected for the log only; activation proceeds
/// unconditionally. Delivering the signal to an already-Active supervisor is
/// harmless since activation is idempotent.
pub struct BootTrigger {
    supervisor: Arc<Supervisor>,
}

impl BootTrigger {
    /// Bind the trigger to a supervisor.
    pub fn new(supervisor: Arc<Supervisor>) -> Self {
        Self { supervisor }
    }

    /// Handle a boot signal from the host.
    pub async fn on_boot_completed(&self, event: BootEvent) -> Result<()> {
        info!("Boot signal received");
        if event.action != ACTION_BOOT_COMPLETED {
            debug!("Unexpected boot action {:?}; activating anyway", event.action);
        }
        self.supervisor.activate().await
    }
}
