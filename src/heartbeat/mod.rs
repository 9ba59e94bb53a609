//! Heartbeat worker - periodic liveness signal on a dedicated task.

mod worker;

pub use worker::{heartbeat_action, HeartbeatWorker};
