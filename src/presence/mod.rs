//! Presence notification - the persistent, silent notification that marks
//! the daemon as a deliberate foreground-tier resident.

mod channel;
mod notification;

pub use channel::{ChannelRegistry, ChannelSpec, Importance};
pub use notification::{
    build_persistent_notification, ForegroundHost, LogForegroundHost, Notification,
};
