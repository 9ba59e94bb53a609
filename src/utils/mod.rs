//! Shared utilities.

pub mod pidfile;

pub use pidfile::PidFileGuard;
