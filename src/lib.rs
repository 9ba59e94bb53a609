//! Vigil - minimal background keepalive daemon

pub mod boot;
pub mod config;
pub mod error;
pub mod heartbeat;
pub mod presence;
pub mod settings;
pub mod supervisor;
pub mod utils;

pub use config::Config;
pub use error::{Result, VigilError};
