//! Error types for Vigil
//!
//! This module defines all error types used throughout the daemon.
//! Uses `thiserror` for ergonomic error handling with automatic `Display` and
//! `Error` trait implementations.

use thiserror::Error;

/// The primary error type for Vigil operations.
#[derive(Error, Debug)]
pub enum VigilError {
    /// Configuration-related errors (invalid config, unwritable config dir, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Foreground declaration failures (host rejected the notification,
    /// or the activation deadline was missed)
    #[error("Foreground error: {0}")]
    Foreground(String),

    /// Supervisor lifecycle errors (invalid state transitions)
    #[error("Supervisor error: {0}")]
    Supervisor(String),

    /// Standard I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized `Result` type for Vigil operations.
pub type Result<T> = std::result::Result<T, VigilError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VigilError::Config("missing config dir".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing config dir");
    }

    #[test]
    fn test_foreground_display() {
        let err = VigilError::Foreground("deadline of 5000ms exceeded".to_string());
        assert_eq!(
            err.to_string(),
            "Foreground error: deadline of 5000ms exceeded"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let vigil_err: VigilError = io_err.into();
        assert!(matches!(vigil_err, VigilError::Io(_)));
    }

    #[test]
    fn test_result_type() {
        fn returns_result() -> Result<i32> {
            Ok(42)
        }
        assert_eq!(returns_result().unwrap(), 42);
    }
}
