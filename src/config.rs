//! Daemon configuration.
//!
//! Loaded from `~/.vigil/config.json` when present, otherwise built from
//! defaults. Every field has a default so a partial (or absent) config file
//! is never an error.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VigilError};

/// Floor for the heartbeat interval. Sub-second heartbeats are a config
/// mistake, not a use case.
const MIN_HEARTBEAT_INTERVAL_SECS: u64 = 1;

/// Top-level daemon configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Heartbeat worker settings.
    pub heartbeat: HeartbeatConfig,
    /// Presence notification settings.
    pub presence: PresenceConfig,
    /// Deadline for the host to grant foreground status during activation,
    /// in milliseconds. Missing it fails the activation attempt.
    pub foreground_deadline_ms: u64,
}

/// Settings for the periodic heartbeat.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeartbeatConfig {
    /// Delay between the end of one heartbeat and the start of the next,
    /// in seconds.
    pub interval_secs: u64,
    /// Tag emitted with every heartbeat record.
    pub tag: String,
}

/// Settings for the persistent presence notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PresenceConfig {
    /// Notification channel id.
    pub channel_id: String,
    /// Human-readable channel name.
    pub channel_name: String,
    /// Notification title.
    pub title: String,
    /// Notification body.
    pub body: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            heartbeat: HeartbeatConfig::default(),
            presence: PresenceConfig::default(),
            foreground_deadline_ms: 5_000,
        }
    }
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self {
            interval_secs: 15,
            tag: "vigil.heartbeat".to_string(),
        }
    }
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            channel_id: "vigil.presence".to_string(),
            channel_name: "Background keepalive".to_string(),
            title: "Service running".to_string(),
            body: "Background task active".to_string(),
        }
    }
}

impl Config {
    /// Directory holding all Vigil state (`~/.vigil`).
    pub fn dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".vigil")
    }

    /// Default config file path.
    pub fn path() -> PathBuf {
        Self::dir().join("config.json")
    }

    /// Load config from the default location, falling back to defaults if
    /// the file does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path())
    }

    /// Load config from an explicit path.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(VigilError::Config(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    /// Write config to the default location, creating the directory if needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path())
    }

    /// Write config to an explicit path.
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Heartbeat interval as a `Duration`, clamped to the supported minimum.
    pub fn heartbeat_interval(&self) -> Duration {
        Duration::from_secs(self.heartbeat.interval_secs.max(MIN_HEARTBEAT_INTERVAL_SECS))
    }

    /// Foreground activation deadline as a `Duration`.
    pub fn foreground_deadline(&self) -> Duration {
        Duration::from_millis(self.foreground_deadline_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.heartbeat.interval_secs, 15);
        assert_eq!(config.heartbeat.tag, "vigil.heartbeat");
        assert_eq!(config.presence.channel_id, "vigil.presence");
        assert_eq!(config.foreground_deadline_ms, 5_000);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let json = r#"{"heartbeat": {"interval_secs": 60}}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.heartbeat.interval_secs, 60);
        // Untouched fields fall back to defaults.
        assert_eq!(config.heartbeat.tag, "vigil.heartbeat");
        assert_eq!(config.presence.title, "Service running");
    }

    #[test]
    fn test_interval_clamped_to_minimum() {
        let config = Config {
            heartbeat: HeartbeatConfig {
                interval_secs: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(config.heartbeat_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.json")).unwrap();
        assert_eq!(config.heartbeat.interval_secs, 15);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::default();
        config.heartbeat.interval_secs = 30;
        config.presence.title = "custom".to_string();
        config.save_to(&path).unwrap();

        let restored = Config::load_from(&path).unwrap();
        assert_eq!(restored.heartbeat.interval_secs, 30);
        assert_eq!(restored.presence.title, "custom");
    }

    #[test]
    fn test_load_rejects_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
