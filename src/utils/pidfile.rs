//! PID file management for single-instance enforcement.
//!
//! A second daemon instance would mean a second execution context and a
//! doubled heartbeat, so startup takes an advisory PID file at
//! `~/.vigil/vigil.pid`. This detects the common accidental-double-start
//! case; it is not a hard lock (stale files after a crash are cleaned up on
//! the next start). Production deployments should still rely on system-level
//! supervision for the single-instance guarantee.

use std::fs;
use std::path::PathBuf;

use tracing::warn;

use crate::config::Config;
use crate::error::{Result, VigilError};

/// PID file guard that automatically cleans up on drop.
#[derive(Debug)]
pub struct PidFileGuard {
    path: PathBuf,
}

impl PidFileGuard {
    /// Take the PID file at the default location.
    ///
    /// Fails if another daemon instance is still running. A PID file left
    /// behind by a dead process is removed and replaced.
    pub fn acquire() -> Result<Self> {
        Self::acquire_at(Config::dir().join("vigil.pid"))
    }

    /// Take a PID file at an explicit path.
    pub fn acquire_at(path: PathBuf) -> Result<Self> {
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => {
                    if let Ok(pid) = content.trim().parse::<u32>() {
                        if is_process_running(pid) {
                            return Err(VigilError::Config(format!(
                                "vigil already running with PID {}. \
                                 If this is incorrect, remove {} and try again.",
                                pid,
                                path.display()
                            )));
                        }
                        warn!("Found stale PID file for dead process {}; cleaning up", pid);
                        let _ = fs::remove_file(&path);
                    }
                }
                Err(e) => {
                    warn!("Failed to read PID file: {}. Assuming stale and removing.", e);
                    let _ = fs::remove_file(&path);
                }
            }
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, std::process::id().to_string())?;

        Ok(Self { path })
    }

    /// Path of the held PID file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl Drop for PidFileGuard {
    fn drop(&mut self) {
        // Best effort cleanup.
        if let Err(e) = fs::remove_file(&self.path) {
            warn!("Failed to remove PID file {}: {}", self.path.display(), e);
        }
    }
}

/// Best-effort liveness check via /proc. On platforms without /proc we
/// cannot tell, and treat the file as stale rather than refusing to start.
fn is_process_running(pid: u32) -> bool {
    std::path::Path::new(&format!("/proc/{}", pid)).exists()
}
