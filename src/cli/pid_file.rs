//! PID file guarding against two listeners

use std::fs;
use std::path::PathBuf;
use std::process;

use nix::sys::signal::kill;
use nix::unistd::Pid;
use tracing::debug;

const PID_FILE_NAME: &str = "euro-listener.pid";

/// PID file for the listener
pub struct PidFile {
    path: PathBuf,
    owned: bool,
}

impl PidFile {
    /// PID file in the runtime dir, or the temp dir without one
    pub fn new() -> Self {
        let dir = std::env::var_os("XDG_RUNTIME_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(std::env::temp_dir);
        Self::with_path(dir.join(PID_FILE_NAME))
    }

    /// Create with custom path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            owned: false,
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// PID of a live listener recorded in the file, if any.
    ///
    /// A stale file is removed.
    pub fn is_running(&self) -> Option<u32> {
        let contents = fs::read_to_string(&self.path).ok()?;
        let pid: u32 = contents.trim().parse().ok()?;

        // Null signal only checks that the process exists
        match kill(Pid::from_raw(pid as i32), None) {
            Ok(()) => Some(pid),
            Err(nix::errno::Errno::ESRCH) => {
                debug!(pid, path = %self.path.display(), "removing stale PID file");
                let _ = fs::remove_file(&self.path);
                None
            }
            // EPERM: alive but owned by someone else
            Err(nix::errno::Errno::EPERM) => Some(pid),
            Err(_) => None,
        }
    }

    /// Write our PID, failing if another listener is alive
    pub fn acquire(&mut self) -> Result<(), PidFileError> {
        if let Some(pid) = self.is_running() {
            return Err(PidFileError::AlreadyRunning(pid));
        }

        fs::write(&self.path, process::id().to_string())
            .map_err(|e| PidFileError::WriteFailed(e.to_string()))?;
        self.owned = true;
        Ok(())
    }

    /// Remove the file if we wrote it
    pub fn release(&mut self) -> Result<(), PidFileError> {
        if self.owned && self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| PidFileError::RemoveFailed(e.to_string()))?;
        }
        self.owned = false;
        Ok(())
    }
}

impl Default for PidFile {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for PidFile {
    fn drop(&mut self) {
        let _ = self.release();
    }
}

/// PID file errors
#[derive(Debug, thiserror::Error)]
pub enum PidFileError {
    #[error("Another listener is already running (PID: {0})")]
    AlreadyRunning(u32),

    #[error("Failed to write PID file: {0}")]
    WriteFailed(String),

    #[error("Failed to remove PID file: {0}")]
    RemoveFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_path() {
        let pid_file = PidFile::with_path("/custom/path.pid");
        assert_eq!(pid_file.path(), &PathBuf::from("/custom/path.pid"));
    }

    #[test]
    fn is_running_returns_none_for_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let pid_file = PidFile::with_path(dir.path().join("missing.pid"));
        assert!(pid_file.is_running().is_none());
    }

    #[test]
    fn acquire_then_second_acquire_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("listener.pid");

        let mut first = PidFile::with_path(&path);
        first.acquire().unwrap();
        assert_eq!(first.is_running(), Some(process::id()));

        let mut second = PidFile::with_path(&path);
        assert!(matches!(
            second.acquire(),
            Err(PidFileError::AlreadyRunning(_))
        ));

        first.release().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn garbage_contents_are_not_running() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("listener.pid");
        fs::write(&path, "not-a-pid").unwrap();
        assert!(PidFile::with_path(&path).is_running().is_none());
    }

    #[test]
    fn drop_releases_owned_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("listener.pid");
        {
            let mut pid_file = PidFile::with_path(&path);
            pid_file.acquire().unwrap();
            assert!(path.exists());
        }
        assert!(!path.exists());
    }
}
