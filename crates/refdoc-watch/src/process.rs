//! External extraction tool invocation.

use std::path::PathBuf;
use std::process::Command;

use crate::error::WatchError;

/// Something that regenerates the XML dump from the headers.
pub trait Extractor {
    /// Run to completion. Fails if the tool cannot start or exits non-zero.
    fn run(&self) -> Result<(), WatchError>;
}

/// Shell command run synchronously inside a startup directory.
#[derive(Debug, Clone)]
pub struct ProcessHandle {
    command: String,
    startup_dir: PathBuf,
}

impl ProcessHandle {
    #[must_use]
    pub fn new(command: impl Into<String>, startup_dir: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
            startup_dir: startup_dir.into(),
        }
    }

    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }

    fn shell(&self) -> Command {
        #[cfg(target_os = "windows")]
        {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", &self.command]);
            cmd
        }
        #[cfg(not(target_os = "windows"))]
        {
            let mut cmd = Command::new("sh");
            cmd.args(["-c", &self.command]);
            cmd
        }
    }
}

impl Extractor for ProcessHandle {
    fn run(&self) -> Result<(), WatchError> {
        tracing::info!(
            command = %self.command,
            dir = %self.startup_dir.display(),
            "Running extraction tool"
        );
        let status = self
            .shell()
            .current_dir(&self.startup_dir)
            .status()
            .map_err(|source| WatchError::Spawn {
                command: self.command.clone(),
                source,
            })?;
        if !status.success() {
            return Err(WatchError::ExtractionTool {
                command: self.command.clone(),
                status,
            });
        }
        Ok(())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_run_in_startup_dir() {
        let tmp = TempDir::new().unwrap();
        let handle = ProcessHandle::new("touch extracted.flag", tmp.path());
        handle.run().unwrap();
        assert!(tmp.path().join("extracted.flag").exists());
    }

    #[test]
    fn test_non_zero_exit_fails() {
        let tmp = TempDir::new().unwrap();
        let handle = ProcessHandle::new("exit 3", tmp.path());
        let err = handle.run().unwrap_err();
        match err {
            WatchError::ExtractionTool { command, status } => {
                assert_eq!(command, "exit 3");
                assert_eq!(status.code(), Some(3));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_startup_dir_fails_to_spawn() {
        let tmp = TempDir::new().unwrap();
        let handle = ProcessHandle::new("true", tmp.path().join("missing"));
        assert!(matches!(handle.run(), Err(WatchError::Spawn { .. })));
    }
}
