//! Process execution utilities
//!
//! Runs the editor executable and other external tools with proper error
//! handling and logging.

use crate::error::{DistillError, Result};
use std::ffi::OsStr;
use std::process::{Command, Stdio};
use tracing::{debug, info, instrument};

/// Utility for running external processes
#[derive(Debug)]
pub struct ProcessRunner {
    debug: bool,
}

impl ProcessRunner {
    /// Create a new process runner
    #[must_use]
    pub const fn new(debug: bool) -> Self {
        Self { debug }
    }

    /// Run a command with arguments, inheriting stdout/stderr
    #[instrument(skip(self, args))]
    pub fn run_command<S: AsRef<OsStr>>(&self, command: &str, args: &[S]) -> Result<()> {
        let cmd_str = Self::display_command(command, args);

        if self.debug {
            debug!("Running command: {}", cmd_str);
        } else {
            info!("+ {}", cmd_str);
        }

        let status = Command::new(command)
            .args(args)
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| DistillError::process(cmd_str.clone(), None, Some(e)))?;

        if !status.success() {
            return Err(DistillError::process(cmd_str, status.code(), None));
        }

        debug!("Command completed successfully");
        Ok(())
    }

    /// Check if a command exists in PATH
    #[instrument(skip(self))]
    pub fn command_exists(&self, command: &str) -> bool {
        debug!("Checking if command exists: {}", command);

        let result = Command::new("which")
            .arg(command)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match result {
            Ok(status) => {
                let exists = status.success();
                debug!("Command '{}' exists: {}", command, exists);
                exists
            }
            Err(e) => {
                debug!("Failed to check if command '{}' exists: {}", command, e);
                false
            }
        }
    }

    fn display_command<S: AsRef<OsStr>>(command: &str, args: &[S]) -> String {
        let mut cmd_str = command.to_string();
        for arg in args {
            cmd_str.push(' ');
            cmd_str.push_str(&arg.as_ref().to_string_lossy());
        }
        cmd_str
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new(false)
    }
}
