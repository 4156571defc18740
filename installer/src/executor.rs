//! External command execution.
//!
//! The packaging pipeline shells out to `dpkg` and `dpkg-deb`. Both go through
//! [`CommandExecutor`] so tests can substitute scripted responses.

use crate::error::{PackagerError, Result};
use log::trace;
use std::process::{Command, Output};

/// Abstraction for running external commands.
pub trait CommandExecutor {
    /// Runs a command with arguments and returns the captured output.
    ///
    /// # Errors
    ///
    /// Returns any I/O errors encountered while spawning or running the command.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use distpack_installer::executor::{CommandExecutor, SystemCommandExecutor};
    ///
    /// let executor = SystemCommandExecutor;
    /// let output = executor.run("dpkg", &["--print-architecture"])?;
    /// assert!(output.status.success());
    /// # Ok::<(), distpack_installer::error::PackagerError>(())
    /// ```
    fn run(&self, cmd: &str, args: &[&str]) -> Result<Output>;
}

/// Executes commands on the host system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemCommandExecutor;

impl CommandExecutor for SystemCommandExecutor {
    fn run(&self, cmd: &str, args: &[&str]) -> Result<Output> {
        trace!(target: "executor", "running {cmd} {}", args.join(" "));
        Command::new(cmd)
            .args(args)
            .output()
            .map_err(PackagerError::from)
    }
}

/// Return the trimmed standard error of a finished command.
pub(crate) fn stderr_message(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).trim().to_owned()
}
