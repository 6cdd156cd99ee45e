//! External command execution for the post-processing stage.
//!
//! Formatter and checker invocations go through the [`CommandRunner`] trait so
//! the pipeline can be exercised without spawning real processes.

use crate::error::{Error, Result};
use log::debug;
use std::path::Path;
use std::process::{Command, Stdio};

/// Captured result of one external command invocation.
#[derive(Debug)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

/// A program name plus its leading arguments. The target file is appended at
/// invocation time.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Builds a spec from a `[program, arg, ...]` slice such as the command
    /// constants.
    pub fn from_parts(parts: &[&str]) -> Self {
        let (program, args) = match parts.split_first() {
            Some((program, args)) => (
                (*program).to_string(),
                args.iter().map(|s| (*s).to_string()).collect(),
            ),
            None => (String::new(), Vec::new()),
        };
        CommandSpec { program, args }
    }

    /// Full display form used in failure lists, e.g. `deno fmt`.
    pub fn label(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}

/// Executes a command against a target file.
pub trait CommandRunner {
    /// Runs the command with the target path appended and captures its output.
    ///
    /// A non-zero exit status is a regular `CommandOutput` with `success`
    /// false; `Err` means the command could not be run at all.
    fn run(&self, spec: &CommandSpec, target: &Path) -> Result<CommandOutput>;
}

/// Runs commands as real child processes with piped output.
pub struct ProcessCommandRunner;

impl CommandRunner for ProcessCommandRunner {
    fn run(&self, spec: &CommandSpec, target: &Path) -> Result<CommandOutput> {
        debug!("Running '{}' on '{}'", spec.label(), target.display());

        let output = Command::new(&spec.program)
            .args(&spec.args)
            .arg(target)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| Error::CommandError {
                command: spec.label(),
                reason: e.to_string(),
            })?;

        Ok(CommandOutput {
            success: output.status.success(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}
