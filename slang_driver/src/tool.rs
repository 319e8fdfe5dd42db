//! Invocation of the external front-end.
//!
//! [`ToolRunner`] is the seam between flag assembly and process spawning.
//! Runners report detailed [`ToolFailure`]s; [`execute`] logs that detail
//! and collapses it to the argument-free [`ToolExecutionError`].

use std::path::PathBuf;
use std::process::{Command, Stdio};

use thiserror::Error;

use crate::error::ToolExecutionError;
use crate::flags::FlagSequence;

/// Program invoked when no other tool is configured.
pub const DEFAULT_TOOL: &str = "slang";

/// Detailed reason an invocation failed.
#[derive(Debug, Error)]
pub enum ToolFailure {
    /// The program could not be started.
    #[error("failed to start '{program}': {source}")]
    Spawn {
        /// Program that was launched.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The program ran and reported failure.
    #[error("'{program}' exited unsuccessfully ({})", describe_code(*code))]
    Exit {
        /// Program that was launched.
        program: String,
        /// Exit code; `None` when terminated by a signal.
        code: Option<i32>,
    },
}

fn describe_code(code: Option<i32>) -> String {
    code.map_or_else(
        || String::from("terminated by signal"),
        |code| format!("exit code {code}"),
    )
}

/// Runs the front-end with a prepared argument list.
pub trait ToolRunner {
    /// Runs the tool with `args`, blocking until it exits.
    ///
    /// # Errors
    ///
    /// Returns a [`ToolFailure`] when the tool cannot start or exits with a
    /// failure status.
    fn run(&self, args: &[String]) -> Result<(), ToolFailure>;
}

/// Spawns the front-end as a child process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRunner {
    program: String,
    launcher: Vec<String>,
    work_root: Option<PathBuf>,
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new(DEFAULT_TOOL)
    }
}

impl ProcessRunner {
    /// Creates a runner for `program`, resolved through `PATH` when relative.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            launcher: Vec::new(),
            work_root: None,
        }
    }

    /// Prefixes every invocation with a whitespace-separated launcher command.
    #[must_use]
    pub fn with_launcher(mut self, launcher: &str) -> Self {
        self.launcher = launcher.split_whitespace().map(str::to_owned).collect();
        self
    }

    /// Runs the tool from `dir` instead of the current directory.
    #[must_use]
    pub fn with_work_root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_root = Some(dir.into());
        self
    }

    /// Returns the program and arguments that will be spawned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use slang_driver::tool::ProcessRunner;
    ///
    /// let runner = ProcessRunner::new("slang").with_launcher("nice -n 5");
    /// let argv = runner.command_line(&[String::from("top.sv")]);
    /// assert_eq!(argv, ["nice", "-n", "5", "slang", "top.sv"]);
    /// ```
    #[must_use]
    pub fn command_line(&self, args: &[String]) -> Vec<String> {
        self.launcher
            .iter()
            .chain(std::iter::once(&self.program))
            .chain(args)
            .cloned()
            .collect()
    }

    fn command(&self, args: &[String]) -> (String, Command) {
        let argv = self.command_line(args);
        let (program, rest) = argv
            .split_first()
            .map_or((self.program.as_str(), &[][..]), |(head, tail)| {
                (head.as_str(), tail)
            });
        let mut command = Command::new(program);
        command.args(rest).stdin(Stdio::null());
        if let Some(dir) = &self.work_root {
            command.current_dir(dir);
        }
        (program.to_owned(), command)
    }
}

impl ToolRunner for ProcessRunner {
    fn run(&self, args: &[String]) -> Result<(), ToolFailure> {
        let (program, mut command) = self.command(args);
        tracing::debug!(
            program = %program,
            args = ?args,
            work_root = ?self.work_root,
            "running slang"
        );
        let status = command.status().map_err(|source| ToolFailure::Spawn {
            program: program.clone(),
            source,
        })?;
        if status.success() {
            Ok(())
        } else {
            Err(ToolFailure::Exit {
                program,
                code: status.code(),
            })
        }
    }
}

/// Runs the front-end with `flags`.
///
/// # Errors
///
/// Returns [`ToolExecutionError`] for any failure. The underlying detail is
/// logged rather than returned so the command line stays out of the error.
pub fn execute<R>(runner: &R, flags: &FlagSequence) -> Result<(), ToolExecutionError>
where
    R: ToolRunner + ?Sized,
{
    runner.run(flags.as_slice()).map_err(|failure| {
        tracing::warn!(error = %failure, "slang invocation failed");
        ToolExecutionError
    })
}
