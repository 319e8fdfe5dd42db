//! Command-line surface of `slang-driver`.
//!
//! Parses arguments with `clap`, layers the driver configuration and
//! dispatches to the flag builder and tool runner.
use std::io::Write;
use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::error::Result;
use crate::flags::{FlagSequence, build_flags};
use crate::job::{JobOverrides, KeyValue, SlangJob};
use crate::options::render_options;
use crate::project::{RunMode, load_project};
use crate::tool::{ProcessRunner, ToolRunner, execute};

mod config;

pub use config::{DEFAULT_CONFIG_FILE, DriverConfig, ENV_PREFIX, load_driver_config};

/// Command-line interface of the driver.
#[derive(Debug, Parser)]
#[command(
    name = "slang-driver",
    bin_name = "slang-driver",
    about = "Run the slang SystemVerilog front-end over a project description",
    version
)]
pub struct CommandLine {
    /// Overrides configuration discovery with an explicit file path.
    #[arg(
        long = "config",
        short = 'c',
        value_name = "PATH",
        global = true,
        help = "Path to the driver configuration file"
    )]
    pub config_path: Option<PathBuf>,
    /// Increases log verbosity; repeat for more detail.
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,
    /// Driver settings supplied on the command line.
    #[command(flatten)]
    pub driver: DriverArgs,
    /// Selected workflow.
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI overrides for the layered driver configuration.
#[derive(Debug, Default, Clone, PartialEq, Eq, Args)]
pub struct DriverArgs {
    /// Front-end executable to run.
    #[arg(long, value_name = "PROGRAM", global = true)]
    pub tool: Option<String>,
    /// Command prefixed to every tool invocation.
    #[arg(long, value_name = "CMD", global = true, allow_hyphen_values = true)]
    pub launcher: Option<String>,
    /// Directory the tool runs in.
    #[arg(long = "work-root", value_name = "DIR", global = true)]
    pub work_root: Option<PathBuf>,
}

/// Subcommands implemented by the driver.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Assembles the flags and runs the front-end.
    #[command(name = "build")]
    Build(JobArgs),
    /// Prints the assembled flags, one per line, without running anything.
    #[command(name = "flags")]
    Flags(JobArgs),
    /// Describes the tool options a project may set.
    #[command(name = "options")]
    Options,
}

/// Inputs shared by `build` and `flags`.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct JobArgs {
    /// Project description (`.json`, `.yml`/`.yaml`, or TOML).
    #[arg(value_name = "PROJECT")]
    pub project: PathBuf,
    /// Overrides the run mode from the project.
    #[arg(long, value_enum)]
    pub mode: Option<RunMode>,
    /// Overrides the extra slang options from the project.
    #[arg(
        long = "slang-options",
        value_name = "OPTIONS",
        allow_hyphen_values = true
    )]
    pub slang_options: Option<String>,
    /// Overrides the top-level module.
    #[arg(long, value_name = "NAME")]
    pub toplevel: Option<String>,
    /// Sets a preprocessor define.
    #[arg(short = 'D', long = "define", value_name = "KEY=VALUE")]
    pub defines: Vec<KeyValue>,
    /// Sets a top-level parameter.
    #[arg(short = 'G', long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<KeyValue>,
}

impl JobArgs {
    /// Converts the arguments into overrides for the project job.
    #[must_use]
    pub fn overrides(&self) -> JobOverrides {
        JobOverrides {
            mode: self.mode,
            extra_options: self.slang_options.clone(),
            toplevel: self.toplevel.clone(),
            defines: self.defines.clone(),
            params: self.params.clone(),
        }
    }

    /// Loads the project and resolves the flags for this invocation.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::error::DriverError`] when the project cannot be
    /// loaded or an override does not fit its parameter.
    pub fn resolve_flags(&self) -> Result<FlagSequence> {
        let project = load_project(&self.project)?;
        let mut job = SlangJob::from_project(&project);
        self.overrides().apply(&project, &mut job)?;
        Ok(build_flags(&job))
    }
}

impl DriverConfig {
    /// Builds the process runner described by this configuration.
    #[must_use]
    pub fn runner(&self) -> ProcessRunner {
        let mut runner = ProcessRunner::new(self.tool.clone());
        if let Some(launcher) = &self.launcher {
            runner = runner.with_launcher(launcher);
        }
        if let Some(dir) = &self.work_root {
            runner = runner.with_work_root(dir.clone());
        }
        runner
    }
}

/// Executes the parsed command line.
///
/// # Errors
///
/// Returns a [`crate::error::DriverError`] when configuration, project
/// loading, output or the tool invocation fails.
pub fn run(cli: &CommandLine, out: &mut dyn Write) -> Result<()> {
    let config = load_driver_config(&cli.driver, cli.config_path.as_deref())?;
    let runner = config.runner();
    dispatch(&cli.command, &runner, out)
}

/// Dispatches a subcommand against an explicit runner.
///
/// # Errors
///
/// See [`run`].
pub fn dispatch(command: &Commands, runner: &dyn ToolRunner, out: &mut dyn Write) -> Result<()> {
    match command {
        Commands::Build(args) => {
            let flags = args.resolve_flags()?;
            execute(runner, &flags)?;
            tracing::info!(project = %args.project.display(), "slang finished");
        }
        Commands::Flags(args) => {
            let flags = args.resolve_flags()?;
            write!(out, "{flags}")?;
        }
        Commands::Options => {
            write!(out, "{}", render_options())?;
        }
    }
    Ok(())
}
