//! Error types for the slang driver.
//!
//! Each concern reports its own `thiserror` enum; [`DriverError`] wraps them
//! so the binary renders a single report. Tool failures deliberately collapse
//! to [`ToolExecutionError`], whose message never carries the command line.
use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias for results produced by the driver.
pub type Result<T, E = DriverError> = std::result::Result<T, E>;

/// Errors raised by the slang driver.
#[derive(Debug, Error)]
pub enum DriverError {
    /// The project description could not be read or parsed.
    #[error(transparent)]
    Project(#[from] ProjectError),
    /// Driver configuration layers could not be merged.
    #[error("failed to load driver configuration: {0}")]
    Config(#[from] ConfigError),
    /// A command-line override could not be applied to the project.
    #[error(transparent)]
    Override(#[from] OverrideError),
    /// The external tool reported failure.
    #[error(transparent)]
    Tool(#[from] ToolExecutionError),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Raised when the external front-end exits unsuccessfully or cannot start.
///
/// The message is fixed so a failing run does not flood the terminal with the
/// full argument vector.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Error)]
#[error("Slang lint check failed")]
pub struct ToolExecutionError;

/// Failures while loading a project description.
#[derive(Debug, Error)]
pub enum ProjectError {
    /// The file could not be read.
    #[error("failed to read project description '{}': {source}", path.display())]
    Read {
        /// Path of the project description.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file contents did not match the project schema.
    #[error("invalid project description '{}': {source}", path.display())]
    Parse {
        /// Path of the project description.
        path: PathBuf,
        /// Format-specific parse error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Failures while layering the driver configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested configuration file does not exist.
    #[error("configuration file '{}' does not exist", path.display())]
    MissingFile {
        /// Path passed via `--config`.
        path: PathBuf,
    },
    /// Figment failed to merge or extract the configuration.
    #[error(transparent)]
    Figment(#[from] Box<figment::Error>),
}

/// Problems with `KEY=VALUE` overrides supplied on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OverrideError {
    /// The override did not contain an `=` separator.
    #[error("expected KEY=VALUE, got '{0}'")]
    MissingSeparator(String),
    /// The key part of the override was blank.
    #[error("override '{0}' has an empty key")]
    EmptyKey(String),
    /// The value could not be converted to the declared parameter datatype.
    #[error("parameter '{key}' expects a {datatype} value, got '{value}'")]
    InvalidValue {
        /// Parameter name.
        key: String,
        /// Datatype declared by the project description.
        datatype: String,
        /// Raw value supplied on the command line.
        value: String,
    },
}
