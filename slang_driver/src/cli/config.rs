//! Layered driver configuration.
//!
//! Defaults are merged with a TOML file, `SLANG_DRIVER_*` environment
//! variables and finally command-line flags, each layer overriding the one
//! before it.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use super::DriverArgs;
use crate::error::ConfigError;
use crate::tool::DEFAULT_TOOL;

/// Prefix for environment variables read by the driver.
pub const ENV_PREFIX: &str = "SLANG_DRIVER_";

/// Configuration file read from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = ".slang_driver.toml";

/// Settings controlling how the front-end is launched.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DriverConfig {
    /// Front-end executable.
    pub tool: String,
    /// Optional command prefixed to each invocation.
    #[serde(default)]
    pub launcher: Option<String>,
    /// Directory the tool runs in.
    #[serde(default)]
    pub work_root: Option<PathBuf>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            tool: String::from(DEFAULT_TOOL),
            launcher: None,
            work_root: None,
        }
    }
}

#[derive(Serialize)]
struct Overrides<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    tool: Option<&'a String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    launcher: Option<&'a String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    work_root: Option<&'a PathBuf>,
}

/// Resolves the driver configuration from every layer.
///
/// # Errors
///
/// Returns [`ConfigError::MissingFile`] when `config_override` names a file
/// that does not exist, and [`ConfigError::Figment`] when a layer cannot be
/// parsed or the merged values do not fit [`DriverConfig`].
pub fn load_driver_config(
    args: &DriverArgs,
    config_override: Option<&Path>,
) -> Result<DriverConfig, ConfigError> {
    let file = match config_override {
        Some(path) if !path.is_file() => {
            return Err(ConfigError::MissingFile {
                path: path.to_path_buf(),
            });
        }
        Some(path) => Toml::file_exact(path),
        None => Toml::file_exact(DEFAULT_CONFIG_FILE),
    };
    let overrides = Overrides {
        tool: args.tool.as_ref(),
        launcher: args.launcher.as_ref(),
        work_root: args.work_root.as_ref(),
    };
    let config: DriverConfig = Figment::from(Serialized::defaults(DriverConfig::default()))
        .merge(file)
        .merge(Env::prefixed(ENV_PREFIX))
        .merge(Serialized::defaults(overrides))
        .extract()
        .map_err(|err| ConfigError::Figment(Box::new(err)))?;
    tracing::debug!(
        tool = %config.tool,
        launcher = ?config.launcher,
        work_root = ?config.work_root,
        "resolved driver configuration"
    );
    Ok(config)
}
