//! Reading project descriptions from disk.
//!
//! The format is chosen from the file extension. Documents are deserialised
//! directly rather than through a merged figment so parameter declaration
//! order survives into the command line.

use std::path::Path;

use serde_saphyr::Options;

use super::Project;
use crate::error::ProjectError;

/// Loads a project description, selecting the parser from the extension.
///
/// `.json` files are parsed as JSON, `.yml`/`.yaml` as YAML with strict
/// booleans, and everything else as TOML.
///
/// # Errors
///
/// Returns [`ProjectError::Read`] when the file cannot be read and
/// [`ProjectError::Parse`] when its contents do not describe a project.
pub fn load_project(path: &Path) -> Result<Project, ProjectError> {
    let data = std::fs::read_to_string(path).map_err(|source| ProjectError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let project = parse_project(path, &data)?;
    tracing::debug!(
        path = %path.display(),
        name = %project.name,
        files = project.files.len(),
        parameters = project.parameters.len(),
        "loaded project description"
    );
    Ok(project)
}

pub(super) fn parse_project(path: &Path, data: &str) -> Result<Project, ProjectError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("json") => serde_json::from_str(data).map_err(|e| parse_error(path, e)),
        Some("yaml" | "yml") => serde_saphyr::from_str_with_options(
            data,
            Options {
                strict_booleans: true,
                ..Options::default()
            },
        )
        .map_err(|e| parse_error(path, e.to_string())),
        _ => toml::from_str(data).map_err(|e| parse_error(path, e)),
    }
}

fn parse_error(
    path: &Path,
    err: impl Into<Box<dyn std::error::Error + Send + Sync>>,
) -> ProjectError {
    ProjectError::Parse {
        path: path.to_path_buf(),
        source: err.into(),
    }
}
