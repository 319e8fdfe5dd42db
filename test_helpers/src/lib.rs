//! Test helpers shared across the slang-driver workspace.
//!
//! Provides environment guards, figment jail helpers, project fixtures and,
//! on Unix, fake front-end executables.

pub mod env;
#[cfg(unix)]
pub mod fake_tool;
pub mod figment;
pub mod project;

/// Converts a temporary directory path into a UTF-8 path.
///
/// # Errors
///
/// Returns an error when the path is not valid UTF-8.
pub fn utf8_dir(dir: &tempfile::TempDir) -> anyhow::Result<camino::Utf8PathBuf> {
    camino::Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
        .map_err(|path| anyhow::anyhow!("temp dir is not valid UTF-8: {}", path.display()))
}
