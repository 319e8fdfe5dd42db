//! `figment::Jail` helpers for configuration tests.
//!
//! Driver configuration reads `.slang_driver.toml` from the working
//! directory and `SLANG_DRIVER_*` variables from the environment; a jail
//! isolates both. These helpers surface the jail's result as an
//! `anyhow::Result` so tests can use `?` throughout.

use anyhow::{Result, anyhow};

/// Executes `f` inside a [`figment::Jail`], returning the closure's output.
///
/// # Errors
///
/// Returns an error if the jail cannot be set up or the closure fails.
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|jail| {
        output = Some(f(jail)?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure did not return a value"))
}

/// Converts any displayable error into a [`figment::Error`] for use inside
/// a jail closure.
#[expect(
    clippy::needless_pass_by_value,
    reason = "callers usually own the error and hand it over from map_err"
)]
pub fn figment_error<E: ToString>(err: E) -> figment::Error {
    figment::Error::from(err.to_string())
}
