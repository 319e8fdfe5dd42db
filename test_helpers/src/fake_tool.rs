//! Stand-in `slang` executables for end-to-end tests.
//!
//! A fake tool is a small shell script that writes each argument it receives
//! on its own line to a sidecar file, then exits with a chosen status. Tests
//! point the driver at it and inspect the recorded argument vector.
//!
//! Only available on Unix, where scripts can be marked executable.

use std::fs;
use std::os::unix::fs::PermissionsExt;

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};

/// A fake front-end installed in a directory.
#[derive(Debug, Clone)]
pub struct FakeTool {
    program: Utf8PathBuf,
    record: Utf8PathBuf,
    cwd: Utf8PathBuf,
}

impl FakeTool {
    /// Installs a script called `name` in `dir` that exits with `status`.
    ///
    /// # Errors
    ///
    /// Returns an error when the script cannot be written or made executable.
    pub fn install(dir: &Utf8Path, name: &str, status: i32) -> Result<Self> {
        let program = dir.join(name);
        let record = dir.join(format!("{name}.args"));
        let cwd = dir.join(format!("{name}.cwd"));
        let script = format!(
            "#!/bin/sh\npwd > '{cwd}'\nprintf '%s\\n' \"$@\" > '{record}'\nexit {status}\n"
        );
        fs::write(&program, script).with_context(|| format!("write {program}"))?;
        let mut perms = fs::metadata(&program)
            .with_context(|| format!("stat {program}"))?
            .permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&program, perms).with_context(|| format!("chmod {program}"))?;
        Ok(Self {
            program,
            record,
            cwd,
        })
    }

    /// Path of the script.
    #[must_use]
    pub fn program(&self) -> &Utf8Path {
        &self.program
    }

    /// Whether the script has been run.
    #[must_use]
    pub fn was_invoked(&self) -> bool {
        self.record.is_file()
    }

    /// Arguments received by the most recent run, one entry per argument.
    ///
    /// # Errors
    ///
    /// Returns an error when the tool has not been run.
    pub fn recorded_args(&self) -> Result<Vec<String>> {
        let text = fs::read_to_string(&self.record)
            .with_context(|| format!("read recorded arguments from {}", self.record))?;
        Ok(text.lines().map(str::to_owned).collect())
    }

    /// Working directory of the most recent run.
    ///
    /// # Errors
    ///
    /// Returns an error when the tool has not been run.
    pub fn recorded_cwd(&self) -> Result<Utf8PathBuf> {
        let text = fs::read_to_string(&self.cwd)
            .with_context(|| format!("read recorded directory from {}", self.cwd))?;
        Ok(Utf8PathBuf::from(text.trim_end()))
    }
}

#[cfg(test)]
mod tests {
    use super::FakeTool;
    use anyhow::{Context, Result, ensure};
    use std::process::Command;

    #[test]
    fn records_arguments_and_exit_status() -> Result<()> {
        let dir = tempfile::tempdir().context("create temp dir")?;
        let root = crate::utf8_dir(&dir)?;
        let tool = FakeTool::install(&root, "slang", 2)?;
        ensure!(!tool.was_invoked(), "fresh tool should not be invoked");
        let status = Command::new(tool.program())
            .args(["-D A=1", "top.sv"])
            .status()
            .context("run fake tool")?;
        ensure!(status.code() == Some(2), "unexpected status {status:?}");
        ensure!(
            tool.recorded_args()? == vec![String::from("-D A=1"), String::from("top.sv")],
            "unexpected recorded args"
        );
        Ok(())
    }
}
