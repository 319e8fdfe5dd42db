//! Project description fixtures.

use std::fs;

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use serde_json::{Value, json};

/// A small project with one include file, one source, one waiver and one
/// file of an unrelated type.
#[must_use]
pub fn sample_project() -> Value {
    json!({
        "name": "blinky",
        "files": [
            {"name": "rtl/include/defs.svh", "file_type": "systemVerilogSource", "is_include_file": true},
            {"name": "rtl/blinky.sv", "file_type": "systemVerilogSource"},
            {"name": "lint/waivers.txt", "file_type": "slangWaiver"},
            {"name": "board/pins.pcf", "file_type": "PCF"}
        ],
        "parameters": {
            "SYNTH": {"datatype": "bool", "paramtype": "vlogdefine", "default": true},
            "CLK_FREQ": {"datatype": "int", "paramtype": "vlogparam", "default": 12000000}
        },
        "tool_options": {
            "slang": {"mode": ["lint"], "slang_options": ["--std 1800-2017"]}
        },
        "toplevel": "blinky"
    })
}

/// Writes `project` as JSON to `dir/name`, returning the path.
///
/// # Errors
///
/// Returns an error when serialisation or writing fails.
pub fn write_project(dir: &Utf8Path, name: &str, project: &Value) -> Result<Utf8PathBuf> {
    let path = dir.join(name);
    let text = serde_json::to_string_pretty(project).context("serialise project")?;
    fs::write(&path, text).with_context(|| format!("write {path}"))?;
    Ok(path)
}
