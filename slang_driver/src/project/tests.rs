//! Unit tests for project parsing and parameter extraction.

use std::path::Path;

use anyhow::{Context, Result, anyhow, ensure};
use rstest::{fixture, rstest};

use super::loader::parse_project;
use super::{ParamValue, Project, RunMode, load_project};
use crate::error::ProjectError;

const YAML_PROJECT: &str = r"
name: blinky
files:
  - name: rtl/defs.svh
    file_type: systemVerilogSource
    is_include_file: true
  - name: rtl/top.sv
    file_type: systemVerilogSource-2017
  - name: lint/waivers.txt
    file_type: slangWaiver
  - name: constraints.pcf
    file_type: PCF
parameters:
  WIDTH:
    datatype: int
    paramtype: vlogparam
    default: 8
  SYNTH:
    datatype: bool
    paramtype: vlogdefine
    default: true
  SEED:
    datatype: int
    paramtype: plusarg
    default: 3
tool_options:
  slang:
    mode: [lint]
    slang_options: ['--std 1800-2017', '-Wextra']
  verilator:
    mode: cc
toplevel: top
";

#[fixture]
fn yaml_project() -> Result<Project> {
    parse_project(Path::new("blinky.yml"), YAML_PROJECT).map_err(|err| anyhow!(err.to_string()))
}

#[rstest]
fn parses_yaml_description(yaml_project: Result<Project>) -> Result<()> {
    let project = yaml_project?;
    ensure!(project.name == "blinky", "unexpected name {:?}", project.name);
    ensure!(project.files.len() == 4, "expected four files");
    ensure!(project.toplevel == "top", "unexpected toplevel");
    let slang = project.slang_options();
    ensure!(slang.run_mode() == Some(RunMode::Lint), "expected lint mode");
    ensure!(
        slang.extra_options() == "--std 1800-2017 -Wextra",
        "unexpected extra options {:?}",
        slang.extra_options()
    );
    Ok(())
}

#[rstest]
fn splits_parameters_by_kind(yaml_project: Result<Project>) -> Result<()> {
    let project = yaml_project?;
    let defines: Vec<_> = project.defines().into_iter().collect();
    let params: Vec<_> = project.params().into_iter().collect();
    assert_eq!(defines, vec![(String::from("SYNTH"), ParamValue::Bool(true))]);
    assert_eq!(params, vec![(String::from("WIDTH"), ParamValue::Int(8))]);
    Ok(())
}

#[rstest]
fn keeps_json_declaration_order() -> Result<()> {
    let doc = r#"{
        "parameters": {
            "ZETA": {"paramtype": "vlogdefine", "default": "z"},
            "ALPHA": {"paramtype": "vlogdefine", "default": 1},
            "MID": {"paramtype": "vlogdefine"}
        }
    }"#;
    let project =
        parse_project(Path::new("order.json"), doc).map_err(|err| anyhow!(err.to_string()))?;
    let names: Vec<String> = project.defines().into_keys().collect();
    assert_eq!(names, vec![String::from("ZETA"), String::from("ALPHA")]);
    Ok(())
}

#[rstest]
fn parses_toml_by_default() -> Result<()> {
    let doc = r#"
name = "core"
toplevel = "core_top"

[[files]]
name = "core.v"
file_type = "verilogSource"

[parameters.DEPTH]
paramtype = "vlogparam"
default = 16

[tool_options.slang]
mode = "preprocess"
slang_options = "--single-unit"
"#;
    let project =
        parse_project(Path::new("core.conf"), doc).map_err(|err| anyhow!(err.to_string()))?;
    ensure!(project.toplevel == "core_top", "unexpected toplevel");
    ensure!(project.files.len() == 1, "expected a single file");
    let slang = project.slang_options();
    ensure!(
        slang.run_mode() == Some(RunMode::Preprocess),
        "expected preprocess mode"
    );
    ensure!(slang.extra_options() == "--single-unit", "unexpected options");
    assert_eq!(
        project.params().get("DEPTH"),
        Some(&ParamValue::Int(16)),
        "DEPTH should come from its default"
    );
    Ok(())
}

#[rstest]
#[case(r#"{"tool_options": {"slang": {"mode": "synthesise"}}}"#)]
#[case(r#"{"tool_options": {"slang": {"mode": []}}}"#)]
#[case(r#"{"tool_options": {"slang": {}}}"#)]
#[case(r#"{"tool_options": {"slang": {"mode": " lint "}}}"#)]
#[case("{}")]
fn unknown_or_missing_mode_is_absent(#[case] doc: &str) -> Result<()> {
    let project =
        parse_project(Path::new("mode.json"), doc).map_err(|err| anyhow!(err.to_string()))?;
    ensure!(project.slang_options().run_mode().is_none(), "mode should be absent");
    Ok(())
}

#[rstest]
#[case(ParamValue::Bool(true), "1")]
#[case(ParamValue::Bool(false), "0")]
#[case(ParamValue::Int(-4), "-4")]
#[case(ParamValue::Float(2.5), "2.5")]
#[case(ParamValue::Float(3.0), "3.0")]
#[case(ParamValue::Float(1e16), "1e+16")]
#[case(ParamValue::Float(1.5e-5), "1.5e-05")]
#[case(ParamValue::Float(2.5e300), "2.5e+300")]
#[case(ParamValue::Float(0.0001), "0.0001")]
#[case(ParamValue::Float(f64::NAN), "nan")]
#[case(ParamValue::UInt(u64::MAX), "18446744073709551615")]
#[case(ParamValue::from("x"), "x")]
fn renders_param_values(#[case] value: ParamValue, #[case] expected: &str) {
    assert_eq!(value.to_string(), expected);
}

#[rstest]
fn wide_integer_defaults_stay_exact() -> Result<()> {
    let doc = r#"{
        "parameters": {
            "MASK": {"datatype": "int", "paramtype": "vlogparam", "default": 18446744073709551615},
            "OFFSET": {"datatype": "int", "paramtype": "vlogparam", "default": -3}
        }
    }"#;
    let project =
        parse_project(Path::new("wide.json"), doc).map_err(|err| anyhow!(err.to_string()))?;
    let params = project.params();
    assert_eq!(params.get("MASK"), Some(&ParamValue::UInt(u64::MAX)));
    assert_eq!(
        params.get("MASK").map(ToString::to_string).as_deref(),
        Some("18446744073709551615")
    );
    assert_eq!(params.get("OFFSET"), Some(&ParamValue::Int(-3)));
    Ok(())
}

#[rstest]
fn missing_file_reports_read_error() -> Result<()> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let path = dir.path().join("absent.json");
    let err = load_project(&path).err().context("expected a read failure")?;
    ensure!(
        matches!(err, ProjectError::Read { .. }),
        "unexpected error {err:?}"
    );
    Ok(())
}

#[rstest]
fn malformed_file_reports_parse_error() -> Result<()> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let path = dir.path().join("broken.json");
    std::fs::write(&path, r#"{"files": [{"file_type": "verilogSource"}]}"#)
        .context("write project")?;
    let err = load_project(&path).err().context("expected a parse failure")?;
    ensure!(
        matches!(err, ProjectError::Parse { .. }),
        "unexpected error {err:?}"
    );
    ensure!(
        err.to_string().contains("broken.json"),
        "error should name the file: {err}"
    );
    Ok(())
}
