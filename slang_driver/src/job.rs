//! Resolved inputs for a single front-end invocation.
//!
//! A [`SlangJob`] starts from a [`Project`] and absorbs command-line
//! overrides. It is the only input the flag builder needs.

use indexmap::IndexMap;

use crate::error::OverrideError;
use crate::project::{Fileset, ParamType, ParamValue, Project, RunMode};

/// Everything needed to assemble the front-end command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlangJob {
    /// Sources, waivers and include directories.
    pub fileset: Fileset,
    /// Preprocessor defines in order.
    pub defines: IndexMap<String, ParamValue>,
    /// Top-level parameters in order.
    pub params: IndexMap<String, ParamValue>,
    /// Selected run mode, if any.
    pub mode: Option<RunMode>,
    /// Free-form extra options, split on whitespace when rendered.
    pub extra_options: String,
    /// Top-level module; empty when unset.
    pub toplevel: String,
}

impl SlangJob {
    /// Builds a job from the project description alone.
    #[must_use]
    pub fn from_project(project: &Project) -> Self {
        let slang = project.slang_options();
        Self {
            fileset: project.fileset(),
            defines: project.defines(),
            params: project.params(),
            mode: slang.run_mode(),
            extra_options: slang.extra_options(),
            toplevel: project.toplevel.clone(),
        }
    }
}

/// A raw `KEY=VALUE` pair from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    /// Parameter name.
    pub key: String,
    /// Unconverted value text.
    pub value: String,
}

impl std::str::FromStr for KeyValue {
    type Err = OverrideError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (key, value) = raw
            .split_once('=')
            .ok_or_else(|| OverrideError::MissingSeparator(raw.to_owned()))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(OverrideError::EmptyKey(raw.to_owned()));
        }
        Ok(Self {
            key: key.to_owned(),
            value: value.to_owned(),
        })
    }
}

/// Command-line adjustments applied on top of a project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobOverrides {
    /// Replacement run mode.
    pub mode: Option<RunMode>,
    /// Replacement extra options string.
    pub extra_options: Option<String>,
    /// Replacement top-level module.
    pub toplevel: Option<String>,
    /// Define overrides, applied in order.
    pub defines: Vec<KeyValue>,
    /// Parameter overrides, applied in order.
    pub params: Vec<KeyValue>,
}

impl JobOverrides {
    /// Applies the overrides to `job`.
    ///
    /// Values are converted to the datatype the project declares for the
    /// parameter; undeclared keys are treated as strings and appended.
    ///
    /// # Errors
    ///
    /// Returns [`OverrideError::InvalidValue`] when a value does not match
    /// the declared datatype.
    pub fn apply(&self, project: &Project, job: &mut SlangJob) -> Result<(), OverrideError> {
        if let Some(mode) = self.mode {
            job.mode = Some(mode);
        }
        if let Some(extra) = &self.extra_options {
            job.extra_options.clone_from(extra);
        }
        if let Some(top) = &self.toplevel {
            job.toplevel.clone_from(top);
        }
        for pair in &self.defines {
            let value = coerce(project, ParamType::Vlogdefine, pair)?;
            job.defines.insert(pair.key.clone(), value);
        }
        for pair in &self.params {
            let value = coerce(project, ParamType::Vlogparam, pair)?;
            job.params.insert(pair.key.clone(), value);
        }
        Ok(())
    }
}

fn coerce(
    project: &Project,
    kind: ParamType,
    pair: &KeyValue,
) -> Result<ParamValue, OverrideError> {
    let datatype = project
        .parameters
        .get(&pair.key)
        .filter(|param| param.paramtype == kind)
        .and_then(|param| param.datatype.as_deref());
    let invalid = |datatype: &str| OverrideError::InvalidValue {
        key: pair.key.clone(),
        datatype: datatype.to_owned(),
        value: pair.value.clone(),
    };
    let raw = pair.value.trim();
    match datatype {
        Some("bool") => match raw.to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(ParamValue::Bool(true)),
            "false" | "0" => Ok(ParamValue::Bool(false)),
            _ => Err(invalid("bool")),
        },
        Some("int") => raw
            .parse()
            .map(ParamValue::Int)
            .or_else(|_| raw.parse().map(ParamValue::UInt))
            .map_err(|_| invalid("int")),
        Some("real") => raw
            .parse()
            .map(ParamValue::Float)
            .map_err(|_| invalid("real")),
        _ => Ok(ParamValue::Str(pair.value.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::{OneOrMany, Parameter, SlangToolOptions, ToolOptions};
    use rstest::{fixture, rstest};

    fn param(kind: ParamType, datatype: &str, default: Option<ParamValue>) -> Parameter {
        Parameter {
            datatype: Some(datatype.to_owned()),
            paramtype: kind,
            default,
            description: None,
        }
    }

    #[fixture]
    fn project() -> Project {
        let mut parameters = IndexMap::new();
        parameters.insert(
            String::from("SYNTH"),
            param(ParamType::Vlogdefine, "bool", Some(ParamValue::Bool(false))),
        );
        parameters.insert(
            String::from("WIDTH"),
            param(ParamType::Vlogparam, "int", Some(ParamValue::Int(8))),
        );
        parameters.insert(
            String::from("GAIN"),
            param(ParamType::Vlogparam, "real", None),
        );
        Project {
            parameters,
            tool_options: ToolOptions {
                slang: Some(SlangToolOptions {
                    mode: Some(OneOrMany::One(String::from("lint"))),
                    slang_options: None,
                }),
            },
            toplevel: String::from("top"),
            ..Project::default()
        }
    }

    fn kv(raw: &str) -> KeyValue {
        raw.parse().unwrap_or_else(|err| panic!("parse {raw:?}: {err}"))
    }

    #[rstest]
    fn from_project_copies_inputs(project: Project) {
        let job = SlangJob::from_project(&project);
        assert_eq!(job.mode, Some(RunMode::Lint));
        assert_eq!(job.toplevel, "top");
        assert_eq!(job.defines.get("SYNTH"), Some(&ParamValue::Bool(false)));
        assert_eq!(job.params.get("WIDTH"), Some(&ParamValue::Int(8)));
        assert!(!job.params.contains_key("GAIN"), "GAIN has no default");
    }

    #[rstest]
    fn overrides_follow_declared_datatypes(project: Project) {
        let mut job = SlangJob::from_project(&project);
        let overrides = JobOverrides {
            mode: Some(RunMode::Preprocess),
            toplevel: Some(String::from("alt_top")),
            defines: vec![kv("SYNTH=true"), kv("EXTRA=yes")],
            params: vec![kv("WIDTH=32"), kv("GAIN=0.5")],
            ..JobOverrides::default()
        };
        overrides
            .apply(&project, &mut job)
            .unwrap_or_else(|err| panic!("apply overrides: {err}"));
        assert_eq!(job.mode, Some(RunMode::Preprocess));
        assert_eq!(job.toplevel, "alt_top");
        let defines: Vec<_> = job.defines.into_iter().collect();
        assert_eq!(
            defines,
            vec![
                (String::from("SYNTH"), ParamValue::Bool(true)),
                (String::from("EXTRA"), ParamValue::from("yes")),
            ]
        );
        assert_eq!(job.params.get("WIDTH"), Some(&ParamValue::Int(32)));
        assert_eq!(job.params.get("GAIN"), Some(&ParamValue::Float(0.5)));
    }

    #[rstest]
    fn int_overrides_accept_the_full_unsigned_range(project: Project) {
        let mut job = SlangJob::from_project(&project);
        let overrides = JobOverrides {
            params: vec![kv("WIDTH=18446744073709551615"), kv("OFFSET=-2")],
            ..JobOverrides::default()
        };
        overrides
            .apply(&project, &mut job)
            .unwrap_or_else(|err| panic!("apply overrides: {err}"));
        assert_eq!(job.params.get("WIDTH"), Some(&ParamValue::UInt(u64::MAX)));
        assert_eq!(
            job.params.get("OFFSET"),
            Some(&ParamValue::from("-2")),
            "undeclared keys stay strings"
        );
    }

    #[rstest]
    fn rejects_values_of_the_wrong_type(project: Project) {
        let mut job = SlangJob::from_project(&project);
        let overrides = JobOverrides {
            params: vec![kv("WIDTH=wide")],
            ..JobOverrides::default()
        };
        let err = overrides
            .apply(&project, &mut job)
            .expect_err("non-numeric WIDTH should fail");
        assert_eq!(
            err.to_string(),
            "parameter 'WIDTH' expects a int value, got 'wide'"
        );
    }

    #[rstest]
    #[case("NOEQUALS", OverrideError::MissingSeparator(String::from("NOEQUALS")))]
    #[case("=1", OverrideError::EmptyKey(String::from("=1")))]
    fn rejects_malformed_pairs(#[case] raw: &str, #[case] expected: OverrideError) {
        assert_eq!(raw.parse::<KeyValue>(), Err(expected));
    }

    #[rstest]
    fn keeps_everything_after_the_first_separator() {
        let pair = kv("PATH=a=b");
        assert_eq!(pair.key, "PATH");
        assert_eq!(pair.value, "a=b");
    }
}
