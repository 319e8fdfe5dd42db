//! Project descriptions consumed by the driver.
//!
//! A project lists the files of a hardware design, its parameters, the
//! top-level module and per-tool options. Only the `slang` tool options are
//! interpreted here; tables for other tools are ignored.

use std::fmt;

use clap::ValueEnum;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

mod file_type;
mod fileset;
mod loader;

pub use file_type::FileType;
pub use fileset::{Fileset, SourceFile};
pub use loader::load_project;

/// Declarative description of a hardware project.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Project {
    /// Project name, used only for diagnostics.
    #[serde(default)]
    pub name: String,
    /// Files in declaration order.
    #[serde(default)]
    pub files: Vec<FileEntry>,
    /// Parameters keyed by name, in declaration order.
    #[serde(default)]
    pub parameters: IndexMap<String, Parameter>,
    /// Options for the tools that may consume this project.
    #[serde(default)]
    pub tool_options: ToolOptions,
    /// Name of the top-level module; empty when unset.
    #[serde(default)]
    pub toplevel: String,
}

/// A single file listed by the project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct FileEntry {
    /// Path to the file, relative to the work root or absolute.
    pub name: String,
    /// File type tag.
    #[serde(default, with = "file_type_tag")]
    pub file_type: FileType,
    /// Marks header files whose directory becomes an include path.
    #[serde(default)]
    pub is_include_file: bool,
    /// Explicit include directory overriding the file's parent directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_path: Option<String>,
    /// Library the file belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logical_name: Option<String>,
}

mod file_type_tag {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::FileType;

    pub(super) fn serialize<S: Serializer>(
        file_type: &FileType,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(file_type.tag())
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<FileType, D::Error> {
        String::deserialize(deserializer).map(FileType::from)
    }
}

/// How a parameter is handed to the tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    /// Verilog preprocessor define, rendered as `-D`.
    Vlogdefine,
    /// Verilog top-level parameter, rendered as `-G`.
    Vlogparam,
    /// Simulation plusarg; not used by the front-end.
    Plusarg,
    /// Command-line argument for a simulation binary; not used here.
    Cmdlinearg,
    /// VHDL generic; not used here.
    Generic,
    /// Unknown parameter kinds are carried but ignored.
    #[serde(other)]
    Other,
}

/// A project parameter declaration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Parameter {
    /// Declared datatype (`bool`, `int`, `real`, `str`, `file`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
    /// Parameter kind.
    pub paramtype: ParamType,
    /// Value used when no override is supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<ParamValue>,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Value of a define or parameter.
///
/// Renders the way the front-end expects on its command line: booleans as
/// `1`/`0`, strings verbatim and integers exactly in decimal. Reals use the
/// shortest round-trip digits with a signed, two-digit exponent outside
/// `1e-4..1e16` (`1e+16`, `1.5e-05`).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Unsigned integer too large for [`ParamValue::Int`].
    UInt(u64),
    /// Floating point value.
    Float(f64),
    /// String value.
    Str(String),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(true) => f.write_str("1"),
            Self::Bool(false) => f.write_str("0"),
            Self::Int(value) => write!(f, "{value}"),
            Self::UInt(value) => write!(f, "{value}"),
            Self::Float(value) => f.write_str(&format_real(*value)),
            Self::Str(value) => f.write_str(value),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

fn format_real(value: f64) -> String {
    if value.is_nan() {
        return String::from("nan");
    }
    let text = format!("{value:?}");
    let Some((mantissa, exponent)) = text.split_once('e') else {
        return text;
    };
    let (sign, digits) = exponent
        .strip_prefix('-')
        .map_or(('+', exponent), |digits| ('-', digits));
    format!("{mantissa}e{sign}{digits:0>2}")
}

/// Per-tool option tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ToolOptions {
    /// Options for the `slang` front-end.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slang: Option<SlangToolOptions>,
}

/// Options recognised for the `slang` front-end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SlangToolOptions {
    /// Requested run mode; the first entry wins when a list is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<OneOrMany>,
    /// Extra arguments forwarded verbatim after whitespace splitting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slang_options: Option<OneOrMany>,
}

/// A tool option written either as a single string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum OneOrMany {
    /// A single string.
    One(String),
    /// A list of strings.
    Many(Vec<String>),
}

impl OneOrMany {
    /// Returns the first entry, if any.
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        match self {
            Self::One(value) => Some(value),
            Self::Many(values) => values.first().map(String::as_str),
        }
    }

    /// Joins all entries with single spaces.
    #[must_use]
    pub fn joined(&self) -> String {
        match self {
            Self::One(value) => value.clone(),
            Self::Many(values) => values.join(" "),
        }
    }
}

/// Mode the front-end runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Lint all files without elaborating output.
    Lint,
    /// Preprocess all files into a single output.
    Preprocess,
}

impl RunMode {
    /// Interprets a mode string from the project tool options.
    ///
    /// Unrecognised values yield `None`; they are not an error.
    #[must_use]
    pub fn from_option(value: &str) -> Option<Self> {
        match value {
            "lint" => Some(Self::Lint),
            "preprocess" => Some(Self::Preprocess),
            _ => None,
        }
    }
}

impl SlangToolOptions {
    /// Resolves the configured run mode, ignoring unknown values.
    #[must_use]
    pub fn run_mode(&self) -> Option<RunMode> {
        let raw = self.mode.as_ref()?.first()?;
        let mode = RunMode::from_option(raw);
        if mode.is_none() && !raw.trim().is_empty() {
            tracing::debug!(mode = raw, "ignoring unrecognised slang mode");
        }
        mode
    }

    /// Returns the extra options as one whitespace-separated string.
    #[must_use]
    pub fn extra_options(&self) -> String {
        self.slang_options
            .as_ref()
            .map(OneOrMany::joined)
            .unwrap_or_default()
    }
}

impl Project {
    /// Returns the `slang` tool options, or empty defaults.
    #[must_use]
    pub fn slang_options(&self) -> SlangToolOptions {
        self.tool_options.slang.clone().unwrap_or_default()
    }

    /// Defines with a default value, in declaration order.
    #[must_use]
    pub fn defines(&self) -> IndexMap<String, ParamValue> {
        self.values_of(ParamType::Vlogdefine)
    }

    /// Verilog parameters with a default value, in declaration order.
    #[must_use]
    pub fn params(&self) -> IndexMap<String, ParamValue> {
        self.values_of(ParamType::Vlogparam)
    }

    fn values_of(&self, kind: ParamType) -> IndexMap<String, ParamValue> {
        self.parameters
            .iter()
            .filter(|(_, param)| param.paramtype == kind)
            .filter_map(|(name, param)| {
                param
                    .default
                    .as_ref()
                    .map(|value| (name.clone(), value.clone()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests;
