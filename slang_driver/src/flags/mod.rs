//! Assembly of the front-end command line.
//!
//! Flags are appended in a fixed phase order: defines, parameters, files,
//! user options, mode flags and finally the top-level module. The builder is
//! scoped to one invocation and yields an immutable [`FlagSequence`].

use std::fmt;

use crate::job::SlangJob;
use crate::project::{Fileset, ParamValue, RunMode};

/// Ordered command-line tokens for one front-end run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagSequence(Vec<String>);

impl FlagSequence {
    /// Tokens in argv order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no tokens were produced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the sequence, returning the tokens.
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl fmt::Display for FlagSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.0 {
            writeln!(f, "{token}")?;
        }
        Ok(())
    }
}

/// Accumulates front-end flags phase by phase.
#[derive(Debug, Default)]
pub struct FlagBuilder {
    tokens: Vec<String>,
}

impl FlagBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub const fn new() -> Self {
        Self { tokens: Vec::new() }
    }

    /// Appends one `-D KEY=VALUE` token per define.
    pub fn add_defines<'a, I>(&mut self, defines: I) -> &mut Self
    where
        I: IntoIterator<Item = (&'a String, &'a ParamValue)>,
    {
        for (key, value) in defines {
            self.tokens.push(format!("-D {key}={value}"));
        }
        self
    }

    /// Appends one `-G KEY=VALUE` token per parameter.
    pub fn add_params<'a, I>(&mut self, params: I) -> &mut Self
    where
        I: IntoIterator<Item = (&'a String, &'a ParamValue)>,
    {
        for (key, value) in params {
            self.tokens.push(format!("-G {key}={value}"));
        }
        self
    }

    /// Appends include directories, source files and waiver files.
    ///
    /// Every include directory becomes an `-I <dir>` pair. Source and waiver
    /// files are emitted in declaration order; waivers as
    /// `--waiver-file <path>` pairs. Files of other types are skipped.
    pub fn add_files(&mut self, fileset: &Fileset) -> &mut Self {
        for dir in &fileset.include_dirs {
            self.tokens.push(String::from("-I"));
            self.tokens.push(dir.clone());
        }
        for file in &fileset.sources {
            if file.file_type.is_source() {
                self.tokens.push(file.name.clone());
            } else if file.file_type.is_waiver() {
                self.tokens.push(String::from("--waiver-file"));
                self.tokens.push(file.name.clone());
            }
        }
        self
    }

    /// Splits `options` on whitespace and appends each token verbatim.
    pub fn add_user_options(&mut self, options: &str) -> &mut Self {
        self.tokens.extend(options.split_whitespace().map(str::to_owned));
        self
    }

    /// Appends the flags selecting `mode`; nothing when no mode is set.
    pub fn add_mode_flags(&mut self, mode: Option<RunMode>) -> &mut Self {
        match mode {
            Some(RunMode::Lint) => self.tokens.extend([
                String::from("--lint-only"),
                String::from("--print-unused-waivers"),
            ]),
            Some(RunMode::Preprocess) => self.tokens.push(String::from("--preprocess")),
            None => {}
        }
        self
    }

    /// Appends `--top <name>` when a top-level module is named.
    pub fn add_top_flag(&mut self, toplevel: &str) -> &mut Self {
        if !toplevel.is_empty() {
            self.tokens.push(String::from("--top"));
            self.tokens.push(toplevel.to_owned());
        }
        self
    }

    /// Finishes the build, returning the accumulated tokens.
    #[must_use]
    pub fn finish(self) -> FlagSequence {
        FlagSequence(self.tokens)
    }
}

/// Runs every phase over `job` in the fixed order.
///
/// # Examples
///
/// ```rust
/// use slang_driver::flags::build_flags;
/// use slang_driver::job::SlangJob;
/// use slang_driver::project::RunMode;
///
/// let job = SlangJob {
///     mode: Some(RunMode::Preprocess),
///     toplevel: String::from("top_module"),
///     ..SlangJob::default()
/// };
/// let flags = build_flags(&job);
/// assert_eq!(flags.as_slice(), ["--preprocess", "--top", "top_module"]);
/// ```
#[must_use]
pub fn build_flags(job: &SlangJob) -> FlagSequence {
    let mut builder = FlagBuilder::new();
    builder
        .add_defines(&job.defines)
        .add_params(&job.params)
        .add_files(&job.fileset)
        .add_user_options(&job.extra_options)
        .add_mode_flags(job.mode)
        .add_top_flag(&job.toplevel);
    let flags = builder.finish();
    tracing::debug!(tokens = flags.len(), "assembled slang flags");
    flags
}
