//! Classification of project file type tags.

use std::fmt;

/// Category of a file listed in a project description.
///
/// Tags are matched by prefix so versioned tags such as
/// `systemVerilogSource-2017` classify alongside the bare tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FileType {
    /// `verilogSource`, optionally suffixed with a language version.
    VerilogSource(String),
    /// `systemVerilogSource`, optionally suffixed with a language version.
    SystemVerilogSource(String),
    /// A slang lint waiver file.
    SlangWaiver(String),
    /// Any tag the front-end does not consume.
    Other(String),
}

impl FileType {
    /// Classifies a raw file type tag.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use slang_driver::project::FileType;
    ///
    /// assert!(FileType::classify("systemVerilogSource-2017").is_source());
    /// assert!(FileType::classify("slangWaiver").is_waiver());
    /// assert_eq!(
    ///     FileType::classify("vhdlSource"),
    ///     FileType::Other(String::from("vhdlSource"))
    /// );
    /// ```
    #[must_use]
    pub fn classify(tag: &str) -> Self {
        let owned = tag.to_owned();
        if tag.starts_with("systemVerilogSource") {
            Self::SystemVerilogSource(owned)
        } else if tag.starts_with("verilogSource") {
            Self::VerilogSource(owned)
        } else if tag.starts_with("slangWaiver") {
            Self::SlangWaiver(owned)
        } else {
            Self::Other(owned)
        }
    }

    /// Returns the tag exactly as written in the project description.
    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            Self::VerilogSource(tag)
            | Self::SystemVerilogSource(tag)
            | Self::SlangWaiver(tag)
            | Self::Other(tag) => tag,
        }
    }

    /// Whether the file is passed to the tool as a source file.
    #[must_use]
    pub const fn is_source(&self) -> bool {
        matches!(self, Self::VerilogSource(_) | Self::SystemVerilogSource(_))
    }

    /// Whether the file is passed to the tool as a waiver file.
    #[must_use]
    pub const fn is_waiver(&self) -> bool {
        matches!(self, Self::SlangWaiver(_))
    }
}

impl Default for FileType {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for FileType {
    fn from(tag: String) -> Self {
        Self::classify(&tag)
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
