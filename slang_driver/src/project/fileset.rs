//! Resolution of project files into sources and include directories.

use camino::Utf8Path;

use super::{FileType, Project};

/// A non-include file handed to the front-end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path as written in the project description.
    pub name: String,
    /// Classified file type.
    pub file_type: FileType,
}

impl SourceFile {
    /// Creates a descriptor from a path and raw type tag.
    #[must_use]
    pub fn new(name: impl Into<String>, tag: &str) -> Self {
        Self {
            name: name.into(),
            file_type: FileType::classify(tag),
        }
    }
}

/// Files of a project split into sources and include directories.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fileset {
    /// Non-include files in declaration order.
    pub sources: Vec<SourceFile>,
    /// Include directories, deduplicated in first-seen order.
    pub include_dirs: Vec<String>,
}

impl Project {
    /// Splits the project files into sources and include directories.
    ///
    /// An include file contributes its `include_path`, or else its parent
    /// directory, or `.` when the name has no directory component.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use slang_driver::project::{FileEntry, FileType, Project};
    ///
    /// let project = Project {
    ///     files: vec![
    ///         FileEntry {
    ///             name: String::from("rtl/defs.svh"),
    ///             file_type: FileType::classify("systemVerilogSource"),
    ///             is_include_file: true,
    ///             ..FileEntry::default()
    ///         },
    ///         FileEntry {
    ///             name: String::from("rtl/top.sv"),
    ///             file_type: FileType::classify("systemVerilogSource"),
    ///             ..FileEntry::default()
    ///         },
    ///     ],
    ///     ..Project::default()
    /// };
    /// let fileset = project.fileset();
    /// assert_eq!(fileset.include_dirs, vec![String::from("rtl")]);
    /// assert_eq!(fileset.sources.len(), 1);
    /// ```
    #[must_use]
    pub fn fileset(&self) -> Fileset {
        let mut fileset = Fileset::default();
        for entry in &self.files {
            if entry.is_include_file {
                let dir = include_dir(&entry.name, entry.include_path.as_deref());
                if !fileset.include_dirs.contains(&dir) {
                    fileset.include_dirs.push(dir);
                }
            } else {
                fileset.sources.push(SourceFile {
                    name: entry.name.clone(),
                    file_type: entry.file_type.clone(),
                });
            }
        }
        tracing::debug!(
            sources = fileset.sources.len(),
            include_dirs = fileset.include_dirs.len(),
            "resolved fileset"
        );
        fileset
    }
}

fn include_dir(name: &str, include_path: Option<&str>) -> String {
    if let Some(path) = include_path.filter(|path| !path.is_empty()) {
        return path.to_owned();
    }
    Utf8Path::new(name)
        .parent()
        .map(Utf8Path::as_str)
        .filter(|parent| !parent.is_empty())
        .unwrap_or(".")
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::include_dir;
    use rstest::rstest;

    #[rstest]
    #[case("rtl/pkg.svh", None, "rtl")]
    #[case("a/b/c.vh", None, "a/b")]
    #[case("defs.svh", None, ".")]
    #[case("rtl/pkg.svh", Some("include"), "include")]
    #[case("rtl/pkg.svh", Some(""), "rtl")]
    fn derives_include_directory(
        #[case] name: &str,
        #[case] include_path: Option<&str>,
        #[case] expected: &str,
    ) {
        assert_eq!(include_dir(name, include_path), expected);
    }
}
