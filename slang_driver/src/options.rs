//! Self-description of the `slang` tool options a project may set.

use std::fmt::Write as _;

/// One recognised entry under `tool_options.slang`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolOptionDoc {
    /// Option key.
    pub name: &'static str,
    /// Value type as written in project descriptions.
    pub kind: &'static str,
    /// Human-readable summary.
    pub description: &'static str,
}

/// Summary of the wrapped front-end.
pub const TOOL_DESCRIPTION: &str = concat!(
    "slang is a software library that provides various components for ",
    "lexing, parsing, type checking, and elaborating SystemVerilog code."
);

/// Options recognised under `tool_options.slang`.
pub const TOOL_OPTIONS: &[ToolOptionDoc] = &[
    ToolOptionDoc {
        name: "mode",
        kind: "String",
        description: "choose slang to run in either lint mode or preprocess mode",
    },
    ToolOptionDoc {
        name: "slang_options",
        kind: "String",
        description: "extra options for slang",
    },
];

/// Renders the tool description and option table as plain text.
#[must_use]
pub fn render_options() -> String {
    let width = TOOL_OPTIONS
        .iter()
        .map(|option| option.name.len())
        .max()
        .unwrap_or_default();
    let mut out = format!("{TOOL_DESCRIPTION}\n\nOptions (tool_options.slang):\n");
    for option in TOOL_OPTIONS {
        // Writing into a String cannot fail.
        let _ignored = writeln!(
            out,
            "  {name:<width$}  {kind:<6}  {description}",
            name = option.name,
            kind = option.kind,
            description = option.description,
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_option() {
        let text = render_options();
        assert!(text.starts_with("slang is a software library"));
        assert!(text.contains(
            "  mode           String  choose slang to run in either lint mode or preprocess mode\n"
        ));
        assert!(text.contains("  slang_options  String  extra options for slang\n"));
    }
}
