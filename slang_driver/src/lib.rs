//! Drive the slang SystemVerilog front-end from a project description.
//!
//! The crate turns a declarative project (files, defines, parameters,
//! top-level module and tool options) into the command line expected by
//! `slang`, then runs the tool and reports failure with a fixed message.

pub mod cli;
pub mod error;
pub mod flags;
pub mod job;
pub mod options;
pub mod project;
pub mod tool;

#[cfg(test)]
pub mod test_support;
