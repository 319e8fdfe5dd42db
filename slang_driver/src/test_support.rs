//! Shared helpers for unit tests within the `slang_driver` crate.
//! Re-exports the workspace-wide figment utilities so tests depend on a
//! single implementation.

pub use test_helpers::figment::{figment_error, with_jail};
