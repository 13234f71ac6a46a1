//! Shared test helpers.

pub mod run_helpers;
pub mod source_fixtures;
