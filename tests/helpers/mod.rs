//! Shared helpers for integration tests

pub mod context_helpers;
pub mod source_fixtures;
