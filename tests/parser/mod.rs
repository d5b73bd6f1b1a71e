//! Parser integration tests
//!
//! Tests for:
//! - Lossless round trips
//! - Error recovery
//! - Lexing of literals and operators

pub mod tests_lossless;
pub mod tests_recovery;
