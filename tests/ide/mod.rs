//! IDE feature tests
//!
//! Tests for:
//! - Semantic tokens
//! - Hover information
//! - Document symbols
//! - Diagnostics
//! - The analysis host

pub mod tests_diagnostics;
pub mod tests_host;
pub mod tests_hover;
pub mod tests_semantic_tokens;
pub mod tests_symbols;
