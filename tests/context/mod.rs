//! Context tree tests
//!
//! Tests for:
//! - Function classification and constructor delegation
//! - Declarations, qualified names and documentation
//! - Statements and expressions
//! - Tree dumps and disposal

pub mod tests_declarations;
pub mod tests_functions;
pub mod tests_statements;
