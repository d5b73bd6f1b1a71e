//! Foundation types for the DragonScript toolchain.
//!
//! This module provides fundamental types used throughout the library:
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`LineIndex`] - Offset to line/column conversion
//! - [`Position`], [`Span`] - Line/column positions for LSP consumers
//!
//! This module has NO dependencies on other dscript modules.

mod line_index;
mod position;

pub use line_index::LineIndex;
pub use position::{Position, Span};

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};
