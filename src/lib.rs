//! # dscript-base
//!
//! Core analysis library for DragonScript: lossless parsing, the context tree
//! and the queries a language server answers from it.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → IDE features (semantic tokens, hover, symbols, diagnostics)
//!   ↓
//! context   → Context tree built from the typed AST
//!   ↓
//! parser    → Logos lexer, recursive-descent parser, typed AST
//!   ↓
//! base      → Primitives (LineIndex, Position, Span, TextRange)
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → context → ide)
// ============================================================================

/// Foundation types: LineIndex, Position, TextRange
pub mod base;

/// Parser: Logos lexer, recursive-descent parser, typed AST
pub mod parser;

/// Context tree: declarations, functions, statements, expressions, documentation
pub mod context;

/// IDE features: semantic tokens, hover, document symbols, diagnostics
pub mod ide;

// Re-export foundation types
pub use base::{LineIndex, Position, Span, TextRange, TextSize};

// Re-export the entry points
pub use context::{BuildOptions, Context, ContextKind, ContextNode, ContextScript, build_script};
pub use ide::{AnalysisConfig, AnalysisError, AnalysisHost, DocumentAnalysis, DocumentProvider};
pub use parser::{Parse, SyntaxError, parse};
