//! IDE features — High-level APIs for LSP handlers.
//!
//! This module provides the interface between the context tree and a
//! language server. Each function corresponds to an LSP request.
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: Take data in, return data out
//! 2. **No LSP types**: Uses our own types, converted at LSP boundary
//! 3. **Snapshots**: Queries read immutable per-document analyses
//!
//! ## Usage
//!
//! The recommended way to use this module is through `AnalysisHost`:
//!
//! ```ignore
//! use dscript::ide::AnalysisHost;
//!
//! let host = AnalysisHost::new();
//! host.set_document("file:///test.ds", "class Test\nend\n", 1)?;
//!
//! let symbols = host.document_symbols("file:///test.ds")?;
//! ```

mod analysis;
pub mod diagnostics;
mod hover;
pub mod semantic_tokens;
mod symbols;

pub use analysis::{
    AnalysisConfig, AnalysisError, AnalysisHost, DocumentAnalysis, DocumentProvider,
};
pub use diagnostics::{Diagnostic, Severity, collect_diagnostics};
pub use hover::{HoverResult, hover};
pub use semantic_tokens::{
    DroppedTokens, SemanticToken, SemanticTokensBuilder, SemanticTokensLegend, TOKEN_MODIFIERS,
    TOKEN_TYPES, TokenModifier, TokenOptions, TokenType, encode, legend, semantic_tokens,
    semantic_tokens_with_dropped,
};
pub use symbols::{DocumentSymbol, SymbolKind, document_symbols};
