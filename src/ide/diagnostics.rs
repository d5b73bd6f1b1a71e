//! Diagnostics — parse errors and declaration checks.
//!
//! Syntax errors are collected by the parser as data; this module turns them
//! into LSP-shaped diagnostics and adds a few checks that only need the
//! context tree.

use std::sync::Arc;

use text_size::TextRange;

use crate::base::{LineIndex, Span};
use crate::context::{ContextRef, ContextScript, TypeModifier, TypeModifierSet, walk_preorder};
use crate::parser::SyntaxError;

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    Error,
    Warning,
    Info,
    Hint,
}

impl Severity {
    /// Convert to LSP severity number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            Severity::Error => 1,
            Severity::Warning => 2,
            Severity::Info => 3,
            Severity::Hint => 4,
        }
    }
}

/// A diagnostic message with location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// Byte range in the document.
    pub range: TextRange,
    /// Line/column span (0-indexed, UTF-16 columns).
    pub span: Span,
    /// Severity level.
    pub severity: Severity,
    /// Error/warning code (e.g., "E0001").
    pub code: Option<Arc<str>>,
    /// The diagnostic message.
    pub message: Arc<str>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(range: TextRange, span: Span, message: impl Into<Arc<str>>) -> Self {
        Self {
            range,
            span,
            severity: Severity::Error,
            code: None,
            message: message.into(),
        }
    }

    /// Create a new warning diagnostic.
    pub fn warning(range: TextRange, span: Span, message: impl Into<Arc<str>>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(range, span, message)
        }
    }

    /// Set the diagnostic code.
    pub fn with_code(mut self, code: impl Into<Arc<str>>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Diagnostic codes.
pub mod codes {
    /// The parser could not match the grammar
    pub const SYNTAX_ERROR: &str = "E0001";
    /// More than one of `public`, `protected`, `private`
    pub const CONFLICTING_VISIBILITY: &str = "W0001";
    /// `abstract` together with `fixed` on one declaration
    pub const ABSTRACT_FIXED: &str = "W0002";
}

// ============================================================================
// COLLECTION
// ============================================================================

/// Convert parse errors into diagnostics.
pub fn syntax_diagnostics(errors: &[SyntaxError], line_index: &LineIndex) -> Vec<Diagnostic> {
    errors
        .iter()
        .map(|error| {
            Diagnostic::error(error.range, line_index.span(error.range), error.message.as_str())
                .with_code(codes::SYNTAX_ERROR)
        })
        .collect()
}

/// Modifier checks over every declaration of a context tree.
pub fn declaration_diagnostics(script: &ContextScript, line_index: &LineIndex) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    walk_preorder(script.into(), &mut |context| {
        let (modifiers, name) = match context {
            ContextRef::Class(c) => (c.modifiers, c.name.range()),
            ContextRef::Interface(c) => (c.modifiers, c.name.range()),
            ContextRef::Enumeration(c) => (c.modifiers, c.name.range()),
            ContextRef::ClassVariable(c) => (c.modifiers, c.name.range()),
            ContextRef::Function(c) => (c.modifiers, c.name.range()),
            _ => return,
        };
        let Some(range) = name.or_else(|| context.range()) else {
            return;
        };
        check_modifiers(modifiers, range, line_index, &mut out);
    });
    out
}

/// Every diagnostic of a document, ordered by position.
pub fn collect_diagnostics(
    errors: &[SyntaxError],
    script: &ContextScript,
    line_index: &LineIndex,
) -> Vec<Diagnostic> {
    let mut out = syntax_diagnostics(errors, line_index);
    out.extend(declaration_diagnostics(script, line_index));
    out.sort_by_key(|d| d.range.start());
    out
}

fn check_modifiers(
    modifiers: TypeModifierSet,
    range: TextRange,
    line_index: &LineIndex,
    out: &mut Vec<Diagnostic>,
) {
    let visibility = [
        TypeModifier::Public,
        TypeModifier::Protected,
        TypeModifier::Private,
    ]
    .into_iter()
    .filter(|m| modifiers.contains(*m))
    .count();
    if visibility > 1 {
        out.push(
            Diagnostic::warning(
                range,
                line_index.span(range),
                "conflicting visibility modifiers",
            )
            .with_code(codes::CONFLICTING_VISIBILITY),
        );
    }
    if modifiers.contains(TypeModifier::Abstract) && modifiers.contains(TypeModifier::Fixed) {
        out.push(
            Diagnostic::warning(
                range,
                line_index.span(range),
                "declaration cannot be both abstract and fixed",
            )
            .with_code(codes::ABSTRACT_FIXED),
        );
    }
}
