//! Symbol listing for the document outline.

use std::sync::Arc;

use text_size::TextRange;

use crate::base::{LineIndex, Span};
use crate::context::{Context, ContextNode, ContextScript, FunctionType, Identifier};

/// Kind of an outline entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SymbolKind {
    Namespace,
    Class,
    Interface,
    Enum,
    EnumMember,
    Field,
    Constructor,
    Method,
    Operator,
}

impl SymbolKind {
    /// Convert to LSP `SymbolKind` number.
    pub fn to_lsp(self) -> u32 {
        match self {
            SymbolKind::Namespace => 3,
            SymbolKind::Class => 5,
            SymbolKind::Method => 6,
            SymbolKind::Field => 8,
            SymbolKind::Constructor => 9,
            SymbolKind::Enum => 10,
            SymbolKind::Interface => 11,
            SymbolKind::EnumMember => 22,
            SymbolKind::Operator => 25,
        }
    }
}

/// A symbol for the document outline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentSymbol {
    /// Symbol name.
    pub name: Arc<str>,
    /// Signature or type shown next to the name.
    pub detail: Option<String>,
    /// Symbol kind.
    pub kind: SymbolKind,
    /// Span of the whole declaration.
    pub range: Span,
    /// Span of the name (falls back to the whole declaration).
    pub selection_range: Span,
    /// Nested declarations.
    pub children: Vec<DocumentSymbol>,
}

/// Get the nested outline of a document.
///
/// Declarations without a source range (placeholders of broken input) are
/// left out; their nested declarations are still listed in their place.
pub fn document_symbols(script: &ContextScript, line_index: &LineIndex) -> Vec<DocumentSymbol> {
    let mut out = Vec::new();
    for member in &script.members {
        collect(member, line_index, &mut out);
    }
    out
}

fn collect(context: &Context, line_index: &LineIndex, out: &mut Vec<DocumentSymbol>) {
    let (name, detail, kind, members): (&str, Option<String>, SymbolKind, &[Context]) =
        match context {
            Context::Namespace(c) => (
                c.name.name(),
                None,
                SymbolKind::Namespace,
                c.members.as_slice(),
            ),
            Context::Class(c) => (
                c.name.name(),
                c.extends.as_ref().map(|t| format!("extends {t}")),
                SymbolKind::Class,
                c.members.as_slice(),
            ),
            Context::Interface(c) => (
                c.name.name(),
                None,
                SymbolKind::Interface,
                c.members.as_slice(),
            ),
            Context::Enumeration(c) => {
                let Some(range) = c.range() else { return };
                let children = c
                    .entries
                    .iter()
                    .filter_map(|entry| {
                        let range = entry.range()?;
                        Some(symbol(
                            entry.name.name(),
                            None,
                            SymbolKind::EnumMember,
                            range,
                            &entry.name,
                            Vec::new(),
                            line_index,
                        ))
                    })
                    .collect();
                out.push(symbol(
                    c.name.name(),
                    None,
                    SymbolKind::Enum,
                    range,
                    &c.name,
                    children,
                    line_index,
                ));
                return;
            }
            Context::ClassVariable(c) => {
                if let Some(range) = c.range() {
                    out.push(symbol(
                        c.name.name(),
                        Some(c.type_name.to_string()),
                        SymbolKind::Field,
                        range,
                        &c.name,
                        Vec::new(),
                        line_index,
                    ));
                }
                return;
            }
            Context::Function(c) => {
                let kind = match c.function_type {
                    FunctionType::Constructor => SymbolKind::Constructor,
                    FunctionType::Operator => SymbolKind::Operator,
                    FunctionType::Destructor | FunctionType::Regular => SymbolKind::Method,
                };
                if let Some(range) = c.range() {
                    out.push(symbol(
                        c.name.name(),
                        Some(c.signature()),
                        kind,
                        range,
                        &c.name,
                        Vec::new(),
                        line_index,
                    ));
                }
                return;
            }
            _ => return,
        };

    let mut children = Vec::new();
    for member in members {
        collect(member, line_index, &mut children);
    }
    match context.range() {
        Some(range) => {
            let selection = match context {
                Context::Namespace(c) => c.name.range(),
                Context::Class(c) => c.name.range(),
                Context::Interface(c) => c.name.range(),
                _ => None,
            };
            let range_span = line_index.span(range);
            out.push(DocumentSymbol {
                name: Arc::from(name),
                detail,
                kind,
                range: range_span,
                selection_range: selection.map_or(range_span, |r| line_index.span(r)),
                children,
            });
        }
        None => out.extend(children),
    }
}

fn symbol(
    name: &str,
    detail: Option<String>,
    kind: SymbolKind,
    range: TextRange,
    name_ident: &Identifier,
    children: Vec<DocumentSymbol>,
    line_index: &LineIndex,
) -> DocumentSymbol {
    let range_span = line_index.span(range);
    DocumentSymbol {
        name: Arc::from(name),
        detail,
        kind,
        range: range_span,
        selection_range: name_ident
            .range()
            .map_or(range_span, |r| line_index.span(r)),
        children,
    }
}
