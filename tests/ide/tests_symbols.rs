//! Document symbol tests for the IDE layer.

use dscript::ide::{AnalysisHost, DocumentSymbol, SymbolKind};

use crate::helpers::source_fixtures::*;

fn symbols(source: &str) -> Vec<DocumentSymbol> {
    let host = AnalysisHost::new();
    host.set_document("file:///s.ds", source, 1)
        .expect("commit")
        .document_symbols()
}

fn flatten(symbols: &[DocumentSymbol], depth: usize, out: &mut Vec<(usize, String, SymbolKind)>) {
    for symbol in symbols {
        out.push((depth, symbol.name.to_string(), symbol.kind));
        flatten(&symbol.children, depth + 1, out);
    }
}

#[test]
fn test_full_outline() {
    let mut flat = Vec::new();
    flatten(&symbols(FULL_FEATURES), 0, &mut flat);
    let expected = vec![
        (0, "Demo.Shapes", SymbolKind::Namespace),
        (1, "Shape", SymbolKind::Class),
        (2, "SIDES", SymbolKind::Field),
        (2, "CORNERS", SymbolKind::Field),
        (2, "scale", SymbolKind::Field),
        (2, "new", SymbolKind::Constructor),
        (2, "new", SymbolKind::Constructor),
        (2, "destructor", SymbolKind::Method),
        (2, "area", SymbolKind::Method),
        (2, "*", SymbolKind::Operator),
        (2, "size", SymbolKind::Method),
        (1, "Measurable", SymbolKind::Interface),
        (2, "area", SymbolKind::Method),
        (1, "Kind", SymbolKind::Enum),
        (2, "round", SymbolKind::EnumMember),
        (2, "angular", SymbolKind::EnumMember),
    ];
    let expected: Vec<_> = expected
        .into_iter()
        .map(|(d, n, k)| (d, n.to_string(), k))
        .collect();
    assert_eq!(flat, expected);
}

#[test]
fn test_selection_range_inside_range() {
    let mut stack = symbols(GREETER);
    while let Some(symbol) = stack.pop() {
        assert!(symbol.range.start <= symbol.selection_range.start);
        assert!(symbol.selection_range.end <= symbol.range.end);
        stack.extend(symbol.children);
    }
}

#[test]
fn test_empty_document_has_no_symbols() {
    assert!(symbols("").is_empty());
}
