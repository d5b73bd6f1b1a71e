//! Semantic tokens tests for the IDE layer.

use dscript::ide::{
    AnalysisHost, DroppedTokens, TokenModifier, TokenOptions, TokenType, encode, legend,
    semantic_tokens_with_dropped,
};
use rstest::rstest;

use crate::helpers::source_fixtures::*;

fn tokens(source: &str) -> Vec<dscript::ide::SemanticToken> {
    let host = AnalysisHost::new();
    host.set_document("file:///t.ds", source, 1)
        .expect("commit")
        .semantic_tokens()
}

// =============================================================================
// SEMANTIC TOKENS - ORDER
// =============================================================================

/// Tokens of `source` with what the builder refused on the way
fn tokens_with_dropped(source: &str) -> (Vec<dscript::ide::SemanticToken>, DroppedTokens) {
    let host = AnalysisHost::new();
    let doc = host.set_document("file:///t.ds", source, 1).expect("commit");
    semantic_tokens_with_dropped(doc.script(), doc.line_index(), &TokenOptions::default())
}

#[rstest]
#[case(GREETER, 0)]
#[case(FULL_FEATURES, 1)]
#[case(SIMPLE_ENUM, 0)]
fn test_emitter_walks_in_source_order(#[case] source: &str, #[case] duplicates: usize) {
    let (tokens, dropped) = tokens_with_dropped(source);
    assert!(!tokens.is_empty());
    assert_eq!(dropped.out_of_order, 0, "{tokens:?}");
    assert_eq!(dropped.duplicates, duplicates);
}

#[test]
fn test_emitter_order_with_nested_expressions() {
    let source = "class A\nfunc int f(int a)\nvar Block b = block int x\nreturn x * a\nend\nreturn a if a > 0 else -a + f(a.abs()) cast int\nend\nend\n";
    let (tokens, dropped) = tokens_with_dropped(source);
    assert_eq!(dropped, DroppedTokens::default());
    assert!(tokens.len() > 10);
}

#[test]
fn test_tokens_are_strictly_increasing() {
    for source in [GREETER, FULL_FEATURES, SIMPLE_ENUM] {
        let tokens = tokens(source);
        assert!(!tokens.is_empty());
        for pair in tokens.windows(2) {
            assert!(
                (pair[0].line, pair[0].col) < (pair[1].line, pair[1].col),
                "{pair:?}"
            );
        }
    }
}

#[test]
fn test_tokens_have_positive_length() {
    for token in tokens(FULL_FEATURES) {
        assert!(token.length > 0);
    }
}

#[test]
fn test_truncated_documents_keep_order() {
    let mut end = 0;
    while end <= FULL_FEATURES.len() {
        let tokens = tokens(&FULL_FEATURES[..end]);
        for pair in tokens.windows(2) {
            assert!((pair[0].line, pair[0].col) < (pair[1].line, pair[1].col));
        }
        end += 11;
    }
}

// =============================================================================
// SEMANTIC TOKENS - TYPES
// =============================================================================

#[test]
fn test_greeter_token_types() {
    let tokens = tokens(GREETER);
    let find = |line: u32, col: u32| {
        tokens
            .iter()
            .find(|t| t.line == line && t.col == col)
            .unwrap_or_else(|| panic!("no token at {line}:{col}"))
    };
    // namespace Demo
    assert_eq!(find(0, 10).token_type, TokenType::Namespace);
    // class Greeter
    let class = find(3, 6);
    assert_eq!(class.token_type, TokenType::Class);
    assert_ne!(class.modifiers & TokenModifier::Declaration.bit(), 0);
    // private var String greeting
    assert_eq!(find(4, 16).token_type, TokenType::Class);
    assert_ne!(
        find(4, 16).modifiers & TokenModifier::DefaultLibrary.bit(),
        0
    );
    assert_eq!(find(4, 23).token_type, TokenType::Property);
    // func new(String greeting)
    assert_eq!(find(10, 9).token_type, TokenType::Method);
    assert_eq!(find(10, 20).token_type, TokenType::Parameter);
    // @param greeting inside the documentation
    let documented = find(8, 14);
    assert_eq!(documented.token_type, TokenType::Parameter);
    assert_eq!(documented.modifiers, TokenModifier::Documentation.bit());
}

#[test]
fn test_string_constant_and_operators() {
    let tokens = tokens(GREETER);
    assert!(tokens.iter().any(|t| t.token_type == TokenType::String));
    assert!(tokens.iter().any(|t| t.token_type == TokenType::Operator));
}

#[test]
fn test_legend_and_encoding() {
    let legend = legend();
    assert_eq!(legend.token_types[TokenType::Parameter.to_lsp_index() as usize], "parameter");
    let tokens = tokens(SIMPLE_CLASS);
    assert_eq!(encode(&tokens), vec![0, 6, 7, TokenType::Class.to_lsp_index(), 1]);
}
