//! The CST preserves every byte of the input.

use dscript::parser::{SyntaxKind, parse, tokenize};
use rstest::rstest;

use crate::helpers::source_fixtures::*;

#[rstest]
#[case::class(SIMPLE_CLASS)]
#[case::interface(SIMPLE_INTERFACE)]
#[case::enumeration(SIMPLE_ENUM)]
#[case::greeter(GREETER)]
#[case::full(FULL_FEATURES)]
fn test_fixture_parses_cleanly(#[case] source: &str) {
    let parse = parse(source);
    assert!(parse.ok(), "unexpected errors: {:?}", parse.errors);
    assert_eq!(parse.syntax().to_string(), source);
}

#[rstest]
#[case("class A\nfunc void f(\nend\n")]
#[case("enum\n= 3\nend")]
#[case(")(*&^%$")]
#[case("/** unterminated")]
#[case("\"open string\nclass B\nend\n")]
fn test_broken_input_round_trips(#[case] source: &str) {
    assert_eq!(parse(source).syntax().to_string(), source);
}

#[test]
fn test_root_is_script() {
    assert_eq!(parse(GREETER).syntax().kind(), SyntaxKind::SCRIPT);
}

#[test]
fn test_doc_comment_is_a_token() {
    let kinds: Vec<_> = tokenize("/** Doc. */\n/* plain */ // line\n")
        .into_iter()
        .map(|t| t.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::DOC_COMMENT,
            SyntaxKind::NEWLINE,
            SyntaxKind::BLOCK_COMMENT,
            SyntaxKind::WHITESPACE,
            SyntaxKind::LINE_COMMENT,
            SyntaxKind::NEWLINE,
        ]
    );
}

#[rstest]
#[case("42", SyntaxKind::INTEGER)]
#[case("1.5", SyntaxKind::FLOAT)]
#[case("0hFF", SyntaxKind::HEX)]
#[case("'a'", SyntaxKind::CHARACTER)]
#[case("\"text\"", SyntaxKind::STRING)]
#[case("<<=", SyntaxKind::SHL_EQ)]
#[case("castable", SyntaxKind::CASTABLE_KW)]
#[case("downto", SyntaxKind::DOWNTO_KW)]
fn test_single_token(#[case] text: &str, #[case] kind: SyntaxKind) {
    let tokens = tokenize(text);
    assert_eq!(tokens.len(), 1, "{tokens:?}");
    assert_eq!(tokens[0].kind, kind);
    assert_eq!(tokens[0].text, text);
}
