//! Error recovery keeps later declarations intact.

use dscript::parser::{AstNode, parse};

#[test]
fn test_error_inside_function_keeps_next_class() {
    let source = "class A\nfunc void f()\nreturn (\nend\nend\nclass B\nend\n";
    let parse = parse(source);
    assert!(!parse.ok());
    let script = parse.script();
    assert!(script.syntax().text_range().len() > 0.into());
    let text = parse.syntax().to_string();
    assert!(text.ends_with("class B\nend\n"));
}

#[test]
fn test_errors_carry_ranges_inside_document() {
    let source = "class A\nfunc void f(int\nend\n";
    let parse = parse(source);
    assert!(!parse.errors.is_empty());
    for error in &parse.errors {
        assert!(u32::from(error.range.end()) <= source.len() as u32);
        assert!(!error.message.is_empty());
    }
}

#[test]
fn test_empty_document() {
    let parse = parse("");
    assert!(parse.ok());
    assert_eq!(parse.syntax().to_string(), "");
}
