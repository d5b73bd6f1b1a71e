//! Diagnostics tests for the IDE layer.

use dscript::ide::diagnostics::codes;
use dscript::ide::{AnalysisHost, Diagnostic, Severity};

use crate::helpers::source_fixtures::*;

fn diagnostics(source: &str) -> Vec<Diagnostic> {
    let host = AnalysisHost::new();
    host.set_document("file:///d.ds", source, 1)
        .expect("commit")
        .diagnostics()
}

#[test]
fn test_fixtures_are_clean() {
    for source in [SIMPLE_CLASS, SIMPLE_INTERFACE, SIMPLE_ENUM, GREETER, FULL_FEATURES] {
        assert_eq!(diagnostics(source), vec![], "{source}");
    }
}

#[test]
fn test_syntax_error_position() {
    let result = diagnostics("class A\nfunc void f(int\nend\nend\n");
    let first = result.first().expect("diagnostic");
    assert_eq!(first.severity, Severity::Error);
    assert_eq!(first.code.as_deref(), Some(codes::SYNTAX_ERROR));
    assert_eq!(first.span.start.line, 1);
}

#[test]
fn test_diagnostics_are_ordered() {
    let result = diagnostics("public protected class A\nfunc void f(\nend\nend\n");
    assert!(result.len() >= 2);
    for pair in result.windows(2) {
        assert!(pair[0].range.start() <= pair[1].range.start());
    }
}
