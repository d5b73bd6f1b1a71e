//! Hover tests for the IDE layer.

use dscript::Position;
use dscript::ide::AnalysisHost;

use crate::helpers::source_fixtures::*;

const URI: &str = "file:///greeter.ds";

fn host_with(source: &str) -> AnalysisHost {
    let host = AnalysisHost::new();
    host.set_document(URI, source, 1).expect("commit");
    host
}

#[test]
fn test_hover_on_class_name() {
    let host = host_with(GREETER);
    let hover = host
        .hover(URI, Position::new(3, 8))
        .expect("open")
        .expect("hover");
    assert!(hover.contents.contains("class Demo.Greeter"));
    assert!(hover.contents.contains("Greets people."));
    assert_eq!(hover.span.start, Position::new(3, 6));
    assert_eq!(hover.span.end, Position::new(3, 13));
}

#[test]
fn test_hover_on_constructor_argument_shows_param_doc() {
    let host = host_with(GREETER);
    let hover = host
        .hover(URI, Position::new(10, 22))
        .expect("open")
        .expect("hover");
    assert!(hover.contents.contains("String greeting"));
    assert!(hover.contents.contains("Text put before every name."));
}

#[test]
fn test_hover_on_method_signature() {
    let host = host_with(GREETER);
    let hover = host
        .hover(URI, Position::new(14, 17))
        .expect("open")
        .expect("hover");
    assert!(hover.contents.contains("func String greet(String name)"));
}

#[test]
fn test_no_hover_on_whitespace() {
    let host = host_with(GREETER);
    assert_eq!(host.hover(URI, Position::new(1, 0)).expect("open"), None);
}

#[test]
fn test_hover_outside_document() {
    let host = host_with(SIMPLE_CLASS);
    assert_eq!(host.hover(URI, Position::new(40, 0)).expect("open"), None);
}
