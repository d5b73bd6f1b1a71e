//! Function contexts built from class and interface members.

use dscript::context::{
    ContextKind, FunctionType, OPERATOR_TABLE, TypeModifier, TypeNameKind, resolve_operator,
};
use rstest::rstest;

use crate::helpers::context_helpers::*;
use crate::helpers::source_fixtures::FULL_FEATURES;

// =============================================================================
// CLASSIFICATION
// =============================================================================

#[test]
fn test_regular_function() {
    let script = build("class Foo\nfunc void greet()\nend\nend\n");
    let greet = function(&script, "greet");
    assert_eq!(greet.function_type, FunctionType::Regular);
    assert_eq!(
        greet.return_type.as_ref().map(|t| t.kind()),
        Some(TypeNameKind::Void)
    );
    assert!(greet.arguments.is_empty());
    assert!(greet.body.as_ref().is_some_and(|b| b.is_empty()));
}

#[test]
fn test_constructor_with_this_delegation() {
    let script = build("class Foo\nfunc new(int x) this(x)\nend\nend\n");
    let constructor = function(&script, "new");
    assert_eq!(constructor.function_type, FunctionType::Constructor);
    assert_eq!(
        constructor.return_type.as_ref().map(|t| t.name()),
        Some("Foo")
    );
    assert_eq!(constructor.arguments.len(), 1);
    assert_eq!(constructor.arguments[0].type_name.name(), "int");
    assert_eq!(constructor.arguments[0].name.name(), "x");
    assert_eq!(constructor.this_call().map(|args| args.len()), Some(1));
    assert!(constructor.super_call().is_none());
    assert!(constructor.modifiers.contains(TypeModifier::Static));
}

#[test]
fn test_operator_function() {
    let script = build("class Foo\nfunc Foo +(Foo other)\nend\nend\n");
    let operator = function(&script, "+");
    assert_eq!(operator.function_type, FunctionType::Operator);
    assert_eq!(operator.return_type.as_ref().map(|t| t.name()), Some("Foo"));
    assert_eq!(operator.arguments[0].type_name.name(), "Foo");
    assert_eq!(operator.arguments[0].name.name(), "other");
}

#[rstest]
#[case("*=")]
#[case("<<=")]
#[case("&")]
#[case("<=")]
#[case("%")]
#[case("++")]
#[case("~")]
fn test_every_operator_spelling_is_an_operator_function(#[case] spelling: &str) {
    let source = format!("class Foo\nfunc Foo {spelling}(Foo other)\nend\nend\n");
    let script = build(&source);
    let operator = function(&script, spelling);
    assert_eq!(operator.function_type, FunctionType::Operator);
}

#[test]
fn test_operator_table_is_consistent() {
    for (kind, spelling) in OPERATOR_TABLE {
        assert_eq!(resolve_operator(*kind), Some(*spelling));
    }
}

#[test]
fn test_full_fixture_functions() {
    let script = build(FULL_FEATURES);
    let summary: Vec<_> = functions(&script)
        .iter()
        .map(|f| (f.function_type, f.name.name().to_string(), f.body.is_some()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (FunctionType::Constructor, "new".to_string(), true),
            (FunctionType::Constructor, "new".to_string(), true),
            (FunctionType::Destructor, "destructor".to_string(), true),
            (FunctionType::Regular, "area".to_string(), false),
            (FunctionType::Operator, "*".to_string(), true),
            (FunctionType::Regular, "size".to_string(), true),
            (FunctionType::Regular, "area".to_string(), false),
        ]
    );
    let constructors: Vec<_> = functions(&script)
        .into_iter()
        .filter(|f| f.function_type == FunctionType::Constructor)
        .collect();
    assert_eq!(constructors[0].super_call().map(|a| a.len()), Some(0));
    assert_eq!(constructors[1].this_call().map(|a| a.len()), Some(1));
    assert_eq!(
        constructors[0].return_type.as_ref().map(|t| t.name()),
        Some("Demo.Shapes.Shape")
    );
    assert!(functions(&script)[3].is_abstract());
}

#[test]
fn test_unfinished_function_never_panics() {
    for source in [
        "class A\nfunc\nend\n",
        "class A\nfunc (int a)\nend\nend\n",
        "class A\nfunc new(\n",
        "class A\nfunc void\nend\nend\n",
        "interface I\nfunc\nend\n",
    ] {
        let script = build(source);
        for f in functions(&script) {
            assert!(!f.signature().is_empty());
        }
        assert!(count_kind(&script, ContextKind::Script) == 1);
    }
}
