//! Statement and expression contexts inside function bodies.

use dscript::context::{
    ConstantKind, Context, ContextKind, ContextNode, ForDirection, OperationKind, SpecialOperator,
};
use rstest::rstest;

use crate::helpers::context_helpers::*;
use crate::helpers::source_fixtures::FULL_FEATURES;

/// Statements of `body` wrapped in a function
fn body(statements: &str) -> Vec<Context> {
    let source = format!("class A\nfunc void f()\n{statements}\nend\nend\n");
    let script = build(&source);
    let f = function(&script, "f");
    f.body.clone().expect("body").statements
}

#[test]
fn test_full_fixture_statement_kinds() {
    let script = build(FULL_FEATURES);
    for kind in [
        ContextKind::While,
        ContextKind::For,
        ContextKind::Select,
        ContextKind::SelectCase,
        ContextKind::Try,
        ContextKind::TryCatch,
        ContextKind::Throw,
        ContextKind::Block,
        ContextKind::InlineIf,
        ContextKind::SpecialOperation,
    ] {
        assert!(count_kind(&script, kind) > 0, "missing {kind:?}");
    }
}

#[rstest]
#[case("x = 1", OperationKind::Assignment, "=")]
#[case("x += 1", OperationKind::Assignment, "+=")]
#[case("a + b", OperationKind::Binary, "+")]
#[case("a and b", OperationKind::Binary, "and")]
#[case("-a", OperationKind::Prefix, "-")]
#[case("a++", OperationKind::Postfix, "++")]
fn test_operation_kinds(#[case] source: &str, #[case] kind: OperationKind, #[case] operator: &str) {
    let statements = body(source);
    let Some(Context::Operation(operation)) = statements.first() else {
        panic!("expected operation for {source}: {statements:?}");
    };
    assert_eq!(operation.kind, kind);
    assert_eq!(operation.operator.name(), operator);
}

#[test]
fn test_assignment_is_modification() {
    let statements = body("x = 1\ny == 2");
    let modifications: Vec<_> = statements
        .iter()
        .map(|s| match s {
            Context::Operation(o) => o.is_modification(),
            _ => false,
        })
        .collect();
    assert_eq!(modifications, vec![true, false]);
}

#[test]
fn test_call_on_object() {
    let statements = body("list.add(1, 2)");
    let Some(Context::FunctionCall(call)) = statements.first() else {
        panic!("expected call");
    };
    assert_eq!(call.name.name(), "add");
    assert_eq!(call.arguments.len(), 2);
    assert!(matches!(call.object.as_deref(), Some(Context::Member(m)) if m.name.name() == "list"));
}

#[rstest]
#[case("1", ConstantKind::Integer)]
#[case("2.5", ConstantKind::Float)]
#[case("0h1F", ConstantKind::Hex)]
#[case("'c'", ConstantKind::Character)]
#[case("\"s\"", ConstantKind::String)]
#[case("true", ConstantKind::True)]
#[case("null", ConstantKind::Null)]
#[case("super", ConstantKind::Super)]
fn test_constant_kinds(#[case] source: &str, #[case] kind: ConstantKind) {
    let statements = body(&format!("return {source}"));
    let Some(Context::Return(ret)) = statements.first() else {
        panic!("expected return");
    };
    let Some(Context::Constant(constant)) = ret.value.as_deref() else {
        panic!("expected constant");
    };
    assert_eq!(constant.kind, kind);
    assert_eq!(constant.text.as_str(), source);
}

#[test]
fn test_special_operations() {
    let statements = body("a cast int\nb castable String\nc typeof Object");
    let operators: Vec<_> = statements
        .iter()
        .filter_map(|s| match s {
            Context::SpecialOperation(o) => Some((o.operator, o.target_type.name().to_string())),
            _ => None,
        })
        .collect();
    assert_eq!(
        operators,
        vec![
            (SpecialOperator::Cast, "int".to_string()),
            (SpecialOperator::Castable, "String".to_string()),
            (SpecialOperator::Typeof, "Object".to_string()),
        ]
    );
}

#[test]
fn test_for_directions() {
    let statements = body("for i = 0 to 5\nend\nfor j = 5 downto 0 step 1\nend");
    let directions: Vec<_> = statements
        .iter()
        .filter_map(|s| match s {
            Context::For(f) => Some((f.direction, f.step.is_some())),
            _ => None,
        })
        .collect();
    assert_eq!(
        directions,
        vec![(ForDirection::Up, false), (ForDirection::Down, true)]
    );
}

#[test]
fn test_block_argument_types() {
    let statements = body("var Block b = block a, int c\nend");
    let Some(Context::Variables(variables)) = statements.first() else {
        panic!("expected variables");
    };
    let Some(Context::Block(block)) = variables.variables[0].value.as_deref() else {
        panic!("expected block");
    };
    let arguments: Vec<_> = block
        .arguments
        .iter()
        .map(|a| (a.type_name.name().to_string(), a.name.name().to_string()))
        .collect();
    assert_eq!(
        arguments,
        vec![
            ("Object".to_string(), "a".to_string()),
            ("int".to_string(), "c".to_string()),
        ]
    );
}

#[test]
fn test_disposed_body_reads_empty() {
    let mut statements = body("if a\nreturn 1\nelse\nreturn 2\nend");
    let first = &mut statements[0];
    assert!(!first.children().is_empty());
    first.dispose();
    first.dispose();
    assert!(first.children().is_empty());
}

#[rstest]
#[case("if a\nreturn 1\nelif b\nbreak\nelse\nreturn 2\nend", ContextKind::If)]
#[case("while a\nbreak\nend", ContextKind::While)]
#[case("for i = 0 to 1\ncontinue\nend", ContextKind::For)]
#[case("select x\ncase 1\nbreak\nelse\nreturn\nend", ContextKind::Select)]
#[case("try\nfoo()\ncatch Exception e\nthrow e\nend", ContextKind::Try)]
#[case("throw e", ContextKind::Throw)]
#[case("return 1", ContextKind::Return)]
#[case("var int a = 1, b", ContextKind::Variables)]
#[case("a + b", ContextKind::Operation)]
#[case("a cast int", ContextKind::SpecialOperation)]
#[case("a if b else c", ContextKind::InlineIf)]
#[case("a.b", ContextKind::Member)]
#[case("a.foo(1, 2)", ContextKind::FunctionCall)]
#[case("block int n\nreturn n\nend", ContextKind::Block)]
#[case("(a + b)", ContextKind::Group)]
fn test_dispose_empties_every_kind(#[case] source: &str, #[case] kind: ContextKind) {
    let mut statements = body(source);
    let first = &mut statements[0];
    assert_eq!(first.kind(), kind);
    assert!(!first.children().is_empty());
    first.dispose();
    assert!(first.children().is_empty());
    first.dispose();
    assert!(first.children().is_empty());
}

#[test]
fn test_dispose_empties_nested_branches() {
    let mut statements = body("if a\nreturn 1\nelif b\nbreak\nend");
    let Context::If(stmt) = &mut statements[0] else {
        panic!("expected if");
    };
    let elif = &mut stmt.elifs[0];
    assert_eq!(elif.children().len(), 2);
    elif.dispose();
    assert!(elif.children().is_empty());
    assert!(elif.statements.is_none());

    let mut statements = body("try\nfoo()\ncatch Exception e\nthrow e\nend");
    let Context::Try(stmt) = &mut statements[0] else {
        panic!("expected try");
    };
    let catch = &mut stmt.catches[0];
    assert_eq!(catch.children().len(), 1);
    catch.dispose();
    assert!(catch.children().is_empty());
}
