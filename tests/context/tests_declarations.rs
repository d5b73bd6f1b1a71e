//! Script level and class level declarations.

use dscript::context::{Context, ContextKind, ContextNode, DocumentationBlockKind, TypeModifier};

use crate::helpers::context_helpers::*;
use crate::helpers::source_fixtures::*;

#[test]
fn test_script_members_in_order() {
    let script = build(FULL_FEATURES);
    let kinds: Vec<_> = script.members.iter().map(Context::kind).collect();
    assert_eq!(
        kinds,
        vec![
            ContextKind::RequiresPackage,
            ContextKind::PinNamespace,
            ContextKind::Namespace,
        ]
    );
    let Context::RequiresPackage(requires) = &script.members[0] else {
        panic!("expected requires");
    };
    assert_eq!(requires.package.name(), "Gui");
    let Context::PinNamespace(pin) = &script.members[1] else {
        panic!("expected pin");
    };
    assert_eq!(pin.name.name(), "Dragengine.Gui");
}

#[test]
fn test_namespace_owns_following_declarations() {
    let script = build(FULL_FEATURES);
    let Context::Namespace(namespace) = &script.members[2] else {
        panic!("expected namespace");
    };
    assert_eq!(namespace.name.name(), "Demo.Shapes");
    let kinds: Vec<_> = namespace.members.iter().map(Context::kind).collect();
    assert_eq!(
        kinds,
        vec![
            ContextKind::Class,
            ContextKind::Interface,
            ContextKind::Enumeration,
        ]
    );
}

#[test]
fn test_class_header_and_documentation() {
    let script = build(FULL_FEATURES);
    let Context::Namespace(namespace) = &script.members[2] else {
        panic!("expected namespace");
    };
    let Context::Class(class) = &namespace.members[0] else {
        panic!("expected class");
    };
    assert_eq!(class.full_name, "Demo.Shapes.Shape");
    assert!(class.modifiers.contains(TypeModifier::Public));
    assert!(class.modifiers.contains(TypeModifier::Abstract));
    assert!(class.extends.is_none());
    assert_eq!(class.implements.len(), 1);
    assert_eq!(class.implements[0].name(), "Measurable");

    let documentation = class.documentation.as_ref().expect("documentation");
    let brief = documentation.brief().expect("brief");
    assert_eq!(brief.text().trim(), "A shape with an area.");
    assert!(
        documentation
            .blocks
            .iter()
            .any(|b| b.kind == DocumentationBlockKind::Since)
    );
}

#[test]
fn test_class_variable_group_is_split() {
    let script = build(FULL_FEATURES);
    assert_eq!(count_kind(&script, ContextKind::ClassVariable), 3);
}

#[test]
fn test_enumeration_entries() {
    let script = build(SIMPLE_ENUM);
    let Context::Enumeration(enumeration) = &script.members[0] else {
        panic!("expected enumeration");
    };
    let names: Vec<_> = enumeration.entries.iter().map(|e| e.name.name()).collect();
    assert_eq!(names, vec!["low", "high"]);
}

#[test]
fn test_param_documentation_reaches_constructor() {
    let script = build(GREETER);
    let constructor = function(&script, "new");
    let documentation = constructor.documentation.as_ref().expect("documentation");
    let param = documentation.param("greeting").expect("param");
    assert_eq!(param.text().trim(), "Text put before every name.");
}

#[test]
fn test_ranges_nest() {
    let script = build(GREETER);
    let root = script.range().expect("root range");
    dscript::context::walk_preorder((&script).into(), &mut |context| {
        for child in context.children() {
            if let (Some(outer), Some(inner)) = (context.range(), child.range()) {
                // Documentation sits in front of its declaration
                if child.kind() != ContextKind::Documentation {
                    assert!(
                        outer.contains_range(inner),
                        "{:?} in {:?}",
                        child.kind(),
                        context.kind()
                    );
                }
            }
            if let Some(inner) = child.range() {
                assert!(root.contains_range(inner));
            }
        }
    });
}

#[test]
fn test_dump_of_simple_class() {
    assert_eq!(build(SIMPLE_CLASS).dump(), "Script\n  Class: Vehicle\n");
}
