//! Declaration contexts: script, namespaces, types and their members

use text_size::TextRange;

use super::builder::BuildContext;
use super::documentation::ContextDocumentation;
use super::expressions::build_optional_expression;
use super::function::ContextFunction;
use super::identifier::Identifier;
use super::modifiers::TypeModifierSet;
use super::type_name::TypeName;
use super::{Context, ContextNode, ContextRef, push_all, push_boxed};
use crate::parser::ast::{self, AstNode};

fn push_documentation<'a>(
    out: &mut Vec<ContextRef<'a>>,
    documentation: &'a Option<ContextDocumentation>,
) {
    if let Some(documentation) = documentation {
        out.push(documentation.into());
    }
}

/// Root of a script's context tree
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContextScript {
    range: Option<TextRange>,
    pub members: Vec<Context>,
}

impl ContextScript {
    pub(super) fn new(range: Option<TextRange>, members: Vec<Context>) -> Self {
        Self { range, members }
    }
}

impl ContextNode for ContextScript {
    fn range(&self) -> Option<TextRange> {
        self.range
    }

    fn children(&self) -> Vec<ContextRef<'_>> {
        let mut out = Vec::new();
        push_all(&mut out, &self.members);
        out
    }

    fn dispose(&mut self) {
        for member in &mut self.members {
            member.dispose();
        }
        self.members.clear();
    }
}

/// `pin Namespace.Name`
#[derive(Debug, Clone, PartialEq)]
pub struct ContextPinNamespace {
    range: Option<TextRange>,
    pub name: TypeName,
}

impl ContextNode for ContextPinNamespace {
    fn range(&self) -> Option<TextRange> {
        self.range
    }

    fn children(&self) -> Vec<ContextRef<'_>> {
        Vec::new()
    }

    fn dispose(&mut self) {}
}

/// `requires "Package"`
#[derive(Debug, Clone, PartialEq)]
pub struct ContextRequiresPackage {
    range: Option<TextRange>,
    /// Package name without quotes; the range covers the string literal
    pub package: Identifier,
}

impl ContextNode for ContextRequiresPackage {
    fn range(&self) -> Option<TextRange> {
        self.range
    }

    fn children(&self) -> Vec<ContextRef<'_>> {
        Vec::new()
    }

    fn dispose(&mut self) {}
}

/// `namespace Name` and every declaration up to the next namespace
#[derive(Debug, Clone, PartialEq)]
pub struct ContextNamespace {
    range: Option<TextRange>,
    pub name: TypeName,
    pub members: Vec<Context>,
}

impl ContextNode for ContextNamespace {
    fn range(&self) -> Option<TextRange> {
        self.range
    }

    fn children(&self) -> Vec<ContextRef<'_>> {
        let mut out = Vec::new();
        push_all(&mut out, &self.members);
        out
    }

    fn dispose(&mut self) {
        for member in &mut self.members {
            member.dispose();
        }
        self.members.clear();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContextClass {
    range: Option<TextRange>,
    pub modifiers: TypeModifierSet,
    pub name: Identifier,
    /// Dotted name including enclosing namespaces and classes
    pub full_name: String,
    pub extends: Option<TypeName>,
    pub implements: Vec<TypeName>,
    pub members: Vec<Context>,
    pub documentation: Option<ContextDocumentation>,
}

impl ContextNode for ContextClass {
    fn range(&self) -> Option<TextRange> {
        self.range
    }

    fn children(&self) -> Vec<ContextRef<'_>> {
        let mut out = Vec::new();
        push_documentation(&mut out, &self.documentation);
        push_all(&mut out, &self.members);
        out
    }

    fn dispose(&mut self) {
        for member in &mut self.members {
            member.dispose();
        }
        self.members.clear();
        self.implements.clear();
        self.extends = None;
        self.documentation = None;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContextInterface {
    range: Option<TextRange>,
    pub modifiers: TypeModifierSet,
    pub name: Identifier,
    pub full_name: String,
    pub implements: Vec<TypeName>,
    pub members: Vec<Context>,
    pub documentation: Option<ContextDocumentation>,
}

impl ContextNode for ContextInterface {
    fn range(&self) -> Option<TextRange> {
        self.range
    }

    fn children(&self) -> Vec<ContextRef<'_>> {
        let mut out = Vec::new();
        push_documentation(&mut out, &self.documentation);
        push_all(&mut out, &self.members);
        out
    }

    fn dispose(&mut self) {
        for member in &mut self.members {
            member.dispose();
        }
        self.members.clear();
        self.implements.clear();
        self.documentation = None;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContextEnumeration {
    range: Option<TextRange>,
    pub modifiers: TypeModifierSet,
    pub name: Identifier,
    pub full_name: String,
    pub entries: Vec<ContextEnumEntry>,
    pub documentation: Option<ContextDocumentation>,
}

impl ContextNode for ContextEnumeration {
    fn range(&self) -> Option<TextRange> {
        self.range
    }

    fn children(&self) -> Vec<ContextRef<'_>> {
        let mut out = Vec::new();
        push_documentation(&mut out, &self.documentation);
        push_all(&mut out, &self.entries);
        out
    }

    fn dispose(&mut self) {
        self.entries.clear();
        self.documentation = None;
    }
}

/// One constant of an enumeration
#[derive(Debug, Clone, PartialEq)]
pub struct ContextEnumEntry {
    range: Option<TextRange>,
    pub name: Identifier,
    pub value: Option<Box<Context>>,
    pub documentation: Option<ContextDocumentation>,
}

impl ContextNode for ContextEnumEntry {
    fn range(&self) -> Option<TextRange> {
        self.range
    }

    fn children(&self) -> Vec<ContextRef<'_>> {
        let mut out = Vec::new();
        push_documentation(&mut out, &self.documentation);
        push_boxed(&mut out, &self.value);
        out
    }

    fn dispose(&mut self) {
        self.value = None;
        self.documentation = None;
    }
}

/// One variable of a class variable declaration.
///
/// `public static fixed var int A = 1, B = 2` yields two contexts sharing the
/// modifiers, type and documentation.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextClassVariable {
    range: Option<TextRange>,
    pub modifiers: TypeModifierSet,
    pub type_name: TypeName,
    pub name: Identifier,
    pub value: Option<Box<Context>>,
    pub documentation: Option<ContextDocumentation>,
}

impl ContextNode for ContextClassVariable {
    fn range(&self) -> Option<TextRange> {
        self.range
    }

    fn children(&self) -> Vec<ContextRef<'_>> {
        let mut out = Vec::new();
        push_documentation(&mut out, &self.documentation);
        push_boxed(&mut out, &self.value);
        out
    }

    fn dispose(&mut self) {
        self.value = None;
        self.documentation = None;
    }
}

// ============================================================================
// Building
// ============================================================================

pub(super) fn build_script_members(
    members: impl Iterator<Item = ast::ScriptMember>,
    cx: &mut BuildContext<'_>,
) -> Vec<Context> {
    members.map(|member| build_script_member(&member, cx)).collect()
}

fn build_script_member(member: &ast::ScriptMember, cx: &mut BuildContext<'_>) -> Context {
    let range = Some(member.syntax().text_range());
    match member {
        ast::ScriptMember::Pin(pin) => ContextPinNamespace {
            range,
            name: TypeName::from_type_ref(pin.type_ref().as_ref()),
        }
        .into(),
        ast::ScriptMember::Requires(requires) => ContextRequiresPackage {
            range,
            package: match (requires.package(), requires.package_name()) {
                (Some(token), Some(name)) => Identifier::new(name, Some(token.text_range())),
                _ => Identifier::placeholder(),
            },
        }
        .into(),
        ast::ScriptMember::Namespace(namespace) => {
            let name = TypeName::from_type_ref(namespace.type_ref().as_ref());
            cx.push_scope(name.name());
            let members = build_script_members(namespace.members(), cx);
            cx.pop_scope();
            ContextNamespace {
                range,
                name,
                members,
            }
            .into()
        }
        ast::ScriptMember::Class(class) => build_class(class, cx).into(),
        ast::ScriptMember::Interface(interface) => build_interface(interface, cx).into(),
        ast::ScriptMember::Enum(enumeration) => build_enumeration(enumeration, cx).into(),
    }
}

fn build_class(node: &ast::ClassDecl, cx: &mut BuildContext<'_>) -> ContextClass {
    let name = Identifier::from_token(node.name().as_ref());
    let full_name = cx.qualified_name(name.name());
    let documentation = cx.documentation(node);

    cx.push_scope(name.name());
    let members = build_members(node.members(), cx);
    cx.pop_scope();

    ContextClass {
        range: Some(node.syntax().text_range()),
        modifiers: TypeModifierSet::from_ast(node.modifiers().as_ref()),
        name,
        full_name,
        extends: node.extends().map(|t| TypeName::from_type_ref(Some(&t))),
        implements: node
            .implements()
            .iter()
            .map(|t| TypeName::from_type_ref(Some(t)))
            .collect(),
        members,
        documentation,
    }
}

fn build_interface(node: &ast::InterfaceDecl, cx: &mut BuildContext<'_>) -> ContextInterface {
    let name = Identifier::from_token(node.name().as_ref());
    let full_name = cx.qualified_name(name.name());
    let documentation = cx.documentation(node);

    cx.push_scope(name.name());
    let members = build_members(node.members(), cx);
    cx.pop_scope();

    ContextInterface {
        range: Some(node.syntax().text_range()),
        modifiers: TypeModifierSet::from_ast(node.modifiers().as_ref()),
        name,
        full_name,
        implements: node
            .implements()
            .iter()
            .map(|t| TypeName::from_type_ref(Some(t)))
            .collect(),
        members,
        documentation,
    }
}

fn build_enumeration(node: &ast::EnumDecl, cx: &mut BuildContext<'_>) -> ContextEnumeration {
    let name = Identifier::from_token(node.name().as_ref());
    let entries = node
        .entries()
        .map(|entry| ContextEnumEntry {
            range: Some(entry.syntax().text_range()),
            name: Identifier::from_token(entry.name().as_ref()),
            value: build_optional_expression(entry.value()),
            documentation: cx.documentation(&entry),
        })
        .collect();

    ContextEnumeration {
        range: Some(node.syntax().text_range()),
        modifiers: TypeModifierSet::from_ast(node.modifiers().as_ref()),
        full_name: cx.qualified_name(name.name()),
        name,
        entries,
        documentation: cx.documentation(node),
    }
}

/// Build class or interface members; the enclosing type's scope is pushed
fn build_members(
    members: impl Iterator<Item = ast::ClassMember>,
    cx: &mut BuildContext<'_>,
) -> Vec<Context> {
    let mut out = Vec::new();
    for member in members {
        match &member {
            ast::ClassMember::Class(class) => out.push(build_class(class, cx).into()),
            ast::ClassMember::Interface(interface) => {
                out.push(build_interface(interface, cx).into())
            }
            ast::ClassMember::Enum(enumeration) => {
                out.push(build_enumeration(enumeration, cx).into())
            }
            ast::ClassMember::Variables(variables) => {
                let modifiers = TypeModifierSet::from_ast(variables.modifiers().as_ref());
                let type_name = TypeName::from_type_ref(variables.type_ref().as_ref());
                let documentation = cx.documentation(variables);
                out.extend(variables.variables().map(|variable| {
                    Context::from(ContextClassVariable {
                        range: Some(variable.syntax().text_range()),
                        modifiers,
                        type_name: type_name.clone(),
                        name: Identifier::from_token(variable.name().as_ref()),
                        value: build_optional_expression(variable.value()),
                        documentation: documentation.clone(),
                    })
                }));
            }
            ast::ClassMember::Function(function) => {
                let documentation = cx.documentation(function);
                out.push(
                    ContextFunction::from_class_function(
                        function,
                        cx.current_scope_name(),
                        documentation,
                    )
                    .into(),
                );
            }
            ast::ClassMember::InterfaceFunction(function) => {
                let documentation = cx.documentation(function);
                out.push(
                    ContextFunction::from_interface_function(
                        function,
                        cx.current_scope_name(),
                        documentation,
                    )
                    .into(),
                );
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{BuildOptions, ContextKind, FunctionType, build_script};

    fn build(source: &str) -> ContextScript {
        build_script(&crate::parser::parse(source), &BuildOptions::default())
    }

    #[test]
    fn test_script_members() {
        let script = build(
            "requires \"Gui\"\npin Dragengine.Gui\nnamespace Demo\nclass A\nend\ninterface B\nend\nenum C\nx\nend\n",
        );
        let kinds: Vec<_> = script.members.iter().map(Context::kind).collect();
        assert_eq!(
            kinds,
            vec![
                ContextKind::RequiresPackage,
                ContextKind::PinNamespace,
                ContextKind::Namespace
            ]
        );
        let Context::RequiresPackage(requires) = &script.members[0] else {
            panic!("expected requires");
        };
        assert_eq!(requires.package.name(), "Gui");

        let Context::Namespace(namespace) = &script.members[2] else {
            panic!("expected namespace");
        };
        assert_eq!(namespace.name.name(), "Demo");
        assert_eq!(namespace.members.len(), 3);
    }

    #[test]
    fn test_qualified_names_follow_nesting() {
        let script = build("namespace Demo.Gui\nclass Outer\nclass Inner\nfunc new()\nend\nend\nend\n");
        let Context::Namespace(namespace) = &script.members[0] else {
            panic!("expected namespace");
        };
        let Context::Class(outer) = &namespace.members[0] else {
            panic!("expected class");
        };
        assert_eq!(outer.full_name, "Demo.Gui.Outer");
        let Context::Class(inner) = &outer.members[0] else {
            panic!("expected nested class");
        };
        assert_eq!(inner.full_name, "Demo.Gui.Outer.Inner");
        let Context::Function(constructor) = &inner.members[0] else {
            panic!("expected constructor");
        };
        assert_eq!(constructor.function_type, FunctionType::Constructor);
        assert_eq!(
            constructor.return_type.as_ref().map(TypeName::name),
            Some("Demo.Gui.Outer.Inner")
        );
    }

    #[test]
    fn test_class_header() {
        let script = build("public class Widget extends Object implements Shape, Other\nend\n");
        let Context::Class(class) = &script.members[0] else {
            panic!("expected class");
        };
        assert_eq!(class.modifiers.to_string(), "public");
        assert_eq!(class.extends.as_ref().map(TypeName::name), Some("Object"));
        let implements: Vec<_> = class.implements.iter().map(TypeName::name).collect();
        assert_eq!(implements, vec!["Shape", "Other"]);
    }

    #[test]
    fn test_class_variables_are_split() {
        let script = build("class A\n/** Limits. */\npublic static fixed var int MIN = 0, MAX = 9\nend\n");
        let Context::Class(class) = &script.members[0] else {
            panic!("expected class");
        };
        let names: Vec<_> = class
            .members
            .iter()
            .filter_map(|m| match m {
                Context::ClassVariable(v) => Some(v.name.name()),
                _ => None,
            })
            .collect();
        assert_eq!(names, vec!["MIN", "MAX"]);
        let Context::ClassVariable(max) = &class.members[1] else {
            panic!("expected variable");
        };
        assert_eq!(max.modifiers.len(), 3);
        assert_eq!(max.type_name.name(), "int");
        assert!(max.documentation.is_some());
    }

    #[test]
    fn test_enumeration_entries() {
        let script = build("enum Color\n/** Red. */\nred\ngreen = 5\nend\n");
        let Context::Enumeration(enumeration) = &script.members[0] else {
            panic!("expected enumeration");
        };
        assert_eq!(enumeration.entries.len(), 2);
        assert!(enumeration.entries[0].documentation.is_some());
        assert!(enumeration.entries[1].value.is_some());
    }

    #[test]
    fn test_dispose_releases_members() {
        let mut script = build("class A\nfunc void f()\nend\nend\n");
        script.dispose();
        script.dispose();
        assert!(script.members.is_empty());
        assert!(script.children().is_empty());
    }
}
