use super::*;

// ============================================================================
// Root
// ============================================================================

ast_node!(Script, SCRIPT);

impl Script {
    children_method!(members, ScriptMember);
}

// ============================================================================
// Script Members
// ============================================================================

/// Any statement allowed at script or namespace level
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScriptMember {
    Pin(PinNamespace),
    Requires(RequiresPackage),
    Namespace(NamespaceDecl),
    Class(ClassDecl),
    Interface(InterfaceDecl),
    Enum(EnumDecl),
}

impl AstNode for ScriptMember {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::PIN_NAMESPACE
                | SyntaxKind::REQUIRES_PACKAGE
                | SyntaxKind::NAMESPACE_DECL
                | SyntaxKind::CLASS_DECL
                | SyntaxKind::INTERFACE_DECL
                | SyntaxKind::ENUM_DECL
        )
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::PIN_NAMESPACE => Some(Self::Pin(PinNamespace(node))),
            SyntaxKind::REQUIRES_PACKAGE => Some(Self::Requires(RequiresPackage(node))),
            SyntaxKind::NAMESPACE_DECL => Some(Self::Namespace(NamespaceDecl(node))),
            SyntaxKind::CLASS_DECL => Some(Self::Class(ClassDecl(node))),
            SyntaxKind::INTERFACE_DECL => Some(Self::Interface(InterfaceDecl(node))),
            SyntaxKind::ENUM_DECL => Some(Self::Enum(EnumDecl(node))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Pin(n) => n.syntax(),
            Self::Requires(n) => n.syntax(),
            Self::Namespace(n) => n.syntax(),
            Self::Class(n) => n.syntax(),
            Self::Interface(n) => n.syntax(),
            Self::Enum(n) => n.syntax(),
        }
    }
}

ast_node!(PinNamespace, PIN_NAMESPACE);

impl PinNamespace {
    first_child_method!(type_ref, TypeRef);
}

ast_node!(RequiresPackage, REQUIRES_PACKAGE);

impl RequiresPackage {
    token_method!(package, STRING);

    /// Get the package name without the surrounding quotes
    pub fn package_name(&self) -> Option<String> {
        self.package().map(|t| unquote(t.text()))
    }
}

ast_node!(NamespaceDecl, NAMESPACE_DECL);

impl NamespaceDecl {
    first_child_method!(type_ref, TypeRef);
    children_method!(members, ScriptMember);
}

// ============================================================================
// Types and modifiers
// ============================================================================

ast_node!(TypeRef, TYPE_REF);

impl TypeRef {
    has_token_method!(is_void, VOID_KW, "func void f()");

    /// Get the identifier segments of a dotted type name
    pub fn segments(&self) -> Vec<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .filter(|t| t.kind() == SyntaxKind::IDENT)
            .collect()
    }

    /// Get the full dotted name (`Dragengine.Gui.Widget`), `None` if empty
    pub fn name(&self) -> Option<String> {
        let segments = self.segments();
        if segments.is_empty() {
            return None;
        }
        Some(
            segments
                .iter()
                .map(|t| t.text())
                .collect::<Vec<_>>()
                .join("."),
        )
    }
}

ast_node!(TypeModifiers, TYPE_MODIFIERS);

impl TypeModifiers {
    /// Get the modifier keyword tokens in source order
    pub fn tokens(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .filter(|t| t.kind().is_modifier())
    }
}

// ============================================================================
// Classes
// ============================================================================

ast_node!(ClassDecl, CLASS_DECL);

impl ClassDecl {
    modifiers_method!();
    token_method!(name, IDENT);
    first_child_method!(body, ClassBody);
    has_token_method!(has_end, END_KW);

    /// Get the `extends` base class
    pub fn extends(&self) -> Option<TypeRef> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::CLASS_EXTENDS)
            .and_then(|n| n.children().find_map(TypeRef::cast))
    }

    /// Get the implemented interfaces
    pub fn implements(&self) -> Vec<TypeRef> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::CLASS_IMPLEMENTS)
            .map(|n| n.children().filter_map(TypeRef::cast).collect())
            .unwrap_or_default()
    }

    /// Get the class members from the body
    pub fn members(&self) -> impl Iterator<Item = ClassMember> + '_ {
        self.body()
            .into_iter()
            .flat_map(|body| body.members().collect::<Vec<_>>())
    }
}

ast_node!(ClassBody, CLASS_BODY);

impl ClassBody {
    children_method!(members, ClassMember);
}

/// Any member of a class or interface body
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClassMember {
    Class(ClassDecl),
    Interface(InterfaceDecl),
    Enum(EnumDecl),
    Variables(ClassVariables),
    Function(ClassFunction),
    InterfaceFunction(InterfaceFunction),
}

impl AstNode for ClassMember {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::CLASS_DECL
                | SyntaxKind::INTERFACE_DECL
                | SyntaxKind::ENUM_DECL
                | SyntaxKind::CLASS_VARIABLES
                | SyntaxKind::CLASS_FUNCTION
                | SyntaxKind::INTERFACE_FUNCTION
        )
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::CLASS_DECL => Some(Self::Class(ClassDecl(node))),
            SyntaxKind::INTERFACE_DECL => Some(Self::Interface(InterfaceDecl(node))),
            SyntaxKind::ENUM_DECL => Some(Self::Enum(EnumDecl(node))),
            SyntaxKind::CLASS_VARIABLES => Some(Self::Variables(ClassVariables(node))),
            SyntaxKind::CLASS_FUNCTION => Some(Self::Function(ClassFunction(node))),
            SyntaxKind::INTERFACE_FUNCTION => {
                Some(Self::InterfaceFunction(InterfaceFunction(node)))
            }
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Class(n) => n.syntax(),
            Self::Interface(n) => n.syntax(),
            Self::Enum(n) => n.syntax(),
            Self::Variables(n) => n.syntax(),
            Self::Function(n) => n.syntax(),
            Self::InterfaceFunction(n) => n.syntax(),
        }
    }
}

ast_node!(ClassVariables, CLASS_VARIABLES);

impl ClassVariables {
    modifiers_method!();
    first_child_method!(type_ref, TypeRef);
    children_method!(variables, ClassVariable);
}

ast_node!(ClassVariable, CLASS_VARIABLE);

impl ClassVariable {
    token_method!(name, IDENT);
    first_child_method!(value, Expr);
}

ast_node!(ClassFunction, CLASS_FUNCTION);

impl ClassFunction {
    modifiers_method!();
    first_child_method!(begin, FunctionBegin);
    first_child_method!(statements, Statements);
}

// ============================================================================
// Interfaces
// ============================================================================

ast_node!(InterfaceDecl, INTERFACE_DECL);

impl InterfaceDecl {
    modifiers_method!();
    token_method!(name, IDENT);
    first_child_method!(body, InterfaceBody);

    /// Get the extended interfaces
    pub fn implements(&self) -> Vec<TypeRef> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::INTERFACE_IMPLEMENTS)
            .map(|n| n.children().filter_map(TypeRef::cast).collect())
            .unwrap_or_default()
    }

    /// Get the interface members from the body
    pub fn members(&self) -> impl Iterator<Item = ClassMember> + '_ {
        self.body()
            .into_iter()
            .flat_map(|body| body.members().collect::<Vec<_>>())
    }
}

ast_node!(InterfaceBody, INTERFACE_BODY);

impl InterfaceBody {
    children_method!(members, ClassMember);
}

ast_node!(InterfaceFunction, INTERFACE_FUNCTION);

impl InterfaceFunction {
    modifiers_method!();
    first_child_method!(begin, FunctionBegin);
}

// ============================================================================
// Enumerations
// ============================================================================

ast_node!(EnumDecl, ENUM_DECL);

impl EnumDecl {
    modifiers_method!();
    token_method!(name, IDENT);

    /// Get the enumeration entries
    pub fn entries(&self) -> impl Iterator<Item = EnumEntry> + '_ {
        self.0
            .children()
            .filter(|n| n.kind() == SyntaxKind::ENUM_BODY)
            .flat_map(|body| body.children().filter_map(EnumEntry::cast).collect::<Vec<_>>())
    }
}

ast_node!(EnumEntry, ENUM_ENTRY);

impl EnumEntry {
    token_method!(name, IDENT);
    first_child_method!(value, Expr);
}

// ============================================================================
// Function heads
// ============================================================================

ast_node!(FunctionBegin, FUNCTION_BEGIN);

impl FunctionBegin {
    first_child_method!(constructor, ConstructorBegin);
    first_child_method!(destructor, DestructorBegin);
    first_child_method!(regular, RegularFunctionBegin);
}

ast_node!(ConstructorBegin, CONSTRUCTOR_BEGIN);

impl ConstructorBegin {
    token_method!(new_token, NEW_KW);
    first_child_method!(arguments, FunctionArguments);
    first_child_method!(call, ConstructorCall);
}

ast_node!(ConstructorCall, CONSTRUCTOR_CALL);

impl ConstructorCall {
    find_token_method!(keyword, [THIS_KW, SUPER_KW], "Get the `this` or `super` keyword.");
    first_child_method!(arguments, ArgumentList);
}

ast_node!(DestructorBegin, DESTRUCTOR_BEGIN);

impl DestructorBegin {
    token_method!(name, IDENT);
    first_child_method!(arguments, FunctionArguments);
}

ast_node!(RegularFunctionBegin, REGULAR_FUNCTION_BEGIN);

impl RegularFunctionBegin {
    first_child_method!(return_type, TypeRef);
    token_method!(name, IDENT);
    first_child_method!(operator, Operator);
    first_child_method!(arguments, FunctionArguments);
}

ast_node!(Operator, OPERATOR);

impl Operator {
    /// Get the operator token, `None` for an empty node
    pub fn token(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| !t.kind().is_trivia())
    }
}

ast_node!(FunctionArguments, FUNCTION_ARGUMENTS);

impl FunctionArguments {
    children_method!(arguments, FunctionArgument);
}

ast_node!(FunctionArgument, FUNCTION_ARGUMENT);

impl FunctionArgument {
    first_child_method!(type_ref, TypeRef);
    token_method!(name, IDENT);
}

fn unquote(text: &str) -> String {
    text.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(text)
        .to_string()
}
