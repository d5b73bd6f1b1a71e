//! Function contexts: constructors, destructors, operators and regular methods

use text_size::TextRange;

use super::documentation::ContextDocumentation;
use super::expressions::build_expression;
use super::identifier::Identifier;
use super::modifiers::{TypeModifier, TypeModifierSet};
use super::statements::ContextStatements;
use super::type_name::TypeName;
use super::{Context, ContextNode, ContextRef, push_all};
use crate::parser::ast::{self, AstNode};
use crate::parser::{SyntaxKind, SyntaxToken};

/// Overloadable operators and their spelling, in lookup order
pub const OPERATOR_TABLE: &[(SyntaxKind, &str)] = &[
    (SyntaxKind::STAR_EQ, "*="),
    (SyntaxKind::SLASH_EQ, "/="),
    (SyntaxKind::PERCENT_EQ, "%="),
    (SyntaxKind::PLUS_EQ, "+="),
    (SyntaxKind::MINUS_EQ, "-="),
    (SyntaxKind::SHL_EQ, "<<="),
    (SyntaxKind::SHR_EQ, ">>="),
    (SyntaxKind::AMP_EQ, "&="),
    (SyntaxKind::PIPE_EQ, "|="),
    (SyntaxKind::AMP, "&"),
    (SyntaxKind::PIPE, "|"),
    (SyntaxKind::CARET, "^"),
    (SyntaxKind::SHL, "<<"),
    (SyntaxKind::SHR, ">>"),
    (SyntaxKind::LT, "<"),
    (SyntaxKind::GT, ">"),
    (SyntaxKind::LT_EQ, "<="),
    (SyntaxKind::GT_EQ, ">="),
    (SyntaxKind::STAR, "*"),
    (SyntaxKind::SLASH, "/"),
    (SyntaxKind::PERCENT, "%"),
    (SyntaxKind::PLUS, "+"),
    (SyntaxKind::MINUS, "-"),
    (SyntaxKind::PLUS_PLUS, "++"),
    (SyntaxKind::MINUS_MINUS, "--"),
    (SyntaxKind::TILDE, "~"),
];

/// Spelling of an overloadable operator token kind
pub fn resolve_operator(kind: SyntaxKind) -> Option<&'static str> {
    OPERATOR_TABLE
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, spelling)| *spelling)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionType {
    Constructor,
    Destructor,
    Operator,
    Regular,
}

/// Explicit `this(...)` or `super(...)` call of a constructor
#[derive(Debug, Clone, PartialEq)]
pub enum ConstructorDelegation {
    This(Vec<Context>),
    Super(Vec<Context>),
}

impl ConstructorDelegation {
    pub fn arguments(&self) -> &[Context] {
        match self {
            Self::This(args) | Self::Super(args) => args,
        }
    }

    fn arguments_mut(&mut self) -> &mut Vec<Context> {
        match self {
            Self::This(args) | Self::Super(args) => args,
        }
    }
}

/// One `Type name` pair of an argument list
#[derive(Debug, Clone, PartialEq)]
pub struct ContextFunctionArgument {
    range: Option<TextRange>,
    pub type_name: TypeName,
    pub name: Identifier,
}

impl ContextFunctionArgument {
    pub(super) fn build(argument: &ast::FunctionArgument) -> Self {
        Self {
            range: Some(argument.syntax().text_range()),
            type_name: TypeName::from_type_ref(argument.type_ref().as_ref()),
            name: Identifier::from_token(argument.name().as_ref()),
        }
    }

    /// Block arguments may omit their type; they are then `Object`
    pub(super) fn build_untyped(argument: &ast::FunctionArgument) -> Self {
        let mut context = Self::build(argument);
        if argument.type_ref().is_none() {
            context.type_name = TypeName::named("Object");
        }
        context
    }
}

impl ContextNode for ContextFunctionArgument {
    fn range(&self) -> Option<TextRange> {
        self.range
    }

    fn children(&self) -> Vec<ContextRef<'_>> {
        Vec::new()
    }

    fn dispose(&mut self) {}
}

/// Which function-begin alternative the grammar produced
#[derive(Debug, Clone)]
pub enum FunctionBeginShape {
    /// No function-begin node at all
    Missing,
    Constructor(ast::ConstructorBegin),
    Destructor(ast::DestructorBegin),
    /// Regular function with a plain name
    Named(ast::RegularFunctionBegin, SyntaxToken),
    /// Operator overload; the token is absent if the operator node is empty
    Operator(ast::RegularFunctionBegin, Option<SyntaxToken>),
    /// Regular alternative with neither name nor operator
    Unnamed(ast::RegularFunctionBegin),
    /// Function-begin node without any alternative
    Empty,
}

impl FunctionBeginShape {
    pub fn classify(begin: Option<&ast::FunctionBegin>) -> Self {
        let Some(begin) = begin else {
            return Self::Missing;
        };
        if let Some(constructor) = begin.constructor() {
            return Self::Constructor(constructor);
        }
        if let Some(destructor) = begin.destructor() {
            return Self::Destructor(destructor);
        }
        let Some(regular) = begin.regular() else {
            return Self::Empty;
        };
        if let Some(name) = regular.name() {
            return Self::Named(regular, name);
        }
        match regular.operator() {
            Some(operator) => {
                let token = operator.token();
                Self::Operator(regular, token)
            }
            None => Self::Unnamed(regular),
        }
    }

    /// False for the shapes that build the placeholder floor
    pub fn has_alternative(&self) -> bool {
        !matches!(self, Self::Missing | Self::Empty)
    }
}

/// A function-like class or interface member
#[derive(Debug, Clone, PartialEq)]
pub struct ContextFunction {
    range: Option<TextRange>,
    pub function_type: FunctionType,
    pub modifiers: TypeModifierSet,
    pub name: Identifier,
    pub return_type: Option<TypeName>,
    pub arguments: Vec<ContextFunctionArgument>,
    /// Constructors only
    pub delegation: Option<ConstructorDelegation>,
    /// Absent for interface, abstract and native functions
    pub body: Option<ContextStatements>,
    pub documentation: Option<ContextDocumentation>,
}

impl ContextFunction {
    /// Build from a class member; `owner` is the qualified name of the class
    pub fn from_class_function(
        node: &ast::ClassFunction,
        owner: &str,
        documentation: Option<ContextDocumentation>,
    ) -> Self {
        let shape = FunctionBeginShape::classify(node.begin().as_ref());
        let has_begin = shape.has_alternative();
        let mut function = Self::from_shape(
            node.syntax().text_range(),
            shape,
            TypeModifierSet::from_ast(node.modifiers().as_ref()),
            owner,
        );
        if has_begin {
            function.body = node
                .statements()
                .map(|statements| ContextStatements::build(Some(&statements)));
        }
        function.documentation = documentation;
        function
    }

    /// Build from an interface member; these never have a body
    pub fn from_interface_function(
        node: &ast::InterfaceFunction,
        owner: &str,
        documentation: Option<ContextDocumentation>,
    ) -> Self {
        let mut function = Self::from_shape(
            node.syntax().text_range(),
            FunctionBeginShape::classify(node.begin().as_ref()),
            TypeModifierSet::from_ast(node.modifiers().as_ref()),
            owner,
        );
        function.documentation = documentation;
        function
    }

    fn from_shape(
        range: TextRange,
        shape: FunctionBeginShape,
        modifiers: TypeModifierSet,
        owner: &str,
    ) -> Self {
        let mut function = Self::floor(range, modifiers);
        match shape {
            FunctionBeginShape::Missing | FunctionBeginShape::Empty => {
                tracing::trace!(?range, "function without a begin alternative");
            }
            FunctionBeginShape::Constructor(begin) => {
                function.function_type = FunctionType::Constructor;
                function.name = Identifier::new(
                    "new",
                    begin.new_token().map(|t| t.text_range()),
                );
                function.modifiers = modifiers.with(TypeModifier::Static);
                function.return_type = Some(TypeName::named(owner));
                function.arguments = build_arguments(begin.arguments());
                function.delegation = begin.call().and_then(|call| build_delegation(&call));
            }
            FunctionBeginShape::Destructor(begin) => {
                function.function_type = FunctionType::Destructor;
                function.name = Identifier::new(
                    "destructor",
                    begin.name().map(|t| t.text_range()),
                );
            }
            FunctionBeginShape::Named(begin, name) => {
                function.name = Identifier::from_token(Some(&name));
                function.return_type =
                    Some(TypeName::from_type_ref(begin.return_type().as_ref()));
                function.arguments = build_arguments(begin.arguments());
            }
            FunctionBeginShape::Operator(begin, token) => {
                let spelling = token
                    .as_ref()
                    .and_then(|t| resolve_operator(t.kind()).map(|s| (s, t.text_range())));
                match spelling {
                    Some((spelling, token_range)) => {
                        function.function_type = FunctionType::Operator;
                        function.name = Identifier::new(spelling, Some(token_range));
                        function.return_type = Some(TypeName::named(owner));
                    }
                    None => {
                        tracing::warn!(
                            ?range,
                            token = ?token.as_ref().map(|t| t.kind()),
                            "operator function without a known operator token"
                        );
                    }
                }
                function.arguments = build_arguments(begin.arguments());
            }
            FunctionBeginShape::Unnamed(begin) => {
                tracing::trace!(?range, "regular function without a name");
                function.arguments = build_arguments(begin.arguments());
            }
        }
        function
    }

    /// Regular function named `"??"` returning void
    fn floor(range: TextRange, modifiers: TypeModifierSet) -> Self {
        Self {
            range: Some(range),
            function_type: FunctionType::Regular,
            modifiers,
            name: Identifier::placeholder(),
            return_type: Some(TypeName::void(None)),
            arguments: Vec::new(),
            delegation: None,
            body: None,
            documentation: None,
        }
    }

    pub fn this_call(&self) -> Option<&[Context]> {
        match &self.delegation {
            Some(ConstructorDelegation::This(args)) => Some(args),
            _ => None,
        }
    }

    pub fn super_call(&self) -> Option<&[Context]> {
        match &self.delegation {
            Some(ConstructorDelegation::Super(args)) => Some(args),
            _ => None,
        }
    }

    pub fn is_abstract(&self) -> bool {
        self.modifiers.contains(TypeModifier::Abstract)
    }

    /// One-line signature, e.g. `public func int add(int a, int b)`
    pub fn signature(&self) -> String {
        let mut out = String::new();
        if !self.modifiers.is_empty() {
            out.push_str(&self.modifiers.to_string());
            out.push(' ');
        }
        out.push_str("func ");
        match self.function_type {
            FunctionType::Constructor | FunctionType::Destructor => {}
            FunctionType::Operator | FunctionType::Regular => {
                if let Some(return_type) = &self.return_type {
                    out.push_str(return_type.name());
                    out.push(' ');
                }
            }
        }
        out.push_str(self.name.name());
        out.push('(');
        let arguments: Vec<String> = self
            .arguments
            .iter()
            .map(|a| format!("{} {}", a.type_name, a.name))
            .collect();
        out.push_str(&arguments.join(", "));
        out.push(')');
        out
    }
}

impl ContextNode for ContextFunction {
    fn range(&self) -> Option<TextRange> {
        self.range
    }

    fn children(&self) -> Vec<ContextRef<'_>> {
        let mut out = Vec::new();
        if let Some(documentation) = &self.documentation {
            out.push(documentation.into());
        }
        push_all(&mut out, &self.arguments);
        if let Some(delegation) = &self.delegation {
            push_all(&mut out, delegation.arguments());
        }
        if let Some(body) = &self.body {
            out.push(body.into());
        }
        out
    }

    fn dispose(&mut self) {
        self.return_type = None;
        self.arguments.clear();
        if let Some(delegation) = &mut self.delegation {
            delegation.arguments_mut().clear();
        }
        self.delegation = None;
        if let Some(body) = &mut self.body {
            body.dispose();
        }
        self.body = None;
        self.documentation = None;
    }
}

fn build_arguments(arguments: Option<ast::FunctionArguments>) -> Vec<ContextFunctionArgument> {
    arguments
        .map(|list| {
            list.arguments()
                .map(|a| ContextFunctionArgument::build(&a))
                .collect()
        })
        .unwrap_or_default()
}

fn build_delegation(call: &ast::ConstructorCall) -> Option<ConstructorDelegation> {
    let arguments = || -> Vec<Context> {
        call.arguments()
            .map(|list| list.args().map(|e| build_expression(&e)).collect())
            .unwrap_or_default()
    };
    match call.keyword().map(|t| t.kind()) {
        Some(SyntaxKind::THIS_KW) => Some(ConstructorDelegation::This(arguments())),
        Some(SyntaxKind::SUPER_KW) => Some(ConstructorDelegation::Super(arguments())),
        _ => {
            tracing::trace!(range = ?call.syntax().text_range(), "constructor call without keyword");
            None
        }
    }
}
