//! Expression contexts

use smol_str::SmolStr;
use text_size::TextRange;

use super::function::ContextFunctionArgument;
use super::identifier::Identifier;
use super::statements::ContextStatements;
use super::type_name::TypeName;
use super::{Context, ContextNode, ContextRef, push_all, push_boxed};
use crate::parser::SyntaxKind;
use crate::parser::ast::{self, AstNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Binary,
    Assignment,
    Prefix,
    Postfix,
}

/// Binary, assignment, prefix or postfix operation
#[derive(Debug, Clone, PartialEq)]
pub struct ContextOperation {
    range: Option<TextRange>,
    pub kind: OperationKind,
    /// Operator spelling and range (`"??"` if missing)
    pub operator: Identifier,
    /// Left operand; the operand of a postfix operation
    pub left: Option<Box<Context>>,
    /// Right operand; the operand of a prefix operation
    pub right: Option<Box<Context>>,
}

impl ContextOperation {
    /// Check whether the operation writes to its left operand
    pub fn is_modification(&self) -> bool {
        self.kind == OperationKind::Assignment
            || (self.kind != OperationKind::Binary
                && matches!(self.operator.name(), "++" | "--"))
    }
}

impl ContextNode for ContextOperation {
    fn range(&self) -> Option<TextRange> {
        self.range
    }

    fn children(&self) -> Vec<ContextRef<'_>> {
        let mut out = Vec::new();
        push_boxed(&mut out, &self.left);
        push_boxed(&mut out, &self.right);
        out
    }

    fn dispose(&mut self) {
        self.left = None;
        self.right = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialOperator {
    Cast,
    Castable,
    Typeof,
}

impl SpecialOperator {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Cast => "cast",
            Self::Castable => "castable",
            Self::Typeof => "typeof",
        }
    }
}

/// `value cast Type`, `value castable Type` or `value typeof Type`
#[derive(Debug, Clone, PartialEq)]
pub struct ContextSpecialOperation {
    range: Option<TextRange>,
    pub operator: SpecialOperator,
    pub operator_range: Option<TextRange>,
    pub operand: Option<Box<Context>>,
    pub target_type: TypeName,
}

impl ContextNode for ContextSpecialOperation {
    fn range(&self) -> Option<TextRange> {
        self.range
    }

    fn children(&self) -> Vec<ContextRef<'_>> {
        let mut out = Vec::new();
        push_boxed(&mut out, &self.operand);
        out
    }

    fn dispose(&mut self) {
        self.operand = None;
    }
}

/// `condition if whenTrue else whenFalse`
#[derive(Debug, Clone, PartialEq)]
pub struct ContextInlineIf {
    range: Option<TextRange>,
    pub condition: Option<Box<Context>>,
    pub if_true: Option<Box<Context>>,
    pub if_false: Option<Box<Context>>,
}

impl ContextNode for ContextInlineIf {
    fn range(&self) -> Option<TextRange> {
        self.range
    }

    fn children(&self) -> Vec<ContextRef<'_>> {
        let mut out = Vec::new();
        push_boxed(&mut out, &self.condition);
        push_boxed(&mut out, &self.if_true);
        push_boxed(&mut out, &self.if_false);
        out
    }

    fn dispose(&mut self) {
        self.condition = None;
        self.if_true = None;
        self.if_false = None;
    }
}

/// Member access `object.name`, or a bare `name` without object
#[derive(Debug, Clone, PartialEq)]
pub struct ContextMember {
    range: Option<TextRange>,
    pub object: Option<Box<Context>>,
    pub name: Identifier,
}

impl ContextNode for ContextMember {
    fn range(&self) -> Option<TextRange> {
        self.range
    }

    fn children(&self) -> Vec<ContextRef<'_>> {
        let mut out = Vec::new();
        push_boxed(&mut out, &self.object);
        out
    }

    fn dispose(&mut self) {
        self.object = None;
    }
}

/// Call `object.name(arguments)` or `name(arguments)`
#[derive(Debug, Clone, PartialEq)]
pub struct ContextFunctionCall {
    range: Option<TextRange>,
    pub object: Option<Box<Context>>,
    pub name: Identifier,
    pub arguments: Vec<Context>,
}

impl ContextNode for ContextFunctionCall {
    fn range(&self) -> Option<TextRange> {
        self.range
    }

    fn children(&self) -> Vec<ContextRef<'_>> {
        let mut out = Vec::new();
        push_boxed(&mut out, &self.object);
        push_all(&mut out, &self.arguments);
        out
    }

    fn dispose(&mut self) {
        self.object = None;
        self.arguments.clear();
    }
}

/// Block (closure) expression
#[derive(Debug, Clone, PartialEq)]
pub struct ContextBlock {
    range: Option<TextRange>,
    pub arguments: Vec<ContextFunctionArgument>,
    pub statements: Option<ContextStatements>,
}

impl ContextNode for ContextBlock {
    fn range(&self) -> Option<TextRange> {
        self.range
    }

    fn children(&self) -> Vec<ContextRef<'_>> {
        let mut out = Vec::new();
        push_all(&mut out, &self.arguments);
        push_all(&mut out, self.statements.as_slice());
        out
    }

    fn dispose(&mut self) {
        self.arguments.clear();
        self.statements = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstantKind {
    Integer,
    Float,
    Hex,
    Character,
    String,
    True,
    False,
    Null,
    This,
    Super,
}

impl ConstantKind {
    fn from_kind(kind: SyntaxKind) -> Option<Self> {
        match kind {
            SyntaxKind::INTEGER => Some(Self::Integer),
            SyntaxKind::FLOAT => Some(Self::Float),
            SyntaxKind::HEX => Some(Self::Hex),
            SyntaxKind::CHARACTER => Some(Self::Character),
            SyntaxKind::STRING => Some(Self::String),
            SyntaxKind::TRUE_KW => Some(Self::True),
            SyntaxKind::FALSE_KW => Some(Self::False),
            SyntaxKind::NULL_KW => Some(Self::Null),
            SyntaxKind::THIS_KW => Some(Self::This),
            SyntaxKind::SUPER_KW => Some(Self::Super),
            _ => None,
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Float | Self::Hex)
    }

    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            Self::True | Self::False | Self::Null | Self::This | Self::Super
        )
    }
}

/// Literal constant
#[derive(Debug, Clone, PartialEq)]
pub struct ContextConstant {
    range: Option<TextRange>,
    pub kind: ConstantKind,
    pub text: SmolStr,
}

impl ContextNode for ContextConstant {
    fn range(&self) -> Option<TextRange> {
        self.range
    }

    fn children(&self) -> Vec<ContextRef<'_>> {
        Vec::new()
    }

    fn dispose(&mut self) {}
}

/// Parenthesised expression
#[derive(Debug, Clone, PartialEq)]
pub struct ContextGroup {
    range: Option<TextRange>,
    pub expression: Option<Box<Context>>,
}

impl ContextNode for ContextGroup {
    fn range(&self) -> Option<TextRange> {
        self.range
    }

    fn children(&self) -> Vec<ContextRef<'_>> {
        let mut out = Vec::new();
        push_boxed(&mut out, &self.expression);
        out
    }

    fn dispose(&mut self) {
        self.expression = None;
    }
}

// ============================================================================
// Building
// ============================================================================

pub(super) fn build_optional_expression(expr: Option<ast::Expr>) -> Option<Box<Context>> {
    expr.map(|e| Box::new(build_expression(&e)))
}

/// Build the context of one expression node
pub(super) fn build_expression(expr: &ast::Expr) -> Context {
    let range = Some(expr.syntax().text_range());
    match expr {
        ast::Expr::Binary(binary) => {
            let kind = if binary.is_assignment() {
                OperationKind::Assignment
            } else {
                OperationKind::Binary
            };
            ContextOperation {
                range,
                kind,
                operator: Identifier::from_token(binary.op_token().as_ref()),
                left: build_optional_expression(binary.lhs()),
                right: build_optional_expression(binary.rhs()),
            }
            .into()
        }
        ast::Expr::Prefix(prefix) => ContextOperation {
            range,
            kind: OperationKind::Prefix,
            operator: Identifier::from_token(prefix.op_token().as_ref()),
            left: None,
            right: build_optional_expression(prefix.operand()),
        }
        .into(),
        ast::Expr::Postfix(postfix) => ContextOperation {
            range,
            kind: OperationKind::Postfix,
            operator: Identifier::from_token(postfix.op_token().as_ref()),
            left: build_optional_expression(postfix.operand()),
            right: None,
        }
        .into(),
        ast::Expr::Cast(cast) => {
            let token = cast.op_token();
            let operator = match token.as_ref().map(|t| t.kind()) {
                Some(SyntaxKind::CASTABLE_KW) => SpecialOperator::Castable,
                Some(SyntaxKind::TYPEOF_KW) => SpecialOperator::Typeof,
                _ => SpecialOperator::Cast,
            };
            ContextSpecialOperation {
                range,
                operator,
                operator_range: token.map(|t| t.text_range()),
                operand: build_optional_expression(cast.operand()),
                target_type: TypeName::from_type_ref(cast.target_type().as_ref()),
            }
            .into()
        }
        ast::Expr::InlineIf(inline_if) => ContextInlineIf {
            range,
            condition: build_optional_expression(inline_if.condition()),
            if_true: build_optional_expression(inline_if.if_true()),
            if_false: build_optional_expression(inline_if.if_false()),
        }
        .into(),
        ast::Expr::Member(member) => ContextMember {
            range,
            object: build_optional_expression(member.object()),
            name: Identifier::from_token(member.name().as_ref()),
        }
        .into(),
        ast::Expr::NameRef(name_ref) => ContextMember {
            range,
            object: None,
            name: Identifier::from_token(name_ref.name().as_ref()),
        }
        .into(),
        ast::Expr::Call(call) => build_call(call, range),
        ast::Expr::Literal(literal) => {
            let token = literal.token();
            let kind = token
                .as_ref()
                .and_then(|t| ConstantKind::from_kind(t.kind()))
                .unwrap_or(ConstantKind::Null);
            ContextConstant {
                range,
                kind,
                text: token
                    .map(|t| SmolStr::new(t.text()))
                    .unwrap_or_else(|| SmolStr::new_static(super::PLACEHOLDER)),
            }
            .into()
        }
        ast::Expr::Paren(paren) => ContextGroup {
            range,
            expression: build_optional_expression(paren.expr()),
        }
        .into(),
        ast::Expr::Block(block) => ContextBlock {
            range,
            arguments: block
                .arguments()
                .map(|args| {
                    args.arguments()
                        .map(|arg| ContextFunctionArgument::build_untyped(&arg))
                        .collect()
                })
                .unwrap_or_default(),
            statements: Some(ContextStatements::build(block.statements().as_ref())),
        }
        .into(),
    }
}

fn build_call(call: &ast::CallExpr, range: Option<TextRange>) -> Context {
    let arguments = call
        .arguments()
        .map(|args| args.args().map(|a| build_expression(&a)).collect())
        .unwrap_or_default();

    let (object, name) = match call.callee() {
        Some(ast::Expr::Member(member)) => (
            build_optional_expression(member.object()),
            Identifier::from_token(member.name().as_ref()),
        ),
        Some(ast::Expr::NameRef(name_ref)) => {
            (None, Identifier::from_token(name_ref.name().as_ref()))
        }
        Some(other) => {
            tracing::trace!(kind = ?other.syntax().kind(), "call without a named callee");
            (Some(Box::new(build_expression(&other))), Identifier::placeholder())
        }
        None => (None, Identifier::placeholder()),
    };

    ContextFunctionCall {
        range,
        object,
        name,
        arguments,
    }
    .into()
}
