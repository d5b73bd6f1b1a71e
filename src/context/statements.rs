//! Statement contexts

use text_size::TextRange;

use super::expressions::{build_expression, build_optional_expression};
use super::identifier::Identifier;
use super::type_name::TypeName;
use super::{Context, ContextNode, ContextRef, push_all, push_boxed};
use crate::parser::ast::{self, AstNode};

/// An ordered block of statements
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ContextStatements {
    range: Option<TextRange>,
    pub statements: Vec<Context>,
}

impl ContextStatements {
    /// Build a statement block; a missing block is empty
    pub(super) fn build(node: Option<&ast::Statements>) -> Self {
        let Some(node) = node else {
            return Self::default();
        };
        Self {
            range: Some(node.syntax().text_range()),
            statements: node.statements().filter_map(|s| build_statement(&s)).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

impl ContextNode for ContextStatements {
    fn range(&self) -> Option<TextRange> {
        self.range
    }

    fn children(&self) -> Vec<ContextRef<'_>> {
        let mut out = Vec::new();
        push_all(&mut out, &self.statements);
        out
    }

    fn dispose(&mut self) {
        for statement in &mut self.statements {
            statement.dispose();
        }
        self.statements.clear();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContextIf {
    range: Option<TextRange>,
    pub condition: Option<Box<Context>>,
    pub statements: Option<ContextStatements>,
    pub elifs: Vec<ContextIfElif>,
    pub else_statements: Option<ContextStatements>,
}

impl ContextNode for ContextIf {
    fn range(&self) -> Option<TextRange> {
        self.range
    }

    fn children(&self) -> Vec<ContextRef<'_>> {
        let mut out = Vec::new();
        push_boxed(&mut out, &self.condition);
        push_all(&mut out, self.statements.as_slice());
        push_all(&mut out, &self.elifs);
        if let Some(statements) = &self.else_statements {
            out.push(statements.into());
        }
        out
    }

    fn dispose(&mut self) {
        self.condition = None;
        self.statements = None;
        self.elifs.clear();
        self.else_statements = None;
    }
}

/// `elif condition` branch of an if statement
#[derive(Debug, Clone, PartialEq)]
pub struct ContextIfElif {
    range: Option<TextRange>,
    pub condition: Option<Box<Context>>,
    pub statements: Option<ContextStatements>,
}

impl ContextNode for ContextIfElif {
    fn range(&self) -> Option<TextRange> {
        self.range
    }

    fn children(&self) -> Vec<ContextRef<'_>> {
        let mut out = Vec::new();
        push_boxed(&mut out, &self.condition);
        push_all(&mut out, self.statements.as_slice());
        out
    }

    fn dispose(&mut self) {
        self.condition = None;
        self.statements = None;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContextWhile {
    range: Option<TextRange>,
    pub condition: Option<Box<Context>>,
    pub statements: Option<ContextStatements>,
}

impl ContextNode for ContextWhile {
    fn range(&self) -> Option<TextRange> {
        self.range
    }

    fn children(&self) -> Vec<ContextRef<'_>> {
        let mut out = Vec::new();
        push_boxed(&mut out, &self.condition);
        push_all(&mut out, self.statements.as_slice());
        out
    }

    fn dispose(&mut self) {
        self.condition = None;
        self.statements = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForDirection {
    /// `to`
    Up,
    /// `downto`
    Down,
}

/// `for variable = from to|downto to [step step]`
#[derive(Debug, Clone, PartialEq)]
pub struct ContextFor {
    range: Option<TextRange>,
    pub variable: Option<Box<Context>>,
    pub from: Option<Box<Context>>,
    pub to: Option<Box<Context>>,
    pub step: Option<Box<Context>>,
    pub direction: ForDirection,
    pub statements: Option<ContextStatements>,
}

impl ContextNode for ContextFor {
    fn range(&self) -> Option<TextRange> {
        self.range
    }

    fn children(&self) -> Vec<ContextRef<'_>> {
        let mut out = Vec::new();
        push_boxed(&mut out, &self.variable);
        push_boxed(&mut out, &self.from);
        push_boxed(&mut out, &self.to);
        push_boxed(&mut out, &self.step);
        push_all(&mut out, self.statements.as_slice());
        out
    }

    fn dispose(&mut self) {
        self.variable = None;
        self.from = None;
        self.to = None;
        self.step = None;
        self.statements = None;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContextSelect {
    range: Option<TextRange>,
    pub value: Option<Box<Context>>,
    pub cases: Vec<ContextSelectCase>,
    pub else_statements: Option<ContextStatements>,
}

impl ContextNode for ContextSelect {
    fn range(&self) -> Option<TextRange> {
        self.range
    }

    fn children(&self) -> Vec<ContextRef<'_>> {
        let mut out = Vec::new();
        push_boxed(&mut out, &self.value);
        push_all(&mut out, &self.cases);
        if let Some(statements) = &self.else_statements {
            out.push(statements.into());
        }
        out
    }

    fn dispose(&mut self) {
        self.value = None;
        self.cases.clear();
        self.else_statements = None;
    }
}

/// `case value, value` branch of a select statement
#[derive(Debug, Clone, PartialEq)]
pub struct ContextSelectCase {
    range: Option<TextRange>,
    pub values: Vec<Context>,
    pub statements: Option<ContextStatements>,
}

impl ContextNode for ContextSelectCase {
    fn range(&self) -> Option<TextRange> {
        self.range
    }

    fn children(&self) -> Vec<ContextRef<'_>> {
        let mut out = Vec::new();
        push_all(&mut out, &self.values);
        push_all(&mut out, self.statements.as_slice());
        out
    }

    fn dispose(&mut self) {
        self.values.clear();
        self.statements = None;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContextTry {
    range: Option<TextRange>,
    pub statements: Option<ContextStatements>,
    pub catches: Vec<ContextTryCatch>,
}

impl ContextNode for ContextTry {
    fn range(&self) -> Option<TextRange> {
        self.range
    }

    fn children(&self) -> Vec<ContextRef<'_>> {
        let mut out = Vec::new();
        push_all(&mut out, self.statements.as_slice());
        push_all(&mut out, &self.catches);
        out
    }

    fn dispose(&mut self) {
        self.statements = None;
        self.catches.clear();
    }
}

/// `catch Type variable` handler
#[derive(Debug, Clone, PartialEq)]
pub struct ContextTryCatch {
    range: Option<TextRange>,
    pub caught_type: TypeName,
    pub variable: Identifier,
    pub statements: Option<ContextStatements>,
}

impl ContextNode for ContextTryCatch {
    fn range(&self) -> Option<TextRange> {
        self.range
    }

    fn children(&self) -> Vec<ContextRef<'_>> {
        let mut out = Vec::new();
        push_all(&mut out, self.statements.as_slice());
        out
    }

    fn dispose(&mut self) {
        self.statements = None;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContextThrow {
    range: Option<TextRange>,
    pub value: Option<Box<Context>>,
}

impl ContextNode for ContextThrow {
    fn range(&self) -> Option<TextRange> {
        self.range
    }

    fn children(&self) -> Vec<ContextRef<'_>> {
        let mut out = Vec::new();
        push_boxed(&mut out, &self.value);
        out
    }

    fn dispose(&mut self) {
        self.value = None;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContextReturn {
    range: Option<TextRange>,
    pub value: Option<Box<Context>>,
}

impl ContextNode for ContextReturn {
    fn range(&self) -> Option<TextRange> {
        self.range
    }

    fn children(&self) -> Vec<ContextRef<'_>> {
        let mut out = Vec::new();
        push_boxed(&mut out, &self.value);
        out
    }

    fn dispose(&mut self) {
        self.value = None;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContextBreak {
    range: Option<TextRange>,
}

impl ContextNode for ContextBreak {
    fn range(&self) -> Option<TextRange> {
        self.range
    }

    fn children(&self) -> Vec<ContextRef<'_>> {
        Vec::new()
    }

    fn dispose(&mut self) {}
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContextContinue {
    range: Option<TextRange>,
}

impl ContextNode for ContextContinue {
    fn range(&self) -> Option<TextRange> {
        self.range
    }

    fn children(&self) -> Vec<ContextRef<'_>> {
        Vec::new()
    }

    fn dispose(&mut self) {}
}

/// `var Type a = 1, b`
#[derive(Debug, Clone, PartialEq)]
pub struct ContextVariables {
    range: Option<TextRange>,
    pub type_name: TypeName,
    pub variables: Vec<ContextVariable>,
}

impl ContextNode for ContextVariables {
    fn range(&self) -> Option<TextRange> {
        self.range
    }

    fn children(&self) -> Vec<ContextRef<'_>> {
        let mut out = Vec::new();
        push_all(&mut out, &self.variables);
        out
    }

    fn dispose(&mut self) {
        for variable in &mut self.variables {
            variable.dispose();
        }
        self.variables.clear();
    }
}

/// One local variable of a `var` statement
#[derive(Debug, Clone, PartialEq)]
pub struct ContextVariable {
    range: Option<TextRange>,
    pub type_name: TypeName,
    pub name: Identifier,
    pub value: Option<Box<Context>>,
}

impl ContextNode for ContextVariable {
    fn range(&self) -> Option<TextRange> {
        self.range
    }

    fn children(&self) -> Vec<ContextRef<'_>> {
        let mut out = Vec::new();
        push_boxed(&mut out, &self.value);
        out
    }

    fn dispose(&mut self) {
        self.value = None;
    }
}

// ============================================================================
// Building
// ============================================================================

/// Build one statement; an expression statement becomes its expression
fn build_statement(statement: &ast::Stmt) -> Option<Context> {
    let range = Some(statement.syntax().text_range());
    let context = match statement {
        ast::Stmt::If(node) => ContextIf {
            range,
            condition: build_optional_expression(node.condition()),
            statements: Some(ContextStatements::build(node.statements().as_ref())),
            elifs: node
                .elif_branches()
                .map(|elif| ContextIfElif {
                    range: Some(elif.syntax().text_range()),
                    condition: build_optional_expression(elif.condition()),
                    statements: Some(ContextStatements::build(elif.statements().as_ref())),
                })
                .collect(),
            else_statements: node
                .else_branch()
                .map(|branch| ContextStatements::build(branch.statements().as_ref())),
        }
        .into(),
        ast::Stmt::While(node) => ContextWhile {
            range,
            condition: build_optional_expression(node.condition()),
            statements: Some(ContextStatements::build(node.statements().as_ref())),
        }
        .into(),
        ast::Stmt::For(node) => ContextFor {
            range,
            variable: build_optional_expression(node.variable()),
            from: build_optional_expression(node.from()),
            to: build_optional_expression(node.to()),
            step: build_optional_expression(node.step()),
            direction: if node.is_downto() {
                ForDirection::Down
            } else {
                ForDirection::Up
            },
            statements: Some(ContextStatements::build(node.statements().as_ref())),
        }
        .into(),
        ast::Stmt::Select(node) => ContextSelect {
            range,
            value: build_optional_expression(node.value()),
            cases: node
                .cases()
                .map(|case| ContextSelectCase {
                    range: Some(case.syntax().text_range()),
                    values: case.values().iter().map(build_expression).collect(),
                    statements: Some(ContextStatements::build(case.statements().as_ref())),
                })
                .collect(),
            else_statements: node
                .else_branch()
                .map(|branch| ContextStatements::build(branch.statements().as_ref())),
        }
        .into(),
        ast::Stmt::Try(node) => ContextTry {
            range,
            statements: Some(ContextStatements::build(node.statements().as_ref())),
            catches: node
                .catches()
                .map(|catch| ContextTryCatch {
                    range: Some(catch.syntax().text_range()),
                    caught_type: TypeName::from_type_ref(catch.type_ref().as_ref()),
                    variable: Identifier::from_token(catch.variable().as_ref()),
                    statements: Some(ContextStatements::build(catch.statements().as_ref())),
                })
                .collect(),
        }
        .into(),
        ast::Stmt::Throw(node) => ContextThrow {
            range,
            value: build_optional_expression(node.value()),
        }
        .into(),
        ast::Stmt::Return(node) => ContextReturn {
            range,
            value: build_optional_expression(node.value()),
        }
        .into(),
        ast::Stmt::Break(_) => ContextBreak { range }.into(),
        ast::Stmt::Continue(_) => ContextContinue { range }.into(),
        ast::Stmt::Variables(node) => {
            let type_name = TypeName::from_type_ref(node.type_ref().as_ref());
            let variables = node
                .variables()
                .map(|variable| ContextVariable {
                    range: Some(variable.syntax().text_range()),
                    type_name: type_name.clone(),
                    name: Identifier::from_token(variable.name().as_ref()),
                    value: build_optional_expression(variable.value()),
                })
                .collect();
            ContextVariables {
                range,
                type_name,
                variables,
            }
            .into()
        }
        ast::Stmt::Expression(node) => match node.expr() {
            Some(expr) => build_expression(&expr),
            None => {
                tracing::trace!(?range, "expression statement without expression");
                return None;
            }
        },
    };
    Some(context)
}
