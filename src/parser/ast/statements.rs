use super::*;

ast_node!(Statements, STATEMENTS);

impl Statements {
    children_method!(statements, Stmt);
}

/// Any statement inside a statement block
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Stmt {
    If(IfStmt),
    While(WhileStmt),
    For(ForStmt),
    Select(SelectStmt),
    Try(TryStmt),
    Throw(ThrowStmt),
    Return(ReturnStmt),
    Break(BreakStmt),
    Continue(ContinueStmt),
    Variables(VariablesStmt),
    Expression(ExpressionStmt),
}

impl AstNode for Stmt {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::IF_STMT
                | SyntaxKind::WHILE_STMT
                | SyntaxKind::FOR_STMT
                | SyntaxKind::SELECT_STMT
                | SyntaxKind::TRY_STMT
                | SyntaxKind::THROW_STMT
                | SyntaxKind::RETURN_STMT
                | SyntaxKind::BREAK_STMT
                | SyntaxKind::CONTINUE_STMT
                | SyntaxKind::VARIABLES_STMT
                | SyntaxKind::EXPRESSION_STMT
        )
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::IF_STMT => Some(Self::If(IfStmt(node))),
            SyntaxKind::WHILE_STMT => Some(Self::While(WhileStmt(node))),
            SyntaxKind::FOR_STMT => Some(Self::For(ForStmt(node))),
            SyntaxKind::SELECT_STMT => Some(Self::Select(SelectStmt(node))),
            SyntaxKind::TRY_STMT => Some(Self::Try(TryStmt(node))),
            SyntaxKind::THROW_STMT => Some(Self::Throw(ThrowStmt(node))),
            SyntaxKind::RETURN_STMT => Some(Self::Return(ReturnStmt(node))),
            SyntaxKind::BREAK_STMT => Some(Self::Break(BreakStmt(node))),
            SyntaxKind::CONTINUE_STMT => Some(Self::Continue(ContinueStmt(node))),
            SyntaxKind::VARIABLES_STMT => Some(Self::Variables(VariablesStmt(node))),
            SyntaxKind::EXPRESSION_STMT => Some(Self::Expression(ExpressionStmt(node))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::If(n) => n.syntax(),
            Self::While(n) => n.syntax(),
            Self::For(n) => n.syntax(),
            Self::Select(n) => n.syntax(),
            Self::Try(n) => n.syntax(),
            Self::Throw(n) => n.syntax(),
            Self::Return(n) => n.syntax(),
            Self::Break(n) => n.syntax(),
            Self::Continue(n) => n.syntax(),
            Self::Variables(n) => n.syntax(),
            Self::Expression(n) => n.syntax(),
        }
    }
}

// ============================================================================
// Control flow
// ============================================================================

ast_node!(IfStmt, IF_STMT);

impl IfStmt {
    first_child_method!(condition, Expr);
    first_child_method!(statements, Statements);
    children_method!(elif_branches, ElifBranch);
    first_child_method!(else_branch, ElseBranch);
}

ast_node!(ElifBranch, ELIF_BRANCH);

impl ElifBranch {
    first_child_method!(condition, Expr);
    first_child_method!(statements, Statements);
}

ast_node!(ElseBranch, ELSE_BRANCH);

impl ElseBranch {
    first_child_method!(statements, Statements);
}

ast_node!(WhileStmt, WHILE_STMT);

impl WhileStmt {
    first_child_method!(condition, Expr);
    first_child_method!(statements, Statements);
}

ast_node!(ForStmt, FOR_STMT);

impl ForStmt {
    first_child_method!(statements, Statements);
    has_token_method!(is_downto, DOWNTO_KW, "for i = 10 downto 0");

    /// Get the loop variable target
    pub fn variable(&self) -> Option<Expr> {
        self.slot(SyntaxKind::FOR_VARIABLE)
    }

    /// Get the start value
    pub fn from(&self) -> Option<Expr> {
        self.slot(SyntaxKind::FOR_FROM)
    }

    /// Get the end value
    pub fn to(&self) -> Option<Expr> {
        self.slot(SyntaxKind::FOR_TO)
    }

    /// Get the optional step value
    pub fn step(&self) -> Option<Expr> {
        self.slot(SyntaxKind::FOR_STEP)
    }

    fn slot(&self, kind: SyntaxKind) -> Option<Expr> {
        self.0
            .children()
            .find(|n| n.kind() == kind)
            .and_then(|n| n.children().find_map(Expr::cast))
    }
}

ast_node!(SelectStmt, SELECT_STMT);

impl SelectStmt {
    first_child_method!(value, Expr);
    children_method!(cases, SelectCase);
    first_child_method!(else_branch, SelectElse);
}

ast_node!(SelectCase, SELECT_CASE);

impl SelectCase {
    first_child_method!(statements, Statements);

    /// Get the matched values
    pub fn values(&self) -> Vec<Expr> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::CASE_VALUES)
            .map(|n| n.children().filter_map(Expr::cast).collect())
            .unwrap_or_default()
    }
}

ast_node!(SelectElse, SELECT_ELSE);

impl SelectElse {
    first_child_method!(statements, Statements);
}

ast_node!(TryStmt, TRY_STMT);

impl TryStmt {
    first_child_method!(statements, Statements);
    children_method!(catches, CatchClause);
}

ast_node!(CatchClause, CATCH_CLAUSE);

impl CatchClause {
    first_child_method!(type_ref, TypeRef);
    token_method!(variable, IDENT);
    first_child_method!(statements, Statements);
}

// ============================================================================
// Simple statements
// ============================================================================

ast_node!(ThrowStmt, THROW_STMT);

impl ThrowStmt {
    first_child_method!(value, Expr);
}

ast_node!(ReturnStmt, RETURN_STMT);

impl ReturnStmt {
    first_child_method!(value, Expr);
}

ast_node!(BreakStmt, BREAK_STMT);
ast_node!(ContinueStmt, CONTINUE_STMT);

ast_node!(VariablesStmt, VARIABLES_STMT);

impl VariablesStmt {
    first_child_method!(type_ref, TypeRef);
    children_method!(variables, VariableDecl);
}

ast_node!(VariableDecl, VARIABLE_DECL);

impl VariableDecl {
    token_method!(name, IDENT);
    first_child_method!(value, Expr);
}

ast_node!(ExpressionStmt, EXPRESSION_STMT);

impl ExpressionStmt {
    first_child_method!(expr, Expr);
}
