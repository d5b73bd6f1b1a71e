use super::*;

/// Any expression node
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    Binary(BinaryExpr),
    Prefix(PrefixExpr),
    Postfix(PostfixExpr),
    Cast(CastExpr),
    InlineIf(InlineIfExpr),
    Member(MemberExpr),
    Call(CallExpr),
    NameRef(NameRef),
    Literal(Literal),
    Paren(ParenExpr),
    Block(BlockExpr),
}

impl AstNode for Expr {
    fn can_cast(kind: SyntaxKind) -> bool {
        matches!(
            kind,
            SyntaxKind::BINARY_EXPR
                | SyntaxKind::PREFIX_EXPR
                | SyntaxKind::POSTFIX_EXPR
                | SyntaxKind::CAST_EXPR
                | SyntaxKind::INLINE_IF_EXPR
                | SyntaxKind::MEMBER_EXPR
                | SyntaxKind::CALL_EXPR
                | SyntaxKind::NAME_REF
                | SyntaxKind::LITERAL
                | SyntaxKind::PAREN_EXPR
                | SyntaxKind::BLOCK_EXPR
        )
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::BINARY_EXPR => Some(Self::Binary(BinaryExpr(node))),
            SyntaxKind::PREFIX_EXPR => Some(Self::Prefix(PrefixExpr(node))),
            SyntaxKind::POSTFIX_EXPR => Some(Self::Postfix(PostfixExpr(node))),
            SyntaxKind::CAST_EXPR => Some(Self::Cast(CastExpr(node))),
            SyntaxKind::INLINE_IF_EXPR => Some(Self::InlineIf(InlineIfExpr(node))),
            SyntaxKind::MEMBER_EXPR => Some(Self::Member(MemberExpr(node))),
            SyntaxKind::CALL_EXPR => Some(Self::Call(CallExpr(node))),
            SyntaxKind::NAME_REF => Some(Self::NameRef(NameRef(node))),
            SyntaxKind::LITERAL => Some(Self::Literal(Literal(node))),
            SyntaxKind::PAREN_EXPR => Some(Self::Paren(ParenExpr(node))),
            SyntaxKind::BLOCK_EXPR => Some(Self::Block(BlockExpr(node))),
            _ => None,
        }
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Self::Binary(n) => n.syntax(),
            Self::Prefix(n) => n.syntax(),
            Self::Postfix(n) => n.syntax(),
            Self::Cast(n) => n.syntax(),
            Self::InlineIf(n) => n.syntax(),
            Self::Member(n) => n.syntax(),
            Self::Call(n) => n.syntax(),
            Self::NameRef(n) => n.syntax(),
            Self::Literal(n) => n.syntax(),
            Self::Paren(n) => n.syntax(),
            Self::Block(n) => n.syntax(),
        }
    }
}

/// Find the first direct operator token of an operation node
fn operator_token(node: &SyntaxNode) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .find(|t| {
            t.kind().is_punct()
                || matches!(
                    t.kind(),
                    SyntaxKind::AND_KW | SyntaxKind::OR_KW | SyntaxKind::NOT_KW
                )
        })
}

// ============================================================================
// Operations
// ============================================================================

ast_node!(BinaryExpr, BINARY_EXPR);

impl BinaryExpr {
    /// Get the left operand
    pub fn lhs(&self) -> Option<Expr> {
        nth_child(&self.0, 0)
    }

    /// Get the right operand
    pub fn rhs(&self) -> Option<Expr> {
        nth_child(&self.0, 1)
    }

    /// Get the operator token
    pub fn op_token(&self) -> Option<SyntaxToken> {
        operator_token(&self.0)
    }

    /// Check if this is an assignment (`=`, `+=`, ...)
    pub fn is_assignment(&self) -> bool {
        self.op_token().is_some_and(|t| t.kind().is_assignment())
    }
}

ast_node!(PrefixExpr, PREFIX_EXPR);

impl PrefixExpr {
    first_child_method!(operand, Expr);

    /// Get the operator token
    pub fn op_token(&self) -> Option<SyntaxToken> {
        operator_token(&self.0)
    }
}

ast_node!(PostfixExpr, POSTFIX_EXPR);

impl PostfixExpr {
    first_child_method!(operand, Expr);

    /// Get the operator token
    pub fn op_token(&self) -> Option<SyntaxToken> {
        operator_token(&self.0)
    }
}

ast_node!(CastExpr, CAST_EXPR);

impl CastExpr {
    first_child_method!(operand, Expr);
    first_child_method!(target_type, TypeRef);
    find_token_method!(
        op_token,
        [CAST_KW, CASTABLE_KW, TYPEOF_KW],
        "Get the `cast`, `castable` or `typeof` keyword."
    );
}

ast_node!(InlineIfExpr, INLINE_IF_EXPR);

impl InlineIfExpr {
    /// Get the condition (`cond` in `cond if a else b`)
    pub fn condition(&self) -> Option<Expr> {
        nth_child(&self.0, 0)
    }

    /// Get the value if the condition holds
    pub fn if_true(&self) -> Option<Expr> {
        nth_child(&self.0, 1)
    }

    /// Get the value if the condition does not hold
    pub fn if_false(&self) -> Option<Expr> {
        nth_child(&self.0, 2)
    }
}

// ============================================================================
// Members and calls
// ============================================================================

ast_node!(MemberExpr, MEMBER_EXPR);

impl MemberExpr {
    first_child_method!(object, Expr);

    /// Get the member name token (an identifier or `new`)
    pub fn name(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .skip_while(|t| t.kind() != SyntaxKind::DOT)
            .find(|t| matches!(t.kind(), SyntaxKind::IDENT | SyntaxKind::NEW_KW))
    }
}

ast_node!(CallExpr, CALL_EXPR);

impl CallExpr {
    first_child_method!(callee, Expr);
    first_child_method!(arguments, ArgumentList);
}

ast_node!(ArgumentList, ARGUMENT_LIST);

impl ArgumentList {
    children_method!(args, Expr);
}

ast_node!(NameRef, NAME_REF);

impl NameRef {
    token_method!(name, IDENT);
}

// ============================================================================
// Primaries
// ============================================================================

ast_node!(Literal, LITERAL);

impl Literal {
    /// Get the literal token
    pub fn token(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| !t.kind().is_trivia())
    }
}

ast_node!(ParenExpr, PAREN_EXPR);

impl ParenExpr {
    first_child_method!(expr, Expr);
}

ast_node!(BlockExpr, BLOCK_EXPR);

impl BlockExpr {
    first_child_method!(arguments, FunctionArguments);
    first_child_method!(statements, Statements);
}
