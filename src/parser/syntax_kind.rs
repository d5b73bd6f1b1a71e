//! Syntax kinds for the Rowan-based CST
//!
//! This enum defines all possible node and token kinds in the syntax tree.
//! It follows the DragonScript grammar structure: script level statements,
//! type declarations, class members, statements and expressions.

/// All syntax kinds (tokens and nodes) in DragonScript
///
/// Tokens are leaf nodes (identifiers, keywords, punctuation).
/// Nodes are composite (declarations, statements, expressions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (whitespace and comments - preserved but not semantically meaningful)
    // =========================================================================
    WHITESPACE = 0,
    LINE_COMMENT,
    BLOCK_COMMENT,
    DOC_COMMENT,

    /// Newlines separate statements, so they are not trivia.
    NEWLINE,

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENT,
    INTEGER,
    FLOAT,
    HEX,
    CHARACTER,
    STRING,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_PAREN,     // (
    R_PAREN,     // )
    COMMA,       // ,
    DOT,         // .
    SEMICOLON,   // ;
    EQ,          // =
    STAR_EQ,     // *=
    SLASH_EQ,    // /=
    PERCENT_EQ,  // %=
    PLUS_EQ,     // +=
    MINUS_EQ,    // -=
    SHL_EQ,      // <<=
    SHR_EQ,      // >>=
    AMP_EQ,      // &=
    PIPE_EQ,     // |=
    CARET_EQ,    // ^=
    AMP,         // &
    PIPE,        // |
    CARET,       // ^
    SHL,         // <<
    SHR,         // >>
    LT,          // <
    GT,          // >
    LT_EQ,       // <=
    GT_EQ,       // >=
    EQ_EQ,       // ==
    BANG_EQ,     // !=
    STAR,        // *
    SLASH,       // /
    PERCENT,     // %
    PLUS,        // +
    MINUS,       // -
    PLUS_PLUS,   // ++
    MINUS_MINUS, // --
    TILDE,       // ~
    BANG,        // !
    AMP_AMP,     // &&
    PIPE_PIPE,   // ||

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    // Script level
    NAMESPACE_KW,
    PIN_KW,
    REQUIRES_KW,

    // Type declarations
    CLASS_KW,
    INTERFACE_KW,
    ENUM_KW,
    EXTENDS_KW,
    IMPLEMENTS_KW,
    END_KW,
    FUNC_KW,
    VAR_KW,

    // Modifiers
    PUBLIC_KW,
    PROTECTED_KW,
    PRIVATE_KW,
    ABSTRACT_KW,
    FIXED_KW,
    STATIC_KW,
    NATIVE_KW,

    // Statements
    IF_KW,
    ELIF_KW,
    ELSE_KW,
    SELECT_KW,
    CASE_KW,
    WHILE_KW,
    FOR_KW,
    TO_KW,
    DOWNTO_KW,
    STEP_KW,
    BREAK_KW,
    CONTINUE_KW,
    RETURN_KW,
    THROW_KW,
    TRY_KW,
    CATCH_KW,

    // Expressions
    BLOCK_KW,
    CAST_KW,
    CASTABLE_KW,
    TYPEOF_KW,
    AND_KW,
    OR_KW,
    NOT_KW,
    TRUE_KW,
    FALSE_KW,
    NULL_KW,
    THIS_KW,
    SUPER_KW,
    NEW_KW,
    VOID_KW,

    // =========================================================================
    // NODES
    // =========================================================================
    SCRIPT,
    PIN_NAMESPACE,
    REQUIRES_PACKAGE,
    NAMESPACE_DECL,
    TYPE_REF,
    TYPE_MODIFIERS,

    // Classes
    CLASS_DECL,
    CLASS_EXTENDS,
    CLASS_IMPLEMENTS,
    CLASS_BODY,
    CLASS_VARIABLES,
    CLASS_VARIABLE,
    CLASS_FUNCTION,

    // Interfaces
    INTERFACE_DECL,
    INTERFACE_IMPLEMENTS,
    INTERFACE_BODY,
    INTERFACE_FUNCTION,

    // Enumerations
    ENUM_DECL,
    ENUM_BODY,
    ENUM_ENTRY,

    // Function heads
    FUNCTION_BEGIN,
    CONSTRUCTOR_BEGIN,
    CONSTRUCTOR_CALL,
    DESTRUCTOR_BEGIN,
    REGULAR_FUNCTION_BEGIN,
    OPERATOR,
    FUNCTION_ARGUMENTS,
    FUNCTION_ARGUMENT,

    // Statements
    STATEMENTS,
    IF_STMT,
    ELIF_BRANCH,
    ELSE_BRANCH,
    WHILE_STMT,
    FOR_STMT,
    FOR_VARIABLE,
    FOR_FROM,
    FOR_TO,
    FOR_STEP,
    SELECT_STMT,
    SELECT_CASE,
    CASE_VALUES,
    SELECT_ELSE,
    TRY_STMT,
    CATCH_CLAUSE,
    THROW_STMT,
    RETURN_STMT,
    BREAK_STMT,
    CONTINUE_STMT,
    VARIABLES_STMT,
    VARIABLE_DECL,
    EXPRESSION_STMT,

    // Expressions
    BINARY_EXPR,
    PREFIX_EXPR,
    POSTFIX_EXPR,
    CAST_EXPR,
    INLINE_IF_EXPR,
    MEMBER_EXPR,
    CALL_EXPR,
    NAME_REF,
    LITERAL,
    PAREN_EXPR,
    BLOCK_EXPR,
    ARGUMENT_LIST,

    // Special
    ERROR,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace or comment)
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::WHITESPACE | Self::LINE_COMMENT | Self::BLOCK_COMMENT | Self::DOC_COMMENT
        )
    }

    /// Check if this is a keyword
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::NAMESPACE_KW as u16) && (self as u16) <= (Self::VOID_KW as u16)
    }

    /// Check if this is a punctuation or operator token
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::L_PAREN as u16) && (self as u16) <= (Self::PIPE_PIPE as u16)
    }

    /// Check if this is a literal
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Self::INTEGER | Self::FLOAT | Self::HEX | Self::CHARACTER | Self::STRING
        )
    }

    /// Check if this is a declaration modifier keyword
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            Self::PUBLIC_KW
                | Self::PROTECTED_KW
                | Self::PRIVATE_KW
                | Self::ABSTRACT_KW
                | Self::FIXED_KW
                | Self::STATIC_KW
                | Self::NATIVE_KW
        )
    }

    /// Check if this is an assignment operator (`=`, `+=`, ...)
    pub fn is_assignment(self) -> bool {
        matches!(
            self,
            Self::EQ
                | Self::STAR_EQ
                | Self::SLASH_EQ
                | Self::PERCENT_EQ
                | Self::PLUS_EQ
                | Self::MINUS_EQ
                | Self::SHL_EQ
                | Self::SHR_EQ
                | Self::AMP_EQ
                | Self::PIPE_EQ
                | Self::CARET_EQ
        )
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScriptLanguage {}

impl rowan::Language for ScriptLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<ScriptLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<ScriptLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<ScriptLanguage>;
