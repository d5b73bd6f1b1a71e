//! Syntax kinds for documentation comment trees

/// All token and node kinds of a documentation comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum DocSyntaxKind {
    // Tokens
    WHITESPACE = 0,
    NEWLINE,
    /// Leading `*` of a continuation line
    DECORATION,
    /// `@name` or `\name`
    COMMAND,
    WORD,

    // Nodes
    DOC_ROOT,
    DOC_BLOCK,
    BLOCK_ARGUMENT,
    WORD_RUN,
    INLINE,

    #[doc(hidden)]
    __LAST,
}

impl DocSyntaxKind {
    /// Tokens that carry no text content
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::DECORATION)
    }
}

impl From<DocSyntaxKind> for rowan::SyntaxKind {
    fn from(kind: DocSyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for DocSyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < DocSyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, DocSyntaxKind>(raw.0) }
    }
}

/// Language definition for documentation trees
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DocLanguage {}

impl rowan::Language for DocLanguage {
    type Kind = DocSyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

pub type DocSyntaxNode = rowan::SyntaxNode<DocLanguage>;
pub type DocSyntaxToken = rowan::SyntaxToken<DocLanguage>;
pub type DocSyntaxElement = rowan::SyntaxElement<DocLanguage>;
