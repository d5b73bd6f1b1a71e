//! Logos-based lexer for DragonScript
//!
//! Fast tokenization using the logos crate.

use super::syntax_kind::SyntaxKind;
use logos::Logos;
use text_size::TextSize;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    offset: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            offset: 0,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        self.offset += text.len() as u32;

        let kind = match logos_token {
            // `/**/` is an empty block comment, not documentation
            Ok(LogosToken::BlockComment) if text.starts_with("/**") && text.len() > 4 => {
                SyntaxKind::DOC_COMMENT
            }
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Consume a block comment up to and including the closing `*/`.
///
/// Unterminated comments extend to the end of input.
fn block_comment(lex: &mut logos::Lexer<LogosToken>) -> bool {
    let remainder = lex.remainder();
    match remainder.find("*/") {
        Some(end) => lex.bump(end + 2),
        None => lex.bump(remainder.len()),
    }
    true
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    /// Blanks plus `\` line continuations
    #[regex(r"([ \t\x0C\r]|\\\r?\n)+")]
    Whitespace,

    #[regex(r"\r?\n")]
    Newline,

    #[regex(r"//[^\r\n]*")]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    #[regex(r"[0-9]+")]
    Integer,

    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?")]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+")]
    Float,

    #[regex(r"0h[0-9a-fA-F]+")]
    Hex,

    #[regex(r"'([^'\\\r\n]|\\.)*'")]
    Character,

    #[regex(r#""([^"\\\r\n]|\\.)*""#)]
    String,

    // =========================================================================
    // MULTI-CHARACTER PUNCTUATION
    // =========================================================================
    #[token("<<=")]
    ShlEq,
    #[token(">>=")]
    ShrEq,
    #[token("*=")]
    StarEq,
    #[token("/=")]
    SlashEq,
    #[token("%=")]
    PercentEq,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("&=")]
    AmpEq,
    #[token("|=")]
    PipeEq,
    #[token("^=")]
    CaretEq,
    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("==")]
    EqEq,
    #[token("!=")]
    BangEq,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,

    // =========================================================================
    // SINGLE-CHARACTER PUNCTUATION
    // =========================================================================
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token(";")]
    Semicolon,
    #[token("=")]
    Eq,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("~")]
    Tilde,
    #[token("!")]
    Bang,

    // =========================================================================
    // KEYWORDS (alphabetical, longest match wins in logos)
    // =========================================================================
    #[token("abstract")]
    AbstractKw,
    #[token("and")]
    AndKw,
    #[token("block")]
    BlockKw,
    #[token("break")]
    BreakKw,
    #[token("case")]
    CaseKw,
    #[token("cast")]
    CastKw,
    #[token("castable")]
    CastableKw,
    #[token("catch")]
    CatchKw,
    #[token("class")]
    ClassKw,
    #[token("continue")]
    ContinueKw,
    #[token("downto")]
    DowntoKw,
    #[token("elif")]
    ElifKw,
    #[token("else")]
    ElseKw,
    #[token("end")]
    EndKw,
    #[token("enum")]
    EnumKw,
    #[token("extends")]
    ExtendsKw,
    #[token("false")]
    FalseKw,
    #[token("fixed")]
    FixedKw,
    #[token("for")]
    ForKw,
    #[token("func")]
    FuncKw,
    #[token("if")]
    IfKw,
    #[token("implements")]
    ImplementsKw,
    #[token("interface")]
    InterfaceKw,
    #[token("namespace")]
    NamespaceKw,
    #[token("native")]
    NativeKw,
    #[token("new")]
    NewKw,
    #[token("not")]
    NotKw,
    #[token("null")]
    NullKw,
    #[token("or")]
    OrKw,
    #[token("pin")]
    PinKw,
    #[token("private")]
    PrivateKw,
    #[token("protected")]
    ProtectedKw,
    #[token("public")]
    PublicKw,
    #[token("requires")]
    RequiresKw,
    #[token("return")]
    ReturnKw,
    #[token("select")]
    SelectKw,
    #[token("static")]
    StaticKw,
    #[token("step")]
    StepKw,
    #[token("super")]
    SuperKw,
    #[token("this")]
    ThisKw,
    #[token("throw")]
    ThrowKw,
    #[token("to")]
    ToKw,
    #[token("true")]
    TrueKw,
    #[token("try")]
    TryKw,
    #[token("typeof")]
    TypeofKw,
    #[token("var")]
    VarKw,
    #[token("void")]
    VoidKw,
    #[token("while")]
    WhileKw,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        match token {
            LogosToken::Whitespace => SyntaxKind::WHITESPACE,
            LogosToken::Newline => SyntaxKind::NEWLINE,
            LogosToken::LineComment => SyntaxKind::LINE_COMMENT,
            LogosToken::BlockComment => SyntaxKind::BLOCK_COMMENT,

            LogosToken::Ident => SyntaxKind::IDENT,
            LogosToken::Integer => SyntaxKind::INTEGER,
            LogosToken::Float => SyntaxKind::FLOAT,
            LogosToken::Hex => SyntaxKind::HEX,
            LogosToken::Character => SyntaxKind::CHARACTER,
            LogosToken::String => SyntaxKind::STRING,

            LogosToken::ShlEq => SyntaxKind::SHL_EQ,
            LogosToken::ShrEq => SyntaxKind::SHR_EQ,
            LogosToken::StarEq => SyntaxKind::STAR_EQ,
            LogosToken::SlashEq => SyntaxKind::SLASH_EQ,
            LogosToken::PercentEq => SyntaxKind::PERCENT_EQ,
            LogosToken::PlusEq => SyntaxKind::PLUS_EQ,
            LogosToken::MinusEq => SyntaxKind::MINUS_EQ,
            LogosToken::AmpEq => SyntaxKind::AMP_EQ,
            LogosToken::PipeEq => SyntaxKind::PIPE_EQ,
            LogosToken::CaretEq => SyntaxKind::CARET_EQ,
            LogosToken::Shl => SyntaxKind::SHL,
            LogosToken::Shr => SyntaxKind::SHR,
            LogosToken::LtEq => SyntaxKind::LT_EQ,
            LogosToken::GtEq => SyntaxKind::GT_EQ,
            LogosToken::EqEq => SyntaxKind::EQ_EQ,
            LogosToken::BangEq => SyntaxKind::BANG_EQ,
            LogosToken::PlusPlus => SyntaxKind::PLUS_PLUS,
            LogosToken::MinusMinus => SyntaxKind::MINUS_MINUS,
            LogosToken::AmpAmp => SyntaxKind::AMP_AMP,
            LogosToken::PipePipe => SyntaxKind::PIPE_PIPE,

            LogosToken::LParen => SyntaxKind::L_PAREN,
            LogosToken::RParen => SyntaxKind::R_PAREN,
            LogosToken::Comma => SyntaxKind::COMMA,
            LogosToken::Dot => SyntaxKind::DOT,
            LogosToken::Semicolon => SyntaxKind::SEMICOLON,
            LogosToken::Eq => SyntaxKind::EQ,
            LogosToken::Amp => SyntaxKind::AMP,
            LogosToken::Pipe => SyntaxKind::PIPE,
            LogosToken::Caret => SyntaxKind::CARET,
            LogosToken::Lt => SyntaxKind::LT,
            LogosToken::Gt => SyntaxKind::GT,
            LogosToken::Star => SyntaxKind::STAR,
            LogosToken::Slash => SyntaxKind::SLASH,
            LogosToken::Percent => SyntaxKind::PERCENT,
            LogosToken::Plus => SyntaxKind::PLUS,
            LogosToken::Minus => SyntaxKind::MINUS,
            LogosToken::Tilde => SyntaxKind::TILDE,
            LogosToken::Bang => SyntaxKind::BANG,

            LogosToken::AbstractKw => SyntaxKind::ABSTRACT_KW,
            LogosToken::AndKw => SyntaxKind::AND_KW,
            LogosToken::BlockKw => SyntaxKind::BLOCK_KW,
            LogosToken::BreakKw => SyntaxKind::BREAK_KW,
            LogosToken::CaseKw => SyntaxKind::CASE_KW,
            LogosToken::CastKw => SyntaxKind::CAST_KW,
            LogosToken::CastableKw => SyntaxKind::CASTABLE_KW,
            LogosToken::CatchKw => SyntaxKind::CATCH_KW,
            LogosToken::ClassKw => SyntaxKind::CLASS_KW,
            LogosToken::ContinueKw => SyntaxKind::CONTINUE_KW,
            LogosToken::DowntoKw => SyntaxKind::DOWNTO_KW,
            LogosToken::ElifKw => SyntaxKind::ELIF_KW,
            LogosToken::ElseKw => SyntaxKind::ELSE_KW,
            LogosToken::EndKw => SyntaxKind::END_KW,
            LogosToken::EnumKw => SyntaxKind::ENUM_KW,
            LogosToken::ExtendsKw => SyntaxKind::EXTENDS_KW,
            LogosToken::FalseKw => SyntaxKind::FALSE_KW,
            LogosToken::FixedKw => SyntaxKind::FIXED_KW,
            LogosToken::ForKw => SyntaxKind::FOR_KW,
            LogosToken::FuncKw => SyntaxKind::FUNC_KW,
            LogosToken::IfKw => SyntaxKind::IF_KW,
            LogosToken::ImplementsKw => SyntaxKind::IMPLEMENTS_KW,
            LogosToken::InterfaceKw => SyntaxKind::INTERFACE_KW,
            LogosToken::NamespaceKw => SyntaxKind::NAMESPACE_KW,
            LogosToken::NativeKw => SyntaxKind::NATIVE_KW,
            LogosToken::NewKw => SyntaxKind::NEW_KW,
            LogosToken::NotKw => SyntaxKind::NOT_KW,
            LogosToken::NullKw => SyntaxKind::NULL_KW,
            LogosToken::OrKw => SyntaxKind::OR_KW,
            LogosToken::PinKw => SyntaxKind::PIN_KW,
            LogosToken::PrivateKw => SyntaxKind::PRIVATE_KW,
            LogosToken::ProtectedKw => SyntaxKind::PROTECTED_KW,
            LogosToken::PublicKw => SyntaxKind::PUBLIC_KW,
            LogosToken::RequiresKw => SyntaxKind::REQUIRES_KW,
            LogosToken::ReturnKw => SyntaxKind::RETURN_KW,
            LogosToken::SelectKw => SyntaxKind::SELECT_KW,
            LogosToken::StaticKw => SyntaxKind::STATIC_KW,
            LogosToken::StepKw => SyntaxKind::STEP_KW,
            LogosToken::SuperKw => SyntaxKind::SUPER_KW,
            LogosToken::ThisKw => SyntaxKind::THIS_KW,
            LogosToken::ThrowKw => SyntaxKind::THROW_KW,
            LogosToken::ToKw => SyntaxKind::TO_KW,
            LogosToken::TrueKw => SyntaxKind::TRUE_KW,
            LogosToken::TryKw => SyntaxKind::TRY_KW,
            LogosToken::TypeofKw => SyntaxKind::TYPEOF_KW,
            LogosToken::VarKw => SyntaxKind::VAR_KW,
            LogosToken::VoidKw => SyntaxKind::VOID_KW,
            LogosToken::WhileKw => SyntaxKind::WHILE_KW,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<SyntaxKind> {
        tokenize(input)
            .into_iter()
            .map(|t| t.kind)
            .filter(|k| *k != SyntaxKind::WHITESPACE)
            .collect()
    }

    #[test]
    fn test_keywords_and_identifiers() {
        assert_eq!(
            kinds("class Foo extends classic"),
            vec![
                SyntaxKind::CLASS_KW,
                SyntaxKind::IDENT,
                SyntaxKind::EXTENDS_KW,
                SyntaxKind::IDENT
            ]
        );
    }

    #[test]
    fn test_compound_operators_longest_match() {
        assert_eq!(
            kinds("a <<= b >> c <= d"),
            vec![
                SyntaxKind::IDENT,
                SyntaxKind::SHL_EQ,
                SyntaxKind::IDENT,
                SyntaxKind::SHR,
                SyntaxKind::IDENT,
                SyntaxKind::LT_EQ,
                SyntaxKind::IDENT
            ]
        );
    }

    #[test]
    fn test_number_literals() {
        assert_eq!(
            kinds("12 1.5 2e3 0hFF"),
            vec![
                SyntaxKind::INTEGER,
                SyntaxKind::FLOAT,
                SyntaxKind::FLOAT,
                SyntaxKind::HEX
            ]
        );
    }

    #[test]
    fn test_comments() {
        let tokens = tokenize("/** doc */ /**/ /* block */ // line\n");
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::DOC_COMMENT,
                SyntaxKind::WHITESPACE,
                SyntaxKind::BLOCK_COMMENT,
                SyntaxKind::WHITESPACE,
                SyntaxKind::BLOCK_COMMENT,
                SyntaxKind::WHITESPACE,
                SyntaxKind::LINE_COMMENT,
                SyntaxKind::NEWLINE
            ]
        );
        assert_eq!(tokens[0].text, "/** doc */");
    }

    #[test]
    fn test_unterminated_block_comment_runs_to_end() {
        let tokens = tokenize("a /* never closed");
        assert_eq!(tokens.last().map(|t| t.kind), Some(SyntaxKind::BLOCK_COMMENT));
    }

    #[test]
    fn test_line_continuation_is_whitespace() {
        assert_eq!(
            kinds("a + \\\n b\n"),
            vec![
                SyntaxKind::IDENT,
                SyntaxKind::PLUS,
                SyntaxKind::IDENT,
                SyntaxKind::NEWLINE
            ]
        );
    }

    #[test]
    fn test_offsets_are_contiguous() {
        let input = "func int a()\nend";
        let tokens = tokenize(input);
        let mut expected = 0u32;
        for token in &tokens {
            assert_eq!(u32::from(token.offset), expected);
            expected += token.text.len() as u32;
        }
        assert_eq!(expected as usize, input.len());
    }
}
