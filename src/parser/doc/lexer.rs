//! Logos-based lexer for documentation comment text

use super::syntax_kind::DocSyntaxKind;
use logos::Logos;

/// A documentation token with its kind and text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocToken<'a> {
    pub kind: DocSyntaxKind,
    pub text: &'a str,
}

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum LogosDocToken {
    #[regex(r"[ \t\x0C\r]+")]
    Whitespace,

    #[regex(r"\r?\n")]
    Newline,

    #[regex(r"[@\\][A-Za-z]+")]
    Command,

    /// A lone `@` or `\` is plain text
    #[regex(r"[@\\]")]
    Escape,

    #[regex(r"[^ \t\x0C\r\n@\\][^ \t\x0C\r\n]*")]
    Word,
}

/// Tokenize the text between `/**` and `*/`.
///
/// A run of `*` at the start of a line is line decoration.
pub fn tokenize_doc(input: &str) -> Vec<DocToken<'_>> {
    let mut lexer = LogosDocToken::lexer(input);
    let mut tokens = Vec::new();
    let mut line_start = false;

    while let Some(result) = lexer.next() {
        let text = lexer.slice();
        let kind = match result {
            Ok(LogosDocToken::Whitespace) => DocSyntaxKind::WHITESPACE,
            Ok(LogosDocToken::Newline) => DocSyntaxKind::NEWLINE,
            Ok(LogosDocToken::Command) => DocSyntaxKind::COMMAND,
            Ok(LogosDocToken::Word) if line_start && text.chars().all(|c| c == '*') => {
                DocSyntaxKind::DECORATION
            }
            Ok(LogosDocToken::Escape | LogosDocToken::Word) | Err(()) => DocSyntaxKind::WORD,
        };
        line_start = match kind {
            DocSyntaxKind::NEWLINE => true,
            DocSyntaxKind::WHITESPACE => line_start,
            _ => false,
        };
        tokens.push(DocToken { kind, text });
    }

    tokens
}
