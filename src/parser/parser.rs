//! Recursive descent parser for DragonScript
//!
//! Builds a rowan GreenNode tree from tokens.
//! Supports error recovery and produces a lossless CST.

use super::grammar::{self, ScriptParser};
use super::lexer::{Lexer, Token};
use super::syntax_kind::SyntaxKind;
use rowan::{Checkpoint, GreenNode, GreenNodeBuilder};
use text_size::{TextRange, TextSize};

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> super::SyntaxNode {
        super::SyntaxNode::new_root(self.green.clone())
    }

    /// Get the typed root of the tree
    pub fn script(&self) -> super::ast::Script {
        // The parser always opens a SCRIPT node as the root
        super::ast::Script(self.syntax())
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A syntax error with location and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// Parse DragonScript source code into a CST
pub fn parse(input: &str) -> Parse {
    let tokens: Vec<_> = Lexer::new(input).collect();
    let mut parser = Parser::new(&tokens, TextSize::of(input));
    grammar::parse_script(&mut parser);
    parser.finish()
}

/// The parser state
struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    end: TextSize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>], end: TextSize) -> Self {
        Self {
            tokens,
            pos: 0,
            end,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
        }
    }

    fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }
}

impl<'a> ScriptParser for Parser<'a> {
    // =========================================================================
    // Token inspection
    // =========================================================================

    fn current_kind(&self) -> SyntaxKind {
        self.current().map(|t| t.kind).unwrap_or(SyntaxKind::ERROR)
    }

    fn current_text(&self) -> &str {
        self.current().map(|t| t.text).unwrap_or("")
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn get_pos(&self) -> usize {
        self.pos
    }

    fn nth(&self, n: usize) -> SyntaxKind {
        // Look ahead, skipping trivia (newlines are significant)
        let mut idx = self.pos;
        let mut count = 0;
        while idx < self.tokens.len() {
            if !self.tokens[idx].kind.is_trivia() {
                if count == n {
                    return self.tokens[idx].kind;
                }
                count += 1;
            }
            idx += 1;
        }
        SyntaxKind::ERROR
    }

    fn nth_text(&self, n: usize) -> &str {
        let mut idx = self.pos;
        let mut count = 0;
        while idx < self.tokens.len() {
            if !self.tokens[idx].kind.is_trivia() {
                if count == n {
                    return self.tokens[idx].text;
                }
                count += 1;
            }
            idx += 1;
        }
        ""
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn bump(&mut self) {
        if let Some(token) = self.tokens.get(self.pos) {
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    fn skip_trivia(&mut self) {
        while self.current().map(|t| t.kind.is_trivia()).unwrap_or(false) {
            self.bump();
        }
    }

    fn skip_newlines(&mut self) {
        while self
            .current()
            .map(|t| t.kind.is_trivia() || t.kind == SyntaxKind::NEWLINE)
            .unwrap_or(false)
        {
            self.bump();
        }
    }

    fn skip_separators(&mut self) {
        while self
            .current()
            .map(|t| {
                t.kind.is_trivia() || matches!(t.kind, SyntaxKind::NEWLINE | SyntaxKind::SEMICOLON)
            })
            .unwrap_or(false)
        {
            self.bump();
        }
    }

    // =========================================================================
    // Node building
    // =========================================================================

    fn start_node(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    fn checkpoint(&self) -> Checkpoint {
        self.builder.checkpoint()
    }

    fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    fn error(&mut self, message: String) {
        let range = self
            .current()
            .map(|t| TextRange::at(t.offset, TextSize::of(t.text)))
            .unwrap_or_else(|| TextRange::empty(self.end));
        self.errors.push(SyntaxError::new(message, range));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_lossless() {
        let input = "namespace Demo\n\n/** Doc */\nclass A extends B\n\tfunc void f() // c\n\tend\nend\n";
        let parse = parse(input);
        assert_eq!(parse.syntax().text().to_string(), input);
        assert!(parse.ok(), "errors: {:?}", parse.errors);
    }

    #[test]
    fn test_parse_garbage_makes_progress() {
        let input = ") ) end , class";
        let parse = parse(input);
        assert!(!parse.ok());
        assert_eq!(parse.syntax().text().to_string(), input);
    }

    #[test]
    fn test_error_at_eof_uses_input_end() {
        let parse = parse("class A\n");
        let last = parse.errors.last().expect("missing end should be reported");
        assert_eq!(last.range, TextRange::empty(TextSize::new(8)));
    }
}
