//! Grammar modules for DragonScript parsing
//!
//! This module contains the parsing logic organized by grammar area:
//! - `declarations` - Script level statements and type declarations
//! - `statements` - Statement blocks inside functions and blocks
//! - `expressions` - Expression precedence chain
//!
//! The parsing functions are generic over the [`ScriptParser`] trait so they
//! can be driven by any parser implementation.

mod declarations;
mod expressions;
mod statements;

pub use declarations::{parse_script, parse_type_ref};
pub use expressions::{can_start_expression, parse_expression};
pub use statements::parse_statements;

use crate::parser::syntax_kind::SyntaxKind;
use rowan::Checkpoint;

/// Trait for grammar parsing operations
///
/// This trait defines the interface between the grammar functions and the main parser.
/// The main parser implements the required methods; the provided methods build on them.
pub trait ScriptParser {
    // Token inspection
    fn current_kind(&self) -> SyntaxKind;
    fn current_text(&self) -> &str;
    fn at_eof(&self) -> bool;

    // Position tracking
    fn get_pos(&self) -> usize;

    /// Peek at the kind of the nth token ahead (skipping trivia, not newlines)
    fn nth(&self, n: usize) -> SyntaxKind;

    /// Peek at the text of the nth token ahead (skipping trivia, not newlines)
    fn nth_text(&self, n: usize) -> &str;

    // Token consumption
    fn bump(&mut self);

    // Trivia handling
    /// Skip whitespace and comments
    fn skip_trivia(&mut self);
    /// Skip whitespace, comments and newlines
    fn skip_newlines(&mut self);
    /// Skip whitespace, comments, newlines and `;` statement separators
    fn skip_separators(&mut self);

    // Node building
    fn start_node(&mut self, kind: SyntaxKind);
    fn finish_node(&mut self);
    fn checkpoint(&self) -> Checkpoint;
    fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind);

    // Error reporting at the current token
    fn error(&mut self, message: String);

    // =========================================================================
    // Provided helpers
    // =========================================================================

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current_kind() == kind
    }

    fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        kinds.contains(&self.current_kind())
    }

    /// At a newline, `;` or the end of input.
    fn at_line_end(&self) -> bool {
        self.at_eof() || self.at_any(&[SyntaxKind::NEWLINE, SyntaxKind::SEMICOLON])
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(format!("expected {:?}", kind));
            false
        }
    }

    /// Report an error and wrap tokens up to a recovery point in an ERROR node.
    fn error_recover(&mut self, message: &str, recovery: &[SyntaxKind]) {
        self.error(message.to_string());
        self.start_node(SyntaxKind::ERROR);
        // Always consume at least one token to make progress
        let mut consumed = false;
        while !self.at_eof() && !self.at_line_end() && !self.at_any(recovery) {
            self.bump();
            consumed = true;
        }
        if !consumed && !self.at_eof() && !self.at_line_end() {
            self.bump();
        }
        self.finish_node();
    }

    /// Require the end of the current line; anything left on it becomes an error.
    fn expect_line_end(&mut self) {
        self.skip_trivia();
        if !self.at_line_end() {
            self.error_recover("expected end of line", &[]);
        }
    }
}
