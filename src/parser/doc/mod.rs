//! Documentation comment grammar
//!
//! `/** ... */` comments are re-tokenized by their own logos lexer and
//! parsed into a separate rowan tree (`DocLanguage`). Ranges in that tree
//! are relative to the comment content; [`DocParse::offset`] rebases them
//! onto the script.

mod ast;
mod lexer;
mod parser;
mod syntax_kind;

pub use ast::{DocBlock, DocItem, DocRoot, InlineMarkup, WordCursor, WordRun};
pub use lexer::{DocToken, tokenize_doc};
pub use parser::{DocParse, command_name, is_block_command, is_inline_command, parse_doc_comment};
pub use syntax_kind::{DocLanguage, DocSyntaxKind, DocSyntaxNode, DocSyntaxToken};
