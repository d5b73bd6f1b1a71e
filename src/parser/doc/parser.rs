//! Parser for documentation comments
//!
//! ```text
//! DocRoot  = DocBlock*
//! DocBlock = BlockCommand? BlockArgument? WordRun
//! WordRun  = (WORD | NEWLINE | Inline)*
//! Inline   = InlineCommand WORD?
//! ```
//!
//! Blocks end at a blank line, at the next block command or at the end of
//! the comment. `@code` blocks run to the matching `@endcode` instead.

use super::lexer::{DocToken, tokenize_doc};
use super::syntax_kind::{DocSyntaxKind, DocSyntaxNode};
use rowan::{GreenNode, GreenNodeBuilder};
use text_size::TextSize;

/// Block commands that take a leading argument word
const ARGUMENT_COMMANDS: &[&str] = &["param", "returnValue", "throw", "throws", "copyDoc"];

const BLOCK_COMMANDS: &[&str] = &[
    "brief",
    "details",
    "param",
    "return",
    "returnValue",
    "since",
    "version",
    "throw",
    "throws",
    "todo",
    "warning",
    "note",
    "deprecated",
    "code",
    "copyDoc",
];

const INLINE_COMMANDS: &[&str] = &["b", "e", "em", "ref", "see"];

/// Name of a command token without its `@` or `\` prefix
pub fn command_name(text: &str) -> &str {
    text.get(1..).unwrap_or("")
}

pub fn is_block_command(text: &str) -> bool {
    BLOCK_COMMANDS.contains(&command_name(text))
}

pub fn is_inline_command(text: &str) -> bool {
    INLINE_COMMANDS.contains(&command_name(text))
}

/// A parsed documentation comment
#[derive(Debug, Clone)]
pub struct DocParse {
    pub green: GreenNode,
    /// Offset of the comment content inside the script
    pub offset: TextSize,
}

impl DocParse {
    pub fn syntax(&self) -> DocSyntaxNode {
        DocSyntaxNode::new_root(self.green.clone())
    }

    pub fn root(&self) -> super::ast::DocRoot {
        super::ast::DocRoot(self.syntax())
    }
}

/// Parse a complete `/** ... */` comment found at `offset` in the script.
///
/// Tree ranges are relative to the comment content; add [`DocParse::offset`]
/// to map them back into the script.
pub fn parse_doc_comment(comment: &str, offset: TextSize) -> DocParse {
    let content = comment.strip_prefix("/**").unwrap_or(comment);
    let prefix = TextSize::of(comment) - TextSize::of(content);
    let content = content.strip_suffix("*/").unwrap_or(content);

    let tokens = tokenize_doc(content);
    let mut parser = DocParser {
        tokens: &tokens,
        pos: 0,
        builder: GreenNodeBuilder::new(),
    };
    parser.parse_root();

    DocParse {
        green: parser.builder.finish(),
        offset: offset + prefix,
    }
}

struct DocParser<'t, 'a> {
    tokens: &'t [DocToken<'a>],
    pos: usize,
    builder: GreenNodeBuilder<'static>,
}

impl<'t, 'a> DocParser<'t, 'a> {
    fn current(&self) -> Option<DocToken<'a>> {
        self.tokens.get(self.pos).copied()
    }

    fn at(&self, kind: DocSyntaxKind) -> bool {
        self.current().is_some_and(|t| t.kind == kind)
    }

    fn bump(&mut self) {
        if let Some(token) = self.current() {
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    fn skip_trivia(&mut self) {
        while self.current().is_some_and(|t| t.kind.is_trivia()) {
            self.bump();
        }
    }

    fn parse_root(&mut self) {
        self.builder.start_node(DocSyntaxKind::DOC_ROOT.into());
        loop {
            while self
                .current()
                .is_some_and(|t| t.kind.is_trivia() || t.kind == DocSyntaxKind::NEWLINE)
            {
                self.bump();
            }
            if self.current().is_none() {
                break;
            }
            self.parse_block();
        }
        self.builder.finish_node();
    }

    fn parse_block(&mut self) {
        self.builder.start_node(DocSyntaxKind::DOC_BLOCK.into());

        let command = match self.current() {
            Some(token) if token.kind == DocSyntaxKind::COMMAND && is_block_command(token.text) => {
                self.bump();
                Some(command_name(token.text))
            }
            _ => None,
        };

        if command.is_some_and(|name| ARGUMENT_COMMANDS.contains(&name)) {
            self.skip_trivia();
            if self.at(DocSyntaxKind::WORD) {
                self.builder.start_node(DocSyntaxKind::BLOCK_ARGUMENT.into());
                self.bump();
                self.builder.finish_node();
            }
        }

        if command == Some("code") {
            self.parse_code_run();
        } else {
            self.parse_word_run();
        }

        self.builder.finish_node();
    }

    fn parse_word_run(&mut self) {
        self.builder.start_node(DocSyntaxKind::WORD_RUN.into());
        self.skip_trivia();

        while let Some(token) = self.current() {
            match token.kind {
                DocSyntaxKind::NEWLINE if self.newline_ends_run() => break,
                DocSyntaxKind::COMMAND if is_block_command(token.text) => break,
                DocSyntaxKind::COMMAND if is_inline_command(token.text) => {
                    self.builder.start_node(DocSyntaxKind::INLINE.into());
                    self.bump();
                    self.skip_trivia();
                    if self.at(DocSyntaxKind::WORD) {
                        self.bump();
                    }
                    self.builder.finish_node();
                }
                _ => self.bump(),
            }
        }

        self.builder.finish_node();
    }

    /// Everything up to and including `@endcode` is verbatim content.
    fn parse_code_run(&mut self) {
        self.builder.start_node(DocSyntaxKind::WORD_RUN.into());
        while let Some(token) = self.current() {
            if token.kind == DocSyntaxKind::COMMAND && command_name(token.text) == "endcode" {
                break;
            }
            self.bump();
        }
        self.builder.finish_node();
        // The terminator belongs to the block, not its content
        if self.at(DocSyntaxKind::COMMAND) {
            self.bump();
        }
    }

    /// At a newline: does the run end here (blank line, block command or end)?
    fn newline_ends_run(&self) -> bool {
        let next = self.tokens[self.pos + 1..]
            .iter()
            .find(|t| !t.kind.is_trivia());
        match next {
            None => true,
            Some(t) if t.kind == DocSyntaxKind::NEWLINE => true,
            Some(t) => t.kind == DocSyntaxKind::COMMAND && is_block_command(t.text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doc_parse_is_lossless() {
        let comment = "/**\n * @brief Short.\n *\n * Details @b here.\n */";
        let parse = parse_doc_comment(comment, TextSize::new(10));
        assert_eq!(
            parse.syntax().text().to_string(),
            "\n * @brief Short.\n *\n * Details @b here.\n "
        );
        assert_eq!(parse.offset, TextSize::new(13));
    }

    #[test]
    fn test_blank_line_ends_block() {
        let parse = parse_doc_comment("/** First.\n\n Second. */", TextSize::new(0));
        assert_eq!(parse.root().blocks().count(), 2);
    }

    #[test]
    fn test_block_command_ends_block() {
        let parse = parse_doc_comment("/** Text\n @param a The value */", TextSize::new(0));
        let blocks: Vec<_> = parse.root().blocks().collect();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1].command_name(), Some("param".to_string()));
        assert_eq!(blocks[1].argument().map(|t| t.text().to_string()), Some("a".into()));
    }

    #[test]
    fn test_code_block_keeps_blank_lines() {
        let parse = parse_doc_comment("/** @code\na\n\nb\n@endcode\n after */", TextSize::new(0));
        let blocks: Vec<_> = parse.root().blocks().collect();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].command_name(), Some("code".to_string()));
    }
}
