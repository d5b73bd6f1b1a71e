//! Documentation contexts built from `/** ... */` comments

use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

use super::identifier::Identifier;
use super::{ContextNode, ContextRef, push_all};
use crate::parser::SyntaxToken;
use crate::parser::doc::{DocBlock, DocItem, InlineMarkup, parse_doc_comment};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentationBlockKind {
    Brief,
    Details,
    Param,
    Return,
    ReturnValue,
    Since,
    Version,
    Throw,
    Todo,
    Warning,
    Note,
    Deprecated,
    Code,
    CopyDoc,
    /// Free text without a block command
    Paragraph,
}

impl DocumentationBlockKind {
    fn from_command(name: Option<&str>) -> Self {
        match name {
            Some("brief") => Self::Brief,
            Some("details") => Self::Details,
            Some("param") => Self::Param,
            Some("return") => Self::Return,
            Some("returnValue") => Self::ReturnValue,
            Some("since") => Self::Since,
            Some("version") => Self::Version,
            Some("throw" | "throws") => Self::Throw,
            Some("todo") => Self::Todo,
            Some("warning") => Self::Warning,
            Some("note") => Self::Note,
            Some("deprecated") => Self::Deprecated,
            Some("code") => Self::Code,
            Some("copyDoc") => Self::CopyDoc,
            _ => Self::Paragraph,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentationInlineKind {
    Word,
    Newline,
    /// `@b word`
    Bold,
    /// `@e word` or `@em word`
    Emboss,
    /// `@ref target`
    Ref,
    /// `@see target`
    See,
}

/// A documentation comment attached to a declaration
#[derive(Debug, Clone, PartialEq)]
pub struct ContextDocumentation {
    range: Option<TextRange>,
    pub blocks: Vec<ContextDocumentationBlock>,
}

impl ContextDocumentation {
    /// Build from a `DOC_COMMENT` token
    pub fn from_comment(token: &SyntaxToken) -> Self {
        let parse = parse_doc_comment(token.text(), token.text_range().start());
        let offset = parse.offset;
        let blocks = parse
            .root()
            .blocks()
            .map(|block| ContextDocumentationBlock::build(&block, offset))
            .collect();

        Self {
            range: Some(token.text_range()),
            blocks,
        }
    }

    /// The brief description: the `@brief` block, else the first paragraph
    pub fn brief(&self) -> Option<&ContextDocumentationBlock> {
        self.blocks
            .iter()
            .find(|b| b.kind == DocumentationBlockKind::Brief)
            .or_else(|| {
                self.blocks
                    .iter()
                    .find(|b| b.kind == DocumentationBlockKind::Paragraph)
            })
    }

    pub fn is_deprecated(&self) -> bool {
        self.blocks
            .iter()
            .any(|b| b.kind == DocumentationBlockKind::Deprecated)
    }

    /// The `@param` block documenting `name`
    pub fn param(&self, name: &str) -> Option<&ContextDocumentationBlock> {
        self.blocks.iter().find(|b| {
            b.kind == DocumentationBlockKind::Param
                && b.argument.as_ref().is_some_and(|a| a.name() == name)
        })
    }
}

impl ContextNode for ContextDocumentation {
    fn range(&self) -> Option<TextRange> {
        self.range
    }

    fn children(&self) -> Vec<ContextRef<'_>> {
        let mut out = Vec::new();
        push_all(&mut out, &self.blocks);
        out
    }

    fn dispose(&mut self) {
        for block in &mut self.blocks {
            block.dispose();
        }
        self.blocks.clear();
    }
}

/// One block of a documentation comment
#[derive(Debug, Clone, PartialEq)]
pub struct ContextDocumentationBlock {
    pub kind: DocumentationBlockKind,
    range: Option<TextRange>,
    /// Parameter name, return value, thrown type or copied target
    pub argument: Option<Identifier>,
    pub content: Vec<ContextDocumentationInline>,
}

impl ContextDocumentationBlock {
    fn build(block: &DocBlock, offset: TextSize) -> Self {
        let command = block.command_name();
        let kind = DocumentationBlockKind::from_command(command.as_deref());
        let argument = block
            .argument()
            .map(|t| Identifier::new(t.text(), Some(t.text_range() + offset)));

        let mut content = Vec::new();
        if let Some(run) = block.content() {
            let mut cursor = run.cursor();
            let mut more = cursor.current().is_some();
            while more {
                if let Some(item) = cursor.current() {
                    content.push(ContextDocumentationInline::build(item, offset));
                }
                more = cursor.next();
            }
        }
        // Newlines only separate words
        while content
            .last()
            .is_some_and(|i| i.kind == DocumentationInlineKind::Newline)
        {
            content.pop();
        }
        let leading = content
            .iter()
            .take_while(|i| i.kind == DocumentationInlineKind::Newline)
            .count();
        content.drain(..leading);

        Self {
            kind,
            range: Some(block.syntax().text_range() + offset),
            argument,
            content,
        }
    }

    /// Plain text of the block: words joined by spaces, newlines kept
    pub fn text(&self) -> String {
        let mut text = String::new();
        for inline in &self.content {
            match inline.kind {
                DocumentationInlineKind::Newline => {
                    text.push('\n');
                }
                _ => {
                    if !text.is_empty() && !text.ends_with('\n') {
                        text.push(' ');
                    }
                    text.push_str(&inline.text);
                }
            }
        }
        text
    }
}

impl ContextNode for ContextDocumentationBlock {
    fn range(&self) -> Option<TextRange> {
        self.range
    }

    fn children(&self) -> Vec<ContextRef<'_>> {
        let mut out = Vec::new();
        push_all(&mut out, &self.content);
        out
    }

    fn dispose(&mut self) {
        self.content.clear();
    }
}

/// A word, line break or inline markup inside a documentation block
#[derive(Debug, Clone, PartialEq)]
pub struct ContextDocumentationInline {
    pub kind: DocumentationInlineKind,
    range: Option<TextRange>,
    /// The word, or the target of inline markup (`"??"` if missing)
    pub text: SmolStr,
}

impl ContextDocumentationInline {
    fn build(item: &DocItem, offset: TextSize) -> Self {
        match item {
            DocItem::Word(token) => Self {
                kind: DocumentationInlineKind::Word,
                range: Some(token.text_range() + offset),
                text: token.text().into(),
            },
            DocItem::Newline(token) => Self {
                kind: DocumentationInlineKind::Newline,
                range: Some(token.text_range() + offset),
                text: SmolStr::new_static("\n"),
            },
            DocItem::Inline(markup) => Self::from_markup(markup, offset),
        }
    }

    fn from_markup(markup: &InlineMarkup, offset: TextSize) -> Self {
        let kind = match markup.command_name().as_deref() {
            Some("b") => DocumentationInlineKind::Bold,
            Some("e" | "em") => DocumentationInlineKind::Emboss,
            Some("ref") => DocumentationInlineKind::Ref,
            Some("see") => DocumentationInlineKind::See,
            _ => DocumentationInlineKind::Word,
        };
        let target = markup.target();
        Self {
            kind,
            range: Some(markup.syntax().text_range() + offset),
            text: target
                .map(|t| SmolStr::new(t.text()))
                .unwrap_or_else(|| SmolStr::new_static(super::PLACEHOLDER)),
        }
    }

    /// Range of the target word of inline markup, or of the word itself
    pub fn target_range(&self) -> Option<TextRange> {
        let range = self.range?;
        match self.kind {
            DocumentationInlineKind::Word | DocumentationInlineKind::Newline => Some(range),
            _ if self.text.as_str() == super::PLACEHOLDER => None,
            _ => {
                let len = TextSize::of(self.text.as_str());
                Some(TextRange::new(range.end() - len, range.end()))
            }
        }
    }
}

impl ContextNode for ContextDocumentationInline {
    fn range(&self) -> Option<TextRange> {
        self.range
    }

    fn children(&self) -> Vec<ContextRef<'_>> {
        Vec::new()
    }

    fn dispose(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::SyntaxKind;

    fn doc(source: &str) -> ContextDocumentation {
        let parse = crate::parser::parse(source);
        let token = parse
            .syntax()
            .descendants_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| t.kind() == SyntaxKind::DOC_COMMENT)
            .expect("doc comment");
        ContextDocumentation::from_comment(&token)
    }

    #[test]
    fn test_blocks_and_brief() {
        let doc = doc("/**\n * Adds numbers.\n *\n * @param a First @b value.\n * @deprecated\n */\nclass A\nend\n");
        let kinds: Vec<_> = doc.blocks.iter().map(|b| b.kind).collect();
        assert_eq!(
            kinds,
            vec![
                DocumentationBlockKind::Paragraph,
                DocumentationBlockKind::Param,
                DocumentationBlockKind::Deprecated
            ]
        );
        assert_eq!(doc.brief().map(|b| b.text()), Some("Adds numbers.".into()));
        assert!(doc.is_deprecated());

        let param = doc.param("a").expect("param a");
        assert_eq!(param.text(), "First value.");
        assert_eq!(param.content[1].kind, DocumentationInlineKind::Bold);
    }

    #[test]
    fn test_ranges_are_rebased_onto_script() {
        let source = "class A\n/** @param count Items. */\nfunc void f(int count)\nend\nend\n";
        let doc = doc(source);
        let param = doc.param("count").expect("param");
        let range = param.argument.as_ref().and_then(|a| a.range()).expect("range");
        assert_eq!(&source[range], "count");
        let word = &param.content[0];
        assert_eq!(word.range().map(|r| &source[r]), Some("Items."));
    }

    #[test]
    fn test_markup_target_range() {
        let source = "/** See @ref Other here. */\nclass A\nend\n";
        let doc = doc(source);
        let reference = doc.blocks[0]
            .content
            .iter()
            .find(|i| i.kind == DocumentationInlineKind::Ref)
            .expect("ref");
        assert_eq!(reference.text.as_str(), "Other");
        assert_eq!(reference.target_range().map(|r| &source[r]), Some("Other"));
    }

    #[test]
    fn test_block_content_collects_each_word_once() {
        let doc = doc("/** @return Sum of @e both */
class A
end
");
        let words: Vec<_> = doc.blocks[0]
            .content
            .iter()
            .map(|i| (i.kind, i.text.to_string()))
            .collect();
        assert_eq!(
            words,
            vec![
                (DocumentationInlineKind::Word, "Sum".to_string()),
                (DocumentationInlineKind::Word, "of".to_string()),
                (DocumentationInlineKind::Emboss, "both".to_string()),
            ]
        );
    }
}
