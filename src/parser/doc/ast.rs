//! Typed wrappers over documentation comment trees

use super::parser::{command_name, is_inline_command};
use super::syntax_kind::{DocSyntaxElement, DocSyntaxKind, DocSyntaxNode, DocSyntaxToken};

macro_rules! doc_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(pub(crate) DocSyntaxNode);

        impl $name {
            pub fn cast(node: DocSyntaxNode) -> Option<Self> {
                (node.kind() == DocSyntaxKind::$kind).then(|| Self(node))
            }

            pub fn syntax(&self) -> &DocSyntaxNode {
                &self.0
            }
        }
    };
}

doc_node!(DocRoot, DOC_ROOT);

impl DocRoot {
    pub fn blocks(&self) -> impl Iterator<Item = DocBlock> + '_ {
        self.0.children().filter_map(DocBlock::cast)
    }
}

doc_node!(DocBlock, DOC_BLOCK);

impl DocBlock {
    /// The block command token, `None` for a free text paragraph
    pub fn command(&self) -> Option<DocSyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| t.kind() == DocSyntaxKind::COMMAND)
    }

    /// The command name without its prefix (`param` for `@param`)
    pub fn command_name(&self) -> Option<String> {
        self.command().map(|t| command_name(t.text()).to_string())
    }

    /// The argument word of `@param`, `@throw`, `@returnValue` and `@copyDoc`
    pub fn argument(&self) -> Option<DocSyntaxToken> {
        self.0
            .children()
            .find(|n| n.kind() == DocSyntaxKind::BLOCK_ARGUMENT)
            .and_then(|n| n.first_token())
    }

    pub fn content(&self) -> Option<WordRun> {
        self.0.children().find_map(WordRun::cast)
    }
}

doc_node!(WordRun, WORD_RUN);

impl WordRun {
    pub fn cursor(&self) -> WordCursor {
        WordCursor::new(self)
    }
}

doc_node!(InlineMarkup, INLINE);

impl InlineMarkup {
    pub fn command(&self) -> Option<DocSyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| t.kind() == DocSyntaxKind::COMMAND)
    }

    /// The command name without its prefix (`b` for `@b`)
    pub fn command_name(&self) -> Option<String> {
        self.command()
            .filter(|t| is_inline_command(t.text()))
            .map(|t| command_name(t.text()).to_string())
    }

    /// The word the markup applies to
    pub fn target(&self) -> Option<DocSyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .find(|t| t.kind() == DocSyntaxKind::WORD)
    }
}

/// One content item of a word run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocItem {
    /// Plain text word; unknown commands are words too
    Word(DocSyntaxToken),
    Newline(DocSyntaxToken),
    Inline(InlineMarkup),
}

/// Lazy forward-only cursor over the items of a word run.
///
/// `next` stops at the end: once the last item is reached, further calls
/// return `false` and `current` keeps returning that last item. Only a run
/// without any item has no `current`.
#[derive(Debug, Clone)]
pub struct WordCursor {
    pending: Option<DocSyntaxElement>,
    current: Option<DocItem>,
}

impl WordCursor {
    fn new(run: &WordRun) -> Self {
        let mut pending = run.0.first_child_or_token();
        let current = Self::scan(&mut pending);
        Self { pending, current }
    }

    pub fn current(&self) -> Option<&DocItem> {
        self.current.as_ref()
    }

    /// Move to the next item; returns false and stays put at the end.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> bool {
        match Self::scan(&mut self.pending) {
            Some(item) => {
                self.current = Some(item);
                true
            }
            None => false,
        }
    }

    fn scan(pending: &mut Option<DocSyntaxElement>) -> Option<DocItem> {
        while let Some(element) = pending.take() {
            *pending = element.next_sibling_or_token();
            let item = match element {
                rowan::NodeOrToken::Token(t) => match t.kind() {
                    DocSyntaxKind::WORD | DocSyntaxKind::COMMAND => Some(DocItem::Word(t)),
                    DocSyntaxKind::NEWLINE => Some(DocItem::Newline(t)),
                    _ => None,
                },
                rowan::NodeOrToken::Node(n) => InlineMarkup::cast(n).map(DocItem::Inline),
            };
            if item.is_some() {
                return item;
            }
        }
        None
    }
}
