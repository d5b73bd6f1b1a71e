//! Context tree construction from the typed AST

use super::declarations::ContextScript;
use super::documentation::ContextDocumentation;
use crate::parser::ast::{self, AstNode};
use crate::parser::Parse;

/// Options controlling how a context tree is built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    /// Parse `/** */` comments and attach them to the declaration they precede
    pub attach_documentation: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            attach_documentation: true,
        }
    }
}

/// Build the context tree of a parsed script.
///
/// Never fails: malformed declarations produce placeholder contexts.
pub fn build_script(parse: &Parse, options: &BuildOptions) -> ContextScript {
    let script = parse.script();
    let mut cx = BuildContext::new(options);
    ContextScript::build(&script, &mut cx)
}

/// State carried down while walking declarations
pub(super) struct BuildContext<'o> {
    options: &'o BuildOptions,
    /// Dotted name of the enclosing namespace and types
    prefix: String,
    /// Stack of scope segments for proper push/pop
    scope_stack: Vec<String>,
}

impl<'o> BuildContext<'o> {
    pub(super) fn new(options: &'o BuildOptions) -> Self {
        Self {
            options,
            prefix: String::new(),
            scope_stack: Vec::new(),
        }
    }

    pub(super) fn qualified_name(&self, name: &str) -> String {
        if self.prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.prefix, name)
        }
    }

    /// The qualified name of the innermost enclosing scope
    pub(super) fn current_scope_name(&self) -> &str {
        &self.prefix
    }

    pub(super) fn push_scope(&mut self, name: &str) {
        self.scope_stack.push(name.to_string());
        if self.prefix.is_empty() {
            self.prefix = name.to_string();
        } else {
            self.prefix = format!("{}.{}", self.prefix, name);
        }
    }

    pub(super) fn pop_scope(&mut self) {
        if let Some(popped) = self.scope_stack.pop() {
            // Remove the last segment plus the joining dot
            let suffix_len = if self.scope_stack.is_empty() {
                popped.len()
            } else {
                popped.len() + 1
            };
            self.prefix
                .truncate(self.prefix.len().saturating_sub(suffix_len));
        }
    }

    /// Documentation of the comment preceding `node`, if enabled
    pub(super) fn documentation(&self, node: &impl AstNode) -> Option<ContextDocumentation> {
        if !self.options.attach_documentation {
            return None;
        }
        node.doc_comment()
            .map(|token| ContextDocumentation::from_comment(&token))
    }
}

impl ContextScript {
    fn build(script: &ast::Script, cx: &mut BuildContext<'_>) -> Self {
        let members = super::declarations::build_script_members(script.members(), cx);
        tracing::trace!(members = members.len(), "built script context");
        Self::new(Some(script.syntax().text_range()), members)
    }
}
