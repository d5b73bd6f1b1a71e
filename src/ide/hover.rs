//! Hover information implementation.

use text_size::{TextRange, TextSize};

use crate::base::{LineIndex, Span};
use crate::context::{
    ContextDocumentation, ContextDocumentationBlock, ContextRef, ContextScript, Identifier,
    TypeModifierSet, context_path_at,
};

/// Result of a hover request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HoverResult {
    /// The hover content (markdown).
    pub contents: String,
    /// Qualified name of the hovered declaration, if it has one.
    pub qualified_name: Option<String>,
    /// Byte range of the hovered name.
    pub range: TextRange,
    /// Line/column span of the hovered name.
    pub span: Span,
}

/// Get hover information for the declaration named at `offset`.
///
/// Walks from the innermost context at the offset outwards and stops at the
/// first declaration whose name covers it.
pub fn hover(script: &ContextScript, line_index: &LineIndex, offset: TextSize) -> Option<HoverResult> {
    let path = context_path_at(script.into(), offset);
    for (depth, context) in path.iter().enumerate().rev() {
        let parent = depth.checked_sub(1).map(|i| path[i]);
        if let Some(found) = describe(*context, parent, offset) {
            let Described {
                name,
                signature,
                qualified_name,
                documentation,
                param_doc,
            } = found;
            let Some(range) = name.range() else {
                continue;
            };
            return Some(HoverResult {
                contents: format_contents(&signature, documentation, param_doc),
                qualified_name,
                range,
                span: line_index.span(range),
            });
        }
    }
    None
}

struct Described<'a> {
    name: &'a Identifier,
    signature: String,
    qualified_name: Option<String>,
    documentation: Option<&'a ContextDocumentation>,
    /// `@param` block of the enclosing function for arguments
    param_doc: Option<&'a ContextDocumentationBlock>,
}

fn covers(name: &Identifier, offset: TextSize) -> bool {
    name.range().is_some_and(|r| r.contains_inclusive(offset))
}

fn describe<'a>(
    context: ContextRef<'a>,
    parent: Option<ContextRef<'a>>,
    offset: TextSize,
) -> Option<Described<'a>> {
    let described = match context {
        ContextRef::Class(c) if covers(&c.name, offset) => {
            let mut signature = format!("{}class {}", prefixed(c.modifiers), c.full_name);
            if let Some(extends) = &c.extends {
                signature.push_str(&format!(" extends {extends}"));
            }
            if !c.implements.is_empty() {
                let names: Vec<_> = c.implements.iter().map(|t| t.name()).collect();
                signature.push_str(&format!(" implements {}", names.join(", ")));
            }
            Described {
                name: &c.name,
                signature,
                qualified_name: Some(c.full_name.clone()),
                documentation: c.documentation.as_ref(),
                param_doc: None,
            }
        }
        ContextRef::Interface(c) if covers(&c.name, offset) => Described {
            name: &c.name,
            signature: format!("{}interface {}", prefixed(c.modifiers), c.full_name),
            qualified_name: Some(c.full_name.clone()),
            documentation: c.documentation.as_ref(),
            param_doc: None,
        },
        ContextRef::Enumeration(c) if covers(&c.name, offset) => Described {
            name: &c.name,
            signature: format!("{}enum {}", prefixed(c.modifiers), c.full_name),
            qualified_name: Some(c.full_name.clone()),
            documentation: c.documentation.as_ref(),
            param_doc: None,
        },
        ContextRef::EnumEntry(c) if covers(&c.name, offset) => {
            let qualified_name = match parent {
                Some(ContextRef::Enumeration(e)) => format!("{}.{}", e.full_name, c.name),
                _ => c.name.to_string(),
            };
            Described {
                name: &c.name,
                signature: qualified_name.clone(),
                qualified_name: Some(qualified_name),
                documentation: c.documentation.as_ref(),
                param_doc: None,
            }
        }
        ContextRef::ClassVariable(c) if covers(&c.name, offset) => Described {
            name: &c.name,
            signature: format!(
                "{}var {} {}",
                prefixed(c.modifiers),
                c.type_name,
                c.name
            ),
            qualified_name: None,
            documentation: c.documentation.as_ref(),
            param_doc: None,
        },
        ContextRef::Function(c) if covers(&c.name, offset) => Described {
            name: &c.name,
            signature: c.signature(),
            qualified_name: None,
            documentation: c.documentation.as_ref(),
            param_doc: None,
        },
        ContextRef::FunctionArgument(c) if covers(&c.name, offset) => {
            let param_doc = match parent {
                Some(ContextRef::Function(f)) => f
                    .documentation
                    .as_ref()
                    .and_then(|d| d.param(c.name.name())),
                _ => None,
            };
            Described {
                name: &c.name,
                signature: format!("{} {}", c.type_name, c.name),
                qualified_name: None,
                documentation: None,
                param_doc,
            }
        }
        ContextRef::Variable(c) if covers(&c.name, offset) => Described {
            name: &c.name,
            signature: format!("var {} {}", c.type_name, c.name),
            qualified_name: None,
            documentation: None,
            param_doc: None,
        },
        ContextRef::TryCatch(c) if covers(&c.variable, offset) => Described {
            name: &c.variable,
            signature: format!("catch {} {}", c.caught_type, c.variable),
            qualified_name: None,
            documentation: None,
            param_doc: None,
        },
        _ => return None,
    };
    Some(described)
}

fn prefixed(modifiers: TypeModifierSet) -> String {
    if modifiers.is_empty() {
        String::new()
    } else {
        format!("{modifiers} ")
    }
}

fn format_contents(
    signature: &str,
    documentation: Option<&ContextDocumentation>,
    param_doc: Option<&ContextDocumentationBlock>,
) -> String {
    let mut contents = format!("```dragonscript\n{signature}\n```");
    if let Some(documentation) = documentation {
        if documentation.is_deprecated() {
            contents.push_str("\n\n**Deprecated**");
        }
        if let Some(brief) = documentation.brief() {
            let text = brief.text();
            if !text.is_empty() {
                contents.push_str("\n\n");
                contents.push_str(&text);
            }
        }
    }
    if let Some(param) = param_doc {
        let text = param.text();
        if !text.is_empty() {
            contents.push_str("\n\n");
            contents.push_str(&text);
        }
    }
    contents
}
