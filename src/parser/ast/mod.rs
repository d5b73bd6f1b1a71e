//! Typed AST wrappers over the untyped rowan CST.
//!
//! This module provides strongly-typed accessors for DragonScript syntax nodes.
//! Each struct wraps a SyntaxNode and provides methods to access children.
//! Every accessor is optional: a malformed script produces a tree with
//! missing slots, never a panic.

use super::syntax_kind::SyntaxKind;
use super::{SyntaxNode, SyntaxToken};

// ============================================================================
// Helper utilities for reducing code duplication
// ============================================================================

/// Check if a syntax node has a direct child token of the specified kind.
#[inline]
fn has_token(node: &SyntaxNode, kind: SyntaxKind) -> bool {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .any(|t| t.kind() == kind)
}

/// Find the first direct child token of the specified kind.
#[inline]
fn find_token(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .find(|t| t.kind() == kind)
}

/// Get the nth child node castable to `T`.
#[inline]
fn nth_child<T: AstNode>(node: &SyntaxNode, n: usize) -> Option<T> {
    node.children().filter_map(T::cast).nth(n)
}

/// Macro to generate boolean property methods that check for a specific token kind.
///
/// Usage:
/// ```ignore
/// impl MyStruct {
///     has_token_method!(is_void, VOID_KW, "func void f()");
/// }
/// ```
macro_rules! has_token_method {
    ($name:ident, $kind:ident) => {
        #[doc = concat!("Check if this node has the `", stringify!($kind), "` token.")]
        pub fn $name(&self) -> bool {
            has_token(&self.0, SyntaxKind::$kind)
        }
    };
    ($name:ident, $kind:ident, $example:literal) => {
        #[doc = concat!("Check if this node has the `", stringify!($kind), "` token (e.g., `", $example, "`).")]
        pub fn $name(&self) -> bool {
            has_token(&self.0, SyntaxKind::$kind)
        }
    };
}

/// Macro to generate a method that finds the first direct child token of a kind.
///
/// Usage:
/// ```ignore
/// impl MyStruct {
///     token_method!(name, IDENT);
/// }
/// ```
macro_rules! token_method {
    ($name:ident, $kind:ident) => {
        #[doc = concat!("Get the first `", stringify!($kind), "` token of this node.")]
        pub fn $name(&self) -> Option<SyntaxToken> {
            find_token(&self.0, SyntaxKind::$kind)
        }
    };
}

/// Macro to generate a method that finds the first child of a specific AST type.
///
/// Usage:
/// ```ignore
/// impl MyStruct {
///     first_child_method!(type_ref, TypeRef);
///     first_child_method!(statements, Statements);
/// }
/// ```
macro_rules! first_child_method {
    ($name:ident, $type:ident) => {
        #[doc = concat!("Get the first `", stringify!($type), "` child of this node.")]
        pub fn $name(&self) -> Option<$type> {
            self.0.children().find_map($type::cast)
        }
    };
}

/// Macro to generate a method that returns an iterator over children of a specific AST type.
///
/// Usage:
/// ```ignore
/// impl MyStruct {
///     children_method!(entries, EnumEntry);
/// }
/// ```
macro_rules! children_method {
    ($name:ident, $type:ident) => {
        #[doc = concat!("Get all `", stringify!($type), "` children of this node.")]
        pub fn $name(&self) -> impl Iterator<Item = $type> + '_ {
            self.0.children().filter_map($type::cast)
        }
    };
}

/// Macro to generate a method that finds the first matching token from a set of kinds.
///
/// Returns the matched token.
///
/// Usage:
/// ```ignore
/// impl MyStruct {
///     find_token_method!(keyword, [THIS_KW, SUPER_KW], "Get the delegation keyword.");
/// }
/// ```
macro_rules! find_token_method {
    ($name:ident, [$($kind:ident),+ $(,)?], $doc:literal) => {
        #[doc = $doc]
        pub fn $name(&self) -> Option<SyntaxToken> {
            self.0
                .children_with_tokens()
                .filter_map(|e| e.into_token())
                .find(|t| matches!(t.kind(), $(SyntaxKind::$kind)|+))
        }
    };
}

/// Macro to generate `modifiers()` for declarations that may start with a modifier list.
macro_rules! modifiers_method {
    () => {
        /// Get the modifier list preceding the declaration keyword.
        pub fn modifiers(&self) -> Option<TypeModifiers> {
            self.0.children().find_map(TypeModifiers::cast)
        }
    };
}

/// Trait for AST nodes that wrap a SyntaxNode
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;

    /// Find all descendant nodes of a specific AST type
    fn descendants<T: AstNode>(&self) -> impl Iterator<Item = T> {
        self.syntax().descendants().filter_map(T::cast)
    }

    /// The `/** ... */` documentation comment immediately preceding this node.
    ///
    /// Only whitespace and newlines may separate the comment from the node.
    fn doc_comment(&self) -> Option<SyntaxToken> {
        extract_doc_comment(self.syntax())
    }
}

/// Find the documentation comment token preceding a syntax node.
pub fn extract_doc_comment(node: &SyntaxNode) -> Option<SyntaxToken> {
    let mut current = node.prev_sibling_or_token();

    while let Some(node_or_token) = current {
        match node_or_token {
            rowan::NodeOrToken::Token(t) => match t.kind() {
                SyntaxKind::WHITESPACE | SyntaxKind::NEWLINE => {
                    current = t.prev_sibling_or_token();
                }
                SyntaxKind::DOC_COMMENT => return Some(t),
                _ => return None,
            },
            rowan::NodeOrToken::Node(_) => return None,
        }
    }
    None
}

// ============================================================================
// Helper macros
// ============================================================================

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(pub(crate) SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self(node))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

// Submodules are declared after the macros so macro_rules! are in scope
mod declarations;
mod expressions;
mod statements;

// Re-export all public types so external code sees a flat namespace
pub use self::declarations::*;
pub use self::expressions::*;
pub use self::statements::*;
