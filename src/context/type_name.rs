use std::fmt;

use smol_str::SmolStr;
use text_size::TextRange;

use super::identifier::PLACEHOLDER;
use crate::parser::ast::{AstNode, TypeRef};

/// Types provided by the script runtime
pub const BUILTIN_TYPES: &[&str] = &[
    "int",
    "float",
    "bool",
    "byte",
    "String",
    "Object",
    "Block",
    "Array",
    "Dictionary",
    "Set",
    "Exception",
    "UnicodeString",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeNameKind {
    Void,
    Named,
}

/// A syntactic type name.
///
/// Synthesized names (the owning class of a constructor or operator) carry
/// no range and are never navigable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeName {
    kind: TypeNameKind,
    name: Option<SmolStr>,
    range: Option<TextRange>,
}

impl TypeName {
    pub fn void(range: Option<TextRange>) -> Self {
        Self {
            kind: TypeNameKind::Void,
            name: None,
            range,
        }
    }

    /// A synthesized type name
    pub fn named(name: impl Into<SmolStr>) -> Self {
        Self {
            kind: TypeNameKind::Named,
            name: Some(name.into()),
            range: None,
        }
    }

    /// A named type the grammar produced without a name
    pub fn unknown() -> Self {
        Self {
            kind: TypeNameKind::Named,
            name: None,
            range: None,
        }
    }

    /// Type name from a type reference; a missing reference is [`TypeName::unknown`]
    pub fn from_type_ref(type_ref: Option<&TypeRef>) -> Self {
        let Some(type_ref) = type_ref else {
            return Self::unknown();
        };
        let range = Some(type_ref.syntax().text_range()).filter(|r| !r.is_empty());
        if type_ref.is_void() {
            return Self::void(range);
        }
        match type_ref.name() {
            Some(name) => Self {
                kind: TypeNameKind::Named,
                name: Some(name.into()),
                range,
            },
            None => Self::unknown(),
        }
    }

    pub fn kind(&self) -> TypeNameKind {
        self.kind
    }

    pub fn is_void(&self) -> bool {
        self.kind == TypeNameKind::Void
    }

    /// Display name: `void`, the dotted name, or `"??"`
    pub fn name(&self) -> &str {
        match (&self.kind, &self.name) {
            (TypeNameKind::Void, _) => "void",
            (TypeNameKind::Named, Some(name)) => name,
            (TypeNameKind::Named, None) => PLACEHOLDER,
        }
    }

    pub fn range(&self) -> Option<TextRange> {
        self.range
    }

    pub fn is_synthesized(&self) -> bool {
        self.range.is_none()
    }

    /// Check whether this names a runtime type (`int`, `String`, ...)
    pub fn is_builtin(&self) -> bool {
        self.name.as_deref().is_some_and(|n| BUILTIN_TYPES.contains(&n))
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
