use std::fmt;

use crate::parser::SyntaxKind;
use crate::parser::ast::TypeModifiers;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeModifier {
    Public,
    Protected,
    Private,
    Abstract,
    Fixed,
    Static,
    Native,
}

impl TypeModifier {
    pub const ALL: [TypeModifier; 7] = [
        Self::Public,
        Self::Protected,
        Self::Private,
        Self::Abstract,
        Self::Fixed,
        Self::Static,
        Self::Native,
    ];

    pub fn from_kind(kind: SyntaxKind) -> Option<Self> {
        match kind {
            SyntaxKind::PUBLIC_KW => Some(Self::Public),
            SyntaxKind::PROTECTED_KW => Some(Self::Protected),
            SyntaxKind::PRIVATE_KW => Some(Self::Private),
            SyntaxKind::ABSTRACT_KW => Some(Self::Abstract),
            SyntaxKind::FIXED_KW => Some(Self::Fixed),
            SyntaxKind::STATIC_KW => Some(Self::Static),
            SyntaxKind::NATIVE_KW => Some(Self::Native),
            _ => None,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
            Self::Abstract => "abstract",
            Self::Fixed => "fixed",
            Self::Static => "static",
            Self::Native => "native",
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Set of declaration modifiers.
///
/// Repeated modifiers collapse; an empty set (no visibility) is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TypeModifierSet(u8);

impl TypeModifierSet {
    pub fn new() -> Self {
        Self(0)
    }

    /// Collect the modifiers of a modifier list node
    pub fn from_ast(modifiers: Option<&TypeModifiers>) -> Self {
        let mut set = Self::new();
        if let Some(modifiers) = modifiers {
            for token in modifiers.tokens() {
                if let Some(modifier) = TypeModifier::from_kind(token.kind()) {
                    set.insert(modifier);
                }
            }
        }
        set
    }

    /// Add a modifier; returns false if it was already present
    pub fn insert(&mut self, modifier: TypeModifier) -> bool {
        let present = self.contains(modifier);
        self.0 |= modifier.bit();
        !present
    }

    /// Copy of this set with `modifier` added
    pub fn with(mut self, modifier: TypeModifier) -> Self {
        self.insert(modifier);
        self
    }

    pub fn contains(self, modifier: TypeModifier) -> bool {
        self.0 & modifier.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Modifiers in canonical order
    pub fn iter(self) -> impl Iterator<Item = TypeModifier> {
        TypeModifier::ALL.into_iter().filter(move |m| self.contains(*m))
    }
}

impl FromIterator<TypeModifier> for TypeModifierSet {
    fn from_iter<I: IntoIterator<Item = TypeModifier>>(iter: I) -> Self {
        let mut set = Self::new();
        for modifier in iter {
            set.insert(modifier);
        }
        set
    }
}

impl fmt::Display for TypeModifierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keywords: Vec<_> = self.iter().map(TypeModifier::keyword).collect();
        f.write_str(&keywords.join(" "))
    }
}
