use std::fmt;

use smol_str::SmolStr;
use text_size::TextRange;

use crate::parser::SyntaxToken;

/// Name used when the grammar matched without producing a lexeme
pub const PLACEHOLDER: &str = "??";

/// A name and the range of the token it was read from
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    name: SmolStr,
    range: Option<TextRange>,
}

impl Identifier {
    pub fn new(name: impl Into<SmolStr>, range: Option<TextRange>) -> Self {
        Self {
            name: name.into(),
            range,
        }
    }

    /// The `"??"` placeholder, without a range
    pub fn placeholder() -> Self {
        Self::new(PLACEHOLDER, None)
    }

    /// Identifier from a token, the placeholder if there is none
    pub fn from_token(token: Option<&SyntaxToken>) -> Self {
        match token {
            Some(token) => Self::new(token.text(), Some(token.text_range())),
            None => Self::placeholder(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn range(&self) -> Option<TextRange> {
        self.range
    }

    pub fn is_placeholder(&self) -> bool {
        self.range.is_none() && self.name == PLACEHOLDER
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_has_no_range() {
        let id = Identifier::from_token(None);
        assert_eq!(id.name(), "??");
        assert!(id.range().is_none());
        assert!(id.is_placeholder());
    }

    #[test]
    fn test_identifier_display() {
        let id = Identifier::new("value", Some(TextRange::new(3.into(), 8.into())));
        assert_eq!(id.to_string(), "value");
        assert!(!id.is_placeholder());
    }
}
