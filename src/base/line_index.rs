//! Conversion between byte offsets and line/column positions.
//!
//! Columns are counted in UTF-16 code units, which is what LSP clients expect
//! by default.

use text_size::{TextRange, TextSize};

use super::{Position, Span};

/// Line start table for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    text: String,
    /// Byte offset of the first character of each line.
    line_starts: Vec<TextSize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::new(0)];
        for (offset, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(TextSize::new(offset as u32 + 1));
            }
        }
        Self {
            text: text.to_string(),
            line_starts,
        }
    }

    /// The indexed text
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Convert a byte offset to a 0-indexed position. Offsets past the end clamp
    /// to the end of the document.
    pub fn position(&self, offset: TextSize) -> Position {
        let offset = offset.min(TextSize::of(self.text.as_str()));
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let line_start = usize::from(self.line_starts[line]);
        let prefix = self
            .text
            .get(line_start..usize::from(offset))
            .unwrap_or_default();
        let column = prefix.chars().map(char::len_utf16).sum::<usize>();
        Position::new(line as u32, column as u32)
    }

    pub fn span(&self, range: TextRange) -> Span {
        Span::new(self.position(range.start()), self.position(range.end()))
    }

    /// Convert a 0-indexed position back to a byte offset.
    ///
    /// Columns past the end of the line clamp to the line end.
    pub fn offset(&self, position: Position) -> Option<TextSize> {
        let line_start = *self.line_starts.get(position.line as usize)?;
        let line_end = self
            .line_starts
            .get(position.line as usize + 1)
            .copied()
            .unwrap_or_else(|| TextSize::of(self.text.as_str()));
        let line_text = &self.text[usize::from(line_start)..usize::from(line_end)];

        let mut utf16 = 0u32;
        for (byte, ch) in line_text.char_indices() {
            if utf16 >= position.column || ch == '\n' {
                return Some(line_start + TextSize::new(byte as u32));
            }
            utf16 += ch.len_utf16() as u32;
        }
        Some(line_end)
    }
}
