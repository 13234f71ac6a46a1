//! Byte offset → line/column conversion.

use text_size::{TextRange, TextSize};

use super::{Position, Span};

/// Line start table for one source text.
///
/// Columns are counted in `char`s, not bytes, so a diagnostic after a
/// non-ASCII identifier still points at the right column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    text: std::sync::Arc<str>,
    line_starts: Vec<TextSize>,
}

impl LineIndex {
    pub fn new(text: impl Into<std::sync::Arc<str>>) -> Self {
        let text = text.into();
        let mut line_starts = vec![TextSize::new(0)];
        for (offset, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(TextSize::new(offset as u32 + 1));
            }
        }
        Self { text, line_starts }
    }

    /// Position of a byte offset. Offsets past the end clamp to the end.
    pub fn position(&self, offset: TextSize) -> Position {
        let offset = offset.min(TextSize::of(&*self.text));
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let start = usize::from(self.line_starts[line]);
        let column = self.text[start..usize::from(offset)].chars().count();
        Position::new(line, column)
    }

    pub fn span(&self, range: TextRange) -> Span {
        Span::new(self.position(range.start()), self.position(range.end()))
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_on_first_line() {
        let index = LineIndex::new("class Foo {}");
        assert_eq!(index.position(TextSize::new(6)), Position::new(0, 6));
    }

    #[test]
    fn test_position_after_newlines() {
        let index = LineIndex::new("a\nbc\r\ndef");
        assert_eq!(index.line_count(), 3);
        assert_eq!(index.position(TextSize::new(2)), Position::new(1, 0));
        assert_eq!(index.position(TextSize::new(7)), Position::new(2, 1));
    }

    #[test]
    fn test_columns_count_chars() {
        let index = LineIndex::new("é x");
        // 'é' is two bytes
        assert_eq!(index.position(TextSize::new(3)), Position::new(0, 2));
    }

    #[test]
    fn test_offset_past_end_clamps() {
        let index = LineIndex::new("ab");
        assert_eq!(index.position(TextSize::new(40)), Position::new(0, 2));
    }
}
