//! Line index for offset ↔ line/column conversion over stylesheet text.

use crate::ByteOffset;
use text_size::TextSize;

/// A line and column position (0-indexed, columns in bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LineCol {
    /// 0-indexed line number.
    pub line: u32,
    /// 0-indexed column (byte offset within the line).
    pub col: u32,
}

impl LineCol {
    /// Creates a new line/column position.
    #[inline]
    pub fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }
}

/// An index for converting between byte offsets and line/column positions.
///
/// Stores the byte offset of the start of each line, giving O(log n) lookups
/// in both directions.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// `line_starts[i]` is the offset where line `i` begins.
    line_starts: Vec<ByteOffset>,
}

impl LineIndex {
    /// Creates a new line index from source text.
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::from(0)];

        for (offset, c) in text.char_indices() {
            if c == '\n' {
                line_starts.push(TextSize::from((offset + 1) as u32));
            }
        }

        Self { line_starts }
    }

    /// Returns the number of lines in the source.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Converts a byte offset to a line/column position.
    ///
    /// Offsets past the last line start are attributed to the last line.
    pub fn line_col(&self, offset: ByteOffset) -> LineCol {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(line) => line.saturating_sub(1),
        };

        let line_start = self.line_starts[line];
        LineCol {
            line: line as u32,
            col: u32::from(offset) - u32::from(line_start),
        }
    }

    /// Converts a line/column position to a byte offset.
    ///
    /// Returns `None` if the line is out of bounds.
    pub fn offset(&self, line_col: LineCol) -> Option<ByteOffset> {
        let line_start = self.line_starts.get(line_col.line as usize)?;
        Some(*line_start + TextSize::from(line_col.col))
    }

    /// Returns the byte offset where a line starts.
    pub fn line_start(&self, line: u32) -> Option<ByteOffset> {
        self.line_starts.get(line as usize).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line() {
        let index = LineIndex::new(".foo { color: red; }");
        assert_eq!(index.line_count(), 1);
        assert_eq!(index.line_col(TextSize::from(0)), LineCol::new(0, 0));
        assert_eq!(index.line_col(TextSize::from(5)), LineCol::new(0, 5));
    }

    #[test]
    fn test_multiple_lines() {
        let index = LineIndex::new(".foo {\n  color: red;\n}\n");
        assert_eq!(index.line_count(), 4);

        assert_eq!(index.line_col(TextSize::from(0)), LineCol::new(0, 0));
        assert_eq!(index.line_col(TextSize::from(7)), LineCol::new(1, 0));
        assert_eq!(index.line_col(TextSize::from(9)), LineCol::new(1, 2));
        assert_eq!(index.line_col(TextSize::from(21)), LineCol::new(2, 0));
    }

    #[test]
    fn test_offset_roundtrip() {
        let text = ".a { }\n.b { }\n.c { }";
        let index = LineIndex::new(text);

        for offset in 0..text.len() {
            let offset = TextSize::from(offset as u32);
            let line_col = index.line_col(offset);
            assert_eq!(index.offset(line_col), Some(offset));
        }
    }

    #[test]
    fn test_line_start() {
        let index = LineIndex::new(".a { }\n.b { }\n");
        assert_eq!(index.line_start(0), Some(TextSize::from(0)));
        assert_eq!(index.line_start(1), Some(TextSize::from(7)));
        assert_eq!(index.line_start(2), Some(TextSize::from(14)));
        assert_eq!(index.line_start(3), None);
    }
}
