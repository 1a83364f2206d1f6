//! # Range/Position Utilities
//!
//! Maps byte offsets of a source text to human-facing line/column
//! positions and to the UTF-16 code-unit offsets editors expect.

use std::fmt;
use std::ops::Range;

/// A 1-based line and column. Columns count Unicode scalar values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Precomputed line table over a text.
#[derive(Debug, Clone)]
pub struct LineIndex<'t> {
    text: &'t str,
    line_starts: Vec<usize>,
}

impl<'t> LineIndex<'t> {
    /// Index the line starts of `text`.
    pub fn new(text: &'t str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            text.bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self { text, line_starts }
    }

    /// Number of lines (a trailing newline opens an empty last line).
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// 0-based line number containing `offset`.
    pub fn line_of(&self, offset: usize) -> usize {
        let offset = offset.min(self.text.len());
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        }
    }

    /// Byte range of 0-based `line`, without its line terminator.
    pub fn line_range(&self, line: usize) -> Range<usize> {
        let start = self.line_starts.get(line).copied().unwrap_or(self.text.len());
        let mut end = self
            .line_starts
            .get(line + 1)
            .map(|next| next - 1)
            .unwrap_or(self.text.len());
        if end > start && self.text.as_bytes()[end - 1] == b'\r' {
            end -= 1;
        }
        start..end
    }

    /// Text of 0-based `line`, without its line terminator.
    pub fn line_text(&self, line: usize) -> &'t str {
        let range = self.line_range(line);
        &self.text[range]
    }

    /// 1-based line/column of a byte offset.
    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.text.len());
        let line = self.line_of(offset);
        let start = self.line_starts[line];
        let column = self.text[start..floor_boundary(self.text, offset)]
            .chars()
            .count();
        Position {
            line: line + 1,
            column: column + 1,
        }
    }

    /// Convert a byte offset to a UTF-16 code-unit offset.
    pub fn utf16_offset(&self, offset: usize) -> usize {
        let offset = floor_boundary(self.text, offset.min(self.text.len()));
        self.text[..offset].encode_utf16().count()
    }
}

fn floor_boundary(text: &str, mut offset: usize) -> usize {
    while offset > 0 && !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn positions_are_one_based() {
        let index = LineIndex::new("ab\ncd\n");
        assert_eq!(index.position(0), Position { line: 1, column: 1 });
        assert_eq!(index.position(1), Position { line: 1, column: 2 });
        assert_eq!(index.position(3), Position { line: 2, column: 1 });
        assert_eq!(index.position(6), Position { line: 3, column: 1 });
        assert_eq!(index.line_count(), 3);
    }

    #[test]
    fn columns_count_characters() {
        let index = LineIndex::new("é-x");
        assert_eq!(index.position(3), Position { line: 1, column: 3 });
    }

    #[test]
    fn line_text_strips_terminators() {
        let index = LineIndex::new("one\r\ntwo\nthree");
        assert_eq!(index.line_text(0), "one");
        assert_eq!(index.line_text(1), "two");
        assert_eq!(index.line_text(2), "three");
        assert_eq!(index.line_text(7), "");
    }

    #[test]
    fn offsets_past_the_end_are_clamped() {
        let index = LineIndex::new("ab");
        assert_eq!(index.position(99), Position { line: 1, column: 3 });
        assert_eq!(index.utf16_offset(99), 2);
    }

    #[test]
    fn utf16_counts_surrogate_pairs() {
        let index = LineIndex::new("a😀b");
        assert_eq!(index.utf16_offset(1), 1);
        assert_eq!(index.utf16_offset(5), 3);
        assert_eq!(index.utf16_offset(6), 4);
    }

    #[test]
    fn position_display() {
        assert_eq!(Position { line: 4, column: 2 }.to_string(), "4:2");
    }

    proptest! {
        /// Every offset maps to a line whose range contains it.
        #[test]
        fn line_of_contains_offset(text in "[a-z\n]{0,40}", raw in 0usize..50) {
            let index = LineIndex::new(&text);
            let offset = raw.min(text.len());
            let line = index.line_of(offset);
            let range = index.line_range(line);
            prop_assert!(range.start <= offset);
            prop_assert!(offset <= range.end);
        }

        /// ASCII text has identical byte and UTF-16 offsets.
        #[test]
        fn ascii_utf16_is_identity(text in "[ -~]{0,40}", raw in 0usize..50) {
            let index = LineIndex::new(&text);
            let offset = raw.min(text.len());
            prop_assert_eq!(index.utf16_offset(offset), offset);
        }
    }
}
