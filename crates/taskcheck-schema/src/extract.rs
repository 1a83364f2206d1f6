//! # Structural Extractor
//!
//! Locates the metadata block at the top of a task document. The block is
//! opened by a `---` line at offset 0 and closed by the next `---` line:
//!
//! ```text
//! ---
//! id: 2024-CH-07
//! title: Beaver Bridges
//! ...
//! ---
//! ## Body
//! ```
//!
//! Everything after the closing line is the document body. Offsets
//! returned here are absolute so that positions found inside the block can
//! be translated back to the source text.

use std::ops::Range;

use thiserror::Error;

/// Line that opens and closes the metadata block.
pub const DELIMITER: &str = "---";

/// The metadata block of a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataBlock<'t> {
    /// Text between the delimiter lines, including the final line break.
    pub content: &'t str,
    /// Absolute offset of the first byte of `content`.
    pub offset: usize,
    /// Range of the opening `---`.
    pub opening: Range<usize>,
    /// Range of the closing `---`.
    pub closing: Range<usize>,
    /// Absolute offset where the body starts.
    pub body_offset: usize,
}

impl MetadataBlock<'_> {
    /// Absolute range of the block content.
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.content.len()
    }
}

/// Fatal structural problems. No further diagnostics are possible.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralError {
    /// The first line is not the delimiter.
    #[error("the file must start with a metadata block: a line containing only '---', then the metadata, then another '---' line")]
    Unopened,

    /// The block is opened but no closing delimiter line follows.
    #[error("the metadata block opened on the first line is never closed; add a line containing only '---' after the metadata")]
    Unclosed {
        /// Region from the opening delimiter to the end of the text.
        opened: Range<usize>,
    },
}

impl StructuralError {
    /// Source range to report the error on.
    pub fn range(&self) -> Range<usize> {
        match self {
            Self::Unopened => 0..1,
            Self::Unclosed { opened } => opened.clone(),
        }
    }
}

/// Locate the metadata block of `text`.
///
/// # Errors
///
/// Returns [`StructuralError::Unopened`] if `text` does not start with a
/// delimiter line and [`StructuralError::Unclosed`] if no closing delimiter
/// line follows it.
pub fn extract_metadata(text: &str) -> Result<MetadataBlock<'_>, StructuralError> {
    let first_end = text.find('\n').unwrap_or(text.len());
    if text[..first_end].trim_end() != DELIMITER {
        return Err(StructuralError::Unopened);
    }
    let opening = 0..DELIMITER.len();
    let unclosed = || StructuralError::Unclosed {
        opened: 0..text.len(),
    };
    if first_end == text.len() {
        return Err(unclosed());
    }

    let offset = first_end + 1;
    let mut line_start = offset;
    loop {
        let line_end = text[line_start..]
            .find('\n')
            .map_or(text.len(), |i| line_start + i);
        if text[line_start..line_end].trim_end() == DELIMITER {
            return Ok(MetadataBlock {
                content: &text[offset..line_start],
                offset,
                opening,
                closing: line_start..line_start + DELIMITER.len(),
                body_offset: (line_end + 1).min(text.len()),
            });
        }
        if line_end == text.len() {
            return Err(unclosed());
        }
        line_start = line_end + 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_block_and_offsets() {
        let text = "---\nid: x\ntitle: y\n---\n## Body\n";
        let block = extract_metadata(text).unwrap();
        assert_eq!(block.content, "id: x\ntitle: y\n");
        assert_eq!(block.offset, 4);
        assert_eq!(&text[block.range()], block.content);
        assert_eq!(&text[block.closing.clone()], "---");
        assert_eq!(&text[block.body_offset..], "## Body\n");
    }

    #[test]
    fn accepts_crlf_line_endings() {
        let text = "---\r\nid: x\r\n---\r\nbody";
        let block = extract_metadata(text).unwrap();
        assert_eq!(block.content, "id: x\r\n");
        assert_eq!(&text[block.body_offset..], "body");
    }

    #[test]
    fn closing_delimiter_at_end_of_text() {
        let text = "---\nid: x\n---";
        let block = extract_metadata(text).unwrap();
        assert_eq!(block.body_offset, text.len());
    }

    #[test]
    fn empty_block() {
        let block = extract_metadata("---\n---\n").unwrap();
        assert_eq!(block.content, "");
        assert_eq!(block.offset, 4);
    }

    #[test]
    fn missing_opening_delimiter() {
        assert_eq!(extract_metadata("id: x\n---\n"), Err(StructuralError::Unopened));
        assert_eq!(extract_metadata(""), Err(StructuralError::Unopened));
        assert_eq!(extract_metadata("----\nid: x\n---\n"), Err(StructuralError::Unopened));
        assert_eq!(StructuralError::Unopened.range(), 0..1);
    }

    #[test]
    fn missing_closing_delimiter() {
        let text = "---\nid: x\n";
        let err = extract_metadata(text).unwrap_err();
        assert_eq!(err.range(), 0..text.len());
        assert!(matches!(extract_metadata("---"), Err(StructuralError::Unclosed { .. })));
        assert!(matches!(extract_metadata("---\n"), Err(StructuralError::Unclosed { .. })));
    }

    #[test]
    fn indented_delimiter_does_not_close() {
        let text = "---\nages:\n  6yo-8yo: ---\n";
        assert!(matches!(extract_metadata(text), Err(StructuralError::Unclosed { .. })));
    }
}
