//! # Schema Parser
//!
//! Parses the metadata block with `serde_yaml` and checks that the fixed
//! set of required fields is present.
//!
//! ## Failure Model
//!
//! - A YAML syntax error, or a document that is not a mapping, is a
//!   structural failure: metadata validation stops for this run. The error
//!   is reported at the parser's own location when it provides one.
//! - Missing required fields are reported together in one error; no field
//!   validator runs against partial data.
//! - A key defined twice is ambiguous. `serde_yaml` rejects it, so earlier
//!   definitions are blanked out before parsing (offsets are preserved)
//!   and a warning is emitted for each; the last definition is used.

use std::ops::Range;

use serde_yaml::{Mapping, Value};

use crate::extract::MetadataBlock;
use crate::locate::FieldLocator;

/// Required fields in schema order.
pub const REQUIRED_FIELDS: [&str; 7] = [
    "id",
    "title",
    "ages",
    "answer_type",
    "categories",
    "contributors",
    "support_files",
];

/// Optional fields.
pub const OPTIONAL_FIELDS: [&str; 1] = ["keywords"];

/// The schema-shaped metadata of one document.
///
/// Values stay YAML values: type checks are the field validators' job so
/// that a wrongly typed field is reported by the validator that owns it.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedMetadata {
    pub id: Value,
    pub title: Value,
    pub ages: Value,
    pub answer_type: Value,
    pub categories: Value,
    pub contributors: Value,
    pub support_files: Value,
    pub keywords: Option<Value>,
}

/// A non-fatal finding made while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    pub range: Range<usize>,
    pub message: String,
}

/// Successful parse of a metadata block.
#[derive(Debug, Clone)]
pub struct SchemaParse {
    pub metadata: ParsedMetadata,
    pub locator: FieldLocator,
    pub warnings: Vec<ParseWarning>,
}

/// Fatal parse outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The block is not a well-formed key/value document.
    Malformed {
        range: Range<usize>,
        message: String,
    },
    /// Required fields are absent (or empty).
    MissingFields {
        range: Range<usize>,
        missing: Vec<&'static str>,
    },
}

impl SchemaError {
    /// Source range to report on.
    pub fn range(&self) -> Range<usize> {
        match self {
            Self::Malformed { range, .. } | Self::MissingFields { range, .. } => range.clone(),
        }
    }

    /// Human-readable message.
    pub fn message(&self) -> String {
        match self {
            Self::Malformed { message, .. } => message.clone(),
            Self::MissingFields { missing, .. } => format!(
                "missing required metadata field{}: {}",
                if missing.len() == 1 { "" } else { "s" },
                missing.join(", ")
            ),
        }
    }
}

/// Parse `block` into [`ParsedMetadata`].
///
/// # Errors
///
/// Returns [`SchemaError::Malformed`] for YAML syntax errors and
/// non-mapping documents, [`SchemaError::MissingFields`] when required
/// fields are absent.
pub fn parse_metadata(block: &MetadataBlock<'_>) -> Result<SchemaParse, SchemaError> {
    let locator = FieldLocator::locate(block.content, block.offset);
    let mut warnings = Vec::new();

    let mut source = block.content.to_string();
    for (key, span) in locator.shadowed() {
        let relative = span.block.start - block.offset..span.block.end - block.offset;
        source.replace_range(relative.clone(), &blank(&block.content[relative]));
        warnings.push(ParseWarning {
            range: span.key.clone(),
            message: format!(
                "'{key}' is defined more than once; this definition is ignored and the last one is used"
            ),
        });
    }

    let value: Value = serde_yaml::from_str(&source).map_err(|e| SchemaError::Malformed {
        range: e
            .location()
            .and_then(|loc| location_range(block, loc.line(), loc.column()))
            .unwrap_or_else(|| block_range(block)),
        message: format!("invalid metadata block: {e}"),
    })?;

    let mut map = match value {
        Value::Null => Mapping::new(),
        Value::Mapping(map) => map,
        _ => {
            return Err(SchemaError::Malformed {
                range: block_range(block),
                message: "the metadata block must consist of 'key: value' fields".to_string(),
            })
        }
    };

    let missing: Vec<&'static str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|name| map.get(*name).map_or(true, Value::is_null))
        .collect();
    if !missing.is_empty() {
        return Err(SchemaError::MissingFields {
            range: block.opening.clone(),
            missing,
        });
    }

    for key in locator.keys() {
        if !REQUIRED_FIELDS.contains(&key) && !OPTIONAL_FIELDS.contains(&key) {
            if let Some(span) = locator.get(key) {
                if !warnings.iter().any(|w| w.range == span.key) {
                    warnings.push(ParseWarning {
                        range: span.key.clone(),
                        message: format!(
                            "unknown metadata field '{key}'; known fields are: {}",
                            REQUIRED_FIELDS
                                .iter()
                                .chain(OPTIONAL_FIELDS.iter())
                                .copied()
                                .collect::<Vec<_>>()
                                .join(", ")
                        ),
                    });
                }
            }
        }
    }

    let mut take = |name: &str| map.remove(name).unwrap_or(Value::Null);
    let metadata = ParsedMetadata {
        id: take("id"),
        title: take("title"),
        ages: take("ages"),
        answer_type: take("answer_type"),
        categories: take("categories"),
        contributors: take("contributors"),
        support_files: take("support_files"),
        keywords: Some(take("keywords")).filter(|v| !v.is_null()),
    };

    Ok(SchemaParse {
        metadata,
        locator,
        warnings,
    })
}

fn block_range(block: &MetadataBlock<'_>) -> Range<usize> {
    if block.content.is_empty() {
        block.opening.clone()
    } else {
        block.range()
    }
}

/// One character at a 1-based line/column of the block content.
fn location_range(block: &MetadataBlock<'_>, line: usize, column: usize) -> Option<Range<usize>> {
    let line_start = if line <= 1 {
        0
    } else {
        block
            .content
            .match_indices('\n')
            .nth(line - 2)
            .map(|(i, _)| i + 1)?
    };
    let rest = &block.content[line_start..];
    let line_text = &rest[..rest.find('\n').unwrap_or(rest.len())];
    let mut chars = line_text.char_indices().skip(column.saturating_sub(1));
    let (start, end) = match chars.next() {
        Some((i, c)) => (i, i + c.len_utf8()),
        None => (line_text.len(), line_text.len()),
    };
    Some(block.offset + line_start + start..block.offset + line_start + end)
}

/// Same-length replacement of `s` with spaces, keeping line breaks.
fn blank(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '\n' | '\r' => c.to_string(),
            _ => " ".repeat(c.len_utf8()),
        })
        .collect()
}
