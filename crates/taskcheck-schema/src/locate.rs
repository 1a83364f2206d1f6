//! # Field Locator
//!
//! `serde_yaml` yields values without source positions, so diagnostics
//! about individual fields need a separate map from field names to source
//! ranges. The locator scans the metadata block line by line and records,
//! for every top-level key:
//!
//! - the key itself and its inline scalar value,
//! - each block-style list item (`- value`) below it,
//! - each nested `key: value` entry below it (used by `ages`).
//!
//! All ranges are absolute offsets into the document. Surrounding quotes
//! are excluded from value ranges so that a range covers exactly the text
//! the YAML parser turned into a string. Flow-style collections
//! (`[a, b]`) are only located as a whole; validators fall back to coarser
//! ranges when a finer one is missing.

use std::ops::Range;

/// A nested `key: value` line below a top-level key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrySpan {
    /// Entry key, unquoted.
    pub key: String,
    /// Range of the key.
    pub key_range: Range<usize>,
    /// Range of the value, empty at the end of the line if there is none.
    pub value: Range<usize>,
}

impl EntrySpan {
    /// Range from the key to the end of the value.
    pub fn line(&self) -> Range<usize> {
        self.key_range.start..self.value.end.max(self.key_range.end)
    }
}

/// Source ranges belonging to one top-level key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpan {
    /// Range of the key name.
    pub key: Range<usize>,
    /// Range of the inline value, if the key line has one.
    pub value: Option<Range<usize>>,
    /// From the key to the end of its last nested line.
    pub block: Range<usize>,
    /// Block-style list items, in order.
    pub items: Vec<Range<usize>>,
    /// Nested mapping entries, in order.
    pub entries: Vec<EntrySpan>,
}

impl FieldSpan {
    /// Best range for the whole value: the inline value, else the key.
    pub fn value_or_key(&self) -> Range<usize> {
        self.value.clone().unwrap_or_else(|| self.key.clone())
    }

    /// Range of list item `index`, falling back to the value or the key.
    pub fn item(&self, index: usize) -> Range<usize> {
        self.items
            .get(index)
            .cloned()
            .unwrap_or_else(|| self.value_or_key())
    }

    /// Nested entry named `key`.
    pub fn entry(&self, key: &str) -> Option<&EntrySpan> {
        self.entries.iter().find(|e| e.key == key)
    }
}

/// Map from top-level keys to their source ranges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldLocator {
    fields: Vec<(String, FieldSpan)>,
}

impl FieldLocator {
    /// Scan `content`, which starts at absolute offset `offset`.
    pub fn locate(content: &str, offset: usize) -> Self {
        let mut fields: Vec<(String, FieldSpan)> = Vec::new();
        let mut line_start = 0;
        while line_start < content.len() {
            let line_end = content[line_start..]
                .find('\n')
                .map_or(content.len(), |i| line_start + i);
            let line = content[line_start..line_end].trim_end_matches('\r');
            let base = offset + line_start;
            scan_line(line, base, &mut fields);
            line_start = line_end + 1;
        }
        Self { fields }
    }

    /// Span of `name`. When a key is repeated the last occurrence wins,
    /// matching the value the parser keeps.
    pub fn get(&self, name: &str) -> Option<&FieldSpan> {
        self.fields
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, span)| span)
    }

    /// Key range of `name`, or `fallback` if the key was not located.
    pub fn key_or(&self, name: &str, fallback: Range<usize>) -> Range<usize> {
        self.get(name).map_or(fallback, |span| span.key.clone())
    }

    /// Earlier occurrences of keys that are defined more than once.
    pub fn shadowed(&self) -> Vec<(&str, &FieldSpan)> {
        self.fields
            .iter()
            .enumerate()
            .filter(|(i, (key, _))| self.fields[i + 1..].iter().any(|(k, _)| k == key))
            .map(|(_, (key, span))| (key.as_str(), span))
            .collect()
    }

    /// Located top-level keys in source order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }
}

fn scan_line(line: &str, base: usize, fields: &mut Vec<(String, FieldSpan)>) {
    let trimmed = line.trim_start();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return;
    }
    let indent = line.len() - trimmed.len();
    let is_item = trimmed == "-" || trimmed.starts_with("- ");

    if indent == 0 && !is_item {
        if let Some((key, key_range, value)) = split_key_value(line, base) {
            fields.push((
                key,
                FieldSpan {
                    key: key_range.clone(),
                    value: (!value.is_empty()).then_some(value),
                    block: key_range.start..base + line.len(),
                    items: Vec::new(),
                    entries: Vec::new(),
                },
            ));
        }
        return;
    }

    let Some((_, span)) = fields.last_mut() else {
        return;
    };
    span.block.end = base + line.len();
    let child_base = base + indent;
    if is_item {
        let rest = &trimmed[1..];
        let item = rest.trim_start();
        let item_start = child_base + 1 + (rest.len() - item.len());
        span.items.push(unquoted(item, item_start));
    } else if let Some((key, key_range, value)) = split_key_value(trimmed, child_base) {
        span.entries.push(EntrySpan {
            key,
            key_range,
            value,
        });
    }
}

/// Split `key: value` into the unquoted key, its range and the value range.
fn split_key_value(line: &str, base: usize) -> Option<(String, Range<usize>, Range<usize>)> {
    let colon = find_mapping_colon(line)?;
    let raw_key = line[..colon].trim_end();
    let key_range = unquoted(raw_key, base);
    let key = line[key_range.start - base..key_range.end - base].to_string();

    let rest = &line[colon + 1..];
    let value = strip_comment(rest.trim_start());
    let value_start = base + colon + 1 + (rest.len() - rest.trim_start().len());
    let value_range = if value.is_empty() {
        base + line.len()..base + line.len()
    } else {
        unquoted(value, value_start)
    };
    Some((key, key_range, value_range))
}

/// Position of the `:` separating a key from its value: followed by a
/// space or the end of the line, outside quotes.
fn find_mapping_colon(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    let mut quote: Option<u8> = None;
    for (i, &b) in bytes.iter().enumerate() {
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None if (b == b'"' || b == b'\'') && i == 0 => quote = Some(b),
            None if b == b':' && bytes.get(i + 1).map_or(true, |n| *n == b' ' || *n == b'\t') => {
                return Some(i)
            }
            None => {}
        }
    }
    None
}

/// Drop a trailing ` #comment` from an unquoted scalar.
fn strip_comment(value: &str) -> &str {
    if value.starts_with('"') || value.starts_with('\'') {
        return value;
    }
    match value.find(" #") {
        Some(i) => value[..i].trim_end(),
        None => value,
    }
}

/// Range of `s` (starting at `start`) without matching surrounding quotes.
fn unquoted(s: &str, start: usize) -> Range<usize> {
    let bytes = s.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if (first == b'"' || first == b'\'') && first == last {
            return start + 1..start + s.len() - 1;
        }
    }
    start..start + s.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    const META: &str = "id: 2024-CH-07\n\
title: \"Beaver Bridges\"\n\
ages:\n  6yo-8yo: --\n  8yo-10yo: easy # too easy?\n\
categories:\n  - algorithms and programming\n  - 'communication and networking'\n\
contributors:\n- Jane Doe, Switzerland (author)\n";

    fn slice(range: Range<usize>) -> &'static str {
        &META[range]
    }

    #[test]
    fn locates_scalar_values() {
        let loc = FieldLocator::locate(META, 0);
        let id = loc.get("id").unwrap();
        assert_eq!(slice(id.key.clone()), "id");
        assert_eq!(slice(id.value.clone().unwrap()), "2024-CH-07");
        let title = loc.get("title").unwrap();
        assert_eq!(slice(title.value_or_key()), "Beaver Bridges");
    }

    #[test]
    fn locates_nested_entries() {
        let loc = FieldLocator::locate(META, 0);
        let ages = loc.get("ages").unwrap();
        assert!(ages.value.is_none());
        assert_eq!(ages.entries.len(), 2);
        let e = ages.entry("8yo-10yo").unwrap();
        assert_eq!(slice(e.key_range.clone()), "8yo-10yo");
        assert_eq!(slice(e.value.clone()), "easy");
        assert_eq!(slice(e.line()), "8yo-10yo: easy");
    }

    #[test]
    fn locates_list_items_with_and_without_indent() {
        let loc = FieldLocator::locate(META, 0);
        let cats = loc.get("categories").unwrap();
        assert_eq!(slice(cats.item(0)), "algorithms and programming");
        assert_eq!(slice(cats.item(1)), "communication and networking");
        assert_eq!(slice(cats.item(9)), "categories");
        let contributors = loc.get("contributors").unwrap();
        assert_eq!(slice(contributors.item(0)), "Jane Doe, Switzerland (author)");
    }

    #[test]
    fn ranges_are_absolute() {
        let text = format!("---\n{META}---\n");
        let loc = FieldLocator::locate(META, 4);
        let id = loc.get("id").unwrap();
        assert_eq!(&text[id.value.clone().unwrap()], "2024-CH-07");
    }

    #[test]
    fn repeated_keys_are_shadowed() {
        let meta = "id: a\ntitle: t\nid: b\n";
        let loc = FieldLocator::locate(meta, 0);
        assert_eq!(&meta[loc.get("id").unwrap().value.clone().unwrap()], "b");
        let shadowed = loc.shadowed();
        assert_eq!(shadowed.len(), 1);
        assert_eq!(shadowed[0].0, "id");
        assert_eq!(&meta[shadowed[0].1.block.clone()], "id: a");
    }

    #[test]
    fn url_colons_are_not_separators() {
        let meta = "keywords:\n  - graph - https://example.org/a\n";
        let loc = FieldLocator::locate(meta, 0);
        let kw = loc.get("keywords").unwrap();
        assert_eq!(&meta[kw.item(0)], "graph - https://example.org/a");
        assert_eq!(loc.keys().collect::<Vec<_>>(), vec!["keywords"]);
    }

    #[test]
    fn empty_inline_value() {
        let meta = "answer_type:\n";
        let loc = FieldLocator::locate(meta, 0);
        let span = loc.get("answer_type").unwrap();
        assert!(span.value.is_none());
        assert_eq!(loc.key_or("missing", 0..1), 0..1);
    }
}
