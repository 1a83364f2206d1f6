//! Support files: credits for the images and other files shipped with a
//! task.
//!
//! ```text
//! <pattern> by <author[, author]*>[ (<license>)]
//! <pattern> from <source>[ (<license>)]
//! ```
//!
//! Every `graphics` contributor must be credited in at least one `by`
//! entry, and every `by` author must be a `graphics` contributor.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use serde_yaml::Value;
use taskcheck_core::Diagnostics;

use super::contributors::GRAPHICS_ROLE;
use super::{describe, part_range, FieldContext, RunState};

static SUPPORT_FILE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<pattern>.+?) (?:by (?P<authors>.+?)|from (?P<source>.+?))(?: \((?P<license>[^()]+)\))?$",
    )
    .expect("support file pattern is valid")
});

/// Expected support file entry, quoted in messages.
pub const SUPPORT_FILE_FORMAT: &str =
    "<pattern> by <author[, author]*>[ (<license>)]' or '<pattern> from <source>[ (<license>)]";

/// Where a support file comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// Made by the listed contributors.
    By {
        authors: Vec<String>,
        /// Byte ranges of the authors within the entry.
        author_ranges: Vec<Range<usize>>,
        license: Option<String>,
    },
    /// Taken from an external source.
    From {
        source: String,
        license: Option<String>,
    },
}

/// A support file entry split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSupportFile {
    pub file_pattern: String,
    pub origin: Origin,
}

/// Split a support file entry, or `None` if it follows neither form.
pub fn parse_support_file(line: &str) -> Option<ParsedSupportFile> {
    let caps = SUPPORT_FILE_PATTERN.captures(line)?;
    let license = caps.name("license").map(|m| m.as_str().to_string());
    let origin = if let Some(authors) = caps.name("authors") {
        let mut names = Vec::new();
        let mut ranges = Vec::new();
        let mut cursor = authors.start();
        for raw in authors.as_str().split(',') {
            let name = raw.trim();
            let start = cursor + (raw.len() - raw.trim_start().len());
            if !name.is_empty() {
                names.push(name.to_string());
                ranges.push(start..start + name.len());
            }
            cursor += raw.len() + 1;
        }
        Origin::By {
            authors: names,
            author_ranges: ranges,
            license,
        }
    } else {
        Origin::From {
            source: caps.name("source")?.as_str().to_string(),
            license,
        }
    };
    Some(ParsedSupportFile {
        file_pattern: caps["pattern"].to_string(),
        origin,
    })
}

pub(crate) fn check_support_files(
    ctx: &FieldContext<'_>,
    diags: &mut Diagnostics<'_>,
    state: &RunState,
    value: &Value,
) {
    let Value::Sequence(items) = value else {
        diags.error(
            ctx.value("support_files"),
            format!("'support_files' must be a list, found {}", describe(value)),
        );
        return;
    };

    let mut uncredited = state.graphics_names.clone();
    for (index, item) in items.iter().enumerate() {
        let item_range = ctx.item("support_files", index);
        let Value::String(line) = item else {
            diags.error(
                item_range,
                format!("each support file entry must be a string, found {}", describe(item)),
            );
            continue;
        };
        let Some(entry) = parse_support_file(line) else {
            diags.warn(
                item_range,
                format!("support file entries must have the form '{SUPPORT_FILE_FORMAT}'"),
            );
            continue;
        };
        let Origin::By {
            authors,
            author_ranges,
            ..
        } = &entry.origin
        else {
            continue;
        };
        for (author, range) in authors.iter().zip(author_ranges) {
            if state.graphics_names.contains(author) {
                uncredited.remove(author);
            } else {
                let range = part_range(diags.text(), &item_range, line, range.clone());
                diags.warn(
                    range,
                    format!(
                        "'{author}' is credited for '{}' but is not listed as a contributor with the '{GRAPHICS_ROLE}' role",
                        entry.file_pattern
                    ),
                );
            }
        }
    }

    for name in uncredited {
        diags.warn(
            ctx.key("support_files"),
            format!(
                "'{name}' has the '{GRAPHICS_ROLE}' role but is not credited for any support file"
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_by_entries() {
        let line = "*.svg by Jane Doe, John Roe (CC BY-SA 4.0)";
        let entry = parse_support_file(line).unwrap();
        assert_eq!(entry.file_pattern, "*.svg");
        match entry.origin {
            Origin::By {
                authors,
                author_ranges,
                license,
            } => {
                assert_eq!(authors, vec!["Jane Doe", "John Roe"]);
                assert_eq!(&line[author_ranges[1].clone()], "John Roe");
                assert_eq!(license.as_deref(), Some("CC BY-SA 4.0"));
            }
            other => panic!("expected By, got {other:?}"),
        }
    }

    #[test]
    fn parses_from_entries() {
        let entry = parse_support_file("map.png from https://openclipart.org (public domain)").unwrap();
        assert_eq!(
            entry.origin,
            Origin::From {
                source: "https://openclipart.org".into(),
                license: Some("public domain".into()),
            }
        );
    }

    #[test]
    fn license_is_optional() {
        let entry = parse_support_file("beaver.svg by Jane Doe").unwrap();
        assert!(matches!(entry.origin, Origin::By { license: None, .. }));
    }

    #[test]
    fn rejects_entries_without_origin() {
        assert!(parse_support_file("beaver.svg").is_none());
        assert!(parse_support_file("beaver.svg drawn by hand").is_some());
        assert!(parse_support_file("by Jane Doe").is_none());
    }
}
