//! Keywords: `keyword[ - url[, url]*]`, e.g.
//! `binary search - https://en.wikipedia.org/wiki/Binary_search_algorithm`.
//!
//! Keywords and URLs must be unique across the document.

use std::collections::HashSet;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use serde_yaml::Value;
use taskcheck_core::Diagnostics;

use super::{describe, part_range, FieldContext};

static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://\S+$").expect("url pattern is valid"));

/// Separates a keyword from its URLs.
pub const URL_SEPARATOR: &str = " - ";

/// Expected keyword line, quoted in messages.
pub const KEYWORD_FORMAT: &str = "keyword - https://url[, https://url]*";

/// A keyword line split into its parts. Ranges are byte ranges within the
/// line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedKeyword {
    pub keyword: String,
    pub urls: Vec<String>,
    pub keyword_range: Range<usize>,
    pub url_ranges: Vec<Range<usize>>,
}

/// Split a keyword line, or `None` if it has a separator but no valid
/// URL list after it.
pub fn parse_keyword(line: &str) -> Option<ParsedKeyword> {
    let (head, tail) = match line.find(URL_SEPARATOR) {
        Some(i) => (&line[..i], Some((i + URL_SEPARATOR.len(), &line[i + URL_SEPARATOR.len()..]))),
        None => (line, None),
    };
    let keyword = head.trim();
    let keyword_start = head.len() - head.trim_start().len();

    let mut urls = Vec::new();
    let mut url_ranges = Vec::new();
    if let Some((tail_start, tail)) = tail {
        let mut cursor = tail_start;
        for raw in tail.split(',') {
            let url = raw.trim();
            if !URL_PATTERN.is_match(url) {
                return None;
            }
            let start = cursor + (raw.len() - raw.trim_start().len());
            urls.push(url.to_string());
            url_ranges.push(start..start + url.len());
            cursor += raw.len() + 1;
        }
    }

    if keyword.is_empty() {
        return None;
    }
    Some(ParsedKeyword {
        keyword: keyword.to_string(),
        urls,
        keyword_range: keyword_start..keyword_start + keyword.len(),
        url_ranges,
    })
}

pub(crate) fn check_keywords(ctx: &FieldContext<'_>, diags: &mut Diagnostics<'_>, value: &Value) {
    let Value::Sequence(items) = value else {
        diags.error(
            ctx.value("keywords"),
            format!("'keywords' must be a list, found {}", describe(value)),
        );
        return;
    };

    let mut seen_keywords: HashSet<String> = HashSet::new();
    let mut seen_urls: HashSet<String> = HashSet::new();
    for (index, item) in items.iter().enumerate() {
        let item_range = ctx.item("keywords", index);
        let Value::String(line) = item else {
            diags.error(
                item_range,
                format!("each keyword must be a string, found {}", describe(item)),
            );
            continue;
        };
        let Some(parsed) = parse_keyword(line) else {
            diags.warn(
                item_range,
                format!("malformed keyword line; expected '{KEYWORD_FORMAT}'"),
            );
            continue;
        };
        let text = diags.text();

        if !seen_keywords.insert(parsed.keyword.clone()) {
            diags.warn(
                part_range(text, &item_range, line, parsed.keyword_range.clone()),
                format!("duplicate keyword '{}'", parsed.keyword),
            );
        }
        for (url, range) in parsed.urls.iter().zip(&parsed.url_ranges) {
            if !seen_urls.insert(url.clone()) {
                diags.warn(
                    part_range(text, &item_range, line, range.clone()),
                    format!("duplicate URL '{url}'"),
                );
            }
        }
    }
}
