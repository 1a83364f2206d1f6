//! # Section Presence Checker
//!
//! The body of a task document is split into fixed second-level sections
//! that must appear in a fixed order. Headings are matched as whole lines
//! (trailing whitespace ignored) with a forward-only cursor, so a heading
//! that appears out of order counts as missing.

use taskcheck_core::Diagnostics;

use crate::extract::MetadataBlock;

/// Required section headings, in document order.
pub const REQUIRED_SECTIONS: [&str; 7] = [
    "## Body",
    "## Question/Challenge",
    "## Answer Options/Interactivity Description",
    "## Answer Explanation",
    "## This is Informatics",
    "## Keywords and Websites",
    "## Wording and Phrases",
];

/// Required headings not found in order in `body`.
pub fn missing_sections(body: &str) -> Vec<&'static str> {
    let lines: Vec<&str> = body.lines().map(str::trim_end).collect();
    let mut cursor = 0;
    let mut missing = Vec::new();
    for heading in REQUIRED_SECTIONS {
        match lines[cursor..].iter().position(|line| *line == heading) {
            Some(found) => cursor += found + 1,
            None => missing.push(heading),
        }
    }
    missing
}

/// Report missing headings as one error on the closing delimiter.
pub fn check_sections(block: &MetadataBlock<'_>, diags: &mut Diagnostics<'_>) {
    let body = &diags.text()[block.body_offset..];
    let missing = missing_sections(body);
    if missing.is_empty() {
        return;
    }
    tracing::debug!(missing = missing.len(), "required sections missing");
    diags.error(
        block.closing.clone(),
        format!(
            "missing section{}: {}; the sections must appear in this order: {}",
            if missing.len() == 1 { "" } else { "s" },
            missing.join(", "),
            REQUIRED_SECTIONS.join(", ")
        ),
    );
}
