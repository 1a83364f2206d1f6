//! # Diagnostic Rendering
//!
//! Human-readable output for the terminal:
//!
//! ```text
//! [warn]: unknown role 'chef'; expected one of ...
//!   - Jane Doe, Switzerland (author, chef)
//!                                    ^^^^
//! ```
//!
//! Long lines are cut on the left with an ellipsis so the highlighted
//! part stays visible. The underline never extends past the end of the
//! first highlighted line and always has at least one caret.

use taskcheck_core::{Diagnostic, LineIndex};

/// Columns shown before the line is cut.
pub const MAX_COLUMN: usize = 100;
/// Characters of context kept before the highlight in a cut line.
const CONTEXT: usize = 20;
const ELLIPSIS: char = '…';

/// Render one diagnostic with its source excerpt.
pub fn render_diagnostic(index: &LineIndex<'_>, diagnostic: &Diagnostic) -> String {
    let line = index.line_of(diagnostic.start);
    let range = index.line_range(line);
    let text = index.line_text(line);

    let start = diagnostic.start.clamp(range.start, range.end) - range.start;
    let end = diagnostic.end.clamp(range.start, range.end) - range.start;
    let chars: Vec<char> = text.chars().collect();
    let start_col = char_column(text, start);
    let end_col = char_column(text, end).max(start_col);

    let (shown, caret_col) = if start_col > MAX_COLUMN {
        let skip = start_col - CONTEXT;
        let rest: String = chars[skip..].iter().collect();
        (format!("{ELLIPSIS}{rest}"), CONTEXT + 1)
    } else {
        (text.to_string(), start_col)
    };
    let carets = (end_col - start_col).max(1);

    format!(
        "[{}]: {}\n  {}\n  {}{}",
        diagnostic.severity,
        diagnostic.message,
        shown,
        " ".repeat(caret_col),
        "^".repeat(carets)
    )
}

/// Summary line for a file without diagnostics.
pub fn render_clean(file: &str) -> String {
    format!("{file}: all checks passed")
}

/// Summary line counting errors and warnings.
pub fn render_summary(file: &str, diagnostics: &[Diagnostic]) -> String {
    let errors = diagnostics.iter().filter(|d| d.is_error()).count();
    let warnings = diagnostics.len() - errors;
    format!(
        "{file}: {errors} error{}, {warnings} warning{}",
        plural(errors),
        plural(warnings)
    )
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// Number of characters in `text` before byte offset `offset`.
fn char_column(text: &str, offset: usize) -> usize {
    text.char_indices().take_while(|(i, _)| *i < offset).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskcheck_core::Severity;

    fn diag(severity: Severity, start: usize, end: usize, message: &str) -> Diagnostic {
        Diagnostic {
            severity,
            start,
            end,
            message: message.to_string(),
        }
    }

    #[test]
    fn underlines_the_range() {
        let text = "---\nid: 2024-CH-07\n---\n";
        let index = LineIndex::new(text);
        let out = render_diagnostic(&index, &diag(Severity::Error, 8, 18, "bad id"));
        assert_eq!(out, "[error]: bad id\n  id: 2024-CH-07\n      ^^^^^^^^^^");
    }

    #[test]
    fn empty_range_gets_one_caret() {
        let text = "id: 2024-ZZ-07\n";
        let index = LineIndex::new(text);
        let out = render_diagnostic(&index, &diag(Severity::Warn, 11, 11, "unknown code"));
        assert_eq!(out.lines().last().unwrap(), "             ^");
        assert!(out.starts_with("[warn]: unknown code\n"));
    }

    #[test]
    fn underline_is_clipped_to_the_first_line() {
        let text = "ab\ncd\n";
        let index = LineIndex::new(text);
        let out = render_diagnostic(&index, &diag(Severity::Error, 1, 5, "x"));
        assert_eq!(out, "[error]: x\n  ab\n   ^");
    }

    #[test]
    fn columns_count_characters() {
        let text = "é: ü";
        let index = LineIndex::new(text);
        let start = text.find('ü').unwrap();
        let out = render_diagnostic(&index, &diag(Severity::Warn, start, text.len(), "x"));
        assert_eq!(out.lines().last().unwrap(), "     ^");
    }

    #[test]
    fn long_lines_are_cut_with_an_ellipsis() {
        let text = format!("{}TARGET tail", "x".repeat(150));
        let index = LineIndex::new(&text);
        let out = render_diagnostic(&index, &diag(Severity::Error, 150, 156, "x"));
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[1].starts_with("  …"));
        assert!(lines[1].ends_with("TARGET tail"));
        let caret = lines[2].find('^').unwrap();
        assert_eq!(lines[1].chars().nth(caret), Some('T'));
        assert_eq!(lines[2].trim(), "^^^^^^");
    }

    #[test]
    fn summaries() {
        assert_eq!(render_clean("a.task.md"), "a.task.md: all checks passed");
        let diags = [
            diag(Severity::Error, 0, 1, "e"),
            diag(Severity::Warn, 0, 1, "w"),
            diag(Severity::Warn, 0, 1, "w"),
        ];
        assert_eq!(render_summary("a.task.md", &diags), "a.task.md: 1 error, 2 warnings");
    }
}
