//! # Diagnostics
//!
//! The unit of output of the validation engine: a severity, a half-open
//! source range and a human-readable message.
//!
//! ## Invariant
//!
//! Every diagnostic produced through [`Diagnostics`] satisfies
//! `start <= end <= text.len()` and both offsets fall on UTF-8 character
//! boundaries of the validated text. The sink clamps out-of-range offsets
//! so that no validator can emit a range that cannot be highlighted.
//!
//! ## Offsets
//!
//! Internally ranges are byte offsets. Editors address text in UTF-16 code
//! units, so [`Diagnostic::to_wire`] converts to the [`WireDiagnostic`]
//! record used by the JSON output.

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::position::LineIndex;

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    /// The document violates the schema and must be fixed.
    #[serde(rename = "error")]
    Error,
    /// The document is acceptable but something looks off.
    #[serde(rename = "warn")]
    Warn,
}

impl Severity {
    /// Returns the wire string for this severity.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reported issue anchored to a byte range of the validated text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Error or warning.
    pub severity: Severity,
    /// Byte offset of the first highlighted character.
    pub start: usize,
    /// Byte offset one past the last highlighted character.
    pub end: usize,
    /// Description of the issue, including the expected form when useful.
    pub message: String,
}

impl Diagnostic {
    /// The highlighted byte range.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Returns true for error-severity diagnostics.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Convert to the wire record with UTF-16 code-unit offsets.
    pub fn to_wire(&self, index: &LineIndex<'_>) -> WireDiagnostic {
        WireDiagnostic {
            severity: self.severity,
            start: index.utf16_offset(self.start),
            end: index.utf16_offset(self.end),
            message: self.message.clone(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}..{}: {}", self.severity, self.start, self.end, self.message)
    }
}

/// Diagnostic record exchanged with editor integrations.
///
/// Offsets are 0-based UTF-16 code-unit positions into the text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireDiagnostic {
    pub severity: Severity,
    pub start: usize,
    pub end: usize,
    pub message: String,
}

/// Ordered diagnostic sink shared by the validators of one run.
///
/// Emission order is preserved; diagnostics are never sorted by position.
#[derive(Debug)]
pub struct Diagnostics<'t> {
    text: &'t str,
    items: Vec<Diagnostic>,
}

impl<'t> Diagnostics<'t> {
    /// Create an empty sink for diagnostics about `text`.
    pub fn new(text: &'t str) -> Self {
        Self {
            text,
            items: Vec::new(),
        }
    }

    /// The text diagnostics refer to.
    pub fn text(&self) -> &'t str {
        self.text
    }

    /// Record an error over `range`.
    pub fn error(&mut self, range: Range<usize>, message: impl Into<String>) {
        self.push(Severity::Error, range, message.into());
    }

    /// Record a warning over `range`.
    pub fn warn(&mut self, range: Range<usize>, message: impl Into<String>) {
        self.push(Severity::Warn, range, message.into());
    }

    /// Number of diagnostics recorded so far.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Recorded diagnostics in emission order.
    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.items
    }

    /// Consume the sink and return the diagnostics in emission order.
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }

    fn push(&mut self, severity: Severity, range: Range<usize>, message: String) {
        let end = floor_char_boundary(self.text, range.end.min(self.text.len()));
        let start = floor_char_boundary(self.text, range.start.min(end));
        self.items.push(Diagnostic {
            severity,
            start,
            end,
            message,
        });
    }
}

fn floor_char_boundary(text: &str, mut offset: usize) -> usize {
    while offset > 0 && !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_wire_strings() {
        assert_eq!(Severity::Error.as_str(), "error");
        assert_eq!(Severity::Warn.as_str(), "warn");
        assert_eq!(serde_json::to_string(&Severity::Warn).unwrap(), "\"warn\"");
    }

    #[test]
    fn sink_preserves_emission_order() {
        let mut sink = Diagnostics::new("abcdef");
        sink.warn(4..5, "second in text");
        sink.error(0..1, "first in text");
        let items = sink.into_vec();
        assert_eq!(items[0].message, "second in text");
        assert_eq!(items[1].message, "first in text");
    }

    #[test]
    fn sink_clamps_ranges_to_text() {
        let mut sink = Diagnostics::new("abc");
        sink.error(2..40, "too long");
        sink.error(10..12, "past the end");
        sink.error(2..1, "reversed");
        let items = sink.into_vec();
        assert_eq!(items[0].range(), 2..3);
        assert_eq!(items[1].range(), 3..3);
        assert_eq!(items[2].range(), 1..1);
    }

    #[test]
    fn sink_keeps_char_boundaries() {
        // 'é' is two bytes.
        let mut sink = Diagnostics::new("aéb");
        sink.warn(2..3, "inside a character");
        let d = &sink.as_slice()[0];
        assert_eq!(d.range(), 1..3);
    }

    #[test]
    fn wire_conversion_uses_utf16_units() {
        let text = "😀 x";
        let index = LineIndex::new(text);
        let d = Diagnostic {
            severity: Severity::Error,
            start: 5,
            end: 6,
            message: "x".to_string(),
        };
        let wire = d.to_wire(&index);
        assert_eq!(wire.start, 3);
        assert_eq!(wire.end, 4);
        let json = serde_json::to_value(&wire).unwrap();
        assert_eq!(json["severity"], "error");
        assert_eq!(json["start"], 3);
    }

    #[test]
    fn display_includes_severity_and_range() {
        let d = Diagnostic {
            severity: Severity::Warn,
            start: 1,
            end: 4,
            message: "check this".to_string(),
        };
        assert_eq!(d.to_string(), "[warn] 1..4: check this");
        assert!(!d.is_error());
    }
}
