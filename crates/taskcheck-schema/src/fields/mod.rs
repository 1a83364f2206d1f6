//! # Field Validators
//!
//! One module per logical metadata field. Each validator reports into the
//! shared [`Diagnostics`](taskcheck_core::Diagnostics) sink and never
//! stops its siblings. A value of the wrong shape (or an unrecognized
//! difficulty token in `ages`) ends the checks of that field only.
//!
//! Cross-field information (the main country resolved from the id, author
//! countries, graphics contributors) travels through an explicit
//! [`RunState`] owned by one validation run.

pub mod ages;
pub mod contributors;
pub mod enums;
pub mod id;
pub mod keywords;
pub mod support_files;
pub mod title;

use std::collections::{BTreeSet, HashSet};
use std::ops::Range;

use serde_yaml::Value;
use taskcheck_core::NameDictionary;

use crate::locate::{FieldLocator, FieldSpan};

/// Per-run state shared between field validators.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunState {
    /// Country resolved from the country code of the task id.
    pub main_country: Option<String>,
    /// Countries of contributors with the `author` role, in order.
    pub author_countries: Vec<String>,
    /// Names of contributors with the `graphics` role.
    pub graphics_names: BTreeSet<String>,
    /// Country names already checked in this run.
    pub seen_countries: HashSet<String>,
}

/// Read-only inputs of the field validators.
pub(crate) struct FieldContext<'a> {
    pub dictionary: &'a dyn NameDictionary,
    pub max_suggestions: usize,
    pub locator: &'a FieldLocator,
    pub filename: &'a str,
    /// Range used when a field could not be located.
    pub anchor: Range<usize>,
}

impl FieldContext<'_> {
    pub fn span(&self, field: &str) -> Option<&FieldSpan> {
        self.locator.get(field)
    }

    /// Range of the key of `field`.
    pub fn key(&self, field: &str) -> Range<usize> {
        self.locator.key_or(field, self.anchor.clone())
    }

    /// Range of the inline value of `field`, else its key.
    pub fn value(&self, field: &str) -> Range<usize> {
        self.span(field)
            .map_or_else(|| self.anchor.clone(), FieldSpan::value_or_key)
    }

    /// Range of list item `index` of `field`.
    pub fn item(&self, field: &str, index: usize) -> Range<usize> {
        self.span(field)
            .map_or_else(|| self.anchor.clone(), |span| span.item(index))
    }
}

/// Map `part`, a byte range of the parsed string `value`, to a source
/// range. This is only exact when the source text at `whole` is the value
/// verbatim (no escapes or folding); otherwise the whole range is used.
pub(crate) fn part_range(
    text: &str,
    whole: &Range<usize>,
    value: &str,
    part: Range<usize>,
) -> Range<usize> {
    if text.get(whole.clone()) == Some(value) {
        whole.start + part.start..whole.start + part.end
    } else {
        whole.clone()
    }
}

/// Short description of a YAML value's type for messages.
pub(crate) fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "nothing",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// Trailing " Did you mean …?" clause, empty without suggestions.
pub(crate) fn did_you_mean(suggestions: &[String]) -> String {
    match suggestions {
        [] => String::new(),
        [one] => format!(" Did you mean '{one}'?"),
        many => format!(
            " Did you mean one of: {}?",
            many.iter()
                .map(|s| format!("'{s}'"))
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

/// Quote and join a closed list of allowed values.
pub(crate) fn quoted_list(values: &[&str]) -> String {
    values
        .iter()
        .map(|v| format!("'{v}'"))
        .collect::<Vec<_>>()
        .join(", ")
}
