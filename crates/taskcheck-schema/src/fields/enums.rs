//! Closed vocabularies: `answer_type` and `categories`.
//!
//! Unknown answer types are only warnings so that documents written for a
//! newer schema still pass; unknown categories are errors.

use std::collections::HashSet;

use serde_yaml::Value;
use taskcheck_core::Diagnostics;

use super::{describe, quoted_list, FieldContext};

/// Recognized answer types.
pub const ANSWER_TYPES: [&str; 9] = [
    "multiple choice",
    "multiple choice with images",
    "multiple select",
    "dropdown select",
    "open integer",
    "open text",
    "interactive (click-on-object)",
    "interactive (drag-and-drop)",
    "interactive (other)",
];

/// Recognized categories.
pub const CATEGORIES: [&str; 5] = [
    "algorithms and programming",
    "data structures and representations",
    "computer processes and hardware",
    "communication and networking",
    "interactions, systems and society",
];

pub(crate) fn check_answer_type(ctx: &FieldContext<'_>, diags: &mut Diagnostics<'_>, value: &Value) {
    let range = ctx.value("answer_type");
    match value {
        Value::String(answer_type) if ANSWER_TYPES.contains(&answer_type.as_str()) => {}
        Value::String(answer_type) => diags.warn(
            range,
            format!(
                "unknown answer type '{answer_type}'; expected one of {}",
                quoted_list(&ANSWER_TYPES)
            ),
        ),
        other => diags.error(
            range,
            format!("the answer type must be a string, found {}", describe(other)),
        ),
    }
}

pub(crate) fn check_categories(ctx: &FieldContext<'_>, diags: &mut Diagnostics<'_>, value: &Value) {
    let Value::Sequence(items) = value else {
        diags.error(
            ctx.value("categories"),
            format!("'categories' must be a list, found {}", describe(value)),
        );
        return;
    };

    let mut names = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let range = ctx.item("categories", index);
        match item {
            Value::String(category) => {
                if !CATEGORIES.contains(&category.as_str()) {
                    diags.error(
                        range,
                        format!(
                            "unknown category '{category}'; expected one of {}",
                            quoted_list(&CATEGORIES)
                        ),
                    );
                }
                names.push(category.as_str());
            }
            other => diags.error(
                range,
                format!("each category must be a string, found {}", describe(other)),
            ),
        }
    }

    let distinct: HashSet<&str> = names.iter().copied().collect();
    if distinct.len() != names.len() {
        diags.warn(ctx.key("categories"), "the list of categories contains duplicates");
    }
}
