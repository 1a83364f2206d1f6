//! Task title: a non-empty string.

use serde_yaml::Value;
use taskcheck_core::Diagnostics;

use super::{describe, FieldContext};

pub(crate) fn check_title(ctx: &FieldContext<'_>, diags: &mut Diagnostics<'_>, value: &Value) {
    match value {
        Value::String(title) if title.trim().is_empty() => {
            diags.error(ctx.value("title"), "the title must not be empty");
        }
        Value::String(_) => {}
        other => diags.error(
            ctx.value("title"),
            format!("the title must be a string, found {}", describe(other)),
        ),
    }
}
