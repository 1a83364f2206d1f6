//! Task identifier: `YYYY-CC-NN[variant]`, e.g. `2024-CH-07` or
//! `2024-CH-07b`, where `CC` is an ISO 3166-1 alpha-2 country code.
//!
//! The id is cross-checked against the file name, which must start with
//! the id and may continue with `-` and a 3-letter language code
//! (`2024-CH-07-eng`).

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use serde_yaml::Value;
use taskcheck_core::Diagnostics;

use super::{describe, part_range, FieldContext, RunState};

static ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<year>[0-9]{4})-(?P<country>[A-Z]{2})-(?P<number>[0-9]{2})(?P<variant>[a-z])?$")
        .expect("task id pattern is valid")
});

static LANGUAGE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-(?P<code>[a-z]{3})$").expect("language suffix pattern is valid"));

/// Expected id format, quoted in messages.
pub const ID_FORMAT: &str = "YYYY-CC-NN[variant]";

/// Decomposed task identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskId {
    pub year: u16,
    pub country_code: String,
    pub number: u8,
    pub variant: Option<char>,
    /// Byte range of the country code within the id.
    pub country_range: Range<usize>,
}

/// Parse `s` as a task id.
pub fn parse_task_id(s: &str) -> Option<TaskId> {
    let caps = ID_PATTERN.captures(s)?;
    let country = caps.name("country")?;
    Some(TaskId {
        year: caps["year"].parse().ok()?,
        country_code: country.as_str().to_string(),
        number: caps["number"].parse().ok()?,
        variant: caps.name("variant").and_then(|m| m.as_str().chars().next()),
        country_range: country.range(),
    })
}

pub(crate) fn check_id(
    ctx: &FieldContext<'_>,
    diags: &mut Diagnostics<'_>,
    state: &mut RunState,
    value: &Value,
) {
    let range = ctx.value("id");
    let Value::String(id) = value else {
        diags.error(
            range,
            format!(
                "the task id must be a string of the form {ID_FORMAT}, found {}",
                describe(value)
            ),
        );
        return;
    };

    let Some(task_id) = parse_task_id(id) else {
        diags.error(
            range,
            format!("invalid task id '{id}'; expected the format {ID_FORMAT}, e.g. 2024-CH-07 or 2024-CH-07b"),
        );
        return;
    };

    check_filename(ctx, diags, id, &range);

    match ctx.dictionary.country_by_code(&task_id.country_code) {
        Some(country) => state.main_country = Some(country.to_string()),
        None => {
            let code = part_range(diags.text(), &range, id, task_id.country_range.clone());
            diags.warn(
                code.end..code.end,
                format!(
                    "unknown country code '{}' in the task id",
                    task_id.country_code
                ),
            );
        }
    }
}

fn check_filename(ctx: &FieldContext<'_>, diags: &mut Diagnostics<'_>, id: &str, range: &Range<usize>) {
    let Some(suffix) = ctx.filename.strip_prefix(id) else {
        diags.error(
            range.clone(),
            format!(
                "the file name '{}' must start with the task id '{id}'",
                ctx.filename
            ),
        );
        return;
    };
    if suffix.is_empty() {
        return;
    }
    let known = LANGUAGE_SUFFIX
        .captures(suffix)
        .and_then(|caps| caps.name("code"))
        .and_then(|code| ctx.dictionary.language_by_code(code.as_str()))
        .is_some();
    if !known {
        diags.error(
            range.clone(),
            format!(
                "the file name '{}' continues after the task id with '{suffix}'; only a dash and a known 3-letter language code may follow, e.g. '{id}-eng'",
                ctx.filename
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ids() {
        let id = parse_task_id("2024-CH-07").unwrap();
        assert_eq!(id.year, 2024);
        assert_eq!(id.country_code, "CH");
        assert_eq!(id.number, 7);
        assert_eq!(id.variant, None);
        assert_eq!(id.country_range, 5..7);
        assert_eq!(parse_task_id("2024-CH-07b").unwrap().variant, Some('b'));
    }

    #[test]
    fn rejects_malformed_ids() {
        for bad in ["2024-ch-07", "24-CH-07", "2024-CH-7", "2024-CH-07B", "2024-CH-07bb", " 2024-CH-07"] {
            assert!(parse_task_id(bad).is_none(), "{bad}");
        }
    }
}
