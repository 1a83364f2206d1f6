//! # Contributors
//!
//! Each contributor line reads
//!
//! ```text
//! Name, [email, ]Country (role[, role]*)
//! ```
//!
//! e.g. `Jane Doe, jane@example.org, Switzerland (author, graphics)`.
//!
//! Roles come from a closed vocabulary, except translations which are
//! written `translation from <language> into <language>`. Author countries
//! and graphics contributors are collected into the [`RunState`] for the
//! id and support-file cross-checks.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use serde_yaml::Value;
use taskcheck_core::Diagnostics;

use super::{describe, did_you_mean, part_range, quoted_list, FieldContext, RunState};

static CONTRIBUTOR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<name>[^,()]+?), (?:(?P<email>[^\s,()]+@[^\s,()]+), )?(?P<country>[^,()]+?) \((?P<roles>[^()]+)\)$",
    )
    .expect("contributor pattern is valid")
});

static TRANSLATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^translation from (?P<from>.+?) into (?P<into>.+)$")
        .expect("translation pattern is valid")
});

/// Expected contributor line, quoted in messages.
pub const CONTRIBUTOR_FORMAT: &str = "Name, [email, ]Country (role[, role]*)";

/// Role that makes a contributor count as an author from their country.
pub const AUTHOR_ROLE: &str = "author";
/// Role that must be credited in the support files.
pub const GRAPHICS_ROLE: &str = "graphics";
/// Prefix of translation roles.
pub const TRANSLATION_PREFIX: &str = "translation";

/// Roles other than translations.
pub const ROLES: [&str; 6] = [
    "author",
    "contributor",
    "editor",
    "graphics",
    "inspiration",
    "reviewer",
];

/// A contributor line split into its parts. Ranges are byte ranges within
/// `raw_line`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedContributor {
    pub name: String,
    pub email: Option<String>,
    pub country: String,
    pub roles: Vec<String>,
    pub raw_line: String,
    pub email_range: Option<Range<usize>>,
    pub country_range: Range<usize>,
    pub role_ranges: Vec<Range<usize>>,
}

/// Split a contributor line, or `None` if it does not follow
/// [`CONTRIBUTOR_FORMAT`].
pub fn parse_contributor(line: &str) -> Option<ParsedContributor> {
    let caps = CONTRIBUTOR_PATTERN.captures(line)?;
    let country = caps.name("country")?;
    let roles = caps.name("roles")?;

    let mut role_names = Vec::new();
    let mut role_ranges = Vec::new();
    let mut cursor = roles.start();
    for raw in roles.as_str().split(',') {
        let trimmed = raw.trim();
        let start = cursor + (raw.len() - raw.trim_start().len());
        role_names.push(trimmed.to_string());
        role_ranges.push(start..start + trimmed.len());
        cursor += raw.len() + 1;
    }

    Some(ParsedContributor {
        name: caps["name"].trim().to_string(),
        email: caps.name("email").map(|m| m.as_str().to_string()),
        country: country.as_str().to_string(),
        roles: role_names,
        raw_line: line.to_string(),
        email_range: caps.name("email").map(|m| m.range()),
        country_range: country.range(),
        role_ranges,
    })
}

/// Source and target language of a translation role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub from: String,
    pub into: String,
    pub from_range: Range<usize>,
    pub into_range: Range<usize>,
}

/// Split `translation from X into Y`.
pub fn parse_translation(role: &str) -> Option<Translation> {
    let caps = TRANSLATION_PATTERN.captures(role)?;
    let from = caps.name("from")?;
    let into = caps.name("into")?;
    Some(Translation {
        from: from.as_str().to_string(),
        into: into.as_str().to_string(),
        from_range: from.range(),
        into_range: into.range(),
    })
}

pub(crate) fn check_contributors(
    ctx: &FieldContext<'_>,
    diags: &mut Diagnostics<'_>,
    state: &mut RunState,
    value: &Value,
) {
    let Value::Sequence(items) = value else {
        diags.error(
            ctx.value("contributors"),
            format!("'contributors' must be a list, found {}", describe(value)),
        );
        return;
    };

    for (index, item) in items.iter().enumerate() {
        let item_range = ctx.item("contributors", index);
        let Value::String(line) = item else {
            diags.error(
                item_range,
                format!(
                    "each contributor must be a line of the form '{CONTRIBUTOR_FORMAT}', found {}",
                    describe(item)
                ),
            );
            continue;
        };
        let Some(contributor) = parse_contributor(line) else {
            diags.warn(
                item_range,
                format!("contributor lines must have the form '{CONTRIBUTOR_FORMAT}'"),
            );
            continue;
        };
        let text = diags.text();
        let locate = |part: &Range<usize>| part_range(text, &item_range, line, part.clone());

        if let (Some(email), Some(range)) = (&contributor.email, &contributor.email_range) {
            if *email != email.to_lowercase() {
                let range = locate(range);
                diags.warn(
                    range,
                    format!(
                        "email addresses must be written in lowercase: '{}'",
                        email.to_lowercase()
                    ),
                );
            }
        }

        if state.seen_countries.insert(contributor.country.clone())
            && !ctx.dictionary.is_country(&contributor.country)
        {
            let suggestions = ctx
                .dictionary
                .suggest_countries(&contributor.country, ctx.max_suggestions);
            let range = locate(&contributor.country_range);
            diags.warn(
                range,
                format!(
                    "'{}' is not among the country names we know; this may just be missing from our list, but please check the spelling.{}",
                    contributor.country,
                    did_you_mean(&suggestions)
                ),
            );
        }

        for (role, role_range) in contributor.roles.iter().zip(&contributor.role_ranges) {
            let role_range = locate(role_range);
            check_role(ctx, diags, state, &contributor, role, role_range);
        }
    }

    if let Some(country) = &state.main_country {
        if !state.author_countries.contains(country) {
            diags.warn(
                ctx.key("contributors"),
                format!(
                    "no contributor with the '{AUTHOR_ROLE}' role is from {country}, the country of the task id"
                ),
            );
        }
    }
}

fn check_role(
    ctx: &FieldContext<'_>,
    diags: &mut Diagnostics<'_>,
    state: &mut RunState,
    contributor: &ParsedContributor,
    role: &str,
    range: Range<usize>,
) {
    if role == AUTHOR_ROLE {
        state.author_countries.push(contributor.country.clone());
    } else if role == GRAPHICS_ROLE {
        state.graphics_names.insert(contributor.name.clone());
    } else if role.starts_with(TRANSLATION_PREFIX) {
        let Some(translation) = parse_translation(role) else {
            diags.warn(
                range,
                "translation roles must have the form 'translation from <language> into <language>'",
            );
            return;
        };
        for (language, part) in [
            (&translation.from, &translation.from_range),
            (&translation.into, &translation.into_range),
        ] {
            if !ctx.dictionary.is_language(language) {
                let suggestions = ctx.dictionary.suggest_languages(language, ctx.max_suggestions);
                let language_range = part_range(diags.text(), &range, role, part.clone());
                diags.warn(
                    language_range,
                    format!(
                        "'{language}' is not among the language names we know; this may just be missing from our list, but please check the spelling.{}",
                        did_you_mean(&suggestions)
                    ),
                );
            }
        }
    } else if !ROLES.contains(&role) {
        diags.warn(
            range,
            format!(
                "unknown role '{role}'; expected one of {} or 'translation from <language> into <language>'",
                quoted_list(&ROLES)
            ),
        );
    }
}
