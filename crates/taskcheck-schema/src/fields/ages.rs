//! # Age/Difficulty Ladder
//!
//! `ages` maps six fixed age bands to a difficulty token:
//!
//! ```yaml
//! ages:
//!   6yo-8yo: --
//!   8yo-10yo: hard
//!   10yo-12yo: medium
//!   12yo-14yo: ---
//!   14yo-16yo: --
//!   16yo-19yo: --
//! ```
//!
//! ## Invariant
//!
//! Read in increasing age order, a task never gets harder: each defined
//! level is at most the previous defined level. A band left out (`--`)
//! between two defined bands is a hole that must be marked intentional
//! with `---`.

use serde_yaml::Value;
use taskcheck_core::Diagnostics;

use super::{describe, quoted_list, FieldContext};

/// Age bands in increasing age order.
pub const AGE_BANDS: [&str; 6] = [
    "6yo-8yo",
    "8yo-10yo",
    "10yo-12yo",
    "12yo-14yo",
    "14yo-16yo",
    "16yo-19yo",
];

/// Difficulty of a task for one age band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    /// `--`: the task is not meant for this band.
    NotApplicable,
    /// `---`: not meant for this band, and the hole is intentional.
    IntentionalGap,
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// All tokens, in ordinal order.
    pub const ALL: [Difficulty; 5] = [
        Self::NotApplicable,
        Self::IntentionalGap,
        Self::Easy,
        Self::Medium,
        Self::Hard,
    ];

    /// Parse a difficulty token.
    pub fn parse(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == token)
    }

    /// The token as written in documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotApplicable => "--",
            Self::IntentionalGap => "---",
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    /// 0 for both not-applicable tokens, then 1 to 3.
    pub fn ordinal(&self) -> u8 {
        match self {
            Self::NotApplicable | Self::IntentionalGap => 0,
            Self::Easy => 1,
            Self::Medium => 2,
            Self::Hard => 3,
        }
    }

    /// Whether the task is assigned to the band.
    pub fn is_defined(&self) -> bool {
        self.ordinal() > 0
    }
}

pub(crate) fn check_ages(ctx: &FieldContext<'_>, diags: &mut Diagnostics<'_>, value: &Value) {
    let Value::Mapping(map) = value else {
        diags.error(
            ctx.value("ages"),
            format!(
                "'ages' must map each age group ({}) to a difficulty, found {}",
                AGE_BANDS.join(", "),
                describe(value)
            ),
        );
        return;
    };
    let span = ctx.span("ages");
    let band_range = |band: &str| {
        span.and_then(|s| s.entry(band))
            .map_or_else(|| ctx.key("ages"), |e| e.line())
    };

    for key in map.keys() {
        let name = key.as_str().unwrap_or_default();
        if !AGE_BANDS.contains(&name) {
            let range = span
                .and_then(|s| s.entry(name))
                .map_or_else(|| ctx.key("ages"), |e| e.key_range.clone());
            diags.warn(
                range,
                format!(
                    "unknown age group '{}'; the age groups are: {}",
                    key.as_str().map_or_else(|| describe(key).to_string(), str::to_string),
                    AGE_BANDS.join(", ")
                ),
            );
        }
    }

    let missing: Vec<&str> = AGE_BANDS
        .iter()
        .copied()
        .filter(|band| map.get(*band).is_none())
        .collect();
    if !missing.is_empty() {
        diags.error(
            ctx.key("ages"),
            format!(
                "missing age group{}: {}; use '--' for groups the task is not meant for",
                if missing.len() == 1 { "" } else { "s" },
                missing.join(", ")
            ),
        );
        return;
    }

    let mut last_level: Option<Difficulty> = None;
    // First `--` band after a defined one, while no defined band followed.
    let mut hole: Option<&str> = None;
    let mut defined = 0usize;

    for band in AGE_BANDS {
        let token = map.get(band).and_then(Value::as_str);
        let Some(level) = token.and_then(Difficulty::parse) else {
            let found = map
                .get(band)
                .map_or_else(String::new, |v| match v.as_str() {
                    Some(s) => format!("'{s}'"),
                    None => describe(v).to_string(),
                });
            diags.error(
                band_range(band),
                format!(
                    "unrecognized difficulty {found} for {band}; use one of {}",
                    quoted_list(&Difficulty::ALL.map(|d| d.as_str()))
                ),
            );
            return;
        };

        if level.is_defined() {
            if last_level.is_some_and(|last| level.ordinal() > last.ordinal()) {
                diags.error(
                    band_range(band),
                    format!(
                        "inconsistent difficulty for {band}: a task must not be harder for an older group than for a previous group"
                    ),
                );
            }
            if let Some(gap) = hole.take() {
                diags.error(
                    band_range(gap),
                    format!(
                        "{gap} is left out between two assigned age groups; mark the gap as intentional with '---'"
                    ),
                );
            }
            last_level = Some(level);
            defined += 1;
        } else if level == Difficulty::NotApplicable && defined > 0 && hole.is_none() {
            hole = Some(band);
        }
    }

    if defined == 0 {
        diags.warn(ctx.key("ages"), "no age groups assigned");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_round_trip() {
        for d in Difficulty::ALL {
            assert_eq!(Difficulty::parse(d.as_str()), Some(d));
        }
        assert_eq!(Difficulty::parse("Easy"), None);
        assert_eq!(Difficulty::parse("-"), None);
    }

    #[test]
    fn ordinals() {
        assert_eq!(Difficulty::NotApplicable.ordinal(), 0);
        assert_eq!(Difficulty::IntentionalGap.ordinal(), 0);
        assert!(Difficulty::Hard.ordinal() > Difficulty::Medium.ordinal());
        assert!(!Difficulty::IntentionalGap.is_defined());
        assert!(Difficulty::Easy.is_defined());
    }
}
