//! Property tests over arbitrary and generated documents.

use proptest::prelude::*;
use taskcheck_schema::{validate, Difficulty, AGE_BANDS, REQUIRED_SECTIONS};

fn ladder_document(levels: &[Difficulty]) -> String {
    let ages: String = AGE_BANDS
        .iter()
        .zip(levels)
        .map(|(band, level)| format!("  {band}: {}\n", level.as_str()))
        .collect();
    let body: String = REQUIRED_SECTIONS.iter().map(|h| format!("{h}\n")).collect();
    format!(
        "---\n\
id: 2024-CH-07\n\
title: Ladder\n\
ages:\n{ages}\
answer_type: open text\n\
categories:\n  - algorithms and programming\n\
contributors:\n  - Jane Doe, Switzerland (author)\n\
support_files:\n  - 'x.png from https://example.org'\n\
---\n{body}"
    )
}

fn difficulty() -> impl Strategy<Value = Difficulty> {
    prop::sample::select(Difficulty::ALL.to_vec())
}

proptest! {
    #[test]
    fn ranges_stay_inside_the_text(text in "(---\n)?[a-z_:\\- \n\\[\\]é€]{0,80}(\n---\n)?") {
        for d in validate(&text, "2024-CH-07") {
            prop_assert!(d.start <= d.end && d.end <= text.len());
            prop_assert!(text.is_char_boundary(d.start));
            prop_assert!(text.is_char_boundary(d.end));
        }
    }

    #[test]
    fn validation_is_deterministic(text in "---\n[a-z_: \n-]{0,60}\n---\n[#a-zA-Z \n/]{0,60}") {
        prop_assert_eq!(validate(&text, "f"), validate(&text, "f"));
    }

    #[test]
    fn non_increasing_ladders_are_consistent(levels in prop::collection::vec(difficulty(), 6)) {
        let diags = validate(&ladder_document(&levels), "2024-CH-07");
        let defined: Vec<u8> = levels
            .iter()
            .filter(|l| l.is_defined())
            .map(Difficulty::ordinal)
            .collect();
        let non_increasing = defined.windows(2).all(|w| w[1] <= w[0]);
        let inconsistent = diags
            .iter()
            .any(|d| d.message.starts_with("inconsistent difficulty"));
        prop_assert_eq!(inconsistent, !non_increasing);
    }

    #[test]
    fn holes_need_the_intentional_marker(levels in prop::collection::vec(difficulty(), 6)) {
        let diags = validate(&ladder_document(&levels), "2024-CH-07");
        let gaps = diags.iter().filter(|d| d.message.contains("left out")).count();
        let assigned: Vec<usize> = (0..levels.len()).filter(|&i| levels[i].is_defined()).collect();
        let expected = assigned
            .windows(2)
            .filter(|w| levels[w[0] + 1..w[1]].contains(&Difficulty::NotApplicable))
            .count();
        prop_assert_eq!(gaps, expected);
    }
}
