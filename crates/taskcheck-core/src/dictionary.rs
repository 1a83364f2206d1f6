//! # Name Dictionaries
//!
//! Recognized country and language names, lookup by code, and "did you
//! mean" suggestions ranked by edit distance.
//!
//! The validation engine only sees the [`NameDictionary`] trait so the
//! tables can be swapped, extended from configuration, or replaced by a
//! deterministic stub in tests. [`BuiltinDictionary`] is the default,
//! backed by the tables in [`crate::names`].
//!
//! All lookups are read-only.

use std::collections::BTreeMap;

use crate::names::{COUNTRIES, LANGUAGES};

/// Read-only source of recognized country and language names.
pub trait NameDictionary {
    /// English name of the country with ISO 3166-1 alpha-2 `code`.
    fn country_by_code(&self, code: &str) -> Option<&str>;

    /// Whether `name` is a recognized country name (exact match).
    fn is_country(&self, name: &str) -> bool;

    /// English name of the language with ISO 639-3 `code`.
    fn language_by_code(&self, code: &str) -> Option<&str>;

    /// Whether `name` is a recognized language name (exact match).
    fn is_language(&self, name: &str) -> bool;

    /// Up to `limit` country names closest to `name`, best first.
    fn suggest_countries(&self, name: &str, limit: usize) -> Vec<String>;

    /// Up to `limit` language names closest to `name`, best first.
    fn suggest_languages(&self, name: &str, limit: usize) -> Vec<String>;
}

/// Dictionary backed by the built-in tables, optionally extended with
/// additional accepted names.
#[derive(Debug, Clone)]
pub struct BuiltinDictionary {
    countries_by_code: BTreeMap<&'static str, &'static str>,
    languages_by_code: BTreeMap<&'static str, &'static str>,
    country_names: Vec<String>,
    language_names: Vec<String>,
}

impl Default for BuiltinDictionary {
    fn default() -> Self {
        Self::new()
    }
}

impl BuiltinDictionary {
    /// Dictionary over the built-in tables only.
    pub fn new() -> Self {
        Self {
            countries_by_code: COUNTRIES.iter().copied().collect(),
            languages_by_code: LANGUAGES.iter().copied().collect(),
            country_names: COUNTRIES.iter().map(|(_, n)| n.to_string()).collect(),
            language_names: LANGUAGES.iter().map(|(_, n)| n.to_string()).collect(),
        }
    }

    /// Accept additional country names. They have no code.
    pub fn with_extra_countries<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend_unique(&mut self.country_names, names);
        self
    }

    /// Accept additional language names. They have no code.
    pub fn with_extra_languages<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        extend_unique(&mut self.language_names, names);
        self
    }

    /// Number of recognized country names.
    pub fn country_count(&self) -> usize {
        self.country_names.len()
    }

    /// Number of recognized language names.
    pub fn language_count(&self) -> usize {
        self.language_names.len()
    }
}

impl NameDictionary for BuiltinDictionary {
    fn country_by_code(&self, code: &str) -> Option<&str> {
        self.countries_by_code.get(code).copied()
    }

    fn is_country(&self, name: &str) -> bool {
        self.country_names.iter().any(|n| n == name)
    }

    fn language_by_code(&self, code: &str) -> Option<&str> {
        self.languages_by_code.get(code).copied()
    }

    fn is_language(&self, name: &str) -> bool {
        self.language_names.iter().any(|n| n == name)
    }

    fn suggest_countries(&self, name: &str, limit: usize) -> Vec<String> {
        suggest(name, &self.country_names, limit)
    }

    fn suggest_languages(&self, name: &str, limit: usize) -> Vec<String> {
        suggest(name, &self.language_names, limit)
    }
}

fn extend_unique<I, S>(names: &mut Vec<String>, extra: I)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    for name in extra {
        let name = name.into();
        if !name.is_empty() && !names.contains(&name) {
            names.push(name);
        }
    }
}

/// Rank `candidates` by case-insensitive edit distance to `name`.
///
/// Candidates further away than a third of the longer string (but at
/// least 2 edits) are dropped. Ties are broken alphabetically so the
/// result is deterministic.
pub fn suggest(name: &str, candidates: &[String], limit: usize) -> Vec<String> {
    let needle = name.to_lowercase();
    let mut ranked: Vec<(usize, &String)> = candidates
        .iter()
        .filter_map(|candidate| {
            let distance = edit_distance(&needle, &candidate.to_lowercase());
            let longest = needle.chars().count().max(candidate.chars().count());
            let bound = (longest / 3).max(2);
            (distance <= bound).then_some((distance, candidate))
        })
        .collect();
    ranked.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));
    ranked
        .into_iter()
        .take(limit)
        .map(|(_, candidate)| candidate.clone())
        .collect()
}

/// Levenshtein distance over Unicode scalar values.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            current[j + 1] = substitution
                .min(previous[j + 1] + 1)
                .min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_distance_basics() {
        assert_eq!(edit_distance("", ""), 0);
        assert_eq!(edit_distance("abc", ""), 3);
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("flaw", "lawn"), 2);
        assert_eq!(edit_distance("é", "e"), 1);
    }

    #[test]
    fn codes_resolve_to_names() {
        let dict = BuiltinDictionary::new();
        assert_eq!(dict.country_by_code("CH"), Some("Switzerland"));
        assert_eq!(dict.country_by_code("ZZ"), None);
        assert_eq!(dict.language_by_code("eng"), Some("English"));
        assert_eq!(dict.language_by_code("xxx"), None);
    }

    #[test]
    fn exact_name_recognition() {
        let dict = BuiltinDictionary::new();
        assert!(dict.is_country("Switzerland"));
        assert!(!dict.is_country("switzerland"));
        assert!(dict.is_language("German"));
        assert!(!dict.is_language("Klingon"));
    }

    #[test]
    fn suggestions_are_ranked_by_distance() {
        let dict = BuiltinDictionary::new();
        let s = dict.suggest_countries("Swizerland", 3);
        assert_eq!(s.first().map(String::as_str), Some("Switzerland"));
        let s = dict.suggest_languages("Frensh", 3);
        assert_eq!(s.first().map(String::as_str), Some("French"));
    }

    #[test]
    fn suggestions_respect_limit_and_bound() {
        let dict = BuiltinDictionary::new();
        assert!(dict.suggest_countries("Switzerland", 0).is_empty());
        assert!(dict.suggest_countries("Qwxyzvbnmkjhg", 3).is_empty());
        assert!(dict.suggest_countries("Austria", 5).len() <= 5);
    }

    #[test]
    fn extra_names_are_accepted() {
        let dict = BuiltinDictionary::new()
            .with_extra_countries(["Atlantis"])
            .with_extra_languages(vec!["Esperanto".to_string()]);
        assert!(dict.is_country("Atlantis"));
        assert!(dict.is_language("Esperanto"));
        assert_eq!(dict.country_count(), COUNTRIES.len() + 1);
        assert_eq!(dict.language_count(), LANGUAGES.len() + 1);
    }

    #[test]
    fn extra_names_are_deduplicated() {
        let dict = BuiltinDictionary::new().with_extra_countries(["France", "", "France"]);
        assert_eq!(dict.country_count(), COUNTRIES.len());
    }

    #[test]
    fn tables_are_sorted_and_codes_well_formed() {
        assert!(COUNTRIES.windows(2).all(|w| w[0].0 < w[1].0));
        assert!(LANGUAGES.windows(2).all(|w| w[0].0 < w[1].0));
        assert!(COUNTRIES
            .iter()
            .all(|(code, _)| code.len() == 2 && code.chars().all(|c| c.is_ascii_uppercase())));
        assert!(LANGUAGES
            .iter()
            .all(|(code, _)| code.len() == 3 && code.chars().all(|c| c.is_ascii_lowercase())));
    }
}
