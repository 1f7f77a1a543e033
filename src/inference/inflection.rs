//! Singular/plural forms of table names.
//!
//! Regular words go through the `inflector` crate. Irregular nouns that show
//! up as table names are looked up first, since the crate gets several of
//! them wrong in one direction or the other.

use inflector::Inflector;

/// (singular, plural) pairs checked before falling back to `inflector`.
static IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("child", "children"),
    ("man", "men"),
    ("woman", "women"),
    ("mouse", "mice"),
    ("goose", "geese"),
    ("leaf", "leaves"),
    ("life", "lives"),
    ("wife", "wives"),
    ("half", "halves"),
    ("hero", "heroes"),
    ("analysis", "analyses"),
    ("basis", "bases"),
    ("crisis", "crises"),
    ("thesis", "theses"),
    ("criterion", "criteria"),
    ("datum", "data"),
    ("medium", "media"),
    ("index", "indices"),
    ("matrix", "matrices"),
    ("vertex", "vertices"),
];

fn irregular(word: &str) -> Option<(&'static str, &'static str)> {
    let lower = word.to_lowercase();
    IRREGULAR
        .iter()
        .find(|(singular, plural)| lower == *singular || lower == *plural)
        .copied()
}

/// Plural form of `word`. Already plural words are returned as is.
pub fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }
    match irregular(word) {
        Some((_, plural)) => plural.to_string(),
        None => word.to_plural(),
    }
}

/// Singular form of `word`. Already singular words are returned as is.
pub fn singularize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }
    match irregular(word) {
        Some((singular, _)) => singular.to_string(),
        None => word.to_singular(),
    }
}
