//! Terminology dictionary used when rendering documents.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Term substitutions, e.g. `Indexes = "INDEX"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dict(BTreeMap<String, String>);

impl Dict {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translation of `term`, or `term` itself when none is configured.
    pub fn lookup<'a>(&'a self, term: &'a str) -> &'a str {
        self.0.get(term).map(String::as_str).unwrap_or(term)
    }

    pub fn insert(&mut self, term: impl Into<String>, translation: impl Into<String>) {
        self.0.insert(term.into(), translation.into());
    }
}
