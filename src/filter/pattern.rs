//! Glob-style table name patterns and label matching.
//!
//! A pattern is one of:
//! - `*`, which matches every name;
//! - a glob where `*` stands for any run of characters (`user*`, `*_options`);
//! - an exact name.
//!
//! The empty pattern matches nothing, so `[""]` is a configured filter that
//! selects no table while `[]` is no filter at all.

use regex::Regex;

use super::{FilterError, FilterResult};
use crate::schema::Table;

/// The pattern that matches every name.
pub const WILDCARD: &str = "*";

#[derive(Debug, Clone)]
enum Matcher {
    Any,
    Never,
    Exact(String),
    Glob(Regex),
}

/// A compiled name pattern.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    matcher: Matcher,
}

impl Pattern {
    pub fn compile(source: &str) -> FilterResult<Self> {
        let matcher = if source.is_empty() {
            Matcher::Never
        } else if source == WILDCARD {
            Matcher::Any
        } else if source.contains('*') {
            let body = source
                .split('*')
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(".*");
            let regex = Regex::new(&format!("^{}$", body)).map_err(|e| {
                FilterError::InvalidPattern {
                    pattern: source.to_string(),
                    source: e,
                }
            })?;
            Matcher::Glob(regex)
        } else {
            Matcher::Exact(source.to_string())
        };

        Ok(Self {
            source: source.to_string(),
            matcher,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, name: &str) -> bool {
        match &self.matcher {
            Matcher::Any => true,
            Matcher::Never => false,
            Matcher::Exact(exact) => exact == name,
            Matcher::Glob(regex) => regex.is_match(name),
        }
    }

    /// How specific the pattern is; longer patterns win over shorter ones
    /// when include and exclude both match.
    pub fn specificity(&self) -> usize {
        self.source.len()
    }
}

/// An ordered list of compiled patterns.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<Pattern>,
}

impl PatternSet {
    pub fn compile<S: AsRef<str>>(sources: &[S]) -> FilterResult<Self> {
        let patterns = sources
            .iter()
            .map(|s| Pattern::compile(s.as_ref()))
            .collect::<FilterResult<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// True when no pattern is configured.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn matches(&self, name: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(name))
    }

    /// Specificity of the most specific pattern matching `name`.
    pub fn longest_match(&self, name: &str) -> Option<usize> {
        self.patterns
            .iter()
            .filter(|p| p.matches(name))
            .map(Pattern::specificity)
            .max()
    }
}

/// True if `name` matches any of `patterns`.
pub fn matches<S: AsRef<str>>(name: &str, patterns: &[S]) -> FilterResult<bool> {
    Ok(PatternSet::compile(patterns)?.matches(name))
}

/// True if the table carries any of the requested labels.
pub fn has_any_label<S: AsRef<str>>(table: &Table, requested: &[S]) -> bool {
    table.labels.contains_any(requested)
}
