//! Relation multiplicity on each side of a relation.

use std::fmt;
use std::str::FromStr;

use super::codec::CodecError;

/// Cardinality of one side of a relation.
///
/// The wire form is a canonical snake_case token; [`Cardinality::Unknown`]
/// is the empty string and is omitted when encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cardinality {
    /// At most one row (`zero_or_one`).
    ZeroOrOne,
    /// Exactly one row (`exactly_one`).
    ExactlyOne,
    /// Any number of rows (`zero_or_more`).
    ZeroOrMore,
    /// At least one row (`one_or_more`).
    OneOrMore,
    /// Not known.
    #[default]
    Unknown,
}

impl Cardinality {
    /// Canonical wire token.
    pub fn as_str(&self) -> &'static str {
        match self {
            Cardinality::ZeroOrOne => "zero_or_one",
            Cardinality::ExactlyOne => "exactly_one",
            Cardinality::ZeroOrMore => "zero_or_more",
            Cardinality::OneOrMore => "one_or_more",
            Cardinality::Unknown => "",
        }
    }

    /// Parse a token, accepting `"Zero or more"` and `"zero-or-more"` as
    /// spellings of `zero_or_more`.
    pub fn parse(token: &str) -> Result<Self, CodecError> {
        let normalized: String = token
            .trim()
            .chars()
            .map(|c| match c {
                ' ' | '-' => '_',
                c => c.to_ascii_lowercase(),
            })
            .collect();

        match normalized.as_str() {
            "" => Ok(Cardinality::Unknown),
            "zero_or_one" => Ok(Cardinality::ZeroOrOne),
            "exactly_one" => Ok(Cardinality::ExactlyOne),
            "zero_or_more" => Ok(Cardinality::ZeroOrMore),
            "one_or_more" => Ok(Cardinality::OneOrMore),
            _ => Err(CodecError::InvalidCardinality(token.to_string())),
        }
    }
}

impl FromStr for Cardinality {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Cardinality::parse(s)
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
