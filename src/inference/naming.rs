//! Naming strategies: the conventions that map a foreign-key column name to
//! the table and column it probably references.
//!
//! | strategy               | `user_id` resolves to | `users` child column |
//! |------------------------|-----------------------|----------------------|
//! | `default`              | `users.id`            | `user_id`            |
//! | `singular_table_name`  | `user.id`             | `user_id`            |
//! | `prefixed_primary_key` | `users.user_id`       | `user_id`            |

use super::inflection::{pluralize, singularize};

/// Suffix marking a column as a reference to another table.
pub const KEY_SUFFIX: &str = "_id";

/// Primary key column name used by the `default` and `singular_table_name`
/// strategies.
pub const PRIMARY_KEY: &str = "id";

/// Errors raised when selecting a strategy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NamingError {
    #[error("unknown naming strategy '{0}' (expected one of: {names})", names = Strategy::NAMES.join(", "))]
    UnknownStrategy(String),
}

pub type NamingResult<T> = Result<T, NamingError>;

/// A naming convention.
pub trait NamingStrategy: std::fmt::Debug {
    /// Identifier used to select the strategy in configuration.
    fn name(&self) -> &'static str;

    /// Table a column probably references, or `None` if the column does not
    /// look like a reference at all.
    fn parent_table_name(&self, column: &str) -> Option<String>;

    /// Key column of `parent_table` that references point at.
    fn parent_column_name(&self, parent_table: &str) -> String;

    /// Column name a child table would use to reference `parent_table`.
    fn child_column_name(&self, parent_table: &str) -> String {
        format!("{}{}", singularize(parent_table), KEY_SUFFIX)
    }
}

fn key_stem(column: &str) -> Option<&str> {
    column
        .strip_suffix(KEY_SUFFIX)
        .filter(|stem| !stem.is_empty())
}

/// `user_id` → `users.id`
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultNaming;

impl NamingStrategy for DefaultNaming {
    fn name(&self) -> &'static str {
        "default"
    }

    fn parent_table_name(&self, column: &str) -> Option<String> {
        key_stem(column).map(pluralize)
    }

    fn parent_column_name(&self, _parent_table: &str) -> String {
        PRIMARY_KEY.to_string()
    }
}

/// `user_id` → `user.id`
#[derive(Debug, Clone, Copy, Default)]
pub struct SingularTableName;

impl NamingStrategy for SingularTableName {
    fn name(&self) -> &'static str {
        "singular_table_name"
    }

    fn parent_table_name(&self, column: &str) -> Option<String> {
        key_stem(column).map(singularize)
    }

    fn parent_column_name(&self, _parent_table: &str) -> String {
        PRIMARY_KEY.to_string()
    }
}

/// `user_id` → `users.user_id`
#[derive(Debug, Clone, Copy, Default)]
pub struct PrefixedPrimaryKey;

impl NamingStrategy for PrefixedPrimaryKey {
    fn name(&self) -> &'static str {
        "prefixed_primary_key"
    }

    fn parent_table_name(&self, column: &str) -> Option<String> {
        key_stem(column).map(pluralize)
    }

    fn parent_column_name(&self, parent_table: &str) -> String {
        self.child_column_name(parent_table)
    }
}

/// Built-in strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    #[default]
    Default,
    SingularTableName,
    PrefixedPrimaryKey,
}

impl Strategy {
    pub const NAMES: [&'static str; 3] = ["default", "singular_table_name", "prefixed_primary_key"];

    /// Get the strategy implementation.
    pub fn strategy(&self) -> &'static dyn NamingStrategy {
        match self {
            Strategy::Default => &DefaultNaming,
            Strategy::SingularTableName => &SingularTableName,
            Strategy::PrefixedPrimaryKey => &PrefixedPrimaryKey,
        }
    }
}

impl std::str::FromStr for Strategy {
    type Err = NamingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Strategy::Default),
            "singular_table_name" => Ok(Strategy::SingularTableName),
            "prefixed_primary_key" => Ok(Strategy::PrefixedPrimaryKey),
            other => Err(NamingError::UnknownStrategy(other.to_string())),
        }
    }
}

/// Look up a strategy by its configuration name.
pub fn select_naming_strategy(name: &str) -> NamingResult<&'static dyn NamingStrategy> {
    Ok(name.parse::<Strategy>()?.strategy())
}
