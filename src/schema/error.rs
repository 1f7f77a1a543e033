//! Errors raised by schema lookups and structural mutations.

/// Error type for schema operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Column not found: {table}.{column}")]
    ColumnNotFound { table: String, column: String },

    #[error("Index not found: {table}.{index}")]
    IndexNotFound { table: String, index: String },

    #[error("Constraint not found: {table}.{constraint}")]
    ConstraintNotFound { table: String, constraint: String },

    #[error("Trigger not found: {table}.{trigger}")]
    TriggerNotFound { table: String, trigger: String },

    #[error("Duplicate table name: {0}")]
    DuplicateTable(String),

    #[error("Duplicate column name: {table}.{column}")]
    DuplicateColumn { table: String, column: String },

    #[error("Invalid relation: {0}")]
    InvalidRelation(String),
}

pub type SchemaResult<T> = Result<T, SchemaError>;
