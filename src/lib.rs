//! # schemadoc
//!
//! Schema filtering, relation inference and annotation merging for database
//! documentation.
//!
//! ## Architecture
//!
//! A schema snapshot is decoded, repaired into an arena-backed graph, and
//! reshaped by the configuration before it is written back out:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                 Snapshot (JSON wire form)                │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [codec: decode + repair]
//! ┌─────────────────────────────────────────────────────────┐
//! │        Schema (tables, columns, relations arena)         │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [annotation]
//! ┌─────────────────────────────────────────────────────────┐
//! │   Declared relations, comments, labels, schema rename    │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [inference]
//! ┌─────────────────────────────────────────────────────────┐
//! │     Virtual relations from column naming conventions     │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [filter]
//! ┌─────────────────────────────────────────────────────────┐
//! │   Include/exclude patterns, labels, distance expansion   │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [codec: encode]
//! ┌─────────────────────────────────────────────────────────┐
//! │                 Snapshot (JSON wire form)                │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod annotation;
pub mod config;
pub mod filter;
pub mod inference;
pub mod modify;
pub mod schema;
pub mod snapshot;

/// Version of the running library, checked against `required_version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::annotation::{merge_annotations, Annotations};
    pub use crate::config::Config;
    pub use crate::filter::{filter_tables, TableFilter};
    pub use crate::inference::{infer_relations, select_naming_strategy, NamingStrategy};
    pub use crate::modify::{modify_schema, ModifySummary};
    pub use crate::schema::{
        Cardinality, Column, Label, Labels, Relation, Schema, SchemaError, Table,
    };
}

pub use modify::{modify_schema, ModifyError};
pub use schema::Schema;
