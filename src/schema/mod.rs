//! Schema graph model.
//!
//! The schema is an arena: [`Schema`] owns every [`Table`] and [`Relation`],
//! and all cross-references are positions into those sequences.
//!
//! ```text
//! Schema
//!  ├── tables[]          Table ── columns[] ── parent_relations[] ─┐
//!  │                                       └── child_relations[]  ─┤ positions into
//!  └── relations[]  ◄──────────────────────────────────────────────┘ Schema.relations
//!        Relation { table, columns[], parent_table, parent_columns[] }
//!                    └──── positions into Schema.tables / Table.columns
//! ```
//!
//! Back-references are derived state. They can only be changed through
//! [`Schema`] methods, each of which leaves them consistent with
//! `Schema.relations` before returning.

mod cardinality;
pub mod codec;
mod error;
mod label;
mod types;

pub use cardinality::Cardinality;
pub use codec::{
    decode, decode_reader, encode, encode_pretty, CodecError, CodecResult, DecodedSchema,
    RelationStub,
};
pub use error::{SchemaError, SchemaResult};
pub use label::{Label, Labels};
pub use types::{Column, Constraint, Index, Relation, Schema, Table, Trigger};
