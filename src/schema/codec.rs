//! JSON wire format for schema snapshots.
//!
//! Relations are written as table/column *names*, never nested objects, and
//! `referenced_tables` is a list of table names. Decoding is therefore a
//! two-phase affair:
//!
//! ```text
//! JSON ──decode──► DecodedSchema (relations are name stubs)
//!                        │
//!                        ▼ repair
//!                     Schema (relations are positions, back-references built)
//! ```
//!
//! Graph operations take a [`Schema`], so nothing can run on an unrepaired
//! snapshot.

use std::io::Read;

use serde::{Deserialize, Serialize};

use super::{
    Cardinality, Column, Constraint, Index, Labels, Relation, Schema, SchemaError, Table, Trigger,
};

/// Errors that can occur while encoding or decoding a schema.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid cardinality: '{0}'")]
    InvalidCardinality(String),

    #[error("relation references unknown table: {0}")]
    UnresolvedTable(String),

    #[error("relation references unknown column: {table}.{column}")]
    UnresolvedColumn { table: String, column: String },

    #[error("invalid schema: {0}")]
    Schema(#[from] SchemaError),
}

pub type CodecResult<T> = Result<T, CodecError>;

// ============================================================================
// Wire types
// ============================================================================

#[derive(Serialize)]
struct SchemaOut<'a> {
    name: &'a str,
    tables: Vec<TableOut<'a>>,
    relations: Vec<RelationOut<'a>>,
}

#[derive(Serialize)]
struct TableOut<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    table_type: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    comment: &'a str,
    columns: Vec<ColumnOut<'a>>,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    indexes: &'a [Index],
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    constraints: &'a [Constraint],
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    triggers: &'a [Trigger],
    #[serde(skip_serializing_if = "str::is_empty")]
    def: &'a str,
    #[serde(skip_serializing_if = "Labels::is_empty")]
    labels: &'a Labels,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    referenced_tables: Vec<&'a str>,
}

/// Column encoding. A column with a default always carries `comment`, and
/// the field order differs between the two shapes.
#[derive(Serialize)]
#[serde(untagged)]
enum ColumnOut<'a> {
    WithDefault {
        name: &'a str,
        #[serde(rename = "type")]
        column_type: &'a str,
        nullable: bool,
        default: &'a str,
        #[serde(skip_serializing_if = "str::is_empty")]
        extra_def: &'a str,
        #[serde(skip_serializing_if = "Labels::is_empty")]
        labels: &'a Labels,
        comment: &'a str,
    },
    WithoutDefault {
        name: &'a str,
        #[serde(rename = "type")]
        column_type: &'a str,
        nullable: bool,
        #[serde(skip_serializing_if = "str::is_empty")]
        comment: &'a str,
        #[serde(skip_serializing_if = "str::is_empty")]
        extra_def: &'a str,
        #[serde(skip_serializing_if = "Labels::is_empty")]
        labels: &'a Labels,
    },
}

#[derive(Serialize)]
struct RelationOut<'a> {
    table: &'a str,
    columns: Vec<&'a str>,
    #[serde(skip_serializing_if = "str::is_empty")]
    cardinality: &'static str,
    parent_table: &'a str,
    parent_columns: Vec<&'a str>,
    #[serde(skip_serializing_if = "str::is_empty")]
    parent_cardinality: &'static str,
    def: &'a str,
    #[serde(rename = "virtual", skip_serializing_if = "std::ops::Not::not")]
    is_virtual: bool,
}

#[derive(Deserialize)]
struct SchemaIn {
    #[serde(default)]
    name: String,
    #[serde(default)]
    tables: Vec<TableIn>,
    #[serde(default)]
    relations: Vec<RelationIn>,
}

#[derive(Deserialize)]
struct TableIn {
    name: String,
    #[serde(rename = "type", default)]
    table_type: String,
    #[serde(default)]
    comment: String,
    #[serde(default)]
    columns: Vec<ColumnIn>,
    #[serde(default)]
    indexes: Vec<Index>,
    #[serde(default)]
    constraints: Vec<Constraint>,
    #[serde(default)]
    triggers: Vec<Trigger>,
    #[serde(default)]
    def: String,
    #[serde(default)]
    labels: Labels,
    /// Derived on repair; the wire value is informational.
    #[serde(default)]
    #[allow(dead_code)]
    referenced_tables: Vec<String>,
}

#[derive(Deserialize)]
struct ColumnIn {
    name: String,
    #[serde(rename = "type", default)]
    column_type: String,
    #[serde(default)]
    nullable: bool,
    #[serde(default)]
    default: Option<String>,
    #[serde(default)]
    comment: String,
    #[serde(default)]
    extra_def: String,
    #[serde(default)]
    labels: Labels,
}

#[derive(Deserialize)]
struct RelationIn {
    table: String,
    #[serde(default)]
    columns: Vec<String>,
    #[serde(default)]
    cardinality: String,
    parent_table: String,
    #[serde(default)]
    parent_columns: Vec<String>,
    #[serde(default)]
    parent_cardinality: String,
    #[serde(default)]
    def: String,
    #[serde(rename = "virtual", default)]
    is_virtual: bool,
}

// ============================================================================
// Encode
// ============================================================================

fn to_wire(schema: &Schema) -> SchemaOut<'_> {
    let tables = schema
        .tables()
        .iter()
        .map(|t| TableOut {
            name: &t.name,
            table_type: &t.table_type,
            comment: &t.comment,
            columns: t.columns().iter().map(column_to_wire).collect(),
            indexes: &t.indexes,
            constraints: &t.constraints,
            triggers: &t.triggers,
            def: &t.def,
            labels: &t.labels,
            referenced_tables: schema
                .referenced_tables(t)
                .map(|rt| rt.name.as_str())
                .collect(),
        })
        .collect();

    let relations = schema
        .relations()
        .iter()
        .map(|r| RelationOut {
            table: &schema.relation_table(r).name,
            columns: schema.relation_columns(r).map(|c| c.name.as_str()).collect(),
            cardinality: r.cardinality.as_str(),
            parent_table: &schema.relation_parent_table(r).name,
            parent_columns: schema
                .relation_parent_columns(r)
                .map(|c| c.name.as_str())
                .collect(),
            parent_cardinality: r.parent_cardinality.as_str(),
            def: &r.def,
            is_virtual: r.is_virtual,
        })
        .collect();

    SchemaOut {
        name: &schema.name,
        tables,
        relations,
    }
}

fn column_to_wire(c: &Column) -> ColumnOut<'_> {
    match &c.default {
        Some(default) => ColumnOut::WithDefault {
            name: &c.name,
            column_type: &c.column_type,
            nullable: c.nullable,
            default,
            extra_def: &c.extra_def,
            labels: &c.labels,
            comment: &c.comment,
        },
        None => ColumnOut::WithoutDefault {
            name: &c.name,
            column_type: &c.column_type,
            nullable: c.nullable,
            comment: &c.comment,
            extra_def: &c.extra_def,
            labels: &c.labels,
        },
    }
}

/// Encode a schema as compact JSON.
pub fn encode(schema: &Schema) -> CodecResult<String> {
    Ok(serde_json::to_string(&to_wire(schema))?)
}

/// Encode a schema as indented JSON.
pub fn encode_pretty(schema: &Schema) -> CodecResult<String> {
    Ok(serde_json::to_string_pretty(&to_wire(schema))?)
}

// ============================================================================
// Decode + repair
// ============================================================================

/// A relation as decoded: endpoints are names, not yet resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationStub {
    pub table: String,
    pub columns: Vec<String>,
    pub cardinality: Cardinality,
    pub parent_table: String,
    pub parent_columns: Vec<String>,
    pub parent_cardinality: Cardinality,
    pub def: String,
    pub is_virtual: bool,
}

/// A decoded snapshot whose relations still reference tables by name.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedSchema {
    pub name: String,
    pub tables: Vec<Table>,
    pub relations: Vec<RelationStub>,
}

/// Decode a JSON snapshot into a stub graph. Call
/// [`DecodedSchema::repair`] before using it.
pub fn decode(json: &str) -> CodecResult<DecodedSchema> {
    let doc: SchemaIn = serde_json::from_str(json)?;
    from_wire(doc)
}

/// Decode a JSON snapshot from a reader.
pub fn decode_reader<R: Read>(reader: R) -> CodecResult<DecodedSchema> {
    let doc: SchemaIn = serde_json::from_reader(reader)?;
    from_wire(doc)
}

fn from_wire(doc: SchemaIn) -> CodecResult<DecodedSchema> {
    let tables = doc.tables.into_iter().map(table_from_wire).collect();

    let relations = doc
        .relations
        .into_iter()
        .map(|r| {
            Ok(RelationStub {
                table: r.table,
                columns: r.columns,
                cardinality: Cardinality::parse(&r.cardinality)?,
                parent_table: r.parent_table,
                parent_columns: r.parent_columns,
                parent_cardinality: Cardinality::parse(&r.parent_cardinality)?,
                def: r.def,
                is_virtual: r.is_virtual,
            })
        })
        .collect::<CodecResult<Vec<_>>>()?;

    Ok(DecodedSchema {
        name: doc.name,
        tables,
        relations,
    })
}

fn table_from_wire(t: TableIn) -> Table {
    let mut table = Table::new(t.name)
        .with_type(t.table_type)
        .with_comment(t.comment)
        .with_def(t.def);
    table.indexes = t.indexes;
    table.constraints = t.constraints;
    table.triggers = t.triggers;
    table.labels = t.labels;

    for c in t.columns {
        let mut column = Column::new(c.name, c.column_type)
            .nullable(c.nullable)
            .with_comment(c.comment)
            .with_extra_def(c.extra_def);
        column.default = c.default;
        column.labels = c.labels;
        table = table.with_column(column);
    }
    table
}

impl DecodedSchema {
    /// Resolve every relation stub against the decoded tables and build the
    /// back-reference indexes from scratch.
    pub fn repair(self) -> CodecResult<Schema> {
        let mut schema = Schema::with_tables(self.name, self.tables)?;

        for stub in self.relations {
            let table = resolve_table(&schema, &stub.table)?;
            let parent_table = resolve_table(&schema, &stub.parent_table)?;
            let columns = resolve_columns(&schema, table, &stub.columns)?;
            let parent_columns = resolve_columns(&schema, parent_table, &stub.parent_columns)?;

            let relation = Relation::new(table, columns, parent_table, parent_columns)
                .with_cardinality(stub.cardinality, stub.parent_cardinality)
                .with_def(stub.def)
                .with_virtual(stub.is_virtual);
            schema.add_relation(relation)?;
        }

        Ok(schema)
    }
}

fn resolve_table(schema: &Schema, name: &str) -> CodecResult<usize> {
    schema
        .table_position(name)
        .ok_or_else(|| CodecError::UnresolvedTable(name.to_string()))
}

fn resolve_columns(schema: &Schema, table: usize, names: &[String]) -> CodecResult<Vec<usize>> {
    let table = &schema.tables()[table];
    names
        .iter()
        .map(|name| {
            table
                .column_position(name)
                .ok_or_else(|| CodecError::UnresolvedColumn {
                    table: table.name.clone(),
                    column: name.clone(),
                })
        })
        .collect()
}
