//! User-authored annotations merged into a schema.
//!
//! An annotation document can rename the schema, declare relations the
//! database does not know about, and override comments and labels on
//! tables, columns, indexes, constraints and triggers.
//!
//! ```toml
//! name = "mydatabase"
//!
//! [[relations]]
//! table = "posts"
//! columns = ["user_id"]
//! parent_table = "users"
//! parent_columns = ["id"]
//!
//! [[comments]]
//! table = "posts"
//! table_comment = "Blog posts"
//! column_comments = { title = "post title" }
//! column_labels = { title = ["content", "searchable"] }
//! ```
//!
//! Comment and label targets that are not in the schema are skipped, since
//! the schema may already have been filtered. Declared relations must
//! resolve completely.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::schema::{Cardinality, Relation, Schema, SchemaError};

/// Definition text attached to declared relations without one.
pub const ADDITIONAL_RELATION_DEF: &str = "Additional Relation";

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum AnnotationError {
    #[error("relation references unknown table '{0}'")]
    UnresolvedTable(String),

    #[error("relation references unknown column '{table}.{column}'")]
    UnresolvedColumn { table: String, column: String },

    #[error("invalid cardinality '{token}' on relation from '{table}'")]
    InvalidCardinality { table: String, token: String },

    #[error("invalid relation from '{table}': {source}")]
    InvalidRelation {
        table: String,
        #[source]
        source: SchemaError,
    },
}

pub type AnnotationResult<T> = Result<T, AnnotationError>;

// ============================================================================
// Document
// ============================================================================

/// An annotation document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotations {
    /// New schema name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub relations: Vec<AnnotatedRelation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<AnnotatedTable>,
}

impl Annotations {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.relations.is_empty() && self.comments.is_empty()
    }
}

/// A relation declared by hand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedRelation {
    pub table: String,
    pub columns: Vec<String>,
    pub parent_table: String,
    pub parent_columns: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub def: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cardinality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_cardinality: Option<String>,
}

/// Comment and label overrides for one table and its children, keyed by
/// entity name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotatedTable {
    pub table: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_comment: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub column_comments: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub column_labels: BTreeMap<String, Vec<String>>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub index_comments: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub constraint_comments: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub trigger_comments: BTreeMap<String, String>,
}

// ============================================================================
// Merge
// ============================================================================

fn resolve_columns(schema: &Schema, table: usize, names: &[String]) -> AnnotationResult<Vec<usize>> {
    let t = &schema.tables()[table];
    names
        .iter()
        .map(|name| {
            t.column_position(name)
                .ok_or_else(|| AnnotationError::UnresolvedColumn {
                    table: t.name.clone(),
                    column: name.clone(),
                })
        })
        .collect()
}

fn parse_cardinality(table: &str, token: Option<&str>) -> AnnotationResult<Cardinality> {
    let token = token.unwrap_or_default();
    Cardinality::parse(token).map_err(|_| AnnotationError::InvalidCardinality {
        table: table.to_string(),
        token: token.to_string(),
    })
}

/// Resolve a declared relation against the schema.
pub fn resolve_relation(schema: &Schema, declared: &AnnotatedRelation) -> AnnotationResult<Relation> {
    let table = schema
        .table_position(&declared.table)
        .ok_or_else(|| AnnotationError::UnresolvedTable(declared.table.clone()))?;
    let parent_table = schema
        .table_position(&declared.parent_table)
        .ok_or_else(|| AnnotationError::UnresolvedTable(declared.parent_table.clone()))?;

    let columns = resolve_columns(schema, table, &declared.columns)?;
    let parent_columns = resolve_columns(schema, parent_table, &declared.parent_columns)?;

    let cardinality = parse_cardinality(&declared.table, declared.cardinality.as_deref())?;
    let parent_cardinality =
        parse_cardinality(&declared.table, declared.parent_cardinality.as_deref())?;

    let def = declared
        .def
        .clone()
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| ADDITIONAL_RELATION_DEF.to_string());

    Ok(Relation::new(table, columns, parent_table, parent_columns)
        .with_def(def)
        .with_cardinality(cardinality, parent_cardinality)
        .with_virtual(false))
}

fn merge_table_comments(schema: &mut Schema, annotated: &AnnotatedTable) {
    let Ok(table) = schema.find_table_mut(&annotated.table) else {
        debug!(table = %annotated.table, "annotated table not in schema");
        return;
    };

    if let Some(comment) = &annotated.table_comment {
        table.comment = comment.clone();
    }
    table.labels.merge(&annotated.labels);

    for (name, comment) in &annotated.column_comments {
        match table.find_column_mut(name) {
            Ok(column) => column.comment = comment.clone(),
            Err(e) => debug!(error = %e, "skipping column comment"),
        }
    }
    for (name, labels) in &annotated.column_labels {
        match table.find_column_mut(name) {
            Ok(column) => column.labels.merge(labels),
            Err(e) => debug!(error = %e, "skipping column labels"),
        }
    }
    for (name, comment) in &annotated.index_comments {
        match table.find_index_mut(name) {
            Ok(index) => index.comment = comment.clone(),
            Err(e) => debug!(error = %e, "skipping index comment"),
        }
    }
    for (name, comment) in &annotated.constraint_comments {
        match table.find_constraint_mut(name) {
            Ok(constraint) => constraint.comment = comment.clone(),
            Err(e) => debug!(error = %e, "skipping constraint comment"),
        }
    }
    for (name, comment) in &annotated.trigger_comments {
        match table.find_trigger_mut(name) {
            Ok(trigger) => trigger.comment = comment.clone(),
            Err(e) => debug!(error = %e, "skipping trigger comment"),
        }
    }
}

/// Merge annotations into the schema in place.
///
/// Every declared relation is resolved before anything is changed, so an
/// unresolved relation leaves the schema untouched.
pub fn merge_annotations(schema: &mut Schema, annotations: &Annotations) -> AnnotationResult<()> {
    let relations = annotations
        .relations
        .iter()
        .map(|declared| resolve_relation(schema, declared))
        .collect::<AnnotationResult<Vec<_>>>()?;

    // Validate the whole batch before the first append.
    for (declared, relation) in annotations.relations.iter().zip(&relations) {
        if relation.columns.len() != relation.parent_columns.len() || relation.columns.is_empty() {
            return Err(AnnotationError::InvalidRelation {
                table: declared.table.clone(),
                source: SchemaError::InvalidRelation(format!(
                    "{} -> {}: {} columns but {} parent columns",
                    declared.table,
                    declared.parent_table,
                    relation.columns.len(),
                    relation.parent_columns.len()
                )),
            });
        }
    }

    let added = relations.len();
    for (declared, relation) in annotations.relations.iter().zip(relations) {
        schema
            .add_relation(relation)
            .map_err(|source| AnnotationError::InvalidRelation {
                table: declared.table.clone(),
                source,
            })?;
    }

    for annotated in &annotations.comments {
        merge_table_comments(schema, annotated);
    }

    if let Some(name) = &annotations.name {
        schema.name = name.clone();
    }

    info!(
        relations = added,
        tables = annotations.comments.len(),
        "merged annotations"
    );
    Ok(())
}
