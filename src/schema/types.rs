//! Schema entities and the arena that owns them.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{Cardinality, Label, Labels, SchemaError, SchemaResult};

// ============================================================================
// Schema
// ============================================================================

/// A database schema: the arena owning every table and relation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    pub name: String,
    tables: Vec<Table>,
    relations: Vec<Relation>,
}

impl Schema {
    /// Create an empty schema.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tables: Vec::new(),
            relations: Vec::new(),
        }
    }

    /// Create a schema from tables, validating name uniqueness.
    pub fn with_tables(name: impl Into<String>, tables: Vec<Table>) -> SchemaResult<Self> {
        let mut schema = Self::new(name);
        for table in tables {
            schema.add_table(table)?;
        }
        Ok(schema)
    }

    /// Append a table. Any back-references it carries are discarded.
    pub fn add_table(&mut self, mut table: Table) -> SchemaResult<usize> {
        if self.table_position(&table.name).is_some() {
            return Err(SchemaError::DuplicateTable(table.name));
        }
        let mut seen = HashSet::new();
        for column in &table.columns {
            if !seen.insert(column.name.as_str()) {
                return Err(SchemaError::DuplicateColumn {
                    table: table.name.clone(),
                    column: column.name.clone(),
                });
            }
        }

        table.clear_derived();
        self.tables.push(table);
        Ok(self.tables.len() - 1)
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    pub fn table(&self, position: usize) -> Option<&Table> {
        self.tables.get(position)
    }

    pub fn table_position(&self, name: &str) -> Option<usize> {
        self.tables.iter().position(|t| t.name == name)
    }

    pub fn find_table(&self, name: &str) -> SchemaResult<&Table> {
        self.tables
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| SchemaError::TableNotFound(name.to_string()))
    }

    /// Not public: assigning through the reference would strand relations.
    pub(crate) fn find_table_mut(&mut self, name: &str) -> SchemaResult<&mut Table> {
        self.tables
            .iter_mut()
            .find(|t| t.name == name)
            .ok_or_else(|| SchemaError::TableNotFound(name.to_string()))
    }

    /// The child-side table of a relation owned by this schema.
    pub fn relation_table(&self, relation: &Relation) -> &Table {
        &self.tables[relation.table]
    }

    /// The parent-side table of a relation owned by this schema.
    pub fn relation_parent_table(&self, relation: &Relation) -> &Table {
        &self.tables[relation.parent_table]
    }

    /// Child-side columns of a relation, in order.
    pub fn relation_columns<'a>(&'a self, relation: &'a Relation) -> impl Iterator<Item = &'a Column> {
        let table = &self.tables[relation.table];
        relation.columns.iter().map(move |&c| &table.columns[c])
    }

    /// Parent-side columns of a relation, in order.
    pub fn relation_parent_columns<'a>(
        &'a self,
        relation: &'a Relation,
    ) -> impl Iterator<Item = &'a Column> {
        let table = &self.tables[relation.parent_table];
        relation.parent_columns.iter().map(move |&c| &table.columns[c])
    }

    /// Tables a table has relations to or from.
    pub fn referenced_tables<'a>(&'a self, table: &'a Table) -> impl Iterator<Item = &'a Table> {
        table.referenced_tables.iter().map(move |&t| &self.tables[t])
    }

    /// True if some relation already links `column` of `table` to
    /// `parent_column` of `parent_table` at the same position.
    pub fn has_relation_pair(
        &self,
        table: usize,
        column: usize,
        parent_table: usize,
        parent_column: usize,
    ) -> bool {
        self.relations.iter().any(|r| {
            r.table == table
                && r.parent_table == parent_table
                && r.columns
                    .iter()
                    .zip(&r.parent_columns)
                    .any(|(&c, &pc)| c == column && pc == parent_column)
        })
    }

    /// Append a relation and register it on both endpoints.
    pub fn add_relation(&mut self, relation: Relation) -> SchemaResult<usize> {
        self.validate_relation(&relation)?;

        let position = self.relations.len();
        for &c in &relation.columns {
            self.tables[relation.table].columns[c]
                .parent_relations
                .push(position);
        }
        for &c in &relation.parent_columns {
            self.tables[relation.parent_table].columns[c]
                .child_relations
                .push(position);
        }
        self.link_tables(relation.table, relation.parent_table);
        self.relations.push(relation);

        Ok(position)
    }

    fn validate_relation(&self, relation: &Relation) -> SchemaResult<()> {
        let table = self.tables.get(relation.table).ok_or_else(|| {
            SchemaError::InvalidRelation(format!("no table at position {}", relation.table))
        })?;
        let parent = self.tables.get(relation.parent_table).ok_or_else(|| {
            SchemaError::InvalidRelation(format!("no table at position {}", relation.parent_table))
        })?;

        if relation.columns.len() != relation.parent_columns.len() {
            return Err(SchemaError::InvalidRelation(format!(
                "{} -> {}: {} columns but {} parent columns",
                table.name,
                parent.name,
                relation.columns.len(),
                relation.parent_columns.len()
            )));
        }
        if let Some(c) = relation.columns.iter().find(|&&c| c >= table.columns.len()) {
            return Err(SchemaError::InvalidRelation(format!(
                "{} has no column at position {}",
                table.name, c
            )));
        }
        if let Some(c) = relation
            .parent_columns
            .iter()
            .find(|&&c| c >= parent.columns.len())
        {
            return Err(SchemaError::InvalidRelation(format!(
                "{} has no column at position {}",
                parent.name, c
            )));
        }
        Ok(())
    }

    fn link_tables(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        insert_sorted(&mut self.tables[a].referenced_tables, b);
        insert_sorted(&mut self.tables[b].referenced_tables, a);
    }

    /// Keep only the tables at `keep` positions. Relations with an endpoint
    /// outside the kept set are dropped; all positions are remapped.
    pub fn retain_tables(&mut self, keep: &HashSet<usize>) {
        let order: Vec<usize> = (0..self.tables.len()).filter(|i| keep.contains(i)).collect();
        self.rearrange(order);
    }

    /// Sort tables by name. Relations keep their relative order.
    pub fn sort(&mut self) {
        let mut order: Vec<usize> = (0..self.tables.len()).collect();
        order.sort_by(|&a, &b| self.tables[a].name.cmp(&self.tables[b].name));
        self.rearrange(order);
    }

    /// Rebuild the table sequence from `order` (old positions, new order),
    /// dropping tables not listed, then remap relations and reindex.
    fn rearrange(&mut self, order: Vec<usize>) {
        let mut remap: Vec<Option<usize>> = vec![None; self.tables.len()];
        for (new, &old) in order.iter().enumerate() {
            remap[old] = Some(new);
        }

        let mut slots: Vec<Option<Table>> = std::mem::take(&mut self.tables)
            .into_iter()
            .map(Some)
            .collect();
        self.tables = order.iter().filter_map(|&old| slots[old].take()).collect();

        let relations = std::mem::take(&mut self.relations);
        self.relations = relations
            .into_iter()
            .filter_map(|mut r| {
                r.table = remap[r.table]?;
                r.parent_table = remap[r.parent_table]?;
                Some(r)
            })
            .collect();

        self.reindex();
    }

    /// Recompute every column's back-references and every table's
    /// referenced tables from `relations`.
    pub fn reindex(&mut self) {
        for table in &mut self.tables {
            table.clear_derived();
        }

        for position in 0..self.relations.len() {
            let (table, parent_table) = {
                let r = &self.relations[position];
                (r.table, r.parent_table)
            };
            for i in 0..self.relations[position].columns.len() {
                let c = self.relations[position].columns[i];
                self.tables[table].columns[c].parent_relations.push(position);
            }
            for i in 0..self.relations[position].parent_columns.len() {
                let c = self.relations[position].parent_columns[i];
                self.tables[parent_table].columns[c]
                    .child_relations
                    .push(position);
            }
            self.link_tables(table, parent_table);
        }
    }
}

fn insert_sorted(values: &mut Vec<usize>, value: usize) {
    if let Err(at) = values.binary_search(&value) {
        values.insert(at, value);
    }
}

// ============================================================================
// Table
// ============================================================================

/// A table or view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub name: String,
    /// Table type as reported by the database (`BASE TABLE`, `VIEW`, ...).
    pub table_type: String,
    pub comment: String,
    columns: Vec<Column>,
    pub indexes: Vec<Index>,
    pub constraints: Vec<Constraint>,
    pub triggers: Vec<Trigger>,
    /// Raw source definition.
    pub def: String,
    pub labels: Labels,
    referenced_tables: Vec<usize>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_type(mut self, table_type: impl Into<String>) -> Self {
        self.table_type = table_type.into();
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn with_def(mut self, def: impl Into<String>) -> Self {
        self.def = def.into();
        self
    }

    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    pub fn with_index(mut self, index: Index) -> Self {
        self.indexes.push(index);
        self
    }

    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn with_trigger(mut self, trigger: Trigger) -> Self {
        self.triggers.push(trigger);
        self
    }

    pub fn with_label(mut self, label: Label) -> Self {
        self.labels.insert(label);
        self
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Positions (into `Schema::tables`) of tables related to this one.
    pub fn referenced_tables(&self) -> &[usize] {
        &self.referenced_tables
    }

    pub fn column_position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn find_column(&self, name: &str) -> SchemaResult<&Column> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| SchemaError::ColumnNotFound {
                table: self.name.clone(),
                column: name.to_string(),
            })
    }

    pub(crate) fn find_column_mut(&mut self, name: &str) -> SchemaResult<&mut Column> {
        let table = &self.name;
        self.columns
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| SchemaError::ColumnNotFound {
                table: table.clone(),
                column: name.to_string(),
            })
    }

    pub fn find_index(&self, name: &str) -> SchemaResult<&Index> {
        self.indexes
            .iter()
            .find(|i| i.name == name)
            .ok_or_else(|| SchemaError::IndexNotFound {
                table: self.name.clone(),
                index: name.to_string(),
            })
    }

    pub fn find_index_mut(&mut self, name: &str) -> SchemaResult<&mut Index> {
        let table = &self.name;
        self.indexes
            .iter_mut()
            .find(|i| i.name == name)
            .ok_or_else(|| SchemaError::IndexNotFound {
                table: table.clone(),
                index: name.to_string(),
            })
    }

    pub fn find_constraint(&self, name: &str) -> SchemaResult<&Constraint> {
        self.constraints
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| SchemaError::ConstraintNotFound {
                table: self.name.clone(),
                constraint: name.to_string(),
            })
    }

    pub fn find_constraint_mut(&mut self, name: &str) -> SchemaResult<&mut Constraint> {
        let table = &self.name;
        self.constraints
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| SchemaError::ConstraintNotFound {
                table: table.clone(),
                constraint: name.to_string(),
            })
    }

    pub fn find_trigger(&self, name: &str) -> SchemaResult<&Trigger> {
        self.triggers
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| SchemaError::TriggerNotFound {
                table: self.name.clone(),
                trigger: name.to_string(),
            })
    }

    pub fn find_trigger_mut(&mut self, name: &str) -> SchemaResult<&mut Trigger> {
        let table = &self.name;
        self.triggers
            .iter_mut()
            .find(|t| t.name == name)
            .ok_or_else(|| SchemaError::TriggerNotFound {
                table: table.clone(),
                trigger: name.to_string(),
            })
    }

    fn clear_derived(&mut self) {
        self.referenced_tables.clear();
        for column in &mut self.columns {
            column.parent_relations.clear();
            column.child_relations.clear();
        }
    }
}

// ============================================================================
// Column
// ============================================================================

/// A table column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Column {
    pub name: String,
    pub column_type: String,
    pub nullable: bool,
    /// `None` means no default; `Some("")` is an empty-string default.
    pub default: Option<String>,
    pub comment: String,
    pub extra_def: String,
    pub labels: Labels,
    parent_relations: Vec<usize>,
    child_relations: Vec<usize>,
}

impl Column {
    pub fn new(name: impl Into<String>, column_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type: column_type.into(),
            ..Self::default()
        }
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    pub fn with_extra_def(mut self, extra_def: impl Into<String>) -> Self {
        self.extra_def = extra_def.into();
        self
    }

    pub fn with_label(mut self, label: Label) -> Self {
        self.labels.insert(label);
        self
    }

    /// Relations (positions into `Schema::relations`) where this column is
    /// on the child side.
    pub fn parent_relations(&self) -> &[usize] {
        &self.parent_relations
    }

    /// Relations where this column is on the parent side.
    pub fn child_relations(&self) -> &[usize] {
        &self.child_relations
    }
}

// ============================================================================
// Relation
// ============================================================================

/// A foreign-key style link between columns of two tables.
#[derive(Debug, Clone, PartialEq)]
pub struct Relation {
    /// Child (owning) table position.
    pub table: usize,
    /// Child column positions within `table`.
    pub columns: Vec<usize>,
    pub cardinality: Cardinality,
    /// Parent (referenced) table position.
    pub parent_table: usize,
    /// Parent column positions within `parent_table`.
    pub parent_columns: Vec<usize>,
    pub parent_cardinality: Cardinality,
    pub def: String,
    /// True if synthesized by naming-convention inference.
    pub is_virtual: bool,
}

impl Relation {
    pub fn new(
        table: usize,
        columns: Vec<usize>,
        parent_table: usize,
        parent_columns: Vec<usize>,
    ) -> Self {
        Self {
            table,
            columns,
            cardinality: Cardinality::Unknown,
            parent_table,
            parent_columns,
            parent_cardinality: Cardinality::Unknown,
            def: String::new(),
            is_virtual: false,
        }
    }

    pub fn with_def(mut self, def: impl Into<String>) -> Self {
        self.def = def.into();
        self
    }

    pub fn with_cardinality(mut self, child: Cardinality, parent: Cardinality) -> Self {
        self.cardinality = child;
        self.parent_cardinality = parent;
        self
    }

    pub fn with_virtual(mut self, is_virtual: bool) -> Self {
        self.is_virtual = is_virtual;
        self
    }
}

// ============================================================================
// Index / Constraint / Trigger
// ============================================================================

/// A table index. Definition fields are driver-specific.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Index {
    pub name: String,
    #[serde(default)]
    pub def: String,
    #[serde(default)]
    pub table: String,
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment: String,
}

impl Index {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A table constraint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    pub name: String,
    #[serde(rename = "type", default)]
    pub constraint_type: String,
    #[serde(default)]
    pub def: String,
    #[serde(default)]
    pub table: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub referenced_table: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub referenced_columns: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment: String,
}

impl Constraint {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A table trigger.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trigger {
    pub name: String,
    #[serde(default)]
    pub def: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment: String,
}

impl Trigger {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}
