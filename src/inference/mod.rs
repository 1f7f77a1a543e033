//! Virtual relation inference from column naming conventions.
//!
//! For every column, the active [`NamingStrategy`] proposes a parent table and
//! a parent column. When both exist and no relation already connects that
//! exact column pair, a virtual relation is added. Misses are skipped; the
//! pass never fails.

pub mod inflection;
pub mod naming;

use tracing::{debug, info};

use crate::schema::{Relation, Schema};

pub use naming::{
    select_naming_strategy, DefaultNaming, NamingError, NamingResult, NamingStrategy,
    PrefixedPrimaryKey, SingularTableName, Strategy,
};

/// Definition text attached to inferred relations.
pub const DETECTED_RELATION_DEF: &str = "Detected Relation";

/// A reference proposed by a strategy, as positions into the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Candidate {
    table: usize,
    column: usize,
    parent_table: usize,
    parent_column: usize,
}

fn candidates(schema: &Schema, strategy: &dyn NamingStrategy) -> Vec<Candidate> {
    let mut out = Vec::new();

    for (table, t) in schema.tables().iter().enumerate() {
        for (column, c) in t.columns().iter().enumerate() {
            let Some(parent_name) = strategy.parent_table_name(&c.name) else {
                continue;
            };
            let Some(parent_table) = schema.table_position(&parent_name) else {
                debug!(table = %t.name, column = %c.name, parent = %parent_name, "no such parent table");
                continue;
            };
            let parent_column_name = strategy.parent_column_name(&parent_name);
            let Some(parent_column) = schema.tables()[parent_table].column_position(&parent_column_name)
            else {
                debug!(
                    table = %t.name,
                    column = %c.name,
                    parent = %parent_name,
                    parent_column = %parent_column_name,
                    "no such parent column"
                );
                continue;
            };

            if table == parent_table && column == parent_column {
                continue;
            }
            out.push(Candidate {
                table,
                column,
                parent_table,
                parent_column,
            });
        }
    }

    out
}

/// Add a virtual relation for every column the strategy can resolve.
///
/// Returns the number of relations added. Running it twice adds nothing the
/// second time.
pub fn infer_relations(schema: &mut Schema, strategy: &dyn NamingStrategy) -> usize {
    let mut added = 0;

    for candidate in candidates(schema, strategy) {
        if schema.has_relation_pair(
            candidate.table,
            candidate.column,
            candidate.parent_table,
            candidate.parent_column,
        ) {
            continue;
        }

        let relation = Relation::new(
            candidate.table,
            vec![candidate.column],
            candidate.parent_table,
            vec![candidate.parent_column],
        )
        .with_def(DETECTED_RELATION_DEF)
        .with_virtual(true);

        // Candidates come from the schema itself, so positions are in range.
        if let Err(e) = schema.add_relation(relation) {
            debug!(error = %e, "skipping inferred relation");
            continue;
        }
        added += 1;
    }

    info!(strategy = strategy.name(), added, "inferred relations");
    added
}
