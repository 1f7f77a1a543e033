//! Table filter: include/exclude patterns, label selection and distance
//! expansion.
//!
//! # Selection
//!
//! Each table is classified before any expansion:
//!
//! | include match | exclude match            | label match | decision   |
//! |---------------|--------------------------|-------------|------------|
//! | yes           | no, or a shorter pattern | -           | seed       |
//! | yes           | a longer pattern         | -           | excluded   |
//! | no            | yes                      | -           | excluded   |
//! | no            | no                       | yes         | seed       |
//! | no            | no                       | no          | seed if no include patterns and no labels are configured, else unselected |
//!
//! Tables rejected by an exclude pattern are removed from the relation graph.
//! Seeds are then expanded by `distance` hops; unselected tables can be
//! pulled back in by expansion, excluded ones cannot.

pub mod graph;
pub mod pattern;

use std::collections::HashSet;

use tracing::{debug, info};

use crate::schema::Schema;
use graph::RelationGraph;
use pattern::PatternSet;

/// Errors that can occur while filtering.
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    #[error("invalid table pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

pub type FilterResult<T> = Result<T, FilterError>;

/// How a table was classified by the patterns and labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Selected directly; expansion starts here.
    Seed,
    /// Rejected by an exclude pattern; never kept.
    Excluded,
    /// Neither; kept only if reached by expansion.
    Unselected,
}

/// Tables that survive a filter. A relation survives when both of its
/// endpoints do.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPlan {
    pub tables: HashSet<usize>,
}

/// Filter settings.
#[derive(Debug, Clone, Default)]
pub struct TableFilter {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub labels: Vec<String>,
    pub distance: usize,
}

impl TableFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include<S: Into<String>>(mut self, patterns: impl IntoIterator<Item = S>) -> Self {
        self.include = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub fn exclude<S: Into<String>>(mut self, patterns: impl IntoIterator<Item = S>) -> Self {
        self.exclude = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub fn labels<S: Into<String>>(mut self, labels: impl IntoIterator<Item = S>) -> Self {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn distance(mut self, distance: usize) -> Self {
        self.distance = distance;
        self
    }

    /// Classify every table, in schema order.
    pub fn classify(&self, schema: &Schema) -> FilterResult<Vec<Selection>> {
        let include = PatternSet::compile(&self.include)?;
        let exclude = PatternSet::compile(&self.exclude)?;

        let selections = schema
            .tables()
            .iter()
            .map(|table| {
                let included = include.longest_match(&table.name);
                let excluded = exclude.longest_match(&table.name);
                let labeled =
                    !self.labels.is_empty() && pattern::has_any_label(table, &self.labels);

                match (included, excluded) {
                    (Some(li), Some(le)) if li < le => Selection::Excluded,
                    (Some(_), _) => Selection::Seed,
                    (None, Some(_)) => Selection::Excluded,
                    (None, None) if labeled => Selection::Seed,
                    (None, None) if include.is_empty() && self.labels.is_empty() => {
                        Selection::Seed
                    }
                    (None, None) => Selection::Unselected,
                }
            })
            .collect();

        Ok(selections)
    }

    /// Compute the surviving tables without touching the schema.
    pub fn plan(&self, schema: &Schema) -> FilterResult<FilterPlan> {
        let selections = self.classify(schema)?;

        let mut seeds = HashSet::new();
        let mut excluded = HashSet::new();
        for (position, selection) in selections.iter().enumerate() {
            match selection {
                Selection::Seed => {
                    seeds.insert(position);
                }
                Selection::Excluded => {
                    debug!(table = %schema.tables()[position].name, "excluded by pattern");
                    excluded.insert(position);
                }
                Selection::Unselected => {}
            }
        }

        let graph = RelationGraph::build_without(schema, &excluded);
        let tables = graph.expand(&seeds, self.distance);

        Ok(FilterPlan { tables })
    }

    /// Prune the schema in place. Back-references and referenced tables of
    /// the surviving tables are rebuilt.
    pub fn apply(&self, schema: &mut Schema) -> FilterResult<()> {
        let before = (schema.tables().len(), schema.relations().len());
        let plan = self.plan(schema)?;
        schema.retain_tables(&plan.tables);

        info!(
            tables = schema.tables().len(),
            relations = schema.relations().len(),
            dropped_tables = before.0 - schema.tables().len(),
            dropped_relations = before.1 - schema.relations().len(),
            "filtered tables"
        );
        Ok(())
    }
}

/// Filter `schema` in place by include/exclude patterns, labels and distance.
pub fn filter_tables<S: AsRef<str>>(
    schema: &mut Schema,
    include: &[S],
    exclude: &[S],
    labels: &[S],
    distance: usize,
) -> FilterResult<()> {
    TableFilter::new()
        .include(include.iter().map(|s| s.as_ref().to_string()))
        .exclude(exclude.iter().map(|s| s.as_ref().to_string()))
        .labels(labels.iter().map(|s| s.as_ref().to_string()))
        .distance(distance)
        .apply(schema)
}
