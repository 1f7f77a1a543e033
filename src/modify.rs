//! The schema modification pipeline.
//!
//! ```text
//! Schema → Version check → Annotations → Inference → Filter → Sort → Schema
//! ```
//!
//! # Example
//!
//! ```ignore
//! use schemadoc::config::Config;
//! use schemadoc::modify::modify_schema;
//! use schemadoc::snapshot::read_snapshot;
//!
//! let mut schema = read_snapshot("schema.json")?;
//! let config = Config::load()?;
//! let summary = modify_schema(&mut schema, &config, schemadoc::VERSION)?;
//! println!("{} tables", summary.tables);
//! ```

use tracing::info;

use crate::annotation::{merge_annotations, AnnotationError};
use crate::config::{check_version, Config, VersionError};
use crate::filter::FilterError;
use crate::inference::{infer_relations, NamingError};
use crate::schema::Schema;

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur while modifying a schema.
#[derive(Debug, thiserror::Error)]
pub enum ModifyError {
    #[error(transparent)]
    Version(#[from] VersionError),

    #[error("annotation error: {0}")]
    Annotation(#[from] AnnotationError),

    #[error("relation detection error: {0}")]
    Naming(#[from] NamingError),

    #[error("filter error: {0}")]
    Filter(#[from] FilterError),
}

pub type ModifyResult<T> = Result<T, ModifyError>;

// ============================================================================
// Pipeline
// ============================================================================

/// What the pipeline did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifySummary {
    /// Relations added by naming-convention detection.
    pub inferred: usize,
    /// Tables left after filtering.
    pub tables: usize,
    /// Relations left after filtering.
    pub relations: usize,
}

/// Apply `config` to `schema` in place.
///
/// `running_version` is checked against `config.required_version` before
/// anything is changed. The stages then run in order: annotations, relation
/// detection (if enabled), the table filter, and sorting by table name.
pub fn modify_schema(
    schema: &mut Schema,
    config: &Config,
    running_version: &str,
) -> ModifyResult<ModifySummary> {
    check_version(&config.required_version, running_version)?;

    // Resolve everything that can fail on configuration alone up front.
    let strategy = if config.detect_virtual_relations.enabled {
        Some(config.detect_virtual_relations.naming_strategy()?)
    } else {
        None
    };
    let filter = config.table_filter();

    merge_annotations(schema, &config.annotations)?;

    let inferred = match strategy {
        Some(strategy) => infer_relations(schema, strategy),
        None => 0,
    };

    filter.apply(schema)?;
    schema.sort();

    let summary = ModifySummary {
        inferred,
        tables: schema.tables().len(),
        relations: schema.relations().len(),
    };
    info!(
        schema = %schema.name,
        inferred = summary.inferred,
        tables = summary.tables,
        relations = summary.relations,
        "modified schema"
    );
    Ok(summary)
}
