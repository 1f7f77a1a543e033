//! Schema snapshot files.
//!
//! A snapshot is the JSON wire form of a schema. Reading one always runs
//! repair, so callers get a [`Schema`] whose relations point at real tables.

mod hash;

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::schema::{decode_reader, encode_pretty, CodecError, Schema};

pub use hash::{fingerprint, hash_bytes};

/// Errors reading or writing snapshots.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write snapshot {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid snapshot {path}: {source}")]
    Codec {
        path: PathBuf,
        #[source]
        source: CodecError,
    },
}

pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Decode and repair the snapshot at `path`.
pub fn read_snapshot(path: impl AsRef<Path>) -> SnapshotResult<Schema> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| SnapshotError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let schema = decode_reader(BufReader::new(file))
        .and_then(|decoded| decoded.repair())
        .map_err(|source| SnapshotError::Codec {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(
        path = %path.display(),
        tables = schema.tables().len(),
        relations = schema.relations().len(),
        "read snapshot"
    );
    Ok(schema)
}

/// Write `schema` to `path` as pretty-printed JSON.
pub fn write_snapshot(path: impl AsRef<Path>, schema: &Schema) -> SnapshotResult<()> {
    let path = path.as_ref();
    let json = encode_pretty(schema).map_err(|source| SnapshotError::Codec {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(|source| SnapshotError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Fingerprint of the snapshot at `path`, computed over its repaired form.
pub fn fingerprint_file(path: impl AsRef<Path>) -> SnapshotResult<String> {
    let path = path.as_ref();
    let schema = read_snapshot(path)?;
    fingerprint(&schema).map_err(|source| SnapshotError::Codec {
        path: path.to_path_buf(),
        source,
    })
}
