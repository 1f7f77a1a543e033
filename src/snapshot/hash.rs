//! Content fingerprints for schema snapshots.

use sha2::{Digest, Sha256};

use crate::schema::{encode, CodecResult, Schema};

/// SHA256 of `bytes` as 64 lowercase hex characters.
pub fn hash_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Fingerprint of a schema.
///
/// The schema is encoded to its compact wire form before hashing, so two
/// schemas with the same fingerprint encode to the same document.
pub fn fingerprint(schema: &Schema) -> CodecResult<String> {
    Ok(hash_bytes(encode(schema)?.as_bytes()))
}
