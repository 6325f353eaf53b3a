use serde::Serialize;
use sha2::{Digest, Sha256};
use sxe_core::errors::SxeError;

use crate::serde::to_canonical_json_bytes;

/// SHA-256 of the canonical JSON encoding of `value`, as lowercase hex.
pub fn stable_hash_string<T: Serialize>(value: &T) -> Result<String, SxeError> {
    let bytes = to_canonical_json_bytes(value)?;
    Ok(format!("{:x}", Sha256::digest(&bytes)))
}
