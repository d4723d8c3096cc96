//! crates/fl_io/src/hasher.rs
//!
//! SHA-256 digests, lowercase hex.
//! - `sha256_canonical_value` for JSON values (goes through canonical bytes,
//!   so key order in the source files does not change the digest)
//! - `sha256_hex` for raw bytes

use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::canonical_json::to_canonical_json_bytes;

pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

pub fn sha256_canonical_value(v: &Value) -> String {
    sha256_hex(&to_canonical_json_bytes(v))
}

/// True for a lowercase 64-char hex digest.
pub fn is_sha256_hex(s: &str) -> bool {
    s.len() == 64 && s.bytes().all(|c| matches!(c, b'0'..=b'9' | b'a'..=b'f'))
}
