//! Canonical serialization for deterministic fingerprints.
//!
//! Topology fingerprints and policy hashes are computed over canonical JSON
//! bytes so that the same value always produces the same hash.
//!
//! ## Determinism Guarantees
//!
//! - Struct fields serialize in declaration order
//! - Vectors serialize in index order
//! - Maps in hashed data must be `BTreeMap`
//! - Floats are quantized by callers before hashing

use serde::Serialize;
use xxhash_rust::xxh64::xxh64;

/// Serialize a value to canonical JSON bytes for hashing.
pub fn to_canonical_bytes<T: Serialize>(value: &T) -> Vec<u8> {
    serde_json::to_vec(value).expect("Canonical serialization failed")
}

/// Compute canonical hash of a serializable value.
pub fn canonical_hash<T: Serialize>(value: &T) -> u64 {
    xxh64(&to_canonical_bytes(value), 0)
}

/// Compute canonical hash and return as hex string.
pub fn canonical_hash_hex<T: Serialize>(value: &T) -> String {
    format!("{:016x}", canonical_hash(value))
}
