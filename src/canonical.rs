//! Canonical hashing for tags, policies and slide sequences.
//!
//! ## Determinism Guarantees
//!
//! - Tag hashes are stable across runs and platforms (xxh64, fixed seed)
//! - Struct fields serialize in declaration order
//! - Vectors serialize in index order
//!
//! Parallel assembly may produce different slide sequences for the same
//! dataset; `sequence_fingerprint` is how two runs are told apart.

use serde::Serialize;
use xxhash_rust::xxh64::xxh64;

use crate::types::{Slide, SlidePhotos, Tag};

/// Seed for label hashing. Changing it renumbers every tag.
pub const TAG_HASH_SEED: u64 = 0;

/// Hash a textual label to its integer tag.
///
/// Distinct labels may collide; colliding labels are treated as one tag.
pub fn hash_tag(label: &str) -> Tag {
    xxh64(label.as_bytes(), TAG_HASH_SEED)
}

/// Serialize a value to canonical JSON bytes for hashing.
pub fn to_canonical_bytes<T: Serialize>(value: &T) -> Vec<u8> {
    serde_json::to_vec(value).expect("Canonical serialization failed")
}

/// Compute canonical hash of a serializable value.
pub fn canonical_hash<T: Serialize>(value: &T) -> u64 {
    let bytes = to_canonical_bytes(value);
    xxh64(&bytes, 0)
}

/// Compute canonical hash and return as hex string.
pub fn canonical_hash_hex<T: Serialize>(value: &T) -> String {
    format!("{:016x}", canonical_hash(value))
}

/// Fingerprint of a slide sequence (photo ids only, in order).
pub fn sequence_fingerprint(slides: &[Slide]) -> String {
    let photos: Vec<SlidePhotos> = slides.iter().map(Slide::photos).collect();
    canonical_hash_hex(&photos)
}
