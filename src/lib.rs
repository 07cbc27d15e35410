//! # slideshow-kernel
//!
//! Greedy slideshow assembly for tagged photo collections.
//!
//! The kernel answers one question:
//!
//! > Given a set of tagged photos, in which order should they be shown so that
//! > consecutive slides share some tags but not all of them?
//!
//! ## Core Contract
//!
//! 1. Parse a dataset into an indexed [`PhotoRegistry`] with hashed, sorted tags
//! 2. Build slides (one horizontal photo, or two vertical photos) and chain
//!    them greedily, each followed by a tag-compatible neighbor
//! 3. Write the slide sequence in submission format and score it
//!
//! ## Architecture
//!
//! ```text
//! dataset → parse → PhotoRegistry ─┐
//!                                  ├→ SlideAssembler → Assembly → write / score
//!                 AssemblyPolicy ──┘        ↓
//!                                   AssemblyContext (claims, slides)
//!                                           ↓
//!                            next_compatible (AcceptanceWindow, rayon scan)
//! ```
//!
//! ## Determinism Guarantees
//!
//! - Tag hashes and policy hashes are stable across runs (xxh64)
//! - [`ScanMode::Sequential`] always yields the same sequence for a dataset
//! - [`ScanMode::Parallel`] may pick a different accepted candidate per run;
//!   every result still satisfies the slide and uniqueness invariants

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod types;
pub mod canonical;
pub mod registry;
pub mod context;
pub mod policy;
pub mod search;
pub mod pairing;
pub mod assembler;
pub mod scoring;
pub mod io;
pub mod report;

// Re-exports
pub use types::{Tag, TagSet, intersection_count};
pub use types::{Photo, PhotoId, Orientation};
pub use types::{Slide, SlideId, SlidePhotos, SlideError};
pub use registry::{PhotoRegistry, ClaimTable, RegistryError};
pub use context::AssemblyContext;
pub use policy::{AssemblyPolicy, AcceptanceWindow, ScanMode, PolicyError};
pub use search::{next_compatible, FirstMatch, SearchHit};
pub use pairing::next_unclaimed_vertical;
pub use assembler::{Assembly, AssemblyError, AssemblyStats, SlideAssembler, Termination};
pub use scoring::{total_score, transition, transition_score, transition_upper_bound, Transition};
pub use canonical::{to_canonical_bytes, canonical_hash, canonical_hash_hex, hash_tag, sequence_fingerprint};
pub use io::{parse_dataset, read_dataset, write_output_file, write_slides, ParseError};
pub use report::{DatasetReport, StageTimings};

/// Default policy version.
pub const DEFAULT_POLICY_VERSION: &str = "assembly_policy_v1";
