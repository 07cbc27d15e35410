//! AssemblyPolicy v1: relaxation divisors and scan scheduling.
//!
//! ## Parameters
//!
//! - `intersect_divisor`: initial minimum overlap is `L / intersect_divisor`
//! - `side_divisor`: initial minimum exclusive tags per side is
//!   `min_intersect / side_divisor`
//! - `scan`: parallel (racy first match) or sequential (lowest index) scans
//! - `threads`: dedicated worker count, `0` uses the global rayon pool
//! - `parallel_threshold`: ranges shorter than this are scanned sequentially
//!
//! Only the first three parameters change which slides can be produced, so
//! only they take part in `params_hash`.

use serde::{Deserialize, Serialize};

use crate::canonical::canonical_hash_hex;
use crate::DEFAULT_POLICY_VERSION;

/// Error type for policy validation and loading.
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    /// A divisor was zero.
    #[error("Policy field `{0}` must be at least 1")]
    ZeroDivisor(&'static str),
    /// The policy document could not be parsed.
    #[error("Invalid policy document: {0}")]
    Json(#[from] serde_json::Error),
}

/// How a single candidate scan is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    /// Data-parallel scan; whichever accepted candidate is published first wins.
    Parallel,
    /// In-order scan; the lowest accepted index wins. Fully deterministic.
    Sequential,
}

/// Parameters that identify the heuristic for hashing.
#[derive(Debug, Clone, Serialize)]
struct PolicyParams<'a> {
    version: &'a str,
    intersect_divisor: usize,
    side_divisor: usize,
    scan: ScanMode,
}

/// Assembly policy version 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblyPolicy {
    /// Policy version identifier.
    pub version: String,
    /// Divisor of the reference length giving the initial minimum overlap.
    pub intersect_divisor: usize,
    /// Divisor of the minimum overlap giving the initial minimum side size.
    pub side_divisor: usize,
    /// Scan execution mode.
    pub scan: ScanMode,
    /// Dedicated worker threads (0 = global pool).
    pub threads: usize,
    /// Minimum scan length for a parallel scan.
    pub parallel_threshold: usize,
}

impl AssemblyPolicy {
    /// Parse a policy from JSON and validate it. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, PolicyError> {
        let policy: Self = serde_json::from_str(json)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Check parameter ranges.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.intersect_divisor == 0 {
            return Err(PolicyError::ZeroDivisor("intersect_divisor"));
        }
        if self.side_divisor == 0 {
            return Err(PolicyError::ZeroDivisor("side_divisor"));
        }
        Ok(())
    }

    /// Deterministic single-threaded policy.
    pub fn sequential() -> Self {
        Self {
            scan: ScanMode::Sequential,
            ..Self::default()
        }
    }

    /// Parallel policy on a dedicated pool of `threads` workers.
    pub fn parallel(threads: usize) -> Self {
        Self {
            scan: ScanMode::Parallel,
            threads,
            ..Self::default()
        }
    }

    /// Get the policy ID.
    pub fn policy_id(&self) -> &str {
        &self.version
    }

    /// Compute a hash of the parameters that affect assembly results.
    pub fn params_hash(&self) -> String {
        canonical_hash_hex(&PolicyParams {
            version: &self.version,
            intersect_divisor: self.intersect_divisor,
            side_divisor: self.side_divisor,
            scan: self.scan,
        })
    }
}

impl Default for AssemblyPolicy {
    fn default() -> Self {
        Self {
            version: DEFAULT_POLICY_VERSION.to_string(),
            intersect_divisor: 4,
            side_divisor: 2,
            scan: ScanMode::Parallel,
            threads: 0,
            parallel_threshold: 1024,
        }
    }
}
