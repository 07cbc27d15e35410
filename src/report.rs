//! Per-dataset run report.
//!
//! One [`DatasetReport`] is produced per processed dataset and serialized as
//! a single JSON line, so a batch of runs can be compared by score, stop
//! reason and sequence fingerprint.

use serde::Serialize;
use std::io::Write;

use crate::assembler::{Assembly, AssemblyStats, Termination};
use crate::canonical::sequence_fingerprint;
use crate::policy::AssemblyPolicy;
use crate::registry::PhotoRegistry;

/// Wall time per pipeline stage, in milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StageTimings {
    /// Reading and parsing the dataset.
    pub parse_ms: u64,
    /// Assembling slides.
    pub assemble_ms: u64,
    /// Writing the submission file.
    pub write_ms: u64,
}

impl StageTimings {
    /// Sum of all stages.
    pub fn total_ms(&self) -> u64 {
        self.parse_ms + self.assemble_ms + self.write_ms
    }
}

/// Summary of one dataset run.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetReport {
    /// Dataset name (usually the input file name).
    pub dataset: String,
    /// Photos in the dataset.
    pub photos: usize,
    /// Horizontal photos.
    pub horizontal: usize,
    /// Vertical photos.
    pub vertical: usize,
    /// Slides assembled.
    pub slides: usize,
    /// Slides a complete run would produce.
    pub expected_slides: usize,
    /// Total transition score.
    pub score: u64,
    /// Why assembly stopped.
    pub termination: Termination,
    /// Assembly counters.
    pub stats: AssemblyStats,
    /// Stage timings.
    pub timings: StageTimings,
    /// Policy identifier.
    pub policy_id: String,
    /// Hash of the policy parameters.
    pub policy_params_hash: String,
    /// Fingerprint of the produced slide order.
    pub sequence_fingerprint: String,
}

impl DatasetReport {
    /// Build a report from a finished run.
    pub fn new(
        dataset: impl Into<String>,
        registry: &PhotoRegistry,
        policy: &AssemblyPolicy,
        assembly: &Assembly,
        timings: StageTimings,
    ) -> Self {
        Self {
            dataset: dataset.into(),
            photos: registry.len(),
            horizontal: registry.horizontal_count(),
            vertical: registry.vertical_count(),
            slides: assembly.slides.len(),
            expected_slides: registry.expected_slide_count(),
            score: assembly.score(),
            termination: assembly.termination,
            stats: assembly.stats.clone(),
            timings,
            policy_id: policy.policy_id().to_string(),
            policy_params_hash: policy.params_hash(),
            sequence_fingerprint: sequence_fingerprint(&assembly.slides),
        }
    }

    /// Whether every photo ended up in a slide.
    pub fn is_complete(&self) -> bool {
        self.termination.is_complete()
    }

    /// Write this report as one JSON line.
    pub fn write_json_line<W: Write>(&self, mut out: W) -> std::io::Result<()> {
        serde_json::to_writer(&mut out, self)?;
        writeln!(out)?;
        out.flush()
    }
}
