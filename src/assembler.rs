//! Greedy slide assembler.
//!
//! Builds the slide sequence two slides at a time: an anchor slide taken in
//! photo order, followed by a tag-compatible slide found by
//! [`next_compatible`]. Slides are never revisited once committed.

use serde::Serialize;
use std::time::Instant;

use crate::context::AssemblyContext;
use crate::pairing::next_unclaimed_vertical;
use crate::policy::{AssemblyPolicy, PolicyError};
use crate::registry::PhotoRegistry;
use crate::scoring::total_score;
use crate::search::next_compatible;
use crate::types::{Orientation, PhotoId, Slide, SlideError};

/// Error type for assembler operations.
#[derive(Debug, thiserror::Error)]
pub enum AssemblyError {
    /// Policy failed validation.
    #[error("Invalid policy: {0}")]
    Policy(#[from] PolicyError),
    /// Dedicated worker pool could not be created.
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    /// Photos picked for a slide could not form one (internal consistency violation).
    #[error("Internal slide construction error: {0}")]
    Slide(#[from] SlideError),
    /// A photo picked as unclaimed was claimed by someone else first.
    #[error("Photo {0} was claimed concurrently")]
    ClaimConflict(PhotoId),
}

/// Why an assembly run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Termination {
    /// Every photo is in a slide.
    Exhausted,
    /// A vertical photo had no unclaimed vertical partner after it.
    MissingVerticalPartner {
        /// The unpaired vertical photo.
        photo: PhotoId,
    },
}

impl Termination {
    /// Whether the run used every photo.
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Exhausted)
    }
}

/// Counters collected during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssemblyStats {
    /// Compatible-neighbor searches performed.
    pub searches: usize,
    /// Total scan rounds across all searches.
    pub search_rounds: usize,
    /// Searches that needed at least one relaxation.
    pub relaxed_searches: usize,
    /// Searches answered by the plain-order fallback. A fully relaxed window
    /// accepts every unclaimed candidate, so this stays zero in practice.
    pub fallbacks: usize,
    /// Photos claimed into slides.
    pub claimed_photos: usize,
}

/// Output of one assembly run.
#[derive(Debug, Clone)]
pub struct Assembly {
    /// Slides in slideshow order.
    pub slides: Vec<Slide>,
    /// Why the run stopped.
    pub termination: Termination,
    /// Run counters.
    pub stats: AssemblyStats,
}

impl Assembly {
    /// Total transition score of the slide sequence.
    pub fn score(&self) -> u64 {
        total_score(&self.slides)
    }
}

/// Greedy slide assembler.
///
/// ## Algorithm
///
/// Starting with a cursor at photo 0 (every photo before the cursor is
/// claimed):
///
/// 1. `current` = first unclaimed photo at or after the cursor; none: stop
/// 2. Slide A from `current` (vertical photos pair with the next unclaimed
///    vertical after them); no partner: stop
/// 3. Claim and append slide A
/// 4. Search for a compatible photo after `current` using slide A's tags;
///    none: every photo is claimed, stop
/// 5. Slide B from that photo (vertical partner searched after it); no
///    partner: stop. Claim and append slide B
/// 6. Cursor = `current + 1`; go to 1
///
/// Stopping early leaves a partial, still valid sequence. A photo is only
/// claimed together with the slide that holds it.
pub struct SlideAssembler {
    policy: AssemblyPolicy,
    pool: Option<rayon::ThreadPool>,
}

impl SlideAssembler {
    /// Create an assembler, validating the policy and building a dedicated
    /// worker pool when `policy.threads > 0`.
    pub fn new(policy: AssemblyPolicy) -> Result<Self, AssemblyError> {
        policy.validate()?;
        let pool = match policy.threads {
            0 => None,
            n => Some(rayon::ThreadPoolBuilder::new().num_threads(n).build()?),
        };
        Ok(Self { policy, pool })
    }

    /// Get the policy.
    pub fn policy(&self) -> &AssemblyPolicy {
        &self.policy
    }

    /// Assemble a slide sequence from `registry`.
    pub fn assemble(&self, registry: &PhotoRegistry) -> Result<Assembly, AssemblyError> {
        match &self.pool {
            Some(pool) => pool.install(|| self.run(registry)),
            None => self.run(registry),
        }
    }

    fn run(&self, registry: &PhotoRegistry) -> Result<Assembly, AssemblyError> {
        let started = Instant::now();
        let mut ctx = AssemblyContext::new(registry, &self.policy);
        let mut stats = AssemblyStats::default();
        let mut cursor = 0;

        let termination = loop {
            let Some(current) = ctx.first_unclaimed(cursor) else {
                break Termination::Exhausted;
            };

            let Some(slide_a) = plan_slide(&ctx, current)? else {
                break Termination::MissingVerticalPartner { photo: current };
            };
            let reference = slide_a.tags().clone();
            commit(&mut ctx, slide_a)?;

            let after = current.index() + 1;
            // Everything before `after` is claimed, so an empty search means
            // no unclaimed photo is left anywhere.
            let Some(hit) = next_compatible(&ctx, after, &reference) else {
                debug_assert!(ctx.claims().all_claimed());
                break Termination::Exhausted;
            };
            stats.searches += 1;
            stats.search_rounds += hit.rounds;
            stats.relaxed_searches += usize::from(hit.rounds > 1);
            stats.fallbacks += usize::from(hit.fallback);

            let Some(slide_b) = plan_slide(&ctx, hit.photo)? else {
                break Termination::MissingVerticalPartner { photo: hit.photo };
            };
            commit(&mut ctx, slide_b)?;

            cursor = after;
        };

        let (slides, claims) = ctx.into_parts();
        stats.claimed_photos = claims.claimed_count();
        let elapsed_ms = started.elapsed().as_millis() as u64;

        if termination.is_complete() {
            tracing::info!(
                photos = registry.len(),
                slides = slides.len(),
                searches = stats.searches,
                search_rounds = stats.search_rounds,
                elapsed_ms,
                "Assembly complete"
            );
        } else {
            tracing::warn!(
                photos = registry.len(),
                slides = slides.len(),
                expected_slides = registry.expected_slide_count(),
                unclaimed = registry.len() - stats.claimed_photos,
                termination = ?termination,
                elapsed_ms,
                "Assembly stopped early"
            );
        }

        Ok(Assembly {
            slides,
            termination,
            stats,
        })
    }
}

/// Build the slide anchored at `anchor` without claiming anything.
///
/// Returns `None` when `anchor` is vertical and has no unclaimed vertical
/// partner after it.
fn plan_slide(ctx: &AssemblyContext<'_>, anchor: PhotoId) -> Result<Option<Slide>, SlideError> {
    let photo = ctx.photo(anchor);
    match photo.orientation {
        Orientation::Horizontal => Slide::horizontal(photo).map(Some),
        Orientation::Vertical => {
            let Some(partner) = next_unclaimed_vertical(ctx, anchor.index() + 1) else {
                return Ok(None);
            };
            Slide::vertical(photo, ctx.photo(partner)).map(Some)
        }
    }
}

/// Claim every photo of `slide` and append it.
fn commit(ctx: &mut AssemblyContext<'_>, slide: Slide) -> Result<(), AssemblyError> {
    for id in slide.photo_ids() {
        if !ctx.try_claim(id) {
            return Err(AssemblyError::ClaimConflict(id));
        }
    }
    ctx.push_slide(slide);
    Ok(())
}
