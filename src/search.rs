//! Compatible-neighbor search with adaptive relaxation.
//!
//! Given the tags of the slide just placed, find an unclaimed photo whose
//! overlap with those tags is balanced: shared tags on both sides of the
//! transition, but not so many that nothing is new. The acceptance window
//! starts strict and is widened one step per round until something fits.
//!
//! ## Algorithm
//!
//! 1. Build the initial [`AcceptanceWindow`] from the reference length
//! 2. Scan unclaimed photos at or after `start` for an accepted candidate
//! 3. Found: return it
//! 4. Not found and fully relaxed: return the first unclaimed photo in
//!    plain order, or `None`
//! 5. Otherwise relax the window and go to 2
//!
//! ## Parallel scans
//!
//! In [`ScanMode::Parallel`] every worker publishes accepted candidates into
//! a shared [`FirstMatch`] slot; the first published index wins and workers
//! stop doing work once the slot is filled. When several candidates pass in
//! the same round, which one is returned is unspecified.
//! Callers and tests must only rely on *an* accepted candidate.

use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::context::AssemblyContext;
use crate::policy::{AcceptanceWindow, ScanMode};
use crate::types::{Photo, PhotoId, TagSet};

/// First-writer-wins slot shared by the workers of one scan.
#[derive(Debug)]
pub struct FirstMatch {
    slot: AtomicUsize,
}

impl FirstMatch {
    const EMPTY: usize = usize::MAX;

    /// Create an empty slot.
    pub fn new() -> Self {
        Self {
            slot: AtomicUsize::new(Self::EMPTY),
        }
    }

    /// Publish `index`. Returns `true` if this call filled the slot.
    pub fn offer(&self, index: usize) -> bool {
        self.slot
            .compare_exchange(Self::EMPTY, index, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Whether some worker already published a result.
    pub fn is_filled(&self) -> bool {
        self.slot.load(Ordering::Acquire) != Self::EMPTY
    }

    /// The winning index, if any.
    pub fn get(&self) -> Option<usize> {
        match self.slot.load(Ordering::Acquire) {
            Self::EMPTY => None,
            index => Some(index),
        }
    }
}

impl Default for FirstMatch {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of a compatible-neighbor search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchHit {
    /// Chosen photo (not yet claimed).
    pub photo: PhotoId,
    /// Scan rounds performed, including the successful one.
    pub rounds: usize,
    /// Whether the photo came from the plain-order fallback.
    pub fallback: bool,
    /// Window in effect when the photo was chosen.
    pub window: AcceptanceWindow,
}

/// Find the next unclaimed photo at or after `start` whose overlap with
/// `reference` falls in the adaptively relaxed acceptance window.
///
/// Returns `None` only when no unclaimed photo remains at or after `start`.
/// The returned photo is not claimed.
pub fn next_compatible(
    ctx: &AssemblyContext<'_>,
    start: usize,
    reference: &TagSet,
) -> Option<SearchHit> {
    let mut window = AcceptanceWindow::initial(reference.len(), ctx.policy());
    let mut rounds = 0;

    loop {
        rounds += 1;

        if let Some(photo) = scan_round(ctx, start, reference, &window) {
            tracing::debug!(
                start,
                reference_len = reference.len(),
                rounds,
                photo = %photo,
                orientation = %ctx.photo(photo).orientation,
                "compatible neighbor found"
            );
            return Some(SearchHit {
                photo,
                rounds,
                fallback: false,
                window,
            });
        }

        if window.is_fully_relaxed() {
            let photo = ctx.first_unclaimed(start)?;
            tracing::debug!(start, rounds, photo = %photo, "fell back to plain order");
            return Some(SearchHit {
                photo,
                rounds,
                fallback: true,
                window,
            });
        }

        window.relax();
    }
}

/// One scan over `start..` with a fixed window.
fn scan_round(
    ctx: &AssemblyContext<'_>,
    start: usize,
    reference: &TagSet,
    window: &AcceptanceWindow,
) -> Option<PhotoId> {
    let photos = &ctx.registry().photos()[start.min(ctx.registry().len())..];
    let accepted = |p: &Photo| {
        !ctx.is_claimed(p.id)
            && window.accepts(reference.intersection_count(&p.tags), p.tags.len())
    };

    let policy = ctx.policy();
    match policy.scan {
        ScanMode::Parallel if photos.len() >= policy.parallel_threshold => {
            let found = FirstMatch::new();
            photos.par_iter().for_each(|p| {
                if found.is_filled() {
                    return;
                }
                if accepted(p) {
                    found.offer(p.id.index());
                }
            });
            found.get().map(PhotoId::new)
        }
        _ => photos.iter().find(|p| accepted(*p)).map(|p| p.id),
    }
}
