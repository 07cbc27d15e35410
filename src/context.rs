//! Per-run assembly state.
//!
//! `AssemblyContext` replaces process-wide run state: it borrows the photo
//! registry and policy, owns the claim flags, and accumulates the slide
//! sequence. Every search and pairing operation takes the context
//! explicitly, so independent datasets can be assembled concurrently.

use crate::policy::AssemblyPolicy;
use crate::registry::{ClaimTable, PhotoRegistry};
use crate::types::{Photo, PhotoId, Slide};

/// Mutable state of one assembly run over one registry.
#[derive(Debug)]
pub struct AssemblyContext<'a> {
    registry: &'a PhotoRegistry,
    policy: &'a AssemblyPolicy,
    claims: ClaimTable,
    slides: Vec<Slide>,
}

impl<'a> AssemblyContext<'a> {
    /// Start a run with every photo unclaimed and no slides.
    pub fn new(registry: &'a PhotoRegistry, policy: &'a AssemblyPolicy) -> Self {
        Self {
            registry,
            policy,
            claims: ClaimTable::new(registry.len()),
            slides: Vec::with_capacity(registry.expected_slide_count()),
        }
    }

    /// The photo registry.
    pub fn registry(&self) -> &'a PhotoRegistry {
        self.registry
    }

    /// The policy in effect.
    pub fn policy(&self) -> &'a AssemblyPolicy {
        self.policy
    }

    /// Claim flags.
    pub fn claims(&self) -> &ClaimTable {
        &self.claims
    }

    /// Photo by id.
    pub fn photo(&self, id: PhotoId) -> &'a Photo {
        self.registry.photo(id)
    }

    /// Whether `id` is already used by a slide.
    pub fn is_claimed(&self, id: PhotoId) -> bool {
        self.claims.is_claimed(id)
    }

    /// Atomically claim `id`; `false` if it was already claimed.
    pub fn try_claim(&self, id: PhotoId) -> bool {
        self.claims.try_claim(id)
    }

    /// First unclaimed photo at or after `start`, in id order.
    pub fn first_unclaimed(&self, start: usize) -> Option<PhotoId> {
        (start..self.registry.len())
            .map(PhotoId::new)
            .find(|&id| !self.is_claimed(id))
    }

    /// Append a slide whose photos have been claimed.
    pub fn push_slide(&mut self, slide: Slide) {
        self.slides.push(slide);
    }

    /// Finish the run, returning the slide sequence and claim flags.
    pub fn into_parts(self) -> (Vec<Slide>, ClaimTable) {
        (self.slides, self.claims)
    }
}
