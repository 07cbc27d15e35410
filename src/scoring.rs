//! Transition scoring between adjacent slides.
//!
//! Formula:
//! ```text
//! common = |A ∩ B|
//! left   = |A| - common
//! right  = |B| - common
//! score  = min(common, left, right)
//! ```

use serde::Serialize;

use crate::types::Slide;

/// Overlap breakdown of one transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    /// Tags shared by both slides.
    pub common: usize,
    /// Tags only on the first slide.
    pub left: usize,
    /// Tags only on the second slide.
    pub right: usize,
}

impl Transition {
    /// Score of this transition.
    pub fn score(&self) -> usize {
        self.common.min(self.left).min(self.right)
    }
}

/// Overlap breakdown between `a` and the slide following it, `b`.
pub fn transition(a: &Slide, b: &Slide) -> Transition {
    let common = a.tags().intersection_count(b.tags());
    Transition {
        common,
        left: a.tags().len() - common,
        right: b.tags().len() - common,
    }
}

/// Score of the transition from `a` to `b`.
pub fn transition_score(a: &Slide, b: &Slide) -> usize {
    transition(a, b).score()
}

/// Largest score any transition between slides of these sizes could reach.
pub fn transition_upper_bound(a: &Slide, b: &Slide) -> usize {
    a.tags().len().min(b.tags().len()) / 2
}

/// Sum of transition scores over consecutive slides. Zero for fewer than two slides.
pub fn total_score(slides: &[Slide]) -> u64 {
    slides
        .windows(2)
        .map(|pair| transition_score(&pair[0], &pair[1]) as u64)
        .sum()
}
