//! Acceptance window for compatible-neighbor search.
//!
//! A candidate is accepted when its overlap with the reference is neither
//! near-total nor near-zero and both sides keep enough exclusive tags:
//!
//! ```text
//! min_intersect <= common <= max_intersect
//! L - common    >= min_side
//! |p| - common  >= min_side
//! ```
//!
//! All thresholds use integer floor division. Each relaxation step widens
//! the window by one on every bound until it accepts any candidate.

use serde::Serialize;

use super::v1::AssemblyPolicy;

/// Current acceptance thresholds for one search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AcceptanceWindow {
    /// Length `L` of the reference tag set.
    pub reference_len: usize,
    /// Minimum accepted overlap.
    pub min_intersect: usize,
    /// Maximum accepted overlap.
    pub max_intersect: usize,
    /// Minimum exclusive tags required on each side.
    pub min_side: usize,
}

impl AcceptanceWindow {
    /// Strictest window for a reference of `reference_len` tags.
    pub fn initial(reference_len: usize, policy: &AssemblyPolicy) -> Self {
        let min_intersect = reference_len / policy.intersect_divisor.max(1);
        Self {
            reference_len,
            min_intersect,
            max_intersect: reference_len - min_intersect,
            min_side: min_intersect / policy.side_divisor.max(1),
        }
    }

    /// Upper bound on scan rounds before the window is fully relaxed,
    /// counting the final round.
    pub fn max_rounds(&self) -> usize {
        let to_min = self.min_intersect;
        let to_max = self.reference_len - self.max_intersect;
        to_min.max(to_max).max(self.min_side) + 1
    }

    /// Whether a candidate with `candidate_len` tags, `common` of them shared
    /// with the reference, falls inside the window.
    pub fn accepts(&self, common: usize, candidate_len: usize) -> bool {
        let left = self.reference_len.saturating_sub(common);
        let right = candidate_len.saturating_sub(common);
        self.min_intersect <= common
            && common <= self.max_intersect
            && left >= self.min_side
            && right >= self.min_side
    }

    /// Whether no further relaxation is possible.
    pub fn is_fully_relaxed(&self) -> bool {
        self.min_intersect == 0 && self.max_intersect == self.reference_len && self.min_side == 0
    }

    /// Widen every bound by one step, clamped to `[0, L]`.
    pub fn relax(&mut self) {
        self.min_intersect = self.min_intersect.saturating_sub(1);
        self.max_intersect = (self.max_intersect + 1).min(self.reference_len);
        self.min_side = self.min_side.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_uses_floor_division() {
        let policy = AssemblyPolicy::default();

        let w = AcceptanceWindow::initial(10, &policy);
        assert_eq!((w.min_intersect, w.max_intersect, w.min_side), (2, 8, 1));

        let w = AcceptanceWindow::initial(7, &policy);
        assert_eq!((w.min_intersect, w.max_intersect, w.min_side), (1, 6, 0));

        let w = AcceptanceWindow::initial(3, &policy);
        assert_eq!((w.min_intersect, w.max_intersect, w.min_side), (0, 3, 0));
        assert!(w.is_fully_relaxed());
    }

    #[test]
    fn test_accepts_balanced_overlap_only() {
        let w = AcceptanceWindow::initial(8, &AssemblyPolicy::default());
        // min 2, max 6, side 1
        assert!(w.accepts(3, 6));
        assert!(!w.accepts(1, 6), "too little overlap");
        assert!(!w.accepts(7, 9), "too much overlap");
        assert!(!w.accepts(3, 3), "candidate has no exclusive tags");
    }

    #[test]
    fn test_relax_clamps_and_terminates() {
        let mut w = AcceptanceWindow::initial(20, &AssemblyPolicy::default());
        assert_eq!((w.min_intersect, w.max_intersect, w.min_side), (5, 15, 2));
        assert_eq!(w.max_rounds(), 6);

        let mut rounds = 1;
        while !w.is_fully_relaxed() {
            w.relax();
            rounds += 1;
        }
        assert_eq!(rounds, 6);
        assert_eq!((w.min_intersect, w.max_intersect, w.min_side), (0, 20, 0));

        w.relax();
        assert!(w.is_fully_relaxed());
    }

    #[test]
    fn test_fully_relaxed_accepts_everything() {
        let mut w = AcceptanceWindow::initial(6, &AssemblyPolicy::default());
        while !w.is_fully_relaxed() {
            w.relax();
        }
        for common in 0..=6 {
            assert!(w.accepts(common, common));
            assert!(w.accepts(common, common + 4));
        }
    }

    #[test]
    fn test_empty_reference() {
        let w = AcceptanceWindow::initial(0, &AssemblyPolicy::default());
        assert!(w.is_fully_relaxed());
        assert!(w.accepts(0, 5));
        assert_eq!(w.max_rounds(), 1);
    }
}
