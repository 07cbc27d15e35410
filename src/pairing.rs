//! Vertical partner lookup.

use crate::context::AssemblyContext;
use crate::types::PhotoId;

/// First unclaimed vertical photo at or after `start`.
///
/// Read-only: the caller claims the result. `None` means no vertical slide
/// can be completed from this position.
pub fn next_unclaimed_vertical(ctx: &AssemblyContext<'_>, start: usize) -> Option<PhotoId> {
    ctx.registry().photos()[start.min(ctx.registry().len())..]
        .iter()
        .find(|p| p.is_vertical() && !ctx.is_claimed(p.id))
        .map(|p| p.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::AssemblyPolicy;
    use crate::registry::PhotoRegistry;
    use crate::types::{Orientation, TagSet};

    fn registry() -> PhotoRegistry {
        PhotoRegistry::from_records([
            (Orientation::Vertical, TagSet::new([1])),
            (Orientation::Horizontal, TagSet::new([2])),
            (Orientation::Vertical, TagSet::new([3])),
            (Orientation::Vertical, TagSet::new([4])),
        ])
    }

    #[test]
    fn test_skips_horizontal_and_claimed() {
        let registry = registry();
        let policy = AssemblyPolicy::sequential();
        let ctx = AssemblyContext::new(&registry, &policy);

        assert_eq!(next_unclaimed_vertical(&ctx, 1), Some(PhotoId::new(2)));
        assert!(ctx.try_claim(PhotoId::new(2)));
        assert_eq!(next_unclaimed_vertical(&ctx, 1), Some(PhotoId::new(3)));
    }

    #[test]
    fn test_exhausted_scan() {
        let registry = registry();
        let policy = AssemblyPolicy::sequential();
        let ctx = AssemblyContext::new(&registry, &policy);

        assert!(ctx.try_claim(PhotoId::new(3)));
        assert_eq!(next_unclaimed_vertical(&ctx, 3), None);
        assert_eq!(next_unclaimed_vertical(&ctx, 10), None);
    }

    #[test]
    fn test_does_not_claim() {
        let registry = registry();
        let policy = AssemblyPolicy::sequential();
        let ctx = AssemblyContext::new(&registry, &policy);

        assert_eq!(next_unclaimed_vertical(&ctx, 0), Some(PhotoId::new(0)));
        assert_eq!(next_unclaimed_vertical(&ctx, 0), Some(PhotoId::new(0)));
        assert_eq!(ctx.claims().claimed_count(), 0);
    }
}
