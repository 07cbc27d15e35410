//! Photo registry and per-run claim flags.
//!
//! The registry is the read-only, indexed photo collection produced by the
//! parser. Which photos are already used by a slide is tracked separately in
//! a [`ClaimTable`], one atomic flag per photo, so that a claim is a true
//! test-and-set and a registry can back several independent runs.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::types::{Orientation, Photo, PhotoId, TagSet};

/// Error type for registry construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// A photo's id does not match its position.
    #[error("Photo at position {position} has id {id}")]
    IdMismatch {
        /// Position in the input vector.
        position: usize,
        /// Id carried by the photo.
        id: PhotoId,
    },
}

/// Indexed, immutable photo collection.
#[derive(Debug, Clone, Default)]
pub struct PhotoRegistry {
    photos: Vec<Photo>,
    horizontal: usize,
}

impl PhotoRegistry {
    /// Create a registry, checking that every photo id equals its position.
    pub fn new(photos: Vec<Photo>) -> Result<Self, RegistryError> {
        if let Some((position, photo)) = photos
            .iter()
            .enumerate()
            .find(|(i, p)| p.id.index() != *i)
        {
            return Err(RegistryError::IdMismatch {
                position,
                id: photo.id,
            });
        }
        let horizontal = photos.iter().filter(|p| p.is_horizontal()).count();
        Ok(Self { photos, horizontal })
    }

    /// Create a registry from orientation/tag records, assigning ids by position.
    pub fn from_records(records: impl IntoIterator<Item = (Orientation, TagSet)>) -> Self {
        let photos: Vec<Photo> = records
            .into_iter()
            .enumerate()
            .map(|(i, (orientation, tags))| Photo::new(PhotoId::new(i), orientation, tags))
            .collect();
        let horizontal = photos.iter().filter(|p| p.is_horizontal()).count();
        Self { photos, horizontal }
    }

    /// Number of photos.
    pub fn len(&self) -> usize {
        self.photos.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    /// Get a photo by id.
    pub fn get(&self, id: PhotoId) -> Option<&Photo> {
        self.photos.get(id.index())
    }

    /// Get a photo by id.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a position of this registry.
    pub fn photo(&self, id: PhotoId) -> &Photo {
        &self.photos[id.index()]
    }

    /// All photos in id order.
    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    /// Number of horizontal photos.
    pub fn horizontal_count(&self) -> usize {
        self.horizontal
    }

    /// Number of vertical photos.
    pub fn vertical_count(&self) -> usize {
        self.photos.len() - self.horizontal
    }

    /// Slides a complete assembly would produce.
    pub fn expected_slide_count(&self) -> usize {
        self.horizontal_count() + self.vertical_count() / 2
    }
}

/// Claim flags for one assembly run.
///
/// A flag flips from unclaimed to claimed at most once.
#[derive(Debug, Default)]
pub struct ClaimTable {
    flags: Vec<AtomicBool>,
    claimed: AtomicUsize,
}

impl ClaimTable {
    /// Create a table with every photo unclaimed.
    pub fn new(len: usize) -> Self {
        Self {
            flags: (0..len).map(|_| AtomicBool::new(false)).collect(),
            claimed: AtomicUsize::new(0),
        }
    }

    /// Whether `id` has been claimed. Out-of-range ids read as claimed.
    pub fn is_claimed(&self, id: PhotoId) -> bool {
        self.flags
            .get(id.index())
            .map_or(true, |f| f.load(Ordering::Acquire))
    }

    /// Claim `id`. Returns `false` if it was already claimed (or out of range).
    pub fn try_claim(&self, id: PhotoId) -> bool {
        let Some(flag) = self.flags.get(id.index()) else {
            return false;
        };
        let won = flag
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok();
        if won {
            self.claimed.fetch_add(1, Ordering::Relaxed);
        }
        won
    }

    /// Number of claimed photos.
    pub fn claimed_count(&self) -> usize {
        self.claimed.load(Ordering::Relaxed)
    }

    /// Number of tracked photos.
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Whether the table tracks no photos.
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Whether every photo has been claimed.
    pub fn all_claimed(&self) -> bool {
        self.claimed_count() == self.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<(Orientation, TagSet)> {
        vec![
            (Orientation::Horizontal, TagSet::new([1, 2])),
            (Orientation::Vertical, TagSet::new([3])),
            (Orientation::Vertical, TagSet::new([4])),
            (Orientation::Vertical, TagSet::new([5])),
        ]
    }

    #[test]
    fn test_counts() {
        let registry = PhotoRegistry::from_records(records());
        assert_eq!(registry.len(), 4);
        assert_eq!(registry.horizontal_count(), 1);
        assert_eq!(registry.vertical_count(), 3);
        assert_eq!(registry.expected_slide_count(), 2);
        assert_eq!(registry.photo(PhotoId::new(2)).tags.as_slice(), &[4]);
        assert!(registry.get(PhotoId::new(4)).is_none());
    }

    #[test]
    fn test_id_mismatch_rejected() {
        let photos = vec![
            Photo::new(PhotoId::new(0), Orientation::Horizontal, TagSet::default()),
            Photo::new(PhotoId::new(5), Orientation::Horizontal, TagSet::default()),
        ];
        assert_eq!(
            PhotoRegistry::new(photos).unwrap_err(),
            RegistryError::IdMismatch {
                position: 1,
                id: PhotoId::new(5)
            }
        );
    }

    #[test]
    fn test_claim_is_test_and_set() {
        let claims = ClaimTable::new(3);
        assert!(!claims.is_claimed(PhotoId::new(1)));
        assert!(claims.try_claim(PhotoId::new(1)));
        assert!(!claims.try_claim(PhotoId::new(1)));
        assert!(claims.is_claimed(PhotoId::new(1)));
        assert_eq!(claims.claimed_count(), 1);
        assert!(!claims.all_claimed());
    }

    #[test]
    fn test_claim_out_of_range() {
        let claims = ClaimTable::new(1);
        assert!(claims.is_claimed(PhotoId::new(3)));
        assert!(!claims.try_claim(PhotoId::new(3)));
        assert_eq!(claims.claimed_count(), 0);
    }

    #[test]
    fn test_concurrent_claims_have_one_winner() {
        let claims = ClaimTable::new(1);
        let winners: usize = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| claims.try_claim(PhotoId::new(0)) as usize))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).sum()
        });
        assert_eq!(winners, 1);
        assert!(claims.all_claimed());
    }
}
