//! Normalized tag sets.
//!
//! A `TagSet` is the sorted, deduplicated integer form of a photograph's
//! labels. Keeping every set normalized lets overlap be computed with a
//! single linear merge instead of hashing.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::canonical::hash_tag;

/// A normalized label.
pub type Tag = u64;

/// Ascending, duplicate-free sequence of tags.
///
/// Every constructor normalizes its input, so the invariant holds for all
/// values of this type (including deserialized ones).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Tag>", into = "Vec<Tag>")]
pub struct TagSet(Vec<Tag>);

impl TagSet {
    /// Build a tag set from arbitrary tags (sorted and deduplicated here).
    pub fn new(tags: impl IntoIterator<Item = Tag>) -> Self {
        let mut tags: Vec<Tag> = tags.into_iter().collect();
        tags.sort_unstable();
        tags.dedup();
        Self(tags)
    }

    /// Build a tag set from textual labels, hashing each one.
    ///
    /// # Example
    ///
    /// ```rust
    /// use slideshow_kernel::TagSet;
    ///
    /// let a = TagSet::from_labels(["cat", "beach", "cat"]);
    /// assert_eq!(a.len(), 2);
    /// ```
    pub fn from_labels<S: AsRef<str>>(labels: impl IntoIterator<Item = S>) -> Self {
        Self::new(labels.into_iter().map(|l| hash_tag(l.as_ref())))
    }

    /// Number of distinct tags.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set has no tags.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sorted tags.
    pub fn as_slice(&self) -> &[Tag] {
        &self.0
    }

    /// Number of tags shared with `other`.
    pub fn intersection_count(&self, other: &TagSet) -> usize {
        intersection_count(&self.0, &other.0)
    }

    /// Sorted, deduplicated union of both sets.
    pub fn union(&self, other: &TagSet) -> TagSet {
        let (a, b) = (&self.0, &other.0);
        let mut out = Vec::with_capacity(a.len() + b.len());
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            match a[i].cmp(&b[j]) {
                Ordering::Less => {
                    out.push(a[i]);
                    i += 1;
                }
                Ordering::Greater => {
                    out.push(b[j]);
                    j += 1;
                }
                Ordering::Equal => {
                    out.push(a[i]);
                    i += 1;
                    j += 1;
                }
            }
        }
        out.extend_from_slice(&a[i..]);
        out.extend_from_slice(&b[j..]);
        TagSet(out)
    }
}

impl From<Vec<Tag>> for TagSet {
    fn from(tags: Vec<Tag>) -> Self {
        Self::new(tags)
    }
}

impl From<TagSet> for Vec<Tag> {
    fn from(set: TagSet) -> Self {
        set.0
    }
}

impl FromIterator<Tag> for TagSet {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// Count common elements of two sorted, deduplicated slices.
///
/// Two-cursor merge walk: the cursor on the smaller value advances, or both
/// advance on equality. Runs in `O(a.len() + b.len())`. The result is
/// meaningless if either input is unsorted or has duplicates.
pub fn intersection_count(a: &[Tag], b: &[Tag]) -> usize {
    let (mut i, mut j, mut count) = (0, 0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                count += 1;
                i += 1;
                j += 1;
            }
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sorts_and_dedups() {
        let set = TagSet::new([5, 1, 3, 1, 5]);
        assert_eq!(set.as_slice(), &[1, 3, 5]);
    }

    #[test]
    fn test_intersection_count_basic() {
        assert_eq!(intersection_count(&[1, 2, 3], &[2, 3, 4]), 2);
        assert_eq!(intersection_count(&[1, 2, 3], &[4, 5]), 0);
        assert_eq!(intersection_count(&[], &[1]), 0);
        assert_eq!(intersection_count(&[7], &[7]), 1);
    }

    #[test]
    fn test_union_is_sorted_and_unique() {
        let a = TagSet::new([1, 2, 9]);
        let b = TagSet::new([2, 3, 10]);
        assert_eq!(a.union(&b).as_slice(), &[1, 2, 3, 9, 10]);
        assert_eq!(a.union(&TagSet::default()), a);
    }

    #[test]
    fn test_from_labels_hashes_consistently() {
        let a = TagSet::from_labels(["garden", "selfie"]);
        let b = TagSet::from_labels(["selfie", "garden", "garden"]);
        assert_eq!(a, b);
        assert!(a.as_slice().contains(&hash_tag("garden")));
        assert!(!a.as_slice().contains(&hash_tag("beach")));
    }

    #[test]
    fn test_deserialize_normalizes() {
        let set: TagSet = serde_json::from_str("[4, 2, 4, 1]").unwrap();
        assert_eq!(set.as_slice(), &[1, 2, 4]);
    }
}
