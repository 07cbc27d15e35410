//! Slides: one horizontal photo or a pair of vertical photos.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::photo::{Orientation, Photo, PhotoId};
use super::tags::TagSet;

/// Error raised when photos cannot form a slide.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlideError {
    /// A single-photo slide needs a horizontal photo.
    #[error("Photo {0} is not horizontal")]
    NotHorizontal(PhotoId),
    /// Only vertical photos can be paired.
    #[error("Photo {0} is not vertical")]
    NotVertical(PhotoId),
    /// A vertical pair needs two distinct photos.
    #[error("Photo {0} cannot be paired with itself")]
    SamePhoto(PhotoId),
}

/// Constituent photos of a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlidePhotos {
    /// One horizontal photo.
    Single(PhotoId),
    /// Two vertical photos, in the order they were chosen.
    Pair(PhotoId, PhotoId),
}

impl SlidePhotos {
    /// Photo ids in slide order.
    pub fn ids(&self) -> Vec<PhotoId> {
        match *self {
            Self::Single(a) => vec![a],
            Self::Pair(a, b) => vec![a, b],
        }
    }

    /// First photo of the slide.
    pub fn first(&self) -> PhotoId {
        match *self {
            Self::Single(a) | Self::Pair(a, _) => a,
        }
    }
}

/// Textual slide key, as written to output files (`"3"` or `"4 9"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlideId(String);

impl SlideId {
    /// Get as string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SlideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A displayed slide.
///
/// Immutable once built. The tag set of a vertical slide is the union of
/// both photos' tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Slide {
    photos: SlidePhotos,
    tags: TagSet,
}

impl Slide {
    /// Build a slide holding one horizontal photo.
    pub fn horizontal(photo: &Photo) -> Result<Self, SlideError> {
        if !photo.is_horizontal() {
            return Err(SlideError::NotHorizontal(photo.id));
        }
        Ok(Self {
            photos: SlidePhotos::Single(photo.id),
            tags: photo.tags.clone(),
        })
    }

    /// Build a slide from two distinct vertical photos.
    pub fn vertical(first: &Photo, second: &Photo) -> Result<Self, SlideError> {
        for photo in [first, second] {
            if !photo.is_vertical() {
                return Err(SlideError::NotVertical(photo.id));
            }
        }
        if first.id == second.id {
            return Err(SlideError::SamePhoto(first.id));
        }
        Ok(Self {
            photos: SlidePhotos::Pair(first.id, second.id),
            tags: first.tags.union(&second.tags),
        })
    }

    /// Constituent photos.
    pub fn photos(&self) -> SlidePhotos {
        self.photos
    }

    /// Constituent photo ids in slide order.
    pub fn photo_ids(&self) -> Vec<PhotoId> {
        self.photos.ids()
    }

    /// Slide tags.
    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    /// Orientation shared by the constituent photos.
    pub fn orientation(&self) -> Orientation {
        match self.photos {
            SlidePhotos::Single(_) => Orientation::Horizontal,
            SlidePhotos::Pair(..) => Orientation::Vertical,
        }
    }

    /// Output key for this slide.
    pub fn id(&self) -> SlideId {
        let key = match self.photos {
            SlidePhotos::Single(a) => a.to_string(),
            SlidePhotos::Pair(a, b) => format!("{} {}", a, b),
        };
        SlideId(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo(id: usize, orientation: Orientation, tags: &[u64]) -> Photo {
        Photo::new(PhotoId::new(id), orientation, TagSet::new(tags.iter().copied()))
    }

    #[test]
    fn test_horizontal_slide() {
        let p = photo(3, Orientation::Horizontal, &[2, 1]);
        let slide = Slide::horizontal(&p).unwrap();
        assert_eq!(slide.id().as_str(), "3");
        assert_eq!(slide.tags().as_slice(), &[1, 2]);
        assert_eq!(slide.orientation(), Orientation::Horizontal);
        assert_eq!(slide.photo_ids(), vec![PhotoId::new(3)]);
    }

    #[test]
    fn test_vertical_slide_unions_tags() {
        let a = photo(4, Orientation::Vertical, &[1, 2]);
        let b = photo(9, Orientation::Vertical, &[2, 3]);
        let slide = Slide::vertical(&a, &b).unwrap();
        assert_eq!(slide.id().as_str(), "4 9");
        assert_eq!(slide.tags().as_slice(), &[1, 2, 3]);
        assert_eq!(slide.photos(), SlidePhotos::Pair(PhotoId::new(4), PhotoId::new(9)));
    }

    #[test]
    fn test_orientation_mismatch_rejected() {
        let h = photo(0, Orientation::Horizontal, &[1]);
        let v = photo(1, Orientation::Vertical, &[1]);
        assert_eq!(Slide::horizontal(&v), Err(SlideError::NotHorizontal(PhotoId::new(1))));
        assert_eq!(Slide::vertical(&v, &h), Err(SlideError::NotVertical(PhotoId::new(0))));
        assert_eq!(Slide::vertical(&v, &v), Err(SlideError::SamePhoto(PhotoId::new(1))));
    }
}
