//! Photograph types.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::tags::TagSet;

/// Stable 0-based photograph index, assigned at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoId(usize);

impl PhotoId {
    /// Create a PhotoId from a registry position.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Registry position of this photo.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for PhotoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for PhotoId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

/// Photograph orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Shown alone on a slide.
    Horizontal,
    /// Must share a slide with exactly one other vertical photo.
    Vertical,
}

impl Orientation {
    /// Parse the single-letter token used in dataset files (`H` or `V`).
    pub fn from_token(s: &str) -> Option<Self> {
        match s {
            "H" => Some(Self::Horizontal),
            "V" => Some(Self::Vertical),
            _ => None,
        }
    }

    /// Token used in dataset files.
    pub fn as_token(&self) -> &'static str {
        match self {
            Self::Horizontal => "H",
            Self::Vertical => "V",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

/// An immutable photograph record.
///
/// Whether a photo has been used by a slide is tracked by the
/// [`ClaimTable`](crate::registry::ClaimTable) of the running assembly, not
/// here, so a registry can be shared by several runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    /// Registry position.
    pub id: PhotoId,
    /// Horizontal or vertical.
    pub orientation: Orientation,
    /// Normalized tags.
    pub tags: TagSet,
}

impl Photo {
    /// Create a new photo.
    pub fn new(id: PhotoId, orientation: Orientation, tags: TagSet) -> Self {
        Self {
            id,
            orientation,
            tags,
        }
    }

    /// Whether this photo is horizontal.
    pub fn is_horizontal(&self) -> bool {
        self.orientation == Orientation::Horizontal
    }

    /// Whether this photo is vertical.
    pub fn is_vertical(&self) -> bool {
        self.orientation == Orientation::Vertical
    }
}
