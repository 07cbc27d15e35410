//! Core types for the slideshow kernel.

pub mod tags;
pub mod photo;
pub mod slide;

pub use tags::{Tag, TagSet, intersection_count};
pub use photo::{PhotoId, Orientation, Photo};
pub use slide::{Slide, SlideId, SlidePhotos, SlideError};
