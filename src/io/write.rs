//! Submission writer.
//!
//! ```text
//! S
//! <photoId>              one horizontal slide
//! <photoId> <photoId>    one vertical slide
//! ```
//!
//! `S` is the number of slide lines that follow.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::types::Slide;

/// Write `slides` in submission format.
pub fn write_slides<W: Write>(mut out: W, slides: &[Slide]) -> std::io::Result<()> {
    writeln!(out, "{}", slides.len())?;
    for slide in slides {
        writeln!(out, "{}", slide.id())?;
    }
    out.flush()
}

/// Create (or truncate) `path` and write `slides` to it.
pub fn write_output_file(path: impl AsRef<Path>, slides: &[Slide]) -> std::io::Result<()> {
    let file = File::create(path.as_ref())?;
    write_slides(BufWriter::new(file), slides)?;
    tracing::debug!(path = %path.as_ref().display(), slides = slides.len(), "Wrote slideshow");
    Ok(())
}
