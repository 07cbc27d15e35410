//! Dataset files: photo lists in, slide lists out.

pub mod parse;
pub mod write;

pub use parse::{parse_dataset, read_dataset, ParseError};
pub use write::{write_output_file, write_slides};
