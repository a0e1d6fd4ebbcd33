//!
//! Frame sources usable without a running 3D engine
//!

mod image_dir;
mod test_card;

pub use image_dir::{ImageDirSource, ImageDirSourceOptions};
pub use test_card::{sequence_colorfunc, TestCardOptions, TestCardSource};
