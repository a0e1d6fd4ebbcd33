//!
//! The deterministic image-processing pipeline
//!
//! One pipeline invocation takes a full-resolution RGBA frame from the external renderer
//! and produces the final pixel-art bitmap in three stages:
//! [`pixelate`] downsamples to the coarse grid and optionally clears the background to
//! transparency, [`add_outline`] draws the pixel-art edge, and [`upscale`] replicates the
//! grid back to display or export resolution. Every stage is a pure transform over
//! exclusively owned buffers; the intermediate coarse grid is discarded afterwards.
//!

pub mod background;
pub mod cell_size;
mod outline;
mod pixelate;
mod upscale;

pub use background::BackgroundClassifier;
pub use cell_size::choose_cell_size;
pub use outline::{add_outline, OUTLINE_COLOR};
pub use pixelate::{pixelate, InvalidCellSizeError};
pub use upscale::upscale;

use crate::frame::{Frame, InvalidSizeError};
use thiserror::Error;

/// Options for one pipelined pixelation invocation
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct PixelationOptions {
    /// Side length of one coarse-grid cell in source pixels
    pub cell_size: usize,

    /// Whether background cells should be cleared to full transparency
    pub transparent_background: bool,

    /// How cells are classified as background
    pub background: BackgroundClassifier,
}

/// An error raised by one of the pipeline stages.
///
/// These always indicate a caller contract violation, not a runtime condition.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The requested cell size cannot produce a coarse grid
    #[error(transparent)]
    InvalidCellSize(#[from] InvalidCellSizeError),
    /// The requested target dimensions cannot produce a frame
    #[error(transparent)]
    InvalidSize(#[from] InvalidSizeError),
}

/// Run the full pixelate → outline → upscale pipeline over one source frame
pub fn run_pipeline(
    source: &Frame,
    opts: &PixelationOptions,
    target_width: usize,
    target_height: usize,
) -> Result<Frame, PipelineError> {
    let coarse = pixelate(source, opts)?;
    let outlined = add_outline(&coarse, &opts.background);
    Ok(upscale(&outlined, target_width, target_height)?)
}
