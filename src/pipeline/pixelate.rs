//! Downsampling of a source frame into the coarse pixel-art grid

use super::PixelationOptions;
use crate::color::Color;
use crate::frame::Frame;
use thiserror::Error;

/// An error which indicates that a requested cell size cannot produce a coarse grid
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
#[error("a cell size of 0 cannot produce a coarse grid")]
pub struct InvalidCellSizeError;

/// Downsample `source` to a coarse grid of `ceil(width / cell_size)` ×
/// `ceil(height / cell_size)` cells.
///
/// Each cell takes the color of a single nearest-neighbor sample at its top-left source
/// pixel. No averaging happens; the sharp blocks are the point. Cells whose sample
/// classifies as background are cleared to fully transparent black when
/// `transparent_background` is set and left unchanged otherwise.
///
/// This is a total, one-pass function over all cells.
pub fn pixelate(source: &Frame, opts: &PixelationOptions) -> Result<Frame, InvalidCellSizeError> {
    if opts.cell_size == 0 {
        return Err(InvalidCellSizeError);
    }

    let (width, height) = source.get_size();
    let cols = width.div_ceil(opts.cell_size);
    let rows = height.div_ceil(opts.cell_size);

    let source_pixels = source.pixels();
    let mut cells = Vec::with_capacity(cols * rows);
    for cy in 0..rows {
        for cx in 0..cols {
            // the top-left pixel of a cell is always inside the source frame
            let sample = source_pixels[(cy * opts.cell_size) * width + cx * opts.cell_size];
            if opts.transparent_background && opts.background.is_background(sample) {
                cells.push(Color::TRANSPARENT);
            } else {
                cells.push(sample);
            }
        }
    }

    Ok(Frame::from_pixels(cols, rows, cells))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::pipeline::background::{BackgroundClassifier, DEFAULT_BACKGROUND};

    fn opts(cell_size: usize, transparent_background: bool) -> PixelationOptions {
        PixelationOptions {
            cell_size,
            transparent_background,
            background: BackgroundClassifier::default(),
        }
    }

    #[test]
    fn test_zero_cell_size_is_rejected() {
        let frame = Frame::new(10, 10, DEFAULT_BACKGROUND).unwrap();
        assert!(pixelate(&frame, &opts(0, false)).is_err());
    }

    #[test]
    fn test_grid_dimensions_round_up() {
        let frame = Frame::new(10, 7, DEFAULT_BACKGROUND).unwrap();
        let grid = pixelate(&frame, &opts(3, false)).unwrap();
        assert_eq!(grid.get_size(), (4, 3));
    }

    #[test]
    fn test_uniform_background_becomes_fully_transparent() {
        let frame = Frame::new(60, 60, DEFAULT_BACKGROUND).unwrap();
        let grid = pixelate(&frame, &opts(6, true)).unwrap();
        assert!(grid.pixels().iter().all(|c| c.alpha() == 0));
    }

    #[test]
    fn test_opaque_mode_keeps_background_colors() {
        let frame = Frame::new(60, 60, DEFAULT_BACKGROUND).unwrap();
        let grid = pixelate(&frame, &opts(6, false)).unwrap();
        assert!(grid.pixels().iter().all(|c| *c == DEFAULT_BACKGROUND));
    }

    #[test]
    fn test_cells_sample_their_top_left_pixel() {
        let mut frame = Frame::new(8, 8, DEFAULT_BACKGROUND).unwrap();
        let marker = Color::rgb(250, 120, 30);
        // marker at a cell's top-left corner is picked up, elsewhere it is ignored
        frame.set_pixel(4, 4, marker).unwrap();
        frame.set_pixel(1, 1, Color::rgb(1, 200, 1)).unwrap();
        let grid = pixelate(&frame, &opts(4, false)).unwrap();
        assert_eq!(grid.get_pixel(1, 1).unwrap(), marker);
        assert_eq!(grid.get_pixel(0, 0).unwrap(), DEFAULT_BACKGROUND);
    }
}
