//! Outline synthesis around the pixelated foreground

use super::background::BackgroundClassifier;
use crate::color::Color;
use crate::frame::Frame;

/// The fixed color of synthesized outline cells, a dark neutral that stays visible
/// against both the scene background and transparency
pub const OUTLINE_COLOR: Color = Color::rgb(45, 50, 60);

/// The 4-connected neighborhood
const NEIGHBORS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Mark every background cell that borders the foreground with [`OUTLINE_COLOR`].
///
/// Classification is read from the unmodified input grid while all writes go to a
/// separate output buffer, so outline decisions never observe outline pixels written
/// earlier in the same pass. Outline cells are forced fully opaque even when the grid
/// was pixelated with a transparent background. Neighbors outside the grid bounds are
/// skipped, not wrapped.
pub fn add_outline(grid: &Frame, classifier: &BackgroundClassifier) -> Frame {
    let (cols, rows) = grid.get_size();
    let input = grid.pixels();
    let mut output = input.to_vec();

    for y in 0..rows {
        for x in 0..cols {
            if classifier.is_background(input[y * cols + x]) {
                continue;
            }
            for (dx, dy) in NEIGHBORS {
                let nx = x as isize + dx;
                let ny = y as isize + dy;
                if nx < 0 || ny < 0 || nx >= cols as isize || ny >= rows as isize {
                    continue;
                }
                let ni = ny as usize * cols + nx as usize;
                if classifier.is_background(input[ni]) {
                    output[ni] = OUTLINE_COLOR;
                }
            }
        }
    }

    Frame::from_pixels(cols, rows, output)
}
