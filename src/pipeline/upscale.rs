//! Nearest-neighbor upscaling of the coarse grid to display or export resolution

use crate::frame::{Frame, InvalidSizeError};

/// Scale `grid` up to `target_width` × `target_height` by nearest-neighbor replication.
///
/// The target pixel at `(x, y)` takes the color of the source cell at
/// `(x * cols / target_width, y * rows / target_height)`. No smoothing of any kind
/// happens so the hard block edges of the coarse grid survive.
pub fn upscale(
    grid: &Frame,
    target_width: usize,
    target_height: usize,
) -> Result<Frame, InvalidSizeError> {
    if target_width == 0 || target_height == 0 {
        return Err(InvalidSizeError::new(
            (target_width, target_height),
            "target dimensions must both be greater than 0",
        ));
    }

    let (cols, rows) = grid.get_size();
    let cells = grid.pixels();

    // precompute the column mapping, it is identical for every row
    let col_map: Vec<usize> = (0..target_width).map(|x| (x * cols) / target_width).collect();

    let mut data = Vec::with_capacity(target_width * target_height);
    for y in 0..target_height {
        let sy = (y * rows) / target_height;
        let row = &cells[sy * cols..(sy + 1) * cols];
        data.extend(col_map.iter().map(|sx| row[*sx]));
    }

    Ok(Frame::from_pixels(target_width, target_height, data))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::color::Color;

    #[test]
    fn test_zero_target_dimensions_are_rejected() {
        let grid = Frame::new(4, 4, Color::TRANSPARENT).unwrap();
        assert!(upscale(&grid, 0, 16).is_err());
        assert!(upscale(&grid, 16, 0).is_err());
    }

    #[test]
    fn test_each_cell_becomes_a_block() {
        let mut grid = Frame::new(2, 2, Color::rgb(10, 10, 10)).unwrap();
        let marker = Color::rgb(200, 100, 50);
        grid.set_pixel(1, 0, marker).unwrap();

        let scaled = upscale(&grid, 8, 8).unwrap();
        for y in 0..8 {
            for x in 0..8 {
                let expected = if x >= 4 && y < 4 { marker } else { Color::rgb(10, 10, 10) };
                assert_eq!(scaled.get_pixel(x, y).unwrap(), expected, "pixel ({x},{y})");
            }
        }
    }

    #[test]
    fn test_identity_when_sizes_match() {
        let mut grid = Frame::new(3, 3, Color::TRANSPARENT).unwrap();
        grid.set_pixel(1, 2, Color::rgb(9, 8, 7)).unwrap();
        let scaled = upscale(&grid, 3, 3).unwrap();
        assert_eq!(scaled, grid);
    }
}
