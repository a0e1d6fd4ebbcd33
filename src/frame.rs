//!
//! The raster buffer type which all pipeline stages consume and produce
//!

use crate::color::Color;
use itertools::Itertools;
use thiserror::Error;

/// A width×height grid of RGBA colors with its origin in the top-left corner.
///
/// A frame is exclusively owned by the pipeline invocation that works on it.
/// There is no interior mutability and no sharing; mutation goes through `&mut self`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Frame {
    data: Vec<Color>,
    width: usize,
    height: usize,
}

/// An error which indicates that invalid coordinates could not be accessed
#[derive(Debug, Error, Copy, Clone)]
#[error("Could not access invalid coordinates {}x{} on frame of size {}x{}", .target.0, .target.1, .frame_size.0, .frame_size.1)]
pub struct InvalidCoordinatesError {
    target: (usize, usize),
    frame_size: (usize, usize),
}

/// An error which indicates that a frame of a given size cannot be constructed
#[derive(Debug, Error, Copy, Clone)]
#[error("Given size {}x{} is not valid for constructing a frame: {details}", .size.0, .size.1)]
pub struct InvalidSizeError {
    size: (usize, usize),
    details: &'static str,
}

impl InvalidSizeError {
    pub(crate) fn new(size: (usize, usize), details: &'static str) -> Self {
        Self { size, details }
    }
}

impl Frame {
    /// Create a new frame with the specified dimensions, filled with the given color
    pub fn new(width: usize, height: usize, fill: Color) -> Result<Self, InvalidSizeError> {
        if width == 0 || height == 0 {
            return Err(InvalidSizeError {
                size: (width, height),
                details: "Width and Height must both be greater than 0",
            });
        }

        Ok(Self {
            data: vec![fill; width * height],
            width,
            height,
        })
    }

    /// Reconstruct a frame from a flat `r,g,b,a` byte stream in row-major order
    pub fn from_rgba_bytes(
        width: usize,
        height: usize,
        bytes: &[u8],
    ) -> Result<Self, InvalidSizeError> {
        if width == 0 || height == 0 {
            return Err(InvalidSizeError {
                size: (width, height),
                details: "Width and Height must both be greater than 0",
            });
        }
        if bytes.len() != width * height * 4 {
            return Err(InvalidSizeError {
                size: (width, height),
                details: "byte data does not match the requested dimensions",
            });
        }

        let data = bytes
            .iter()
            .copied()
            .tuples::<(_, _, _, _)>()
            .map(|(r, g, b, a)| Color(r, g, b, a))
            .collect();
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Construct a frame directly from row-major pixel data.
    ///
    /// Callers must pass exactly `width * height` pixels.
    pub(crate) fn from_pixels(width: usize, height: usize, data: Vec<Color>) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self {
            data,
            width,
            height,
        }
    }

    /// Get the size of this frame as `(width, height)` tuple
    pub fn get_size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// The width of this frame in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// The height of this frame in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the color value of the pixel at position (x,y)
    pub fn get_pixel(&self, x: usize, y: usize) -> Result<Color, InvalidCoordinatesError> {
        if x >= self.width {
            return Err(self.coordinate_error(x, y));
        }
        match self.data.get(y * self.width + x) {
            None => Err(self.coordinate_error(x, y)),
            Some(color) => Ok(*color),
        }
    }

    /// Set the pixel value at position (x,y) to the specified color
    pub fn set_pixel(
        &mut self,
        x: usize,
        y: usize,
        color: Color,
    ) -> Result<(), InvalidCoordinatesError> {
        if x >= self.width {
            return Err(self.coordinate_error(x, y));
        }
        match self.data.get_mut(y * self.width + x) {
            None => Err(self.coordinate_error(x, y)),
            Some(stored_color) => {
                *stored_color = color;
                Ok(())
            }
        }
    }

    fn coordinate_error(&self, x: usize, y: usize) -> InvalidCoordinatesError {
        InvalidCoordinatesError {
            target: (x, y),
            frame_size: self.get_size(),
        }
    }

    /// All pixel data of this frame in row-major order
    pub fn pixels(&self) -> &[Color] {
        &self.data
    }

    /// Encode the pixel data as a flat `r,g,b,a` byte stream in row-major order
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.data
            .iter()
            .flat_map(|c| Into::<[u8; 4]>::into(*c))
            .collect()
    }
}
