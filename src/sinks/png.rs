//! A sink which encodes single still frames into PNG files

use super::EncodingFailedError;
use crate::frame::Frame;
use image::{ImageFormat, RgbaImage};
use std::path::Path;

/// Encode `frame` into a PNG file at `path`, preserving transparency
pub fn write_png(frame: &Frame, path: &Path) -> Result<(), EncodingFailedError> {
    let (width, height) = frame.get_size();
    let buffer = RgbaImage::from_raw(width as u32, height as u32, frame.to_rgba_bytes())
        .ok_or(EncodingFailedError::BufferMismatch)?;
    buffer.save_with_format(path, ImageFormat::Png)?;
    tracing::info!("wrote {}x{} still to {}", width, height, path.display());
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::color::Color;

    #[test]
    fn test_write_and_reread_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("still.png");

        let mut frame = Frame::new(8, 8, Color::TRANSPARENT).unwrap();
        frame.set_pixel(3, 3, Color::rgb(200, 100, 50)).unwrap();
        write_png(&frame, &path).unwrap();

        let decoded = image::open(&path).unwrap().to_rgba8();
        let restored =
            Frame::from_rgba_bytes(8, 8, decoded.as_raw()).unwrap();
        assert_eq!(restored, frame);
    }
}
