//! A sink which encodes an export sequence into a looping animated GIF file

use super::EncodingFailedError;
use crate::orchestrator::ExportSequence;
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame as EncoderFrame, RgbaImage};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Encode `sequence` into an infinitely looping GIF at `path`.
///
/// Every frame keeps its own delay and the fully transparent color survives as GIF
/// transparency. The file is only produced from a complete sequence; an empty one is
/// rejected instead of writing an empty animation.
pub fn write_gif(sequence: &ExportSequence, path: &Path) -> Result<(), EncodingFailedError> {
    if sequence.is_empty() {
        return Err(EncodingFailedError::EmptySequence);
    }

    tracing::info!(
        "encoding {} frames into animated gif {}",
        sequence.len(),
        path.display()
    );

    let file = File::create(path)?;
    let mut encoder = GifEncoder::new(BufWriter::new(file));
    encoder.set_repeat(Repeat::Infinite)?;

    for export_frame in sequence {
        let (width, height) = export_frame.bitmap.get_size();
        let buffer = RgbaImage::from_raw(
            width as u32,
            height as u32,
            export_frame.bitmap.to_rgba_bytes(),
        )
        .ok_or(EncodingFailedError::BufferMismatch)?;
        let delay = Delay::from_numer_denom_ms(export_frame.delay_ms, 1);
        encoder.encode_frame(EncoderFrame::from_parts(buffer, 0, 0, delay))?;
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::color::Color;
    use crate::frame::Frame;
    use crate::orchestrator::ExportFrame;

    fn sequence_of(count: usize) -> ExportSequence {
        (0..count)
            .map(|i| ExportFrame {
                bitmap: Frame::new(16, 16, Color::rgb(i as u8 * 20, 10, 200)).unwrap(),
                delay_ms: 50,
            })
            .collect()
    }

    #[test]
    fn test_write_and_reread_gif() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.gif");

        write_gif(&sequence_of(3), &path).unwrap();

        let format = image::ImageFormat::from_path(&path).unwrap();
        assert_eq!(format, image::ImageFormat::Gif);
        let decoded = image::open(&path).unwrap();
        assert_eq!(decoded.width(), 16);
        assert_eq!(decoded.height(), 16);
    }

    #[test]
    fn test_empty_sequence_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.gif");
        assert!(matches!(
            write_gif(&Vec::new(), &path),
            Err(EncodingFailedError::EmptySequence)
        ));
        assert!(!path.exists());
    }
}
