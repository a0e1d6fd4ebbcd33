//! A frame source which replays captured renderer output from image files

use crate::frame::Frame;
use crate::render::{FrameSource, RendererUnavailableError, RotationAxis};
use anyhow::{anyhow, Context};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Configuration options for an [`ImageDirSource`]
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ImageDirSourceOptions {
    /// The image files to replay, in order.
    ///
    /// Each file holds one full-resolution renderer frame; successive files are treated
    /// as successive rotation steps of the captured scene.
    pub paths: Vec<PathBuf>,
}

/// A frame source backed by image files captured from a real renderer.
///
/// `rotate` advances to the next captured frame (wrapping around at the end) since each
/// capture corresponds to one rotation step; `render` decodes the current file.
#[derive(Debug)]
pub struct ImageDirSource {
    options: ImageDirSourceOptions,
    cursor: usize,
}

/// File extensions that are considered capture frames when scanning a directory
const FRAME_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

impl ImageDirSource {
    /// Create a source replaying exactly the given files in the given order
    pub fn from_paths(paths: Vec<PathBuf>) -> anyhow::Result<Self> {
        if paths.is_empty() {
            return Err(anyhow!("an image sequence needs at least one frame"));
        }
        Ok(Self {
            options: ImageDirSourceOptions { paths },
            cursor: 0,
        })
    }

    /// Create a source replaying all image files inside `dir` in file-name order
    pub fn from_dir(dir: &Path) -> anyhow::Result<Self> {
        let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
            .with_context(|| format!("Could not read frame directory {}", dir.display()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| FRAME_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
                    .unwrap_or(false)
            })
            .collect();
        paths.sort();

        if paths.is_empty() {
            return Err(anyhow!(
                "frame directory {} contains no image files",
                dir.display()
            ));
        }
        tracing::info!("replaying {} captured frames from {}", paths.len(), dir.display());
        Self::from_paths(paths)
    }

    /// How many captured frames this source cycles through
    pub fn frame_count(&self) -> usize {
        self.options.paths.len()
    }
}

#[async_trait]
impl FrameSource for ImageDirSource {
    async fn render(&mut self) -> Result<Frame, RendererUnavailableError> {
        let path = &self.options.paths[self.cursor];
        let image = image::open(path)
            .map_err(|e| {
                RendererUnavailableError::new(format!("could not decode {}: {e}", path.display()))
            })?
            .to_rgba8();
        Frame::from_rgba_bytes(
            image.width() as usize,
            image.height() as usize,
            image.as_raw(),
        )
        .map_err(|e| RendererUnavailableError::new(e.to_string()))
    }

    fn rotate(&mut self, degrees: f64, _axis: RotationAxis) {
        // a capture sequence has no free rotation; any nonzero step advances one frame
        if degrees != 0.0 {
            self.cursor = (self.cursor + 1) % self.options.paths.len();
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::color::Color;

    fn write_frame(path: &Path, color: Color) {
        let frame = Frame::new(4, 4, color).unwrap();
        let buffer =
            image::RgbaImage::from_raw(4, 4, frame.to_rgba_bytes()).unwrap();
        buffer.save(path).unwrap();
    }

    #[tokio::test]
    async fn test_replay_advances_on_rotation() {
        let dir = tempfile::tempdir().unwrap();
        write_frame(&dir.path().join("frame-000.png"), Color::rgb(10, 20, 30));
        write_frame(&dir.path().join("frame-001.png"), Color::rgb(200, 100, 50));

        let mut source = ImageDirSource::from_dir(dir.path()).unwrap();
        assert_eq!(source.frame_count(), 2);

        let first = source.render().await.unwrap();
        assert_eq!(first.get_pixel(0, 0).unwrap(), Color::rgb(10, 20, 30));

        // rendering again without rotating replays the same capture
        assert_eq!(source.render().await.unwrap(), first);

        source.rotate(10.0, RotationAxis::Y);
        let second = source.render().await.unwrap();
        assert_eq!(second.get_pixel(0, 0).unwrap(), Color::rgb(200, 100, 50));

        // the sequence wraps around
        source.rotate(10.0, RotationAxis::Y);
        assert_eq!(source.render().await.unwrap(), first);
    }

    #[test]
    fn test_empty_directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ImageDirSource::from_dir(dir.path()).is_err());
    }
}
