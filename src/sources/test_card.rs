//! A procedural frame source for exercising the pipeline without a renderer

use crate::color::Color;
use crate::frame::Frame;
use crate::palette;
use crate::pipeline::background::DEFAULT_BACKGROUND;
use crate::render::{ColorFunc, FrameSource, RendererUnavailableError, RotationAxis};
use async_trait::async_trait;

/// Configuration options for a [`TestCardSource`]
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct TestCardOptions {
    /// Edge length of the produced square frames
    pub size: usize,
    /// Edge length of the centered subject square
    pub subject_extent: usize,
    /// The uniform clear color around the subject
    pub background: Color,
    /// Flat subject color, used when no colorfunc is registered
    pub subject_color: Color,
}

impl Default for TestCardOptions {
    fn default() -> Self {
        Self {
            size: 600,
            subject_extent: 200,
            background: DEFAULT_BACKGROUND,
            subject_color: Color::rgb(136, 86, 167),
        }
    }
}

/// A frame source that draws a flat, centered subject square over a uniform background.
///
/// The card is two-dimensional, so only in-plane rotation (around [`RotationAxis::Z`])
/// is observable; rotation around the other axes is accepted and ignored. When a
/// colorfunc is registered, the subject is striped column-wise as if each column were
/// one residue of a chain, which makes palette ramps visible end-to-end.
pub struct TestCardSource {
    options: TestCardOptions,
    rotation_degrees: f64,
    colorfunc: Option<ColorFunc>,
}

impl std::fmt::Debug for TestCardSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestCardSource")
            .field("options", &self.options)
            .field("rotation_degrees", &self.rotation_degrees)
            .field("colorfunc", &self.colorfunc.as_ref().map(|_| "..."))
            .finish()
    }
}

impl TestCardSource {
    /// Create a new test card source
    pub fn new(options: TestCardOptions) -> Self {
        Self {
            options,
            rotation_degrees: 0.0,
            colorfunc: None,
        }
    }

    /// Whether the (inverse-rotated) pixel center lies inside the subject square
    fn contains(&self, x: usize, y: usize) -> bool {
        let center = self.options.size as f64 / 2.0;
        let (sin, cos) = self.rotation_degrees.to_radians().sin_cos();
        let dx = x as f64 + 0.5 - center;
        let dy = y as f64 + 0.5 - center;
        let rx = dx * cos + dy * sin;
        let ry = -dx * sin + dy * cos;
        let half = self.options.subject_extent as f64 / 2.0;
        rx.abs() <= half && ry.abs() <= half
    }

    /// The subject color of a pixel, striped by column when a colorfunc is registered
    fn subject_color_at(&self, x: usize) -> Color {
        match &self.colorfunc {
            None => self.options.subject_color,
            Some(colorfunc) => {
                let origin = self.options.size.saturating_sub(self.options.subject_extent) / 2;
                let resi = x
                    .saturating_sub(origin)
                    .min(self.options.subject_extent.saturating_sub(1));
                colorfunc(resi as i32, "A")
            }
        }
    }
}

#[async_trait]
impl FrameSource for TestCardSource {
    async fn render(&mut self) -> Result<Frame, RendererUnavailableError> {
        let size = self.options.size;
        let mut frame = Frame::new(size, size, self.options.background)
            .map_err(|e| RendererUnavailableError::new(e.to_string()))?;
        for y in 0..size {
            for x in 0..size {
                if self.contains(x, y) {
                    let color = self.subject_color_at(x);
                    frame
                        .set_pixel(x, y, color)
                        .map_err(|e| RendererUnavailableError::new(e.to_string()))?;
                }
            }
        }
        Ok(frame)
    }

    fn rotate(&mut self, degrees: f64, axis: RotationAxis) {
        match axis {
            RotationAxis::Z => self.rotation_degrees = (self.rotation_degrees + degrees) % 360.0,
            RotationAxis::X | RotationAxis::Y => {
                tracing::debug!("ignoring out-of-plane rotation of the flat test card");
            }
        }
    }

    fn register_colorfunc(&mut self, colorfunc: ColorFunc) {
        self.colorfunc = Some(colorfunc);
    }
}

/// Build a colorfunc that colors a chain of `residue_count` residues through `palette`
pub fn sequence_colorfunc(palette: &'static palette::Palette, residue_count: usize) -> ColorFunc {
    let max_resi = residue_count.saturating_sub(1) as i32;
    std::sync::Arc::new(move |resi, _chain| palette::residue_color(palette, resi, 0, max_resi))
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test]
    async fn test_static_card_renders_identically() {
        let mut source = TestCardSource::new(TestCardOptions::default());
        let first = source.render().await.unwrap();
        let second = source.render().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_subject_sits_on_uniform_background() {
        let options = TestCardOptions {
            size: 100,
            subject_extent: 20,
            ..TestCardOptions::default()
        };
        let mut source = TestCardSource::new(options);
        let frame = source.render().await.unwrap();
        assert_eq!(frame.get_pixel(50, 50).unwrap(), options.subject_color);
        assert_eq!(frame.get_pixel(0, 0).unwrap(), options.background);
        assert_eq!(frame.get_pixel(99, 99).unwrap(), options.background);
    }

    #[tokio::test]
    async fn test_colorfunc_stripes_the_subject() {
        let palette = crate::palette::lookup("viridis").unwrap();
        let mut source = TestCardSource::new(TestCardOptions {
            size: 100,
            subject_extent: 20,
            ..TestCardOptions::default()
        });
        source.register_colorfunc(sequence_colorfunc(palette, 20));
        let frame = source.render().await.unwrap();
        // leftmost subject column is the chain start, rightmost the chain end
        assert_eq!(frame.get_pixel(40, 50).unwrap(), palette.sample(0.0));
        assert_eq!(frame.get_pixel(59, 50).unwrap(), palette.sample(1.0));
    }
}
