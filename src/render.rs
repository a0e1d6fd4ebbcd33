//!
//! The boundary contract between the pipeline and the external 3D renderer
//!
//! The renderer itself (camera, geometry, lighting, structure parsing) lives outside of
//! this crate. Everything the pipeline needs from it is captured by [`FrameSource`]:
//! produce an RGBA frame on demand, rotate the scene, and accept a per-residue coloring
//! callback once per structure load.
//!

use crate::color::Color;
use crate::frame::Frame;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Axis around which a renderer can rotate its scene
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RotationAxis {
    /// The horizontal screen axis
    X,
    /// The vertical screen axis
    Y,
    /// The view axis
    Z,
}

/// A per-residue coloring callback, mapping `(residue index, chain id)` to a color.
///
/// Implementations must be stateless apart from the immutable data they capture
/// (palette and residue index bounds); see [`crate::palette::residue_color`].
pub type ColorFunc = Arc<dyn Fn(i32, &str) -> Color + Send + Sync>;

/// An error which indicates that the external renderer failed to produce a frame
#[derive(Debug, Error, Clone)]
#[error("the external renderer could not produce a frame: {reason}")]
pub struct RendererUnavailableError {
    reason: String,
}

impl RendererUnavailableError {
    /// Create a new error carrying the renderer's failure reason
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Something that produces full-resolution RGBA frames of a (rotatable) scene.
///
/// Rendering is asynchronous because a frame may require waiting for the external
/// renderer to complete a draw; callers awaiting [`FrameSource::render`] are at the
/// cooperative suspension point between frames.
#[async_trait]
pub trait FrameSource {
    /// Produce the next frame of the scene in its current orientation
    async fn render(&mut self) -> Result<Frame, RendererUnavailableError>;

    /// Rotate the scene by the given angle around the given axis
    fn rotate(&mut self, degrees: f64, axis: RotationAxis);

    /// Register the coloring callback used while styling the structure.
    ///
    /// Sources that do not style anything themselves (e.g. replayed captures) keep the
    /// default no-op.
    fn register_colorfunc(&mut self, _colorfunc: ColorFunc) {}
}

#[async_trait]
impl<T: FrameSource + ?Sized + Send> FrameSource for Box<T> {
    async fn render(&mut self) -> Result<Frame, RendererUnavailableError> {
        (**self).render().await
    }

    fn rotate(&mut self, degrees: f64, axis: RotationAxis) {
        (**self).rotate(degrees, axis);
    }

    fn register_colorfunc(&mut self, colorfunc: ColorFunc) {
        (**self).register_colorfunc(colorfunc);
    }
}
