#![deny(trivial_casts)]
#![warn(
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
    missing_docs,
    missing_debug_implementations,
    unused_import_braces,
    unused_lifetimes,
    unused_qualifications
)]

//!
//! Pixelmol turns full-resolution frames of a 3D molecular structure viewer into coarse,
//! outlined, optionally transparent pixel-art bitmaps and looping animations.
//!
//! The crate deliberately does not render any 3D geometry itself.
//! An external renderer produces RGBA [`Frame`]s through the [`render::FrameSource`] contract,
//! and this library downsamples, classifies, outlines and upscales them ([`pipeline`]),
//! colors structures by sequence position ([`palette`]),
//! and drives preview and export loops ([`orchestrator`]) whose results are written by [`sinks`].
//!

#[cfg(test)]
#[macro_use]
extern crate quickcheck;

mod color;
mod daemon_task;
mod frame;
pub mod orchestrator;
pub mod palette;
pub mod pipeline;
pub mod render;
pub mod sinks;
pub mod sources;

pub use color::Color;
pub use daemon_task::DaemonHandle;
pub use frame::{Frame, InvalidCoordinatesError, InvalidSizeError};
