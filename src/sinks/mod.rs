//!
//! Support for writing pipeline output into various sinks
//!

pub mod gif;
pub mod png;
#[cfg(feature = "windowing")]
pub mod window;

use thiserror::Error;

/// An error which indicates that an encoder rejected pipeline output
#[derive(Debug, Error)]
pub enum EncodingFailedError {
    /// The target file could not be created or written
    #[error("could not write the export file: {0}")]
    Io(#[from] std::io::Error),
    /// The underlying encoder rejected the data
    #[error("the encoder rejected the frame data: {0}")]
    Encoder(#[from] image::ImageError),
    /// An export sequence without frames cannot be encoded
    #[error("an export sequence must contain at least one frame")]
    EmptySequence,
    /// A frame's pixel data did not match its dimensions
    #[error("frame pixel data does not match its dimensions")]
    BufferMismatch,
}
