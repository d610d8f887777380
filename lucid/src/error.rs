//! Error types for frame handling, statistics and I/O.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::frame::Dimensions;

/// Errors that abort a denoising run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Cannot create a frame with null dimensions {width}x{height}")]
    EmptyDimensions { width: usize, height: usize },

    #[error("Pixel buffer of {actual} values does not match {expected} for the frame dimensions")]
    PixelCountMismatch { expected: usize, actual: usize },

    #[error("No frames provided")]
    NoFrames,

    #[error("Dimension mismatch for frame {index}: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        index: usize,
        expected: Dimensions,
        actual: Dimensions,
    },

    #[error("Failed to decode image '{path}': {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to write image '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read config '{path}': {message}")]
    Config { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
