//! Reading frames from disk and writing the denoised result.

mod bmp;
mod ppm;


use std::path::Path;

use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::error::{Error, Result};
use crate::frame::Frame;
use crate::gamma;

pub use bmp::encode_bmp;
pub use ppm::encode_ppm;

/// Encodings the result can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Ppm,
    #[default]
    Bmp,
}

impl OutputFormat {
    /// Picks the format from the last three characters of the path.
    pub fn from_path(path: &Path) -> Option<Self> {
        let path = path.to_string_lossy();
        if path.ends_with("bmp") {
            Some(OutputFormat::Bmp)
        } else if path.ends_with("ppm") {
            Some(OutputFormat::Ppm)
        } else {
            None
        }
    }

    pub fn encode(self, frame: &Frame) -> Vec<u8> {
        match self {
            OutputFormat::Ppm => encode_ppm(frame),
            OutputFormat::Bmp => encode_bmp(frame),
        }
    }
}

/// Loads an 8-bit RGB image and converts it to linear light.
pub fn load_frame<P: AsRef<Path>>(path: P) -> Result<Frame> {
    let path = path.as_ref();
    let image = image::open(path)
        .map_err(|source| Error::Decode {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgb8();

    let (width, height) = image.dimensions();
    let pixels = image
        .as_raw()
        .iter()
        .map(|&value| gamma::to_linear(value))
        .collect();

    tracing::debug!(path = %path.display(), width, height, "Loaded frame");

    Frame::from_pixels(width as usize, height as usize, pixels)
}

/// Encodes `frame` and writes it to `path`.
pub fn write_frame<P: AsRef<Path>>(path: P, frame: &Frame, format: OutputFormat) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, format.encode(frame)).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(path = %path.display(), %format, "Wrote frame");
    Ok(())
}
