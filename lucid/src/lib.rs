//! Lucid - denoising of Monte-Carlo render sequences.
//!
//! N renders of the same scene are summarized per pixel and channel into
//! cross-frame statistics ([`SampleSet`]), and a spatio-temporal filter
//! ([`filter`]) blends each pixel with the samples of similar neighbors.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use lucid::{filter, load_frame, write_frame, FilterConfig, OutputFormat, SampleSet};
//!
//! let frames = (0..5)
//!     .map(|i| load_frame(format!("images/image0.{i}.ppm")))
//!     .collect::<lucid::Result<Vec<_>>>()?;
//! let set = SampleSet::build(&frames)?;
//! let denoised = filter(&set, &FilterConfig::default());
//! write_frame("denoised.bmp", &denoised, OutputFormat::Bmp)?;
//! ```

pub mod border;
pub mod config;
mod error;
pub mod filter;
mod frame;
pub mod gamma;
pub mod io;
pub mod sequence;
pub mod statistics;
pub mod weights;

pub use config::{BlurMode, Config, FilterConfig};
pub use error::{Error, Result};
pub use filter::{filter, filter_with, ConstantTimeWeight, TimeWeight};
pub use frame::{Dimensions, Frame, CHANNELS};
pub use io::{load_frame, write_frame, OutputFormat};
pub use statistics::{ChannelStats, MeanImputation, Sample, SampleSet};
