//! Run configuration and validation of user-supplied values.
//!
//! Out-of-range values are corrected with a warning instead of failing the run.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::error::{Error, Result};
use crate::io::OutputFormat;

/// Distinct frames rendered per demo sequence, minus one.
pub const MAX_IMAGES: usize = 10;

/// Highest valid demo sequence number.
pub const MAX_SEQUENCE: i64 = 5;

/// Widest kernel the filter accepts. Odd, so rounding up never exceeds it.
pub const MAX_KERNEL_WIDTH: i64 = 255;

/// Similarity metric used to decide how strongly a neighbor may blend in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlurMode {
    /// Penalizes neighbors whose cross-frame range differs, as well as their mean.
    #[default]
    Aggressive,
    /// Compares means only.
    Gentle,
}

impl BlurMode {
    /// 0 is aggressive, 1 is gentle; anything else falls back to aggressive.
    pub fn from_index(index: i64) -> Self {
        match index {
            0 => BlurMode::Aggressive,
            1 => BlurMode::Gentle,
            other => {
                tracing::warn!(
                    mode = other,
                    "Blur mode must be 0 or 1, using {}",
                    BlurMode::default()
                );
                BlurMode::default()
            }
        }
    }
}

/// Parameters of the spatio-temporal filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub blur_mode: BlurMode,
    /// Blend toward an unconditional weight of 1, in `[0, 1]`.
    pub blur_strength: f64,
    /// Widens the band of sample values accepted around the destination mean.
    pub contribution_strength: f64,
    /// Odd width of the square neighborhood, in `[1, MAX_KERNEL_WIDTH]`.
    pub kernel_width: i64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            blur_mode: BlurMode::Aggressive,
            blur_strength: 0.005,
            contribution_strength: 5.0,
            kernel_width: 7,
        }
    }
}

impl FilterConfig {
    /// Half-width of the neighborhood, 0 for widths of 1 or less. Widths past
    /// [`MAX_KERNEL_WIDTH`] use its radius.
    pub fn kernel_radius(&self) -> usize {
        let width = self.kernel_width.clamp(1, MAX_KERNEL_WIDTH);
        ((width - 1) / 2) as usize
    }

    pub fn sanitized(mut self) -> Self {
        if !(0.0..=1.0).contains(&self.blur_strength) {
            let clamped = self.blur_strength.clamp(0.0, 1.0);
            tracing::warn!(
                requested = self.blur_strength,
                "Blur strength must be in the range 0-1, clamping to {}",
                clamped
            );
            self.blur_strength = clamped;
        }

        if self.contribution_strength < 0.0 {
            tracing::warn!(
                requested = self.contribution_strength,
                "Contribution strength cannot be negative, clamping to 0"
            );
            self.contribution_strength = 0.0;
        }

        let kernel_width = normalize_kernel_width(self.kernel_width);
        if kernel_width != self.kernel_width {
            let reason = if self.kernel_width < 1 {
                "Kernel width must be at least 1"
            } else if self.kernel_width > MAX_KERNEL_WIDTH {
                "Kernel width is too large"
            } else {
                "Kernel width must be odd"
            };
            tracing::warn!(
                requested = self.kernel_width,
                "{}, using {}",
                reason,
                kernel_width
            );
            self.kernel_width = kernel_width;
        }

        self
    }
}

/// Smallest odd width that is at least `requested`, within `[1, MAX_KERNEL_WIDTH]`.
pub fn normalize_kernel_width(requested: i64) -> i64 {
    let width = requested.clamp(1, MAX_KERNEL_WIDTH);
    if width % 2 == 0 {
        width + 1
    } else {
        width
    }
}

/// Wraps a start frame into `[0, MAX_IMAGES]`.
pub fn wrap_start_frame(start_frame: i64) -> i64 {
    let max = MAX_IMAGES as i64;
    if start_frame < 0 {
        start_frame.rem_euclid(max)
    } else if start_frame > max {
        (start_frame - 1) % max + 1
    } else {
        start_frame
    }
}

/// Everything a denoising run needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(flatten)]
    pub filter: FilterConfig,
    /// Number of frames to combine.
    pub image_count: i64,
    /// Demo sequence to read frames from.
    pub sequence: i64,
    /// First frame of the sequence to use.
    pub start_frame: i64,
    pub images_dir: PathBuf,
    pub output_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            filter: FilterConfig::default(),
            image_count: 5,
            sequence: 0,
            start_frame: 0,
            images_dir: PathBuf::from("images"),
            output_path: PathBuf::from("denoised.bmp"),
        }
    }
}

impl Config {
    /// Reads a YAML config; keys that are absent keep their defaults.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        serde_yml::from_str(&text).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Applies every range correction, warning about each one.
    pub fn sanitized(mut self) -> Self {
        self.filter = self.filter.sanitized();

        if self.image_count < 0 {
            tracing::warn!(
                requested = self.image_count,
                "Image count cannot be negative, using 0"
            );
            self.image_count = 0;
        }
        if self.image_count > MAX_IMAGES as i64 {
            tracing::warn!(
                image_count = self.image_count,
                "Only {} unique images are available per sequence, frames will be reused",
                MAX_IMAGES + 1
            );
        }

        let start_frame = wrap_start_frame(self.start_frame);
        if start_frame != self.start_frame {
            tracing::warn!(
                requested = self.start_frame,
                "Start frame wrapped to {}",
                start_frame
            );
            self.start_frame = start_frame;
        }

        if !(0..=MAX_SEQUENCE).contains(&self.sequence) {
            tracing::warn!(
                requested = self.sequence,
                "There are only {} preset sequences, selecting sequence 0",
                MAX_SEQUENCE
            );
            self.sequence = 0;
        }

        if self.output_path.as_os_str().is_empty() {
            tracing::warn!("Invalid output path specified, using the default");
            self.output_path = Config::default().output_path;
        }
        if OutputFormat::from_path(&self.output_path).is_none() {
            let mut path = OsString::from(self.output_path.as_os_str());
            path.push(".bmp");
            self.output_path = PathBuf::from(path);
        }

        self
    }

    /// Format implied by the output path; BMP unless it ends in `ppm`.
    pub fn output_format(&self) -> OutputFormat {
        OutputFormat::from_path(&self.output_path).unwrap_or_default()
    }

    /// Number of frames to load. Only meaningful after [`Config::sanitized`].
    pub fn frame_count(&self) -> usize {
        self.image_count.max(0) as usize
    }

    /// Sequence number as an index. Only meaningful after [`Config::sanitized`].
    pub fn sequence_index(&self) -> usize {
        self.sequence.max(0) as usize
    }

    /// Start frame as an index. Only meaningful after [`Config::sanitized`].
    pub fn start_frame_index(&self) -> usize {
        self.start_frame.max(0) as usize
    }
}

#[cfg(test)]
mod tests {
    use common::test_utils::test_output_path;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.filter.blur_mode, BlurMode::Aggressive);
        assert_eq!(config.filter.blur_strength, 0.005);
        assert_eq!(config.filter.contribution_strength, 5.0);
        assert_eq!(config.filter.kernel_width, 7);
        assert_eq!(config.filter.kernel_radius(), 3);
        assert_eq!(config.image_count, 5);
        assert_eq!(config.output_format(), OutputFormat::Bmp);
        assert_eq!(config.clone().sanitized(), config);
    }

    #[test]
    fn test_blur_mode_from_index() {
        assert_eq!(BlurMode::from_index(0), BlurMode::Aggressive);
        assert_eq!(BlurMode::from_index(1), BlurMode::Gentle);
        assert_eq!(BlurMode::from_index(7), BlurMode::Aggressive);
        assert_eq!(BlurMode::from_index(-1), BlurMode::Aggressive);
    }

    #[test]
    fn test_kernel_width_is_odd_and_not_smaller() {
        for requested in 1..=MAX_KERNEL_WIDTH {
            let width = normalize_kernel_width(requested);
            assert_eq!(width % 2, 1);
            assert!(width >= requested);
            assert!(width - requested <= 1);
        }
        assert_eq!(normalize_kernel_width(4), 5);
        assert_eq!(normalize_kernel_width(5), 5);
        assert_eq!(normalize_kernel_width(0), 1);
        assert_eq!(normalize_kernel_width(-4), 1);
    }

    #[test]
    fn test_kernel_width_is_capped() {
        assert_eq!(normalize_kernel_width(MAX_KERNEL_WIDTH + 1), MAX_KERNEL_WIDTH);
        assert_eq!(normalize_kernel_width(i64::MAX), MAX_KERNEL_WIDTH);

        let filter = FilterConfig {
            kernel_width: i64::MAX,
            ..Default::default()
        };
        assert_eq!(filter.kernel_radius(), 127);
        assert_eq!(filter.sanitized().kernel_width, MAX_KERNEL_WIDTH);
    }

    #[test]
    fn test_negative_counts_are_corrected() {
        let config = Config {
            image_count: -2,
            filter: FilterConfig {
                kernel_width: -4,
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(config.filter.kernel_radius(), 0);

        let config = config.sanitized();
        assert_eq!(config.image_count, 0);
        assert_eq!(config.frame_count(), 0);
        assert_eq!(config.filter.kernel_width, 1);
    }

    #[test]
    fn test_kernel_radius() {
        let radius = |kernel_width| {
            FilterConfig {
                kernel_width,
                ..Default::default()
            }
            .kernel_radius()
        };
        assert_eq!(radius(0), 0);
        assert_eq!(radius(1), 0);
        assert_eq!(radius(3), 1);
        assert_eq!(radius(9), 4);
    }

    #[test]
    fn test_strengths_are_clamped() {
        let filter = FilterConfig {
            blur_strength: 1.5,
            contribution_strength: -2.0,
            kernel_width: 6,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(filter.blur_strength, 1.0);
        assert_eq!(filter.contribution_strength, 0.0);
        assert_eq!(filter.kernel_width, 7);

        let filter = FilterConfig {
            blur_strength: -0.1,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(filter.blur_strength, 0.0);
    }

    #[test]
    fn test_start_frame_wrapping() {
        assert_eq!(wrap_start_frame(0), 0);
        assert_eq!(wrap_start_frame(10), 10);
        assert_eq!(wrap_start_frame(11), 1);
        assert_eq!(wrap_start_frame(20), 10);
        assert_eq!(wrap_start_frame(21), 1);
        assert_eq!(wrap_start_frame(-1), 9);
        assert_eq!(wrap_start_frame(-10), 0);
        assert_eq!(wrap_start_frame(-11), 9);
    }

    #[test]
    fn test_sequence_out_of_range_resets() {
        let config = Config {
            sequence: 6,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(config.sequence, 0);

        let config = Config {
            sequence: 5,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(config.sequence_index(), 5);
    }

    #[test]
    fn test_output_path_fixups() {
        let config = Config {
            output_path: PathBuf::from("result.png"),
            ..Default::default()
        }
        .sanitized();
        assert_eq!(config.output_path, PathBuf::from("result.png.bmp"));
        assert_eq!(config.output_format(), OutputFormat::Bmp);

        let config = Config {
            output_path: PathBuf::from("result.ppm"),
            ..Default::default()
        }
        .sanitized();
        assert_eq!(config.output_format(), OutputFormat::Ppm);

        let config = Config {
            output_path: PathBuf::new(),
            ..Default::default()
        }
        .sanitized();
        assert_eq!(config.output_path, PathBuf::from("denoised.bmp"));
    }

    #[test]
    fn test_yaml_partial_override() {
        let path = test_output_path("lucid_config.yaml");
        std::fs::write(
            &path,
            "blur_mode: gentle\nkernel_width: 5\nimage_count: 8\noutput_path: out.ppm\n",
        )
        .unwrap();

        let config = Config::from_yaml_file(&path).unwrap();
        assert_eq!(config.filter.blur_mode, BlurMode::Gentle);
        assert_eq!(config.filter.kernel_width, 5);
        assert_eq!(config.filter.blur_strength, 0.005);
        assert_eq!(config.image_count, 8);
        assert_eq!(config.output_path, PathBuf::from("out.ppm"));
        assert_eq!(config.images_dir, PathBuf::from("images"));
    }

    #[test]
    fn test_yaml_missing_file() {
        let err = Config::from_yaml_file("no/such/config.yaml").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
