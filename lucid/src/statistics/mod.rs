//! Cross-frame statistics: per pixel and channel summaries of the values a
//! pixel took across every input frame.


use rayon::prelude::*;

use crate::border::clamp_index;
use crate::error::{Error, Result};
use crate::frame::{Dimensions, Frame, CHANNELS};

/// A raw value as classified for statistics.
///
/// The renderer leaves unwritten values at exactly 0.0, so zero is read as
/// "no data" rather than black.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sample {
    Missing,
    Present(f64),
}

impl Sample {
    #[inline]
    pub fn from_raw(value: f64) -> Self {
        if value == 0.0 {
            Sample::Missing
        } else {
            Sample::Present(value)
        }
    }

    #[inline]
    pub fn is_missing(self) -> bool {
        matches!(self, Sample::Missing)
    }
}

/// Which mean is reported for a slot that had missing samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MeanImputation {
    /// Sums `mean / K` over the imputed positions only. Bit-compatible with
    /// the output of earlier releases and used by [`SampleSet::build`].
    #[default]
    Reference,
    /// Keeps the mean of the present samples, which is also the mean of the
    /// imputed vector.
    Corrected,
}

/// Scalar summary of one pixel channel across frames.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChannelStats {
    pub mean: f64,
    pub variance: f64,
    pub deviation: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
}

impl ChannelStats {
    #[inline]
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    #[inline]
    pub fn midpoint(&self) -> f64 {
        (self.max - self.min) * 0.5 + self.min
    }
}

/// Per pixel and channel statistics over an ordered sequence of same-sized frames.
///
/// All accessors clamp their coordinates to the image border, so a caller can
/// query one kernel radius past the edge.
#[derive(Debug, Clone)]
pub struct SampleSet {
    dimensions: Dimensions,
    frame_count: usize,
    /// `frame_count` values per slot, slots ordered like frame pixels.
    samples: Vec<f64>,
    stats: Vec<ChannelStats>,
}

impl SampleSet {
    pub fn build(frames: &[Frame]) -> Result<Self> {
        Self::build_with(frames, MeanImputation::Reference)
    }

    pub fn build_with(frames: &[Frame], imputation: MeanImputation) -> Result<Self> {
        let first = frames.first().ok_or(Error::NoFrames)?;
        let dimensions = first.dimensions();
        for (index, frame) in frames.iter().enumerate().skip(1) {
            if frame.dimensions() != dimensions {
                return Err(Error::DimensionMismatch {
                    index,
                    expected: dimensions,
                    actual: frame.dimensions(),
                });
            }
        }

        let frame_count = frames.len();
        let slot_count = dimensions.sample_count();
        let row_len = dimensions.width * CHANNELS;

        let mut samples = vec![0.0; slot_count * frame_count];
        let mut stats = vec![ChannelStats::default(); slot_count];

        stats
            .par_chunks_mut(row_len)
            .zip(samples.par_chunks_mut(row_len * frame_count))
            .enumerate()
            .for_each(|(y, (stats_row, samples_row))| {
                let mut scratch = Vec::with_capacity(frame_count);
                let row_start = y * row_len;
                for (i, (slot_stats, slot_samples)) in stats_row
                    .iter_mut()
                    .zip(samples_row.chunks_exact_mut(frame_count))
                    .enumerate()
                {
                    for (value, frame) in slot_samples.iter_mut().zip(frames) {
                        *value = frame.pixels()[row_start + i];
                    }
                    *slot_stats = summarize(slot_samples, imputation, &mut scratch);
                }
            });

        tracing::debug!(
            width = dimensions.width,
            height = dimensions.height,
            frames = frame_count,
            "Built sample set"
        );

        Ok(Self {
            dimensions,
            frame_count,
            samples,
            stats,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.dimensions.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.dimensions.height
    }

    #[inline]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Number of input frames, K.
    #[inline]
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    #[inline]
    pub fn stats(&self, x: isize, y: isize, c: usize) -> &ChannelStats {
        &self.stats[self.slot(x, y, c)]
    }

    /// The K per-frame values, with missing entries already imputed.
    #[inline]
    pub fn samples(&self, x: isize, y: isize, c: usize) -> &[f64] {
        self.samples_at(self.slot(x, y, c))
    }

    pub fn mean(&self, x: isize, y: isize, c: usize) -> f64 {
        self.stats(x, y, c).mean
    }

    pub fn variance(&self, x: isize, y: isize, c: usize) -> f64 {
        self.stats(x, y, c).variance
    }

    pub fn deviation(&self, x: isize, y: isize, c: usize) -> f64 {
        self.stats(x, y, c).deviation
    }

    pub fn min(&self, x: isize, y: isize, c: usize) -> f64 {
        self.stats(x, y, c).min
    }

    pub fn max(&self, x: isize, y: isize, c: usize) -> f64 {
        self.stats(x, y, c).max
    }

    pub fn median(&self, x: isize, y: isize, c: usize) -> f64 {
        self.stats(x, y, c).median
    }

    /// Flat slot index after clamping every coordinate into range.
    #[inline]
    pub(crate) fn slot(&self, x: isize, y: isize, c: usize) -> usize {
        let x = clamp_index(x, self.dimensions.width);
        let y = clamp_index(y, self.dimensions.height);
        let c = c.min(CHANNELS - 1);
        (y * self.dimensions.width + x) * CHANNELS + c
    }

    #[inline]
    pub(crate) fn stats_at(&self, slot: usize) -> &ChannelStats {
        &self.stats[slot]
    }

    #[inline]
    pub(crate) fn samples_at(&self, slot: usize) -> &[f64] {
        let start = slot * self.frame_count;
        &self.samples[start..start + self.frame_count]
    }
}

/// Summarizes one slot, imputing missing entries of `samples` in place.
///
/// `scratch` is reused between calls to hold the sorted copy for the median.
pub fn summarize(
    samples: &mut [f64],
    imputation: MeanImputation,
    scratch: &mut Vec<f64>,
) -> ChannelStats {
    debug_assert!(!samples.is_empty());

    let norm = 1.0 / samples.len() as f64;
    let mut stats = ChannelStats::default();

    let mut count = 0usize;
    let mut sum = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &value in samples.iter() {
        if let Sample::Present(v) = Sample::from_raw(value) {
            count += 1;
            sum += v;
            min = min.min(v);
            max = max.max(v);
        }
    }

    if count > 0 {
        let mean = sum / count as f64;
        let mut variance = 0.0;

        if count < samples.len() {
            let mut imputed_mean = 0.0;
            for value in samples.iter_mut() {
                if Sample::from_raw(*value).is_missing() {
                    *value = mean;
                    imputed_mean += mean * norm;
                }
                let d = *value - mean;
                variance += d * d * norm;
            }
            stats.mean = match imputation {
                MeanImputation::Reference => imputed_mean,
                MeanImputation::Corrected => mean,
            };
        } else {
            for &value in samples.iter() {
                let d = value - mean;
                variance += d * d * norm;
            }
            stats.mean = mean;
        }

        stats.variance = variance;
        stats.min = min;
        stats.max = max;
    }

    stats.deviation = stats.variance.sqrt();
    // With two values or fewer the imputed samples span exactly [min, max].
    stats.median = if samples.len() > 2 {
        upper_median(samples, scratch)
    } else {
        stats.midpoint()
    };
    stats
}

/// Upper-middle element of more than two values.
fn upper_median(samples: &[f64], scratch: &mut Vec<f64>) -> f64 {
    scratch.clear();
    scratch.extend_from_slice(samples);
    scratch.sort_by(f64::total_cmp);

    let len = scratch.len();
    scratch[len.div_ceil(2).min(len - 1)]
}
