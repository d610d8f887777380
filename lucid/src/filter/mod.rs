//! Spatio-temporal filter: denoises every pixel channel from the cross-frame
//! statistics of its neighbors.
//!
//! For a destination slot, each neighbor inside the square kernel (the center
//! excluded) contributes every one of its per-frame samples as an offset from
//! the destination mean. A sample's weight is
//!
//! ```text
//! exp(-similarity / (contribution * variance * time * distance * limit))
//! ```
//!
//! so neighbors with a similar mean (and, in aggressive mode, a similar
//! cross-frame range) and with plausible sample values dominate the estimate.

mod time_weight;


use std::time::Instant;

use common::parallel::ParRowsMutAuto;
use rayon::prelude::*;

use crate::config::{BlurMode, FilterConfig};
use crate::frame::{Frame, CHANNELS};
use crate::statistics::{ChannelStats, SampleSet};
use crate::weights::{bell_weight, edge_soft_step};

pub use time_weight::{ConstantTimeWeight, TimeWeight};

/// Deviation of the distance falloff, in units of the kernel diagonal.
const DISTANCE_DEVIATION: f64 = 0.7;

/// One neighbor position of the kernel and its precomputed distance weight.
#[derive(Debug, Clone, Copy)]
struct KernelTap {
    dx: isize,
    dy: isize,
    distance_weight: f64,
}

/// Kernel taps in row-major order, center excluded.
fn kernel_taps(radius: usize) -> Vec<KernelTap> {
    let r = radius as isize;
    let diagonal = ((r * r + r * r) as f64).sqrt();
    let mut taps = Vec::with_capacity((2 * radius + 1).pow(2).saturating_sub(1));
    for dy in -r..=r {
        for dx in -r..=r {
            if dx == 0 && dy == 0 {
                continue;
            }
            let distance = ((dx * dx + dy * dy) as f64).sqrt() / diagonal;
            taps.push(KernelTap {
                dx,
                dy,
                distance_weight: bell_weight(distance, 0.0, DISTANCE_DEVIATION, false),
            });
        }
    }
    taps
}

/// Denoises `set` with a constant time weight of 1.
pub fn filter(set: &SampleSet, config: &FilterConfig) -> Frame {
    filter_with(set, config, &ConstantTimeWeight)
}

/// Denoises `set`, weighting each sample by `time_weight` as well.
///
/// Rows are processed in parallel; every output value depends only on `set`
/// and `config`, so the result does not depend on the thread count.
pub fn filter_with<T: TimeWeight>(set: &SampleSet, config: &FilterConfig, time_weight: &T) -> Frame {
    let start = Instant::now();
    let dimensions = set.dimensions();
    let row_len = dimensions.width * CHANNELS;
    let taps = kernel_taps(config.kernel_radius());

    tracing::info!(
        width = dimensions.width,
        height = dimensions.height,
        frames = set.frame_count(),
        radius = config.kernel_radius(),
        mode = %config.blur_mode,
        "Filtering"
    );

    let mut pixels = vec![0.0; dimensions.sample_count()];
    pixels
        .par_rows_mut_auto(row_len)
        .for_each(|(start_row, chunk)| {
            for (local_y, row) in chunk.chunks_exact_mut(row_len).enumerate() {
                let y = (start_row + local_y) as isize;
                for (x, pixel) in row.chunks_exact_mut(CHANNELS).enumerate() {
                    for (c, value) in pixel.iter_mut().enumerate() {
                        *value = denoise_slot(set, config, time_weight, &taps, x as isize, y, c);
                    }
                }
            }
        });

    tracing::info!(elapsed = ?start.elapsed(), "Filtering complete");

    Frame::from_parts(dimensions, pixels)
}

fn similarity_of(mode: BlurMode, src: &ChannelStats, dest: &ChannelStats) -> f64 {
    let s = match mode {
        BlurMode::Aggressive => (src.mean - dest.mean) * (src.range() - dest.range()),
        BlurMode::Gentle => src.mean - dest.mean,
    };
    s * s
}

fn denoise_slot<T: TimeWeight>(
    set: &SampleSet,
    config: &FilterConfig,
    time_weight: &T,
    taps: &[KernelTap],
    x: isize,
    y: isize,
    c: usize,
) -> f64 {
    let dest = set.stats_at(set.slot(x, y, c));
    let acceptance_deviation = dest.deviation * (1.0 + config.contribution_strength);
    let blur = config.blur_strength;

    let mut weighted_sum = 0.0;
    let mut offset_sum = 0.0;

    for tap in taps {
        let slot = set.slot(x + tap.dx, y + tap.dy, c);
        let src = set.stats_at(slot);
        let samples = set.samples_at(slot);

        // Never written in any frame.
        if src.variance == 0.0 && samples[0] == 0.0 {
            continue;
        }

        let similarity = similarity_of(config.blur_mode, src, dest);

        for (i, &v) in samples.iter().enumerate() {
            let contribution = bell_weight(v, dest.mean, acceptance_deviation, true)
                * bell_weight(v, src.mean, src.deviation, true);
            let contribution = contribution * (1.0 - blur) + blur;

            let limit = if samples.len() <= 2 {
                1.0
            } else {
                edge_soft_step(v, src.min, src.max)
            };

            let time = time_weight.weight(i, samples.len());

            let weight = (-(similarity
                / (contribution * src.variance * time * tap.distance_weight * limit)))
                .exp();
            let weight = if weight.is_finite() { weight } else { 0.0 };

            offset_sum += (v - dest.mean) * weight;
            weighted_sum += weight;
        }
    }

    if weighted_sum == 0.0 || dest.variance <= 0.0 {
        dest.mean
    } else {
        dest.mean + offset_sum / weighted_sum
    }
}
