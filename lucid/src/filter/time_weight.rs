/// Weight of a sample by its position in the frame sequence.
///
/// `sample_index` is the frame the sample came from, `sample_count` the
/// number of frames. The value divides into the sample's exponent, so 1 is
/// neutral and 0 removes the sample.
pub trait TimeWeight: Sync {
    fn weight(&self, sample_index: usize, sample_count: usize) -> f64;
}

/// Treats every frame as equally recent.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstantTimeWeight;

impl TimeWeight for ConstantTimeWeight {
    #[inline]
    fn weight(&self, _sample_index: usize, _sample_count: usize) -> f64 {
        1.0
    }
}

impl<F> TimeWeight for F
where
    F: Fn(usize, usize) -> f64 + Sync,
{
    #[inline]
    fn weight(&self, sample_index: usize, sample_count: usize) -> f64 {
        self(sample_index, sample_count)
    }
}
