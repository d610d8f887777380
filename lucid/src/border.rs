//! Clamp-to-edge boundary policy shared by [`Frame`](crate::Frame) reads and
//! every [`SampleSet`](crate::SampleSet) accessor.

/// Clamps a possibly out-of-range coordinate into `[0, len - 1]`.
#[inline]
pub fn clamp_index(i: isize, len: usize) -> usize {
    debug_assert!(len > 0);
    if i <= 0 {
        0
    } else {
        (i as usize).min(len - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_range_is_identity() {
        for i in 0..5 {
            assert_eq!(clamp_index(i, 5), i as usize);
        }
    }

    #[test]
    fn test_clamps_both_edges() {
        assert_eq!(clamp_index(-1, 5), 0);
        assert_eq!(clamp_index(-100, 5), 0);
        assert_eq!(clamp_index(5, 5), 4);
        assert_eq!(clamp_index(isize::MAX, 5), 4);
    }

    #[test]
    fn test_single_element_axis() {
        assert_eq!(clamp_index(-3, 1), 0);
        assert_eq!(clamp_index(3, 1), 0);
    }
}
