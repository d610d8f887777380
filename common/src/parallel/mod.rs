//! Row-parallel iteration over image-shaped buffers.

use rayon::prelude::*;


/// Multiplier for number of chunks relative to CPU threads.
/// Using 3x threads provides good load balancing when some chunks finish faster.
const CHUNKS_PER_THREAD: usize = 3;

#[inline]
fn auto_chunk_size(len: usize) -> usize {
    let num_chunks = rayon::current_num_threads() * CHUNKS_PER_THREAD;
    (len / num_chunks).max(1)
}

/// Parallel iterator that pairs each chunk with its starting row.
pub struct WithOffset<I> {
    inner: I,
    rows_per_chunk: usize,
}

impl<I> ParallelIterator for WithOffset<I>
where
    I: IndexedParallelIterator,
{
    type Item = (usize, I::Item);

    fn drive_unindexed<C>(self, consumer: C) -> C::Result
    where
        C: rayon::iter::plumbing::UnindexedConsumer<Self::Item>,
    {
        let rows_per_chunk = self.rows_per_chunk;
        self.inner
            .enumerate()
            .map(move |(idx, item)| (idx * rows_per_chunk, item))
            .drive_unindexed(consumer)
    }
}

/// Parallel iterator over row-aligned mutable chunks that yields `(chunk_start_row, chunk)` pairs.
pub type ParRowsMutWithOffset<'a, T> = WithOffset<rayon::slice::ChunksMut<'a, T>>;

/// Extension trait for row-aligned mutable parallel chunks with automatic sizing.
pub trait ParRowsMutAuto<'a, T: Send + 'a> {
    /// Split into mutable parallel chunks aligned to row boundaries.
    /// `row_len` is the number of elements in one row; every chunk holds whole rows.
    fn par_rows_mut_auto(&'a mut self, row_len: usize) -> ParRowsMutWithOffset<'a, T>;
}

impl<'a, T: Send + 'a> ParRowsMutAuto<'a, T> for [T] {
    fn par_rows_mut_auto(&'a mut self, row_len: usize) -> ParRowsMutWithOffset<'a, T> {
        assert!(row_len > 0, "row length must be positive");
        let height = self.len() / row_len;
        let rows_per_chunk = auto_chunk_size(height);
        WithOffset {
            inner: self.par_chunks_mut(row_len * rows_per_chunk),
            rows_per_chunk,
        }
    }
}
