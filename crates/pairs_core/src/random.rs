//! Random source used for dealing.

/// Uniform integer source.
///
/// Any [`rand::Rng`] is a random source, so hosts pass `rand::rng()` and
/// tests pass a seeded `SmallRng`.
pub trait RandomSource {
    /// Returns a uniformly distributed integer in `min_inclusive..=max_inclusive`.
    fn next_int(&mut self, min_inclusive: usize, max_inclusive: usize) -> usize;
}

impl<R: rand::Rng> RandomSource for R {
    fn next_int(&mut self, min_inclusive: usize, max_inclusive: usize) -> usize {
        self.random_range(min_inclusive..=max_inclusive)
    }
}

/// Returns a random index whose cell is not yet taken.
///
/// Rejection sampling: draws until a free cell comes up. Callers guarantee
/// at least one free cell exists.
pub(crate) fn free_index<T, R>(cells: &[T], is_taken: impl Fn(&T) -> bool, rng: &mut R) -> usize
where
    R: RandomSource,
{
    debug_assert!(cells.iter().any(|c| !is_taken(c)), "no free cell to draw");
    loop {
        let index = rng.next_int(0, cells.len() - 1);
        if !is_taken(&cells[index]) {
            return index;
        }
    }
}
