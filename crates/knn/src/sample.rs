//! Random draws for tie resolution.

use rand::Rng;

/// Draws `n` entries from `pool` uniformly without replacement.
///
/// Partial Fisher-Yates shuffle: after the call, `pool[..n]` holds the
/// drawn entries in draw order. Each draw is uniform over the entries not yet
/// drawn, so no entry can be picked twice.
///
/// # Panics
///
/// Debug-asserts that `n <= pool.len()`.
pub(crate) fn sample_without_replacement(pool: &mut [usize], n: usize, rng: &mut impl Rng) {
    debug_assert!(n <= pool.len());
    for i in 0..n {
        let j = rng.random_range(i..pool.len());
        pool.swap(i, j);
    }
}
