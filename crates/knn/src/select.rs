//! Ranking and k-nearest selection with randomized tie-breaking.

use std::ops::Range;

use rand::Rng;
use tracing::debug;

use crate::sample::sample_without_replacement;

/// Sorts `(distance, index)` pairs by ascending distance.
///
/// The sort is stable, so tied candidates keep their input order until the
/// tie-break draw. Distances must be finite (checked by the caller).
pub(crate) fn sort_by_distance(ranked: &mut [(f64, usize)]) {
    ranked.sort_by(|a, b| a.0.total_cmp(&b.0));
}

/// Finds the block of ranks tied with rank `k`.
///
/// Walks down from `k - 1` and up from `k + 1`, stopping in each direction at
/// the first rank whose distance differs from the rank-`k` distance by
/// `epsilon` or more. The returned range always contains `k`.
///
/// # Panics
///
/// Debug-asserts that `k < ranked.len()`.
pub(crate) fn tie_block(ranked: &[(f64, usize)], k: usize, epsilon: f64) -> Range<usize> {
    debug_assert!(k < ranked.len());

    let boundary = ranked[k].0;
    let tied = |d: f64| (d - boundary).abs() < epsilon;

    let start = ranked[..k]
        .iter()
        .rposition(|&(d, _)| !tied(d))
        .map_or(0, |i| i + 1);
    let end = ranked[k + 1..]
        .iter()
        .position(|&(d, _)| !tied(d))
        .map_or(ranked.len(), |i| k + 1 + i);

    start..end
}

/// Selects `k` ranks out of a sorted ranking.
///
/// Writes positions into `ranked` to `selected`: first the ranks strictly
/// before the tie block, then `k - block.start` ranks drawn uniformly without
/// replacement from the tie block. With no tie reaching below rank `k`, this
/// is just `0..k` and no randomness is consumed.
///
/// `pool` is scratch space for the draw. Returns the number of ranks
/// selected without a draw.
///
/// # Panics
///
/// Debug-asserts that `k <= ranked.len()`.
pub(crate) fn select_k_nearest(
    ranked: &[(f64, usize)],
    k: usize,
    epsilon: f64,
    rng: &mut impl Rng,
    pool: &mut Vec<usize>,
    selected: &mut Vec<usize>,
) -> usize {
    debug_assert!(k <= ranked.len());
    selected.clear();

    if k == ranked.len() {
        selected.extend(0..k);
        return k;
    }

    let block = tie_block(ranked, k, epsilon);
    selected.extend(0..block.start);

    let n_draws = k - block.start;
    if n_draws == 0 {
        return k;
    }

    debug!(
        tie_start = block.start,
        tie_end = block.end,
        n_draws,
        boundary = ranked[k].0,
        "resolving tie at rank boundary"
    );

    pool.clear();
    pool.extend(block.clone());
    sample_without_replacement(pool, n_draws, rng);
    selected.extend_from_slice(&pool[..n_draws]);
    block.start
}
