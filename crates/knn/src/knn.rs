//! Nearest-neighbor entry points and scratch buffer management.

use rand::Rng;
use stars_catalog::{Coords, Point};

use crate::config::SearchConfig;
use crate::distance::distances_into;
use crate::error::KnnError;
use crate::result::{Neighbor, SearchResult};
use crate::select::{select_k_nearest, sort_by_distance};

/// Pre-allocated scratch buffers for nearest-neighbor queries.
///
/// Reuse across calls to [`nearest_neighbors_with_scratch`] to avoid
/// reallocating the ranking for every query of an interactive session.
///
/// # Example
///
/// ```
/// use stars_knn::SearchScratch;
///
/// let mut scratch = SearchScratch::new(1000);
/// // Use with nearest_neighbors_with_scratch() for each query...
/// ```
#[derive(Debug, Clone, Default)]
pub struct SearchScratch {
    /// (distance, candidate index) pairs, sorted by distance.
    pub(crate) ranked: Vec<(f64, usize)>,
    /// Rank positions of the tie block being drawn from.
    pub(crate) pool: Vec<usize>,
    /// Selected rank positions.
    pub(crate) selected: Vec<usize>,
}

impl SearchScratch {
    /// Creates a new scratch buffer with capacity for `max_candidates` candidates.
    pub fn new(max_candidates: usize) -> Self {
        Self {
            ranked: Vec::with_capacity(max_candidates),
            pool: Vec::with_capacity(max_candidates),
            selected: Vec::with_capacity(max_candidates),
        }
    }
}

/// Validates all inputs before any work is done.
fn validate_inputs(
    candidates: &[&Point],
    query: &Coords,
    config: &SearchConfig,
) -> Result<(), KnnError> {
    config.validate()?;

    let k = config.k();
    if candidates.is_empty() && k > 0 {
        return Err(KnnError::EmptyCandidates { k });
    }
    if k > candidates.len() {
        return Err(KnnError::InvalidK {
            k,
            n_candidates: candidates.len(),
        });
    }

    if query.iter().any(|v| !v.is_finite()) {
        return Err(KnnError::NonFiniteInput { input: "query" });
    }
    if candidates.iter().any(|p| !p.is_finite()) {
        return Err(KnnError::NonFiniteInput {
            input: "candidates",
        });
    }

    Ok(())
}

/// Internal implementation that assumes all inputs are validated.
fn nearest_neighbors_inner<'a>(
    candidates: &[&'a Point],
    query: &Coords,
    config: &SearchConfig,
    rng: &mut impl Rng,
    scratch: &mut SearchScratch,
) -> SearchResult<'a> {
    let k = config.k();
    if k == 0 {
        return SearchResult::new(Vec::new(), 0);
    }

    // Step 1: Distance from the query to every candidate
    distances_into(candidates, query, &mut scratch.ranked);

    // Step 2: Rank by ascending distance
    sort_by_distance(&mut scratch.ranked);

    // Step 3: Pick k ranks, drawing at random among ties at the boundary
    let n_fixed = select_k_nearest(
        &scratch.ranked,
        k,
        config.epsilon(),
        rng,
        &mut scratch.pool,
        &mut scratch.selected,
    );

    // Step 4: Map rank positions back to candidates
    let neighbors = scratch
        .selected
        .iter()
        .map(|&rank| {
            let (distance, index) = scratch.ranked[rank];
            Neighbor::new(candidates[index], index, distance)
        })
        .collect();

    SearchResult::new(neighbors, n_fixed)
}

/// Finds the `k` candidates nearest to `query`, allocating scratch buffers
/// internally.
///
/// This is the simple entry point. For repeated queries, use
/// [`nearest_neighbors_with_scratch`] to reuse allocations.
///
/// The result holds exactly `config.k()` distinct candidates. When several
/// candidates sit within `config.epsilon()` of the distance at rank `k`, the
/// ones needed to fill the result are drawn uniformly at random from that
/// tie using `rng`; everything nearer than the tie is always included.
///
/// # Arguments
///
/// * `candidates`: points to search; exclude the query's own point before calling
/// * `query`: query coordinates `[x, y, z]`
/// * `config`: search configuration (k, tie tolerance)
/// * `rng`: random number generator for tie-breaking
///
/// # Errors
///
/// Returns [`KnnError`] if `k` exceeds the candidate count, candidates are
/// empty while `k > 0`, a coordinate is non-finite, or the tolerance is
/// invalid. `k` is never clamped.
#[tracing::instrument(skip_all, fields(k = config.k(), n_candidates = candidates.len()))]
pub fn nearest_neighbors<'a>(
    candidates: &[&'a Point],
    query: &Coords,
    config: &SearchConfig,
    rng: &mut impl Rng,
) -> Result<SearchResult<'a>, KnnError> {
    validate_inputs(candidates, query, config)?;
    let mut scratch = SearchScratch::new(candidates.len());
    Ok(nearest_neighbors_inner(
        candidates,
        query,
        config,
        rng,
        &mut scratch,
    ))
}

/// Finds the `k` candidates nearest to `query`, reusing pre-allocated
/// scratch buffers.
///
/// Identical to [`nearest_neighbors`] but reuses `scratch`. Buffers grow as
/// needed and never shrink.
///
/// # Errors
///
/// Returns [`KnnError`] if inputs are invalid.
#[tracing::instrument(skip_all, fields(k = config.k(), n_candidates = candidates.len()))]
pub fn nearest_neighbors_with_scratch<'a>(
    candidates: &[&'a Point],
    query: &Coords,
    config: &SearchConfig,
    rng: &mut impl Rng,
    scratch: &mut SearchScratch,
) -> Result<SearchResult<'a>, KnnError> {
    validate_inputs(candidates, query, config)?;
    Ok(nearest_neighbors_inner(
        candidates, query, config, rng, scratch,
    ))
}
