//! Euclidean distance computation.

use stars_catalog::{Coords, Point};

/// Euclidean distance between two points in 3D.
///
/// ```text
/// d = sqrt((x2 − x1)² + (y2 − y1)² + (z2 − z1)²)
/// ```
///
/// Symmetric, and zero exactly when the coordinates are identical.
#[inline]
pub fn euclidean_distance(a: &Coords, b: &Coords) -> f64 {
    let dx = b[0] - a[0];
    let dy = b[1] - a[1];
    let dz = b[2] - a[2];
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// Computes the distance from `query` to every candidate.
///
/// Writes `(distance, candidate_index)` pairs into `out`, in candidate
/// order. `out` is cleared first.
pub(crate) fn distances_into(candidates: &[&Point], query: &Coords, out: &mut Vec<(f64, usize)>) {
    out.clear();
    out.extend(
        candidates
            .iter()
            .enumerate()
            .map(|(i, p)| (euclidean_distance(query, p.coords()), i)),
    );
}
