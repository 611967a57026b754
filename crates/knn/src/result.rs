//! Output types for nearest-neighbor queries.

use stars_catalog::Point;

/// One selected candidate and its distance to the query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor<'a> {
    point: &'a Point,
    index: usize,
    distance: f64,
}

impl<'a> Neighbor<'a> {
    pub(crate) fn new(point: &'a Point, index: usize, distance: f64) -> Self {
        Self {
            point,
            index,
            distance,
        }
    }

    /// Returns the selected point.
    pub fn point(&self) -> &'a Point {
        self.point
    }

    /// Returns the position of the point in the candidate slice.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the Euclidean distance to the query point.
    pub fn distance(&self) -> f64 {
        self.distance
    }
}

/// Result of a nearest-neighbor query.
///
/// Holds exactly `k` distinct neighbors. The first [`n_fixed`](Self::n_fixed)
/// are the unambiguous nearest candidates in ascending distance; the rest
/// were drawn at random from the candidates tied at the rank-k boundary.
#[derive(Debug, Clone)]
pub struct SearchResult<'a> {
    neighbors: Vec<Neighbor<'a>>,
    n_fixed: usize,
}

impl<'a> SearchResult<'a> {
    pub(crate) fn new(neighbors: Vec<Neighbor<'a>>, n_fixed: usize) -> Self {
        debug_assert!(n_fixed <= neighbors.len());
        Self { neighbors, n_fixed }
    }

    /// Returns all neighbors, deterministic prefix first.
    pub fn neighbors(&self) -> &[Neighbor<'a>] {
        &self.neighbors
    }

    /// Returns the number of neighbors selected without a random draw.
    pub fn n_fixed(&self) -> usize {
        self.n_fixed
    }

    /// Returns the neighbors drawn from the tie at the boundary.
    pub fn drawn(&self) -> &[Neighbor<'a>] {
        &self.neighbors[self.n_fixed..]
    }

    /// Returns the number of neighbors.
    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    /// Returns `true` if no neighbors were selected (`k = 0`).
    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    /// Iterates over the neighbors, deterministic prefix first.
    pub fn iter(&self) -> std::slice::Iter<'_, Neighbor<'a>> {
        self.neighbors.iter()
    }
}

impl<'r, 'a> IntoIterator for &'r SearchResult<'a> {
    type Item = &'r Neighbor<'a>;
    type IntoIter = std::slice::Iter<'r, Neighbor<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.neighbors.iter()
    }
}
