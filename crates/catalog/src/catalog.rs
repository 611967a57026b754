//! In-memory star catalog.

use crate::point::Point;

/// Ordered collection of points in the order they were read.
///
/// The order carries no meaning beyond being stable; searches rank a
/// borrowed view of the points and never reorder the catalog itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    points: Vec<Point>,
}

impl Catalog {
    /// Creates a catalog from points in insertion order.
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Returns the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the catalog holds no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterates over the points in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    /// Finds the first point whose label equals `label` exactly.
    ///
    /// Returns the position and the point. The catalog is left untouched;
    /// callers that want to exclude the match from a search use
    /// [`candidates_excluding`](Self::candidates_excluding).
    pub fn find_by_label(&self, label: &str) -> Option<(usize, &Point)> {
        self.points
            .iter()
            .enumerate()
            .find(|(_, p)| p.label() == label)
    }

    /// Borrows every point as a search candidate.
    pub fn candidates(&self) -> Vec<&Point> {
        self.points.iter().collect()
    }

    /// Borrows every point except the one at `index` as a search candidate.
    pub fn candidates_excluding(&self, index: usize) -> Vec<&Point> {
        self.points
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != index)
            .map(|(_, p)| p)
            .collect()
    }
}

impl FromIterator<Point> for Catalog {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
