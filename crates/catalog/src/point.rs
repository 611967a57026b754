//! Catalog entry type.

/// Cartesian coordinates `[x, y, z]`.
pub type Coords = [f64; 3];

/// A labeled point in 3D space, one per catalog record.
///
/// Points are immutable once built. Anything derived from a query (such as
/// the distance to a query point) lives outside the point.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    id: String,
    label: String,
    coords: Coords,
}

impl Point {
    /// Creates a point from its identifier, label and coordinates.
    pub fn new(id: impl Into<String>, label: impl Into<String>, coords: Coords) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            coords,
        }
    }

    /// Returns the record identifier (e.g. `"71457"`).
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the label used for name lookup. May be empty.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the `[x, y, z]` coordinates.
    pub fn coords(&self) -> &Coords {
        &self.coords
    }

    /// Returns the x coordinate.
    pub fn x(&self) -> f64 {
        self.coords[0]
    }

    /// Returns the y coordinate.
    pub fn y(&self) -> f64 {
        self.coords[1]
    }

    /// Returns the z coordinate.
    pub fn z(&self) -> f64 {
        self.coords[2]
    }

    /// Returns `true` when every coordinate is finite.
    pub fn is_finite(&self) -> bool {
        self.coords.iter().all(|c| c.is_finite())
    }
}
