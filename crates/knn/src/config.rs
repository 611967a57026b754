//! Configuration for nearest-neighbor queries.

use crate::error::KnnError;

/// Default tolerance under which two distances count as tied.
pub const TIE_EPSILON: f64 = 1e-5;

/// Configuration for a nearest-neighbor query.
///
/// # Example
///
/// ```
/// use stars_knn::SearchConfig;
///
/// let config = SearchConfig::new(5).with_epsilon(1e-6);
///
/// assert_eq!(config.k(), 5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Number of neighbors to return.
    k: usize,
    /// Distances closer than this to the rank-k distance are tied.
    epsilon: f64,
}

impl SearchConfig {
    /// Creates a new configuration returning `k` neighbors.
    ///
    /// Defaults: `epsilon = TIE_EPSILON` (1e-5).
    pub fn new(k: usize) -> Self {
        Self {
            k,
            epsilon: TIE_EPSILON,
        }
    }

    /// Sets the tie tolerance.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Returns the number of neighbors to return.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Returns the tie tolerance.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Validates this configuration.
    ///
    /// `k` is checked against the candidate count at query time; here only
    /// the tolerance is checked.
    pub fn validate(&self) -> Result<(), KnnError> {
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(KnnError::InvalidEpsilon {
                epsilon: self.epsilon,
            });
        }
        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::new(1)
    }
}
