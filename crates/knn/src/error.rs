//! Error types for the stars-knn crate.

/// Error type for all fallible operations in the stars-knn crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum KnnError {
    /// Returned when neighbors are requested from an empty candidate set.
    #[error("no candidates provided, cannot select {k} neighbors")]
    EmptyCandidates {
        /// The requested neighbor count.
        k: usize,
    },

    /// Returned when k exceeds the number of candidates.
    #[error("k must be <= {n_candidates} (number of candidates), got {k}")]
    InvalidK {
        /// The invalid k value.
        k: usize,
        /// Number of candidates available.
        n_candidates: usize,
    },

    /// Returned when the tie tolerance is non-finite or non-positive.
    #[error("epsilon must be finite and positive, got {epsilon}")]
    InvalidEpsilon {
        /// The invalid epsilon value.
        epsilon: f64,
    },

    /// Returned when the query or a candidate has a NaN or infinite coordinate.
    #[error("non-finite value in {input}")]
    NonFiniteInput {
        /// Name of the input containing the non-finite value.
        input: &'static str,
    },
}
