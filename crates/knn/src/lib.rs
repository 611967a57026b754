//! Exact k-nearest-neighbor search over catalog points.
//!
//! Every candidate is ranked by Euclidean distance to the query point and
//! exactly `k` are returned. Candidates whose distance is within a fixed
//! tolerance (default [`TIE_EPSILON`] = 1e-5) of the rank-k distance are
//! tied; the result is filled from such a tie by drawing uniformly without
//! replacement, so repeated calls may return different, equally valid sets.
//! Everything strictly nearer than the tie is always included.
//!
//! # Quick start
//!
//! ```
//! use stars_catalog::Point;
//! use stars_knn::{SearchConfig, nearest_neighbors};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let points = vec![
//!     Point::new("1", "a", [1.0, 0.0, 0.0]),
//!     Point::new("2", "b", [2.0, 0.0, 0.0]),
//!     Point::new("3", "c", [0.0, 2.0, 0.0]),
//!     Point::new("4", "d", [3.0, 0.0, 0.0]),
//! ];
//! let candidates: Vec<&Point> = points.iter().collect();
//! let mut rng = StdRng::seed_from_u64(42);
//!
//! let result = nearest_neighbors(&candidates, &[0.0; 3], &SearchConfig::new(2), &mut rng).unwrap();
//! assert_eq!(result.len(), 2);
//! assert_eq!(result.neighbors()[0].point().id(), "1");
//! // The second neighbor is one of the two points at distance 2.
//! assert!(["2", "3"].contains(&result.neighbors()[1].point().id()));
//! ```
//!
//! # Architecture
//!
//! ```text
//! nearest_neighbors()
//!   ├─ validate inputs
//!   ├─ distances_into()              (distance.rs)
//!   ├─ sort_by_distance()            (select.rs)
//!   ├─ select_k_nearest()            (select.rs)
//!   │    ├─ tie_block()
//!   │    └─ sample_without_replacement()  (sample.rs)
//!   └─ map ranks back to candidates
//! ```
//!
//! For repeated queries, use [`nearest_neighbors_with_scratch`] with a
//! reusable [`SearchScratch`].

pub mod config;
pub mod distance;
pub mod error;
pub mod knn;
pub mod result;

pub(crate) mod sample;
pub(crate) mod select;

pub use config::{SearchConfig, TIE_EPSILON};
pub use distance::euclidean_distance;
pub use error::KnnError;
pub use knn::{SearchScratch, nearest_neighbors, nearest_neighbors_with_scratch};
pub use result::{Neighbor, SearchResult};
