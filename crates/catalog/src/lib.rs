//! Star catalog model and loader.
//!
//! A [`Catalog`] is an ordered list of [`Point`]s read once from a delimited
//! file (`id, label, x, y, z` per record) and then only borrowed by queries.
//!
//! ```
//! use stars_catalog::{ReaderConfig, parse_catalog};
//!
//! let text = "StarID,ProperName,X,Y,Z\n0,Sol,0,0,0\n1,Barnard's Star,-0.01,-1.8,0.15\n";
//! let catalog = parse_catalog(text.as_bytes(), &ReaderConfig::default()).unwrap();
//!
//! assert_eq!(catalog.len(), 2);
//! let (index, sol) = catalog.find_by_label("Sol").unwrap();
//! assert_eq!(sol.id(), "0");
//! assert_eq!(catalog.candidates_excluding(index).len(), 1);
//! ```

pub mod catalog;
pub mod error;
pub mod point;
pub mod reader;

pub use catalog::Catalog;
pub use error::CatalogError;
pub use point::{Coords, Point};
pub use reader::{ReaderConfig, parse_catalog, read_catalog};
