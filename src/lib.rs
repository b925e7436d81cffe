//! Radius search over geohash-scored sorted sets.
//!
//! Labelled coordinates are stored as members of a score-ordered collection
//! whose score is an integer geohash. A radius search never needs a spatial
//! index: it picks a geohash depth matching the radius, turns the centre
//! cell and its neighbours into a handful of contiguous score ranges, scans
//! those ranges, and re-ranks the hits by great-circle distance.
//!
//! ## Search pipeline
//! - **Precision**: radius → search bit depth ([`PrecisionTable`])
//! - **Ranges**: centre cell + 8 neighbours → merged score ranges ([`ranges::decompose`])
//! - **Scan**: one store scan per range ([`ScoredStore`])
//! - **Ranking**: decode, measure, sort, truncate ([`ranking::rank`])
//!
//! Results are cell based, not an exact radius filter: members just outside
//! the radius but inside a scanned cell are returned, ordered by distance.
//!
//! ```rust
//! use geozset::{GeoIndex, GeoKey};
//!
//! let index = GeoIndex::memory();
//! index.add_coordinates(
//!     "cities",
//!     52,
//!     &[
//!         GeoKey::new(43.6667, -79.4167, "Toronto"),
//!         GeoKey::new(39.9523, -75.1638, "Philadelphia"),
//!     ],
//! )?;
//!
//! let nearby = index.search_by_radius("cities", 39.9523, -75.1638, 5000.0, 52)?;
//! assert_eq!(nearby, vec!["Philadelphia"]);
//!
//! index.remove_coordinates_by_keys("cities", &["Toronto", "Philadelphia"])?;
//! assert!(index.is_empty("cities")?);
//! # Ok::<(), geozset::GeoError>(())
//! ```

pub mod builder;
pub mod codec;
pub mod config;
pub mod error;
pub mod index;
pub mod precision;
pub mod ranges;
pub mod ranking;
pub mod storage;
pub mod validation;

pub use builder::GeoIndexBuilder;
pub use config::{Config, ScanCap};
pub use error::{GeoError, Result};
pub use index::GeoIndex;
pub use precision::PrecisionTable;
pub use storage::{MemoryBackend, ScoredMember, ScoredStore, StorageStats};

pub use geozset_types::key::GeoKey;
pub use geozset_types::point::GeoPoint;
pub use geozset_types::range::GeoRange;
pub use geozset_types::result::{Candidate, RankedResult};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{GeoError, GeoIndex, GeoIndexBuilder, Result};

    pub use crate::{GeoKey, GeoPoint, RankedResult};

    pub use crate::{Config, PrecisionTable, ScanCap};

    pub use crate::{MemoryBackend, ScoredStore};

    // Re-export geo types for convenience
    pub use geo::Point;
}
