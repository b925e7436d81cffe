//! # geozset-types
//!
//! Core data types for radius search over geohash-scored sorted sets.
//!
//! - **Point types**: `GeoPoint`, `GeoKey`
//! - **Query types**: `GeoRange`
//! - **Result types**: `Candidate`, `RankedResult`
//!
//! All types are serializable with Serde and built on top of the `geo` crate's
//! geometric primitives.
//!
//! ## Examples
//!
//! ```rust
//! use geozset_types::key::GeoKey;
//!
//! let philly = GeoKey::new(39.9523, -75.1638, "Philadelphia");
//! assert_eq!(philly.point().lat(), 39.9523);
//! ```

pub mod key;
pub mod point;
pub mod range;
pub mod result;
