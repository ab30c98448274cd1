//! # Circletree - Geodetic Bounding-Circle Trees
//!
//! This crate indexes longitude/latitude geometries with a bounding-volume
//! hierarchy of circles on the unit sphere and answers two queries against
//! it: point-in-polygon containment and minimum distance between two
//! indexed geometries.
//!
//! ## Features
//!
//! - **Bottom-Up Construction**: one bounding circle per source edge,
//!   merged k-ary (fan-out 8) into a single shallow root
//! - **Spherical Merge Math**: parent circles found by great-circle
//!   projection, with a cartesian fallback when the spherical formula is
//!   ill-conditioned
//! - **Locality-Sorted Assembly**: sibling subtrees sorted by a geohash
//!   cell key before merging, keeping circles tight and pruning effective
//! - **Stabbing-Line Containment**: crossing-number parity accelerated by
//!   the bounding circles
//! - **Branch-and-Bound Distance**: tree-vs-tree minimum distance with
//!   polygon containment short-circuit and early-exit cutoff
//! - **Borrowed Leaves**: a tree borrows the caller's vertex sequences and
//!   can never outlive or mutate them
//!
//! ## Quick Start
//!
//! ```rust
//! use circletree::{build_tree, contains, distance, GeographicPoint, Geometry};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let ring: Vec<GeographicPoint> = [
//!     (0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0), (0.0, 0.0),
//! ]
//! .iter()
//! .map(|&(lon, lat)| GeographicPoint::from_degrees(lon, lat))
//! .collect::<Result<_, _>>()?;
//!
//! let polygon = Geometry::polygon(vec![ring]);
//! let tree = build_tree(&polygon).expect("non-empty geometry");
//!
//! let inside = GeographicPoint::from_degrees(0.5, 0.5)?;
//! assert!(contains(&tree, &inside));
//!
//! let other = Geometry::point(3.0, 0.5)?;
//! let other_tree = build_tree(&other).expect("non-empty geometry");
//! assert!(distance(&tree, &other_tree, None, 0.0) > 0.0);
//! # Ok(())
//! # }
//! ```

// Core tree modules
pub mod builder;
pub mod node;

mod merge;

// Geometry and math modules
pub mod geohash;
pub mod geometry;
pub mod spherical;
pub mod spheroid;

// Query modules
pub mod contains;
pub mod distance;
pub mod query;

mod error;

// Re-export the tree types
pub use builder::build_tree;
pub use node::CircleNode;

// Re-export geometry types
pub use geometry::{GeographicPoint, Geometry, GeometryKind, EARTH_RADIUS_METERS};
pub use spheroid::Spheroid;

// Re-export the query engine
pub use contains::contains;
pub use distance::{distance, distance_with_stats, DistanceStats};
pub use query::DistanceQuery;

// Re-export error types
pub use error::{GeodesyError, GeodesyResult};
