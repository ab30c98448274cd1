//! Fluent API for configuring tree queries.
//!
//! This module provides a builder-style carrier for the distance query
//! options: which spheroid (if any) measures the final answer, and the
//! early-exit cutoff.
//!
//! ## Example
//!
//! ```rust
//! use circletree::{build_tree, DistanceQuery, Geometry, Spheroid};
//!
//! let ga = Geometry::point(0.0, 0.0).unwrap();
//! let gb = Geometry::point(1.0, 0.0).unwrap();
//! let a = build_tree(&ga).unwrap();
//! let b = build_tree(&gb).unwrap();
//!
//! let meters = DistanceQuery::new()
//!     .on_spheroid(Spheroid::WGS84)
//!     .cutoff_meters(500.0)
//!     .between(&a, &b);
//! assert!(meters > 100_000.0);
//! ```

use crate::distance::{distance_with_stats, DistanceStats};
use crate::node::CircleNode;
use crate::spheroid::Spheroid;

/// Options for a tree-vs-tree distance query.
///
/// By default the answer is measured on a sphere of mean Earth radius and
/// the search runs to the exact minimum.
#[derive(Debug, Clone, Copy, Default)]
pub struct DistanceQuery {
    spheroid: Option<Spheroid>,
    cutoff_meters: f64,
}

impl DistanceQuery {
    /// Creates the default query: spherical answer, no early exit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Measures the final answer on the given spheroid.
    pub fn on_spheroid(mut self, spheroid: Spheroid) -> Self {
        self.spheroid = Some(spheroid);
        self
    }

    /// Stops the search as soon as any distance at or below this many
    /// meters is proven.
    pub fn cutoff_meters(mut self, meters: f64) -> Self {
        self.cutoff_meters = meters;
        self
    }

    /// Runs the query between two tree roots.
    pub fn between(&self, a: &CircleNode<'_>, b: &CircleNode<'_>) -> f64 {
        self.between_with_stats(a, b).0
    }

    /// Runs the query and also returns the search counters.
    pub fn between_with_stats(
        &self,
        a: &CircleNode<'_>,
        b: &CircleNode<'_>,
    ) -> (f64, DistanceStats) {
        distance_with_stats(a, b, self.spheroid.as_ref(), self.cutoff_meters)
    }
}
