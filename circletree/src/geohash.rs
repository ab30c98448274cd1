//! Geohash cell indexing for spatial locality.
//!
//! A geohash interleaves longitude and latitude bits into a single integer
//! whose numeric order is a locality-preserving walk over the sphere:
//! points that are close in 2D stay close along the key. The tree builders
//! sort sibling subtrees by this key before merging, which is what keeps
//! parent circles tight and the tree shallow.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::geometry::GeographicPoint;

/// Maximum interleaving order (bits per dimension).
const MAX_GEOHASH_ORDER: u32 = 32;

/// Bits per dimension used when sorting subtrees.
pub(crate) const SORT_ORDER: u32 = 16;

/// Encodes a geographic point to a geohash cell index.
///
/// # Arguments
/// * `point` - The point to encode
/// * `order` - Bits per dimension (1-32, higher = more precision)
///
/// # Returns
/// The interleaved cell index as u64 (2*order significant bits).
pub fn geohash_index(point: &GeographicPoint, order: u32) -> u64 {
    debug_assert!(
        order > 0 && order <= MAX_GEOHASH_ORDER,
        "order must be 1-32"
    );

    // Normalize longitude/latitude into [0, 1] and discretize.
    let x = (point.longitude() + PI) / (2.0 * PI);
    let y = (point.latitude() + FRAC_PI_2) / PI;

    let n = 1u64 << order;
    let xi = ((x * n as f64) as u64).min(n - 1);
    let yi = ((y * n as f64) as u64).min(n - 1);

    interleave(xi, yi, order)
}

/// Interleaves the bits of two cell coordinates, longitude bits first.
fn interleave(x: u64, y: u64, order: u32) -> u64 {
    let mut key = 0u64;
    for bit in (0..order).rev() {
        key = (key << 1) | ((x >> bit) & 1);
        key = (key << 1) | ((y >> bit) & 1);
    }
    key
}
