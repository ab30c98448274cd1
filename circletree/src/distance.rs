//! Minimum distance between two bounding-circle trees.
//!
//! A branch-and-bound search over pairs of subtrees. For any pair, the
//! great-circle distance between the two centers minus both radii is a
//! lower bound on the distance between their contents, and the same sum
//! with a plus is an upper bound; pairs whose lower bound exceeds the
//! tightest upper bound proven so far are discarded without descending.
//!
//! Two further rules shape the recursion:
//! - a polygon side swallows any primitive whose representative vertex it
//!   contains, reducing the distance to exactly zero without touching a
//!   single edge pair;
//! - aggregate (multi/collection) sides are descended before plain
//!   structure, so the search reaches polygon-vs-primitive pairings as
//!   early as possible.
//!
//! The search itself runs on the unit sphere; the final answer is
//! re-derived from the winning point pair, optionally on a spheroid.

use crate::contains::contains;
use crate::geometry::{GeographicPoint, GeometryKind, EARTH_RADIUS_METERS};
use crate::node::CircleNode;
use crate::spherical::{arc_intersection, closest_point_on_arc, great_circle_distance};
use crate::spheroid::Spheroid;

/// Counters describing one distance search.
///
/// Useful for verifying pruning behavior and for tuning; the zero-distance
/// short-circuit in particular is observable as a search that evaluated no
/// leaf pairs at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct DistanceStats {
    /// Subtree pairs examined.
    pub node_pairs_visited: u64,
    /// Subtree pairs discarded by the bound test.
    pub node_pairs_pruned: u64,
    /// Exact leaf-to-leaf kernels evaluated.
    pub leaf_pairs_evaluated: u64,
    /// Times a polygon containment test ended the search at zero.
    pub polygon_short_circuits: u64,
}

/// Accumulator state threaded through the recursion.
struct SearchState {
    /// Best exact distance found so far (radians).
    min_dist: f64,
    /// Tightest proven upper bound on the answer (radians).
    max_dist: f64,
    /// The closest point pair found so far.
    best: Option<(GeographicPoint, GeographicPoint)>,
    /// Early-exit threshold (radians); the search stops once `min_dist`
    /// falls to or below it.
    cutoff: f64,
    stats: DistanceStats,
}

impl SearchState {
    fn new(cutoff: f64) -> Self {
        Self {
            min_dist: f64::INFINITY,
            max_dist: f64::INFINITY,
            best: None,
            cutoff,
            stats: DistanceStats::default(),
        }
    }

    fn done(&self) -> bool {
        self.min_dist == 0.0 || self.min_dist <= self.cutoff
    }

    fn record(&mut self, dist: f64, pair: (GeographicPoint, GeographicPoint)) {
        if dist < self.min_dist {
            self.min_dist = dist;
            self.best = Some(pair);
        }
        if dist < self.max_dist {
            self.max_dist = dist;
        }
    }
}

/// Minimum distance in meters between the geometries indexed by two trees.
///
/// # Arguments
/// * `a`, `b` - Tree roots built by [`crate::build_tree`]
/// * `spheroid` - When present, the winning point pair is measured on this
///   spheroid; otherwise on a sphere of mean Earth radius
/// * `cutoff_meters` - Early-exit threshold: the search stops as soon as
///   any distance at or below this is proven. Pass 0.0 for the exact
///   minimum.
pub fn distance(
    a: &CircleNode<'_>,
    b: &CircleNode<'_>,
    spheroid: Option<&Spheroid>,
    cutoff_meters: f64,
) -> f64 {
    distance_with_stats(a, b, spheroid, cutoff_meters).0
}

/// Like [`distance`], additionally returning the search counters.
pub fn distance_with_stats(
    a: &CircleNode<'_>,
    b: &CircleNode<'_>,
    spheroid: Option<&Spheroid>,
    cutoff_meters: f64,
) -> (f64, DistanceStats) {
    let mut cutoff = cutoff_meters / EARTH_RADIUS_METERS;
    if !cutoff.is_finite() {
        cutoff = 0.0;
    }
    let mut state = SearchState::new(cutoff.max(0.0));
    search(a, b, &mut state);
    log::debug!(
        "distance search: {} node pairs, {} pruned, {} leaf pairs, {} short circuits",
        state.stats.node_pairs_visited,
        state.stats.node_pairs_pruned,
        state.stats.leaf_pairs_evaluated,
        state.stats.polygon_short_circuits
    );

    let meters = match (&state.best, spheroid) {
        (Some((p, q)), Some(s)) => s.distance_meters(p, q),
        (Some((p, q)), None) => great_circle_distance(p, q) * EARTH_RADIUS_METERS,
        (None, _) => f64::INFINITY,
    };
    (meters, state.stats)
}

fn search(a: &CircleNode<'_>, b: &CircleNode<'_>, state: &mut SearchState) {
    if state.done() {
        return;
    }
    state.stats.node_pairs_visited += 1;

    let d = great_circle_distance(a.center(), b.center());
    let lower = (d - a.radius() - b.radius()).max(0.0);
    let upper = d + a.radius() + b.radius();
    if upper < state.max_dist {
        state.max_dist = upper;
    }
    if lower > state.max_dist {
        state.stats.node_pairs_pruned += 1;
        return;
    }

    if short_circuit(a, b, state) || short_circuit(b, a, state) {
        return;
    }

    if a.kind().is_aggregate() && b.kind().is_aggregate() {
        for child_a in a.children() {
            for child_b in b.children() {
                search(child_a, child_b, state);
                if state.done() {
                    return;
                }
            }
        }
    } else if a.kind().is_aggregate() {
        for child_a in a.children() {
            search(child_a, b, state);
            if state.done() {
                return;
            }
        }
    } else if b.kind().is_aggregate() {
        for child_b in b.children() {
            search(a, child_b, state);
            if state.done() {
                return;
            }
        }
    } else if a.is_leaf() && b.is_leaf() {
        leaf_distance(a, b, state);
    } else if !a.is_leaf() && (b.is_leaf() || a.radius() >= b.radius()) {
        for child_a in a.children() {
            search(child_a, b, state);
            if state.done() {
                return;
            }
        }
    } else {
        for child_b in b.children() {
            search(a, child_b, state);
            if state.done() {
                return;
            }
        }
    }
}

/// Ends the search at exactly zero when `poly` is a polygon subtree root
/// and a representative vertex of the primitive `other` lies inside it.
fn short_circuit(
    poly: &CircleNode<'_>,
    other: &CircleNode<'_>,
    state: &mut SearchState,
) -> bool {
    if poly.kind() != GeometryKind::Polygon || !other.kind().is_primitive() {
        return false;
    }
    let Some(representative) = other.representative() else {
        return false;
    };
    if contains(poly, representative) {
        state.stats.polygon_short_circuits += 1;
        state.record(0.0, (*representative, *representative));
        return true;
    }
    false
}

/// Exact distance between two leaves: point-to-point, point-to-arc, or
/// arc-to-arc (zero when the arcs cross, otherwise the minimum of the
/// four endpoint-to-opposite-arc distances).
fn leaf_distance(a: &CircleNode<'_>, b: &CircleNode<'_>, state: &mut SearchState) {
    let (Some((a1, a2)), Some((b1, b2))) = (a.edge_endpoints(), b.edge_endpoints()) else {
        return;
    };
    state.stats.leaf_pairs_evaluated += 1;

    let a_is_point = a1 == a2;
    let b_is_point = b1 == b2;

    match (a_is_point, b_is_point) {
        (true, true) => {
            state.record(great_circle_distance(a1, b1), (*a1, *b1));
        }
        (true, false) => {
            let closest = closest_point_on_arc(a1, b1, b2);
            state.record(great_circle_distance(a1, &closest), (*a1, closest));
        }
        (false, true) => {
            let closest = closest_point_on_arc(b1, a1, a2);
            state.record(great_circle_distance(b1, &closest), (closest, *b1));
        }
        (false, false) => {
            if let Some(hit) = arc_intersection(a1, a2, b1, b2) {
                state.record(0.0, (hit, hit));
                return;
            }
            for (point, arc_start, arc_end, point_first) in [
                (a1, b1, b2, true),
                (a2, b1, b2, true),
                (b1, a1, a2, false),
                (b2, a1, a2, false),
            ] {
                let closest = closest_point_on_arc(point, arc_start, arc_end);
                let dist = great_circle_distance(point, &closest);
                if point_first {
                    state.record(dist, (*point, closest));
                } else {
                    state.record(dist, (closest, *point));
                }
            }
        }
    }
}
