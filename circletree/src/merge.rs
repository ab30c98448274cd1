//! Circle merge engine.
//!
//! Folds child bounding circles into an enclosing parent circle and rolls
//! the geometry classification upward at the same time. The merge is the
//! numerically delicate part of construction: the parent center is found
//! by projecting along the bearing between the two child centers, and
//! when that bearing is undefined (coincident or antipodal centers) the
//! fold switches to a chord interpolation through 3-space and pads the
//! radius to stay enclosing.

use crate::geometry::{GeographicPoint, GeometryKind};
use crate::node::CircleNode;
use crate::spherical::{
    add, from_unit_vector, great_circle_distance, initial_bearing, normalize, project, scale,
    to_unit_vector,
};

/// Children per internal node. Grouping more than two children per parent
/// keeps the tree shallow; recursion depth is O(log8 n).
pub(crate) const NODE_FANOUT: usize = 8;

/// Radius padding applied when the chord-interpolation fallback replaces
/// the spherical projection. The interpolated center is less precise, so
/// the circle is widened to keep the enclosure invariant.
const FALLBACK_INFLATION: f64 = 1.1;

/// A circle summary during merging: center, angular radius, and the
/// classification rolled up so far.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Circle {
    pub center: GeographicPoint,
    pub radius: f64,
    pub kind: GeometryKind,
}

/// Folds a non-empty list of circles left-to-right into one enclosing
/// circle.
pub(crate) fn merge_circles(circles: &[Circle]) -> Circle {
    let mut merged = circles[0];
    for next in &circles[1..] {
        merged = merge_pair(merged, *next);
    }
    merged
}

fn merge_pair(current: Circle, next: Circle) -> Circle {
    let kind = promote(current.kind, next.kind);
    let d = great_circle_distance(&current.center, &next.center);

    if d == 0.0 {
        // co-located centers keep the running circle as-is
        return Circle {
            center: current.center,
            radius: current.radius + 2.0 * d,
            kind,
        };
    }

    if d < (current.radius - next.radius).abs() {
        // one circle already contains the other; adopt the larger
        let larger = if current.radius >= next.radius {
            current
        } else {
            next
        };
        return Circle {
            center: larger.center,
            radius: larger.radius,
            kind,
        };
    }

    let diameter = d + current.radius + next.radius;
    let radius = diameter / 2.0;
    let offset = next.radius + (diameter - 2.0 * current.radius - 2.0 * next.radius) / 2.0;

    match initial_bearing(&current.center, &next.center, d) {
        Some(bearing) => Circle {
            center: project(&current.center, offset, bearing),
            radius,
            kind,
        },
        None => Circle {
            center: chord_interpolate(&current.center, &next.center, offset / d),
            radius: radius * FALLBACK_INFLATION,
            kind,
        },
    }
}

/// Interpolates between two centers through 3-space and renormalizes back
/// onto the sphere. Used only when the spherical projection is
/// ill-conditioned.
fn chord_interpolate(a: &GeographicPoint, b: &GeographicPoint, t: f64) -> GeographicPoint {
    let va = to_unit_vector(a);
    let vb = to_unit_vector(b);
    let blended = add(scale(va, 1.0 - t), scale(vb, t));
    match normalize(blended) {
        Some(v) => from_unit_vector(v),
        None => *a,
    }
}

/// Rolls two classification tags into the tag of their union.
///
/// `None` is the identity; repeating a primitive kind yields its
/// multi-part kind; a multi-part kind absorbs its own primitive; any other
/// mixture is an anonymous collection.
pub(crate) fn promote(a: GeometryKind, b: GeometryKind) -> GeometryKind {
    match (a, b) {
        (GeometryKind::None, k) | (k, GeometryKind::None) => k,
        (a, b) if a == b => a.to_multi(),
        (GeometryKind::MultiPoint, GeometryKind::Point)
        | (GeometryKind::Point, GeometryKind::MultiPoint) => GeometryKind::MultiPoint,
        (GeometryKind::MultiLine, GeometryKind::Line)
        | (GeometryKind::Line, GeometryKind::MultiLine) => GeometryKind::MultiLine,
        (GeometryKind::MultiPolygon, GeometryKind::Polygon)
        | (GeometryKind::Polygon, GeometryKind::MultiPolygon) => GeometryKind::MultiPolygon,
        _ => GeometryKind::Collection,
    }
}

/// Merges a list of nodes into a single root, grouping [`NODE_FANOUT`]
/// children per parent and repeating level by level. Returns `None` only
/// for an empty list.
pub(crate) fn merge_nodes(mut nodes: Vec<CircleNode<'_>>) -> Option<CircleNode<'_>> {
    if nodes.is_empty() {
        return None;
    }
    while nodes.len() > 1 {
        let mut parents = Vec::with_capacity(nodes.len().div_ceil(NODE_FANOUT));
        let mut remaining = nodes.into_iter().peekable();
        while remaining.peek().is_some() {
            let group: Vec<CircleNode<'_>> = remaining.by_ref().take(NODE_FANOUT).collect();
            parents.push(parent_of(group));
        }
        nodes = parents;
    }
    nodes.pop()
}

/// Wraps a group of siblings in a parent whose circle is the fold of
/// theirs. A group of one is hoisted unchanged.
fn parent_of(mut children: Vec<CircleNode<'_>>) -> CircleNode<'_> {
    if children.len() == 1 {
        return children.remove(0);
    }
    let circles: Vec<Circle> = children
        .iter()
        .map(|c| Circle {
            center: c.center,
            radius: c.radius,
            kind: c.kind,
        })
        .collect();
    let merged = merge_circles(&circles);
    CircleNode {
        center: merged.center,
        radius: merged.radius,
        children,
        edge: None,
        kind: merged.kind,
        outside_point: None,
    }
}
