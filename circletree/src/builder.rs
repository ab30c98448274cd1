//! Tree assembly for each geometry kind.
//!
//! Builders turn a [`Geometry`] descriptor into a single bounding-circle
//! tree root: one leaf per non-degenerate edge, a locality sort of sibling
//! subtrees, then the k-ary merge. Degenerate input is not an error here:
//! a line whose edges all collapse becomes a point leaf, and only a fully
//! empty geometry yields no tree at all.
//!
//! Sibling subtrees are sorted by the geohash key of their centers before
//! merging. Merging an unsorted list produces a deep tree with loose,
//! heavily overlapping circles; sorting keeps spatially nearby rings and
//! members under the same parent, which is what makes the bounding
//! circles tight enough for the query engine to prune effectively.

use std::f64::consts::PI;

use crate::geohash::{geohash_index, SORT_ORDER};
use crate::geometry::{Geometry, GeographicPoint, GeometryKind};
use crate::merge::merge_nodes;
use crate::node::CircleNode;
use crate::spherical::project;

/// Angular margin placed between a polygon's bounding circle and its
/// known-outside point.
const OUTSIDE_MARGIN: f64 = 0.05;

/// Builds the bounding-circle tree for a geometry.
///
/// Returns `None` only when the geometry holds no coordinates at all;
/// every non-empty input produces some valid (possibly trivial) tree. The
/// returned tree borrows the descriptor's vertex sequences and cannot
/// outlive it.
///
/// # Example
///
/// ```rust
/// use circletree::{build_tree, Geometry, GeographicPoint};
///
/// let line = Geometry::line(vec![
///     GeographicPoint::from_degrees(0.0, 0.0).unwrap(),
///     GeographicPoint::from_degrees(1.0, 1.0).unwrap(),
/// ]);
/// let tree = build_tree(&line).unwrap();
/// assert!(tree.radius() > 0.0);
/// ```
pub fn build_tree(geometry: &Geometry) -> Option<CircleNode<'_>> {
    match geometry {
        Geometry::Point(point) => {
            let mut leaf = CircleNode::point_leaf(point);
            leaf.kind = GeometryKind::Point;
            Some(leaf)
        }
        Geometry::Line(points) => {
            let mut root = edge_subtree(points)?;
            root.kind = GeometryKind::Line;
            Some(root)
        }
        Geometry::Polygon(rings) => build_polygon(rings),
        Geometry::Collection(members) => build_collection(members),
    }
}

/// Builds the subtree over one vertex sequence: a leaf per non-degenerate
/// edge, falling back to a single point leaf when every edge collapses.
/// The root is left unclassified; callers stamp the kind.
fn edge_subtree(points: &[GeographicPoint]) -> Option<CircleNode<'_>> {
    if points.is_empty() {
        return None;
    }
    let mut leaves: Vec<CircleNode<'_>> = (0..points.len().saturating_sub(1))
        .filter_map(|i| CircleNode::edge_leaf(points, i))
        .collect();
    if leaves.is_empty() {
        leaves.push(CircleNode::point_leaf(&points[0]));
    }
    merge_nodes(leaves)
}

fn build_polygon(rings: &[Vec<GeographicPoint>]) -> Option<CircleNode<'_>> {
    let mut subtrees: Vec<CircleNode<'_>> =
        rings.iter().filter_map(|ring| edge_subtree(ring)).collect();
    if subtrees.len() > 1 {
        sort_by_locality(&mut subtrees);
    }
    let mut root = merge_nodes(subtrees)?;
    root.kind = GeometryKind::Polygon;
    root.outside_point = Some(exterior_point(&root));
    log::debug!(
        "built polygon tree: {} rings, radius {:.6} rad",
        rings.len(),
        root.radius()
    );
    Some(root)
}

fn build_collection(members: &[Geometry]) -> Option<CircleNode<'_>> {
    let mut subtrees: Vec<CircleNode<'_>> = members.iter().filter_map(build_tree).collect();
    if subtrees.len() > 1 {
        sort_by_locality(&mut subtrees);
    }
    merge_nodes(subtrees)
}

/// Orders sibling subtrees by the geohash cell of their centers so that
/// spatially nearby subtrees share a parent after the k-ary merge.
fn sort_by_locality(subtrees: &mut [CircleNode<'_>]) {
    subtrees.sort_by_key(|node| geohash_index(node.center(), SORT_ORDER));
}

/// Picks a point guaranteed to lie outside the polygon: anything strictly
/// farther from the root center than the root radius is outside every
/// circle and therefore outside the geometry. Capped below π so the
/// projection stays meaningful for polygons that already cover most of
/// the sphere.
fn exterior_point(root: &CircleNode<'_>) -> GeographicPoint {
    let reach = (root.radius() + OUTSIDE_MARGIN).min(PI - OUTSIDE_MARGIN);
    project(root.center(), reach, 0.0)
}
