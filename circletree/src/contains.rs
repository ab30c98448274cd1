//! Point-in-polygon testing by stabbing-line crossing parity.
//!
//! The test draws a great-circle segment (the stabbing line) from the
//! query point to the polygon's stored known-outside point and counts how
//! many polygon edges it crosses: an odd count means the query point is
//! inside. The bounding circles prune whole subtrees whose circle the
//! stabbing line cannot reach, so only edges near the line are examined.
//!
//! A query point exactly on the boundary, or a stabbing line running
//! along an edge's great circle, is inherently ambiguous; polygon
//! validity (simple, non-self-touching rings) is a precondition, not
//! something this module verifies.

use crate::geometry::{GeographicPoint, GeometryKind};
use crate::node::CircleNode;
use crate::spherical::{
    arc_intersection, great_circle_distance, point_to_arc_distance, ARC_EPSILON,
};

/// Tests whether a point lies inside the polygon(s) indexed by `root`.
///
/// For a polygon root the crossing parity is evaluated directly. For a
/// multi-polygon or collection root the point is tested against every
/// polygon subtree, and containment in any member counts. Non-areal
/// geometry never contains a point.
///
/// # Example
///
/// ```rust
/// use circletree::{build_tree, contains, Geometry, GeographicPoint};
///
/// let ring: Vec<GeographicPoint> = [
///     (0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0), (0.0, 0.0),
/// ]
/// .iter()
/// .map(|&(lon, lat)| GeographicPoint::from_degrees(lon, lat).unwrap())
/// .collect();
/// let polygon = Geometry::polygon(vec![ring]);
/// let tree = build_tree(&polygon).unwrap();
///
/// let inside = GeographicPoint::from_degrees(0.5, 0.5).unwrap();
/// assert!(contains(&tree, &inside));
/// ```
pub fn contains(root: &CircleNode<'_>, point: &GeographicPoint) -> bool {
    match root.kind() {
        GeometryKind::Polygon => {
            let Some(outside) = root.outside_point() else {
                return false;
            };
            crossings(root, point, outside) % 2 == 1
        }
        kind if kind.is_aggregate() => root.children().iter().any(|child| contains(child, point)),
        _ => false,
    }
}

/// Counts how many edges below `node` the stabbing line crosses.
///
/// A subtree is pruned when the stabbing line cannot reach its bounding
/// circle. A grazing intersection at an edge's lower endpoint is not
/// counted, so a crossing exactly at the vertex shared by two consecutive
/// edges is only counted once.
fn crossings(node: &CircleNode<'_>, from: &GeographicPoint, to: &GeographicPoint) -> u32 {
    if point_to_arc_distance(node.center(), from, to) > node.radius() + ARC_EPSILON {
        return 0;
    }
    match node.edge_endpoints() {
        Some((start, end)) => {
            if start == end {
                return 0;
            }
            match arc_intersection(from, to, start, end) {
                Some(hit) if !touches_lower_endpoint(&hit, start, end) => 1,
                _ => 0,
            }
        }
        None => node
            .children()
            .iter()
            .map(|child| crossings(child, from, to))
            .sum(),
    }
}

/// True when the intersection point coincides with the edge endpoint of
/// lesser latitude (ties broken toward lesser longitude).
fn touches_lower_endpoint(
    hit: &GeographicPoint,
    start: &GeographicPoint,
    end: &GeographicPoint,
) -> bool {
    let lower = if start.latitude() < end.latitude()
        || (start.latitude() == end.latitude() && start.longitude() <= end.longitude())
    {
        start
    } else {
        end
    };
    great_circle_distance(hit, lower) < ARC_EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_tree;
    use crate::geometry::Geometry;

    fn pt(lon_deg: f64, lat_deg: f64) -> GeographicPoint {
        GeographicPoint::from_degrees(lon_deg, lat_deg).unwrap()
    }

    fn unit_square() -> Geometry {
        Geometry::polygon(vec![vec![
            pt(0.0, 0.0),
            pt(0.0, 1.0),
            pt(1.0, 1.0),
            pt(1.0, 0.0),
            pt(0.0, 0.0),
        ]])
    }

    #[test]
    fn test_contains_inside_square() {
        let square = unit_square();
        let tree = build_tree(&square).unwrap();
        assert!(contains(&tree, &pt(0.5, 0.5)));
    }

    #[test]
    fn test_contains_outside_square() {
        let square = unit_square();
        let tree = build_tree(&square).unwrap();
        assert!(!contains(&tree, &pt(2.0, 2.0)));
        assert!(!contains(&tree, &pt(-0.5, 0.5)));
        assert!(!contains(&tree, &pt(0.5, -3.0)));
    }

    #[test]
    fn test_contains_near_but_outside() {
        let square = unit_square();
        let tree = build_tree(&square).unwrap();
        assert!(!contains(&tree, &pt(1.001, 0.5)));
        assert!(contains(&tree, &pt(0.999, 0.5)));
    }

    #[test]
    fn test_polygon_with_hole() {
        // outer 0..10, hole 4..6: a point in the hole has even parity
        let polygon = Geometry::polygon(vec![
            vec![
                pt(0.0, 0.0),
                pt(0.0, 10.0),
                pt(10.0, 10.0),
                pt(10.0, 0.0),
                pt(0.0, 0.0),
            ],
            vec![
                pt(4.0, 4.0),
                pt(4.0, 6.0),
                pt(6.0, 6.0),
                pt(6.0, 4.0),
                pt(4.0, 4.0),
            ],
        ]);
        let tree = build_tree(&polygon).unwrap();
        assert!(contains(&tree, &pt(2.0, 2.0)));
        assert!(!contains(&tree, &pt(5.0, 5.0)));
    }

    #[test]
    fn test_contains_on_multi_polygon() {
        let squares = Geometry::collection(vec![
            Geometry::polygon(vec![vec![
                pt(0.0, 0.0),
                pt(0.0, 1.0),
                pt(1.0, 1.0),
                pt(1.0, 0.0),
                pt(0.0, 0.0),
            ]]),
            Geometry::polygon(vec![vec![
                pt(20.0, 20.0),
                pt(20.0, 21.0),
                pt(21.0, 21.0),
                pt(21.0, 20.0),
                pt(20.0, 20.0),
            ]]),
        ]);
        let tree = build_tree(&squares).unwrap();
        assert_eq!(tree.kind(), GeometryKind::MultiPolygon);
        assert!(contains(&tree, &pt(20.5, 20.5)));
        assert!(contains(&tree, &pt(0.5, 0.5)));
        assert!(!contains(&tree, &pt(10.0, 10.0)));
    }

    #[test]
    fn test_contains_rejects_non_areal_geometry() {
        let line = Geometry::line(vec![pt(0.0, 0.0), pt(1.0, 1.0)]);
        let tree = build_tree(&line).unwrap();
        assert!(!contains(&tree, &pt(0.5, 0.5)));
    }

    #[test]
    fn test_contains_large_polygon_many_vertices() {
        // a 36-gon approximating a circle of radius 5 degrees
        let center = (10.0, 10.0);
        let mut ring: Vec<GeographicPoint> = (0..36)
            .map(|i| {
                let angle = (i as f64) * 10.0_f64.to_radians();
                pt(
                    center.0 + 5.0 * angle.cos(),
                    center.1 + 5.0 * angle.sin(),
                )
            })
            .collect();
        ring.push(ring[0]);
        let polygon = Geometry::polygon(vec![ring]);
        let tree = build_tree(&polygon).unwrap();

        assert!(contains(&tree, &pt(10.3, 10.2)));
        assert!(contains(&tree, &pt(12.0, 11.0)));
        assert!(!contains(&tree, &pt(16.0, 10.0)));
        assert!(!contains(&tree, &pt(10.0, 16.5)));
    }
}
