//! Bounding-circle tree nodes and leaf construction.
//!
//! A [`CircleNode`] is a node of the geodetic bounding-volume hierarchy:
//! a circle on the sphere (center + angular radius) guaranteed to enclose
//! every vertex of its subtree. Leaves cover a single source edge and hold
//! borrowed references into the caller-owned vertex sequence; the tree
//! never copies or owns raw vertex memory. Internal nodes own their
//! children exclusively.
//!
//! Trees are batch-built bottom-up and read-only afterward, so shared
//! queries across threads need no synchronization.

use crate::geometry::{GeographicPoint, GeometryKind};
use crate::spherical::{add, from_unit_vector, great_circle_distance, normalize, to_unit_vector};

/// A leaf's source edge: two borrowed endpoints and the edge's position in
/// the original sequence. Both endpoints are the same reference for a
/// degenerate point leaf.
#[derive(Debug, Clone, Copy)]
pub struct Edge<'a> {
    pub(crate) start: &'a GeographicPoint,
    pub(crate) end: &'a GeographicPoint,
    pub(crate) index: usize,
}

/// A node of a geodetic bounding-circle tree.
///
/// The lifetime ties every tree to the coordinate sequence it indexes: a
/// tree borrows its leaf endpoints and can never outlive or mutate its
/// source geometry.
#[derive(Debug, Clone)]
pub struct CircleNode<'a> {
    pub(crate) center: GeographicPoint,
    pub(crate) radius: f64,
    pub(crate) children: Vec<CircleNode<'a>>,
    pub(crate) edge: Option<Edge<'a>>,
    pub(crate) kind: GeometryKind,
    pub(crate) outside_point: Option<GeographicPoint>,
}

impl<'a> CircleNode<'a> {
    /// Builds the leaf covering edge `(points[index], points[index + 1])`.
    ///
    /// The center is the renormalized sum of the endpoint unit vectors
    /// (the spherical midpoint) and the radius is half the great-circle
    /// distance between the endpoints. Returns `None` for a zero-length
    /// edge; degenerate edges never enter the leaf list.
    pub fn edge_leaf(points: &'a [GeographicPoint], index: usize) -> Option<Self> {
        let start = &points[index];
        let end = &points[index + 1];
        let span = great_circle_distance(start, end);
        if span == 0.0 {
            return None;
        }
        let (center, radius) = match normalize(add(to_unit_vector(start), to_unit_vector(end))) {
            Some(mid) => (from_unit_vector(mid), span / 2.0),
            // antipodal endpoints have no unique midpoint; cover the full
            // span from one end instead
            None => (*start, span),
        };
        Some(Self {
            center,
            radius,
            children: Vec::new(),
            edge: Some(Edge { start, end, index }),
            kind: GeometryKind::None,
            outside_point: None,
        })
    }

    /// Builds a degenerate leaf for a single point: radius zero, both
    /// edge endpoints the same reference.
    pub fn point_leaf(point: &'a GeographicPoint) -> Self {
        Self {
            center: *point,
            radius: 0.0,
            children: Vec::new(),
            edge: Some(Edge {
                start: point,
                end: point,
                index: 0,
            }),
            kind: GeometryKind::None,
            outside_point: None,
        }
    }

    /// The circle's center on the sphere.
    pub fn center(&self) -> &GeographicPoint {
        &self.center
    }

    /// The angular radius in radians enclosing the whole subtree.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Child nodes; empty exactly for leaves.
    pub fn children(&self) -> &[CircleNode<'a>] {
        &self.children
    }

    /// The classification tag at the top of this subtree.
    pub fn kind(&self) -> GeometryKind {
        self.kind
    }

    /// True when this node covers a single source edge.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// The borrowed endpoints of a leaf's source edge.
    pub fn edge_endpoints(&self) -> Option<(&'a GeographicPoint, &'a GeographicPoint)> {
        self.edge.as_ref().map(|e| (e.start, e.end))
    }

    /// The source edge index of a leaf.
    pub fn edge_index(&self) -> Option<usize> {
        self.edge.as_ref().map(|e| e.index)
    }

    /// A point proven to lie outside the polygon; present only on polygon
    /// subtree roots.
    pub fn outside_point(&self) -> Option<&GeographicPoint> {
        self.outside_point.as_ref()
    }

    /// One vertex of the subtree's source geometry, used as the
    /// representative for polygon containment short-circuits.
    pub(crate) fn representative(&self) -> Option<&'a GeographicPoint> {
        match &self.edge {
            Some(edge) => Some(edge.start),
            None => self.children.first().and_then(|c| c.representative()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(lon_deg: f64, lat_deg: f64) -> GeographicPoint {
        GeographicPoint::from_degrees(lon_deg, lat_deg).unwrap()
    }

    #[test]
    fn test_edge_leaf_midpoint_and_radius() {
        let points = vec![pt(0.0, 0.0), pt(10.0, 0.0)];
        let leaf = CircleNode::edge_leaf(&points, 0).unwrap();

        assert!(leaf.is_leaf());
        assert!((leaf.center().longitude() - 5.0_f64.to_radians()).abs() < 1e-9);
        assert!(leaf.center().latitude().abs() < 1e-12);
        assert!((leaf.radius() - 5.0_f64.to_radians()).abs() < 1e-9);
        assert_eq!(leaf.edge_index(), Some(0));
    }

    #[test]
    fn test_edge_leaf_encloses_endpoints() {
        let points = vec![pt(-3.5, 41.2), pt(2.25, 48.85)];
        let leaf = CircleNode::edge_leaf(&points, 0).unwrap();
        for p in &points {
            assert!(great_circle_distance(leaf.center(), p) <= leaf.radius() + 1e-9);
        }
    }

    #[test]
    fn test_edge_leaf_degenerate_is_none() {
        let points = vec![pt(7.0, 7.0), pt(7.0, 7.0)];
        assert!(CircleNode::edge_leaf(&points, 0).is_none());
    }

    #[test]
    fn test_point_leaf() {
        let p = pt(30.0, -20.0);
        let leaf = CircleNode::point_leaf(&p);
        assert_eq!(leaf.radius(), 0.0);
        let (start, end) = leaf.edge_endpoints().unwrap();
        assert_eq!(start, end);
        assert_eq!(leaf.center(), &p);
    }

    #[test]
    fn test_representative_is_a_source_vertex() {
        let points = vec![pt(1.0, 1.0), pt(2.0, 2.0)];
        let leaf = CircleNode::edge_leaf(&points, 0).unwrap();
        assert_eq!(leaf.representative(), Some(&points[0]));
    }
}
