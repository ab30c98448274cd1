//! Geometry descriptors for geodetic indexing.
//!
//! This module provides the value types handed to the tree builders:
//! - GeographicPoint: a longitude/latitude pair in radians
//! - Geometry: the tagged union of indexable shapes (point, line, polygon
//!   with rings, collection)
//! - GeometryKind: the classification tag carried by subtree roots
//!
//! Coordinates are always geodetic (angles on the sphere), never planar.
//! A `GeographicPoint` is normalized on creation so that every downstream
//! formula can assume longitude in [-π, π] and latitude in [-π/2, π/2].

use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt::{self, Display};

use crate::error::{GeodesyError, GeodesyResult};

/// Mean Earth radius in meters (WGS84)
pub const EARTH_RADIUS_METERS: f64 = 6_371_008.8;

/// A geographic point with longitude and latitude in radians.
///
/// The constructor normalizes longitude into [-π, π] and latitude into
/// [-π/2, π/2], so two points that name the same location compare equal
/// after construction. The type is `Copy` and immutable; the tree stores
/// borrowed references to caller-owned sequences of these.
///
/// ## Example
///
/// ```rust
/// use circletree::GeographicPoint;
///
/// let minneapolis = GeographicPoint::from_degrees(-93.265, 45.0).unwrap();
/// assert!((minneapolis.latitude_degrees() - 45.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeographicPoint {
    longitude: f64,
    latitude: f64,
}

impl GeographicPoint {
    /// Creates a point from radians, normalizing out-of-range values.
    pub fn new(longitude: f64, latitude: f64) -> Self {
        let longitude = if (-PI..=PI).contains(&longitude) {
            longitude
        } else {
            (longitude + PI).rem_euclid(2.0 * PI) - PI
        };
        let latitude = latitude.clamp(-FRAC_PI_2, FRAC_PI_2);
        Self { longitude, latitude }
    }

    /// Creates a point from degrees with range validation.
    ///
    /// # Arguments
    /// * `longitude` - Longitude in degrees (-180 to 180)
    /// * `latitude` - Latitude in degrees (-90 to 90)
    ///
    /// # Errors
    /// Returns an error if either coordinate is out of its valid range.
    pub fn from_degrees(longitude: f64, latitude: f64) -> GeodesyResult<Self> {
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(GeodesyError::InvalidCoordinate(format!(
                "Longitude must be between -180 and 180 degrees, got: {}",
                longitude
            )));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(GeodesyError::InvalidCoordinate(format!(
                "Latitude must be between -90 and 90 degrees, got: {}",
                latitude
            )));
        }
        Ok(Self::new(longitude.to_radians(), latitude.to_radians()))
    }

    /// Gets the longitude in radians.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Gets the latitude in radians.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Gets the longitude in degrees.
    pub fn longitude_degrees(&self) -> f64 {
        self.longitude.to_degrees()
    }

    /// Gets the latitude in degrees.
    pub fn latitude_degrees(&self) -> f64 {
        self.latitude.to_degrees()
    }
}

impl Display for GeographicPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GeographicPoint(lon={:.6}, lat={:.6})",
            self.longitude_degrees(),
            self.latitude_degrees()
        )
    }
}

/// Classification tag carried by the root of each subtree.
///
/// The tag is consulted only by the query engine (recursion ordering and
/// the polygon containment short-circuit); it plays no role during
/// bottom-up construction until subtrees are merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GeometryKind {
    /// Interior structure of a single primitive; no classification.
    #[default]
    None,
    Point,
    Line,
    Polygon,
    MultiPoint,
    MultiLine,
    MultiPolygon,
    Collection,
}

impl GeometryKind {
    /// The multi-part kind covering repeated occurrences of `self`.
    pub(crate) fn to_multi(self) -> Self {
        match self {
            GeometryKind::Point => GeometryKind::MultiPoint,
            GeometryKind::Line => GeometryKind::MultiLine,
            GeometryKind::Polygon => GeometryKind::MultiPolygon,
            other => other,
        }
    }

    /// True for a single point, line, or polygon.
    pub fn is_primitive(self) -> bool {
        matches!(
            self,
            GeometryKind::Point | GeometryKind::Line | GeometryKind::Polygon
        )
    }

    /// True for kinds that aggregate independent member geometries.
    pub fn is_aggregate(self) -> bool {
        matches!(
            self,
            GeometryKind::MultiPoint
                | GeometryKind::MultiLine
                | GeometryKind::MultiPolygon
                | GeometryKind::Collection
        )
    }
}

/// A geometry that can be indexed by a bounding-circle tree.
///
/// This is the flat form produced by upstream geometry decoding: every
/// shape is an ordered sequence of points per ring or line, plus a
/// classification. Multi-part shapes are expressed as collections and
/// reclassified during the merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    /// A single point.
    Point(GeographicPoint),
    /// An open line or a closed ring, as an ordered vertex sequence.
    Line(Vec<GeographicPoint>),
    /// A polygon as a sequence of rings (exterior first by convention).
    Polygon(Vec<Vec<GeographicPoint>>),
    /// A collection of member geometries.
    Collection(Vec<Geometry>),
}

impl Geometry {
    /// Creates a point geometry from degree coordinates.
    ///
    /// # Errors
    /// Returns an error if either coordinate is out of range.
    pub fn point(longitude_degrees: f64, latitude_degrees: f64) -> GeodesyResult<Self> {
        Ok(Geometry::Point(GeographicPoint::from_degrees(
            longitude_degrees,
            latitude_degrees,
        )?))
    }

    /// Creates a line geometry from a vertex sequence.
    pub fn line(points: Vec<GeographicPoint>) -> Self {
        Geometry::Line(points)
    }

    /// Creates a polygon geometry from its rings.
    pub fn polygon(rings: Vec<Vec<GeographicPoint>>) -> Self {
        Geometry::Polygon(rings)
    }

    /// Creates a collection from member geometries.
    pub fn collection(members: Vec<Geometry>) -> Self {
        Geometry::Collection(members)
    }

    /// The static classification of this descriptor.
    pub fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Point(_) => GeometryKind::Point,
            Geometry::Line(_) => GeometryKind::Line,
            Geometry::Polygon(_) => GeometryKind::Polygon,
            Geometry::Collection(_) => GeometryKind::Collection,
        }
    }

    /// True when there is nothing to index.
    pub fn is_empty(&self) -> bool {
        match self {
            Geometry::Point(_) => false,
            Geometry::Line(points) => points.is_empty(),
            Geometry::Polygon(rings) => rings.iter().all(|r| r.is_empty()),
            Geometry::Collection(members) => members.iter().all(|m| m.is_empty()),
        }
    }
}

impl Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_seq(f: &mut fmt::Formatter<'_>, points: &[GeographicPoint]) -> fmt::Result {
            for (i, p) in points.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{} {}", p.longitude_degrees(), p.latitude_degrees())?;
            }
            Ok(())
        }
        match self {
            Geometry::Point(p) => {
                write!(
                    f,
                    "POINT({} {})",
                    p.longitude_degrees(),
                    p.latitude_degrees()
                )
            }
            Geometry::Line(points) => {
                write!(f, "LINESTRING(")?;
                write_seq(f, points)?;
                write!(f, ")")
            }
            Geometry::Polygon(rings) => {
                write!(f, "POLYGON(")?;
                for (i, ring) in rings.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "(")?;
                    write_seq(f, ring)?;
                    write!(f, ")")?;
                }
                write!(f, ")")
            }
            Geometry::Collection(members) => {
                write!(f, "GEOMETRYCOLLECTION(")?;
                for (i, m) in members.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", m)?;
                }
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_normalization() {
        let p = GeographicPoint::new(3.0 * PI, 0.5);
        assert!((-PI..=PI).contains(&p.longitude()));
        assert!((p.longitude() - PI).abs() < 1e-12 || (p.longitude() + PI).abs() < 1e-12);

        let in_range = GeographicPoint::new(1.0, -0.5);
        assert_eq!(in_range.longitude(), 1.0);
        assert_eq!(in_range.latitude(), -0.5);
    }

    #[test]
    fn test_latitude_clamped() {
        let p = GeographicPoint::new(0.0, 2.0);
        assert_eq!(p.latitude(), FRAC_PI_2);
    }

    #[test]
    fn test_from_degrees_valid() {
        let p = GeographicPoint::from_degrees(-93.265, 45.0).unwrap();
        assert!((p.longitude_degrees() - -93.265).abs() < 1e-12);
        assert!((p.latitude_degrees() - 45.0).abs() < 1e-12);
    }

    #[test]
    fn test_from_degrees_invalid_longitude() {
        assert!(GeographicPoint::from_degrees(181.0, 0.0).is_err());
    }

    #[test]
    fn test_from_degrees_invalid_latitude() {
        assert!(GeographicPoint::from_degrees(0.0, 91.0).is_err());
    }

    #[test]
    fn test_kind_promotion_helpers() {
        assert_eq!(GeometryKind::Point.to_multi(), GeometryKind::MultiPoint);
        assert_eq!(GeometryKind::Line.to_multi(), GeometryKind::MultiLine);
        assert_eq!(
            GeometryKind::MultiPolygon.to_multi(),
            GeometryKind::MultiPolygon
        );
        assert!(GeometryKind::Polygon.is_primitive());
        assert!(!GeometryKind::Polygon.is_aggregate());
        assert!(GeometryKind::Collection.is_aggregate());
    }

    #[test]
    fn test_geometry_is_empty() {
        assert!(Geometry::Line(vec![]).is_empty());
        assert!(Geometry::Polygon(vec![]).is_empty());
        assert!(Geometry::Collection(vec![]).is_empty());
        assert!(!Geometry::point(0.0, 0.0).unwrap().is_empty());

        let nested = Geometry::collection(vec![Geometry::Line(vec![]), Geometry::Polygon(vec![])]);
        assert!(nested.is_empty());
    }

    #[test]
    fn test_geometry_display() {
        let p = Geometry::point(10.0, 20.0).unwrap();
        assert_eq!(format!("{}", p), "POINT(10 20)");
    }

    #[test]
    fn test_serialization() {
        let p = GeographicPoint::from_degrees(12.5, -33.25).unwrap();
        let json = serde_json::to_string(&p).unwrap();
        let back: GeographicPoint = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }
}
