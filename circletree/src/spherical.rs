//! Spherical trigonometry primitives on the unit sphere.
//!
//! Pure functions over [`GeographicPoint`] and 3D unit vectors. Nothing in
//! here keeps state, and numerical failure is reported through `Option`
//! return values rather than errors or panics: a caller that receives
//! `None` from [`initial_bearing`] must branch on it, never substitute a
//! default angle.
//!
//! All distances and radii are angles in radians; multiply by an Earth
//! radius to obtain meters.

use crate::geometry::GeographicPoint;

/// Tolerance below which a vector magnitude counts as degenerate.
pub(crate) const DEGENERATE_EPSILON: f64 = 1e-12;

/// Tolerance for arc containment and endpoint-touch checks.
pub(crate) const ARC_EPSILON: f64 = 1e-9;

/// Converts a geographic point to a 3D unit vector.
pub fn to_unit_vector(p: &GeographicPoint) -> [f64; 3] {
    let (sin_lat, cos_lat) = p.latitude().sin_cos();
    let (sin_lon, cos_lon) = p.longitude().sin_cos();
    [cos_lat * cos_lon, cos_lat * sin_lon, sin_lat]
}

/// Converts a 3D unit vector back to a geographic point.
pub fn from_unit_vector(v: [f64; 3]) -> GeographicPoint {
    let latitude = v[2].clamp(-1.0, 1.0).asin();
    let longitude = v[1].atan2(v[0]);
    GeographicPoint::new(longitude, latitude)
}

pub(crate) fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

pub(crate) fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

pub(crate) fn scale(v: [f64; 3], s: f64) -> [f64; 3] {
    [v[0] * s, v[1] * s, v[2] * s]
}

pub(crate) fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

pub(crate) fn add(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

pub(crate) fn magnitude(v: [f64; 3]) -> f64 {
    dot(v, v).sqrt()
}

/// Normalizes a vector to unit length, or `None` when its magnitude is
/// too small to define a direction.
pub(crate) fn normalize(v: [f64; 3]) -> Option<[f64; 3]> {
    let mag = magnitude(v);
    if mag < DEGENERATE_EPSILON {
        return None;
    }
    Some(scale(v, 1.0 / mag))
}

/// Angle in radians between two unit vectors, stable for both tiny and
/// near-antipodal separations.
pub(crate) fn vector_angle(a: [f64; 3], b: [f64; 3]) -> f64 {
    magnitude(cross(a, b)).atan2(dot(a, b))
}

/// Great-circle distance between two points in radians.
///
/// Haversine in the atan2 form, which stays accurate both near zero and
/// near the antipode.
pub fn great_circle_distance(a: &GeographicPoint, b: &GeographicPoint) -> f64 {
    let delta_lat = b.latitude() - a.latitude();
    let delta_lon = b.longitude() - a.longitude();
    let h = (delta_lat / 2.0).sin().powi(2)
        + a.latitude().cos() * b.latitude().cos() * (delta_lon / 2.0).sin().powi(2);
    let h = h.clamp(0.0, 1.0);
    2.0 * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Initial bearing from `a` toward `b`, in radians clockwise from north.
///
/// Returns `None` when the direction is undefined: coincident points, a
/// zero or non-finite `distance`, or antipodal inputs. The caller must
/// treat `None` as a real failure and take its own fallback path.
pub fn initial_bearing(a: &GeographicPoint, b: &GeographicPoint, distance: f64) -> Option<f64> {
    if distance == 0.0 || !distance.is_finite() {
        return None;
    }
    let delta_lon = b.longitude() - a.longitude();
    let y = delta_lon.sin() * b.latitude().cos();
    let x = a.latitude().cos() * b.latitude().sin()
        - a.latitude().sin() * b.latitude().cos() * delta_lon.cos();
    if y.abs() < DEGENERATE_EPSILON && x.abs() < DEGENERATE_EPSILON {
        return None;
    }
    Some(y.atan2(x))
}

/// Projects from `origin` along `bearing` by an angular `distance`.
pub fn project(origin: &GeographicPoint, distance: f64, bearing: f64) -> GeographicPoint {
    let (sin_lat, cos_lat) = origin.latitude().sin_cos();
    let (sin_dist, cos_dist) = distance.sin_cos();
    let sin_lat2 = sin_lat * cos_dist + cos_lat * sin_dist * bearing.cos();
    let sin_lat2 = sin_lat2.clamp(-1.0, 1.0);
    let latitude = sin_lat2.asin();
    let longitude = origin.longitude()
        + (bearing.sin() * sin_dist * cos_lat).atan2(cos_dist - sin_lat * sin_lat2);
    GeographicPoint::new(longitude, latitude)
}

/// True when unit vector `v` lies on the shorter great-circle arc from
/// `a` to `b` (endpoints included, within tolerance).
fn on_arc(v: [f64; 3], a: [f64; 3], b: [f64; 3]) -> bool {
    vector_angle(a, v) + vector_angle(v, b) <= vector_angle(a, b) + ARC_EPSILON
}

/// Intersection of the great-circle arcs `a1`-`a2` and `b1`-`b2`.
///
/// Returns `None` when the arcs do not cross, when either arc is
/// degenerate, and when the arcs run along the same great circle. The
/// collinear-overlap case is inherently ambiguous for crossing counting
/// and is deliberately reported as "no crossing".
pub fn arc_intersection(
    a1: &GeographicPoint,
    a2: &GeographicPoint,
    b1: &GeographicPoint,
    b2: &GeographicPoint,
) -> Option<GeographicPoint> {
    let va1 = to_unit_vector(a1);
    let va2 = to_unit_vector(a2);
    let vb1 = to_unit_vector(b1);
    let vb2 = to_unit_vector(b2);

    let na = normalize(cross(va1, va2))?;
    let nb = normalize(cross(vb1, vb2))?;
    let line = normalize(cross(na, nb))?;

    // The two great circles meet at a pair of antipodal candidates.
    for candidate in [line, scale(line, -1.0)] {
        if on_arc(candidate, va1, va2) && on_arc(candidate, vb1, vb2) {
            return Some(from_unit_vector(candidate));
        }
    }
    None
}

/// Minimum angular distance from a point to the arc `a`-`b`.
pub fn point_to_arc_distance(p: &GeographicPoint, a: &GeographicPoint, b: &GeographicPoint) -> f64 {
    let vp = to_unit_vector(p);
    let va = to_unit_vector(a);
    let vb = to_unit_vector(b);

    let normal = match normalize(cross(va, vb)) {
        Some(n) => n,
        // degenerate arc: treat as the single point `a`
        None => return great_circle_distance(p, a),
    };

    let foot = sub(vp, scale(normal, dot(vp, normal)));
    if let Some(foot) = normalize(foot) {
        if on_arc(foot, va, vb) {
            return dot(vp, normal).abs().clamp(0.0, 1.0).asin();
        }
    }
    great_circle_distance(p, a).min(great_circle_distance(p, b))
}

/// The point on the arc `a`-`b` closest to `p`.
pub fn closest_point_on_arc(
    p: &GeographicPoint,
    a: &GeographicPoint,
    b: &GeographicPoint,
) -> GeographicPoint {
    let vp = to_unit_vector(p);
    let va = to_unit_vector(a);
    let vb = to_unit_vector(b);

    if let Some(normal) = normalize(cross(va, vb)) {
        let foot = sub(vp, scale(normal, dot(vp, normal)));
        if let Some(foot) = normalize(foot) {
            if on_arc(foot, va, vb) {
                return from_unit_vector(foot);
            }
        }
    }
    if great_circle_distance(p, a) <= great_circle_distance(p, b) {
        *a
    } else {
        *b
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn pt(lon_deg: f64, lat_deg: f64) -> GeographicPoint {
        GeographicPoint::from_degrees(lon_deg, lat_deg).unwrap()
    }

    #[test]
    fn test_unit_vector_round_trip() {
        let p = pt(-93.265, 45.0);
        let back = from_unit_vector(to_unit_vector(&p));
        assert!((p.longitude() - back.longitude()).abs() < 1e-12);
        assert!((p.latitude() - back.latitude()).abs() < 1e-12);
    }

    #[test]
    fn test_unit_vector_poles() {
        let north = to_unit_vector(&pt(0.0, 90.0));
        assert!((north[2] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_great_circle_distance_quarter_turn() {
        let d = great_circle_distance(&pt(0.0, 0.0), &pt(90.0, 0.0));
        assert!((d - FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_great_circle_distance_antipodal() {
        let d = great_circle_distance(&pt(0.0, 0.0), &pt(180.0, 0.0));
        assert!((d - PI).abs() < 1e-9);
    }

    #[test]
    fn test_great_circle_distance_zero() {
        let p = pt(12.0, 34.0);
        assert_eq!(great_circle_distance(&p, &p), 0.0);
    }

    #[test]
    fn test_bearing_cardinal_directions() {
        let origin = pt(0.0, 0.0);
        let north = initial_bearing(&origin, &pt(0.0, 10.0), 0.1).unwrap();
        assert!(north.abs() < 1e-12);
        let east = initial_bearing(&origin, &pt(10.0, 0.0), 0.1).unwrap();
        assert!((east - FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_bearing_undefined_for_coincident_points() {
        let p = pt(5.0, 5.0);
        assert!(initial_bearing(&p, &p, 0.0).is_none());
        assert!(initial_bearing(&p, &pt(6.0, 6.0), f64::NAN).is_none());
    }

    #[test]
    fn test_bearing_undefined_for_antipodal_points() {
        let a = pt(0.0, 0.0);
        let b = pt(180.0, 0.0);
        assert!(initial_bearing(&a, &b, PI).is_none());
    }

    #[test]
    fn test_project_inverts_bearing_and_distance() {
        let a = pt(10.0, 20.0);
        let b = pt(11.5, 22.0);
        let d = great_circle_distance(&a, &b);
        let bearing = initial_bearing(&a, &b, d).unwrap();
        let reached = project(&a, d, bearing);
        assert!(great_circle_distance(&reached, &b) < 1e-9);
    }

    #[test]
    fn test_arc_intersection_crossing() {
        // A meridian segment against an equator segment.
        let hit = arc_intersection(&pt(0.0, -5.0), &pt(0.0, 5.0), &pt(-5.0, 0.0), &pt(5.0, 0.0))
            .unwrap();
        assert!(great_circle_distance(&hit, &pt(0.0, 0.0)) < 1e-9);
    }

    #[test]
    fn test_arc_intersection_disjoint() {
        let hit = arc_intersection(&pt(0.0, 1.0), &pt(0.0, 5.0), &pt(-5.0, 0.0), &pt(5.0, 0.0));
        assert!(hit.is_none());
    }

    #[test]
    fn test_arc_intersection_collinear_is_none() {
        // Overlapping equator segments share a great circle; ambiguous.
        let hit = arc_intersection(&pt(0.0, 0.0), &pt(10.0, 0.0), &pt(5.0, 0.0), &pt(15.0, 0.0));
        assert!(hit.is_none());
    }

    #[test]
    fn test_point_to_arc_distance_perpendicular_foot() {
        let d = point_to_arc_distance(&pt(5.0, 3.0), &pt(0.0, 0.0), &pt(10.0, 0.0));
        assert!((d - 3.0_f64.to_radians()).abs() < 1e-6);
    }

    #[test]
    fn test_point_to_arc_distance_beyond_endpoint() {
        let d = point_to_arc_distance(&pt(15.0, 0.0), &pt(0.0, 0.0), &pt(10.0, 0.0));
        assert!((d - 5.0_f64.to_radians()).abs() < 1e-9);
    }

    #[test]
    fn test_closest_point_on_arc() {
        let c = closest_point_on_arc(&pt(5.0, 3.0), &pt(0.0, 0.0), &pt(10.0, 0.0));
        assert!((c.latitude()).abs() < 1e-9);
        assert!((c.longitude() - 5.0_f64.to_radians()).abs() < 1e-6);

        let end = closest_point_on_arc(&pt(15.0, 1.0), &pt(0.0, 0.0), &pt(10.0, 0.0));
        assert!(great_circle_distance(&end, &pt(10.0, 0.0)) < 1e-9);
    }
}
