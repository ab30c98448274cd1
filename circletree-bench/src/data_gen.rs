//! Geometry generators for benchmarks

use circletree::{GeographicPoint, Geometry};
use rand::Rng;

/// Generate a random walk line with the given number of vertices,
/// wandering inside a region a few degrees across.
pub fn generate_line(vertices: usize) -> Geometry {
    let mut rng = rand::thread_rng();
    let mut lon: f64 = rng.gen_range(-10.0..10.0);
    let mut lat: f64 = rng.gen_range(-10.0..10.0);

    let points = (0..vertices)
        .map(|_| {
            lon = (lon + rng.gen_range(-0.05..0.05)).clamp(-179.0, 179.0);
            lat = (lat + rng.gen_range(-0.05..0.05)).clamp(-89.0, 89.0);
            GeographicPoint::from_degrees(lon, lat).unwrap()
        })
        .collect();
    Geometry::line(points)
}

/// Generate a closed star-shaped ring with the given number of vertices
/// around a random center.
pub fn generate_ring(vertices: usize) -> Vec<GeographicPoint> {
    let mut rng = rand::thread_rng();
    let center_lon: f64 = rng.gen_range(-60.0..60.0);
    let center_lat: f64 = rng.gen_range(-50.0..50.0);

    let mut ring: Vec<GeographicPoint> = (0..vertices)
        .map(|i| {
            let angle = (i as f64 / vertices as f64) * std::f64::consts::TAU;
            let reach = rng.gen_range(1.0..3.0);
            GeographicPoint::from_degrees(
                center_lon + reach * angle.cos(),
                center_lat + reach * angle.sin(),
            )
            .unwrap()
        })
        .collect();
    ring.push(ring[0]);
    ring
}

/// Generate a polygon whose exterior ring has the given vertex count.
pub fn generate_polygon(vertices: usize) -> Geometry {
    Geometry::polygon(vec![generate_ring(vertices)])
}

/// Generate a collection of small polygons.
pub fn generate_collection(members: usize) -> Geometry {
    Geometry::collection((0..members).map(|_| generate_polygon(16)).collect())
}

/// Generate query points scattered over the same region the other
/// generators use.
pub fn generate_query_points(count: usize) -> Vec<GeographicPoint> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| {
            GeographicPoint::from_degrees(
                rng.gen_range(-65.0..65.0),
                rng.gen_range(-55.0..55.0),
            )
            .unwrap()
        })
        .collect()
}
