//! Planar coordinate math used by obfuscation and the region filter.
//!
//! Distances are measured in degrees on the raw (latitude, longitude) plane,
//! not along the sphere. The region filter compares raw coordinates with
//! [`planar_distance`] and does not account for the wrap-around that
//! [`wrap_coordinate`] applies during obfuscation, so a site displaced across
//! a pole or the antimeridian can fall outside a query that covers its true
//! location.

use crate::shared::constants::{MAX_LATITUDE, MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE};

/// Euclidean distance between two raw coordinate pairs
pub fn planar_distance(lat_a: f64, lon_a: f64, lat_b: f64, lon_b: f64) -> f64 {
    (lat_a - lat_b).hypot(lon_a - lon_b)
}

/// Bring a coordinate that left the valid range back onto the globe.
///
/// Latitude past a pole is reflected back and the longitude moves to the
/// opposite meridian; longitude is normalised into `[-180, 180)`.
pub fn wrap_coordinate(latitude: f64, longitude: f64) -> (f64, f64) {
    let (latitude, longitude) = if latitude > MAX_LATITUDE {
        (2.0 * MAX_LATITUDE - latitude, longitude + 180.0)
    } else if latitude < MIN_LATITUDE {
        (2.0 * MIN_LATITUDE - latitude, longitude + 180.0)
    } else {
        (latitude, longitude)
    };

    (latitude, normalize_longitude(longitude))
}

/// Normalise a longitude into `[-180, 180)`
pub fn normalize_longitude(longitude: f64) -> f64 {
    let span = MAX_LONGITUDE - MIN_LONGITUDE;
    let normalized = (longitude - MIN_LONGITUDE).rem_euclid(span) + MIN_LONGITUDE;
    // rem_euclid can round up to `span` for inputs just below a multiple of it
    if normalized >= MAX_LONGITUDE {
        MIN_LONGITUDE
    } else {
        normalized
    }
}

/// Shortest longitude separation, accounting for the antimeridian
fn longitude_separation(lon_a: f64, lon_b: f64) -> f64 {
    normalize_longitude(lon_a - lon_b).abs()
}

/// Planar distance that understands [`wrap_coordinate`]: the minimum over the
/// direct image of `b` and its reflections across either pole.
pub fn wrapped_planar_distance(lat_a: f64, lon_a: f64, lat_b: f64, lon_b: f64) -> f64 {
    let direct = (lat_a - lat_b).hypot(longitude_separation(lon_a, lon_b));
    let across_north =
        (lat_a - (2.0 * MAX_LATITUDE - lat_b)).hypot(longitude_separation(lon_a, lon_b + 180.0));
    let across_south =
        (lat_a - (2.0 * MIN_LATITUDE - lat_b)).hypot(longitude_separation(lon_a, lon_b + 180.0));

    direct.min(across_north).min(across_south)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_planar_distance() {
        assert!((planar_distance(0.0, 0.0, 3.0, 4.0) - 5.0).abs() < EPS);
        assert_eq!(planar_distance(10.0, 10.0, 10.0, 10.0), 0.0);
    }

    #[test]
    fn test_planar_distance_ignores_antimeridian() {
        // Two points 0.2 degrees apart across the antimeridian look far apart
        let d = planar_distance(0.0, 179.9, 0.0, -179.9);
        assert!((d - 359.8).abs() < EPS);
    }

    #[test]
    fn test_normalize_longitude() {
        assert!((normalize_longitude(180.0) - -180.0).abs() < EPS);
        assert!((normalize_longitude(181.0) - -179.0).abs() < EPS);
        assert!((normalize_longitude(-181.0) - 179.0).abs() < EPS);
        assert!((normalize_longitude(540.0) - -180.0).abs() < EPS);
        assert!((normalize_longitude(12.5) - 12.5).abs() < EPS);
    }

    #[test]
    fn test_wrap_coordinate_inside_range_is_unchanged() {
        let (lat, lon) = wrap_coordinate(45.5, -122.6);
        assert_eq!(lat, 45.5);
        assert!((lon - -122.6).abs() < EPS);
    }

    #[test]
    fn test_wrap_coordinate_over_north_pole() {
        let (lat, lon) = wrap_coordinate(90.25, 10.0);
        assert!((lat - 89.75).abs() < EPS);
        assert!((lon - -170.0).abs() < EPS);
    }

    #[test]
    fn test_wrap_coordinate_over_south_pole() {
        let (lat, lon) = wrap_coordinate(-90.5, -10.0);
        assert!((lat - -89.5).abs() < EPS);
        assert!((lon - 170.0).abs() < EPS);
    }

    #[test]
    fn test_wrapped_distance_across_antimeridian() {
        let d = wrapped_planar_distance(0.0, 179.9, 0.0, -179.9);
        assert!((d - 0.2).abs() < EPS);
    }

    #[test]
    fn test_wrapped_distance_across_pole_matches_unwrapped_offset() {
        // 89.999 + 0.003 overshoots the pole by 0.002
        let (lat, lon) = wrap_coordinate(89.999 + 0.003, 45.0);
        let d = wrapped_planar_distance(89.999, 45.0, lat, lon);
        assert!((d - 0.003).abs() < EPS);
    }
}
