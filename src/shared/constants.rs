/// Maximum displacement, in degrees, between a charge site's true location
/// and its obfuscated location
pub const MAX_OBFUSCATED_RADIUS: f64 = 0.005;

/// How many times farther than the visible region charge sites are fetched,
/// unless overridden by `QUERY_DISTANCE_SCALE`
pub const DEFAULT_QUERY_DISTANCE_SCALE: f64 = 2.0;

// =============================================================================
// COORDINATE BOUNDS
// =============================================================================

pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;
