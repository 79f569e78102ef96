// ---------------------------------------------------------------------------
// Physical constants
// ---------------------------------------------------------------------------

pub const EARTH_RADIUS_KM: f64 = 6_371.0; // mean Earth radius, km
pub const EARTH_EQUATORIAL_RADIUS_KM: f64 = 6_378.137; // WGS-84 equatorial radius, km

/// Fixed numerator of the record-based semi-major-axis estimate, km^2 * s.
///
/// Not a gravitational parameter: `a = cbrt(SMA_PROXY / (n * 2pi)^2)` with `n`
/// in rev/day is an approximation kept for compatibility with existing catalogues.
pub const SMA_PROXY: f64 = EARTH_EQUATORIAL_RADIUS_KM * EARTH_EQUATORIAL_RADIUS_KM * 86_400.0;

// ---------------------------------------------------------------------------
// Time units
// ---------------------------------------------------------------------------

pub const MS_PER_MINUTE: f64 = 60_000.0;
pub const MS_PER_DAY: f64 = 86_400_000.0;

/// Two-digit record years are read as `2000 + yy`.
pub const RECORD_CENTURY: i32 = 2000;
