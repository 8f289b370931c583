/// Width of a shading grid cell, in degrees (both axes)
pub const BIN_SIZE_DEG: i32 = 10;

/// Latitude range accepted for input rows
pub const LAT_MIN: f64 = -90.0;
pub const LAT_MAX: f64 = 90.0;

/// Longitude range accepted for input rows (before normalization)
pub const LON_MIN: f64 = -180.0;
pub const LON_MAX: f64 = 180.0;

/// Initial map center (lat, lon)
pub const DEFAULT_CENTER: (f64, f64) = (20.0, 0.0);

/// Initial map scale in pixels per degree
pub const DEFAULT_SCALE: f64 = 4.0;

/// Minimum map scale, chosen so gridlines never disappear when zoomed out
pub const MIN_SCALE: f64 = 2.0;

/// Maximum map scale in pixels per degree
pub const MAX_SCALE: f64 = 512.0;

/// Multiplier applied per wheel zoom step
pub const ZOOM_STEP: f64 = 1.2;
