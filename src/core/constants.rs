//! Tracking and display parameters

/// Zoom span applied to the region created from the first fix (degrees)
pub const DEFAULT_LATITUDE_DELTA: f64 = 0.01;
pub const DEFAULT_LONGITUDE_DELTA: f64 = 0.01;

/// Minimum time between subscription updates (milliseconds)
pub const WATCH_MIN_INTERVAL_MS: u64 = 1000;

/// Minimum movement between subscription updates (meters)
pub const WATCH_MIN_DISTANCE_M: f64 = 1.0;

/// Delay between a destination submission and the camera fit (milliseconds)
pub const FIT_DELAY_MS: u64 = 300;

/// Mean Earth radius (meters)
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;
