//! Core data types for live tracking

use serde::{Deserialize, Serialize};

use crate::core::constants::{DEFAULT_LATITUDE_DELTA, DEFAULT_LONGITUDE_DELTA};

/// A single point in geodetic coordinates (decimal degrees)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    /// Whether both coordinates fall inside the WGS84 ranges
    pub fn is_in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Zoom span of a map region
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionDelta {
    pub latitude: f64,
    pub longitude: f64,
}

impl Default for RegionDelta {
    fn default() -> Self {
        Self {
            latitude: DEFAULT_LATITUDE_DELTA,
            longitude: DEFAULT_LONGITUDE_DELTA,
        }
    }
}

/// Map viewport: a center position plus a fixed zoom span
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub latitude: f64,
    pub longitude: f64,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl Region {
    pub fn around(center: Position, delta: RegionDelta) -> Self {
        Self {
            latitude: center.latitude,
            longitude: center.longitude,
            latitude_delta: delta.latitude,
            longitude_delta: delta.longitude,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.latitude, self.longitude)
    }

    pub fn delta(&self) -> RegionDelta {
        RegionDelta {
            latitude: self.latitude_delta,
            longitude: self.longitude_delta,
        }
    }

    /// Move the center to `position`, keeping the zoom span
    pub fn recenter(&mut self, position: Position) {
        self.latitude = position.latitude;
        self.longitude = position.longitude;
    }
}

/// Ordered history of fixes since tracking began.
///
/// Points can only be appended; insertion order is the arrival order of fixes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Path {
    points: Vec<Position>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(origin: Position) -> Self {
        Self { points: vec![origin] }
    }

    pub fn push(&mut self, position: Position) {
        self.points.push(position);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Position] {
        &self.points
    }

    pub fn first(&self) -> Option<Position> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<Position> {
        self.points.last().copied()
    }
}
