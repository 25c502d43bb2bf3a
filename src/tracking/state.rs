//! Tracking state and its update rules

use crate::core::{Path, Position, Region, RegionDelta};
use crate::tracking::TrackingError;

/// Output of a tracking session, delivered in arrival order
#[derive(Debug, Clone, PartialEq)]
pub enum TrackerEvent {
    /// First fix after permission was granted
    InitialFix(Position),
    /// Fix delivered by the live subscription
    Fix(Position),
    /// The session ended with an error
    Failed(TrackingError),
}

/// Lifecycle of the tracking state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingPhase {
    /// Waiting for permission or the first fix
    Acquiring,
    Tracking,
    Failed,
}

/// Region, traveled path and error state owned by a tracking session
#[derive(Debug, Clone)]
pub struct TrackingState {
    delta: RegionDelta,
    region: Option<Region>,
    path: Path,
    error: Option<TrackingError>,
}

impl TrackingState {
    pub fn new(delta: RegionDelta) -> Self {
        Self {
            delta,
            region: None,
            path: Path::new(),
            error: None,
        }
    }

    /// Apply one tracker event. Returns whether anything changed.
    ///
    /// Once an error is recorded every later event is ignored. Fixes are
    /// never filtered: each one recenters the region and extends the path.
    pub fn apply(&mut self, event: TrackerEvent) -> bool {
        if self.error.is_some() {
            return false;
        }

        match event {
            TrackerEvent::InitialFix(position) | TrackerEvent::Fix(position) => {
                match self.region.as_mut() {
                    Some(region) => {
                        region.recenter(position);
                        self.path.push(position);
                    }
                    None => {
                        self.region = Some(Region::around(position, self.delta));
                        self.path = Path::starting_at(position);
                    }
                }
            }
            TrackerEvent::Failed(error) => {
                self.error = Some(error);
            }
        }
        true
    }

    pub fn phase(&self) -> TrackingPhase {
        if self.error.is_some() {
            TrackingPhase::Failed
        } else if self.region.is_some() {
            TrackingPhase::Tracking
        } else {
            TrackingPhase::Acquiring
        }
    }

    pub fn region(&self) -> Option<&Region> {
        self.region.as_ref()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn error(&self) -> Option<&TrackingError> {
        self.error.as_ref()
    }
}

impl Default for TrackingState {
    fn default() -> Self {
        Self::new(RegionDelta::default())
    }
}
