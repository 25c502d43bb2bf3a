//! Destination state and the delayed camera fit it triggers

use std::time::Duration;
use tracing::{debug, info};

use crate::core::{Position, Region};
use crate::destination::{parse_destination, parse_destination_in_range, DestinationError};
use crate::display::FitRequest;
use crate::utils::config::{DestinationConfig, FitConfig};

/// A destination waiting for its fit delay to expire
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingFit {
    pub destination: Position,
    pub delay: Duration,
}

/// Owns the destination; each accepted submission replaces the previous one
#[derive(Debug, Clone, Default)]
pub struct DestinationResolver {
    destination: Option<Position>,
    input: DestinationConfig,
    fit: FitConfig,
}

impl DestinationResolver {
    pub fn new(input: DestinationConfig, fit: FitConfig) -> Self {
        Self {
            destination: None,
            input,
            fit,
        }
    }

    pub fn destination(&self) -> Option<Position> {
        self.destination
    }

    /// Parse `text` without touching any state
    pub fn parse(&self, text: &str) -> Result<Position, DestinationError> {
        if self.input.validate_range {
            parse_destination_in_range(text)
        } else {
            parse_destination(text)
        }
    }

    /// Accept a submission.
    ///
    /// Malformed input leaves the destination as it was and returns `None`;
    /// the rejection is only logged. On success the new destination is stored
    /// and a fit is scheduled for it.
    pub fn submit(&mut self, text: &str) -> Option<PendingFit> {
        match self.parse(text) {
            Ok(destination) => {
                info!(
                    latitude = destination.latitude,
                    longitude = destination.longitude,
                    "destination set"
                );
                self.destination = Some(destination);
                Some(PendingFit {
                    destination,
                    delay: self.fit.delay(),
                })
            }
            Err(error) => {
                debug!(%error, input = text, "destination input ignored");
                None
            }
        }
    }

    /// Build the fit for an expired delay; nothing to fit without a region
    pub fn resolve_fit(&self, pending: &PendingFit, region: Option<&Region>) -> Option<FitRequest> {
        let Some(region) = region else {
            debug!("no region when fit came due, skipping");
            return None;
        };

        Some(FitRequest {
            coordinates: [region.position(), pending.destination],
            options: self.fit.options(),
        })
    }
}
