//! Terminal tracking failures

use thiserror::Error;

use crate::provider::ProviderError;

/// Tracking errors. Every variant ends the session; there is no retry.
///
/// The display strings are shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackingError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Unable to determine your location: {reason}")]
    FixUnavailable { reason: String },
    #[error("Location updates unavailable: {reason}")]
    SubscriptionFailed { reason: String },
}

impl TrackingError {
    pub fn fix_unavailable(error: &ProviderError) -> Self {
        TrackingError::FixUnavailable {
            reason: error.to_string(),
        }
    }

    pub fn subscription_failed(error: &ProviderError) -> Self {
        TrackingError::SubscriptionFailed {
            reason: error.to_string(),
        }
    }
}
