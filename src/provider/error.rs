//! Location provider error types

use thiserror::Error;

/// Failures reported by a platform location provider
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    /// Location services are switched off on the device
    #[error("location services are disabled")]
    ServicesDisabled,
    /// The hardware could not produce a fix
    #[error("no position fix available: {details}")]
    FixUnavailable { details: String },
    /// Timeout waiting for a fix
    #[error("timed out after {timeout_ms}ms waiting for a position fix")]
    Timeout { timeout_ms: u32 },
}

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let error = ProviderError::FixUnavailable {
            details: "no satellites".to_string(),
        };
        assert_eq!(error.to_string(), "no position fix available: no satellites");

        let error = ProviderError::Timeout { timeout_ms: 5000 };
        assert_eq!(error.to_string(), "timed out after 5000ms waiting for a position fix");
    }
}
