//! Error taxonomy for calls against the prediction backend.

use thiserror::Error;

/// Failure of a single backend request.
///
/// Every variant is terminal for the request that produced it; nothing in
/// this crate retries.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Transport failure, timeout, or an unexpected HTTP status.
    #[error("network error: {0}")]
    Network(String),
    /// The backend answered but the payload was not what we expect.
    #[error("invalid response: {0}")]
    Validation(String),
    /// The requested zone or event does not exist.
    #[error("not found: {0}")]
    NotFound(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Validation(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Validation(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_error_is_validation() {
        let err = serde_json::from_str::<u32>("\"nope\"").unwrap_err();
        assert!(matches!(ApiError::from(err), ApiError::Validation(_)));
    }

    #[test]
    fn test_display_includes_kind() {
        let err = ApiError::NotFound("zone 42".to_string());
        assert_eq!(err.to_string(), "not found: zone 42");
    }
}
