//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

/// Core layer error type
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Navigation selector is not one of the known views
    #[error("Invalid dispatch selector: {0}")]
    InvalidSelector(String),

    /// Backend answered with `status: error`
    #[error("Backend error ({request}): {message}")]
    Backend { request: String, message: String },

    /// network error
    #[error("Network error: {0}")]
    Network(String),

    /// Request timed out
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Response body could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    /// Storage layer error
    #[error("Storage error: {0}")]
    Storage(String),

    /// serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// The row table is already at its row bound
    #[error("Row limit reached ({0} rows)")]
    RowLimit(usize),

    /// The last remaining row cannot be removed
    #[error("At least one row must remain")]
    LastRow,

    /// Component is in a state that does not accept the request
    #[error("Busy: {0}")]
    Busy(String),

    /// Response arrived for a context that no longer exists
    #[error("Stale response discarded")]
    StaleResponse,
}

impl CoreError {
    /// Whether it is expected behavior (user input, busy component, late response) is used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added. **
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::InvalidSelector(_)
            | Self::Validation(_)
            | Self::RowLimit(_)
            | Self::LastRow
            | Self::Busy(_)
            | Self::StaleResponse
            | Self::Backend { .. } => true,
            Self::Network(_)
            | Self::Timeout(_)
            | Self::Parse(_)
            | Self::Storage(_)
            | Self::Serialization(_) => false,
        }
    }

    /// Whether a retry of the same idempotent request may succeed
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Timeout(_))
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_facing_errors_are_expected() {
        assert!(CoreError::InvalidSelector("xx".into()).is_expected());
        assert!(CoreError::LastRow.is_expected());
        assert!(CoreError::StaleResponse.is_expected());
        assert!(!CoreError::Network("down".into()).is_expected());
        assert!(!CoreError::Parse("eof".into()).is_expected());
    }

    #[test]
    fn only_transport_errors_are_retryable() {
        assert!(CoreError::Network("reset".into()).is_retryable());
        assert!(CoreError::Timeout("30s".into()).is_retryable());
        assert!(!CoreError::Backend {
            request: "search".into(),
            message: "bad host".into()
        }
        .is_retryable());
    }

    #[test]
    fn serializes_with_code_tag() {
        let json = serde_json::to_value(CoreError::InvalidSelector("zz".into())).unwrap();
        assert_eq!(json["code"], "InvalidSelector");
        assert_eq!(json["details"], "zz");
    }
}
