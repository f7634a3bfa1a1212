//! Core error types for the devstats service layer.
//!
//! Upstream errors from `devstats-sources` are folded into two outcomes:
//! the provider definitively has no such user, or the provider could not
//! answer. Transport details survive only as the message string.

use devstats_sources::SourceError;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The upstream provider reports no matching user.
    #[error("User not found: {0}")]
    NotFound(String),

    /// Network failure, timeout, or unexpected upstream shape.
    #[error("{0}")]
    Upstream(String),

    /// The username cannot be sent upstream.
    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    /// A bug in aggregation or reshaping.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<SourceError> for Error {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::UserNotFound(username) => Error::NotFound(username),
            other => Error::Upstream(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_not_found_maps_to_not_found() {
        let err: Error = SourceError::UserNotFound("ghost".to_string()).into();
        assert_eq!(err, Error::NotFound("ghost".to_string()));
    }

    #[test]
    fn test_other_source_errors_map_to_upstream() {
        let err: Error = SourceError::Timeout {
            provider: "GITHUB_CONTRIBUTIONS".to_string(),
        }
        .into();
        assert_eq!(err, Error::Upstream("Timeout: GITHUB_CONTRIBUTIONS".to_string()));
    }
}
