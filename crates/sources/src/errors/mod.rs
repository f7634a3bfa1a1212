//! Error types for the upstream sources crate.

use thiserror::Error;

/// Errors that can occur while fetching statistics from an upstream provider.
///
/// Only [`SourceError::UserNotFound`] describes a definite answer from the
/// provider; every other variant is an upstream failure.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The provider reported that no such user exists.
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// The provider answered with an error status or an unexpected shape.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// What went wrong
        message: String,
    },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl SourceError {
    /// Returns true when the provider reported that the user does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UserNotFound(_))
    }

    pub(crate) fn provider(provider: &str, message: impl Into<String>) -> Self {
        Self::ProviderError {
            provider: provider.to_string(),
            message: message.into(),
        }
    }

    /// Classifies a transport error from `reqwest`.
    pub(crate) fn from_request(provider: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                provider: provider.to_string(),
            }
        } else {
            Self::provider(provider, format!("Request failed: {}", err))
        }
    }
}
