//! Error types exposed by the GitHub tracker layer.

use thiserror::Error;

/// Errors surfaced while loading configuration, decoding payloads, or
/// communicating with GitHub.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TrackerError {
    /// The authentication token was missing.
    #[error("personal access token is required")]
    MissingToken,

    /// A URL could not be parsed.
    #[error("URL is invalid: {0}")]
    InvalidUrl(String),

    /// A repository owner, repository name, or issue number was blank or zero.
    #[error("issue reference is incomplete: {message}")]
    InvalidIssueReference {
        /// Which part of the reference was rejected.
        message: String,
    },

    /// The authentication token was rejected by GitHub.
    #[error("GitHub rejected the token: {message}")]
    Authentication {
        /// GitHub error message returned with the 401/403 response.
        message: String,
    },

    /// GitHub returned a non-authentication API error.
    #[error("GitHub API error: {message}")]
    Api {
        /// Response body from GitHub describing the failure.
        message: String,
    },

    /// Networking failed while calling GitHub.
    #[error("network error talking to GitHub: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },

    /// Configuration could not be loaded.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// A webhook payload could not be decoded.
    #[error("invalid {event} payload: {message}")]
    InvalidPayload {
        /// Event name the payload was decoded as.
        event: String,
        /// Deserialisation failure detail.
        message: String,
    },
}
