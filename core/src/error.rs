//! Error types for the follower client.
//!
//! # Design
//! `GithubFollowerError` is the closed set of outcomes the presentation layer
//! has to handle. Each variant carries a fixed message that is shown to the
//! user verbatim, so the variants hold no payload; the underlying cause is
//! recorded with `tracing` where the error is produced.
//!
//! `TransportError` describes why a transport could not produce a response.
//! It stays inside the fetch pipeline and always surfaces as
//! `GithubFollowerError::UnableToComplete`.

use thiserror::Error;

const INVALID_USERNAME: &str = "This username created an invalid request. Please try again.";
const UNABLE_TO_COMPLETE: &str =
    "Unable to commplete your request. Please check your internet connection.";
const INVALID_RESPONSE: &str = "Invalid response from the server. Please try again.";
const INVALID_DATA: &str = "The data received from the server was invalid. Please try again.";

/// Errors returned by `FollowerClient`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum GithubFollowerError {
    /// The username (or page) could not be turned into a valid request.
    #[error("{}", INVALID_USERNAME)]
    InvalidUsername,

    /// The transport failed before a response arrived.
    #[error("{}", UNABLE_TO_COMPLETE)]
    UnableToComplete,

    /// The server answered with a non-2xx status.
    #[error("{}", INVALID_RESPONSE)]
    InvalidResponse,

    /// The body could not be decoded into a list of followers.
    #[error("{}", INVALID_DATA)]
    InvalidData,
}

impl GithubFollowerError {
    /// The fixed user-facing message for this error.
    pub fn message(&self) -> &'static str {
        match self {
            Self::InvalidUsername => INVALID_USERNAME,
            Self::UnableToComplete => UNABLE_TO_COMPLETE,
            Self::InvalidResponse => INVALID_RESPONSE,
            Self::InvalidData => INVALID_DATA,
        }
    }
}

/// Failures reported by a `Transport`. Non-2xx statuses are not errors here.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection refused, DNS failure, TLS failure and the like.
    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request timed out")]
    Timeout,

    /// The request was abandoned before it finished.
    #[error("request cancelled")]
    Cancelled,

    #[error("transport error: {0}")]
    Other(String),
}

impl From<TransportError> for GithubFollowerError {
    fn from(_: TransportError) -> Self {
        GithubFollowerError::UnableToComplete
    }
}
