//! Error taxonomy for the headlines feed.
//!
//! Every failure the core can produce falls into one of four classes:
//!
//! - [`Error::Configuration`]: the API credential is missing or empty.
//!   Fatal to that fetch attempt only; recoverable by reconfiguration.
//! - [`Error::Validation`]: a filter mutation was given invalid input.
//!   Rejected before any fetch state is touched.
//! - [`Error::Transport`]: HTTP or network failure, including non-2xx
//!   statuses. Recoverable by retrying; the core never retries on its own.
//! - [`Error::MalformedResponse`]: the upstream body did not have the
//!   expected listing shape (e.g. an error envelope instead of articles).
//!
//! The [`FailureReason`] tag is the machine-readable classification carried
//! by `FetchState::Failure` and shown to the render boundary.

use std::fmt;
use thiserror::Error;

/// Errors produced by request construction, parsing, and the fetch lifecycle.
#[derive(Error, Debug)]
pub enum Error {
    /// The API credential is absent or empty. Checked before any network
    /// call is attempted, never surfaced as a transport failure.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A filter mutation received invalid input (unknown category, bad
    /// country code). Rejected before any state mutation.
    #[error("validation error: {0}")]
    Validation(String),

    /// HTTP or network failure, including non-success status codes.
    #[error("transport error: {0}")]
    Transport(String),

    /// The upstream body could not be read as an article listing.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Transport(e.to_string())
    }
}

impl Error {
    /// Classify this error into the reason tag carried by a failure state.
    pub fn reason(&self) -> FailureReason {
        match self {
            Error::Configuration(_) => FailureReason::Configuration,
            Error::Validation(_) => FailureReason::Validation,
            Error::Transport(_) => FailureReason::Transport,
            Error::MalformedResponse(_) => FailureReason::MalformedResponse,
        }
    }
}

/// Machine-readable classification of a failed fetch.
///
/// The lifecycle only ever commits `Configuration`, `Transport`, or
/// `MalformedResponse`; validation errors are rejected before the fetch
/// state is touched and so never appear in a committed failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    Configuration,
    Validation,
    Transport,
    MalformedResponse,
}

impl FailureReason {
    /// The stable string form shown at the render boundary.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureReason::Configuration => "configuration",
            FailureReason::Validation => "validation",
            FailureReason::Transport => "transport",
            FailureReason::MalformedResponse => "malformed-response",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
