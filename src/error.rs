//! Error types for the Tassi API client.
//!
//! Failures fall into two phases. Local precondition violations (a
//! missing id, parameters that are not a JSON object) fail synchronously
//! with [`TassiError::InvalidRequest`] before any network activity.
//! Transport and HTTP failures are wrapped at the transport boundary
//! into [`ApiConnectionError`], which carries the HTTP status and
//! request/response summaries so callers can diagnose a failure without
//! matching on the underlying `reqwest` error type — the original error
//! stays reachable through [`std::error::Error::source`].
//!
//! # Example
//!
//! ```rust,ignore
//! match Package::retrieve(4, None).await {
//!     Ok(package) => { /* handle the hydrated object */ }
//!     Err(TassiError::InvalidRequest(message)) => {
//!         eprintln!("bad call: {message}");
//!     }
//!     Err(TassiError::ApiConnection(e)) => {
//!         eprintln!("request failed with status {:?}: {}", e.http_status, e);
//!     }
//!     Err(other) => eprintln!("{other}"),
//! }
//! ```

use std::fmt;

use thiserror::Error;

/// A summary of an outbound request, attached to connection errors.
#[derive(Clone, Debug)]
pub struct RequestSummary {
    /// The lowercase HTTP verb of the request.
    pub method: String,
    /// The full URL the request was sent to.
    pub url: String,
}

impl fmt::Display for RequestSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}

/// A summary of an inbound response, attached to connection errors when
/// a response was received before the failure was classified.
#[derive(Clone, Debug)]
pub struct ResponseSummary {
    /// The HTTP status code of the response.
    pub status: u16,
    /// The raw response body text.
    pub body: String,
}

/// Error returned when a request fails at the transport level.
///
/// This covers network errors (DNS, connect, TLS, timeout) as well as
/// non-2xx HTTP responses. The client never retries; every failure is
/// wrapped once and propagated to the caller.
///
/// For network failures the triggering [`reqwest::Error`] is kept as the
/// error source. For HTTP failures [`http_status`](Self::http_status)
/// and [`response`](Self::response) describe what the server returned.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ApiConnectionError {
    /// Human-readable description of the failure.
    pub message: String,
    /// The HTTP status code, when a response status was observed.
    pub http_status: Option<u16>,
    /// The outbound request that failed.
    pub request: Option<RequestSummary>,
    /// The inbound response, if one was received.
    pub response: Option<ResponseSummary>,
    /// The underlying transport error, for network-level failures.
    #[source]
    pub source: Option<reqwest::Error>,
}

/// Unified error type for all Tassi API operations.
///
/// The `Authentication`, `NotFound`, and `Validation` variants are
/// reserved categories for status-code dispatch; the transport does not
/// currently produce them, so today every HTTP failure surfaces as
/// [`ApiConnection`](Self::ApiConnection). They are kept so downstream
/// code can already match on them.
#[derive(Debug, Error)]
pub enum TassiError {
    /// A client-side precondition was violated before any network call.
    #[error("{0}")]
    InvalidRequest(String),

    /// A transport or HTTP failure.
    #[error(transparent)]
    ApiConnection(#[from] ApiConnectionError),

    /// Reserved: the credential was missing or rejected.
    #[error("{0}")]
    Authentication(String),

    /// Reserved: the requested resource does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Reserved: the server rejected the submitted parameters.
    #[error("{0}")]
    Validation(String),
}

impl TassiError {
    /// Returns the HTTP status code carried by a connection failure.
    #[must_use]
    pub const fn http_status(&self) -> Option<u16> {
        match self {
            Self::ApiConnection(e) => e.http_status,
            _ => None,
        }
    }
}
