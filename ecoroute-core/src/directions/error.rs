use thiserror::Error;

/// Errors from [`crate::DirectionsProvider::route`].
///
/// Every variant is recoverable from the caller's point of view: a failed
/// Transit lookup is retried with Driving and a failed Driving lookup
/// degrades to an empty path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectionsError {
    /// The provider found no route between the requested points.
    #[error("no route found: {message}")]
    NoRoute {
        /// Provider description of the failure.
        message: String,
    },
    /// The provider could not be reached.
    #[error("directions provider at {url} is unreachable: {message}")]
    Network {
        /// Request URL.
        url: String,
        /// Underlying transport error.
        message: String,
    },
    /// The request exceeded the configured timeout.
    #[error("directions request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Request URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The provider answered with an HTTP error status.
    #[error("directions provider at {url} returned HTTP {status}: {message}")]
    Http {
        /// Request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },
    /// The provider reported an error code in an otherwise valid reply.
    #[error("directions provider error {code}: {message}")]
    Service {
        /// Provider error code, e.g. `InvalidQuery`.
        code: String,
        /// Provider error message.
        message: String,
    },
    /// The response could not be decoded.
    #[error("failed to parse directions response: {message}")]
    Parse {
        /// Decoder error description.
        message: String,
    },
}
