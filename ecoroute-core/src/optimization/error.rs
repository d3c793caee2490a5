use thiserror::Error;

/// Transport failures from [`crate::OptimizationClient::submit`].
///
/// Every variant is surfaced to the user; none of them mutates view state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    /// The service could not be reached.
    #[error("optimization service at {url} is unreachable: {message}")]
    Network {
        /// Request URL.
        url: String,
        /// Underlying transport error.
        message: String,
    },
    /// The request exceeded the configured timeout.
    #[error("optimization request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Request URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The service answered with an HTTP error status.
    #[error("optimization service at {url} returned HTTP {status}: {message}")]
    Http {
        /// Request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("malformed optimization response: {message}")]
    MalformedResponse {
        /// Decoder error description.
        message: String,
    },
}
