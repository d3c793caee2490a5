//! HTTP client for the route optimization service.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use ecoroute_core::{NetworkError, OptimizationClient, OptimizationResult, StopRequest};
use log::debug;
use reqwest::Client;
use url::Url;

use super::wire::OptimizeRequestBody;

/// Error type for [`HttpOptimizationClient`] construction failures.
#[derive(Debug)]
pub enum ClientBuildError {
    /// The base URL could not be parsed.
    InvalidBaseUrl {
        /// The rejected URL.
        url: String,
        /// Parser error.
        source: url::ParseError,
    },
    /// Failed to build the HTTP client.
    HttpClient(reqwest::Error),
}

impl fmt::Display for ClientBuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBaseUrl { url, source } => {
                write!(f, "invalid optimization service URL {url:?}: {source}")
            }
            Self::HttpClient(err) => write!(f, "failed to build HTTP client: {err}"),
        }
    }
}

impl std::error::Error for ClientBuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidBaseUrl { source, .. } => Some(source),
            Self::HttpClient(err) => Some(err),
        }
    }
}

/// Default user agent for optimization requests.
pub const DEFAULT_USER_AGENT: &str = "ecoroute/0.1";

/// Default optimization service location.
pub const DEFAULT_OPTIMIZER_URL: &str = "http://localhost:8000";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const OPTIMIZE_PATH: &str = "api/optimize";

/// Configuration for [`HttpOptimizationClient`].
#[derive(Debug, Clone)]
pub struct HttpOptimizationClientConfig {
    /// Base URL for the service (e.g., `"http://localhost:8000"`).
    pub base_url: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for HttpOptimizationClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OPTIMIZER_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpOptimizationClientConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Posts stop requests to `{base_url}/api/optimize`.
///
/// The service's reply is decoded whatever its `status`. A non-2xx response
/// whose body is still a well-formed result (the service reports declined
/// requests this way) is returned as that result so its message reaches the
/// user; any other non-2xx response becomes [`NetworkError::Http`].
///
/// # Example
///
/// ```no_run
/// use ecoroute_core::{CargoType, OptimizationClient, StopRequest};
/// use ecoroute_data::optimizer::HttpOptimizationClient;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let client = HttpOptimizationClient::new("http://localhost:8000")?;
/// let request = StopRequest::new(["New Delhi", "Agra"], 500.0, CargoType::Standard, 48)?;
/// let result = client.submit(&request).await?;
/// println!("{:?}", result.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpOptimizationClient {
    client: Client,
    endpoint: Url,
    config: HttpOptimizationClientConfig,
}

impl HttpOptimizationClient {
    /// Create a client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` does not parse or the HTTP client fails
    /// to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientBuildError> {
        Self::with_config(HttpOptimizationClientConfig::new(base_url))
    }

    /// Create a client with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse or the HTTP client
    /// fails to build.
    pub fn with_config(config: HttpOptimizationClientConfig) -> Result<Self, ClientBuildError> {
        let endpoint = endpoint_url(&config.base_url)?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ClientBuildError::HttpClient)?;
        Ok(Self {
            client,
            endpoint,
            config,
        })
    }

    /// Fully resolved `/api/optimize` URL.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Convert a reqwest error to a `NetworkError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error) -> NetworkError {
        let url = self.endpoint.to_string();
        if error.is_timeout() {
            return NetworkError::Timeout {
                url,
                timeout_secs: self.config.timeout.as_secs(),
            };
        }
        if let Some(status) = error.status() {
            return NetworkError::Http {
                url,
                status: status.as_u16(),
                message: error.to_string(),
            };
        }
        NetworkError::Network {
            url,
            message: error.to_string(),
        }
    }
}

fn endpoint_url(base_url: &str) -> Result<Url, ClientBuildError> {
    let invalid = |source| ClientBuildError::InvalidBaseUrl {
        url: base_url.to_owned(),
        source,
    };
    // A trailing slash makes `join` append instead of replacing the last
    // path segment.
    let base = Url::parse(&format!("{}/", base_url.trim_end_matches('/'))).map_err(invalid)?;
    base.join(OPTIMIZE_PATH).map_err(invalid)
}

/// Decode a service reply, tolerating declined requests sent as HTTP errors.
fn decode_reply(url: &Url, status: u16, body: &str) -> Result<OptimizationResult, NetworkError> {
    let decoded = serde_json::from_str::<OptimizationResult>(body);
    if (200..300).contains(&status) {
        return decoded.map_err(|err| NetworkError::MalformedResponse {
            message: err.to_string(),
        });
    }
    match decoded {
        Ok(result) if !result.is_success() => Ok(result),
        _ => Err(NetworkError::Http {
            url: url.to_string(),
            status,
            message: body.chars().take(200).collect(),
        }),
    }
}

#[async_trait(?Send)]
impl OptimizationClient for HttpOptimizationClient {
    async fn submit(&self, request: &StopRequest) -> Result<OptimizationResult, NetworkError> {
        debug!(
            "posting {} stops to {}",
            request.stops().len(),
            self.endpoint
        );
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&OptimizeRequestBody::from(request))
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|err| self.convert_reqwest_error(&err))?;
        debug!("optimization service answered HTTP {status}");
        decode_reply(&self.endpoint, status, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecoroute_core::ResultStatus;
    use rstest::rstest;

    #[rstest]
    #[case("http://localhost:8000", "http://localhost:8000/api/optimize")]
    #[case("http://localhost:8000/", "http://localhost:8000/api/optimize")]
    #[case("https://example.com/eco", "https://example.com/eco/api/optimize")]
    fn joins_optimize_path(#[case] base: &str, #[case] expected: &str) {
        let client = HttpOptimizationClient::new(base).expect("client should build");
        assert_eq!(client.endpoint().as_str(), expected);
    }

    #[rstest]
    fn rejects_unparseable_base_url() {
        let err = HttpOptimizationClient::new("not a url").expect_err("invalid URL");
        assert!(matches!(err, ClientBuildError::InvalidBaseUrl { .. }));
        assert!(err.to_string().contains("not a url"));
    }

    #[rstest]
    fn config_builder_pattern() {
        let config = HttpOptimizationClientConfig::new("http://example.com")
            .with_timeout(Duration::from_secs(5))
            .with_user_agent("test-agent/1.0");

        assert_eq!(config.base_url, "http://example.com");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "test-agent/1.0");
    }

    #[rstest]
    fn decodes_failure_sent_with_error_status() {
        let url = endpoint_url(DEFAULT_OPTIMIZER_URL).expect("default URL parses");
        let body = r#"{"status": "error", "message": "No valid addresses found"}"#;

        let result = decode_reply(&url, 400, body).expect("declined result");

        assert_eq!(result.status, ResultStatus::Failure);
        assert_eq!(result.message.as_deref(), Some("No valid addresses found"));
    }

    #[rstest]
    fn error_status_without_result_is_http_error() {
        let url = endpoint_url(DEFAULT_OPTIMIZER_URL).expect("default URL parses");

        let err = decode_reply(&url, 502, "Bad Gateway").expect_err("HTTP error");

        assert_eq!(
            err,
            NetworkError::Http {
                url: "http://localhost:8000/api/optimize".into(),
                status: 502,
                message: "Bad Gateway".into(),
            }
        );
    }

    #[rstest]
    fn garbage_success_body_is_malformed() {
        let url = endpoint_url(DEFAULT_OPTIMIZER_URL).expect("default URL parses");
        let err = decode_reply(&url, 200, "<html>").expect_err("malformed");
        assert!(matches!(err, NetworkError::MalformedResponse { .. }));
    }
}
