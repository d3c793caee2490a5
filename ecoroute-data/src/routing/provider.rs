//! `DirectionsProvider` backed by OSRM's Route API.
//!
//! Each request becomes one
//! `GET {base_url}/route/v1/{profile}/{lon,lat;...}?overview=full&geometries=geojson`
//! call. The profile is chosen from the request's travel mode, and the
//! GeoJSON `[lon, lat]` geometry is flipped into `(lat, lon)` positions.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use ecoroute_core::{DirectionsError, DirectionsProvider, DirectionsRequest, Position, TravelMode};
use log::debug;
use reqwest::Client;
use url::Url;

use super::osrm::RouteResponse;

/// Error type for [`OsrmDirectionsProvider`] construction failures.
#[derive(Debug)]
pub enum ProviderBuildError {
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

impl fmt::Display for ProviderBuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBaseUrl { url, source } => {
                write!(f, "invalid OSRM URL {url:?}: {source}")
            }
            Self::HttpClient(err) => write!(f, "failed to build HTTP client: {err}"),
        }
    }
}

impl std::error::Error for ProviderBuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidBaseUrl { source, .. } => Some(source),
            Self::HttpClient(err) => Some(err),
        }
    }
}

/// Default user agent for OSRM requests.
pub const DEFAULT_USER_AGENT: &str = "ecoroute-routing/0.1";

/// Public OSRM demo server.
pub const DEFAULT_OSRM_URL: &str = "http://router.project-osrm.org";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`OsrmDirectionsProvider`].
#[derive(Debug, Clone)]
pub struct OsrmDirectionsProviderConfig {
    /// Base URL for the OSRM service (e.g., `"http://localhost:5000"`).
    pub base_url: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
    /// Profile used for [`TravelMode::Driving`].
    pub driving_profile: String,
    /// Profile used for [`TravelMode::Transit`].
    pub transit_profile: String,
}

impl Default for OsrmDirectionsProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OSRM_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            driving_profile: "driving".to_owned(),
            transit_profile: "transit".to_owned(),
        }
    }
}

impl OsrmDirectionsProviderConfig {
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

    /// Set the OSRM profile used for each travel mode.
    #[must_use]
    pub fn with_profiles(
        mut self,
        driving: impl Into<String>,
        transit: impl Into<String>,
    ) -> Self {
        self.driving_profile = driving.into();
        self.transit_profile = transit.into();
        self
    }

    fn profile(&self, mode: TravelMode) -> &str {
        match mode {
            TravelMode::Driving => &self.driving_profile,
            TravelMode::Transit => &self.transit_profile,
        }
    }
}

/// Directions provider using the OSRM Route API.
///
/// # Example
///
/// ```no_run
/// use ecoroute_data::routing::{OsrmDirectionsProvider, OsrmDirectionsProviderConfig};
///
/// let config = OsrmDirectionsProviderConfig::new("http://localhost:5000")
///     .with_profiles("car", "train");
/// let provider = OsrmDirectionsProvider::with_config(config)?;
/// # Ok::<(), ecoroute_data::routing::ProviderBuildError>(())
/// ```
#[derive(Debug, Clone)]
pub struct OsrmDirectionsProvider {
    client: Client,
    base_url: String,
    config: OsrmDirectionsProviderConfig,
}

impl OsrmDirectionsProvider {
    /// Create a new provider with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` does not parse or the HTTP client fails
    /// to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(OsrmDirectionsProviderConfig::new(base_url))
    }

    /// Create a new provider with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse or the HTTP client
    /// fails to build.
    pub fn with_config(config: OsrmDirectionsProviderConfig) -> Result<Self, ProviderBuildError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|source| ProviderBuildError::InvalidBaseUrl {
                url: config.base_url.clone(),
                source,
            })?
            .as_str()
            .trim_end_matches('/')
            .to_owned();
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        Ok(Self {
            client,
            base_url,
            config,
        })
    }

    /// Build the OSRM Route API URL for `request`.
    ///
    /// Coordinates are semicolon-separated `lon,lat` pairs in stop order.
    fn build_route_url(&self, request: &DirectionsRequest) -> String {
        let coords = request
            .stops()
            .map(|stop| format!("{},{}", stop.position.lon, stop.position.lat))
            .collect::<Vec<_>>()
            .join(";");
        format!(
            "{}/route/v1/{}/{}?overview=full&geometries=geojson",
            self.base_url,
            self.config.profile(request.travel_mode),
            coords
        )
    }

    /// Convert a reqwest error to a `DirectionsError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> DirectionsError {
        if error.is_timeout() {
            return DirectionsError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }
        if let Some(status) = error.status() {
            return DirectionsError::Http {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }
        DirectionsError::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }
}

/// Convert an OSRM response into a `(lat, lon)` path.
fn convert_response(response: RouteResponse) -> Result<Vec<Position>, DirectionsError> {
    if response.is_no_route() {
        return Err(DirectionsError::NoRoute {
            message: response.message.unwrap_or(response.code),
        });
    }
    if !response.is_ok() {
        return Err(DirectionsError::Service {
            code: response.code,
            message: response.message.unwrap_or_default(),
        });
    }
    let route = response
        .routes
        .into_iter()
        .next()
        .ok_or_else(|| DirectionsError::NoRoute {
            message: "OSRM response contained no routes".to_owned(),
        })?;
    if route.geometry.coordinates.is_empty() {
        return Err(DirectionsError::NoRoute {
            message: "OSRM route geometry is empty".to_owned(),
        });
    }
    Ok(route
        .geometry
        .coordinates
        .into_iter()
        .map(|[lon, lat]| Position::new(lat, lon))
        .collect())
}

/// Decode an OSRM body, keeping OSRM's own error codes on non-2xx replies.
fn decode_body(url: &str, status: u16, body: &str) -> Result<Vec<Position>, DirectionsError> {
    match serde_json::from_str::<RouteResponse>(body) {
        Ok(response) => convert_response(response),
        Err(_) if !(200..300).contains(&status) => Err(DirectionsError::Http {
            url: url.to_owned(),
            status,
            message: body.chars().take(200).collect(),
        }),
        Err(err) => Err(DirectionsError::Parse {
            message: err.to_string(),
        }),
    }
}

#[async_trait(?Send)]
impl DirectionsProvider for OsrmDirectionsProvider {
    async fn route(&self, request: &DirectionsRequest) -> Result<Vec<Position>, DirectionsError> {
        let url = self.build_route_url(request);
        debug!("requesting OSRM route {url}");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;
        decode_body(&url, status, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecoroute_core::Waypoint;
    use rstest::{fixture, rstest};

    #[fixture]
    fn request() -> DirectionsRequest {
        DirectionsRequest {
            origin: Waypoint::new("New Delhi, India", Position::new(28.6, 77.2)),
            destination: Waypoint::new("Jaipur, India", Position::new(26.9, 75.8)),
            waypoints: vec![Waypoint::new("Agra, India", Position::new(27.1, 78.0))],
            travel_mode: TravelMode::Transit,
        }
    }

    #[rstest]
    fn build_route_url_orders_lon_lat(request: DirectionsRequest) {
        let provider =
            OsrmDirectionsProvider::new("http://localhost:5000").expect("provider should build");

        let url = provider.build_route_url(&request);

        assert_eq!(
            url,
            "http://localhost:5000/route/v1/transit/77.2,28.6;78,27.1;75.8,26.9?overview=full&geometries=geojson"
        );
    }

    #[rstest]
    fn build_route_url_uses_configured_profiles(request: DirectionsRequest) {
        let config =
            OsrmDirectionsProviderConfig::new("http://osrm.example.com/").with_profiles("car", "train");
        let provider = OsrmDirectionsProvider::with_config(config).expect("provider should build");

        let transit = provider.build_route_url(&request);
        let driving = provider.build_route_url(&request.with_travel_mode(TravelMode::Driving));

        assert!(transit.starts_with("http://osrm.example.com/route/v1/train/"));
        assert!(driving.starts_with("http://osrm.example.com/route/v1/car/"));
    }

    #[rstest]
    fn rejects_unparseable_base_url() {
        let err = OsrmDirectionsProvider::new("::").expect_err("invalid URL");
        assert!(matches!(err, ProviderBuildError::InvalidBaseUrl { .. }));
    }

    #[rstest]
    fn converts_geojson_to_lat_lon() {
        let body = r#"{"code": "Ok", "routes": [{"geometry": {"coordinates": [[77.2, 28.6], [75.8, 26.9]]}}]}"#;

        let path = decode_body("http://osrm", 200, body).expect("path");

        assert_eq!(path, [Position::new(28.6, 77.2), Position::new(26.9, 75.8)]);
    }

    #[rstest]
    #[case(r#"{"code": "NoRoute", "message": "Impossible route"}"#)]
    #[case(r#"{"code": "NoSegment", "message": "Could not find a matching segment"}"#)]
    #[case(r#"{"code": "Ok", "routes": []}"#)]
    #[case(r#"{"code": "Ok", "routes": [{"geometry": {"coordinates": []}}]}"#)]
    fn maps_missing_routes_to_no_route(#[case] body: &str) {
        let err = decode_body("http://osrm", 200, body).expect_err("no route");
        assert!(matches!(err, DirectionsError::NoRoute { .. }), "got {err:?}");
    }

    #[rstest]
    fn keeps_service_error_codes_on_http_errors() {
        let body = r#"{"code": "InvalidQuery", "message": "Query string malformed"}"#;

        let err = decode_body("http://osrm", 400, body).expect_err("service error");

        assert_eq!(
            err,
            DirectionsError::Service {
                code: "InvalidQuery".into(),
                message: "Query string malformed".into(),
            }
        );
    }

    #[rstest]
    #[case(502, "Bad Gateway", "Http")]
    #[case(200, "not json", "Parse")]
    fn classifies_undecodable_bodies(#[case] status: u16, #[case] body: &str, #[case] kind: &str) {
        let err = decode_body("http://osrm", status, body).expect_err("undecodable");
        let matched = match err {
            DirectionsError::Http { .. } => "Http",
            DirectionsError::Parse { .. } => "Parse",
            _ => "other",
        };
        assert_eq!(matched, kind);
    }
}
