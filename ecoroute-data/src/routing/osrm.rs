//! OSRM API response types for the Route service.
//!
//! Only the fields needed to draw a path are decoded. Geometry is requested
//! as GeoJSON, so coordinates arrive as `[longitude, latitude]` pairs.
//!
//! See: <http://project-osrm.org/docs/v5.24.0/api/#route-service>

use serde::Deserialize;

/// OSRM Route API response.
#[derive(Debug, Deserialize)]
pub struct RouteResponse {
    /// Status code from OSRM.
    ///
    /// Common values:
    /// - `"Ok"` - Request was successful
    /// - `"NoRoute"` - No route found between the coordinates
    /// - `"NoSegment"` - A coordinate could not be snapped to the network
    /// - `"InvalidQuery"` - Invalid query parameters
    pub code: String,

    /// Optional error message when `code` is not `"Ok"`.
    pub message: Option<String>,

    /// Candidate routes, best first.
    #[serde(default)]
    pub routes: Vec<Route>,
}

impl RouteResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.code == "Ok"
    }

    /// Whether the code means no route exists, as opposed to a bad request.
    #[must_use]
    pub fn is_no_route(&self) -> bool {
        matches!(self.code.as_str(), "NoRoute" | "NoSegment")
    }
}

/// A single route through all requested coordinates.
#[derive(Debug, Deserialize)]
pub struct Route {
    /// Route geometry as a GeoJSON line string.
    pub geometry: LineString,
    /// Distance in metres.
    pub distance: Option<f64>,
    /// Duration in seconds.
    pub duration: Option<f64>,
}

/// GeoJSON line string; the `type` member is not checked.
#[derive(Debug, Deserialize)]
pub struct LineString {
    /// `[lon, lat]` pairs.
    pub coordinates: Vec<[f64; 2]>,
}
