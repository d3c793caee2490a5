//! Optimization results returned by the route optimization service.

use serde::{Deserialize, Serialize};

use crate::Position;

/// Outcome reported by the optimization service.
///
/// Anything other than `"success"` decodes as [`ResultStatus::Failure`]; the
/// service is known to answer `"error"` as well as `"failure"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultStatus {
    /// The service produced a route.
    Success,
    /// The service declined the request; see the accompanying message.
    #[serde(other)]
    Failure,
}

/// Spare-capacity cargo that can be pooled along the route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolingOpportunity {
    /// City where the cargo waits.
    pub city: String,
    /// Description of the goods.
    pub item: String,
    /// Weight in kilograms.
    pub weight: f64,
    /// Revenue in Indian rupees.
    pub revenue_inr: f64,
}

/// Return cargo available from the final drop-off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackhaulOpportunity {
    /// City the return leg starts from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_city: Option<String>,
    /// Destination of the return leg.
    pub to_city: String,
    /// Description of the goods.
    pub item: String,
    /// Weight in kilograms.
    pub weight: f64,
    /// Revenue in Indian rupees.
    pub revenue_inr: f64,
}

/// Raw, unvalidated optimization result.
///
/// Field names follow the service's snake_case JSON. Everything except
/// `status` defaults when absent so failure responses, which carry only a
/// status and message, decode into the same type. Downstream stages accept
/// only a [`ValidatedResult`](crate::ValidatedResult).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    /// Success or failure of the optimization.
    pub status: ResultStatus,
    /// Human-readable message, populated on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Addresses the service could resolve, in submission order.
    #[serde(default)]
    pub valid_locations: Vec<String>,
    /// Coordinates paired by index with `valid_locations`.
    #[serde(default)]
    pub coordinates: Vec<Position>,
    /// Visiting order as indices into `valid_locations`.
    ///
    /// Signed so that negative indices survive decoding and are rejected by
    /// validation rather than reported as transport errors.
    #[serde(default)]
    pub optimized_route_indices: Vec<i64>,
    /// Detailed road path, if the service computed one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub road_geometry: Option<Vec<Position>>,
    /// Recommended vehicle label, e.g. `"Heavy Freight Truck"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_recommended: Option<String>,
    /// Total route distance in kilometres.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_distance_km: Option<f64>,
    /// Estimated CO2 emissions in kilograms.
    #[serde(default)]
    pub co2_emissions_kg: f64,
    /// Estimated trip cost in Indian rupees.
    #[serde(default)]
    pub trip_cost_inr: f64,
    /// Share of vehicle capacity used by the cargo.
    #[serde(default)]
    pub capacity_utilization_percent: f64,
    /// Pooling suggestions along the route.
    #[serde(default)]
    pub pooling_opportunities: Vec<PoolingOpportunity>,
    /// Backhaul suggestion from the final stop.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backhaul_opportunity: Option<BackhaulOpportunity>,
}

impl OptimizationResult {
    /// Build a successful result with the given locations and visiting order.
    ///
    /// Metrics default to zero and optional fields to `None`.
    #[must_use]
    pub fn success(
        valid_locations: Vec<String>,
        coordinates: Vec<Position>,
        optimized_route_indices: Vec<i64>,
    ) -> Self {
        Self {
            status: ResultStatus::Success,
            message: None,
            valid_locations,
            coordinates,
            optimized_route_indices,
            road_geometry: None,
            vehicle_recommended: None,
            total_distance_km: None,
            co2_emissions_kg: 0.0,
            trip_cost_inr: 0.0,
            capacity_utilization_percent: 0.0,
            pooling_opportunities: Vec::new(),
            backhaul_opportunity: None,
        }
    }

    /// Build a failure result carrying `message`.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: ResultStatus::Failure,
            message: Some(message.into()),
            ..Self::success(Vec::new(), Vec::new(), Vec::new())
        }
    }

    /// Set the recommended vehicle label.
    #[must_use]
    pub fn with_vehicle(mut self, label: impl Into<String>) -> Self {
        self.vehicle_recommended = Some(label.into());
        self
    }

    /// Set the detailed road geometry.
    #[must_use]
    pub fn with_road_geometry(mut self, geometry: Vec<Position>) -> Self {
        self.road_geometry = Some(geometry);
        self
    }

    /// Whether the service reported success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == ResultStatus::Success
    }

    /// Road geometry if present and non-empty.
    #[must_use]
    pub fn usable_road_geometry(&self) -> Option<&[Position]> {
        self.road_geometry
            .as_deref()
            .filter(|geometry| !geometry.is_empty())
    }
}
