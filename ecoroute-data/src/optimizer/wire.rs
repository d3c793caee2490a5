//! Request body accepted by the optimization service's `/api/optimize`.

use ecoroute_core::StopRequest;
use serde::Serialize;

/// JSON body posted to the optimization service.
#[derive(Debug, Serialize)]
pub struct OptimizeRequestBody<'a> {
    /// Addresses in submission order.
    pub locations: &'a [String],
    /// Cargo weight in kilograms.
    pub cargo_weight_kg: f64,
    /// Cargo category, e.g. `"Standard"`.
    pub cargo_type: &'static str,
    /// Maximum delivery window in hours.
    pub max_delivery_hours: u32,
    /// Preferred fleet vehicle, e.g. `"diesel_truck"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_type: Option<&'static str>,
}

impl<'a> From<&'a StopRequest> for OptimizeRequestBody<'a> {
    fn from(request: &'a StopRequest) -> Self {
        Self {
            locations: request.stops(),
            cargo_weight_kg: request.cargo_weight_kg(),
            cargo_type: request.cargo_type().as_str(),
            max_delivery_hours: request.max_delivery_hours(),
            vehicle_type: request.vehicle_preference().map(|vehicle| vehicle.as_str()),
        }
    }
}
