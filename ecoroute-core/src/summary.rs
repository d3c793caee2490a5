//! Side-panel summary of an optimized route.

use serde::{Deserialize, Serialize};

use crate::{BackhaulOpportunity, Modality, PoolingOpportunity, ValidatedResult, resolve_modality};

/// Display data accompanying a render plan.
///
/// Unlike the map markers, `sequence` lists the stops in optimized visiting
/// order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    /// Stop labels in visiting order.
    pub sequence: Vec<String>,
    /// Recommended vehicle label, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle: Option<String>,
    /// Modality derived from the vehicle label.
    pub modality: Modality,
    /// Total distance in kilometres, if reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_distance_km: Option<f64>,
    /// Estimated CO2 emissions in kilograms.
    pub co2_emissions_kg: f64,
    /// Estimated trip cost in Indian rupees.
    pub trip_cost_inr: f64,
    /// Share of vehicle capacity used.
    pub capacity_utilization_percent: f64,
    /// Pooling suggestions.
    #[serde(default)]
    pub pooling_opportunities: Vec<PoolingOpportunity>,
    /// Backhaul suggestion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backhaul_opportunity: Option<BackhaulOpportunity>,
}

impl RouteSummary {
    /// Summarise a validated result.
    #[must_use]
    pub fn from_result(validated: &ValidatedResult) -> Self {
        let result = validated.result();
        Self {
            sequence: validated.visiting_order().map(ToOwned::to_owned).collect(),
            vehicle: result.vehicle_recommended.clone(),
            modality: resolve_modality(result),
            total_distance_km: result.total_distance_km,
            co2_emissions_kg: result.co2_emissions_kg,
            trip_cost_inr: result.trip_cost_inr,
            capacity_utilization_percent: result.capacity_utilization_percent,
            pooling_opportunities: result.pooling_opportunities.clone(),
            backhaul_opportunity: result.backhaul_opportunity.clone(),
        }
    }
}
