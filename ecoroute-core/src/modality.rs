//! Transport modality derived from the recommended vehicle label.

use serde::{Deserialize, Serialize};

use crate::OptimizationResult;

/// How a route is travelled, which decides how it is routed and drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modality {
    /// Flight; drawn as a dashed great-circle line without ground routing.
    Air,
    /// Rail; ground-routed with Transit first, Driving as a fallback.
    Rail,
    /// Road; ground-routed with Driving.
    Road,
}

impl Modality {
    /// Classify a vehicle label.
    ///
    /// Matching is a case-sensitive substring test: `"Air"` wins over
    /// `"Rail"`, and anything else is [`Modality::Road`].
    ///
    /// # Examples
    /// ```
    /// use ecoroute_core::Modality;
    ///
    /// assert_eq!(Modality::from_label("Air Cargo"), Modality::Air);
    /// assert_eq!(Modality::from_label("Freight Rail"), Modality::Rail);
    /// assert_eq!(Modality::from_label("air cargo"), Modality::Road);
    /// ```
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        if label.contains("Air") {
            Self::Air
        } else if label.contains("Rail") {
            Self::Rail
        } else {
            Self::Road
        }
    }

    /// Whether routes of this modality need a directions lookup.
    #[must_use]
    pub const fn is_ground(self) -> bool {
        !matches!(self, Self::Air)
    }
}

/// Resolve the modality of `result` from its recommended vehicle.
///
/// A result without a vehicle label travels by road.
#[must_use]
pub fn resolve_modality(result: &OptimizationResult) -> Modality {
    result
        .vehicle_recommended
        .as_deref()
        .map_or(Modality::Road, Modality::from_label)
}
