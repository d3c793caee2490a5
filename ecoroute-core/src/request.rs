//! Stop requests submitted by a user for optimization.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Category of cargo being moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CargoType {
    /// General freight.
    #[default]
    Standard,
    /// Goods with a limited shelf life.
    Perishable,
    /// Dangerous goods requiring special handling.
    Hazardous,
}

impl CargoType {
    /// Wire name understood by the optimization service.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Perishable => "Perishable",
            Self::Hazardous => "Hazardous",
        }
    }
}

impl fmt::Display for CargoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown cargo type or vehicle class.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised {kind} {value:?}")]
pub struct ParseLabelError {
    kind: &'static str,
    value: String,
}

impl FromStr for CargoType {
    type Err = ParseLabelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "perishable" => Ok(Self::Perishable),
            "hazardous" => Ok(Self::Hazardous),
            _ => Err(ParseLabelError {
                kind: "cargo type",
                value: value.to_owned(),
            }),
        }
    }
}

/// Fleet vehicle the user would prefer, forwarded as `vehicle_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleClass {
    /// Battery electric delivery van.
    ElectricVan,
    /// Diesel delivery van.
    DieselVan,
    /// Heavy diesel truck.
    DieselTruck,
}

impl VehicleClass {
    /// Wire name understood by the optimization service.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ElectricVan => "electric_van",
            Self::DieselVan => "diesel_van",
            Self::DieselTruck => "diesel_truck",
        }
    }
}

impl FromStr for VehicleClass {
    type Err = ParseLabelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "electric_van" => Ok(Self::ElectricVan),
            "diesel_van" => Ok(Self::DieselVan),
            "diesel_truck" => Ok(Self::DieselTruck),
            _ => Err(ParseLabelError {
                kind: "vehicle class",
                value: value.to_owned(),
            }),
        }
    }
}

/// Errors returned by [`StopRequest::new`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StopRequestError {
    /// No stops were supplied.
    #[error("at least one stop is required")]
    NoStops,
    /// A stop was empty after trimming whitespace.
    #[error("stop {index} is blank")]
    BlankStop {
        /// Position of the offending stop in the submitted list.
        index: usize,
    },
    /// Cargo weight was zero, negative or not a number.
    #[error("cargo weight must be a positive number, got {0}")]
    NonPositiveWeight(f64),
    /// The delivery window was zero hours.
    #[error("maximum delivery hours must be positive")]
    NonPositiveHours,
}

/// An immutable submission of stops and cargo constraints.
///
/// Stops are trimmed on construction and keep their submitted order.
///
/// # Examples
/// ```
/// use ecoroute_core::{CargoType, StopRequest};
///
/// let request = StopRequest::new(
///     ["  New Delhi, India ", "Agra, India"],
///     500.0,
///     CargoType::Perishable,
///     48,
/// )?;
/// assert_eq!(request.stops(), ["New Delhi, India", "Agra, India"]);
/// # Ok::<(), ecoroute_core::StopRequestError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StopRequestDraft")]
pub struct StopRequest {
    stops: Vec<String>,
    cargo_weight_kg: f64,
    cargo_type: CargoType,
    max_delivery_hours: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    vehicle_preference: Option<VehicleClass>,
}

/// Delivery window applied when a request file omits one.
pub const DEFAULT_MAX_DELIVERY_HOURS: u32 = 72;

impl StopRequest {
    /// Validate and construct a request.
    ///
    /// # Errors
    ///
    /// Returns [`StopRequestError`] when no stops are given, a stop is blank,
    /// the weight is not positive or the delivery window is zero.
    pub fn new<I>(
        stops: I,
        cargo_weight_kg: f64,
        cargo_type: CargoType,
        max_delivery_hours: u32,
    ) -> Result<Self, StopRequestError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let stops = stops
            .into_iter()
            .enumerate()
            .map(|(index, stop)| {
                let stop: String = stop.into();
                let trimmed = stop.trim();
                if trimmed.is_empty() {
                    Err(StopRequestError::BlankStop { index })
                } else {
                    Ok(trimmed.to_owned())
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        if stops.is_empty() {
            return Err(StopRequestError::NoStops);
        }
        if !(cargo_weight_kg.is_finite() && cargo_weight_kg > 0.0) {
            return Err(StopRequestError::NonPositiveWeight(cargo_weight_kg));
        }
        if max_delivery_hours == 0 {
            return Err(StopRequestError::NonPositiveHours);
        }
        Ok(Self {
            stops,
            cargo_weight_kg,
            cargo_type,
            max_delivery_hours,
            vehicle_preference: None,
        })
    }

    /// Attach a preferred vehicle class.
    #[must_use]
    pub const fn with_vehicle_preference(mut self, vehicle: VehicleClass) -> Self {
        self.vehicle_preference = Some(vehicle);
        self
    }

    /// Trimmed stop addresses in submission order.
    #[must_use]
    pub fn stops(&self) -> &[String] {
        &self.stops
    }

    /// Cargo weight in kilograms.
    #[must_use]
    pub const fn cargo_weight_kg(&self) -> f64 {
        self.cargo_weight_kg
    }

    /// Cargo category.
    #[must_use]
    pub const fn cargo_type(&self) -> CargoType {
        self.cargo_type
    }

    /// Maximum delivery window in hours.
    #[must_use]
    pub const fn max_delivery_hours(&self) -> u32 {
        self.max_delivery_hours
    }

    /// Preferred vehicle class, if any.
    #[must_use]
    pub const fn vehicle_preference(&self) -> Option<VehicleClass> {
        self.vehicle_preference
    }
}

#[derive(Deserialize)]
struct StopRequestDraft {
    stops: Vec<String>,
    cargo_weight_kg: f64,
    #[serde(default)]
    cargo_type: CargoType,
    #[serde(default = "default_max_delivery_hours")]
    max_delivery_hours: u32,
    #[serde(default)]
    vehicle_preference: Option<VehicleClass>,
}

const fn default_max_delivery_hours() -> u32 {
    DEFAULT_MAX_DELIVERY_HOURS
}

impl TryFrom<StopRequestDraft> for StopRequest {
    type Error = StopRequestError;

    fn try_from(draft: StopRequestDraft) -> Result<Self, Self::Error> {
        let request = Self::new(
            draft.stops,
            draft.cargo_weight_kg,
            draft.cargo_type,
            draft.max_delivery_hours,
        )?;
        Ok(match draft.vehicle_preference {
            Some(vehicle) => request.with_vehicle_preference(vehicle),
            None => request,
        })
    }
}
