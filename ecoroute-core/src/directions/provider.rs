//! Directions provider trait and request types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{Modality, Position, ValidatedResult};

use super::DirectionsError;

/// Travel mode requested from a directions provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TravelMode {
    /// Road network routing.
    Driving,
    /// Public transport or rail routing.
    Transit,
}

impl TravelMode {
    /// Initial travel mode for a ground modality.
    ///
    /// Rail starts with [`TravelMode::Transit`]; everything else drives.
    #[must_use]
    pub const fn for_modality(modality: Modality) -> Self {
        match modality {
            Modality::Rail => Self::Transit,
            Modality::Air | Modality::Road => Self::Driving,
        }
    }
}

/// A stop on a directions request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    /// Address as resolved by the optimization service.
    pub label: String,
    /// Coordinate of the address.
    pub position: Position,
}

impl Waypoint {
    /// Create a waypoint from a label and position.
    #[must_use]
    pub fn new(label: impl Into<String>, position: Position) -> Self {
        Self {
            label: label.into(),
            position,
        }
    }
}

/// Ordered request for a ground path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionsRequest {
    /// First stop.
    pub origin: Waypoint,
    /// Last stop.
    pub destination: Waypoint,
    /// Interior stops, in submission order.
    pub waypoints: Vec<Waypoint>,
    /// Requested travel mode.
    pub travel_mode: TravelMode,
}

impl DirectionsRequest {
    /// Build a request over the valid locations of `result`.
    ///
    /// Stops are taken in the order the service resolved them, not in
    /// optimized visiting order. Returns `None` when fewer than two locations
    /// exist, as there is nothing to connect.
    ///
    /// # Examples
    /// ```
    /// use ecoroute_core::{DirectionsRequest, OptimizationResult, Position, TravelMode, validate};
    ///
    /// let result = OptimizationResult::success(
    ///     vec!["Agra, India".into(), "Jaipur, India".into()],
    ///     vec![Position::new(27.1, 78.0), Position::new(26.9, 75.8)],
    ///     vec![0, 1],
    /// );
    /// let validated = validate(result)?;
    /// let request = DirectionsRequest::from_result(&validated, TravelMode::Driving)
    ///     .expect("two stops");
    /// assert_eq!(request.origin.label, "Agra, India");
    /// assert!(request.waypoints.is_empty());
    /// # Ok::<(), ecoroute_core::ValidationError>(())
    /// ```
    #[must_use]
    pub fn from_result(result: &ValidatedResult, travel_mode: TravelMode) -> Option<Self> {
        let mut stops: Vec<Waypoint> = result
            .locations()
            .map(|(label, position)| Waypoint::new(label, position))
            .collect();
        if stops.len() < 2 {
            return None;
        }
        let destination = stops.pop()?;
        let mut rest = stops.into_iter();
        let origin = rest.next()?;
        Some(Self {
            origin,
            destination,
            waypoints: rest.collect(),
            travel_mode,
        })
    }

    /// Copy of this request with a different travel mode.
    #[must_use]
    pub fn with_travel_mode(&self, travel_mode: TravelMode) -> Self {
        Self {
            travel_mode,
            ..self.clone()
        }
    }

    /// All stops in order: origin, waypoints, destination.
    pub fn stops(&self) -> impl Iterator<Item = &Waypoint> {
        std::iter::once(&self.origin)
            .chain(self.waypoints.iter())
            .chain(std::iter::once(&self.destination))
    }
}

/// Resolve ground paths between ordered stops.
#[async_trait(?Send)]
pub trait DirectionsProvider {
    /// Return the path through `request`'s stops as `(lat, lon)` positions.
    async fn route(&self, request: &DirectionsRequest) -> Result<Vec<Position>, DirectionsError>;
}

#[async_trait(?Send)]
impl<T: DirectionsProvider + ?Sized> DirectionsProvider for Box<T> {
    async fn route(&self, request: &DirectionsRequest) -> Result<Vec<Position>, DirectionsError> {
        (**self).route(request).await
    }
}
