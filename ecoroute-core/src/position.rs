//! Geographic positions exchanged with the optimization service and renderer.

use geo::Coord;
use serde::{Deserialize, Serialize};

/// A WGS84 latitude/longitude pair.
///
/// On the wire a position is a two-element array `[lat, lon]`, the order used
/// by the optimization service and by web map renderers. Converting to
/// [`geo::Coord`] follows the `geo` convention of `x = longitude` and
/// `y = latitude`.
///
/// # Examples
/// ```
/// use ecoroute_core::Position;
///
/// let delhi: Position = serde_json::from_str("[28.6, 77.2]").unwrap();
/// assert_eq!(delhi, Position::new(28.6, 77.2));
/// assert_eq!(serde_json::to_string(&delhi).unwrap(), "[28.6,77.2]");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Position {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
}

impl Position {
    /// Construct a position from latitude and longitude.
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Whether both components are finite numbers.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }

    /// Whether the position lies within valid latitude and longitude bounds.
    #[must_use]
    pub fn is_in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }
}

impl From<[f64; 2]> for Position {
    fn from([lat, lon]: [f64; 2]) -> Self {
        Self { lat, lon }
    }
}

impl From<Position> for [f64; 2] {
    fn from(position: Position) -> Self {
        [position.lat, position.lon]
    }
}

impl From<Position> for Coord<f64> {
    fn from(position: Position) -> Self {
        Coord {
            x: position.lon,
            y: position.lat,
        }
    }
}

impl From<Coord<f64>> for Position {
    fn from(coord: Coord<f64>) -> Self {
        Self {
            lat: coord.y,
            lon: coord.x,
        }
    }
}
