//! Provider-agnostic render plans.
//!
//! A [`RenderPlan`] is everything a map surface needs to draw one route:
//! markers, a path with its line style, a focus point and a bounding box.
//! Building one is pure; no I/O happens here.

use geo::{BoundingRect, Coord, MultiPoint};
use serde::{Deserialize, Serialize};

use crate::{Modality, Position, ValidatedResult};

/// A labelled pin on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    /// Pin location.
    pub position: Position,
    /// Address shown in the popup.
    pub label: String,
}

/// Line style for the route path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathStyle {
    /// Solid line following roads or rails.
    SolidRoad,
    /// Dashed great-circle line for flights.
    DashedFlight,
}

impl PathStyle {
    /// Style used for `modality`.
    #[must_use]
    pub const fn for_modality(modality: Modality) -> Self {
        match modality {
            Modality::Air => Self::DashedFlight,
            Modality::Rail | Modality::Road => Self::SolidRoad,
        }
    }
}

/// Axis-aligned box covering every marker and path point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Minimum latitude and longitude.
    pub south_west: Position,
    /// Maximum latitude and longitude.
    pub north_east: Position,
}

impl Bounds {
    /// Bounding box of `positions`, or `None` when empty.
    ///
    /// # Examples
    /// ```
    /// use ecoroute_core::{Bounds, Position};
    ///
    /// let bounds = Bounds::covering([Position::new(28.6, 77.2), Position::new(26.9, 78.0)])
    ///     .expect("non-empty input");
    /// assert_eq!(bounds.south_west, Position::new(26.9, 77.2));
    /// assert_eq!(bounds.north_east, Position::new(28.6, 78.0));
    /// ```
    pub fn covering<I>(positions: I) -> Option<Self>
    where
        I: IntoIterator<Item = Position>,
    {
        let points: MultiPoint<f64> = positions
            .into_iter()
            .map(Coord::from)
            .collect::<Vec<_>>()
            .into();
        points.bounding_rect().map(|rect| Self {
            south_west: rect.min().into(),
            north_east: rect.max().into(),
        })
    }
}

/// Everything the map draws for one route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderPlan {
    /// One marker per valid location, in the order the service returned them.
    pub markers: Vec<Marker>,
    /// Route path; empty when nothing could be drawn.
    pub path: Vec<Position>,
    /// How to draw `path`.
    pub path_style: PathStyle,
    /// Map centre.
    pub focus: Position,
    /// Box covering markers and path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Bounds>,
}

/// Build the render plan for a validated result.
///
/// Markers pair `valid_locations` with `coordinates` by index and are never
/// reordered by the optimized visiting order. For ground modalities the path
/// is the service's road geometry when non-empty, else `ground_path`, else
/// empty. Air routes draw the coordinates verbatim.
#[must_use]
pub fn build_render_plan(
    result: &ValidatedResult,
    modality: Modality,
    ground_path: Option<&[Position]>,
) -> RenderPlan {
    let markers: Vec<Marker> = result
        .locations()
        .map(|(label, position)| Marker {
            position,
            label: label.to_owned(),
        })
        .collect();
    let path = match modality {
        Modality::Air => result.result().coordinates.clone(),
        Modality::Rail | Modality::Road => result
            .result()
            .usable_road_geometry()
            .or(ground_path)
            .map(<[Position]>::to_vec)
            .unwrap_or_default(),
    };
    let bounds = Bounds::covering(
        markers
            .iter()
            .map(|marker| marker.position)
            .chain(path.iter().copied()),
    );
    RenderPlan {
        markers,
        path,
        path_style: PathStyle::for_modality(modality),
        focus: result.focus(),
        bounds,
    }
}
