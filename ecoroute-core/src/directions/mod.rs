//! Ground directions lookups for road and rail routes.
//!
//! A [`DirectionsProvider`] snaps an ordered list of stops to a drawable
//! path. Requests carry both the address label and the coordinate of each
//! stop so coordinate-based and address-based providers can serve them.

mod error;
mod provider;

pub use error::DirectionsError;
pub use provider::{DirectionsProvider, DirectionsRequest, TravelMode, Waypoint};
