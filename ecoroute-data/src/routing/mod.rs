//! HTTP-based directions providers for ground routing.
//!
//! This module provides [`OsrmDirectionsProvider`], an implementation of
//! [`ecoroute_core::DirectionsProvider`] that snaps an ordered list of stops
//! to a road path using OSRM's Route API.
//!
//! # Architecture
//!
//! The provider is asynchronous, matching the core trait, and keeps no
//! runtime of its own. Travel modes map to OSRM profiles; when a transit
//! profile is unavailable on the server the request fails and the core
//! fallback retries with the driving profile.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use ecoroute_data::routing::{OsrmDirectionsProvider, OsrmDirectionsProviderConfig};
//!
//! let config = OsrmDirectionsProviderConfig::new("http://router.project-osrm.org")
//!     .with_timeout(Duration::from_secs(10));
//! let provider = OsrmDirectionsProvider::with_config(config)?;
//!
//! // Or use the simple constructor
//! let provider = OsrmDirectionsProvider::new("http://localhost:5000")?;
//! # Ok::<(), ecoroute_data::routing::ProviderBuildError>(())
//! ```

mod osrm;
mod provider;

pub use osrm::{LineString, Route, RouteResponse};
pub use provider::{
    DEFAULT_OSRM_URL, DEFAULT_USER_AGENT, OsrmDirectionsProvider, OsrmDirectionsProviderConfig,
    ProviderBuildError,
};
