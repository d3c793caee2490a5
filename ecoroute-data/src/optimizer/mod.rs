//! HTTP client for the route optimization service.
//!
//! [`HttpOptimizationClient`] implements [`ecoroute_core::OptimizationClient`]
//! by posting the stop list as JSON to `{base_url}/api/optimize` and decoding
//! the reply into an [`ecoroute_core::OptimizationResult`].
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use ecoroute_data::optimizer::{HttpOptimizationClient, HttpOptimizationClientConfig};
//!
//! let config = HttpOptimizationClientConfig::new("http://localhost:8000")
//!     .with_timeout(Duration::from_secs(60))
//!     .with_user_agent("my-app/1.0");
//! let client = HttpOptimizationClient::with_config(config)?;
//! # Ok::<(), ecoroute_data::optimizer::ClientBuildError>(())
//! ```

mod client;
mod wire;

pub use client::{
    ClientBuildError, DEFAULT_OPTIMIZER_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
    HttpOptimizationClient, HttpOptimizationClientConfig,
};
pub use wire::OptimizeRequestBody;
