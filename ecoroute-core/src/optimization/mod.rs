//! Requesting optimized routes from the external optimization service.
//!
//! The service is opaque: it receives a [`StopRequest`](crate::StopRequest)
//! and returns an [`OptimizationResult`] which must pass
//! [`validate`](crate::validate) before anything is rendered from it.

mod client;
mod error;
mod result;

pub use client::OptimizationClient;
pub use error::NetworkError;
pub use result::{BackhaulOpportunity, OptimizationResult, PoolingOpportunity, ResultStatus};
