//! Client trait for the route optimization service.

use async_trait::async_trait;

use crate::StopRequest;

use super::{NetworkError, OptimizationResult};

/// Submit stop requests to an optimization service.
///
/// Implementations return the decoded result whatever its `status`; a
/// [`ResultStatus::Failure`](super::ResultStatus::Failure) is a valid reply,
/// not a transport error. Only failures to obtain or decode a reply map to
/// [`NetworkError`].
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use ecoroute_core::{
///     NetworkError, OptimizationClient, OptimizationResult, StopRequest,
/// };
///
/// struct Refusing;
///
/// #[async_trait(?Send)]
/// impl OptimizationClient for Refusing {
///     async fn submit(&self, _request: &StopRequest) -> Result<OptimizationResult, NetworkError> {
///         Ok(OptimizationResult::failure("No valid addresses found"))
///     }
/// }
/// ```
#[async_trait(?Send)]
pub trait OptimizationClient {
    /// Send `request` to the service and decode its reply.
    async fn submit(&self, request: &StopRequest) -> Result<OptimizationResult, NetworkError>;
}

#[async_trait(?Send)]
impl<T: OptimizationClient + ?Sized> OptimizationClient for Box<T> {
    async fn submit(&self, request: &StopRequest) -> Result<OptimizationResult, NetworkError> {
        (**self).submit(request).await
    }
}
