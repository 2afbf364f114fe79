//! Remote data gateways
//!
//! A gateway turns a [`FetchRequest`] into a [`Page`]. The grid never filters,
//! sorts or paginates rows itself; it only relies on the gateway honoring the
//! contract implemented by [`query::evaluate`](crate::query::evaluate).
//!
//! - [`InMemoryGateway`] - evaluates requests over a local dataset
//! - [`HttpGateway`] - POSTs requests as JSON to a remote endpoint
//! - [`CachedGateway`] - wraps any gateway with a short-lived page cache

mod cached;
mod http;
mod memory;

pub use cached::CachedGateway;
pub use http::HttpGateway;
pub use memory::InMemoryGateway;

use std::sync::Arc;

use async_trait::async_trait;

use crate::Response;
use crate::error::GatewayError;
use crate::query::FetchRequest;
use crate::query::Page;

/// Source of pages for a grid.
///
/// Implementations must apply filters (all must match), then a stable
/// multi-key sort, then pagination, with `page_count = ceil(row_count /
/// page_size)`.
#[async_trait]
pub trait DataGateway: Send + Sync {
    /// Fetches the page described by `request`.
    async fn fetch(&self, request: &FetchRequest) -> Result<Response<Page>, GatewayError>;
}

#[async_trait]
impl<G: DataGateway + ?Sized> DataGateway for Arc<G> {
    async fn fetch(&self, request: &FetchRequest) -> Result<Response<Page>, GatewayError> {
        (**self).fetch(request).await
    }
}
