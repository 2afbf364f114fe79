//! In-process gateway over a fixed dataset.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::DataGateway;
use crate::Response;
use crate::error::GatewayError;
use crate::model::Row;
use crate::query::FetchRequest;
use crate::query::Page;
use crate::query::evaluate;

/// Serves pages from rows held in memory.
///
/// Cheap to clone; the dataset is shared. An optional latency makes each fetch
/// wait before answering, which is how loading states and superseded requests
/// are exercised without a network.
///
/// # Example
///
/// ```ignore
/// let gateway = InMemoryGateway::new(rows).with_latency(Duration::from_millis(500));
/// let page = gateway.fetch(&FetchRequest::new(0, 10)).await?.into_inner();
/// ```
#[derive(Debug, Clone)]
pub struct InMemoryGateway {
    rows: Arc<Vec<Row>>,
    latency: Option<Duration>,
}

impl InMemoryGateway {
    /// Creates a gateway over `rows`.
    pub fn new(rows: Vec<Row>) -> Self {
        Self {
            rows: Arc::new(rows),
            latency: None,
        }
    }

    /// Delays every fetch by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = (!latency.is_zero()).then_some(latency);
        self
    }

    /// Returns the full, unfiltered dataset.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }
}

#[async_trait]
impl DataGateway for InMemoryGateway {
    async fn fetch(&self, request: &FetchRequest) -> Result<Response<Page>, GatewayError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        let page = evaluate(&self.rows, request)?;
        log::debug!(
            "in-memory fetch page {} size {}: {} of {} rows",
            request.page_index,
            request.page_size,
            page.len(),
            page.row_count()
        );
        Ok(Response::new(page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_evaluates_request() {
        let rows = (0..12).map(|i| Row::new().set("n", i)).collect();
        let gateway = InMemoryGateway::new(rows);

        let response = gateway.fetch(&FetchRequest::new(1, 5)).await.unwrap();
        assert!(!response.from_cache());
        let page = response.into_inner();
        assert_eq!(page.len(), 5);
        assert_eq!(page.page_count(), 3);
    }

    #[tokio::test]
    async fn test_invalid_request_is_a_query_error() {
        let gateway = InMemoryGateway::new(Vec::new());
        let err = gateway.fetch(&FetchRequest::new(0, 0)).await.unwrap_err();
        assert!(matches!(err, GatewayError::Query(_)));
        assert!(!err.is_retryable());
    }
}
