//! Page cache in front of another gateway.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::DataGateway;
use crate::CacheStatus;
use crate::Response;
use crate::cache::CacheConfig;
use crate::cache::CacheProvider;
use crate::cache::CachedPage;
use crate::error::GatewayError;
use crate::query::FetchRequest;
use crate::query::Page;

/// Serves repeated requests from a short-lived cache.
///
/// Entries are keyed by every request parameter (page index, page size,
/// sorting, filters), so paging back to a visited page is answered locally.
/// Failed fetches are never cached.
pub struct CachedGateway<G> {
    inner: G,
    cache: Arc<dyn CacheProvider>,
    ttl: Duration,
}

impl<G: DataGateway> CachedGateway<G> {
    /// Wraps `inner`, caching pages for `config.page_ttl`.
    pub fn new(inner: G, cache: Arc<dyn CacheProvider>, config: &CacheConfig) -> Self {
        Self {
            inner,
            cache,
            ttl: config.page_ttl,
        }
    }

    /// Returns the wrapped gateway.
    pub fn inner(&self) -> &G {
        &self.inner
    }

    /// Drops every cached page, e.g. after the underlying data changed.
    pub async fn invalidate(&self) {
        self.cache.clear().await;
    }
}

#[async_trait]
impl<G: DataGateway> DataGateway for CachedGateway<G> {
    async fn fetch(&self, request: &FetchRequest) -> Result<Response<Page>, GatewayError> {
        if self.ttl.is_zero() {
            return self.inner.fetch(request).await;
        }

        let cache_key = request.cache_key();

        if let Some(cached) = self.cache.get(&cache_key).await
            && let Ok(page) = serde_json::from_slice::<Page>(&cached.bytes)
        {
            log::trace!("page cache hit for {}", cache_key);
            return Ok(Response::new(page).with_cache(CacheStatus::Hit(cached.stamp)));
        }

        let page = self.inner.fetch(request).await?.into_inner();

        match serde_json::to_vec(&page) {
            Ok(data) => {
                let cached = CachedPage::expiring_in(data, self.ttl);
                let stamp = cached.stamp;
                self.cache.set(&cache_key, cached).await;
                Ok(Response::new(page).with_cache(CacheStatus::Miss(stamp)))
            }
            Err(_) => Ok(Response::new(page)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::cache::InMemoryCache;
    use crate::gateway::InMemoryGateway;
    use crate::model::Row;

    struct Counting {
        inner: InMemoryGateway,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl DataGateway for Counting {
        async fn fetch(&self, request: &FetchRequest) -> Result<Response<Page>, GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.fetch(request).await
        }
    }

    fn counting() -> Counting {
        Counting {
            inner: InMemoryGateway::new((0..30).map(|i| Row::new().set("n", i)).collect()),
            calls: AtomicUsize::new(0),
        }
    }

    #[tokio::test]
    async fn test_revisited_page_is_served_from_cache() {
        let gateway = CachedGateway::new(counting(), Arc::new(InMemoryCache::new()), &CacheConfig::default());

        let first = gateway.fetch(&FetchRequest::new(0, 10)).await.unwrap();
        let second_page = gateway.fetch(&FetchRequest::new(1, 10)).await.unwrap();
        let back = gateway.fetch(&FetchRequest::new(0, 10)).await.unwrap();

        assert!(first.cache.is_miss());
        assert!(second_page.cache.is_miss());
        assert!(back.from_cache());
        assert_eq!(back.data(), first.data());
        assert_eq!(gateway.inner().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_zero_ttl_bypasses_cache() {
        let gateway = CachedGateway::new(counting(), Arc::new(InMemoryCache::new()), &CacheConfig::no_cache());
        gateway.fetch(&FetchRequest::new(0, 10)).await.unwrap();
        let again = gateway.fetch(&FetchRequest::new(0, 10)).await.unwrap();
        assert_eq!(again.cache, CacheStatus::None);
        assert_eq!(gateway.inner().calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let gateway = CachedGateway::new(counting(), Arc::new(InMemoryCache::new()), &CacheConfig::default());
        gateway.fetch(&FetchRequest::new(0, 10)).await.unwrap();
        gateway.invalidate().await;
        let again = gateway.fetch(&FetchRequest::new(0, 10)).await.unwrap();
        assert!(again.cache.is_miss());
    }
}
