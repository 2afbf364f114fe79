//! Short-lived page cache
//!
//! Pages are kept as serialized bytes under [`FetchRequest::cache_key`] and
//! expire after [`CacheConfig::page_ttl`]. Paging back to a page seen a moment
//! ago is then answered without a round trip. The only consumer is
//! [`CachedGateway`](crate::gateway::CachedGateway).
//!
//! [`FetchRequest::cache_key`]: crate::query::FetchRequest::cache_key

mod config;
mod memory;

pub use config::*;
pub use memory::*;

use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::response::CacheStamp;

/// One serialized page and its lifetime.
#[derive(Debug, Clone)]
pub struct CachedPage {
    pub bytes: Vec<u8>,
    pub stamp: CacheStamp,
}

impl CachedPage {
    /// Stamps `bytes` to expire `ttl` from now.
    pub fn expiring_in(bytes: Vec<u8>, ttl: Duration) -> Self {
        let cached_at = Utc::now();
        let expires_at = chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|ttl| cached_at.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self {
            bytes,
            stamp: CacheStamp {
                cached_at,
                expires_at,
            },
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.stamp.expires_at
    }
}

/// Storage behind the page cache.
///
/// `get` must never hand out an expired page.
#[async_trait]
pub trait CacheProvider: Send + Sync {
    async fn get(&self, key: &str) -> Option<CachedPage>;

    async fn set(&self, key: &str, page: CachedPage);

    async fn remove(&self, key: &str);

    /// Drops every page.
    async fn clear(&self);
}
