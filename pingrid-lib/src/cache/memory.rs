//! DashMap-backed page cache

use async_trait::async_trait;
use dashmap::DashMap;

use super::CacheProvider;
use super::CachedPage;

/// Page cache held in process memory.
///
/// With [`with_max_entries`](Self::with_max_entries) the cache is bounded:
/// a full cache first purges expired pages, and if none were expired it
/// evicts the page that would expire soonest.
///
/// ```
/// use pingrid_lib::cache::InMemoryCache;
///
/// let cache = InMemoryCache::new().with_max_entries(64);
/// assert!(cache.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryCache {
    pages: DashMap<String, CachedPage>,
    max_entries: Option<usize>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = Some(max_entries.max(1));
        self
    }

    /// Number of stored pages, expired ones included.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Drops expired pages and returns how many there were.
    pub fn purge_expired(&self) -> usize {
        let before = self.pages.len();
        self.pages.retain(|_, page| !page.is_expired());
        before.saturating_sub(self.pages.len())
    }

    fn make_room_for(&self, key: &str) {
        let Some(max) = self.max_entries else { return };
        if self.pages.len() < max || self.pages.contains_key(key) {
            return;
        }
        if self.purge_expired() > 0 {
            return;
        }
        let soonest = self
            .pages
            .iter()
            .min_by_key(|entry| entry.value().stamp.expires_at)
            .map(|entry| entry.key().clone());
        if let Some(key) = soonest {
            log::trace!("page cache full, evicting {}", key);
            self.pages.remove(&key);
        }
    }
}

#[async_trait]
impl CacheProvider for InMemoryCache {
    async fn get(&self, key: &str) -> Option<CachedPage> {
        let page = self.pages.get(key)?.value().clone();
        if page.is_expired() {
            self.pages.remove(key);
            return None;
        }
        Some(page)
    }

    async fn set(&self, key: &str, page: CachedPage) {
        self.make_room_for(key);
        self.pages.insert(key.to_string(), page);
    }

    async fn remove(&self, key: &str) {
        self.pages.remove(key);
    }

    async fn clear(&self) {
        self.pages.clear();
    }
}
