//! Gateway results tagged with page-cache provenance

use chrono::DateTime;
use chrono::Utc;

/// What a gateway returned, plus whether the page cache was involved.
///
/// ```
/// use pingrid_lib::Response;
/// use pingrid_lib::query::Page;
///
/// let response = Response::new(Page::default());
/// assert!(!response.from_cache());
/// assert!(response.into_inner().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Response<T> {
    data: T,
    pub cache: CacheStatus,
}

impl<T> Response<T> {
    /// A response that never touched the page cache.
    pub fn new(data: T) -> Self {
        Self {
            data,
            cache: CacheStatus::None,
        }
    }

    pub fn with_cache(mut self, cache: CacheStatus) -> Self {
        self.cache = cache;
        self
    }

    /// `true` when the page was answered without asking the provider.
    pub fn from_cache(&self) -> bool {
        self.cache.is_hit()
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn into_inner(self) -> T {
        self.data
    }

    pub fn into_parts(self) -> (T, CacheStatus) {
        (self.data, self.cache)
    }
}

/// Lifetime of one cached page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStamp {
    pub cached_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// How the page cache took part in producing a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheStatus {
    /// No cache in front of the gateway, or caching disabled.
    #[default]
    None,
    /// Fetched from the provider and stored for later requests.
    Miss(CacheStamp),
    /// Served from the cache.
    Hit(CacheStamp),
}

impl CacheStatus {
    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Hit(_))
    }

    pub fn is_miss(&self) -> bool {
        matches!(self, Self::Miss(_))
    }

    pub fn stamp(&self) -> Option<CacheStamp> {
        match self {
            Self::None => None,
            Self::Miss(stamp) | Self::Hit(stamp) => Some(*stamp),
        }
    }
}
