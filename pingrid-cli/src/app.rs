//! Wiring of grids and gateways from command-line options.

use std::sync::Arc;
use std::time::Duration;

use pingrid_lib::cache::InMemoryCache;
use pingrid_lib::config::GridConfig;
use pingrid_lib::gateway::CachedGateway;
use pingrid_lib::gateway::DataGateway;
use pingrid_lib::gateway::HttpGateway;
use pingrid_lib::gateway::InMemoryGateway;
use pingrid_lib::grid::Grid;

use crate::cli::DataArgs;
use crate::cli::SessionArgs;
use crate::error::CliError;

/// Generated rows behind the configured latency.
pub fn local_gateway(data: &DataArgs) -> InMemoryGateway {
    let rows = data.schema.generate(data.rows, data.seed);
    log::info!(
        "generated {} {:?} rows with seed {}",
        rows.len(),
        data.schema,
        data.seed
    );
    InMemoryGateway::new(rows).with_latency(Duration::from_millis(data.latency_ms))
}

/// Builds the grid and its page-cached gateway for a session.
pub fn session_parts(args: &SessionArgs) -> Result<(Grid, Arc<dyn DataGateway>), CliError> {
    let schema = args.data.schema;
    let config = GridConfig::default().with_page_size(args.page_size);
    let cache = Arc::new(page_cache(args.cache_entries));

    let gateway: Arc<dyn DataGateway> = match &args.remote {
        Some(url) => {
            log::info!("fetching pages from {}", url);
            Arc::new(CachedGateway::new(HttpGateway::new(url)?, cache, &config.cache))
        }
        None => Arc::new(CachedGateway::new(
            local_gateway(&args.data),
            cache,
            &config.cache,
        )),
    };

    let grid = Grid::builder(schema.columns()?, schema.identity())
        .config(config)
        .build()?;
    Ok((grid, gateway))
}

/// A page cache holding at most `max_entries` pages.
pub fn page_cache(max_entries: usize) -> InMemoryCache {
    InMemoryCache::new().with_max_entries(max_entries)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pingrid_lib::cache::CacheProvider;
    use pingrid_lib::cache::CachedPage;

    use super::*;

    #[tokio::test]
    async fn test_page_cache_is_bounded() {
        let cache = page_cache(3);
        for page in 0..10 {
            let bytes = format!("{{\"page\":{}}}", page).into_bytes();
            cache
                .set(&format!("page-{}", page), CachedPage::expiring_in(bytes, Duration::from_secs(60)))
                .await;
        }
        assert_eq!(cache.len(), 3);
        assert!(cache.get("page-9").await.is_some());
    }
}
