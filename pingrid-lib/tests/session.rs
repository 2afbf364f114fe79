//! Integration tests for the async grid session.
//!
//! Gateways here are in-memory with per-page latency, so superseded and
//! failing fetches can be provoked deterministically enough without a
//! network.

use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::time::Duration;

use async_trait::async_trait;
use pingrid_lib::GridIntent;
use pingrid_lib::GridSession;
use pingrid_lib::Response;
use pingrid_lib::cache::CacheConfig;
use pingrid_lib::cache::InMemoryCache;
use pingrid_lib::column::ColumnSet;
use pingrid_lib::column::ColumnSpec;
use pingrid_lib::error::GatewayError;
use pingrid_lib::gateway::CachedGateway;
use pingrid_lib::gateway::DataGateway;
use pingrid_lib::gateway::InMemoryGateway;
use pingrid_lib::grid::Grid;
use pingrid_lib::model::FieldConcat;
use pingrid_lib::model::Row;
use pingrid_lib::model::RowId;
use pingrid_lib::pinning::RowPinPosition;
use pingrid_lib::query::FetchRequest;
use pingrid_lib::query::Page;
use pingrid_lib::view::FetchStatus;

fn people(count: usize) -> Vec<Row> {
    (0..count)
        .map(|i| {
            Row::new()
                .set("firstName", format!("First{:02}", i))
                .set("lastName", format!("Last{:02}", i))
                .set("age", (20 + i % 40) as i64)
        })
        .collect()
}

fn grid() -> Grid {
    let columns = ColumnSet::with_controls(
        vec![
            ColumnSpec::new("firstName", 150).header("First Name"),
            ColumnSpec::new("lastName", 150).header("Last Name"),
            ColumnSpec::new("age", 80).header("Age"),
        ],
        40,
    )
    .unwrap();
    Grid::builder(columns, FieldConcat::new(["firstName", "lastName"]))
        .build()
        .unwrap()
}

/// Delays fetches of selected pages and can fail others.
struct ScriptedGateway {
    inner: InMemoryGateway,
    slow_page: Option<usize>,
    failing_page: Option<usize>,
    completed: AtomicUsize,
}

impl ScriptedGateway {
    fn new(rows: Vec<Row>) -> Self {
        Self {
            inner: InMemoryGateway::new(rows),
            slow_page: None,
            failing_page: None,
            completed: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl DataGateway for ScriptedGateway {
    async fn fetch(&self, request: &FetchRequest) -> Result<Response<Page>, GatewayError> {
        let delay = if Some(request.page_index) == self.slow_page { 300 } else { 10 };
        tokio::time::sleep(Duration::from_millis(delay)).await;
        self.completed.fetch_add(1, Ordering::SeqCst);
        if Some(request.page_index) == self.failing_page {
            return Err(GatewayError::http(503, "unavailable"));
        }
        self.inner.fetch(request).await
    }
}

#[tokio::test]
async fn test_mount_loads_first_page() {
    let handle = GridSession::spawn(grid(), Arc::new(InMemoryGateway::new(people(25))));
    assert!(handle.view().status.is_loading());

    let view = handle.wait_idle().await.unwrap();
    assert_eq!(view.rows.len(), 10);
    assert_eq!(view.pagination.page_count, 3);
    assert_eq!(view.pagination.row_count, 25);
    assert_eq!(view.rows[0].id, RowId::from("First00Last00"));

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_superseded_fetch_is_aborted() {
    let mut gateway = ScriptedGateway::new(people(25));
    gateway.slow_page = Some(1);
    let gateway = Arc::new(gateway);

    let handle = GridSession::spawn(grid(), gateway.clone());
    handle.wait_idle().await.unwrap();
    let after_mount = gateway.completed.load(Ordering::SeqCst);

    handle.apply(GridIntent::NextPage).await.unwrap();
    handle.apply(GridIntent::NextPage).await.unwrap();
    let view = handle.wait_idle().await.unwrap();

    assert_eq!(view.pagination.page_index, 2);
    assert_eq!(view.rows.len(), 5);
    assert_eq!(view.rows[0].id, RowId::from("First20Last20"));

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(gateway.completed.load(Ordering::SeqCst), after_mount + 1);
    assert_eq!(handle.view().rows[0].id, RowId::from("First20Last20"));
}

#[tokio::test]
async fn test_failed_fetch_keeps_previous_page() {
    let mut gateway = ScriptedGateway::new(people(25));
    gateway.failing_page = Some(1);

    let handle = GridSession::spawn(grid(), Arc::new(gateway));
    handle.wait_idle().await.unwrap();
    handle
        .apply(GridIntent::PinRow {
            id: RowId::from("First04Last04"),
            position: Some(RowPinPosition::Bottom),
        })
        .await
        .unwrap();

    handle.apply(GridIntent::NextPage).await.unwrap();
    let view = handle.wait_idle().await.unwrap();

    assert!(matches!(view.status, FetchStatus::Failed(_)));
    assert_eq!(view.pagination.page_index, 1);
    assert_eq!(view.rows.len(), 10);
    assert_eq!(view.rows[0].id, RowId::from("First00Last00"));
    assert_eq!(view.rows[9].id, RowId::from("First04Last04"));
    assert_eq!(view.pin_set.bottom, vec![RowId::from("First04Last04")]);

    let view = handle.apply(GridIntent::Retry).await.unwrap();
    assert!(view.status.is_loading());
    let view = handle.wait_idle().await.unwrap();
    assert!(view.status.error().is_some());
}

#[tokio::test]
async fn test_pinned_row_follows_navigation() {
    let handle = GridSession::spawn(grid(), Arc::new(InMemoryGateway::new(people(25))));
    let before = handle.wait_idle().await.unwrap();
    let pinned = before.rows[3].clone();

    handle
        .apply(GridIntent::PinRow {
            id: pinned.id.clone(),
            position: Some(RowPinPosition::Top),
        })
        .await
        .unwrap();
    handle.apply(GridIntent::LastPage).await.unwrap();
    let view = handle.wait_idle().await.unwrap();

    assert_eq!(view.pagination.page_index, 2);
    assert_eq!(view.rows.len(), 6);
    assert_eq!(view.rows[0].id, pinned.id);
    assert_eq!(view.rows[0].row, pinned.row);
    assert_eq!(view.rows[0].pin, Some(RowPinPosition::Top));

    handle.apply(GridIntent::FirstPage).await.unwrap();
    let view = handle.wait_idle().await.unwrap();
    assert_eq!(view.rows.len(), 10);
    assert_eq!(view.rows.iter().filter(|r| r.id == pinned.id).count(), 1);
}

#[tokio::test]
async fn test_filter_resets_page_and_keeps_pins() {
    let rows = ["a", "b", "c"]
        .iter()
        .map(|name| Row::new().set("name", *name))
        .collect::<Vec<_>>();
    let columns = ColumnSet::with_controls(vec![ColumnSpec::new("name", 150)], 40).unwrap();
    let grid = Grid::builder(columns, FieldConcat::new(["name"])).build().unwrap();

    let handle = GridSession::spawn(grid, Arc::new(InMemoryGateway::new(rows)));
    handle
        .apply(GridIntent::SetFilter {
            column: "name".into(),
            value: "".into(),
        })
        .await
        .unwrap();
    let view = handle.wait_idle().await.unwrap();
    assert_eq!(view.rows.len(), 3);
    assert_eq!(view.pagination.page_count, 1);

    handle
        .apply(GridIntent::PinRow {
            id: RowId::from("a"),
            position: Some(RowPinPosition::Top),
        })
        .await
        .unwrap();
    let view = handle
        .apply(GridIntent::SetFilter {
            column: "name".into(),
            value: "b".into(),
        })
        .await
        .unwrap();
    assert_eq!(view.pagination.page_index, 0);

    let view = handle.wait_idle().await.unwrap();
    let ids: Vec<&str> = view.rows.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["a", "b"]);
    assert_eq!(view.pagination.row_count, 1);
}

#[tokio::test]
async fn test_cached_pages_are_reused() {
    let gateway = CachedGateway::new(
        InMemoryGateway::new(people(25)),
        Arc::new(InMemoryCache::new()),
        &CacheConfig::default(),
    );
    let handle = GridSession::spawn(grid(), Arc::new(gateway));
    let first = handle.wait_idle().await.unwrap();
    assert!(first.cache.is_miss());

    handle.apply(GridIntent::NextPage).await.unwrap();
    handle.wait_idle().await.unwrap();
    handle.apply(GridIntent::PreviousPage).await.unwrap();
    let back = handle.wait_idle().await.unwrap();

    assert!(back.cache.is_hit());
    assert_eq!(back.rows, first.rows);
}

#[tokio::test]
async fn test_shutdown_returns_grid_and_closes_handle() {
    let handle = GridSession::spawn(grid(), Arc::new(InMemoryGateway::new(people(5))));
    handle.wait_idle().await.unwrap();
    handle.apply(GridIntent::ToggleSort { column: "age".into(), multi: false }).await.unwrap();

    let grid = handle.shutdown().await.unwrap();
    assert_eq!(grid.state().sorting.keys().len(), 1);
}
