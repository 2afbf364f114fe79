//! Grid controller
//!
//! [`Grid`] is the single owner of every view-state slice, the row pinning
//! and the last fetched page. It is synchronous: it never talks to a gateway
//! itself. Instead each change of the fetch parameters yields a
//! [`FetchTicket`]; whoever runs the fetch hands the result back through
//! [`Grid::complete`], which applies it only if it still matches the latest
//! parameters.
//!
//! ```text
//! intent ──apply──▶ slice mutation ──▶ reconcile ──▶ Some(ticket)?
//!                                                       │
//!                             gateway.fetch(ticket.request())
//!                                                       │
//! view ◀── reconcile ◀── page applied ◀──complete───────┘
//! ```

use std::sync::Arc;

use crate::CacheStatus;
use crate::Response;
use crate::column::ColumnSet;
use crate::config::GridConfig;
use crate::error::ConfigError;
use crate::error::GatewayError;
use crate::model::RowId;
use crate::model::RowIdentity;
use crate::model::Value;
use crate::pinning::PinSet;
use crate::pinning::RowPinPosition;
use crate::pinning::RowPinning;
use crate::query::FetchRequest;
use crate::query::Page;
use crate::reorder::DragEnd;
use crate::state::ColumnPinSide;
use crate::state::ViewState;
use crate::view::FetchStatus;
use crate::view::GridView;

/// A user action on the grid.
#[derive(Debug, Clone, PartialEq)]
pub enum GridIntent {
    /// Cycle a column through none, ascending, descending.
    ToggleSort { column: String, multi: bool },
    SetSort { column: String, desc: bool, multi: bool },
    ClearSort { column: String },
    ClearSorting,
    /// Set a column filter; a blank value removes it. Resets the page index.
    SetFilter { column: String, value: Value },
    /// Resets the page index.
    ClearFilters,
    /// Pin a row to the top or bottom, or unpin it with `None`.
    PinRow { id: RowId, position: Option<RowPinPosition> },
    /// Replace the whole pin set.
    SetRowPinning(PinSet),
    ResetRowPinning,
    ToggleRowSelected { id: RowId },
    /// Select or deselect every displayed row.
    SetAllPageRowsSelected(bool),
    ResetRowSelection,
    ReorderColumn(DragEnd),
    ResetColumnOrder,
    PinColumn { column: String, side: Option<ColumnPinSide> },
    ResetColumnPinning,
    ToggleColumnVisibility { column: String },
    SetAllColumnsVisible(bool),
    ResizeColumn { column: String, width: u32 },
    ResetColumnSize { column: String },
    SetPageIndex(usize),
    FirstPage,
    PreviousPage,
    NextPage,
    LastPage,
    SetPageSize(usize),
    /// Fetch the current parameters again.
    Retry,
}

/// A request to fetch one page, tagged with the generation it was issued in.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchTicket {
    generation: u64,
    request: FetchRequest,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn request(&self) -> &FetchRequest {
        &self.request
    }
}

/// What [`Grid::complete`] did with a fetch result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The page is now displayed.
    Applied,
    /// The parameters changed since the ticket was issued; the result was
    /// discarded.
    Stale,
    /// The fetch failed; the previous page and all state are kept.
    Failed,
}

/// Builder for [`Grid`].
pub struct GridBuilder {
    columns: ColumnSet,
    identity: Arc<dyn RowIdentity>,
    config: GridConfig,
}

impl GridBuilder {
    pub fn config(mut self, config: GridConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<Grid, ConfigError> {
        self.config.validate()?;
        let state = ViewState::new(&self.columns, &self.config);
        let latest = state.request();
        Ok(Grid {
            columns: self.columns,
            identity: self.identity,
            config: self.config,
            state,
            pinning: RowPinning::default(),
            page: Page::default(),
            page_loaded: false,
            cache: CacheStatus::None,
            status: FetchStatus::Idle,
            generation: 0,
            latest,
            applied_generation: 0,
        })
    }
}

/// Data-grid state manager for server-paginated rows with pinned rows.
///
/// # Example
///
/// ```
/// use pingrid_lib::column::{ColumnSet, ColumnSpec};
/// use pingrid_lib::grid::{FetchOutcome, Grid, GridIntent};
/// use pingrid_lib::model::{FieldConcat, Row};
/// use pingrid_lib::query::evaluate;
/// use pingrid_lib::Response;
///
/// let columns = ColumnSet::with_controls(vec![ColumnSpec::new("name", 150)], 40)?;
/// let mut grid = Grid::builder(columns, FieldConcat::new(["name"])).build()?;
/// let rows = vec![Row::new().set("name", "a"), Row::new().set("name", "b")];
///
/// let ticket = grid.refresh();
/// let page = evaluate(&rows, ticket.request())?;
/// assert_eq!(grid.complete(&ticket, Ok(Response::new(page))), FetchOutcome::Applied);
///
/// let ticket = grid.apply(GridIntent::ToggleSort { column: "name".into(), multi: false });
/// assert!(ticket.is_some());
/// assert_eq!(grid.view().rows.len(), 2);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Grid {
    columns: ColumnSet,
    identity: Arc<dyn RowIdentity>,
    config: GridConfig,
    state: ViewState,
    pinning: RowPinning,
    page: Page,
    page_loaded: bool,
    cache: CacheStatus,
    status: FetchStatus,
    /// Generation of the last issued ticket.
    generation: u64,
    /// Parameters of the last issued ticket.
    latest: FetchRequest,
    /// Generation of the last applied page.
    applied_generation: u64,
}

impl Grid {
    pub fn builder(columns: ColumnSet, identity: impl RowIdentity + 'static) -> GridBuilder {
        Self::builder_shared(columns, Arc::new(identity))
    }

    /// Like [`builder`](Self::builder) with an already shared resolver.
    pub fn builder_shared(columns: ColumnSet, identity: Arc<dyn RowIdentity>) -> GridBuilder {
        GridBuilder {
            columns,
            identity,
            config: GridConfig::default(),
        }
    }

    pub fn columns(&self) -> &ColumnSet {
        &self.columns
    }

    pub fn identity(&self) -> &dyn RowIdentity {
        self.identity.as_ref()
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn pinning(&self) -> &RowPinning {
        &self.pinning
    }

    /// Last applied page (empty before the first fetch completes).
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Page count of the last applied page, `None` before the first one.
    pub fn page_count(&self) -> Option<usize> {
        self.page_loaded.then(|| self.page.page_count())
    }

    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    pub fn cache_status(&self) -> CacheStatus {
        self.cache
    }

    /// Fetch parameters of the current state.
    pub fn request(&self) -> FetchRequest {
        self.state.request()
    }

    /// Issues a ticket for the current parameters, superseding every earlier
    /// ticket. Used on mount and for retries.
    pub fn refresh(&mut self) -> FetchTicket {
        self.generation += 1;
        self.latest = self.state.request();
        self.status = FetchStatus::Loading;
        log::debug!(
            "issuing fetch generation {} for page {} size {}",
            self.generation,
            self.latest.page_index,
            self.latest.page_size
        );
        FetchTicket {
            generation: self.generation,
            request: self.latest.clone(),
        }
    }

    /// Applies one intent. Returns a ticket when the fetch parameters changed.
    ///
    /// Intents naming unknown columns or rows, or needing a capability the
    /// column lacks, change nothing.
    pub fn apply(&mut self, intent: GridIntent) -> Option<FetchTicket> {
        let before = self.state.request();
        let retry = intent == GridIntent::Retry;

        let changed = self.mutate(intent);
        if changed {
            self.reconcile();
        }

        if retry || self.state.request() != before {
            Some(self.refresh())
        } else {
            None
        }
    }

    /// Hands back the result of a ticket's fetch.
    ///
    /// A page is applied only if the ticket's parameters are the latest ones
    /// and no newer page was applied already.
    pub fn complete(&mut self, ticket: &FetchTicket, result: Result<Response<Page>, GatewayError>) -> FetchOutcome {
        if ticket.request != self.latest || ticket.generation < self.applied_generation {
            log::debug!(
                "discarding stale result of generation {} (latest {})",
                ticket.generation,
                self.generation
            );
            return FetchOutcome::Stale;
        }

        let is_latest = ticket.generation == self.generation;
        match result {
            Ok(response) => {
                let (page, cache) = response.into_parts();
                log::info!(
                    "applied page {} of {} ({} rows, {} total)",
                    ticket.request.page_index.saturating_add(1),
                    page.page_count(),
                    page.len(),
                    page.row_count()
                );
                self.page = page;
                self.page_loaded = true;
                self.cache = cache;
                self.applied_generation = ticket.generation;
                if is_latest {
                    self.status = FetchStatus::Idle;
                }
                self.reconcile();
                FetchOutcome::Applied
            }
            Err(error) => {
                log::warn!("fetch generation {} failed: {}", ticket.generation, error);
                if is_latest {
                    self.status = FetchStatus::Failed(error.to_string());
                }
                FetchOutcome::Failed
            }
        }
    }

    /// Render-ready snapshot of the current state.
    pub fn view(&self) -> GridView {
        GridView::build(self)
    }

    fn mutate(&mut self, intent: GridIntent) -> bool {
        let state = &mut self.state;
        let page_count = self.page_loaded.then(|| self.page.page_count());

        match intent {
            GridIntent::ToggleSort { column, multi } => {
                self.columns.get(&column).is_some_and(|c| c.sortable) && state.sorting.toggle(&column, multi)
            }
            GridIntent::SetSort { column, desc, multi } => {
                self.columns.get(&column).is_some_and(|c| c.sortable) && state.sorting.set(&column, desc, multi)
            }
            GridIntent::ClearSort { column } => state.sorting.clear(&column),
            GridIntent::ClearSorting => state.sorting.clear_all(),
            GridIntent::SetFilter { column, value } => {
                let changed =
                    self.columns.get(&column).is_some_and(|c| c.filterable) && state.filters.set(&column, value);
                if changed {
                    state.pagination.reset_page_index();
                }
                changed
            }
            GridIntent::ClearFilters => {
                let changed = state.filters.clear();
                if changed {
                    state.pagination.reset_page_index();
                }
                changed
            }
            GridIntent::PinRow { id, position } => {
                self.pinning.pin(&id, position, self.page.rows(), self.identity.as_ref())
            }
            GridIntent::SetRowPinning(pin_set) => {
                let report = self
                    .pinning
                    .set_pin_set(pin_set, self.page.rows(), self.identity.as_ref());
                !report.is_noop()
            }
            GridIntent::ResetRowPinning => self.pinning.reset(),
            GridIntent::ToggleRowSelected { id } => {
                let displayed = displayed_ids(&self.pinning, &self.page, self.identity.as_ref());
                displayed.contains(&id) && state.selection.toggle(&id)
            }
            GridIntent::SetAllPageRowsSelected(selected) => {
                let displayed = displayed_ids(&self.pinning, &self.page, self.identity.as_ref());
                state.selection.toggle_all(&displayed, selected)
            }
            GridIntent::ResetRowSelection => state.selection.clear(),
            GridIntent::ReorderColumn(event) => state.column_order.move_column(&event),
            GridIntent::ResetColumnOrder => state.column_order.reset(&self.columns),
            GridIntent::PinColumn { column, side } => self
                .columns
                .get(&column)
                .is_some_and(|c| state.column_pinning.pin(c, side)),
            GridIntent::ResetColumnPinning => state.column_pinning.reset(),
            GridIntent::ToggleColumnVisibility { column } => self
                .columns
                .get(&column)
                .is_some_and(|c| state.column_visibility.toggle(c)),
            GridIntent::SetAllColumnsVisible(visible) => state.column_visibility.set_all(&self.columns, visible),
            GridIntent::ResizeColumn { column, width } => self
                .columns
                .get(&column)
                .is_some_and(|c| state.column_sizing.resize(c, width)),
            GridIntent::ResetColumnSize { column } => state.column_sizing.reset(&column),
            GridIntent::SetPageIndex(index) => state.pagination.set_page_index(index, page_count),
            GridIntent::FirstPage => state.pagination.first_page(),
            GridIntent::PreviousPage => state.pagination.previous_page(),
            GridIntent::NextPage => state.pagination.next_page(page_count),
            GridIntent::LastPage => page_count.is_some_and(|count| state.pagination.last_page(count)),
            GridIntent::SetPageSize(size) => state.pagination.set_page_size(size),
            GridIntent::Retry => false,
        }
    }

    fn reconcile(&mut self) {
        self.pinning.sync(self.page.rows(), self.identity.as_ref());
        debug_assert_eq!(self.pinning.valid_ids(), *self.pinning.pin_set());
    }
}

fn displayed_ids(pinning: &RowPinning, page: &Page, identity: &dyn RowIdentity) -> Vec<RowId> {
    pinning.merge(page.rows(), identity).into_iter().map(|m| m.id).collect()
}
