//! View state slices
//!
//! Each slice owns one concern and exposes its own mutation methods, all of
//! which report whether anything changed. [`ViewState`] only groups them;
//! cross-slice rules (a filter change resets the page index, pins are
//! reconciled after every write) live in [`Grid`](crate::grid::Grid).

mod columns;
mod filters;
mod pagination;
mod selection;
mod sorting;

pub use columns::*;
pub use filters::*;
pub use pagination::*;
pub use selection::*;
pub use sorting::*;

use crate::column::ColumnSet;
use crate::config::GridConfig;
use crate::query::FetchRequest;

/// Every view-state slice of one grid, except row pinning.
#[derive(Debug, Clone)]
pub struct ViewState {
    pub pagination: Pagination,
    pub sorting: Sorting,
    pub filters: ColumnFilters,
    pub selection: RowSelection,
    pub column_order: ColumnOrder,
    pub column_visibility: ColumnVisibility,
    pub column_pinning: ColumnPinning,
    pub column_sizing: ColumnSizing,
}

impl ViewState {
    /// Initial state for `columns`: first page, unsorted, unfiltered, nothing
    /// selected, declaration order, everything visible and unpinned.
    pub fn new(columns: &ColumnSet, config: &GridConfig) -> Self {
        Self {
            pagination: Pagination::new(config.page_size),
            sorting: Sorting::default(),
            filters: ColumnFilters::default(),
            selection: RowSelection::new(config.selection_mode),
            column_order: ColumnOrder::new(columns),
            column_visibility: ColumnVisibility::default(),
            column_pinning: ColumnPinning::default(),
            column_sizing: ColumnSizing::new(
                config.default_column_width,
                config.min_column_width,
                config.max_column_width,
            ),
        }
    }

    /// Fetch parameters described by the current state.
    pub fn request(&self) -> FetchRequest {
        FetchRequest::new(self.pagination.page_index, self.pagination.page_size)
            .with_sorting(self.sorting.keys().to_vec())
            .with_filters(self.filters.filters().to_vec())
    }
}
