//! Render-ready snapshot of a grid
//!
//! [`GridView`] is everything a renderer needs and nothing more: rows in
//! display order with their pin state, columns in display order with their
//! geometry, and pagination info. It is a plain value, so it can be sent
//! across tasks and compared in tests.

use crate::CacheStatus;
use crate::grid::Grid;
use crate::model::Row;
use crate::model::RowId;
use crate::model::Value;
use crate::pinning::PinSet;
use crate::pinning::RowPinPosition;
use crate::query::SortDirection;
use crate::state::ColumnPinSide;

/// Progress of the most recent fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FetchStatus {
    /// No fetch in flight.
    #[default]
    Idle,
    /// A fetch for the current parameters is in flight; the previous page is
    /// still shown.
    Loading,
    /// The last fetch failed; the previous page is still shown.
    Failed(String),
}

impl FetchStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// A row as displayed.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedRow {
    pub id: RowId,
    pub row: Row,
    pub pin: Option<RowPinPosition>,
    /// Index within the pin slot, for pinned rows.
    pub pinned_index: Option<usize>,
    pub selected: bool,
}

impl RenderedRow {
    /// Cell value of `column`; null when the row lacks the field.
    pub fn value(&self, column: &str) -> &Value {
        self.row.value(column)
    }

    pub fn is_pinned(&self) -> bool {
        self.pin.is_some()
    }
}

/// A column as displayed.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnView {
    pub id: String,
    pub header: String,
    /// Position in the column order.
    pub order_index: usize,
    pub pin: Option<ColumnPinSide>,
    /// Position within the pin side.
    pub pin_index: Option<usize>,
    /// Left offset of a left-pinned column: widths of the visible left-pinned
    /// columns before it.
    pub start: Option<u32>,
    /// Right offset of a right-pinned column: widths of the visible
    /// right-pinned columns after it.
    pub after: Option<u32>,
    pub visible: bool,
    pub width: u32,
    pub sort: Option<SortDirection>,
    /// Priority among the sort keys.
    pub sort_index: Option<usize>,
    /// Direction the next sort toggle moves to; `None` clears the sort.
    pub next_sort: Option<SortDirection>,
    pub filter: Option<Value>,
    pub sortable: bool,
    pub filterable: bool,
    pub pinnable: bool,
    pub hideable: bool,
    pub resizable: bool,
}

impl ColumnView {
    /// Last column of the left-pinned group (draws the pin shadow).
    pub fn is_last_left_pinned(&self, view: &GridView) -> bool {
        self.pin == Some(ColumnPinSide::Left)
            && view
                .visible_columns()
                .filter(|c| c.pin == Some(ColumnPinSide::Left))
                .last()
                .is_some_and(|c| c.id == self.id)
    }

    /// First column of the right-pinned group.
    pub fn is_first_right_pinned(&self, view: &GridView) -> bool {
        self.pin == Some(ColumnPinSide::Right)
            && view
                .visible_columns()
                .find(|c| c.pin == Some(ColumnPinSide::Right))
                .is_some_and(|c| c.id == self.id)
    }
}

/// Pagination footer data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInfo {
    pub page_index: usize,
    pub page_size: usize,
    pub page_count: usize,
    /// Rows matching the filters on the server.
    pub row_count: usize,
    pub can_previous: bool,
    pub can_next: bool,
    /// Rows displayed, pinned rows included.
    pub showing: usize,
    pub page_size_options: Vec<usize>,
}

/// Snapshot of a grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridView {
    pub rows: Vec<RenderedRow>,
    /// Every column in display order: left pinned, center, right pinned.
    /// Hidden columns are included with `visible == false`.
    pub columns: Vec<ColumnView>,
    pub pagination: PageInfo,
    pub status: FetchStatus,
    pub cache: CacheStatus,
    /// Pinned row ids with data.
    pub pin_set: PinSet,
    pub all_page_rows_selected: bool,
    pub some_page_rows_selected: bool,
    /// Sum of the visible column widths.
    pub total_width: u32,
}

impl GridView {
    pub(crate) fn build(grid: &Grid) -> Self {
        let state = grid.state();
        let merged = grid.pinning().merge(grid.page().rows(), grid.identity());
        let row_ids: Vec<RowId> = merged.iter().map(|m| m.id.clone()).collect();

        let rows = merged
            .into_iter()
            .map(|m| RenderedRow {
                selected: state.selection.is_selected(&m.id),
                id: m.id,
                row: m.row,
                pin: m.pin,
                pinned_index: m.pinned_index,
            })
            .collect::<Vec<_>>();

        let columns = build_columns(grid);
        let total_width = columns.iter().filter(|c| c.visible).map(|c| c.width).sum();

        let page_count = grid.page_count();
        let pagination = PageInfo {
            page_index: state.pagination.page_index,
            page_size: state.pagination.page_size,
            page_count: page_count.unwrap_or(0),
            row_count: grid.page().row_count(),
            can_previous: state.pagination.can_previous_page(),
            can_next: state.pagination.can_next_page(page_count),
            showing: rows.len(),
            page_size_options: grid.config().page_size_options.clone(),
        };

        Self {
            rows,
            columns,
            pagination,
            status: grid.status().clone(),
            cache: grid.cache_status(),
            pin_set: grid.pinning().valid_ids(),
            all_page_rows_selected: state.selection.is_all_selected(&row_ids),
            some_page_rows_selected: state.selection.is_some_selected(&row_ids),
            total_width,
        }
    }

    /// Visible columns in display order.
    pub fn visible_columns(&self) -> impl Iterator<Item = &ColumnView> {
        self.columns.iter().filter(|c| c.visible)
    }

    pub fn column(&self, id: &str) -> Option<&ColumnView> {
        self.columns.iter().find(|c| c.id == id)
    }

    pub fn row(&self, id: &RowId) -> Option<&RenderedRow> {
        self.rows.iter().find(|r| r.id == *id)
    }

    pub fn row_ids(&self) -> Vec<&RowId> {
        self.rows.iter().map(|r| &r.id).collect()
    }
}

fn build_columns(grid: &Grid) -> Vec<ColumnView> {
    let state = grid.state();
    let pinning = &state.column_pinning;

    let ordered = pinning
        .left
        .iter()
        .chain(
            state
                .column_order
                .ids()
                .iter()
                .filter(|id| pinning.side(id).is_none()),
        )
        .chain(pinning.right.iter());

    let mut columns: Vec<ColumnView> = ordered
        .filter_map(|id| grid.columns().get(id))
        .map(|spec| {
            let sort = state.sorting.direction(&spec.id);
            ColumnView {
                id: spec.id.clone(),
                header: spec.header.clone(),
                order_index: state.column_order.index(&spec.id).unwrap_or_default(),
                pin: pinning.side(&spec.id),
                pin_index: pinning.index(&spec.id),
                start: None,
                after: None,
                visible: state.column_visibility.is_visible(&spec.id),
                width: state.column_sizing.width(spec),
                sort,
                sort_index: state.sorting.index(&spec.id),
                next_sort: if spec.sortable {
                    state.sorting.next_direction(&spec.id)
                } else {
                    None
                },
                filter: state.filters.value(&spec.id).cloned(),
                sortable: spec.sortable,
                filterable: spec.filterable,
                pinnable: spec.pinnable,
                hideable: spec.hideable,
                resizable: spec.resizable,
            }
        })
        .collect();

    let mut offset = 0;
    for column in columns.iter_mut().filter(|c| c.pin == Some(ColumnPinSide::Left)) {
        column.start = Some(offset);
        if column.visible {
            offset += column.width;
        }
    }

    let mut offset = 0;
    for column in columns.iter_mut().rev().filter(|c| c.pin == Some(ColumnPinSide::Right)) {
        column.after = Some(offset);
        if column.visible {
            offset += column.width;
        }
    }

    columns
}
