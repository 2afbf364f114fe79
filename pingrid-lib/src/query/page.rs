//! Page type for paginated fetch results.

use serde::Deserialize;
use serde::Serialize;

use crate::model::Row;

/// A page of rows plus the size of the whole filtered result set.
///
/// Serialized as `{ rows, rowCount, pageCount }`.
///
/// # Example
///
/// ```
/// use pingrid_lib::model::Row;
/// use pingrid_lib::query::Page;
///
/// let page = Page::new(vec![Row::new(), Row::new()], 21, 10);
///
/// assert_eq!(page.len(), 2);
/// assert_eq!(page.row_count(), 21);
/// assert_eq!(page.page_count(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    rows: Vec<Row>,
    /// Total rows across every page of the filtered dataset.
    row_count: usize,
    /// `ceil(row_count / page_size)`.
    page_count: usize,
}

impl Page {
    /// Creates a page, deriving the page count from `page_size`.
    pub fn new(rows: Vec<Row>, row_count: usize, page_size: usize) -> Self {
        let page_count = if page_size == 0 { 0 } else { row_count.div_ceil(page_size) };
        Self {
            rows,
            row_count,
            page_count,
        }
    }

    /// Returns a reference to the rows in this page.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Consumes the page and returns the rows.
    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    /// Returns the total row count of the filtered dataset.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Returns the number of pages in the filtered dataset.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Returns `true` if this page has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the number of rows in this page.
    pub fn len(&self) -> usize {
        self.rows.len()
    }
}
