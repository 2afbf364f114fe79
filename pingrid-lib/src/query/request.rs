//! Fetch request sent to a data gateway.

use serde::Deserialize;
use serde::Serialize;

use super::ColumnFilter;
use super::SortKey;
use crate::error::QueryError;

/// Page size assumed when a request omits `pageSize`.
pub const DEFAULT_PAGE_SIZE: usize = 10;

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

/// Parameters of one page fetch.
///
/// Serialized as `{ pageIndex, pageSize, sorting, columnFilters }`. Missing
/// fields default to the first page of ten rows, unsorted and unfiltered.
///
/// # Example
///
/// ```
/// use pingrid_lib::query::{ColumnFilter, FetchRequest, SortKey};
///
/// let request = FetchRequest::new(2, 20)
///     .with_sorting(vec![SortKey::desc("age")])
///     .with_filters(vec![ColumnFilter::new("status", "single")]);
///
/// assert_eq!(request.offset(), 40);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchRequest {
    /// Zero-based page index.
    #[serde(default)]
    pub page_index: usize,
    /// Rows per page, greater than zero.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Multi-column sort, first key highest priority.
    #[serde(default)]
    pub sorting: Vec<SortKey>,
    /// Column filters, all of which must match.
    #[serde(default)]
    pub column_filters: Vec<ColumnFilter>,
}

impl Default for FetchRequest {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE)
    }
}

impl FetchRequest {
    /// Creates an unsorted, unfiltered request.
    pub fn new(page_index: usize, page_size: usize) -> Self {
        Self {
            page_index,
            page_size,
            sorting: Vec::new(),
            column_filters: Vec::new(),
        }
    }

    /// Sets the sort keys.
    pub fn with_sorting(mut self, sorting: Vec<SortKey>) -> Self {
        self.sorting = sorting;
        self
    }

    /// Sets the column filters.
    pub fn with_filters(mut self, column_filters: Vec<ColumnFilter>) -> Self {
        self.column_filters = column_filters;
        self
    }

    /// Index of the first row of the requested page.
    pub fn offset(&self) -> usize {
        self.page_index.saturating_mul(self.page_size)
    }

    /// Rejects requests that cannot be evaluated.
    pub fn validate(&self) -> Result<(), QueryError> {
        if self.page_size == 0 {
            return Err(QueryError::InvalidPageSize(self.page_size));
        }
        Ok(())
    }

    /// Cache key covering every parameter of the request.
    pub fn cache_key(&self) -> String {
        let body = serde_json::to_string(self).unwrap_or_default();
        format!("{}{}", CACHE_KEY_PAGE, body)
    }
}

const CACHE_KEY_PAGE: &str = "page:";
