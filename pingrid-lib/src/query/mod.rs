//! The fetch contract shared by the grid and every data gateway.
//!
//! - [`FetchRequest`] - page index/size, sort keys and column filters
//! - [`Page`] - a page of rows with the total row and page counts
//! - [`ColumnFilter`] / [`SortKey`] - filter and sort semantics
//! - [`evaluate`] - reference implementation over an in-memory dataset

mod evaluate;
mod filter;
mod page;
mod request;
mod sort;

pub use evaluate::evaluate;
pub use filter::ColumnFilter;
pub use filter::row_matches;
pub use page::Page;
pub use request::DEFAULT_PAGE_SIZE;
pub use request::FetchRequest;
pub use sort::SortDirection;
pub use sort::SortKey;
pub use sort::compare_rows;
pub use sort::compare_values;
pub use sort::locale_compare;
