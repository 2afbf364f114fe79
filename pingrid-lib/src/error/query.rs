//! Query error types

/// Errors raised when a fetch request cannot be evaluated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// Page size must be at least one row.
    #[error("Invalid page size: {0} (must be greater than zero)")]
    InvalidPageSize(usize),
}
