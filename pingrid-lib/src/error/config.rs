//! Configuration error types

/// Errors raised while building a grid or its column set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A grid needs at least one column.
    #[error("Column set is empty")]
    NoColumns,

    /// Two columns share the same id.
    #[error("Duplicate column id '{0}'")]
    DuplicateColumn(String),

    /// Page sizes must be greater than zero.
    #[error("Invalid page size: {0}")]
    InvalidPageSize(usize),

    /// Column width bounds are inverted or zero.
    #[error("Invalid column width range: {min}..={max}")]
    InvalidWidthRange {
        /// Minimum column width.
        min: u32,
        /// Maximum column width.
        max: u32,
    },
}

impl ConfigError {
    /// Creates a new duplicate column error.
    pub fn duplicate_column(id: impl Into<String>) -> Self {
        Self::DuplicateColumn(id.into())
    }
}
