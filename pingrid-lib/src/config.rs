//! Grid configuration

use crate::cache::CacheConfig;
use crate::column::DEFAULT_COLUMN_WIDTH;
use crate::error::ConfigError;
use crate::query::DEFAULT_PAGE_SIZE;
use crate::state::SelectionMode;

/// Page sizes offered by the page-size selector.
pub const DEFAULT_PAGE_SIZE_OPTIONS: [usize; 5] = [10, 20, 30, 40, 50];

/// Smallest width a column can be resized to.
pub const DEFAULT_MIN_COLUMN_WIDTH: u32 = 20;

/// Largest width a column can be resized to.
pub const DEFAULT_MAX_COLUMN_WIDTH: u32 = 2000;

/// Configuration for a [`Grid`](crate::grid::Grid).
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use pingrid_lib::cache::CacheConfig;
/// use pingrid_lib::config::GridConfig;
///
/// let config = GridConfig::default()
///     .with_page_size(20)
///     .with_cache(CacheConfig::default().with_page_ttl(Duration::from_secs(5)));
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.page_size, 20);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridConfig {
    /// Rows per page on mount.
    ///
    /// Default: 10
    pub page_size: usize,

    /// Page sizes a user can pick from.
    ///
    /// Default: 10, 20, 30, 40, 50
    pub page_size_options: Vec<usize>,

    /// Width of columns declared with [`ColumnSpec::auto`](crate::column::ColumnSpec::auto).
    ///
    /// Default: 150
    pub default_column_width: u32,

    /// Lower resize bound.
    ///
    /// Default: 20
    pub min_column_width: u32,

    /// Upper resize bound.
    ///
    /// Default: 2000
    pub max_column_width: u32,

    /// How many rows can be selected at once.
    ///
    /// Default: multi
    pub selection_mode: SelectionMode,

    /// Page cache settings for gateways built from this configuration.
    pub cache: CacheConfig,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
            default_column_width: DEFAULT_COLUMN_WIDTH,
            min_column_width: DEFAULT_MIN_COLUMN_WIDTH,
            max_column_width: DEFAULT_MAX_COLUMN_WIDTH,
            selection_mode: SelectionMode::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl GridConfig {
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_page_size_options(mut self, options: Vec<usize>) -> Self {
        self.page_size_options = options;
        self
    }

    pub fn with_default_column_width(mut self, width: u32) -> Self {
        self.default_column_width = width;
        self
    }

    /// Set the resize bounds.
    pub fn with_width_range(mut self, min: u32, max: u32) -> Self {
        self.min_column_width = min;
        self.max_column_width = max;
        self
    }

    pub fn with_selection_mode(mut self, mode: SelectionMode) -> Self {
        self.selection_mode = mode;
        self
    }

    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.cache = cache;
        self
    }

    /// Checks the configuration for values a grid cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::InvalidPageSize(self.page_size));
        }
        if let Some(&size) = self.page_size_options.iter().find(|&&s| s == 0) {
            return Err(ConfigError::InvalidPageSize(size));
        }
        if self.min_column_width == 0 || self.min_column_width > self.max_column_width {
            return Err(ConfigError::InvalidWidthRange {
                min: self.min_column_width,
                max: self.max_column_width,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GridConfig::default();
        assert_eq!(config.page_size, 10);
        assert_eq!(config.page_size_options, vec![10, 20, 30, 40, 50]);
        assert_eq!(config.default_column_width, 150);
        assert_eq!((config.min_column_width, config.max_column_width), (20, 2000));
        assert_eq!(config.selection_mode, SelectionMode::Multi);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let err = GridConfig::default().with_page_size(0).validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPageSize(0)));

        let err = GridConfig::default()
            .with_page_size_options(vec![10, 0])
            .validate()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPageSize(0)));

        let err = GridConfig::default().with_width_range(300, 100).validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidWidthRange { min: 300, max: 100 }));
    }
}
