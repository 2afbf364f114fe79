//! Column definitions.

use std::collections::HashSet;

use crate::error::ConfigError;

/// Id of the structural row-pinning control column.
pub const PIN_CONTROL_ID: &str = "pin";

/// Id of the structural row-selection control column.
pub const SELECT_CONTROL_ID: &str = "select-col";

/// Default width for columns built without an explicit width.
pub const DEFAULT_COLUMN_WIDTH: u32 = 150;

/// Column configuration.
///
/// Capabilities are fixed per table instance; intents that need a capability
/// the column lacks are ignored.
///
/// # Examples
///
/// ```
/// use pingrid_lib::column::ColumnSpec;
///
/// let columns = vec![
///     ColumnSpec::new("firstName", 160).header("First Name").no_sort(),
///     ColumnSpec::new("age", 160).header("Age"),
/// ];
/// assert!(!columns[0].sortable);
/// assert!(columns[1].filterable);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Column id, also the row field it reads.
    pub id: String,
    /// Header text.
    pub header: String,
    /// Whether the column can be sorted.
    pub sortable: bool,
    /// Whether the column can be filtered.
    pub filterable: bool,
    /// Whether the column can be pinned left/right.
    pub pinnable: bool,
    /// Whether the column can be hidden.
    pub hideable: bool,
    /// Whether the column can be resized.
    pub resizable: bool,
    /// Initial width in pixels; `None` takes the grid's default column width.
    pub width: Option<u32>,
}

impl ColumnSpec {
    /// Create a data column with every capability enabled.
    pub fn new(id: impl Into<String>, width: u32) -> Self {
        Self::auto(id).width(width)
    }

    /// Like [`new`](Self::new), sized by
    /// [`GridConfig::default_column_width`](crate::config::GridConfig::default_column_width).
    pub fn auto(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            header: id.clone(),
            id,
            sortable: true,
            filterable: true,
            pinnable: true,
            hideable: true,
            resizable: true,
            width: None,
        }
    }

    /// The structural row-pinning control column.
    pub fn pin_control(width: u32) -> Self {
        Self::structural(PIN_CONTROL_ID, "Pin", width)
    }

    /// The structural row-selection control column.
    pub fn select_control(width: u32) -> Self {
        Self::structural(SELECT_CONTROL_ID, "", width)
    }

    fn structural(id: &str, header: &str, width: u32) -> Self {
        Self {
            id: id.to_string(),
            header: header.to_string(),
            sortable: false,
            filterable: false,
            pinnable: false,
            hideable: false,
            resizable: true,
            width: Some(width),
        }
    }

    /// Set the header text.
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    /// Set the initial width.
    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    /// Disable sorting.
    pub fn no_sort(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Disable filtering.
    pub fn no_filter(mut self) -> Self {
        self.filterable = false;
        self
    }

    /// Disable column pinning.
    pub fn no_pin(mut self) -> Self {
        self.pinnable = false;
        self
    }

    /// Disable hiding.
    pub fn no_hide(mut self) -> Self {
        self.hideable = false;
        self
    }

    /// Disable resizing.
    pub fn fixed_width(mut self) -> Self {
        self.resizable = false;
        self
    }

    /// Returns `true` for the pin and select control columns.
    pub fn is_structural(&self) -> bool {
        self.id == PIN_CONTROL_ID || self.id == SELECT_CONTROL_ID
    }
}

/// The fixed set of columns of one table instance.
///
/// Ids are unique; the declaration order is the default column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSet {
    columns: Vec<ColumnSpec>,
}

impl ColumnSet {
    /// Validate and wrap a list of column specs.
    pub fn new(columns: Vec<ColumnSpec>) -> Result<Self, ConfigError> {
        if columns.is_empty() {
            return Err(ConfigError::NoColumns);
        }
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.id.as_str()) {
                return Err(ConfigError::duplicate_column(&column.id));
            }
        }
        Ok(Self { columns })
    }

    /// Build a set led by the pin and select control columns.
    pub fn with_controls(data_columns: Vec<ColumnSpec>, control_width: u32) -> Result<Self, ConfigError> {
        let mut columns = Vec::with_capacity(data_columns.len() + 2);
        columns.push(ColumnSpec::pin_control(control_width));
        columns.push(ColumnSpec::select_control(control_width));
        columns.extend(data_columns);
        Self::new(columns)
    }

    /// Look up a column by id.
    pub fn get(&self, id: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.id == id)
    }

    /// Returns `true` if a column with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Column ids in declaration order.
    pub fn ids(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.id.clone()).collect()
    }

    /// Iterate over the column specs.
    pub fn iter(&self) -> impl Iterator<Item = &ColumnSpec> {
        self.columns.iter()
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Always `false`; a column set is never empty.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
