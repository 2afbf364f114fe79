//! Column filter state.

use crate::model::Value;
use crate::query::ColumnFilter;

/// At most one filter per column. Blank values are never stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnFilters {
    filters: Vec<ColumnFilter>,
}

impl ColumnFilters {
    pub fn filters(&self) -> &[ColumnFilter] {
        &self.filters
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Filter value of `column`, if any.
    pub fn value(&self, column: &str) -> Option<&Value> {
        self.filters.iter().find(|f| f.id == column).map(|f| &f.value)
    }

    /// Replaces the filter of `column`; a blank value removes it.
    pub fn set(&mut self, column: &str, value: Value) -> bool {
        if value.is_blank() {
            let before = self.filters.len();
            self.filters.retain(|f| f.id != column);
            return self.filters.len() != before;
        }

        match self.filters.iter_mut().find(|f| f.id == column) {
            Some(existing) if existing.value == value => false,
            Some(existing) => {
                existing.value = value;
                true
            }
            None => {
                self.filters.push(ColumnFilter::new(column, value));
                true
            }
        }
    }

    pub fn clear(&mut self) -> bool {
        if self.filters.is_empty() {
            return false;
        }
        self.filters.clear();
        true
    }
}
