//! Multi-column sort state.

use crate::query::SortDirection;
use crate::query::SortKey;

/// Ordered list of sort keys; earlier keys take priority.
///
/// This does not sort anything. The keys are sent to the gateway, which sorts
/// the full dataset before paginating.
///
/// # Example
///
/// ```
/// use pingrid_lib::query::SortDirection;
/// use pingrid_lib::state::Sorting;
///
/// let mut sorting = Sorting::default();
/// sorting.toggle("age", false);
/// sorting.toggle("visits", true);
/// assert_eq!(sorting.index("visits"), Some(1));
///
/// sorting.toggle("age", false);
/// assert_eq!(sorting.direction("age"), Some(SortDirection::Desc));
/// assert_eq!(sorting.keys().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sorting {
    keys: Vec<SortKey>,
}

impl Sorting {
    pub fn new(keys: Vec<SortKey>) -> Self {
        Self { keys }
    }

    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Current direction of `column`, `None` when unsorted.
    pub fn direction(&self, column: &str) -> Option<SortDirection> {
        self.keys.iter().find(|k| k.id == column).map(SortKey::direction)
    }

    /// Priority of `column` among the sort keys.
    pub fn index(&self, column: &str) -> Option<usize> {
        self.keys.iter().position(|k| k.id == column)
    }

    /// Direction a toggle would move `column` to: none, ascending, descending,
    /// then none again.
    pub fn next_direction(&self, column: &str) -> Option<SortDirection> {
        match self.direction(column) {
            None => Some(SortDirection::Asc),
            Some(SortDirection::Asc) => Some(SortDirection::Desc),
            Some(SortDirection::Desc) => None,
        }
    }

    /// Advances `column` through its sort cycle.
    ///
    /// Without `multi` the column replaces every other key.
    pub fn toggle(&mut self, column: &str, multi: bool) -> bool {
        match self.next_direction(column) {
            Some(direction) => self.set(column, direction.is_desc(), multi),
            None if multi => self.clear(column),
            None => self.clear_all(),
        }
    }

    /// Sorts `column` in the given direction.
    ///
    /// With `multi` the key is updated in place or appended; otherwise it
    /// becomes the only key.
    pub fn set(&mut self, column: &str, desc: bool, multi: bool) -> bool {
        let key = SortKey {
            id: column.to_string(),
            desc,
        };

        if !multi {
            if self.keys.len() == 1 && self.keys[0] == key {
                return false;
            }
            self.keys = vec![key];
            return true;
        }

        match self.keys.iter_mut().find(|k| k.id == column) {
            Some(existing) if existing.desc == desc => false,
            Some(existing) => {
                existing.desc = desc;
                true
            }
            None => {
                self.keys.push(key);
                true
            }
        }
    }

    pub fn clear(&mut self, column: &str) -> bool {
        let before = self.keys.len();
        self.keys.retain(|k| k.id != column);
        self.keys.len() != before
    }

    pub fn clear_all(&mut self) -> bool {
        if self.keys.is_empty() {
            return false;
        }
        self.keys.clear();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_cycles_none_asc_desc_none() {
        let mut sorting = Sorting::default();
        assert!(sorting.toggle("age", false));
        assert_eq!(sorting.direction("age"), Some(SortDirection::Asc));
        assert!(sorting.toggle("age", false));
        assert_eq!(sorting.direction("age"), Some(SortDirection::Desc));
        assert!(sorting.toggle("age", false));
        assert!(sorting.is_empty());
    }

    #[test]
    fn test_single_toggle_replaces_other_keys() {
        let mut sorting = Sorting::new(vec![SortKey::asc("age"), SortKey::desc("visits")]);
        sorting.toggle("status", false);
        assert_eq!(sorting.keys(), &[SortKey::asc("status")]);
    }

    #[test]
    fn test_multi_toggle_keeps_priority() {
        let mut sorting = Sorting::default();
        sorting.toggle("age", true);
        sorting.toggle("visits", true);
        sorting.toggle("age", true);
        assert_eq!(sorting.keys(), &[SortKey::desc("age"), SortKey::asc("visits")]);

        sorting.toggle("age", true);
        assert_eq!(sorting.keys(), &[SortKey::asc("visits")]);
        assert_eq!(sorting.index("visits"), Some(0));
    }

    #[test]
    fn test_set_and_clear_report_changes() {
        let mut sorting = Sorting::default();
        assert!(sorting.set("age", true, false));
        assert!(!sorting.set("age", true, false));
        assert!(!sorting.set("age", true, true));
        assert!(!sorting.clear("visits"));
        assert!(sorting.clear("age"));
        assert!(!sorting.clear_all());
    }
}
