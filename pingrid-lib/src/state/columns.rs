//! Column order, visibility, pinning and sizing.

use std::collections::HashMap;
use std::collections::HashSet;

use serde::Deserialize;
use serde::Serialize;

use crate::column::ColumnSet;
use crate::column::ColumnSpec;
use crate::reorder;
use crate::reorder::DragEnd;

/// Left-to-right order of every column id.
///
/// Always a permutation of the ids of the [`ColumnSet`] it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnOrder {
    ids: Vec<String>,
}

impl ColumnOrder {
    /// Declaration order of `columns`.
    pub fn new(columns: &ColumnSet) -> Self {
        Self { ids: columns.ids() }
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn index(&self, column: &str) -> Option<usize> {
        self.ids.iter().position(|id| id == column)
    }

    /// Moves `event.active` to the position of `event.over`.
    pub fn move_column(&mut self, event: &DragEnd) -> bool {
        reorder::apply_drag(&mut self.ids, event)
    }

    pub fn reset(&mut self, columns: &ColumnSet) -> bool {
        let ids = columns.ids();
        if ids == self.ids {
            return false;
        }
        self.ids = ids;
        true
    }
}

/// Hidden columns. Columns that cannot be hidden are always visible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnVisibility {
    hidden: HashSet<String>,
}

impl ColumnVisibility {
    pub fn is_visible(&self, column: &str) -> bool {
        !self.hidden.contains(column)
    }

    pub fn is_all_visible(&self) -> bool {
        self.hidden.is_empty()
    }

    pub fn toggle(&mut self, column: &ColumnSpec) -> bool {
        if !column.hideable {
            return false;
        }
        if !self.hidden.remove(&column.id) {
            self.hidden.insert(column.id.clone());
        }
        true
    }

    /// Shows or hides every hideable column.
    pub fn set_all(&mut self, columns: &ColumnSet, visible: bool) -> bool {
        let hidden: HashSet<String> = if visible {
            HashSet::new()
        } else {
            columns
                .iter()
                .filter(|c| c.hideable)
                .map(|c| c.id.clone())
                .collect()
        };
        if hidden == self.hidden {
            return false;
        }
        self.hidden = hidden;
        true
    }

    pub fn reset(&mut self) -> bool {
        let changed = !self.hidden.is_empty();
        self.hidden.clear();
        changed
    }
}

/// Side a column is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnPinSide {
    Left,
    Right,
}

/// Columns pinned to the left and right edges, in pin order.
///
/// The two lists are disjoint; every other column is in the center.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnPinning {
    pub left: Vec<String>,
    pub right: Vec<String>,
}

impl ColumnPinning {
    /// Pins `column` to `side`, or unpins it with `None`.
    ///
    /// The column is removed from both sides and appended to the new one, so
    /// re-pinning moves it to the innermost slot.
    pub fn pin(&mut self, column: &ColumnSpec, side: Option<ColumnPinSide>) -> bool {
        if !column.pinnable {
            return false;
        }
        let before = self.clone();
        self.left.retain(|id| *id != column.id);
        self.right.retain(|id| *id != column.id);
        match side {
            Some(ColumnPinSide::Left) => self.left.push(column.id.clone()),
            Some(ColumnPinSide::Right) => self.right.push(column.id.clone()),
            None => {}
        }
        *self != before
    }

    pub fn side(&self, column: &str) -> Option<ColumnPinSide> {
        if self.left.iter().any(|id| id == column) {
            Some(ColumnPinSide::Left)
        } else if self.right.iter().any(|id| id == column) {
            Some(ColumnPinSide::Right)
        } else {
            None
        }
    }

    /// Position of `column` within its side.
    pub fn index(&self, column: &str) -> Option<usize> {
        self.left
            .iter()
            .position(|id| id == column)
            .or_else(|| self.right.iter().position(|id| id == column))
    }

    pub fn reset(&mut self) -> bool {
        let changed = !self.left.is_empty() || !self.right.is_empty();
        self.left.clear();
        self.right.clear();
        changed
    }
}

/// Per-column width overrides, clamped to a configured range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSizing {
    widths: HashMap<String, u32>,
    default_width: u32,
    min_width: u32,
    max_width: u32,
}

impl ColumnSizing {
    pub fn new(default_width: u32, min_width: u32, max_width: u32) -> Self {
        Self {
            widths: HashMap::new(),
            default_width,
            min_width,
            max_width,
        }
    }

    /// Effective width of `column`: the resized width, else the declared
    /// width, else the default.
    pub fn width(&self, column: &ColumnSpec) -> u32 {
        self.widths
            .get(&column.id)
            .copied()
            .or(column.width)
            .unwrap_or(self.default_width)
    }

    pub fn resize(&mut self, column: &ColumnSpec, width: u32) -> bool {
        if !column.resizable {
            return false;
        }
        let width = width.clamp(self.min_width, self.max_width);
        if self.width(column) == width {
            return false;
        }
        self.widths.insert(column.id.clone(), width);
        true
    }

    /// Returns `column` to its declared width.
    pub fn reset(&mut self, column: &str) -> bool {
        self.widths.remove(column).is_some()
    }

    pub fn reset_all(&mut self) -> bool {
        let changed = !self.widths.is_empty();
        self.widths.clear();
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> ColumnSet {
        ColumnSet::with_controls(
            vec![
                ColumnSpec::new("firstName", 150),
                ColumnSpec::new("lastName", 150).no_hide(),
                ColumnSpec::new("age", 80).fixed_width(),
                ColumnSpec::auto("visits"),
            ],
            40,
        )
        .unwrap()
    }

    #[test]
    fn test_order_move_and_reset() {
        let columns = columns();
        let mut order = ColumnOrder::new(&columns);
        assert_eq!(order.ids(), ["pin", "select-col", "firstName", "lastName", "age", "visits"]);

        assert!(order.move_column(&DragEnd::new("age", "firstName")));
        assert_eq!(order.ids(), ["pin", "select-col", "age", "firstName", "lastName", "visits"]);
        assert!(!order.move_column(&DragEnd::cancelled("age")));

        assert!(order.reset(&columns));
        assert_eq!(order.index("age"), Some(4));
    }

    #[test]
    fn test_visibility_skips_fixed_columns() {
        let columns = columns();
        let mut visibility = ColumnVisibility::default();

        assert!(!visibility.toggle(columns.get("lastName").unwrap()));
        assert!(!visibility.toggle(columns.get("pin").unwrap()));
        assert!(visibility.toggle(columns.get("age").unwrap()));
        assert!(!visibility.is_visible("age"));

        assert!(visibility.set_all(&columns, false));
        assert!(!visibility.is_visible("firstName"));
        assert!(visibility.is_visible("lastName"));
        assert!(visibility.is_visible("select-col"));

        assert!(visibility.set_all(&columns, true));
        assert!(visibility.is_all_visible());
    }

    #[test]
    fn test_pinning_moves_between_sides() {
        let columns = columns();
        let mut pinning = ColumnPinning::default();
        let first = columns.get("firstName").unwrap();
        let age = columns.get("age").unwrap();

        assert!(pinning.pin(first, Some(ColumnPinSide::Left)));
        assert!(pinning.pin(age, Some(ColumnPinSide::Left)));
        assert!(!pinning.pin(age, Some(ColumnPinSide::Left)));
        assert_eq!(pinning.index("age"), Some(1));

        assert!(pinning.pin(first, Some(ColumnPinSide::Right)));
        assert_eq!(pinning.left, ["age"]);
        assert_eq!(pinning.right, ["firstName"]);
        assert_eq!(pinning.side("firstName"), Some(ColumnPinSide::Right));

        assert!(!pinning.pin(columns.get("pin").unwrap(), Some(ColumnPinSide::Left)));
        assert!(pinning.pin(first, None));
        assert_eq!(pinning.side("firstName"), None);
    }

    #[test]
    fn test_sizing_clamps() {
        let columns = columns();
        let mut sizing = ColumnSizing::new(150, 20, 2000);
        let first = columns.get("firstName").unwrap();

        assert!(sizing.resize(first, 5));
        assert_eq!(sizing.width(first), 20);
        assert!(sizing.resize(first, 9000));
        assert_eq!(sizing.width(first), 2000);
        assert!(!sizing.resize(columns.get("age").unwrap(), 300));

        assert!(sizing.reset("firstName"));
        assert_eq!(sizing.width(first), 150);
    }

    #[test]
    fn test_undeclared_width_uses_default() {
        let columns = columns();
        let mut sizing = ColumnSizing::new(90, 20, 2000);
        let visits = columns.get("visits").unwrap();

        assert_eq!(sizing.width(visits), 90);
        assert_eq!(sizing.width(columns.get("age").unwrap()), 80);
        assert!(!sizing.resize(visits, 90));
        assert!(sizing.resize(visits, 120));
        assert_eq!(sizing.width(visits), 120);
        assert!(sizing.reset("visits"));
        assert_eq!(sizing.width(visits), 90);
    }
}
