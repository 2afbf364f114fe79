//! Drag-and-drop column reordering.
//!
//! Gesture recognition happens elsewhere; the grid only sees the final
//! [`DragEnd`] event naming the dragged column and the column it was dropped
//! on.

use serde::Deserialize;
use serde::Serialize;

/// End of a column drag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragEnd {
    /// Id of the dragged column.
    pub active: String,
    /// Id of the column under the pointer on release, if any.
    pub over: Option<String>,
}

impl DragEnd {
    /// A drop of `active` onto `over`.
    pub fn new(active: impl Into<String>, over: impl Into<String>) -> Self {
        Self {
            active: active.into(),
            over: Some(over.into()),
        }
    }

    /// A drag released outside any column.
    pub fn cancelled(active: impl Into<String>) -> Self {
        Self {
            active: active.into(),
            over: None,
        }
    }
}

/// Moves the element at `from` to `to` in a single splice.
///
/// Every other element keeps its relative order. Out-of-range indices and
/// `from == to` leave the slice untouched and return `false`.
///
/// # Example
///
/// ```
/// use pingrid_lib::reorder::array_move;
///
/// let mut ids = vec!["a", "b", "c", "d"];
/// assert!(array_move(&mut ids, 0, 2));
/// assert_eq!(ids, ["b", "c", "a", "d"]);
/// ```
pub fn array_move<T>(items: &mut [T], from: usize, to: usize) -> bool {
    if from == to || from >= items.len() || to >= items.len() {
        return false;
    }
    if from < to {
        items[from..=to].rotate_left(1);
    } else {
        items[to..=from].rotate_right(1);
    }
    true
}

/// Applies a drag to an ordered list of column ids.
///
/// No-op unless `over` is present, differs from `active`, and both ids are in
/// `order`.
pub fn apply_drag(order: &mut [String], event: &DragEnd) -> bool {
    let Some(over) = event.over.as_deref() else {
        return false;
    };
    if over == event.active {
        return false;
    }
    let from = order.iter().position(|id| *id == event.active);
    let to = order.iter().position(|id| id == over);
    match (from, to) {
        (Some(from), Some(to)) => array_move(order, from, to),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_move_forward_and_backward() {
        let mut ids = order(&["a", "b", "c", "d"]);
        assert!(apply_drag(&mut ids, &DragEnd::new("a", "c")));
        assert_eq!(ids, order(&["b", "c", "a", "d"]));

        assert!(apply_drag(&mut ids, &DragEnd::new("d", "b")));
        assert_eq!(ids, order(&["d", "b", "c", "a"]));
    }

    #[test]
    fn test_noop_drags() {
        let mut ids = order(&["a", "b", "c"]);
        assert!(!apply_drag(&mut ids, &DragEnd::cancelled("a")));
        assert!(!apply_drag(&mut ids, &DragEnd::new("a", "a")));
        assert!(!apply_drag(&mut ids, &DragEnd::new("a", "zzz")));
        assert!(!apply_drag(&mut ids, &DragEnd::new("zzz", "a")));
        assert_eq!(ids, order(&["a", "b", "c"]));
    }

    #[test]
    fn test_array_move_bounds() {
        let mut items = [1, 2, 3];
        assert!(!array_move(&mut items, 0, 3));
        assert!(!array_move(&mut items, 1, 1));
        assert!(array_move(&mut items, 2, 0));
        assert_eq!(items, [3, 1, 2]);
    }
}
