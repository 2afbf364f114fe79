//! Row selection keyed by row id.

use std::collections::HashSet;

use crate::model::RowId;

/// Selection mode for grid rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// No selection allowed.
    None,
    /// Single row selection (radio-button style).
    Single,
    /// Multiple rows can be selected (checkbox style).
    #[default]
    Multi,
}

/// Tracks selected rows by their [`RowId`].
///
/// Selection survives pagination, filtering and sorting; ids of rows that are
/// no longer fetched simply stay selected.
#[derive(Debug, Clone, Default)]
pub struct RowSelection {
    mode: SelectionMode,
    selected: HashSet<RowId>,
}

impl RowSelection {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            selected: HashSet::new(),
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Toggle selection for a row. Returns true if selection changed.
    pub fn toggle(&mut self, id: &RowId) -> bool {
        let selected = !self.selected.contains(id);
        self.set(id, selected)
    }

    /// Selects or deselects a row. Returns true if selection changed.
    pub fn set(&mut self, id: &RowId, selected: bool) -> bool {
        match (self.mode, selected) {
            (_, false) => self.selected.remove(id),
            (SelectionMode::None, true) => false,
            (SelectionMode::Single, true) => {
                if self.selected.len() == 1 && self.selected.contains(id) {
                    return false;
                }
                self.selected.clear();
                self.selected.insert(id.clone())
            }
            (SelectionMode::Multi, true) => self.selected.insert(id.clone()),
        }
    }

    /// Selects or deselects every row in `ids` (the "select page" checkbox).
    ///
    /// Only multi-selection can select more than one row at once.
    pub fn toggle_all(&mut self, ids: &[RowId], selected: bool) -> bool {
        if selected && self.mode != SelectionMode::Multi {
            return false;
        }
        let mut changed = false;
        for id in ids {
            changed |= self.set(id, selected);
        }
        changed
    }

    pub fn clear(&mut self) -> bool {
        if self.selected.is_empty() {
            return false;
        }
        self.selected.clear();
        true
    }

    pub fn is_selected(&self, id: &RowId) -> bool {
        self.selected.contains(id)
    }

    /// `true` when `ids` is non-empty and every id is selected.
    pub fn is_all_selected(&self, ids: &[RowId]) -> bool {
        !ids.is_empty() && ids.iter().all(|id| self.selected.contains(id))
    }

    /// `true` when some, but not all, of `ids` are selected.
    pub fn is_some_selected(&self, ids: &[RowId]) -> bool {
        ids.iter().any(|id| self.selected.contains(id)) && !self.is_all_selected(ids)
    }

    pub fn selected(&self) -> impl Iterator<Item = &RowId> {
        self.selected.iter()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}
