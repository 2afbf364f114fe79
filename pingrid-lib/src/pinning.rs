//! Row pinning and reconciliation with server pages
//!
//! Pinned rows must stay on screen after they scroll off the fetched page, but
//! the page is all the grid ever receives from the gateway. [`RowPinning`]
//! therefore keeps two things in lockstep:
//!
//! - a [`PinSet`]: the ids the user pinned, in pin order;
//! - a [`PinnedRowStore`]: a copy of each pinned row, captured while the row
//!   was visible.
//!
//! Per pin slot an id is *unresolved* until its row is found on the current
//! page or in the store, *resolved* once the store holds its data, and
//! *removed* when it is unpinned. An id that cannot be resolved is dropped
//! from the pin set, so a row is never pinned without data.

use std::collections::HashMap;
use std::collections::HashSet;

use serde::Deserialize;
use serde::Serialize;

use crate::model::Row;
use crate::model::RowId;
use crate::model::RowIdentity;

/// Edge a row is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowPinPosition {
    Top,
    Bottom,
}

impl RowPinPosition {
    pub const ALL: [RowPinPosition; 2] = [RowPinPosition::Top, RowPinPosition::Bottom];
}

/// Pinned row ids, `{ "top": [...], "bottom": [...] }` on the wire.
///
/// An id appears in at most one list and at most once in it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinSet {
    #[serde(default)]
    pub top: Vec<RowId>,
    #[serde(default)]
    pub bottom: Vec<RowId>,
}

impl PinSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_empty() && self.bottom.is_empty()
    }

    pub fn len(&self) -> usize {
        self.top.len() + self.bottom.len()
    }

    pub fn ids(&self, position: RowPinPosition) -> &[RowId] {
        match position {
            RowPinPosition::Top => &self.top,
            RowPinPosition::Bottom => &self.bottom,
        }
    }

    pub fn contains(&self, id: &RowId) -> bool {
        self.position(id).is_some()
    }

    pub fn position(&self, id: &RowId) -> Option<RowPinPosition> {
        RowPinPosition::ALL
            .into_iter()
            .find(|&position| self.ids(position).contains(id))
    }

    /// Index of `id` within its pin list.
    pub fn index(&self, id: &RowId) -> Option<usize> {
        let position = self.position(id)?;
        self.ids(position).iter().position(|pinned| pinned == id)
    }

    /// The pin set after pinning `id` to `position` (or unpinning it with
    /// `None`). The id is removed from both lists and appended to the new one.
    pub fn with(&self, id: &RowId, position: Option<RowPinPosition>) -> PinSet {
        let mut next = self.clone();
        next.top.retain(|pinned| pinned != id);
        next.bottom.retain(|pinned| pinned != id);
        match position {
            Some(RowPinPosition::Top) => next.top.push(id.clone()),
            Some(RowPinPosition::Bottom) => next.bottom.push(id.clone()),
            None => {}
        }
        next
    }

    /// A copy where every id occurs once, in the last list and slot it was
    /// given.
    pub fn normalized(&self) -> PinSet {
        let mut next = PinSet::new();
        for position in RowPinPosition::ALL {
            for id in self.ids(position) {
                next = next.with(id, Some(position));
            }
        }
        next
    }

    /// Iterates `(position, id)` pairs, top list first.
    pub fn iter(&self) -> impl Iterator<Item = (RowPinPosition, &RowId)> {
        self.top
            .iter()
            .map(|id| (RowPinPosition::Top, id))
            .chain(self.bottom.iter().map(|id| (RowPinPosition::Bottom, id)))
    }
}

/// A pinned row and its id.
#[derive(Debug, Clone, PartialEq)]
pub struct PinnedRow {
    pub id: RowId,
    pub row: Row,
}

/// Row data of the resolved pins, in pin order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PinnedRowStore {
    top: Vec<PinnedRow>,
    bottom: Vec<PinnedRow>,
}

impl PinnedRowStore {
    pub fn rows(&self, position: RowPinPosition) -> &[PinnedRow] {
        match position {
            RowPinPosition::Top => &self.top,
            RowPinPosition::Bottom => &self.bottom,
        }
    }

    /// Stored row of `id` in the given slot.
    pub fn find(&self, position: RowPinPosition, id: &RowId) -> Option<&PinnedRow> {
        self.rows(position).iter().find(|pinned| pinned.id == *id)
    }

    /// Stored row of `id` in either slot.
    pub fn get(&self, id: &RowId) -> Option<&PinnedRow> {
        self.iter().map(|(_, pinned)| pinned).find(|pinned| pinned.id == *id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (RowPinPosition, &PinnedRow)> {
        self.top
            .iter()
            .map(|p| (RowPinPosition::Top, p))
            .chain(self.bottom.iter().map(|p| (RowPinPosition::Bottom, p)))
    }

    pub fn len(&self) -> usize {
        self.top.len() + self.bottom.len()
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_empty() && self.bottom.is_empty()
    }

    fn push(&mut self, position: RowPinPosition, pinned: PinnedRow) {
        match position {
            RowPinPosition::Top => self.top.push(pinned),
            RowPinPosition::Bottom => self.bottom.push(pinned),
        }
    }
}

/// What one [`RowPinning::sync`] pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Ids whose row was captured into a slot during this pass.
    pub resolved: Vec<RowId>,
    /// Ids whose stored row was released because they left that slot.
    pub pruned: Vec<RowId>,
    /// Ids removed from the pin set because no row data exists for them.
    pub dropped: Vec<RowId>,
}

impl SyncReport {
    /// `true` if the pass changed nothing.
    pub fn is_noop(&self) -> bool {
        self.resolved.is_empty() && self.pruned.is_empty() && self.dropped.is_empty()
    }
}

/// One entry of the rendered row sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedRow {
    pub id: RowId,
    pub row: Row,
    /// Pin slot, `None` for ordinary page rows.
    pub pin: Option<RowPinPosition>,
    /// Index within the pin slot.
    pub pinned_index: Option<usize>,
}

/// Owner of the pin set and the pinned row store.
///
/// # Example
///
/// ```
/// use pingrid_lib::model::{FieldConcat, Row, RowId};
/// use pingrid_lib::pinning::{RowPinPosition, RowPinning};
///
/// let identity = FieldConcat::new(["name"]);
/// let first_page = vec![Row::new().set("name", "a"), Row::new().set("name", "b")];
/// let second_page = vec![Row::new().set("name", "c")];
///
/// let mut pinning = RowPinning::default();
/// pinning.pin(&RowId::from("a"), Some(RowPinPosition::Top), &first_page, &identity);
///
/// pinning.sync(&second_page, &identity);
/// let merged = pinning.merge(&second_page, &identity);
/// let ids: Vec<_> = merged.iter().map(|m| m.id.as_str()).collect();
/// assert_eq!(ids, ["a", "c"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RowPinning {
    pin_set: PinSet,
    store: PinnedRowStore,
}

impl RowPinning {
    pub fn pin_set(&self) -> &PinSet {
        &self.pin_set
    }

    pub fn store(&self) -> &PinnedRowStore {
        &self.store
    }

    /// Pin slot of `id`.
    pub fn position(&self, id: &RowId) -> Option<RowPinPosition> {
        self.pin_set.position(id)
    }

    /// Pins `id` to `position`, or unpins it with `None`.
    ///
    /// The row is looked up on `page_rows` and among the rows already pinned;
    /// pinning an id with no row data anywhere is ignored. Returns `true` if
    /// the pin set changed.
    pub fn pin(
        &mut self,
        id: &RowId,
        position: Option<RowPinPosition>,
        page_rows: &[Row],
        identity: &dyn RowIdentity,
    ) -> bool {
        let next = self.pin_set.with(id, position);
        if next == self.pin_set {
            return false;
        }
        if position.is_some() && !self.is_available(id, page_rows, identity) {
            log::debug!("ignoring pin of row {} with no data", id);
            return false;
        }
        self.pin_set = next;
        self.sync(page_rows, identity);
        true
    }

    /// Replaces the whole pin set, e.g. when restoring a saved layout.
    ///
    /// Ids with no row data on `page_rows` or in the store are dropped.
    pub fn set_pin_set(&mut self, pin_set: PinSet, page_rows: &[Row], identity: &dyn RowIdentity) -> SyncReport {
        self.pin_set = pin_set.normalized();
        self.sync(page_rows, identity)
    }

    /// Reconciles the store with the pin set after the page changed.
    ///
    /// Captures rows for unresolved ids, releases rows of ids that left their
    /// slot and writes back a pin set without unresolvable ids. Afterwards
    /// [`valid_ids`](Self::valid_ids) equals [`pin_set`](Self::pin_set).
    pub fn sync(&mut self, page_rows: &[Row], identity: &dyn RowIdentity) -> SyncReport {
        let mut report = SyncReport::default();

        for (position, pinned) in self.store.iter() {
            if self.pin_set.position(&pinned.id) != Some(position) {
                report.pruned.push(pinned.id.clone());
            }
        }

        // Stored rows win over page rows, so pinned data stays as captured.
        let mut available: HashMap<RowId, &Row> = HashMap::new();
        for row in page_rows {
            available.insert(identity.identify(row), row);
        }
        for (_, pinned) in self.store.iter() {
            available.insert(pinned.id.clone(), &pinned.row);
        }

        let mut store = PinnedRowStore::default();
        let mut valid = PinSet::new();
        for (position, id) in self.pin_set.iter() {
            match available.get(id) {
                Some(row) => {
                    if self.store.find(position, id).is_none() {
                        report.resolved.push(id.clone());
                    }
                    store.push(
                        position,
                        PinnedRow {
                            id: id.clone(),
                            row: (*row).clone(),
                        },
                    );
                    valid = valid.with(id, Some(position));
                }
                None => report.dropped.push(id.clone()),
            }
        }

        self.store = store;
        if !report.dropped.is_empty() {
            log::warn!("dropping {} pinned rows with no data: {:?}", report.dropped.len(), report.dropped);
            self.pin_set = valid;
        }
        if !report.is_noop() {
            log::debug!(
                "pin sync: {} resolved, {} pruned, {} dropped",
                report.resolved.len(),
                report.pruned.len(),
                report.dropped.len()
            );
        }
        report
    }

    /// Pinned ids that have row data, in pin order.
    pub fn valid_ids(&self) -> PinSet {
        let valid = |position: RowPinPosition| -> Vec<RowId> {
            self.pin_set
                .ids(position)
                .iter()
                .filter(|id| self.store.find(position, id).is_some())
                .cloned()
                .collect()
        };
        PinSet {
            top: valid(RowPinPosition::Top),
            bottom: valid(RowPinPosition::Bottom),
        }
    }

    /// Top-pinned rows, then page rows that are not pinned, then
    /// bottom-pinned rows.
    ///
    /// A row id occurs at most once in the result.
    pub fn merge(&self, page_rows: &[Row], identity: &dyn RowIdentity) -> Vec<MergedRow> {
        let pinned_ids: HashSet<&RowId> = self.store.iter().map(|(_, p)| &p.id).collect();
        let mut merged = Vec::with_capacity(page_rows.len() + self.store.len());

        let pinned = move |position: RowPinPosition| {
            self.store
                .rows(position)
                .iter()
                .enumerate()
                .map(move |(index, p)| MergedRow {
                    id: p.id.clone(),
                    row: p.row.clone(),
                    pin: Some(position),
                    pinned_index: Some(index),
                })
        };

        merged.extend(pinned(RowPinPosition::Top));
        let mut seen: HashSet<RowId> = HashSet::new();
        for row in page_rows {
            let id = identity.identify(row);
            if pinned_ids.contains(&id) || !seen.insert(id.clone()) {
                continue;
            }
            merged.push(MergedRow {
                id,
                row: row.clone(),
                pin: None,
                pinned_index: None,
            });
        }
        merged.extend(pinned(RowPinPosition::Bottom));
        merged
    }

    /// Unpins everything. Returns `true` if anything was pinned.
    pub fn reset(&mut self) -> bool {
        let changed = !self.pin_set.is_empty() || !self.store.is_empty();
        self.pin_set = PinSet::new();
        self.store = PinnedRowStore::default();
        changed
    }

    fn is_available(&self, id: &RowId, page_rows: &[Row], identity: &dyn RowIdentity) -> bool {
        self.store.get(id).is_some() || page_rows.iter().any(|row| identity.identify(row) == *id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldConcat;

    fn identity() -> FieldConcat {
        FieldConcat::new(["firstName", "lastName"])
    }

    fn person(first: &str, last: &str, age: i64) -> Row {
        Row::new().set("firstName", first).set("lastName", last).set("age", age)
    }

    fn page_one() -> Vec<Row> {
        vec![person("Ada", "Lovelace", 36), person("Alan", "Turing", 41), person("Grace", "Hopper", 85)]
    }

    fn page_two() -> Vec<Row> {
        vec![person("Edsger", "Dijkstra", 72), person("Barbara", "Liskov", 84)]
    }

    fn ids(merged: &[MergedRow]) -> Vec<&str> {
        merged.iter().map(|m| m.id.as_str()).collect()
    }

    #[test]
    fn test_pin_moves_row_to_top() {
        let mut pinning = RowPinning::default();
        let id = RowId::from("GraceHopper");
        assert!(pinning.pin(&id, Some(RowPinPosition::Top), &page_one(), &identity()));

        let merged = pinning.merge(&page_one(), &identity());
        assert_eq!(ids(&merged), ["GraceHopper", "AdaLovelace", "AlanTuring"]);
        assert_eq!(merged[0].pin, Some(RowPinPosition::Top));
        assert_eq!(merged[0].pinned_index, Some(0));
        assert_eq!(pinning.valid_ids(), *pinning.pin_set());
    }

    #[test]
    fn test_pinned_row_survives_navigation() {
        let mut pinning = RowPinning::default();
        let ada = RowId::from("AdaLovelace");
        pinning.pin(&ada, Some(RowPinPosition::Bottom), &page_one(), &identity());

        let report = pinning.sync(&page_two(), &identity());
        assert!(report.is_noop());

        let merged = pinning.merge(&page_two(), &identity());
        assert_eq!(ids(&merged), ["EdsgerDijkstra", "BarbaraLiskov", "AdaLovelace"]);
        assert_eq!(merged[2].row, person("Ada", "Lovelace", 36));
    }

    #[test]
    fn test_stored_data_wins_over_refetched_row() {
        let mut pinning = RowPinning::default();
        let ada = RowId::from("AdaLovelace");
        pinning.pin(&ada, Some(RowPinPosition::Top), &page_one(), &identity());

        let refetched = vec![person("Ada", "Lovelace", 37)];
        pinning.sync(&refetched, &identity());
        let merged = pinning.merge(&refetched, &identity());
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].row.value("age"), &crate::model::Value::Int(36));
    }

    #[test]
    fn test_move_between_slots_keeps_data_off_page() {
        let mut pinning = RowPinning::default();
        let alan = RowId::from("AlanTuring");
        pinning.pin(&alan, Some(RowPinPosition::Top), &page_one(), &identity());

        assert!(pinning.pin(&alan, Some(RowPinPosition::Bottom), &page_two(), &identity()));
        assert_eq!(pinning.pin_set().bottom, vec![alan.clone()]);
        assert!(pinning.pin_set().top.is_empty());
        assert_eq!(pinning.store().find(RowPinPosition::Bottom, &alan).map(|p| &p.row), Some(&person("Alan", "Turing", 41)));
    }

    #[test]
    fn test_unpin_releases_row() {
        let mut pinning = RowPinning::default();
        let ada = RowId::from("AdaLovelace");
        pinning.pin(&ada, Some(RowPinPosition::Top), &page_one(), &identity());
        assert!(pinning.pin(&ada, None, &page_two(), &identity()));
        assert!(pinning.store().is_empty());
        assert_eq!(ids(&pinning.merge(&page_two(), &identity())), ["EdsgerDijkstra", "BarbaraLiskov"]);
    }

    #[test]
    fn test_unknown_id_is_not_pinned() {
        let mut pinning = RowPinning::default();
        assert!(!pinning.pin(&RowId::from("Nobody"), Some(RowPinPosition::Top), &page_one(), &identity()));
        assert!(pinning.pin_set().is_empty());
    }

    #[test]
    fn test_unresolvable_ids_are_written_back() {
        let mut pinning = RowPinning::default();
        let pin_set = PinSet {
            top: vec![RowId::from("Nobody"), RowId::from("AdaLovelace")],
            bottom: vec![RowId::from("AlanTuring"), RowId::from("AdaLovelace")],
        };

        let report = pinning.set_pin_set(pin_set, &page_one(), &identity());
        assert_eq!(report.dropped, vec![RowId::from("Nobody")]);
        assert_eq!(
            *pinning.pin_set(),
            PinSet {
                top: vec![],
                bottom: vec![RowId::from("AlanTuring"), RowId::from("AdaLovelace")],
            }
        );
        assert_eq!(pinning.valid_ids(), *pinning.pin_set());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut pinning = RowPinning::default();
        pinning.pin(&RowId::from("AdaLovelace"), Some(RowPinPosition::Top), &page_one(), &identity());
        assert!(pinning.reset());
        assert!(pinning.pin_set().is_empty());
        assert!(pinning.store().is_empty());
        assert!(!pinning.reset());
    }
}
