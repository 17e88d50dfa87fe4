// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Ordered image store.
//
// The store's order is the final document's page order. All operations are
// synchronous and total: removing an absent id or moving past either
// boundary is a no-op, never an error, so races between UI events cannot
// crash an assembly in flight.

use quire_core::types::{EntryId, ImageEntry, MoveDirection};
use tracing::debug;

/// Ordered collection of image entries with stable identity.
///
/// The only reordering primitive is an adjacent swap (`move_entry`); there
/// is no arbitrary-position insert.
#[derive(Debug, Default)]
pub struct ImageStore {
    entries: Vec<ImageEntry>,
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current entries in page order.
    pub fn entries(&self) -> &[ImageEntry] {
        &self.entries
    }

    /// Insert an entry at the end. Always succeeds; existing order is
    /// untouched.
    pub fn append(&mut self, entry: ImageEntry) {
        // Ids are generated at entry creation and never reused, so a
        // duplicate here means the caller appended the same entry twice.
        debug_assert!(
            !self.entries.iter().any(|e| e.id == entry.id),
            "duplicate entry id in store"
        );
        debug!(id = %entry.id, name = %entry.display_name, "entry appended");
        self.entries.push(entry);
    }

    /// Remove the entry with the given id. Returns `false` (no-op) if the
    /// id is absent.
    pub fn remove(&mut self, id: &EntryId) -> bool {
        let Some(index) = self.position(id) else {
            debug!(%id, "remove: id not in store");
            return false;
        };
        let entry = self.entries.remove(index);
        debug!(id = %entry.id, name = %entry.display_name, "entry removed");
        true
    }

    /// Swap the entry with its immediate neighbour in the given direction.
    ///
    /// Returns `false` (no-op) if the id is absent or the entry is already
    /// at the boundary in that direction.
    pub fn move_entry(&mut self, id: &EntryId, direction: MoveDirection) -> bool {
        let Some(index) = self.position(id) else {
            debug!(%id, "move: id not in store");
            return false;
        };
        let neighbour = match direction {
            MoveDirection::Earlier => index.checked_sub(1),
            MoveDirection::Later => (index + 1 < self.entries.len()).then_some(index + 1),
        };
        let Some(neighbour) = neighbour else {
            debug!(%id, ?direction, index, "move: already at boundary");
            return false;
        };
        self.entries.swap(index, neighbour);
        debug!(%id, from = index, to = neighbour, "entry moved");
        true
    }

    /// Immutable point-in-time copy of the current order.
    ///
    /// An assembly run works from a snapshot so that concurrent appends,
    /// removals, and moves never corrupt or reorder a run already started.
    /// Cheap: image bytes sit behind `Arc`, so only entry metadata is copied.
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            entries: self.entries.clone(),
        }
    }

    fn position(&self, id: &EntryId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == *id)
    }
}

/// Frozen store order for one assembly run.
#[derive(Debug, Clone)]
pub struct StoreSnapshot {
    entries: Vec<ImageEntry>,
}

impl StoreSnapshot {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ImageEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ImageEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_core::types::ImageSource;

    fn entry(name: &str) -> ImageEntry {
        ImageEntry::new(ImageSource::new(name.as_bytes().to_vec()), name)
    }

    fn names(store: &ImageStore) -> Vec<&str> {
        store
            .entries()
            .iter()
            .map(|e| e.display_name.as_str())
            .collect()
    }

    #[test]
    fn append_preserves_existing_order() {
        let mut store = ImageStore::new();
        store.append(entry("a"));
        store.append(entry("b"));
        store.append(entry("c"));
        assert_eq!(names(&store), ["a", "b", "c"]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn remove_absent_id_is_noop() {
        let mut store = ImageStore::new();
        store.append(entry("a"));
        assert!(!store.remove(&EntryId::new()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_keeps_order_of_remaining() {
        let mut store = ImageStore::new();
        store.append(entry("a"));
        let b = entry("b");
        let b_id = b.id;
        store.append(b);
        store.append(entry("c"));

        assert!(store.remove(&b_id));
        assert_eq!(names(&store), ["a", "c"]);
    }

    #[test]
    fn move_earlier_then_later_restores_interior_order() {
        let mut store = ImageStore::new();
        store.append(entry("a"));
        let b = entry("b");
        let b_id = b.id;
        store.append(b);
        store.append(entry("c"));

        assert!(store.move_entry(&b_id, MoveDirection::Earlier));
        assert_eq!(names(&store), ["b", "a", "c"]);
        assert!(store.move_entry(&b_id, MoveDirection::Later));
        assert_eq!(names(&store), ["a", "b", "c"]);
    }

    #[test]
    fn move_past_boundary_is_noop() {
        let mut store = ImageStore::new();
        let a = entry("a");
        let a_id = a.id;
        store.append(a);
        let c = entry("c");
        let c_id = c.id;
        store.append(c);

        assert!(!store.move_entry(&a_id, MoveDirection::Earlier));
        assert!(!store.move_entry(&c_id, MoveDirection::Later));
        assert_eq!(names(&store), ["a", "c"]);
    }

    #[test]
    fn boundary_breaks_the_move_round_trip_at_the_last_position() {
        let mut store = ImageStore::new();
        store.append(entry("a"));
        let b = entry("b");
        let b_id = b.id;
        store.append(b);

        // "b" starts last: Earlier succeeds, the Later that would undo it
        // also succeeds, but starting with Later is a no-op.
        assert!(!store.move_entry(&b_id, MoveDirection::Later));
        assert_eq!(names(&store), ["a", "b"]);
    }

    #[test]
    fn move_absent_id_is_noop() {
        let mut store = ImageStore::new();
        store.append(entry("a"));
        assert!(!store.move_entry(&EntryId::new(), MoveDirection::Later));
    }

    #[test]
    fn snapshot_is_isolated_from_later_mutation() {
        let mut store = ImageStore::new();
        store.append(entry("a"));
        let b = entry("b");
        let b_id = b.id;
        store.append(b);

        let snapshot = store.snapshot();
        store.remove(&b_id);
        store.append(entry("c"));

        let snap_names: Vec<&str> = snapshot
            .iter()
            .map(|e| e.display_name.as_str())
            .collect();
        assert_eq!(snap_names, ["a", "b"]);
        assert_eq!(names(&store), ["a", "c"]);
    }

    #[test]
    fn empty_store_snapshot_is_empty() {
        let store = ImageStore::new();
        assert!(store.snapshot().is_empty());
        assert_eq!(store.snapshot().len(), 0);
    }
}
