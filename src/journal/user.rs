use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entry::Entry;

/// The single per-installation aggregate owning every logged entry.
///
/// Entries keep insertion order, which is not necessarily timestamp order:
/// imports may backfill entries dated earlier than existing ones. A
/// non-persisted id index gives O(1) lookup for removal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    #[serde(default)]
    pub entries: Vec<Entry>,
    #[serde(skip)]
    index: HashMap<Uuid, usize>,
    #[serde(skip)]
    latest_entry: Option<Uuid>,
}

impl User {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            entries: Vec::new(),
            index: HashMap::new(),
            latest_entry: None,
        }
    }

    /// Rebuilds the id index. Must run after deserialization; removal
    /// shifts positions, so it runs there as well.
    pub fn rebuild_index(&mut self) {
        self.index = self
            .entries
            .iter()
            .enumerate()
            .map(|(pos, entry)| (entry.id, pos))
            .collect();
    }

    /// Appends an entry, records it as the session's latest, and returns
    /// its id.
    pub fn push_entry(&mut self, entry: Entry) -> Uuid {
        let id = entry.id;
        self.index.insert(id, self.entries.len());
        self.entries.push(entry);
        self.latest_entry = Some(id);
        id
    }

    /// Removes the entry with `id`, returning it. `None` when no such
    /// entry exists; the store is untouched in that case.
    pub fn remove_entry(&mut self, id: Uuid) -> Option<Entry> {
        let pos = *self.index.get(&id)?;
        let removed = self.entries.remove(pos);
        if self.latest_entry == Some(id) {
            self.latest_entry = None;
        }
        self.rebuild_index();
        Some(removed)
    }

    pub fn entry(&self, id: Uuid) -> Option<&Entry> {
        self.index.get(&id).and_then(|pos| self.entries.get(*pos))
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.index.contains_key(&id)
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Id of the entry added most recently in this session, if it has not
    /// been removed since. Session-local, never persisted.
    pub fn latest_entry_id(&self) -> Option<Uuid> {
        self.latest_entry
    }

    pub fn latest_entry_date(&self) -> Option<NaiveDateTime> {
        self.latest_entry
            .and_then(|id| self.entry(id))
            .map(|entry| entry.timestamp)
    }
}

impl Default for User {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry_at(amount: f64, day: u32) -> Entry {
        let timestamp = NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        Entry::new(amount, Some(timestamp))
    }

    #[test]
    fn push_tracks_latest_and_index() {
        let mut user = User::new();
        let first = user.push_entry(entry_at(8.0, 1));
        let second = user.push_entry(entry_at(17.0, 2));

        assert_eq!(user.entry_count(), 2);
        assert_eq!(user.latest_entry_id(), Some(second));
        assert_eq!(user.entry(first).map(|e| e.amount), Some(8.0));
    }

    #[test]
    fn remove_shifts_index_for_later_entries() {
        let mut user = User::new();
        let first = user.push_entry(entry_at(8.0, 1));
        let second = user.push_entry(entry_at(17.0, 2));
        let third = user.push_entry(entry_at(23.0, 3));

        assert!(user.remove_entry(first).is_some());
        assert_eq!(user.entry(second).map(|e| e.amount), Some(17.0));
        assert_eq!(user.entry(third).map(|e| e.amount), Some(23.0));
        assert_eq!(user.entry_count(), 2);
    }

    #[test]
    fn remove_unknown_id_leaves_store_untouched() {
        let mut user = User::new();
        user.push_entry(entry_at(8.0, 1));

        assert!(user.remove_entry(Uuid::new_v4()).is_none());
        assert_eq!(user.entry_count(), 1);
    }

    #[test]
    fn removing_latest_clears_the_marker() {
        let mut user = User::new();
        let id = user.push_entry(entry_at(8.0, 1));

        assert!(user.latest_entry_date().is_some());
        user.remove_entry(id);
        assert_eq!(user.latest_entry_id(), None);
        assert_eq!(user.latest_entry_date(), None);
    }
}
