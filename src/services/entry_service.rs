//! Business logic helpers for logging and removing entries.

use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::errors::WaterlogError;
use crate::journal::{Entry, User};
use crate::storage::StorageBackend;

/// Validated add/remove operations over the user's entry store. Every
/// mutation persists through the storage collaborator before returning;
/// storage failures propagate unchanged, retries belong to the backend.
pub struct EntryService;

impl EntryService {
    /// Logs a new entry and returns it. `timestamp` defaults to now; the
    /// health import passes historical values, which may land out of
    /// chronological order relative to existing entries.
    pub fn add(
        user: &mut User,
        storage: &dyn StorageBackend,
        amount: f64,
        timestamp: Option<NaiveDateTime>,
    ) -> Result<Entry, WaterlogError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(WaterlogError::Validation(format!(
                "entry amount must be positive, got {amount}"
            )));
        }
        let entry = Entry::new(amount, timestamp);
        user.push_entry(entry.clone());
        storage.save(user)?;
        tracing::info!(entry_id = %entry.id, amount, "logged entry");
        Ok(entry)
    }

    /// Removes the entry with `id`, returning the removed instance.
    pub fn remove(
        user: &mut User,
        storage: &dyn StorageBackend,
        id: Uuid,
    ) -> Result<Entry, WaterlogError> {
        let removed = user
            .remove_entry(id)
            .ok_or_else(|| WaterlogError::NotFound(format!("no entry with id {id}")))?;
        storage.save(user)?;
        tracing::info!(entry_id = %id, amount = removed.amount, "removed entry");
        Ok(removed)
    }

    /// Removes the entry added most recently in this session, if any.
    pub fn undo_last(user: &mut User, storage: &dyn StorageBackend) -> Result<Entry, WaterlogError> {
        let id = user
            .latest_entry_id()
            .ok_or_else(|| WaterlogError::NotFound("no entry to undo".into()))?;
        Self::remove(user, storage, id)
    }
}
