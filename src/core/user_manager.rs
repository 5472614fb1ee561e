use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::errors::WaterlogError;
use crate::journal::{Entry, User};
use crate::services::EntryService;
use crate::storage::StorageBackend;

/// Facade that owns the current user and coordinates persistence.
///
/// Exactly one user record logically exists per installation;
/// [`UserManager::user`] materializes it lazily on first access. The
/// storage backend is injected rather than reached through global state,
/// so hosts and tests choose their own data directory.
pub struct UserManager {
    current: Option<User>,
    storage: Box<dyn StorageBackend>,
}

impl UserManager {
    pub fn new(storage: Box<dyn StorageBackend>) -> Self {
        Self {
            current: None,
            storage,
        }
    }

    pub fn storage(&self) -> &dyn StorageBackend {
        self.storage.as_ref()
    }

    fn ensure_loaded(&mut self) -> Result<(), WaterlogError> {
        if self.current.is_some() {
            return Ok(());
        }
        let user = match self.storage.load_user()? {
            Some(user) => user,
            None => {
                let user = User::new();
                self.storage.save(&user)?;
                tracing::info!(user_id = %user.id, "created new user record");
                user
            }
        };
        self.current = Some(user);
        Ok(())
    }

    /// Returns the current user, loading the persisted record or creating
    /// a fresh empty one when none exists.
    pub fn user(&mut self) -> Result<&User, WaterlogError> {
        self.ensure_loaded()?;
        self.current
            .as_ref()
            .ok_or_else(|| WaterlogError::Storage("no user loaded".into()))
    }

    /// Logs a new entry and persists the mutation.
    pub fn add_entry(
        &mut self,
        amount: f64,
        timestamp: Option<NaiveDateTime>,
    ) -> Result<Entry, WaterlogError> {
        self.ensure_loaded()?;
        match self.current.as_mut() {
            Some(user) => EntryService::add(user, self.storage.as_ref(), amount, timestamp),
            None => Err(WaterlogError::Storage("no user loaded".into())),
        }
    }

    /// Removes the entry with `id` and persists the mutation.
    pub fn remove_entry(&mut self, id: Uuid) -> Result<Entry, WaterlogError> {
        self.ensure_loaded()?;
        match self.current.as_mut() {
            Some(user) => EntryService::remove(user, self.storage.as_ref(), id),
            None => Err(WaterlogError::Storage("no user loaded".into())),
        }
    }

    /// Removes the entry added last in this session, if any.
    pub fn undo_last(&mut self) -> Result<Entry, WaterlogError> {
        self.ensure_loaded()?;
        match self.current.as_mut() {
            Some(user) => EntryService::undo_last(user, self.storage.as_ref()),
            None => Err(WaterlogError::Storage("no user loaded".into())),
        }
    }

    /// Drops the in-memory user; the next access reloads from storage.
    pub fn clear(&mut self) {
        self.current = None;
    }
}
