pub mod json_backend;

use crate::journal::User;

pub type Result<T> = std::result::Result<T, crate::errors::WaterlogError>;

/// Abstraction over persistence backends holding the single user record.
///
/// Backends guarantee that at most one user record logically exists;
/// lazy creation when none is found lives in
/// [`UserManager`](crate::core::UserManager).
pub trait StorageBackend: Send + Sync {
    /// Loads the persisted user, or `None` when no record exists yet.
    fn load_user(&self) -> Result<Option<User>>;
    fn save(&self, user: &User) -> Result<()>;
    fn list_backups(&self) -> Result<Vec<String>>;
}

pub use json_backend::JsonStorage;
