pub mod user_manager;

pub use user_manager::UserManager;
