//! Storage crate: per-user onboarding state persisted in SQLite.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – TelegramUserRecord
//! - [`repository`] – UserStore trait
//! - [`user_repo`] – SqliteUserRepository (SQLite)
//! - [`sqlite_pool`] – SqlitePoolManager

mod error;
mod models;
mod repository;
mod sqlite_pool;
mod user_repo;

pub use error::StorageError;
pub use models::TelegramUserRecord;
pub use repository::UserStore;
pub use sqlite_pool::SqlitePoolManager;
pub use user_repo::SqliteUserRepository;
