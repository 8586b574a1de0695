use async_trait::async_trait;

use crate::error::StorageError;
use crate::models::TelegramUserRecord;

/// Onboarding state keyed by Telegram user id.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts the user. Returns `false` when a record with the same id already exists.
    async fn add_new_user(&self, user: &TelegramUserRecord) -> Result<bool, StorageError>;

    async fn get_user_by_telegram_user_id(
        &self,
        telegram_user_id: &str,
    ) -> Result<Option<TelegramUserRecord>, StorageError>;

    /// Sets the onboarding flag and refreshes `updated_at`. Returns whether a row was updated.
    async fn set_onboarded_successfully(
        &self,
        telegram_user_id: &str,
        onboarded: bool,
    ) -> Result<bool, StorageError>;
}
