//! Admin commands run outside the bot loop.

use anyhow::{Context, Result};
use storage::{SqliteUserRepository, TelegramUserRecord, UserStore};
use tracing::{info, instrument};

use crate::config::StorageConfig;
use crate::service::agent_user_id;

/// Pre-registers a Telegram user. Returns `false` when the user already exists.
#[instrument(skip(storage))]
pub async fn add_user(storage: &StorageConfig, telegram_id: &str, onboarded: bool) -> Result<bool> {
    let repo = SqliteUserRepository::new(&storage.db_file_path, storage.timeout())
        .await
        .with_context(|| format!("Failed to open user database {}", storage.db_file_path))?;

    let mut record = TelegramUserRecord::new(telegram_id, agent_user_id(telegram_id));
    record.onboarded_successfully = onboarded;

    let inserted = repo.add_new_user(&record).await?;
    info!(inserted, "step: add-user finished");
    Ok(inserted)
}
