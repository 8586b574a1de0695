//! User repository: onboarding state for Telegram users.
//!
//! Uses SqlitePoolManager and TelegramUserRecord. Creates the `telegram_users` table on open.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{info, instrument, warn};

use crate::error::StorageError;
use crate::models::TelegramUserRecord;
use crate::repository::UserStore;
use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone)]
pub struct SqliteUserRepository {
    pool_manager: SqlitePoolManager,
}

impl SqliteUserRepository {
    pub async fn new(db_file_path: &str, busy_timeout: Duration) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(db_file_path, busy_timeout).await?;
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), StorageError> {
        info!("Creating telegram_users table if not exists");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS telegram_users (
                telegram_user_id TEXT PRIMARY KEY,
                agent_service_user_id TEXT NOT NULL,
                onboarded_successfully BOOLEAN NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(self.pool_manager.pool())
        .await?;

        Ok(())
    }
}

#[async_trait]
impl UserStore for SqliteUserRepository {
    #[instrument(skip(self, user), fields(telegram_user_id = %user.telegram_user_id))]
    async fn add_new_user(&self, user: &TelegramUserRecord) -> Result<bool, StorageError> {
        let result = sqlx::query(
            r#"
            INSERT OR IGNORE INTO telegram_users (
                telegram_user_id, agent_service_user_id, onboarded_successfully, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.telegram_user_id)
        .bind(&user.agent_service_user_id)
        .bind(user.onboarded_successfully)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(self.pool_manager.pool())
        .await?;

        let inserted = result.rows_affected() > 0;
        if inserted {
            info!("Added new user");
        } else {
            warn!("User already exists");
        }
        Ok(inserted)
    }

    async fn get_user_by_telegram_user_id(
        &self,
        telegram_user_id: &str,
    ) -> Result<Option<TelegramUserRecord>, StorageError> {
        let user = sqlx::query_as::<_, TelegramUserRecord>(
            "SELECT * FROM telegram_users WHERE telegram_user_id = ?",
        )
        .bind(telegram_user_id)
        .fetch_optional(self.pool_manager.pool())
        .await?;

        Ok(user)
    }

    #[instrument(skip(self))]
    async fn set_onboarded_successfully(
        &self,
        telegram_user_id: &str,
        onboarded: bool,
    ) -> Result<bool, StorageError> {
        let result = sqlx::query(
            "UPDATE telegram_users SET onboarded_successfully = ?, updated_at = ? WHERE telegram_user_id = ?",
        )
        .bind(onboarded)
        .bind(Utc::now())
        .bind(telegram_user_id)
        .execute(self.pool_manager.pool())
        .await?;

        let updated = result.rows_affected() > 0;
        if updated {
            info!("Updated onboarding status");
        } else {
            warn!("No user to update onboarding status for");
        }
        Ok(updated)
    }
}
