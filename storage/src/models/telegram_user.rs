//! Telegram user record for persistence.
//!
//! Maps to the `telegram_users` table and is used by SqliteUserRepository.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TelegramUserRecord {
    pub telegram_user_id: String,
    pub agent_service_user_id: String,
    pub onboarded_successfully: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TelegramUserRecord {
    /// Creates a not-yet-onboarded record stamped with the current time.
    pub fn new(telegram_user_id: impl Into<String>, agent_service_user_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            telegram_user_id: telegram_user_id.into(),
            agent_service_user_id: agent_service_user_id.into(),
            onboarded_successfully: false,
            created_at: now,
            updated_at: now,
        }
    }
}
