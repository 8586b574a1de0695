//! Bot service: maps Telegram users to agent ids, onboards them and turns agent replies into
//! Telegram HTML messages.

use std::sync::Arc;

use agent_client::{AgentClient, AgentError, UserProfile};
use message_format::ReplyFormatter;
use storage::{TelegramUserRecord, UserStore};
use tracing::{debug, error, info, instrument, warn};

/// Sent instead of the agent reply when the agent call fails.
pub const FALLBACK_REPLY: &str = "I am sorry, something went wrong. Please try again later.";

pub fn agent_user_id(telegram_user_id: &str) -> String {
    format!("telegram:{telegram_user_id}")
}

pub fn agent_session_id(telegram_user_id: &str) -> String {
    format!("telegram_session:{telegram_user_id}")
}

/// Message relayed to the agent on `/start`.
pub fn start_greeting(first_name: &str) -> String {
    format!("Hey, I am your new client {first_name}!")
}

pub struct BotService {
    agent: Arc<dyn AgentClient>,
    users: Arc<dyn UserStore>,
    formatter: ReplyFormatter,
}

impl BotService {
    pub fn new(
        agent: Arc<dyn AgentClient>,
        users: Arc<dyn UserStore>,
        formatter: ReplyFormatter,
    ) -> Self {
        Self {
            agent,
            users,
            formatter,
        }
    }

    /// Creates the agent user context and session, recording the user locally.
    ///
    /// Storage failures are logged and do not abort onboarding; agent failures are returned.
    #[instrument(skip(self, first_name))]
    pub async fn handle_new_user(
        &self,
        telegram_user_id: &str,
        first_name: &str,
    ) -> Result<(), AgentError> {
        let user_id = agent_user_id(telegram_user_id);
        let session_id = agent_session_id(telegram_user_id);

        let record = TelegramUserRecord::new(telegram_user_id, user_id.as_str());
        match self.users.add_new_user(&record).await {
            Ok(true) => info!("step: user recorded"),
            Ok(false) => debug!("User already recorded"),
            Err(e) => warn!(error = %e, "Failed to record user"),
        }

        let profile = UserProfile {
            first_name: first_name.to_string(),
        };
        self.agent
            .create_user_context(&user_id, Some(&profile))
            .await
            .inspect_err(|e| error!(error = %e, "Failed to create user context"))?;

        self.agent
            .create_session(&user_id, &session_id)
            .await
            .inspect_err(|e| error!(error = %e, "Failed to create session"))?;

        match self
            .users
            .set_onboarded_successfully(telegram_user_id, true)
            .await
        {
            Ok(true) => info!("step: user onboarded"),
            Ok(false) => warn!("Onboarded user has no local record"),
            Err(e) => warn!(error = %e, "Failed to mark user onboarded"),
        }
        Ok(())
    }

    /// Onboards the user unless the local record says it already happened.
    #[instrument(skip(self, first_name))]
    pub async fn ensure_onboarded(
        &self,
        telegram_user_id: &str,
        first_name: &str,
    ) -> Result<(), AgentError> {
        match self
            .users
            .get_user_by_telegram_user_id(telegram_user_id)
            .await
        {
            Ok(Some(record)) if record.onboarded_successfully => return Ok(()),
            Ok(_) => info!("User not onboarded yet"),
            Err(e) => warn!(error = %e, "Failed to read user record, onboarding again"),
        }
        self.handle_new_user(telegram_user_id, first_name).await
    }

    /// Relays `message` to the agent and returns the reply as Telegram HTML messages, in order.
    #[instrument(skip(self, message))]
    pub async fn generate_bot_response(&self, telegram_user_id: &str, message: &str) -> Vec<String> {
        let session_id = agent_session_id(telegram_user_id);

        match self.agent.generate_response(&session_id, message).await {
            Ok(reply) => self.formatter.format(&reply),
            Err(e) => {
                error!(error = %e, "Failed to generate ai response");
                vec![FALLBACK_REPLY.to_string()]
            }
        }
    }
}
