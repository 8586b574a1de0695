//! Relays plain text messages to the agent and sends the formatted reply.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use relay_core::{Bot, Handler, HandlerResponse, Message, Result};
use tracing::{instrument, warn};

use crate::handlers::send_replies;
use crate::service::BotService;

pub struct AgentChatHandler {
    service: Arc<BotService>,
    bot: Arc<dyn Bot>,
    reply_delay: Duration,
}

impl AgentChatHandler {
    pub fn new(service: Arc<BotService>, bot: Arc<dyn Bot>, reply_delay: Duration) -> Self {
        Self {
            service,
            bot,
            reply_delay,
        }
    }
}

#[async_trait]
impl Handler for AgentChatHandler {
    #[instrument(skip(self, message), fields(user_id = message.user.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if message.is_command() || message.content.trim().is_empty() {
            return Ok(HandlerResponse::Continue);
        }

        let telegram_user_id = message.user.id.to_string();

        // Users that never sent /start (or whose onboarding failed) are onboarded lazily.
        if let Err(e) = self
            .service
            .ensure_onboarded(&telegram_user_id, message.user.display_first_name())
            .await
        {
            warn!(error = %e, "Lazy onboarding failed, relaying anyway");
        }

        let replies = self
            .service
            .generate_bot_response(&telegram_user_id, &message.content)
            .await;
        send_replies(self.bot.as_ref(), &message.chat, &replies, self.reply_delay).await?;

        Ok(HandlerResponse::Reply(replies))
    }
}
