//! `/start`: onboard the user with the agent service, then relay a greeting.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use relay_core::{Bot, Handler, HandlerError, HandlerResponse, Message, Result};
use teloxide::utils::command::BotCommands;
use tracing::{error, info, instrument};

use crate::handlers::send_replies;
use crate::service::{start_greeting, BotService};

/// Commands registered with Telegram.
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "start talking to the agent")]
    Start,
}

pub struct StartHandler {
    service: Arc<BotService>,
    bot: Arc<dyn Bot>,
    bot_username: String,
    reply_delay: Duration,
}

impl StartHandler {
    pub fn new(
        service: Arc<BotService>,
        bot: Arc<dyn Bot>,
        bot_username: impl Into<String>,
        reply_delay: Duration,
    ) -> Self {
        Self {
            service,
            bot,
            bot_username: bot_username.into(),
            reply_delay,
        }
    }

    /// Parses only the command token, so deep-link payloads (`/start abc`) still match.
    fn parse_command(&self, content: &str) -> Option<Command> {
        let token = content.split_whitespace().next()?;
        Command::parse(token, &self.bot_username).ok()
    }
}

#[async_trait]
impl Handler for StartHandler {
    #[instrument(skip(self, message), fields(user_id = message.user.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if self.parse_command(&message.content) != Some(Command::Start) {
            return Ok(HandlerResponse::Continue);
        }

        let telegram_user_id = message.user.id.to_string();
        let first_name = message.user.display_first_name();
        info!(
            username = %message.user.username.as_deref().unwrap_or("unknown"),
            "User sent /start"
        );

        if let Err(e) = self
            .service
            .handle_new_user(&telegram_user_id, first_name)
            .await
        {
            error!(error = %e, "Onboarding failed");
            return Err(HandlerError::Onboarding(e.to_string()).into());
        }

        let replies = self
            .service
            .generate_bot_response(&telegram_user_id, &start_greeting(first_name))
            .await;
        send_replies(self.bot.as_ref(), &message.chat, &replies, self.reply_delay).await?;

        Ok(HandlerResponse::Reply(replies))
    }
}
