//! Builds the runtime pieces from config: user store, agent client, Telegram bot, handler chain.

use std::sync::Arc;
use std::time::Duration;

use agent_client::{AgentClient, HttpAgentClient};
use anyhow::Result;
use handler_chain::HandlerChain;
use message_format::ReplyFormatter;
use relay_core::Bot;
use relay_telegram::TelegramBotAdapter;
use storage::{SqliteUserRepository, UserStore};
use tracing::{error, instrument};

use crate::config::BotConfig;
use crate::handlers::{AgentChatHandler, LoggingMiddleware, StartHandler};
use crate::service::BotService;

/// Runtime components shared by the handlers.
#[derive(Clone)]
pub struct BotComponents {
    pub teloxide_bot: teloxide::Bot,
    pub bot: Arc<dyn Bot>,
    pub service: Arc<BotService>,
}

#[instrument(skip(config))]
pub async fn build_bot_components(config: &BotConfig) -> Result<BotComponents> {
    let users: Arc<dyn UserStore> = Arc::new(
        SqliteUserRepository::new(&config.sqlite_db_file_path, config.db_timeout())
            .await
            .map_err(|e| {
                error!(
                    error = %e,
                    db_path = %config.sqlite_db_file_path,
                    "Failed to initialize user storage"
                );
                anyhow::anyhow!("Failed to initialize user storage: {}", e)
            })?,
    );

    let agent: Arc<dyn AgentClient> = Arc::new(HttpAgentClient::new(
        config.agent_service_url.clone(),
        config.agent_timeout(),
    )?);

    let service = Arc::new(BotService::new(
        agent,
        users,
        ReplyFormatter::new(config.format_config()),
    ));

    let teloxide_bot = config.telegram_config().build_bot();
    let bot: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));

    Ok(BotComponents {
        teloxide_bot,
        bot,
        service,
    })
}

/// Logging middleware, then `/start`, then the chat relay.
pub fn build_handler_chain(
    bot: Arc<dyn Bot>,
    service: Arc<BotService>,
    bot_username: &str,
    reply_delay: Duration,
) -> HandlerChain {
    HandlerChain::new()
        .add_middleware(Arc::new(LoggingMiddleware))
        .add_handler(Arc::new(StartHandler::new(
            service.clone(),
            bot.clone(),
            bot_username,
            reply_delay,
        )))
        .add_handler(Arc::new(AgentChatHandler::new(service, bot, reply_delay)))
}
