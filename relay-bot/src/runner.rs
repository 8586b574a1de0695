//! Entry point: validate config, init logging, build components, then poll or serve the webhook.

use anyhow::Result;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::{info, instrument, warn};

use relay_core::init_tracing;

use crate::components::{build_bot_components, build_handler_chain};
use crate::config::BotConfig;
use crate::handlers::Command;

#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(&config.log_file)?;

    info!(
        agent_service_url = %config.agent_service_url,
        db_path = %config.sqlite_db_file_path,
        webhook = config.webhook_url.is_some(),
        "Initializing bot"
    );

    let components = build_bot_components(&config).await?;
    let teloxide_bot = components.teloxide_bot.clone();

    let bot_username = match teloxide_bot.get_me().await {
        Ok(me) => me.user.username.clone().unwrap_or_default(),
        Err(e) => {
            warn!(error = %e, "get_me failed; commands addressed as /start@bot will be ignored");
            String::new()
        }
    };
    if let Err(e) = teloxide_bot.set_my_commands(Command::bot_commands()).await {
        warn!(error = %e, "Failed to register bot commands");
    }

    let handler_chain = build_handler_chain(
        components.bot.clone(),
        components.service.clone(),
        &bot_username,
        config.reply_delay(),
    );

    info!(username = %bot_username, "Bot started successfully");

    let telegram = config.telegram_config();
    relay_telegram::run(teloxide_bot, handler_chain, telegram.webhook.as_ref()).await
}
