//! Update runners: long polling or webhook. Each text message is converted to a core Message and
//! run through the HandlerChain in its own task, so a slow agent reply never blocks other chats.

use anyhow::{Context, Result};
use handler_chain::HandlerChain;
use relay_core::ToCoreMessage;
use teloxide::prelude::*;
use teloxide::update_listeners::webhooks;
use tracing::{error, info, instrument};

use crate::adapters::TelegramMessageWrapper;
use crate::config::WebhookSettings;

/// Runs with a webhook when `webhook` is set, otherwise with long polling.
pub async fn run(
    bot: teloxide::Bot,
    handler_chain: HandlerChain,
    webhook: Option<&WebhookSettings>,
) -> Result<()> {
    match webhook {
        Some(settings) => run_webhook(bot, handler_chain, settings).await,
        None => run_polling(bot, handler_chain).await,
    }
}

/// Starts the long-polling REPL.
#[instrument(skip(bot, handler_chain))]
pub async fn run_polling(bot: teloxide::Bot, handler_chain: HandlerChain) -> Result<()> {
    info!("Starting long polling");
    let chain = handler_chain;
    teloxide::repl(bot, move |_bot: Bot, msg: teloxide::types::Message| {
        let chain = chain.clone();
        async move {
            dispatch(chain, msg);
            respond(())
        }
    })
    .await;
    Ok(())
}

/// Registers the webhook with Telegram and serves updates on `0.0.0.0:{port}/webhook`.
#[instrument(skip(bot, handler_chain))]
pub async fn run_webhook(
    bot: teloxide::Bot,
    handler_chain: HandlerChain,
    settings: &WebhookSettings,
) -> Result<()> {
    let url = settings.public_url()?;
    let addr = settings.listen_addr();
    info!(url = %url, addr = %addr, "Starting webhook listener");

    let listener = webhooks::axum(bot.clone(), webhooks::Options::new(addr, url))
        .await
        .context("Failed to set up Telegram webhook")?;

    let chain = handler_chain;
    teloxide::repl_with_listener(
        bot,
        move |_bot: Bot, msg: teloxide::types::Message| {
            let chain = chain.clone();
            async move {
                dispatch(chain, msg);
                respond(())
            }
        },
        listener,
    )
    .await;
    Ok(())
}

/// Hands one update to the chain on a spawned task. Non-text updates are logged and dropped.
fn dispatch(chain: HandlerChain, msg: teloxide::types::Message) {
    let core_msg = TelegramMessageWrapper(&msg).to_core();

    if msg.text().is_none() {
        info!(
            user_id = core_msg.user.id,
            chat_id = core_msg.chat.id,
            "Received non-text message"
        );
        return;
    }

    info!(
        user_id = core_msg.user.id,
        chat_id = core_msg.chat.id,
        message_content = %core_msg.content,
        "Received message"
    );

    tokio::spawn(async move {
        info!(
            user_id = core_msg.user.id,
            chat_id = core_msg.chat.id,
            message_id = %core_msg.id,
            "step: processing message (handler chain started)"
        );
        if let Err(e) = chain.handle(&core_msg).await {
            error!(error = %e, user_id = core_msg.user.id, "Handler chain failed");
        }
    });
}
