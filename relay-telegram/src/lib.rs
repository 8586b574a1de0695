//! # relay-telegram
//!
//! Telegram transport layer: teloxide → core adapters, a [`relay_core::Bot`] implementation that
//! sends HTML, connection config, and the polling / webhook runners that feed the handler chain.
//! No persistence or agent logic lives here.

mod adapters;
mod bot_adapter;
mod config;
mod runner;

pub use adapters::{chat_type, TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use config::{TelegramConfig, WebhookSettings};
pub use runner::{run, run_polling, run_webhook};
