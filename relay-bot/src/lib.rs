//! # relay-bot
//!
//! Telegram front end for a remote conversational agent. `/start` onboards the user with the
//! agent service and relays a greeting; every other text message is relayed as-is. Agent replies
//! (Markdown) are split at the Telegram message limit and rendered to Telegram HTML by
//! `message-format` before delivery.
//!
//! - [`admin`] – `add-user` command
//! - [`config`] – BotConfig loaded from env
//! - [`cli`] – command line
//! - [`service`] – BotService: agent ids, onboarding, reply generation
//! - [`handlers`] – logging middleware, `/start` and chat handlers
//! - [`components`] – wiring of storage, agent client, Telegram bot and handler chain
//! - [`runner`] – entry point used by the binary

pub mod admin;
pub mod cli;
pub mod components;
pub mod config;
pub mod handlers;
pub mod runner;
pub mod service;

pub use cli::{Cli, Commands};
pub use components::{build_bot_components, build_handler_chain, BotComponents};
pub use config::{BotConfig, StorageConfig};
pub use runner::run_bot;
pub use service::{BotService, FALLBACK_REPLY};
