//! Bot abstraction for delivering messages to a chat.
//!
//! [`Bot`] is transport-agnostic; relay-telegram implements it over teloxide and tests substitute
//! recording implementations.

use crate::error::Result;
use crate::types::Chat;
use async_trait::async_trait;

/// Sends messages to a chat. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends plain text (no parse mode).
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;
    /// Sends text that is already Telegram HTML (`parse_mode = HTML`).
    async fn send_html(&self, chat: &Chat, html: &str) -> Result<()>;
}
