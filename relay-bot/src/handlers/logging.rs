//! Logs each message in before() and the final response in after(); always continues.

use async_trait::async_trait;
use relay_core::{HandlerResponse, Message, Middleware, Result};
use tracing::{debug, info, instrument};

pub struct LoggingMiddleware;

#[async_trait]
impl Middleware for LoggingMiddleware {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        info!(
            user_id = message.user.id,
            username = %message.user.username.as_deref().unwrap_or("unknown"),
            message_content = %message.content,
            "Received message"
        );
        Ok(true)
    }

    #[instrument(skip(self, message, response))]
    async fn after(&self, message: &Message, response: &HandlerResponse) -> Result<()> {
        let sent = match response {
            HandlerResponse::Reply(messages) => messages.len(),
            _ => 0,
        };
        debug!(
            message_id = ?message.id,
            sent_messages = sent,
            "Processed message"
        );
        Ok(())
    }
}
