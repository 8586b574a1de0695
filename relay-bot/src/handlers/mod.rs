//! Chain members: logging middleware, `/start` handler and the agent chat handler.

mod chat;
mod logging;
mod start;

pub use chat::AgentChatHandler;
pub use logging::LoggingMiddleware;
pub use start::{Command, StartHandler};

use std::time::Duration;

use message_format::to_plain_text;
use relay_core::{Bot, Chat, Result};
use tracing::{debug, warn};

/// Sends each HTML message in order, pausing `delay` between consecutive messages.
///
/// A message Telegram rejects as HTML is resent once as plain text.
pub(crate) async fn send_replies(
    bot: &dyn Bot,
    chat: &Chat,
    replies: &[String],
    delay: Duration,
) -> Result<()> {
    for (i, html) in replies.iter().enumerate() {
        if i > 0 && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if let Err(e) = bot.send_html(chat, html).await {
            warn!(error = %e, chat_id = chat.id, index = i, "HTML send failed, resending as plain text");
            bot.send_message(chat, &to_plain_text(html)).await?;
        }
        debug!(chat_id = chat.id, index = i, "Sent reply message");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use relay_core::RelayError;
    use std::sync::Mutex;

    /// Rejects HTML containing `reject`; records everything that got through.
    #[derive(Default)]
    struct PickyBot {
        sent: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Bot for PickyBot {
        async fn send_message(&self, _chat: &Chat, text: &str) -> Result<()> {
            self.sent.lock().unwrap().push(format!("plain:{text}"));
            Ok(())
        }

        async fn send_html(&self, _chat: &Chat, html: &str) -> Result<()> {
            if html.contains("reject") {
                return Err(RelayError::Bot("can't parse entities".to_string()));
            }
            self.sent.lock().unwrap().push(format!("html:{html}"));
            Ok(())
        }
    }

    fn chat() -> Chat {
        Chat {
            id: 1,
            chat_type: "private".to_string(),
        }
    }

    /// **Test: A rejected HTML chunk is resent as plain text and later chunks still go out.**
    #[tokio::test]
    async fn test_rejected_html_falls_back_to_plain_text() {
        let bot = PickyBot::default();
        let replies = vec![
            "<b>one</b>".to_string(),
            r#"<a href="https://x.com/reject">two</a> &amp; more"#.to_string(),
            "<i>three</i>".to_string(),
        ];

        send_replies(&bot, &chat(), &replies, Duration::ZERO)
            .await
            .unwrap();

        assert_eq!(
            *bot.sent.lock().unwrap(),
            vec![
                "html:<b>one</b>".to_string(),
                "plain:two (https://x.com/reject) & more".to_string(),
                "html:<i>three</i>".to_string(),
            ]
        );
    }

    /// **Test: Replies are delivered in order.**
    #[tokio::test]
    async fn test_replies_sent_in_order() {
        let bot = PickyBot::default();
        let replies = vec!["a".to_string(), "b".to_string()];

        send_replies(&bot, &chat(), &replies, Duration::from_millis(1))
            .await
            .unwrap();

        assert_eq!(
            *bot.sent.lock().unwrap(),
            vec!["html:a".to_string(), "html:b".to_string()]
        );
    }
}
