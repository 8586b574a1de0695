//! Telegram connection settings: token, optional Bot API URL, optional webhook.

use std::net::{Ipv4Addr, SocketAddr};

use anyhow::{Context, Result};
use tracing::error;

/// Path the webhook listener serves and registers with Telegram.
pub const WEBHOOK_PATH: &str = "webhook";

/// Webhook mode: Telegram pushes updates to `{url}/webhook`, served on `0.0.0.0:{port}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookSettings {
    pub url: String,
    pub port: u16,
}

impl WebhookSettings {
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }

    /// Public URL registered with Telegram.
    pub fn public_url(&self) -> Result<reqwest::Url> {
        let url = format!("{}/{}", self.url.trim_end_matches('/'), WEBHOOK_PATH);
        reqwest::Url::parse(&url).with_context(|| format!("Invalid webhook URL: {url}"))
    }
}

/// Everything needed to talk to the Telegram Bot API.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub telegram_api_url: Option<String>,
    /// `None` selects long polling.
    pub webhook: Option<WebhookSettings>,
}

impl TelegramConfig {
    /// Uses the given token with the default API URL and long polling.
    pub fn with_token(bot_token: String) -> Self {
        Self {
            bot_token,
            telegram_api_url: None,
            webhook: None,
        }
    }

    /// Builds the teloxide Bot; an unparsable API URL is logged and the default is kept.
    pub fn build_bot(&self) -> teloxide::Bot {
        let bot = teloxide::Bot::new(self.bot_token.clone());
        match self.telegram_api_url.as_deref() {
            Some(url_str) => match reqwest::Url::parse(url_str) {
                Ok(url) => bot.set_api_url(url),
                Err(e) => {
                    error!(error = %e, url = %url_str, "Invalid TELEGRAM_API_URL, using default");
                    bot
                }
            },
            None => bot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_token() {
        let config = TelegramConfig::with_token("test_token".to_string());
        assert_eq!(config.bot_token, "test_token");
        assert!(config.telegram_api_url.is_none());
        assert!(config.webhook.is_none());
    }

    #[test]
    fn test_webhook_public_url_and_addr() {
        let settings = WebhookSettings {
            url: "https://bot.example.com/".to_string(),
            port: 8443,
        };
        assert_eq!(
            settings.public_url().unwrap().as_str(),
            "https://bot.example.com/webhook"
        );
        assert_eq!(settings.listen_addr().to_string(), "0.0.0.0:8443");
    }

    #[test]
    fn test_webhook_invalid_url() {
        let settings = WebhookSettings {
            url: "not a url".to_string(),
            port: 8443,
        };
        assert!(settings.public_url().is_err());
    }
}
