//! Bot configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Result};
use message_format::{FormatConfig, MESSAGE_LENGTH_LIMIT};
use relay_telegram::{TelegramConfig, WebhookSettings};

/// Full runtime configuration of the relay bot.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// TELEGRAM_BOT_TOKEN or BOT_TOKEN
    pub bot_token: String,
    /// TELEGRAM_API_URL; points the bot at a mock Bot API in tests
    pub telegram_api_url: Option<String>,
    /// TELEGRAM_WEBHOOK_URL; long polling when unset
    pub webhook_url: Option<String>,
    pub webhook_port: u16,
    /// AGENT_SERVICE_URL without trailing `/`
    pub agent_service_url: String,
    pub agent_service_timeout_minutes: u64,
    pub sqlite_db_file_path: String,
    pub sqlite_db_timeout_seconds: u64,
    pub message_length_limit: usize,
    /// Pause between consecutive reply messages
    pub reply_delay_ms: u64,
    pub log_file: String,
}

impl BotConfig {
    /// Load from environment variables. `token` overrides TELEGRAM_BOT_TOKEN / BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(token) => token,
            None => match env::var("TELEGRAM_BOT_TOKEN").or_else(|_| env::var("BOT_TOKEN")) {
                Ok(token) => token,
                Err(_) => bail!("TELEGRAM_BOT_TOKEN (or BOT_TOKEN) not set"),
            },
        };
        let agent_service_url = match env::var("AGENT_SERVICE_URL") {
            Ok(url) => url.trim_end_matches('/').to_string(),
            Err(_) => bail!("AGENT_SERVICE_URL not set"),
        };

        let storage = StorageConfig::from_env();

        Ok(Self {
            bot_token,
            telegram_api_url: non_empty_var("TELEGRAM_API_URL"),
            webhook_url: non_empty_var("TELEGRAM_WEBHOOK_URL"),
            webhook_port: parse_var("TELEGRAM_WEBHOOK_PORT", 8443),
            agent_service_url,
            agent_service_timeout_minutes: parse_var("AGENT_SERVICE_TIMEOUT_MINUTES", 5),
            sqlite_db_file_path: storage.db_file_path,
            sqlite_db_timeout_seconds: storage.timeout_seconds,
            message_length_limit: parse_var("MESSAGE_LENGTH_LIMIT", MESSAGE_LENGTH_LIMIT),
            reply_delay_ms: parse_var("REPLY_DELAY_MS", 1000),
            log_file: env::var("LOG_FILE").unwrap_or_else(|_| "logs/relay-bot.log".to_string()),
        })
    }

    /// Validate config: URLs must parse and the message limit must fit Telegram's.
    pub fn validate(&self) -> Result<()> {
        if self.bot_token.trim().is_empty() {
            bail!("Telegram bot token is empty");
        }
        match reqwest::Url::parse(&self.agent_service_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => bail!(
                "AGENT_SERVICE_URL is not a valid http(s) URL: {}",
                self.agent_service_url
            ),
        }
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                bail!("TELEGRAM_API_URL is set but not a valid URL: {}", url_str);
            }
        }
        if let Some(ref url_str) = self.webhook_url {
            if reqwest::Url::parse(url_str).is_err() {
                bail!("TELEGRAM_WEBHOOK_URL is set but not a valid URL: {}", url_str);
            }
        }
        if !(1..=MESSAGE_LENGTH_LIMIT).contains(&self.message_length_limit) {
            bail!(
                "MESSAGE_LENGTH_LIMIT must be between 1 and {}, got {}",
                MESSAGE_LENGTH_LIMIT,
                self.message_length_limit
            );
        }
        Ok(())
    }

    pub fn telegram_config(&self) -> TelegramConfig {
        TelegramConfig {
            bot_token: self.bot_token.clone(),
            telegram_api_url: self.telegram_api_url.clone(),
            webhook: self.webhook_url.as_ref().map(|url| WebhookSettings {
                url: url.clone(),
                port: self.webhook_port,
            }),
        }
    }

    pub fn agent_timeout(&self) -> Duration {
        Duration::from_secs(self.agent_service_timeout_minutes * 60)
    }

    pub fn db_timeout(&self) -> Duration {
        Duration::from_secs(self.sqlite_db_timeout_seconds)
    }

    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }

    pub fn format_config(&self) -> FormatConfig {
        FormatConfig {
            message_limit: self.message_length_limit,
        }
    }
}

/// SQLite settings alone; admin commands need no token or agent URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// SQLITE_DB_FILE_PATH
    pub db_file_path: String,
    /// SQLITE_DB_TIMEOUT_SECONDS
    pub timeout_seconds: u64,
}

impl StorageConfig {
    pub fn from_env() -> Self {
        Self {
            db_file_path: env::var("SQLITE_DB_FILE_PATH")
                .unwrap_or_else(|_| "telegram_bot_db.sqlite".to_string()),
            timeout_seconds: parse_var("SQLITE_DB_TIMEOUT_SECONDS", 10),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Parses `name`, falling back to `default` when unset or unparsable.
fn parse_var<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 12] = [
        "TELEGRAM_BOT_TOKEN",
        "BOT_TOKEN",
        "TELEGRAM_API_URL",
        "TELEGRAM_WEBHOOK_URL",
        "TELEGRAM_WEBHOOK_PORT",
        "AGENT_SERVICE_URL",
        "AGENT_SERVICE_TIMEOUT_MINUTES",
        "SQLITE_DB_FILE_PATH",
        "SQLITE_DB_TIMEOUT_SECONDS",
        "MESSAGE_LENGTH_LIMIT",
        "REPLY_DELAY_MS",
        "LOG_FILE",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_load_config_with_defaults() {
        clear_env();
        env::set_var("TELEGRAM_BOT_TOKEN", "test_token");
        env::set_var("AGENT_SERVICE_URL", "http://agent:8000/");

        let config = BotConfig::load(None).unwrap();

        assert_eq!(config.bot_token, "test_token");
        assert_eq!(config.agent_service_url, "http://agent:8000");
        assert!(config.telegram_api_url.is_none());
        assert!(config.webhook_url.is_none());
        assert_eq!(config.webhook_port, 8443);
        assert_eq!(config.agent_timeout(), Duration::from_secs(300));
        assert_eq!(config.sqlite_db_file_path, "telegram_bot_db.sqlite");
        assert_eq!(config.db_timeout(), Duration::from_secs(10));
        assert_eq!(config.message_length_limit, 4096);
        assert_eq!(config.reply_delay(), Duration::from_millis(1000));
        assert_eq!(config.log_file, "logs/relay-bot.log");
        assert!(config.telegram_config().webhook.is_none());
        config.validate().unwrap();
    }

    #[test]
    #[serial]
    fn test_load_config_with_custom_values() {
        clear_env();
        env::set_var("BOT_TOKEN", "fallback_token");
        env::set_var("AGENT_SERVICE_URL", "https://agent.example.com");
        env::set_var("TELEGRAM_WEBHOOK_URL", "https://bot.example.com");
        env::set_var("TELEGRAM_WEBHOOK_PORT", "9000");
        env::set_var("AGENT_SERVICE_TIMEOUT_MINUTES", "2");
        env::set_var("MESSAGE_LENGTH_LIMIT", "1000");
        env::set_var("REPLY_DELAY_MS", "0");

        let config = BotConfig::load(None).unwrap();

        assert_eq!(config.bot_token, "fallback_token");
        assert_eq!(config.agent_timeout(), Duration::from_secs(120));
        assert_eq!(config.format_config().message_limit, 1000);
        assert_eq!(config.reply_delay(), Duration::ZERO);
        assert_eq!(
            config.telegram_config().webhook,
            Some(WebhookSettings {
                url: "https://bot.example.com".to_string(),
                port: 9000,
            })
        );
        config.validate().unwrap();
        clear_env();
    }

    #[test]
    #[serial]
    fn test_storage_config_without_bot_settings() {
        clear_env();
        env::set_var("SQLITE_DB_FILE_PATH", "/tmp/relay.sqlite");
        env::set_var("SQLITE_DB_TIMEOUT_SECONDS", "3");

        let storage = StorageConfig::from_env();

        assert_eq!(storage.db_file_path, "/tmp/relay.sqlite");
        assert_eq!(storage.timeout(), Duration::from_secs(3));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_token_override_and_missing_values() {
        clear_env();
        env::set_var("AGENT_SERVICE_URL", "http://agent");

        assert!(BotConfig::load(None).is_err());
        let config = BotConfig::load(Some("cli_token".to_string())).unwrap();
        assert_eq!(config.bot_token, "cli_token");

        env::remove_var("AGENT_SERVICE_URL");
        assert!(BotConfig::load(Some("cli_token".to_string())).is_err());
    }

    #[test]
    #[serial]
    fn test_validate_rejects_bad_values() {
        clear_env();
        env::set_var("AGENT_SERVICE_URL", "http://agent");
        let config = BotConfig::load(Some("t".to_string())).unwrap();

        let mut too_long = config.clone();
        too_long.message_length_limit = 5000;
        assert!(too_long.validate().is_err());

        let mut zero = config.clone();
        zero.message_length_limit = 0;
        assert!(zero.validate().is_err());

        let mut bad_agent = config.clone();
        bad_agent.agent_service_url = "agent:8000".to_string();
        assert!(bad_agent.validate().is_err());

        let mut bad_api = config;
        bad_api.telegram_api_url = Some("not a url".to_string());
        assert!(bad_api.validate().is_err());
        clear_env();
    }
}
