//! relay-bot binary: loads `.env`, parses the command line and runs the bot.

use anyhow::Result;
use clap::Parser;
use relay_bot::{admin, run_bot, BotConfig, Cli, Commands, StorageConfig};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = BotConfig::load(token)?;
            run_bot(config).await
        }
        Commands::AddUser {
            telegram_id,
            onboarded,
        } => {
            let storage = StorageConfig::from_env();
            let inserted = admin::add_user(&storage, &telegram_id, onboarded).await?;
            if inserted {
                println!("Added Telegram user {telegram_id} (onboarded: {onboarded})");
            } else {
                println!("Telegram user {telegram_id} already exists");
            }
            Ok(())
        }
    }
}
