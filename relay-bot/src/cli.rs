//! CLI parser.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "relay-bot")]
#[command(about = "Telegram front end for a remote conversational agent", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the Telegram bot (config from env; token can override TELEGRAM_BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Register a Telegram user in the local database (SQLITE_DB_* from env).
    AddUser {
        #[arg(long)]
        telegram_id: String,
        /// Mark the user as already onboarded with the agent service.
        #[arg(long)]
        onboarded: bool,
    },
}
