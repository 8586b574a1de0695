//! # message-format
//!
//! Turns a raw Markdown reply from the agent service into Telegram HTML messages.
//!
//! ## Modules
//!
//! - [`segment`] – splits text into chunks under the message length limit, re-opening code fences
//! - [`render`] – ordered Markdown → Telegram HTML stages (escape, tables, headers, links, bold, italic)
//! - [`reply`] – [`ReplyFormatter`]: segment, render and drop blank output
//!
//! Everything here is pure and synchronous; callers may format replies for many chats concurrently.

pub mod render;
pub mod reply;
pub mod segment;

pub use render::{render, to_plain_text, Stage, PIPELINE};
pub use reply::{FormatConfig, ReplyFormatter};
pub use segment::{segment, FenceState};

/// Hard limit of a single Telegram message, in characters.
pub const MESSAGE_LENGTH_LIMIT: usize = 4096;

/// Markdown code fence marker.
pub const CODE_FENCE: &str = "```";
