//! # relay-core
//!
//! Core types and traits for the relay bot: [`Bot`], [`Handler`], [`Middleware`], message and user
//! types, errors, and tracing initialization. Transport-agnostic; used by relay-telegram,
//! handler-chain and relay-bot.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::Bot;
pub use error::{HandlerError, RelayError, Result};
pub use logger::init_tracing;
pub use types::{
    Chat, Handler, HandlerResponse, Message, Middleware, ToCoreMessage, ToCoreUser, User,
};
