//! # Agent service client
//!
//! Defines the [`AgentClient`] trait and an HTTP implementation, [`HttpAgentClient`].
//! Transport-agnostic callers (the bot service) hold `Arc<dyn AgentClient>` so tests can swap in
//! a stub.
//!
//! The agent service exposes three JSON endpoints:
//!
//! - `POST /user_context` – create the agent-side user (201, or 409 when it already exists)
//! - `POST /session` – create the chat session for that user (201, or 409)
//! - `POST /chat` – send one message, receive `{"response": "..."}` (200)

use async_trait::async_trait;

mod error;
mod http_client;
mod models;

pub use error::AgentError;
pub use http_client::HttpAgentClient;
pub use models::UserProfile;

/// Agent service operations used by the bot.
#[async_trait]
pub trait AgentClient: Send + Sync {
    /// Creates the agent-side user context. Succeeds if it already exists.
    async fn create_user_context(
        &self,
        user_id: &str,
        user_profile: Option<&UserProfile>,
    ) -> Result<(), AgentError>;

    /// Creates a chat session for `user_id`. Succeeds if it already exists.
    async fn create_session(&self, user_id: &str, session_id: &str) -> Result<(), AgentError>;

    /// Sends `message` in `session_id` and returns the agent's Markdown reply.
    async fn generate_response(&self, session_id: &str, message: &str)
        -> Result<String, AgentError>;
}
