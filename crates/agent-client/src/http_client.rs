//! reqwest implementation of [`AgentClient`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::error::AgentError;
use crate::models::{
    ChatRequest, ChatResponse, CreateSessionRequest, CreateUserContextRequest, UserProfile,
};
use crate::AgentClient;

/// HTTP client for the agent service rooted at `base_url`.
#[derive(Debug, Clone)]
pub struct HttpAgentClient {
    client: Client,
    base_url: String,
    chat_timeout: Duration,
}

impl HttpAgentClient {
    /// Creates a client. `chat_timeout` applies to `/chat` only; agent turns can take minutes.
    pub fn new(base_url: impl Into<String>, chat_timeout: Duration) -> Result<Self, AgentError> {
        let client = Client::builder()
            .build()
            .map_err(|e| AgentError::Config(e.to_string()))?;
        Ok(Self::with_client(client, base_url, chat_timeout))
    }

    /// Creates a client around an existing reqwest client.
    pub fn with_client(client: Client, base_url: impl Into<String>, chat_timeout: Duration) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            chat_timeout,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// POSTs a create request; 201 Created and 409 Conflict (already exists) both succeed.
    async fn post_create<T>(
        &self,
        operation: &'static str,
        path: &str,
        body: &T,
    ) -> Result<(), AgentError>
    where
        T: Serialize + Sync,
    {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|source| AgentError::Request { operation, source })?;

        match response.status() {
            StatusCode::CREATED => Ok(()),
            StatusCode::CONFLICT => {
                debug!(operation, "Agent resource already exists");
                Ok(())
            }
            status => Err(AgentError::Status {
                operation,
                status,
                body: response.text().await.unwrap_or_default(),
            }),
        }
    }
}

#[async_trait]
impl AgentClient for HttpAgentClient {
    #[instrument(skip(self, user_profile))]
    async fn create_user_context(
        &self,
        user_id: &str,
        user_profile: Option<&UserProfile>,
    ) -> Result<(), AgentError> {
        let request = CreateUserContextRequest {
            user_id,
            user_profile,
        };
        self.post_create("create user context", "user_context", &request)
            .await?;
        info!("step: agent user context ready");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn create_session(&self, user_id: &str, session_id: &str) -> Result<(), AgentError> {
        let request = CreateSessionRequest {
            user_id,
            session_id,
        };
        self.post_create("create session", "session", &request).await?;
        info!("step: agent session ready");
        Ok(())
    }

    #[instrument(skip(self, message), fields(message_len = message.len()))]
    async fn generate_response(
        &self,
        session_id: &str,
        message: &str,
    ) -> Result<String, AgentError> {
        const OPERATION: &str = "generate AI response";

        let request = ChatRequest {
            session_id,
            message,
        };
        let response = self
            .client
            .post(self.url("chat"))
            .json(&request)
            .timeout(self.chat_timeout)
            .send()
            .await
            .map_err(|source| AgentError::Request {
                operation: OPERATION,
                source,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(AgentError::Status {
                operation: OPERATION,
                status,
                body: response.text().await.unwrap_or_default(),
            });
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| AgentError::Decode(e.to_string()))?;
        let reply = body.response.ok_or(AgentError::MissingResponse)?;

        info!(reply_len = reply.len(), "step: agent reply received");
        Ok(reply)
    }
}
