//! Request and response bodies of the agent service.

use serde::{Deserialize, Serialize};

/// Profile attached to a new user context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub first_name: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateUserContextRequest<'a> {
    pub user_id: &'a str,
    pub user_profile: Option<&'a UserProfile>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateSessionRequest<'a> {
    pub user_id: &'a str,
    pub session_id: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub session_id: &'a str,
    pub message: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    #[serde(default)]
    pub response: Option<String>,
}
