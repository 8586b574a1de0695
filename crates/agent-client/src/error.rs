use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Failed to {operation}: {source}")]
    Request {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to {operation} with status code: {status} and text: {body}")]
    Status {
        operation: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("Failed to decode agent response: {0}")]
    Decode(String),

    #[error("Failed to extract AI response message")]
    MissingResponse,

    #[error("Invalid agent service configuration: {0}")]
    Config(String),
}
