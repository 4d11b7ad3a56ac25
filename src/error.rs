//! Error types for mail-sorter.

use std::time::Duration;

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// LLM provider errors.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Provider {provider} request failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("Provider {provider} rate limited, retry after {retry_after:?}")]
    RateLimited {
        provider: String,
        retry_after: Option<Duration>,
    },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },

    #[error("Authentication failed for provider {provider}")]
    AuthFailed { provider: String },
}

/// Classification relay errors.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("Classification failed: {0}")]
    Llm(#[from] LlmError),

    #[error("Unrecognized category: {0}")]
    UnrecognizedCategory(String),
}

impl RelayError {
    /// Message sent back to relay clients. Provider details stay server-side.
    pub fn public_message(&self) -> String {
        match self {
            Self::Llm(_) => "Classification failed".to_string(),
            Self::UnrecognizedCategory(reply) => format!("Unrecognized category: {reply}"),
        }
    }
}

/// Failures reported by the host mail client.
#[derive(Debug, Clone, thiserror::Error)]
pub enum HostError {
    #[error("Failed to read message body: {0}")]
    Body(String),

    #[error("Token request failed: {0}")]
    Token(String),
}

/// Folder-routing workflow errors.
///
/// The `Display` text is what ends up in the status area, so the common
/// variants carry the exact user-facing message.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("{0}")]
    Host(#[from] HostError),

    #[error("API request failed")]
    ApiRequestFailed,

    #[error("Invalid classification response: {0}")]
    InvalidResponse(String),

    #[error("Could not get access token")]
    AccessToken,

    #[error("Failed to get folders")]
    ListFolders,

    #[error("Failed to create folder")]
    CreateFolder,

    #[error("Failed to move email")]
    MoveFailed,

    #[error("Failed to delete folder")]
    DeleteFolder,
}
