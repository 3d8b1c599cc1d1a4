use thiserror::Error;

use crate::models::Provider;

/// Errors surfaced by threadsmith operations
#[derive(Error, Debug)]
pub enum ThreadsmithError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Provider '{0}' is not available: no API key configured")]
    ProviderUnavailable(Provider),

    #[error("unknown provider '{0}' (expected gemini, openai or anthropic)")]
    UnknownProvider(String),

    #[error("No generation backend available: set GEMINI_API_KEY, OPENAI_API_KEY or ANTHROPIC_API_KEY")]
    NoBackendAvailable,

    #[error("{provider} request failed: {message}")]
    Backend { provider: Provider, message: String },

    #[error("Social API error: {0}")]
    Social(String),

    #[error("Validation error: {field} - {reason}")]
    Validation { field: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ThreadsmithError {
    pub fn backend(provider: Provider, message: impl Into<String>) -> Self {
        Self::Backend {
            provider,
            message: message.into(),
        }
    }

    pub fn validation(field: &str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ThreadsmithError>;
