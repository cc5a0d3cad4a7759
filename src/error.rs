//! Error types for stackref.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StackError {
    #[error("technology not found: {0}")]
    NotFound(String),

    /// An AI-dependent call was made while the AI layer is not ready.
    #[error("AI unavailable: {0}")]
    AiUnavailable(String),

    /// Transport, status or payload failure of the generative API.
    #[error("external call failed: {0}")]
    ExternalCall(String),

    #[error("invalid credential: {0}")]
    InvalidCredential(String),

    #[error("invalid knowledge base: {0}")]
    KnowledgeBase(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("missing configuration: {0}")]
    MissingConfig(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("credential store error: {0}")]
    CredentialStore(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl StackError {
    /// Stable machine-readable code used by robot output.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::AiUnavailable(_) => "ai_unavailable",
            Self::ExternalCall(_) => "external_call_failed",
            Self::InvalidCredential(_) => "invalid_credential",
            Self::KnowledgeBase(_) => "knowledge_base",
            Self::Config(_) | Self::MissingConfig(_) => "config",
            Self::Serialization(_) | Self::Json(_) => "serialization",
            Self::CredentialStore(_) => "credential_store",
            Self::Io(_) => "io",
        }
    }
}

pub type Result<T> = std::result::Result<T, StackError>;
