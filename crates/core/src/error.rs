//! Error types for the session core

use quill_http::ClientError;
use thiserror::Error;

/// A form was submitted with required fields left empty
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// User-facing message
    pub message: &'static str,
    /// Names of the offending fields
    pub missing: Vec<&'static str>,
}

impl ValidationError {
    pub const fn new(message: &'static str, missing: Vec<&'static str>) -> Self {
        Self { message, missing }
    }
}

/// Failures surfaced by the session coordinators
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("No signed-in user")]
    NoSession,

    #[error("The sign-in provider returned an unusable identity: {0}")]
    MalformedClaims(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Backend request failed: {0}")]
    Backend(ClientError),
}

impl From<ClientError> for SessionError {
    fn from(error: ClientError) -> Self {
        match error {
            ClientError::NoSession => Self::NoSession,
            ClientError::MalformedClaims(reason) => Self::MalformedClaims(reason.to_string()),
            other => Self::Backend(other),
        }
    }
}

/// Storage backend failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Storage error: {0}")]
pub struct StorageError(pub String);

pub type Result<T> = std::result::Result<T, SessionError>;
