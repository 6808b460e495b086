//! Client error types

use shared::error::{AppError, ErrorCode};
use shared::session::AuthError;
use shared::store::StoreError;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure (connection refused, timeout, TLS)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Error reported by the server in the response envelope
    #[error("{0}")]
    Api(AppError),

    /// Success response body did not have the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    /// Server error code, if the server answered with one
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            ClientError::Api(err) => Some(err.code),
            _ => None,
        }
    }

    /// Whether the server rejected the bearer token
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self.code(),
            Some(ErrorCode::NotAuthenticated | ErrorCode::TokenExpired | ErrorCode::TokenInvalid)
        )
    }
}

impl From<ClientError> for StoreError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Api(app) => app.into(),
            other => StoreError::Unavailable(other.to_string()),
        }
    }
}

impl From<ClientError> for AuthError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Api(app) => app.into(),
            other => AuthError::Unavailable(other.to_string()),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
