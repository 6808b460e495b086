//! Identity contract and explicit session state
//!
//! A [`Session`] is an ordinary value handed to whatever needs to know who
//! is signed in. There is no ambient global.

use crate::client::AdminInfo;
use crate::error::{AppError, ErrorCode};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Wrong email or password; shown on the login surface only
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Authentication service unavailable: {0}")]
    Unavailable(String),
}

/// Sign-in / sign-out against an identity service
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<AdminInfo, AuthError>;

    async fn logout(&self) -> Result<(), AuthError>;
}

/// Who is signed in, and whether that is still being determined
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub is_authenticated: bool,
    pub loading: bool,
    pub user: Option<AdminInfo>,
}

impl Session {
    /// Initial state while a stored credential is being checked
    pub fn pending() -> Self {
        Self {
            is_authenticated: false,
            loading: true,
            user: None,
        }
    }

    pub fn signed_out() -> Self {
        Self::default()
    }

    pub fn signed_in(user: AdminInfo) -> Self {
        Self {
            is_authenticated: true,
            loading: false,
            user: Some(user),
        }
    }

    /// Sign in through `provider`
    ///
    /// On failure the session ends up signed out and the error is returned
    /// for the login surface to display.
    pub async fn login(
        &mut self,
        provider: &dyn IdentityProvider,
        email: &str,
        password: &str,
    ) -> Result<(), AuthError> {
        self.loading = true;
        match provider.login(email, password).await {
            Ok(user) => {
                *self = Self::signed_in(user);
                Ok(())
            }
            Err(e) => {
                *self = Self::signed_out();
                Err(e)
            }
        }
    }

    /// Sign out through `provider`; the local session is cleared either way
    pub async fn logout(&mut self, provider: &dyn IdentityProvider) -> Result<(), AuthError> {
        let result = provider.logout().await;
        *self = Self::signed_out();
        result
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => AppError::invalid_credentials(),
            AuthError::Unavailable(msg) => AppError::store_unavailable(msg),
        }
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err.code {
            ErrorCode::InvalidCredentials => AuthError::InvalidCredentials,
            _ => AuthError::Unavailable(err.message),
        }
    }
}
