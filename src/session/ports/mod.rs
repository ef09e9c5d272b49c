//! Port contracts for session management.

use crate::session::domain::{Credentials, Persistence, StoredSession};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Storage for the current session.
///
/// Remembered sessions take precedence over session-only ones on load.
pub trait TokenStore: Send + Sync {
    /// Stores `session`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`TokenStoreError`] when the backing storage fails.
    fn save(&self, session: StoredSession, persistence: Persistence) -> Result<(), TokenStoreError>;

    /// Returns the current session, if any.
    ///
    /// # Errors
    ///
    /// Returns [`TokenStoreError`] when the backing storage fails.
    fn load(&self) -> Result<Option<StoredSession>, TokenStoreError>;

    /// Forgets every stored session.
    ///
    /// # Errors
    ///
    /// Returns [`TokenStoreError`] when the backing storage fails.
    fn clear(&self) -> Result<(), TokenStoreError>;
}

/// Storage failure of a [`TokenStore`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("token store error: {0}")]
pub struct TokenStoreError(pub String);

/// Backend login endpoint.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchanges credentials for a session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthGatewayError::InvalidCredentials`] for a wrong e-mail or
    /// password, [`AuthGatewayError::Invalid`] for rejected input, or
    /// another variant for any other failure.
    async fn login(&self, credentials: &Credentials) -> Result<StoredSession, AuthGatewayError>;
}

/// Errors returned by [`AuthGateway`] implementations.
#[derive(Debug, Clone, Error)]
pub enum AuthGatewayError {
    /// E-mail or password is wrong.
    #[error("email or password is incorrect")]
    InvalidCredentials,

    /// The backend rejected the submitted values.
    #[error("login rejected: {0}")]
    Invalid(String),

    /// The backend answered with an unexpected status or body.
    #[error("login failed: {0}")]
    Rejected(String),

    /// Transport failure.
    #[error("login transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}
