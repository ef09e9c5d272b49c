//! Session lifecycle service.
//!
//! The service is constructed once and handed by reference to whatever
//! needs the signed-in user; nothing reads session state from globals.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::session::{
    domain::{AccessToken, AuthUser, Credentials, Persistence, SessionDomainError},
    ports::{AuthGateway, AuthGatewayError, TokenStore, TokenStoreError},
};

/// Service-level errors for session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Input validation failed before any network call.
    #[error(transparent)]
    Domain(#[from] SessionDomainError),
    /// The login endpoint refused or failed.
    #[error(transparent)]
    Gateway(#[from] AuthGatewayError),
    /// The token store failed.
    #[error(transparent)]
    Store(#[from] TokenStoreError),
}

/// Result type for session service operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Login, logout and current-user lookup.
#[derive(Clone)]
pub struct SessionService<G, S>
where
    G: AuthGateway,
    S: TokenStore,
{
    gateway: Arc<G>,
    store: Arc<S>,
}

impl<G, S> SessionService<G, S>
where
    G: AuthGateway,
    S: TokenStore,
{
    /// Creates a session service.
    #[must_use]
    pub const fn new(gateway: Arc<G>, store: Arc<S>) -> Self {
        Self { gateway, store }
    }

    /// Signs in and stores the session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Domain`] for a blank e-mail or password
    /// without contacting the backend, [`SessionError::Gateway`] when the
    /// backend refuses, or [`SessionError::Store`] when the session cannot
    /// be kept.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        persistence: Persistence,
    ) -> SessionResult<Option<AuthUser>> {
        let credentials = Credentials::new(email, password)?;
        let session = match self.gateway.login(&credentials).await {
            Ok(session) => session,
            Err(err) => {
                warn!(email = credentials.email(), error = %err, "login failed");
                return Err(err.into());
            }
        };
        let user = session.user.clone();
        self.store.save(session, persistence)?;
        info!(email = credentials.email(), ?persistence, "signed in");
        Ok(user)
    }

    /// Forgets the stored session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Store`] when the store cannot be cleared.
    pub fn logout(&self) -> SessionResult<()> {
        self.store.clear()?;
        info!("signed out");
        Ok(())
    }

    /// Returns the signed-in user, if the backend reported one.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Store`] when the store cannot be read.
    pub fn current_user(&self) -> SessionResult<Option<AuthUser>> {
        Ok(self.store.load()?.and_then(|session| session.user))
    }

    /// Returns the current access token.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Store`] when the store cannot be read.
    pub fn access_token(&self) -> SessionResult<Option<AccessToken>> {
        Ok(self.store.load()?.map(|session| session.token))
    }

    /// Returns `true` when a token is stored.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.store.load().is_ok_and(|session| session.is_some())
    }

    /// Returns `true` when the signed-in user is an administrator.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.current_user()
            .is_ok_and(|user| user.is_some_and(|signed_in| signed_in.is_admin()))
    }
}
