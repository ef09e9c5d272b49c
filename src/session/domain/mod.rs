//! Domain model for authenticated sessions.

mod user;

pub use user::{AccessToken, AuthUser, Credentials, Persistence, Role, StoredSession};

use thiserror::Error;

/// Errors returned while constructing session values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionDomainError {
    /// The access token is blank.
    #[error("access token must not be empty")]
    EmptyToken,

    /// The e-mail or password is blank.
    #[error("email and password are required")]
    MissingCredentials,
}
