//! Signed-in user, access token and login credentials.

use super::SessionDomainError;
use crate::board::domain::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role granted by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// Administrator with access to user and workspace management.
    Admin,
    /// Regular workspace member.
    User,
    /// Any role this client does not know.
    Other(String),
}

impl Role {
    /// Returns the wire representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "admin" => Self::Admin,
            "user" => Self::User,
            _ => Self::Other(value),
        }
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        value.as_str().to_owned()
    }
}

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    /// User identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Login e-mail.
    pub email: String,
    /// Granted role.
    pub role: Role,
}

impl AuthUser {
    /// Returns `true` for administrators.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Bearer token issued at login. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccessToken(String);

impl AccessToken {
    /// Wraps a token.
    ///
    /// # Errors
    ///
    /// Returns [`SessionDomainError::EmptyToken`] for a blank token.
    pub fn new(value: impl Into<String>) -> Result<Self, SessionDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(SessionDomainError::EmptyToken);
        }
        Ok(Self(raw))
    }

    /// Returns the secret for use in an `Authorization` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AccessToken {
    type Error = SessionDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AccessToken> for String {
    fn from(value: AccessToken) -> Self {
        value.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// How long a session outlives the current client run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Persistence {
    /// Keep the session across restarts ("remember me").
    #[default]
    Remember,
    /// Drop the session when the client exits.
    SessionOnly,
}

/// Token and user kept by a token store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    /// Bearer token.
    pub token: AccessToken,
    /// Signed-in user, when the backend returned one.
    pub user: Option<AuthUser>,
}

/// Login form input. `Debug` never prints the password.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    /// Creates credentials, trimming the e-mail.
    ///
    /// # Errors
    ///
    /// Returns [`SessionDomainError::MissingCredentials`] when either value
    /// is blank.
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, SessionDomainError> {
        let email_raw = email.into();
        let password_raw = password.into();
        let trimmed = email_raw.trim();
        if trimmed.is_empty() || password_raw.is_empty() {
            return Err(SessionDomainError::MissingCredentials);
        }
        Ok(Self {
            email: trimmed.to_owned(),
            password: password_raw,
        })
    }

    /// Returns the login e-mail.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}
