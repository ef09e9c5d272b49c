//! Login endpoint adapter.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::sync::Arc;

use crate::http::{ApiClient, ErrorBody, HttpClientError};
use crate::session::{
    domain::{AccessToken, AuthUser, Credentials, StoredSession},
    ports::{AuthGateway, AuthGatewayError},
};

const LOGIN_PATH: &str = "/auth/login";

/// Successful login response: `{ "token": "...", "user": { ... } }`.
#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: AccessToken,
    #[serde(default)]
    user: Option<AuthUser>,
}

/// [`AuthGateway`] backed by `POST /auth/login`.
#[derive(Debug, Clone)]
pub struct HttpAuthGateway {
    client: ApiClient,
}

impl HttpAuthGateway {
    /// Creates a gateway using `client`.
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

fn map_login_error(err: HttpClientError) -> AuthGatewayError {
    match err {
        HttpClientError::Status { status, .. } if status == StatusCode::UNAUTHORIZED => {
            AuthGatewayError::InvalidCredentials
        }
        HttpClientError::Status { status, body } if status == StatusCode::UNPROCESSABLE_ENTITY => {
            let parsed = ErrorBody::parse(&body);
            let details = parsed.details();
            let message = ["email", "password"]
                .iter()
                .find_map(|field| details.get(*field).and_then(|messages| messages.first()))
                .cloned()
                .or_else(|| parsed.message().map(str::to_owned))
                .unwrap_or_else(|| "login data is not valid".to_owned());
            AuthGatewayError::Invalid(message)
        }
        HttpClientError::Status { status, body } => AuthGatewayError::Rejected(
            ErrorBody::parse(&body)
                .message()
                .map_or_else(|| format!("status {}", status.as_u16()), str::to_owned),
        ),
        HttpClientError::Transport(source) => AuthGatewayError::Transport(Arc::new(source)),
        HttpClientError::Config(message) => AuthGatewayError::Rejected(message),
    }
}

#[async_trait]
impl AuthGateway for HttpAuthGateway {
    async fn login(&self, credentials: &Credentials) -> Result<StoredSession, AuthGatewayError> {
        let response: LoginResponse = self
            .client
            .post_json(LOGIN_PATH, credentials)
            .await
            .map_err(map_login_error)?;
        Ok(StoredSession {
            token: response.token,
            user: response.user,
        })
    }
}
