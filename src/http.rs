//! Shared REST client for backend adapters.
//!
//! Every request carries `Accept: application/json` and, when the injected
//! token store holds a session, a bearer token. Non-success responses are
//! returned as [`HttpClientError::Status`] with the raw body so adapters can
//! decode their own error schema.

use crate::config::ClientConfig;
use crate::session::ports::TokenStore;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Errors raised by [`ApiClient`].
#[derive(Debug, Error)]
pub enum HttpClientError {
    /// Transport failure, timeout or undecodable body.
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status {
        /// Response status.
        status: StatusCode,
        /// Raw response body.
        body: String,
    },

    /// The client could not be built from configuration.
    #[error("client configuration error: {0}")]
    Config(String),
}

/// Error body shared by backend endpoints.
///
/// ```json
/// { "message": "...", "error": { "type": "validation", "details": { "title": ["..."] } } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    /// Human-readable summary.
    #[serde(default)]
    pub message: Option<String>,
    /// Structured error, when present.
    #[serde(default)]
    pub error: Option<ErrorDetail>,
}

/// Structured part of an [`ErrorBody`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorDetail {
    /// Error category, for example `validation`.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// Messages keyed by field name.
    #[serde(default)]
    pub details: BTreeMap<String, Vec<String>>,
}

impl ErrorBody {
    /// Parses a response body; anything that is not the documented shape
    /// yields an empty body.
    #[must_use]
    pub fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    /// Returns the field messages, empty when there are none.
    #[must_use]
    pub fn details(&self) -> BTreeMap<String, Vec<String>> {
        self.error
            .as_ref()
            .map(|error| error.details.clone())
            .unwrap_or_default()
    }

    /// Returns the summary message, if it is not blank.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .filter(|message| !message.trim().is_empty())
    }
}

/// JSON REST client bound to one backend.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Builds a client for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns [`HttpClientError::Transport`] when the TLS backend cannot be
    /// initialised.
    pub fn new(config: &ClientConfig, tokens: Arc<dyn TokenStore>) -> Result<Self, HttpClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .default_headers(headers)
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url().to_owned(),
            tokens,
        })
    }

    /// Returns the base URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends a `GET` and decodes the JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpClientError`] on transport failure, non-success status
    /// or an undecodable body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, HttpClientError> {
        let request = self.request(Method::GET, path)?;
        Self::parse_response(request.send().await?).await
    }

    /// Sends a JSON `POST` and decodes the JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpClientError`] on transport failure, non-success status
    /// or an undecodable body.
    pub async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T, HttpClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request = self.request(Method::POST, path)?.json(body);
        Self::parse_response(request.send().await?).await
    }

    /// Sends a JSON `PATCH`, discarding the response body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpClientError`] on transport failure or non-success
    /// status.
    pub async fn patch_json<B>(&self, path: &str, body: &B) -> Result<(), HttpClientError>
    where
        B: Serialize + ?Sized,
    {
        let request = self.request(Method::PATCH, path)?.json(body);
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body_text = response.text().await?;
        Err(HttpClientError::Status {
            status,
            body: body_text,
        })
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, HttpClientError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "backend request");
        let mut request = self.client.request(method, url);
        let session = self
            .tokens
            .load()
            .map_err(|err| HttpClientError::Config(err.to_string()))?;
        if let Some(stored) = session {
            let value = HeaderValue::from_str(&format!("Bearer {}", stored.token.expose()))
                .map_err(|err| HttpClientError::Config(err.to_string()))?;
            request = request.header(AUTHORIZATION, value);
        }
        Ok(request)
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, HttpClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }
        let body = response.text().await?;
        Err(HttpClientError::Status { status, body })
    }
}
