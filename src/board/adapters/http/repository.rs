//! [`ContentRepository`] backed by the REST backend.

use async_trait::async_trait;
use reqwest::StatusCode;
use std::sync::Arc;
use tracing::debug;

use super::wire::{CreateBody, ItemEnvelope, ListEnvelope, MoveBody};
use crate::board::{
    domain::{ContentId, ContentItem, ContentStatus, FieldErrors, NewContent, WorkspaceId},
    ports::{ContentRepository, ContentRepositoryError, ContentRepositoryResult, FetchedItems},
};
use crate::http::{ApiClient, ErrorBody, HttpClientError};

/// REST content backend.
///
/// Endpoints:
/// - `GET /workspace/{id}/contents`
/// - `POST /workspace/{id}/contents`
/// - `PATCH /contents/{id}/move` with `{ "status": ... }`
#[derive(Debug, Clone)]
pub struct HttpContentRepository {
    client: ApiClient,
}

impl HttpContentRepository {
    /// Creates a repository using `client`.
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

fn contents_path(workspace: WorkspaceId) -> String {
    format!("/workspace/{workspace}/contents")
}

fn move_path(id: ContentId) -> String {
    format!("/contents/{id}/move")
}

fn map_error(err: HttpClientError, subject: Option<ContentId>) -> ContentRepositoryError {
    match err {
        HttpClientError::Status { status, body } => {
            let parsed = ErrorBody::parse(&body);
            match (status, subject) {
                (StatusCode::UNPROCESSABLE_ENTITY, _) => {
                    let mut errors = FieldErrors::new();
                    for (field, messages) in parsed.details() {
                        for message in messages {
                            errors.add(field.clone(), message);
                        }
                    }
                    if errors.is_empty() {
                        ContentRepositoryError::Rejected {
                            status: status.as_u16(),
                            message: parsed.message().unwrap_or_default().to_owned(),
                        }
                    } else {
                        ContentRepositoryError::Validation(errors)
                    }
                }
                (StatusCode::NOT_FOUND, Some(id)) => ContentRepositoryError::NotFound(id),
                _ => ContentRepositoryError::Rejected {
                    status: status.as_u16(),
                    message: parsed.message().unwrap_or_default().to_owned(),
                },
            }
        }
        HttpClientError::Transport(source) if source.is_decode() => {
            ContentRepositoryError::Decode(source.to_string())
        }
        HttpClientError::Transport(source) => ContentRepositoryError::Persistence(Arc::new(source)),
        HttpClientError::Config(message) => {
            ContentRepositoryError::persistence(std::io::Error::other(message))
        }
    }
}

#[async_trait]
impl ContentRepository for HttpContentRepository {
    async fn fetch_items(&self, workspace: WorkspaceId) -> ContentRepositoryResult<FetchedItems> {
        let envelope: ListEnvelope = self
            .client
            .get_json(&contents_path(workspace))
            .await
            .map_err(|err| map_error(err, None))?;
        Ok(envelope.into_fetched())
    }

    async fn create_item(
        &self,
        workspace: WorkspaceId,
        content: &NewContent,
    ) -> ContentRepositoryResult<ContentItem> {
        let envelope: ItemEnvelope = self
            .client
            .post_json(&contents_path(workspace), &CreateBody::new(content))
            .await
            .map_err(|err| map_error(err, None))?;
        envelope.into_item()
    }

    async fn move_item(&self, id: ContentId, to: ContentStatus) -> ContentRepositoryResult<()> {
        self.client
            .patch_json(&move_path(id), &MoveBody::new(to))
            .await
            .map_err(|err| map_error(err, Some(id)))
    }

    async fn persist_order(
        &self,
        workspace: WorkspaceId,
        status: ContentStatus,
        ordered: Vec<ContentId>,
    ) -> ContentRepositoryResult<()> {
        debug!(
            %workspace,
            %status,
            items = ordered.len(),
            "backend keeps no column order; order stays local"
        );
        Ok(())
    }
}
