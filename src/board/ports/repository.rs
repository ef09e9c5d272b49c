//! Persistence port for board content.

use crate::board::domain::{
    ContentId, ContentItem, ContentStatus, FieldErrors, HiddenItem, NewContent, WorkspaceId,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Result type for content repository operations.
pub type ContentRepositoryResult<T> = Result<T, ContentRepositoryError>;

/// Pagination metadata returned alongside a content listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Page the listing starts at.
    #[serde(default)]
    pub current_page: u64,
    /// Last available page.
    #[serde(default)]
    pub last_page: u64,
    /// Page size.
    #[serde(default)]
    pub per_page: u64,
    /// Total number of items.
    #[serde(default)]
    pub total: u64,
}

/// Items of one workspace as returned by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedItems {
    /// Items with a recognised status, in server order.
    pub items: Vec<ContentItem>,
    /// Items whose status matches no board column.
    pub hidden: Vec<HiddenItem>,
    /// Pagination metadata, when the server sent it.
    pub meta: Option<PageMeta>,
}

impl FetchedItems {
    /// Wraps a plain item list with no hidden items and no metadata.
    #[must_use]
    pub const fn from_items(items: Vec<ContentItem>) -> Self {
        Self {
            items,
            hidden: Vec::new(),
            meta: None,
        }
    }
}

/// Backend contract consumed by the board controller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Fetches every item of `workspace`.
    ///
    /// # Errors
    ///
    /// Returns [`ContentRepositoryError`] when the backend cannot be reached
    /// or answers with an error.
    async fn fetch_items(&self, workspace: WorkspaceId) -> ContentRepositoryResult<FetchedItems>;

    /// Creates a new item in the `idea` column of `workspace`.
    ///
    /// # Errors
    ///
    /// Returns [`ContentRepositoryError::Validation`] when the backend
    /// rejects individual fields, or another variant for any other failure.
    async fn create_item(
        &self,
        workspace: WorkspaceId,
        content: &NewContent,
    ) -> ContentRepositoryResult<ContentItem>;

    /// Changes the status of `id` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`ContentRepositoryError::NotFound`] when the item does not
    /// exist, or another variant for any other failure.
    async fn move_item(&self, id: ContentId, to: ContentStatus) -> ContentRepositoryResult<()>;

    /// Records the display order of one column.
    ///
    /// Backends without a sort order may treat this as a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`ContentRepositoryError`] when a backend that does store
    /// order fails to do so.
    async fn persist_order(
        &self,
        workspace: WorkspaceId,
        status: ContentStatus,
        ordered: Vec<ContentId>,
    ) -> ContentRepositoryResult<()>;
}

/// Errors returned by content repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ContentRepositoryError {
    /// The backend rejected individual fields.
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    /// The item does not exist.
    #[error("content not found: {0}")]
    NotFound(ContentId),

    /// The backend answered with a non-success status.
    #[error("request rejected with status {status}: {message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Server message, or a generic description.
        message: String,
    },

    /// The backend answered with a body that does not match the schema.
    #[error("malformed response: {0}")]
    Decode(String),

    /// Transport or storage failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ContentRepositoryError {
    /// Wraps a transport or storage error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Returns the message to show a user for this failure.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Validation(errors) => errors
                .first_message()
                .map_or_else(|| fallback.to_owned(), str::to_owned),
            Self::Rejected { message, .. } if !message.trim().is_empty() => message.clone(),
            _ => fallback.to_owned(),
        }
    }
}
