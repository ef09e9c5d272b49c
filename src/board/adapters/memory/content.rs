//! In-memory content backend for tests and offline demos.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::board::{
    domain::{
        ContentId, ContentItem, ContentStatus, FieldErrors, HiddenItem, NewContent, WorkspaceId,
    },
    ports::{ContentRepository, ContentRepositoryError, ContentRepositoryResult, FetchedItems},
};

const UNAVAILABLE: u16 = 503;

/// Thread-safe in-memory content backend.
///
/// Items keep insertion order, which stands in for server order. Failures
/// can be scripted per operation to exercise rollback paths.
#[derive(Debug, Clone, Default)]
pub struct InMemoryContentRepository {
    state: Arc<RwLock<InMemoryContentState>>,
}

#[derive(Debug, Default)]
struct InMemoryContentState {
    items: Vec<ContentItem>,
    hidden: Vec<HiddenItem>,
    last_id: u64,
    orders: HashMap<ContentStatus, Vec<ContentId>>,
    moves: Vec<(ContentId, ContentStatus)>,
    fetches: usize,
    failures: ScriptedFailures,
}

#[derive(Debug, Default)]
struct ScriptedFailures {
    fetch: bool,
    create: bool,
    create_rejection: Option<FieldErrors>,
    moves: bool,
    order: bool,
}

fn lock_error(err: impl ToString) -> ContentRepositoryError {
    ContentRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

fn unavailable(operation: &str) -> ContentRepositoryError {
    ContentRepositoryError::Rejected {
        status: UNAVAILABLE,
        message: format!("{operation} unavailable"),
    }
}

impl InMemoryContentRepository {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend holding `items` in the given order.
    #[must_use]
    pub fn with_items(items: impl IntoIterator<Item = ContentItem>) -> Self {
        let repository = Self::new();
        for item in items {
            repository.seed(item);
        }
        repository
    }

    /// Appends `item` to the stored list.
    pub fn seed(&self, item: ContentItem) {
        self.with_state(|state| {
            state.last_id = state.last_id.max(item.id().value());
            state.items.push(item);
        });
    }

    /// Stores an item whose status the board does not recognise.
    pub fn seed_hidden(&self, hidden: HiddenItem) {
        self.with_state(|state| {
            state.last_id = state.last_id.max(hidden.id.value());
            state.hidden.push(hidden);
        });
    }

    /// Makes the next fetch fail.
    pub fn fail_next_fetch(&self) {
        self.with_state(|state| state.failures.fetch = true);
    }

    /// Makes the next create fail with a generic error.
    pub fn fail_next_create(&self) {
        self.with_state(|state| state.failures.create = true);
    }

    /// Makes the next create fail with field errors.
    pub fn reject_next_create(&self, errors: FieldErrors) {
        self.with_state(|state| state.failures.create_rejection = Some(errors));
    }

    /// Makes the next move fail.
    pub fn fail_next_move(&self) {
        self.with_state(|state| state.failures.moves = true);
    }

    /// Makes the next order update fail.
    pub fn fail_next_order(&self) {
        self.with_state(|state| state.failures.order = true);
    }

    /// Returns the stored items in server order.
    #[must_use]
    pub fn items(&self) -> Vec<ContentItem> {
        self.with_state(|state| state.items.clone())
    }

    /// Returns the stored status of `id`.
    #[must_use]
    pub fn status_of(&self, id: ContentId) -> Option<ContentStatus> {
        self.with_state(|state| {
            state
                .items
                .iter()
                .find(|item| item.id() == id)
                .map(ContentItem::status)
        })
    }

    /// Returns every accepted move in call order.
    #[must_use]
    pub fn recorded_moves(&self) -> Vec<(ContentId, ContentStatus)> {
        self.with_state(|state| state.moves.clone())
    }

    /// Returns the last order recorded for `status`.
    #[must_use]
    pub fn recorded_order(&self, status: ContentStatus) -> Option<Vec<ContentId>> {
        self.with_state(|state| state.orders.get(&status).cloned())
    }

    /// Returns how many fetches were served or attempted.
    #[must_use]
    pub fn fetch_count(&self) -> usize {
        self.with_state(|state| state.fetches)
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut InMemoryContentState) -> T) -> T {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }
}

fn build_item(id: ContentId, workspace: WorkspaceId, content: &NewContent) -> ContentItem {
    let mut item = ContentItem::new(
        id,
        workspace,
        content.platform,
        content.content_type.clone(),
        content.title.clone(),
        ContentStatus::Idea,
    )
    .with_tags(content.tags.clone());
    if let Some(priority) = content.priority {
        item = item.with_priority(priority);
    }
    if let Some(assignee) = content.assignee_id {
        item = item.with_assignee_id(assignee);
    }
    if let Some(due_at) = content.due_at {
        item = item.with_due_at(due_at.and_utc());
    }
    if let Some(scheduled_at) = content.scheduled_at {
        item = item.with_scheduled_at(scheduled_at.and_utc());
    }
    item
}

#[async_trait]
impl ContentRepository for InMemoryContentRepository {
    async fn fetch_items(&self, workspace: WorkspaceId) -> ContentRepositoryResult<FetchedItems> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.fetches += 1;
        if std::mem::take(&mut state.failures.fetch) {
            return Err(unavailable("fetch"));
        }
        let items = state
            .items
            .iter()
            .filter(|item| item.workspace_id() == workspace)
            .cloned()
            .collect();
        Ok(FetchedItems {
            items,
            hidden: state.hidden.clone(),
            meta: None,
        })
    }

    async fn create_item(
        &self,
        workspace: WorkspaceId,
        content: &NewContent,
    ) -> ContentRepositoryResult<ContentItem> {
        let mut state = self.state.write().map_err(lock_error)?;
        if let Some(errors) = state.failures.create_rejection.take() {
            return Err(ContentRepositoryError::Validation(errors));
        }
        if std::mem::take(&mut state.failures.create) {
            return Err(unavailable("create"));
        }
        state.last_id += 1;
        let item = build_item(ContentId::new(state.last_id), workspace, content);
        state.items.push(item.clone());
        Ok(item)
    }

    async fn move_item(&self, id: ContentId, to: ContentStatus) -> ContentRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if std::mem::take(&mut state.failures.moves) {
            return Err(unavailable("move"));
        }
        let stored = state
            .items
            .iter_mut()
            .find(|item| item.id() == id)
            .ok_or(ContentRepositoryError::NotFound(id))?;
        *stored = stored.with_status(to);
        state.moves.push((id, to));
        Ok(())
    }

    async fn persist_order(
        &self,
        _workspace: WorkspaceId,
        status: ContentStatus,
        ordered: Vec<ContentId>,
    ) -> ContentRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if std::mem::take(&mut state.failures.order) {
            return Err(unavailable("reorder"));
        }
        state.orders.insert(status, ordered);
        Ok(())
    }
}
