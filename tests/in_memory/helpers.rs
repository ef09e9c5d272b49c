//! Shared test helpers for in-memory board integration tests.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use rstest::fixture;
use storyboard::board::{
    adapters::memory::{InMemoryContentRepository, RecordingNotifier},
    domain::{ContentId, ContentItem, ContentStatus, NewContent, Platform, WorkspaceId},
    ports::{ContentRepository, ContentRepositoryResult, FetchedItems},
    services::BoardController,
};
use tokio::sync::oneshot;

/// Workspace used by the in-memory tests.
pub const WORKSPACE: WorkspaceId = WorkspaceId::new(3);

/// Builds a card of `WORKSPACE`.
#[must_use]
pub fn card(id: u64, status: ContentStatus) -> ContentItem {
    ContentItem::new(
        ContentId::new(id),
        WORKSPACE,
        Platform::YouTube,
        "short",
        format!("Card {id}"),
        status,
    )
}

/// Converts raw numbers into identifiers.
#[must_use]
pub fn ids(raw: &[u64]) -> Vec<ContentId> {
    raw.iter().copied().map(ContentId::new).collect()
}

/// Provides a backend with three ideas, one production card and one
/// review card.
#[fixture]
pub fn repository() -> InMemoryContentRepository {
    InMemoryContentRepository::with_items([
        card(101, ContentStatus::Idea),
        card(102, ContentStatus::Idea),
        card(103, ContentStatus::Idea),
        card(201, ContentStatus::Production),
        card(301, ContentStatus::Review),
    ])
}

/// Test-side handles of a held call.
pub struct GateHandle {
    /// Resolves once the held call has reached the gate.
    pub started: oneshot::Receiver<()>,
    /// Lets the held call continue.
    pub release: oneshot::Sender<()>,
}

struct Gate {
    started: oneshot::Sender<()>,
    release: oneshot::Receiver<()>,
}

impl Gate {
    fn pair() -> (Self, GateHandle) {
        let (started_tx, started_rx) = oneshot::channel();
        let (release_tx, release_rx) = oneshot::channel();
        (
            Self {
                started: started_tx,
                release: release_rx,
            },
            GateHandle {
                started: started_rx,
                release: release_tx,
            },
        )
    }

    async fn pass(self) {
        if self.started.send(()).is_ok() {
            self.release.await.ok();
        }
    }
}

/// Wraps the in-memory backend and lets tests hold single calls open.
///
/// A held fetch reads the backend first and waits afterwards, so it
/// returns the state from before the wait. A held move waits before it
/// reaches the backend.
pub struct GatedContentRepository {
    inner: InMemoryContentRepository,
    fetch_gate: Mutex<Option<Gate>>,
    move_gate: Mutex<Option<Gate>>,
}

impl GatedContentRepository {
    /// Wraps `inner`.
    #[must_use]
    pub const fn new(inner: InMemoryContentRepository) -> Self {
        Self {
            inner,
            fetch_gate: Mutex::new(None),
            move_gate: Mutex::new(None),
        }
    }

    /// Returns the wrapped backend.
    #[must_use]
    pub const fn inner(&self) -> &InMemoryContentRepository {
        &self.inner
    }

    /// Holds the next fetch open until released.
    #[must_use]
    pub fn hold_next_fetch(&self) -> GateHandle {
        Self::arm(&self.fetch_gate)
    }

    /// Holds the next move open until released.
    #[must_use]
    pub fn hold_next_move(&self) -> GateHandle {
        Self::arm(&self.move_gate)
    }

    fn arm(slot: &Mutex<Option<Gate>>) -> GateHandle {
        let (gate, handle) = Gate::pair();
        *slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(gate);
        handle
    }

    fn take(slot: &Mutex<Option<Gate>>) -> Option<Gate> {
        slot.lock().unwrap_or_else(PoisonError::into_inner).take()
    }
}

#[async_trait]
impl ContentRepository for GatedContentRepository {
    async fn fetch_items(&self, workspace: WorkspaceId) -> ContentRepositoryResult<FetchedItems> {
        let fetched = self.inner.fetch_items(workspace).await;
        if let Some(gate) = Self::take(&self.fetch_gate) {
            gate.pass().await;
        }
        fetched
    }

    async fn create_item(
        &self,
        workspace: WorkspaceId,
        content: &NewContent,
    ) -> ContentRepositoryResult<ContentItem> {
        self.inner.create_item(workspace, content).await
    }

    async fn move_item(&self, id: ContentId, to: ContentStatus) -> ContentRepositoryResult<()> {
        if let Some(gate) = Self::take(&self.move_gate) {
            gate.pass().await;
        }
        self.inner.move_item(id, to).await
    }

    async fn persist_order(
        &self,
        workspace: WorkspaceId,
        status: ContentStatus,
        ordered: Vec<ContentId>,
    ) -> ContentRepositoryResult<()> {
        self.inner.persist_order(workspace, status, ordered).await
    }
}

/// Controller over the gated backend plus its collaborators.
pub struct GatedHarness {
    pub repository: Arc<GatedContentRepository>,
    pub notifier: Arc<RecordingNotifier>,
    pub controller: BoardController<GatedContentRepository, RecordingNotifier>,
}

/// Provides a controller whose backend calls can be held open.
#[fixture]
pub fn gated(repository: InMemoryContentRepository) -> GatedHarness {
    let gated_repository = Arc::new(GatedContentRepository::new(repository));
    let notifier = Arc::new(RecordingNotifier::new());
    let controller = BoardController::new(
        Arc::clone(&gated_repository),
        Arc::clone(&notifier),
        WORKSPACE,
    );
    GatedHarness {
        repository: gated_repository,
        notifier,
        controller,
    }
}
