//! Shared world state for board drag BDD scenarios.

use std::sync::Arc;

use eyre::eyre;
use rstest::fixture;
use storyboard::board::{
    adapters::memory::{InMemoryContentRepository, RecordingNotifier},
    domain::{ContentId, ContentItem, ContentStatus, DragOutcome, Platform, WorkspaceId},
    services::{BoardController, SyncOutcome},
};

/// Workspace every scenario runs in.
pub const WORKSPACE: WorkspaceId = WorkspaceId::new(7);

/// Controller type used by the BDD world.
pub type TestController = BoardController<InMemoryContentRepository, RecordingNotifier>;

/// Scenario world for board drag behaviour tests.
pub struct BoardWorld {
    pub repository: Arc<InMemoryContentRepository>,
    pub notifier: Arc<RecordingNotifier>,
    pub controller: TestController,
    pub last_outcome: Option<DragOutcome>,
}

impl BoardWorld {
    /// Creates a world with an empty backend.
    #[must_use]
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryContentRepository::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let controller =
            BoardController::new(Arc::clone(&repository), Arc::clone(&notifier), WORKSPACE);
        Self {
            repository,
            notifier,
            controller,
            last_outcome: None,
        }
    }

    /// Stores cards with `status` in the backend and reloads the board.
    pub fn seed(&self, status: ContentStatus, ids: &[ContentId]) -> Result<(), eyre::Report> {
        for id in ids {
            self.repository.seed(ContentItem::new(
                *id,
                WORKSPACE,
                Platform::Instagram,
                "reel",
                format!("Card {id}"),
                status,
            ));
        }
        match run_async(self.controller.load()) {
            SyncOutcome::Applied => Ok(()),
            other => Err(eyre!("board did not load: {other:?}")),
        }
    }
}

impl Default for BoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::default()
}

/// Parses a comma-separated card list such as `101,102`.
pub fn parse_ids(raw: &str) -> Result<Vec<ContentId>, eyre::Report> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<u64>()
                .map(ContentId::new)
                .map_err(|err| eyre!("invalid card id '{part}': {err}"))
        })
        .collect()
}

/// Parses a column name.
pub fn parse_status(raw: &str) -> Result<ContentStatus, eyre::Report> {
    ContentStatus::try_from(raw).map_err(|err| eyre!("unknown column '{raw}': {err}"))
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
