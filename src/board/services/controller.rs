//! Board controller: the only writer of board state.
//!
//! The controller owns the five-column board of one workspace, applies drag
//! gestures and quick status changes optimistically and reconciles with the
//! backend through a [`ContentRepository`]. Every failure is turned into a
//! [`Notice`]; none is returned to the caller except form validation.
//!
//! Each fetch and each local mutation takes a sequence ticket. A fetched
//! snapshot is applied only when no newer local mutation or fetch has been
//! applied since its ticket was issued.

use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::board::{
    domain::{
        Board, ContentForm, ContentId, ContentItem, ContentStatus, DragOutcome, DragState,
        DropTarget, FieldErrors, HiddenItem, WorkspaceId,
    },
    ports::{ContentRepository, ContentRepositoryError, Notice, Notifier, PageMeta},
};

const LOAD_FAILED: &str = "Failed to load the content board";
const MOVE_FAILED: &str = "Failed to move content";
const ORDER_FAILED: &str = "Failed to save the column order";
const CREATE_FAILED: &str = "Failed to create content";
const CREATED: &str = "Content created";

/// Result of a fetch-and-replace round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum SyncOutcome {
    /// The fetched snapshot replaced the board.
    Applied,
    /// A newer local change or fetch was applied first; the snapshot was
    /// discarded.
    Stale,
    /// The fetch failed; the board was left as is.
    Failed,
}

/// Errors returned by [`BoardController::create_content`].
#[derive(Debug, Clone, Error)]
pub enum CreateContentError {
    /// The form or the backend rejected individual fields.
    #[error("content is invalid: {0}")]
    Invalid(FieldErrors),
    /// The backend failed for another reason.
    #[error(transparent)]
    Failed(ContentRepositoryError),
}

#[derive(Debug, Default, Clone, Copy)]
struct Tickets {
    issued: u64,
    applied: u64,
}

impl Tickets {
    const fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    const fn is_current(&self, ticket: u64) -> bool {
        ticket >= self.applied
    }

    fn mark_applied(&mut self, ticket: u64) {
        self.applied = self.applied.max(ticket);
    }
}

#[derive(Debug, Default)]
struct BoardState {
    board: Board,
    hidden: Vec<HiddenItem>,
    meta: Option<PageMeta>,
    loading: bool,
    drag: DragState,
    drag_origin_index: usize,
    moves_in_flight: usize,
    resync_pending: bool,
    tickets: Tickets,
}

impl BoardState {
    fn commit_local(&mut self, next: Board) {
        let ticket = self.tickets.issue();
        self.tickets.mark_applied(ticket);
        self.board = next;
    }

    fn put_back(&mut self, item: ContentId, status: ContentStatus, index: usize) {
        let Some(card) = self.board.find_item(item).cloned() else {
            return;
        };
        if self.board.index_of(status, item) == Some(index) {
            return;
        }
        let next = self.board.remove_item(item).insert_at(status, index, &card);
        self.commit_local(next);
    }

    fn undo_preview(&mut self, item: ContentId, origin: ContentStatus) {
        if self.board.find_column_of(item) != Some(origin) {
            let index = self.drag_origin_index;
            self.put_back(item, origin, index);
        }
    }
}

enum DropPlan {
    Nothing,
    Reorder {
        status: ContentStatus,
        from: usize,
        to: usize,
        ordered: Vec<ContentId>,
    },
    Move {
        item: ContentId,
        from: ContentStatus,
        from_index: usize,
        to: ContentStatus,
    },
}

/// Owns and mutates the board of one workspace.
#[derive(Clone)]
pub struct BoardController<R, N>
where
    R: ContentRepository,
    N: Notifier,
{
    repository: Arc<R>,
    notifier: Arc<N>,
    workspace: WorkspaceId,
    state: Arc<Mutex<BoardState>>,
}

impl<R, N> BoardController<R, N>
where
    R: ContentRepository,
    N: Notifier,
{
    /// Creates a controller with an empty board.
    #[must_use]
    pub fn new(repository: Arc<R>, notifier: Arc<N>, workspace: WorkspaceId) -> Self {
        Self {
            repository,
            notifier,
            workspace,
            state: Arc::new(Mutex::new(BoardState::default())),
        }
    }

    /// Returns the workspace this controller shows.
    #[must_use]
    pub const fn workspace(&self) -> WorkspaceId {
        self.workspace
    }

    /// Performs the initial load, raising the loading flag while it runs.
    pub async fn load(&self) -> SyncOutcome {
        self.with_state(|state| state.loading = true);
        let outcome = self.refetch().await;
        self.with_state(|state| state.loading = false);
        outcome
    }

    /// Fetches the workspace and replaces the board with the result.
    pub async fn refetch(&self) -> SyncOutcome {
        let ticket = self.with_state(|state| state.tickets.issue());
        let fetched = match self.repository.fetch_items(self.workspace).await {
            Ok(fetched) => fetched,
            Err(err) => {
                warn!(workspace = %self.workspace, error = %err, "board fetch failed");
                self.notifier
                    .notify(Notice::error(err.user_message(LOAD_FAILED)));
                return SyncOutcome::Failed;
            }
        };

        self.with_state(|state| {
            if !state.tickets.is_current(ticket) {
                debug!(ticket, applied = state.tickets.applied, "discarding stale board snapshot");
                return SyncOutcome::Stale;
            }
            if !fetched.hidden.is_empty() {
                warn!(
                    workspace = %self.workspace,
                    hidden = fetched.hidden.len(),
                    "items with unknown status are not shown"
                );
            }
            state.board = Board::partition(fetched.items);
            state.hidden = fetched.hidden;
            state.meta = fetched.meta;
            state.tickets.mark_applied(ticket);
            debug!(ticket, items = state.board.len(), "board snapshot applied");
            SyncOutcome::Applied
        })
    }

    /// Starts dragging `item`.
    ///
    /// A gesture still in progress is abandoned first, as by
    /// [`Self::drag_cancel`]. Returns `false` and stays idle when `item` is
    /// not on the board.
    #[must_use = "a `false` result means no gesture started"]
    pub fn drag_start(&self, item: ContentId) -> bool {
        self.with_state(|state| {
            if let DragState::Dragging {
                item: previous,
                origin: previous_origin,
            } = std::mem::take(&mut state.drag)
            {
                state.undo_preview(previous, previous_origin);
            }
            let Some(origin) = state.board.find_column_of(item) else {
                state.drag = DragState::Idle;
                return false;
            };
            state.drag_origin_index = state.board.index_of(origin, item).unwrap_or_default();
            state.drag = DragState::Dragging { item, origin };
            true
        })
    }

    /// Previews the dragged card in the column under the pointer.
    ///
    /// Only column changes are previewed; positions inside the current
    /// column are settled when the card is dropped.
    pub fn drag_over(&self, target: DropTarget) {
        self.with_state(|state| {
            let Some(item) = state.drag.active_item() else {
                return;
            };
            let Some((to, before)) = state.board.resolve_target(target) else {
                return;
            };
            if state.board.find_column_of(item) == Some(to) || before == Some(item) {
                return;
            }
            let next = state.board.move_across(item, to, before);
            state.commit_local(next);
        });
    }

    /// Abandons the gesture and undoes any column preview.
    pub fn drag_cancel(&self) {
        self.with_state(|state| {
            if let DragState::Dragging { item, origin } = std::mem::take(&mut state.drag) {
                state.undo_preview(item, origin);
            }
        });
    }

    /// Drops the dragged card on `target` and persists the result.
    ///
    /// A drop inside the starting column reorders it and records the order
    /// best-effort. A drop in another column changes the status; if the
    /// backend refuses, the card is put back and the board resynchronised.
    /// A drop outside any target undoes the column preview.
    pub async fn drag_end(&self, target: Option<DropTarget>) -> DragOutcome {
        let plan = self.with_state(|state| Self::plan_drop(state, target));
        match plan {
            DropPlan::Nothing => DragOutcome::NoOp,
            DropPlan::Reorder {
                status,
                from,
                to,
                ordered,
            } => {
                self.persist_order(status, ordered).await;
                DragOutcome::Reordered { status, from, to }
            }
            DropPlan::Move {
                item,
                from,
                from_index,
                to,
            } => self.commit_move(item, from, from_index, to).await,
        }
    }

    /// Moves `id` to the front of the `to` column and persists the change.
    ///
    /// Unknown ids and moves into the current column are no-ops.
    pub async fn move_to_status(&self, id: ContentId, to: ContentStatus) -> DragOutcome {
        let origin = self.with_state(|state| {
            let from = state.board.find_column_of(id)?;
            if from == to {
                return None;
            }
            let from_index = state.board.index_of(from, id).unwrap_or_default();
            let card = state.board.find_item(id).cloned()?;
            let next = state.board.remove_item(id).insert_at(to, 0, &card);
            state.commit_local(next);
            Some((from, from_index))
        });
        match origin {
            Some((from, from_index)) => self.commit_move(id, from, from_index, to).await,
            None => DragOutcome::NoOp,
        }
    }

    /// Rearranges one column in the order of `ordered` and records it
    /// best-effort.
    ///
    /// Returns `true` when the column order changed.
    pub async fn reorder_within_column(&self, status: ContentStatus, ordered: &[ContentId]) -> bool {
        let changed = self.with_state(|state| {
            let next = state.board.reorder_by_ids(status, ordered);
            if next == state.board {
                return None;
            }
            state.commit_local(next);
            Some(state.board.ids_in(status))
        });
        match changed {
            Some(ids) => {
                self.persist_order(status, ids).await;
                true
            }
            None => false,
        }
    }

    /// Validates `form`, creates the item and puts it at the top of the
    /// `idea` column.
    ///
    /// # Errors
    ///
    /// Returns [`CreateContentError::Invalid`] when the form or the backend
    /// rejects fields; nothing is sent for a form that fails locally.
    /// Returns [`CreateContentError::Failed`] for any other backend failure.
    /// The board is unchanged in both cases.
    pub async fn create_content(
        &self,
        form: &ContentForm,
    ) -> Result<ContentItem, CreateContentError> {
        let draft = form.validate().map_err(CreateContentError::Invalid)?;
        match self.repository.create_item(self.workspace, &draft).await {
            Ok(item) => {
                self.with_state(|state| {
                    let next = state.board.insert_at(ContentStatus::Idea, 0, &item);
                    state.commit_local(next);
                });
                info!(item = %item.id(), workspace = %self.workspace, "content created");
                self.notifier.notify(Notice::success(CREATED));
                Ok(item)
            }
            Err(ContentRepositoryError::Validation(errors)) => {
                warn!(workspace = %self.workspace, %errors, "content rejected by backend");
                self.notifier.notify(Notice::error(
                    errors.first_message().unwrap_or(CREATE_FAILED),
                ));
                Err(CreateContentError::Invalid(errors))
            }
            Err(err) => {
                warn!(workspace = %self.workspace, error = %err, "content creation failed");
                self.notifier
                    .notify(Notice::error(err.user_message(CREATE_FAILED)));
                Err(CreateContentError::Failed(err))
            }
        }
    }

    /// Returns a copy of the current board.
    #[must_use]
    pub fn board(&self) -> Board {
        self.with_state(|state| state.board.clone())
    }

    /// Returns every shown item in column order.
    #[must_use]
    pub fn flat_items(&self) -> Vec<ContentItem> {
        self.with_state(|state| state.board.flatten())
    }

    /// Returns the items of the last fetch that fit no column.
    #[must_use]
    pub fn hidden_items(&self) -> Vec<HiddenItem> {
        self.with_state(|state| state.hidden.clone())
    }

    /// Returns `true` while the initial load runs.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.with_state(|state| state.loading)
    }

    /// Returns the drag gesture state.
    #[must_use]
    pub fn drag_state(&self) -> DragState {
        self.with_state(|state| state.drag)
    }

    /// Returns the pagination metadata of the last applied fetch.
    #[must_use]
    pub fn meta(&self) -> Option<PageMeta> {
        self.with_state(|state| state.meta)
    }

    fn plan_drop(state: &mut BoardState, target: Option<DropTarget>) -> DropPlan {
        let DragState::Dragging { item, origin } = std::mem::take(&mut state.drag) else {
            return DropPlan::Nothing;
        };
        let origin_index = state.drag_origin_index;
        let Some((to, before)) = target.and_then(|dropped| state.board.resolve_target(dropped))
        else {
            state.undo_preview(item, origin);
            return DropPlan::Nothing;
        };
        let Some(current) = state.board.find_column_of(item) else {
            return DropPlan::Nothing;
        };

        let placed = if current == to {
            let column = state.board.column(to);
            let from = state.board.index_of(to, item).unwrap_or_default();
            let dest = before
                .and_then(|before_id| state.board.index_of(to, before_id))
                .unwrap_or_else(|| column.len().saturating_sub(1));
            state.board.reorder(to, from, dest)
        } else {
            state.board.move_across(item, to, before)
        };
        let final_index = placed.index_of(to, item).unwrap_or_default();
        if placed != state.board {
            state.commit_local(placed);
        }

        if to != origin {
            return DropPlan::Move {
                item,
                from: origin,
                from_index: origin_index,
                to,
            };
        }
        if final_index == origin_index {
            return DropPlan::Nothing;
        }
        DropPlan::Reorder {
            status: to,
            from: origin_index,
            to: final_index,
            ordered: state.board.ids_in(to),
        }
    }

    async fn commit_move(
        &self,
        item: ContentId,
        from: ContentStatus,
        from_index: usize,
        to: ContentStatus,
    ) -> DragOutcome {
        self.with_state(|state| state.moves_in_flight += 1);
        let result = self.repository.move_item(item, to).await;
        let (others_in_flight, resync) = self.with_state(|state| {
            state.moves_in_flight = state.moves_in_flight.saturating_sub(1);
            if result.is_err() {
                state.put_back(item, from, from_index);
                state.resync_pending = true;
            }
            let others = state.moves_in_flight;
            (others, others == 0 && std::mem::take(&mut state.resync_pending))
        });

        let outcome = match result {
            Ok(()) => {
                info!(item = %item, %from, %to, "content moved");
                DragOutcome::Moved { item, from, to }
            }
            Err(err) => {
                warn!(item = %item, %from, %to, error = %err, "move rejected; restoring board");
                self.notifier
                    .notify(Notice::error(err.user_message(MOVE_FAILED)));
                if others_in_flight > 0 {
                    debug!(item = %item, others_in_flight, "deferring resync until pending moves settle");
                }
                DragOutcome::RolledBack { item, to }
            }
        };
        if resync {
            let sync = self.refetch().await;
            debug!(item = %item, ?sync, "board resynchronised after failed move");
        }
        outcome
    }

    async fn persist_order(&self, status: ContentStatus, ordered: Vec<ContentId>) {
        if let Err(err) = self
            .repository
            .persist_order(self.workspace, status, ordered)
            .await
        {
            warn!(workspace = %self.workspace, %status, error = %err, "column order not saved");
            self.notifier
                .notify(Notice::error(err.user_message(ORDER_FAILED)));
        }
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut BoardState) -> T) -> T {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }
}
