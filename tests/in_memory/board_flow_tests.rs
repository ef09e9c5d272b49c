//! End-to-end board flows against the in-memory backend.

use std::sync::Arc;

use super::helpers::{WORKSPACE, card, ids, repository};
use rstest::rstest;
use storyboard::board::{
    adapters::memory::{InMemoryContentRepository, RecordingNotifier},
    domain::{
        Board, ContentForm, ContentId, ContentItem, ContentStatus, DragOutcome, DropTarget, HiddenItem,
        Platform, Priority, WorkspaceId,
    },
    services::{BoardController, SyncOutcome},
};

fn controller_for(
    repository: &Arc<InMemoryContentRepository>,
    workspace: WorkspaceId,
) -> (
    BoardController<InMemoryContentRepository, RecordingNotifier>,
    Arc<RecordingNotifier>,
) {
    let notifier = Arc::new(RecordingNotifier::new());
    let controller = BoardController::new(Arc::clone(repository), Arc::clone(&notifier), workspace);
    (controller, notifier)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn planning_session_keeps_board_and_backend_in_step(repository: InMemoryContentRepository) {
    let backend = Arc::new(repository);
    let (controller, notifier) = controller_for(&backend, WORKSPACE);
    assert_eq!(controller.load().await, SyncOutcome::Applied);

    let form = ContentForm::new("Studio tour", Platform::YouTube, "long")
        .with_due("2025-07-01", "14:00")
        .with_priority(Priority::High);
    let created = controller
        .create_content(&form)
        .await
        .expect("creation succeeds");

    assert!(controller.drag_start(created.id()));
    controller.drag_over(DropTarget::Item(ContentId::new(201)));
    let moved = controller
        .drag_end(Some(DropTarget::Column(ContentStatus::Production)))
        .await;
    assert!(matches!(moved, DragOutcome::Moved { to: ContentStatus::Production, .. }));

    let quick = controller
        .move_to_status(ContentId::new(301), ContentStatus::Scheduled)
        .await;
    assert!(matches!(quick, DragOutcome::Moved { .. }));

    assert_eq!(controller.refetch().await, SyncOutcome::Applied);
    let refreshed = controller.board();
    assert_eq!(
        refreshed.find_column_of(created.id()),
        Some(ContentStatus::Production)
    );
    assert_eq!(
        refreshed.find_column_of(ContentId::new(301)),
        Some(ContentStatus::Scheduled)
    );
    assert_eq!(refreshed, Board::partition(backend.items()));
    assert!(notifier.errors().is_empty());
    assert_eq!(notifier.successes().len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn every_card_stays_in_the_column_of_its_status(repository: InMemoryContentRepository) {
    let backend = Arc::new(repository);
    let (controller, _notifier) = controller_for(&backend, WORKSPACE);
    assert_eq!(controller.load().await, SyncOutcome::Applied);

    assert!(controller.drag_start(ContentId::new(102)));
    controller.drag_over(DropTarget::Column(ContentStatus::Review));
    controller.drag_over(DropTarget::Item(ContentId::new(201)));
    controller.drag_over(DropTarget::Column(ContentStatus::Published));
    let outcome = controller
        .drag_end(Some(DropTarget::Column(ContentStatus::Published)))
        .await;
    assert!(matches!(outcome, DragOutcome::Moved { .. }));

    let board = controller.board();
    assert_eq!(board.len(), 5);
    for column in board.columns() {
        for item in column.items() {
            assert_eq!(item.status(), column.status());
            assert_eq!(board.find_column_of(item.id()), Some(column.status()));
        }
    }
    assert_eq!(board.ids_in(ContentStatus::Published), ids(&[102]));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn items_with_unknown_status_are_reported_not_shown(repository: InMemoryContentRepository) {
    repository.seed_hidden(HiddenItem {
        id: ContentId::new(950),
        title: Some("Imported".to_owned()),
        status: "archived".to_owned(),
    });
    let backend = Arc::new(repository);
    let (controller, _notifier) = controller_for(&backend, WORKSPACE);

    assert_eq!(controller.load().await, SyncOutcome::Applied);

    assert_eq!(controller.board().find_column_of(ContentId::new(950)), None);
    let hidden = controller.hidden_items();
    assert_eq!(hidden.len(), 1);
    assert_eq!(hidden.first().map(|item| item.status.as_str()), Some("archived"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn board_only_shows_its_own_workspace(repository: InMemoryContentRepository) {
    let other = WorkspaceId::new(99);
    repository.seed(card(700, ContentStatus::Review));
    repository.seed(ContentItem::new(
        ContentId::new(800),
        other,
        Platform::TikTok,
        "short",
        "Elsewhere",
        ContentStatus::Idea,
    ));
    let backend = Arc::new(repository);
    let (controller, _notifier) = controller_for(&backend, WORKSPACE);

    assert_eq!(controller.load().await, SyncOutcome::Applied);

    let board = controller.board();
    assert_eq!(board.len(), 6);
    assert_eq!(board.find_column_of(ContentId::new(800)), None);
    assert_eq!(board.ids_in(ContentStatus::Review), ids(&[301, 700]));
}
