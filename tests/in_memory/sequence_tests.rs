//! Sequence ticket tests: late snapshots never clobber newer local state.

use super::helpers::{GateHandle, GatedHarness, card, gated, ids};
use rstest::rstest;
use storyboard::board::{
    domain::{ContentId, ContentStatus, DragOutcome, DropTarget},
    services::SyncOutcome,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn snapshot_older_than_local_reorder_is_discarded(gated: GatedHarness) {
    let controller = &gated.controller;
    assert_eq!(controller.load().await, SyncOutcome::Applied);
    let GateHandle { started, release } = gated.repository.hold_next_fetch();

    let interleave = async move {
        assert!(started.await.is_ok(), "fetch never reached the gate");
        let changed = controller
            .reorder_within_column(ContentStatus::Idea, &ids(&[103, 102, 101]))
            .await;
        assert!(release.send(()).is_ok(), "fetch was dropped");
        changed
    };
    let (outcome, changed) = tokio::join!(controller.refetch(), interleave);

    assert!(changed);
    assert_eq!(outcome, SyncOutcome::Stale);
    assert_eq!(
        controller.board().ids_in(ContentStatus::Idea),
        ids(&[103, 102, 101])
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn newer_fetch_wins_over_older_one_finishing_later(gated: GatedHarness) {
    let controller = &gated.controller;
    let repository = &gated.repository;
    assert_eq!(controller.load().await, SyncOutcome::Applied);
    let GateHandle { started, release } = repository.hold_next_fetch();

    let newer = async move {
        assert!(started.await.is_ok(), "fetch never reached the gate");
        repository.inner().seed(card(104, ContentStatus::Idea));
        let outcome = controller.refetch().await;
        assert!(release.send(()).is_ok(), "fetch was dropped");
        outcome
    };
    let (older_outcome, newer_outcome) = tokio::join!(controller.refetch(), newer);

    assert_eq!(newer_outcome, SyncOutcome::Applied);
    assert_eq!(older_outcome, SyncOutcome::Stale);
    assert_eq!(
        controller.board().ids_in(ContentStatus::Idea),
        ids(&[101, 102, 103, 104])
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn drag_preview_survives_a_slower_snapshot(gated: GatedHarness) {
    let controller = &gated.controller;
    assert_eq!(controller.load().await, SyncOutcome::Applied);
    let GateHandle { started, release } = gated.repository.hold_next_fetch();

    let drag = async move {
        assert!(started.await.is_ok(), "fetch never reached the gate");
        assert!(controller.drag_start(ContentId::new(101)));
        controller.drag_over(DropTarget::Column(ContentStatus::Review));
        assert!(release.send(()).is_ok(), "fetch was dropped");
    };
    let (outcome, ()) = tokio::join!(controller.refetch(), drag);

    assert_eq!(outcome, SyncOutcome::Stale);
    assert_eq!(
        controller.board().ids_in(ContentStatus::Review),
        ids(&[301, 101])
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_move_resyncs_once_pending_moves_settle(gated: GatedHarness) {
    let controller = &gated.controller;
    let repository = &gated.repository;
    assert_eq!(controller.load().await, SyncOutcome::Applied);
    let GateHandle { started, release } = repository.hold_next_move();

    let second = async move {
        assert!(started.await.is_ok(), "move never reached the gate");
        repository.inner().fail_next_move();
        let outcome = controller
            .move_to_status(ContentId::new(102), ContentStatus::Scheduled)
            .await;
        assert_eq!(repository.inner().fetch_count(), 1);
        repository.inner().seed(card(104, ContentStatus::Idea));
        assert!(release.send(()).is_ok(), "move was dropped");
        outcome
    };
    let (first_outcome, second_outcome) = tokio::join!(
        controller.move_to_status(ContentId::new(101), ContentStatus::Review),
        second
    );

    assert!(matches!(first_outcome, DragOutcome::Moved { .. }));
    assert!(matches!(second_outcome, DragOutcome::RolledBack { .. }));
    assert_eq!(repository.inner().fetch_count(), 2);
    let board = controller.board();
    assert_eq!(board.ids_in(ContentStatus::Review), ids(&[101, 301]));
    assert_eq!(board.ids_in(ContentStatus::Idea), ids(&[102, 103, 104]));
    assert!(board.column(ContentStatus::Scheduled).is_empty());
    assert_eq!(gated.notifier.errors(), vec!["move unavailable".to_owned()]);
}
