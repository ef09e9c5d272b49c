//! Then steps for board drag BDD scenarios.

use super::world::{BoardWorld, parse_ids, parse_status};
use eyre::{ensure, eyre};
use rstest_bdd_macros::then;
use storyboard::board::domain::{ContentId, DragOutcome};

#[then(r#"the "{column}" column holds "{cards}""#)]
fn column_holds(world: &BoardWorld, column: String, cards: String) -> Result<(), eyre::Report> {
    let status = parse_status(&column)?;
    let expected = parse_ids(&cards)?;
    let actual = world.controller.board().ids_in(status);
    ensure!(
        actual == expected,
        "expected {column} to hold {expected:?}, found {actual:?}"
    );
    Ok(())
}

#[then(r#"the "{column}" column is empty"#)]
fn column_is_empty(world: &BoardWorld, column: String) -> Result<(), eyre::Report> {
    let status = parse_status(&column)?;
    let board = world.controller.board();
    ensure!(
        board.column(status).is_empty(),
        "expected {column} to be empty, found {:?}",
        board.ids_in(status)
    );
    Ok(())
}

#[then(r#"card {id:u64} is stored with status "{column}""#)]
fn card_stored_with_status(world: &BoardWorld, id: u64, column: String) -> Result<(), eyre::Report> {
    let expected = parse_status(&column)?;
    let stored = world
        .repository
        .status_of(ContentId::new(id))
        .ok_or_else(|| eyre!("card {id} is not stored"))?;
    ensure!(
        stored == expected,
        "expected card {id} stored as {expected}, found {stored}"
    );
    Ok(())
}

#[then("no status change was sent")]
fn no_status_change_sent(world: &BoardWorld) -> Result<(), eyre::Report> {
    let moves = world.repository.recorded_moves();
    ensure!(moves.is_empty(), "unexpected moves: {moves:?}");
    Ok(())
}

#[then("the move is rolled back")]
fn move_rolled_back(world: &BoardWorld) -> Result<(), eyre::Report> {
    match world.last_outcome {
        Some(DragOutcome::RolledBack { .. }) => Ok(()),
        other => Err(eyre!("expected a rolled back move, found {other:?}")),
    }
}

#[then("an error notice is shown")]
fn error_notice_shown(world: &BoardWorld) -> Result<(), eyre::Report> {
    ensure!(
        !world.notifier.errors().is_empty(),
        "expected an error notice"
    );
    Ok(())
}
