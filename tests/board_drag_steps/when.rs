//! When steps for board drag BDD scenarios.

use super::world::{BoardWorld, parse_status, run_async};
use eyre::eyre;
use rstest_bdd_macros::when;
use storyboard::board::domain::{ContentId, DropTarget};

fn start(world: &BoardWorld, id: u64) -> Result<(), eyre::Report> {
    if world.controller.drag_start(ContentId::new(id)) {
        Ok(())
    } else {
        Err(eyre!("card {id} is not on the board"))
    }
}

fn ensure_dragging(world: &BoardWorld, id: u64) -> Result<(), eyre::Report> {
    if world.controller.drag_state().active_item() == Some(ContentId::new(id)) {
        Ok(())
    } else {
        start(world, id)
    }
}

#[when(r#"card {id:u64} is dragged over the "{column}" column"#)]
fn card_dragged_over_column(
    world: &mut BoardWorld,
    id: u64,
    column: String,
) -> Result<(), eyre::Report> {
    ensure_dragging(world, id)?;
    world
        .controller
        .drag_over(DropTarget::Column(parse_status(&column)?));
    Ok(())
}

#[when(r#"card {id:u64} is dropped on the "{column}" column"#)]
fn card_dropped_on_column(
    world: &mut BoardWorld,
    id: u64,
    column: String,
) -> Result<(), eyre::Report> {
    ensure_dragging(world, id)?;
    let target = DropTarget::Column(parse_status(&column)?);
    world.last_outcome = Some(run_async(world.controller.drag_end(Some(target))));
    Ok(())
}

#[when("card {id:u64} is dropped on card {target:u64}")]
fn card_dropped_on_card(world: &mut BoardWorld, id: u64, target: u64) -> Result<(), eyre::Report> {
    ensure_dragging(world, id)?;
    let drop = DropTarget::Item(ContentId::new(target));
    world.last_outcome = Some(run_async(world.controller.drag_end(Some(drop))));
    Ok(())
}

#[when("card {id:u64} is dropped outside the board")]
fn card_dropped_outside(world: &mut BoardWorld, id: u64) -> Result<(), eyre::Report> {
    ensure_dragging(world, id)?;
    world.last_outcome = Some(run_async(world.controller.drag_end(None)));
    Ok(())
}
