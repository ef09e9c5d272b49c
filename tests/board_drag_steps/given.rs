//! Given steps for board drag BDD scenarios.

use super::world::{BoardWorld, parse_ids};
use rstest_bdd_macros::given;
use storyboard::board::domain::ContentStatus;

#[given(r#"a board with idea cards "{cards}""#)]
fn board_with_idea_cards(world: &mut BoardWorld, cards: String) -> Result<(), eyre::Report> {
    let ids = parse_ids(&cards)?;
    world.seed(ContentStatus::Idea, &ids)
}

#[given(r#"production cards "{cards}""#)]
fn production_cards(world: &mut BoardWorld, cards: String) -> Result<(), eyre::Report> {
    let ids = parse_ids(&cards)?;
    world.seed(ContentStatus::Production, &ids)
}

#[given("the backend rejects the next move")]
fn backend_rejects_next_move(world: &mut BoardWorld) {
    world.repository.fail_next_move();
}
