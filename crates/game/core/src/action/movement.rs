use crate::action::transition::{ActionTransition, charge};
use crate::action::{ActionError, ActionOutcome, Impossible};
use crate::env::ActionContext;
use crate::state::{ActorState, Direction, EntityId, GameState, Tick};

/// One step in a king-move direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct MoveAction {
    direction: Direction,
}

impl MoveAction {
    pub(crate) fn new(direction: Direction) -> Self {
        Self { direction }
    }
}

impl ActionTransition for MoveAction {
    fn pre_validate(
        &self,
        actor: &ActorState,
        state: &GameState,
        ctx: &ActionContext<'_>,
    ) -> Result<Tick, ActionError> {
        let destination = actor.position.step(self.direction);
        // Out of bounds, walls and blocking actors all read the same to the player.
        if !state.is_vacant(ctx.map(), destination) {
            return Err(Impossible::Blocked.into());
        }
        Ok(ctx.config().move_cost)
    }

    fn apply(
        &self,
        actor: EntityId,
        cost: Tick,
        state: &mut GameState,
        _ctx: &mut ActionContext<'_>,
    ) -> Result<ActionOutcome, ActionError> {
        let outcome = charge(state, actor, cost)?;
        let mover = state
            .actor_mut(actor)
            .ok_or(ActionError::UnknownActor(actor))?;
        mover.position = mover.position.step(self.direction);
        Ok(outcome)
    }
}

/// Ends the segment by spending whatever budget is left.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct WaitAction;

impl ActionTransition for WaitAction {
    fn pre_validate(
        &self,
        actor: &ActorState,
        _state: &GameState,
        _ctx: &ActionContext<'_>,
    ) -> Result<Tick, ActionError> {
        Ok(actor.stats.time.current())
    }

    fn apply(
        &self,
        actor: EntityId,
        _cost: Tick,
        state: &mut GameState,
        _ctx: &mut ActionContext<'_>,
    ) -> Result<ActionOutcome, ActionError> {
        let waiter = state
            .actor_mut(actor)
            .ok_or(ActionError::UnknownActor(actor))?;
        Ok(ActionOutcome::spent(waiter.stats.time.exhaust()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::action::tests::{fighter, run};
    use crate::state::Position;

    #[test]
    fn walls_and_blockers_stop_movement() {
        let mut state = GameState::new(1);
        state.add_player(fighter("Player", 1, 1)).unwrap();
        state.spawn(fighter("Orc", 2, 2)).unwrap();

        let (results, _) = run(&mut state, |state, ctx| {
            (
                Action::Move(Direction::North).perform(EntityId::PLAYER, state, ctx),
                Action::Move(Direction::SouthEast).perform(EntityId::PLAYER, state, ctx),
            )
        });
        assert_eq!(results.0, Err(Impossible::Blocked.into()));
        assert_eq!(results.1, Err(Impossible::Blocked.into()));
        assert_eq!(state.player().unwrap().position, Position::new(1, 1));
    }

    #[test]
    fn corpses_do_not_block() {
        let mut state = GameState::new(1);
        state.add_player(fighter("Player", 1, 1)).unwrap();
        let orc = state.spawn(fighter("Orc", 2, 1)).unwrap();
        state.actor_mut(orc).unwrap().die();
        let (result, _) = run(&mut state, |state, ctx| {
            Action::Move(Direction::East).perform(EntityId::PLAYER, state, ctx)
        });
        assert!(result.is_ok());
        assert_eq!(state.player().unwrap().position, Position::new(2, 1));
    }

    #[test]
    fn wait_spends_the_rest_of_the_budget() {
        let mut state = GameState::new(1);
        state.add_player(fighter("Player", 1, 1)).unwrap();
        let (result, _) = run(&mut state, |state, ctx| {
            Action::Wait.perform(EntityId::PLAYER, state, ctx)
        });
        assert_eq!(result.unwrap().spent, Tick::whole(6));
        assert!(state.player().unwrap().stats.time.is_exhausted());
    }
}
