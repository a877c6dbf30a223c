use crate::action::{ActionError, ActionOutcome, Impossible};
use crate::env::ActionContext;
use crate::state::{ActorState, EntityId, GameState, Tick};

/// How a concrete action checks and mutates game state.
///
/// `pre_validate` sees the state **before** mutation and must stay side
/// effect free; it returns the time the action will cost. `apply` may assume
/// validation passed and is responsible for charging that cost.
pub(crate) trait ActionTransition {
    fn pre_validate(
        &self,
        actor: &ActorState,
        state: &GameState,
        ctx: &ActionContext<'_>,
    ) -> Result<Tick, ActionError>;

    fn apply(
        &self,
        actor: EntityId,
        cost: Tick,
        state: &mut GameState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<ActionOutcome, ActionError>;
}

/// Validates, checks the budget, then applies.
pub(crate) fn run(
    transition: &impl ActionTransition,
    actor: EntityId,
    state: &mut GameState,
    ctx: &mut ActionContext<'_>,
) -> Result<ActionOutcome, ActionError> {
    let cost = {
        let current = state.actor(actor).ok_or(ActionError::UnknownActor(actor))?;
        if !current.is_alive() {
            return Err(ActionError::ActorDead(actor));
        }
        let cost = transition.pre_validate(current, state, ctx)?;
        if !current.stats.time.can_afford(cost) {
            return Err(Impossible::NotEnoughTime.into());
        }
        cost
    };
    transition.apply(actor, cost, state, ctx)
}

/// Deducts `cost` from the actor's budget.
pub(crate) fn charge(
    state: &mut GameState,
    actor: EntityId,
    cost: Tick,
) -> Result<ActionOutcome, ActionError> {
    let current = state
        .actor_mut(actor)
        .ok_or(ActionError::UnknownActor(actor))?;
    current
        .stats
        .time
        .try_spend(cost)
        .ok_or(Impossible::NotEnoughTime)?;
    Ok(ActionOutcome::spent(cost))
}
