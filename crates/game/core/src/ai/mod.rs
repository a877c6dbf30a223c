//! NPC decision making.
//!
//! Every NPC runs the same state machine. [`step`] makes one decision and
//! performs the resulting [`Action`]; the scheduler calls it until the NPC's
//! budget runs out or the step reports that the segment is over.
//!
//! Modes:
//!
//! - `Hostile`: pursue the target and attack with whatever is held
//! - `Fleeing`: run from the target; falls back to `Hostile` once it is lost
//! - `Confused`: one random stumble per segment until the counter runs out
//!
//! Item users first run a gear bootstrap (pick up, equip, load, fetch ammo)
//! before they evaluate combat.
mod gear;
mod perception;
mod state;

pub use state::{AiMode, AiState};

use crate::action::weapon::{self, WeaponFlags};
use crate::action::{Action, ActionError, Impossible};
use crate::combat::AttackType;
use crate::engine::TurnError;
use crate::env::{ActionContext, has_line_of_sight};
use crate::error::{ErrorContext, GameError};
use crate::path;
use crate::state::{
    ActorState, Direction, EntityId, EquipSlot, GameState, Personality, Tick, Weapon,
};
use crate::stats::PoolKind;

/// What one call to [`step`] did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// An action went through; the NPC may keep deciding.
    Acted { action: Action, spent: Tick },
    /// The rest of the segment was given up, either by choice or after a
    /// rejected attempt.
    Waited { spent: Tick },
    /// Dead or mindless; nothing happened.
    Idle,
}

impl StepOutcome {
    pub fn ends_segment(&self) -> bool {
        !matches!(self, Self::Acted { .. })
    }
}

/// Makes and performs one decision for `actor`.
///
/// Recoverable rejections are logged and turned into a wait. Anything else
/// propagates as [`TurnError`].
pub fn step(
    actor: EntityId,
    state: &mut GameState,
    ctx: &mut ActionContext<'_>,
) -> Result<StepOutcome, TurnError> {
    let agent = state.actor_mut(actor).ok_or(TurnError::UnknownActor(actor))?;
    if !agent.is_alive() {
        return Ok(StepOutcome::Idle);
    }
    let Some(mut ai) = agent.ai.take() else {
        return Ok(StepOutcome::Idle);
    };

    if let AiMode::Confused {
        turns_remaining, ..
    } = &mut ai.mode
    {
        if *turns_remaining > 0 {
            *turns_remaining -= 1;
            agent.ai = Some(ai);
            return stumble(actor, state, ctx);
        }
        ai.recover();
        ctx.narrate(format!("The {} is no longer confused.", agent.name));
        tracing::debug!(actor = %actor, mode = ?ai.mode, "confusion wore off");
    }

    let action = match state.actor(actor) {
        Some(agent) => decide(agent, &mut ai, state, ctx),
        None => return Err(TurnError::UnknownActor(actor)),
    };
    if let Some(agent) = state.actor_mut(actor) {
        agent.ai = Some(ai);
    }
    tracing::debug!(actor = %actor, action = ?action, "ai decision");

    match action.perform(actor, state, ctx) {
        Ok(outcome) => {
            advance_path(actor, state);
            if action == Action::Wait {
                return Ok(StepOutcome::Waited {
                    spent: outcome.spent,
                });
            }
            Ok(StepOutcome::Acted {
                action,
                spent: outcome.spent,
            })
        }
        Err(error) => recover(actor, error, state, ctx),
    }
}

/// Random bump followed by the end of the segment.
fn stumble(
    actor: EntityId,
    state: &mut GameState,
    ctx: &mut ActionContext<'_>,
) -> Result<StepOutcome, TurnError> {
    let direction = ctx
        .dice
        .pick(Direction::ALL.len())
        .map_or(Direction::North, |index| Direction::ALL[index]);
    let mut spent = match Action::Bump(direction).perform(actor, state, ctx) {
        Ok(outcome) => outcome.spent,
        Err(error) if error.severity().is_recoverable() => {
            tracing::debug!(actor = %actor, %error, "confused stumble went nowhere");
            Tick::ZERO
        }
        Err(error) => return Err(turn_error(actor, error, state)),
    };
    if state.actor(actor).is_some_and(ActorState::is_alive) {
        spent = spent + give_up(actor, state, ctx)?;
    }
    Ok(StepOutcome::Waited { spent })
}

fn recover(
    actor: EntityId,
    error: ActionError,
    state: &mut GameState,
    ctx: &mut ActionContext<'_>,
) -> Result<StepOutcome, TurnError> {
    if !error.severity().is_recoverable() {
        return Err(turn_error(actor, error, state));
    }
    match error.as_impossible() {
        Some(Impossible::NotEnoughTime) => {
            tracing::debug!(actor = %actor, "out of time, ending segment");
        }
        _ => tracing::warn!(actor = %actor, %error, "ai action rejected, waiting instead"),
    }
    if error.as_impossible() == Some(Impossible::Blocked)
        && let Some(ai) = state.actor_mut(actor).and_then(|agent| agent.ai.as_mut())
    {
        ai.path.clear();
    }
    let spent = give_up(actor, state, ctx)?;
    Ok(StepOutcome::Waited { spent })
}

fn give_up(
    actor: EntityId,
    state: &mut GameState,
    ctx: &mut ActionContext<'_>,
) -> Result<Tick, TurnError> {
    Action::Wait
        .perform(actor, state, ctx)
        .map(|outcome| outcome.spent)
        .map_err(|error| turn_error(actor, error, state))
}

fn turn_error(actor: EntityId, error: ActionError, state: &GameState) -> TurnError {
    let mut context = ErrorContext::new(state.round).with_actor(actor);
    if let Some(agent) = state.actor(actor) {
        context = context.with_position(agent.position);
    }
    TurnError::action(error, context)
}

/// Drops the head of the cached path once the agent stands on it.
fn advance_path(actor: EntityId, state: &mut GameState) {
    if let Some(agent) = state.actor_mut(actor)
        && let Some(ai) = agent.ai.as_mut()
        && ai.path.first() == Some(&agent.position)
    {
        ai.path.remove(0);
    }
}

fn decide(
    agent: &ActorState,
    ai: &mut AiState,
    state: &GameState,
    ctx: &mut ActionContext<'_>,
) -> Action {
    if let Some(target) = ai.target
        && !state.actor(target).is_some_and(ActorState::is_alive)
    {
        ai.forget_target();
    }
    if ai.target.is_none() {
        acquire_target(agent, ai, state, ctx);
    }

    if ai.item_user
        && let Some(action) = gear::plan(agent, ai, state, ctx)
    {
        return action;
    }

    let target = ai
        .target
        .and_then(|id| state.actor(id))
        .filter(|target| perception::can_see(ctx.map(), agent, target.position));
    match target {
        Some(target) if ai.mode == AiMode::Fleeing => flee(agent, ai, target, state, ctx),
        Some(target) => engage(agent, ai, target, state, ctx),
        None => wander(agent, ai, state, ctx),
    }
}

/// Picks a visible enemy at random. Sighting one may scare the agent off.
fn acquire_target(
    agent: &ActorState,
    ai: &mut AiState,
    state: &GameState,
    ctx: &mut ActionContext<'_>,
) {
    let enemies = perception::visible_enemies(ctx.map(), agent, state);
    let Some(index) = ctx.dice.pick(enemies.len()) else {
        return;
    };
    ai.target = Some(enemies[index]);
    ai.path.clear();

    let fearful = agent.personality.trait_value(Personality::FEARFUL);
    if ai.mode == AiMode::Hostile && ctx.dice.d100() as i32 <= fearful {
        ai.mode = AiMode::Fleeing;
        tracing::debug!(actor = %agent.id, target = %enemies[index], "fleeing");
    } else {
        tracing::debug!(actor = %agent.id, target = %enemies[index], "target acquired");
    }
}

fn engage(
    agent: &ActorState,
    ai: &mut AiState,
    target: &ActorState,
    state: &GameState,
    ctx: &mut ActionContext<'_>,
) -> Action {
    let adjacent = agent.position.chebyshev(target.position) <= 1;
    let melee = Direction::toward(agent.position, target.position)
        .filter(|_| adjacent)
        .map(Action::Melee);
    let Some(held) = agent.equipment.weapon() else {
        return melee.unwrap_or_else(|| approach(agent, ai, target, state, ctx));
    };

    match held.attack_type() {
        AttackType::Melee => melee.unwrap_or_else(|| approach(agent, ai, target, state, ctx)),
        AttackType::Ranged => {
            let rounds = weapon::ranged_profile(held.category)
                .map_or(0, |profile| weapon::rounds_available(&agent.equipment, &profile));
            if rounds == 0 {
                return melee_fallback(agent, ai, target, adjacent, state, ctx);
            }
            if in_reach(agent, held, target, ctx) {
                Action::Ranged(target.position)
            } else {
                approach(agent, ai, target, state, ctx)
            }
        }
        AttackType::Magic => {
            if can_cast(agent, held) && in_reach(agent, held, target, ctx) {
                Action::Magic(target.position)
            } else if let Some(melee) = melee.filter(|_| weapon::can_melee(held.category)) {
                melee
            } else {
                approach(agent, ai, target, state, ctx)
            }
        }
    }
}

/// Out of ammunition: put the weapon away next to the target so bare hands
/// take over, otherwise close in.
fn melee_fallback(
    agent: &ActorState,
    ai: &mut AiState,
    target: &ActorState,
    adjacent: bool,
    state: &GameState,
    ctx: &mut ActionContext<'_>,
) -> Action {
    if !adjacent {
        return approach(agent, ai, target, state, ctx);
    }
    match agent.equipment.weapon {
        Some(ref held) if agent.inventory.can_accept(held) => Action::Unequip(EquipSlot::Weapon),
        _ => Action::Wait,
    }
}

fn in_reach(
    agent: &ActorState,
    held: &Weapon,
    target: &ActorState,
    ctx: &ActionContext<'_>,
) -> bool {
    let range_ok = match held.attack_type() {
        AttackType::Magic if held.range == 0 => true,
        _ => agent.position.euclidean(target.position) <= held.range as f32,
    };
    range_ok && has_line_of_sight(ctx.map(), agent.position, target.position)
}

fn can_cast(agent: &ActorState, held: &Weapon) -> bool {
    match weapon::profile(AttackType::Magic, held.category) {
        Some(profile) if profile.has(WeaponFlags::CASTS_SKILLS) => {
            weapon::ready_wand_skill(agent, held).is_ok()
        }
        Some(_) => agent.stats.pool(PoolKind::Mp) >= held.mp_cost,
        None => false,
    }
}

fn approach(
    agent: &ActorState,
    ai: &mut AiState,
    target: &ActorState,
    state: &GameState,
    ctx: &ActionContext<'_>,
) -> Action {
    ai.path = path::approach_path(
        ctx.map(),
        state,
        ctx.config().blocking_penalty,
        agent.position,
        &[target.position],
    );
    follow_path(agent, ai).unwrap_or(Action::Wait)
}

fn flee(
    agent: &ActorState,
    ai: &mut AiState,
    target: &ActorState,
    state: &GameState,
    ctx: &ActionContext<'_>,
) -> Action {
    let config = ctx.config();
    ai.path = path::flee_path(
        ctx.map(),
        state,
        config.blocking_penalty,
        config.flee_scale,
        agent.position,
        &[target.position],
    );
    follow_path(agent, ai).unwrap_or(Action::Wait)
}

/// No target in sight: keep walking the cached route, otherwise idle or head
/// for a random room.
fn wander(
    agent: &ActorState,
    ai: &mut AiState,
    state: &GameState,
    ctx: &mut ActionContext<'_>,
) -> Action {
    if let Some(action) = follow_path(agent, ai) {
        return action;
    }
    if ai.target.is_some() {
        tracing::debug!(actor = %agent.id, "target lost");
    }
    ai.forget_target();
    if ctx.dice.coin() {
        return Action::Wait;
    }

    let rooms = ctx.map().room_centers();
    let Some(index) = ctx.dice.pick(rooms.len()) else {
        return Action::Wait;
    };
    ai.path = path::approach_path(
        ctx.map(),
        state,
        ctx.config().blocking_penalty,
        agent.position,
        &[rooms[index]],
    );
    follow_path(agent, ai).unwrap_or(Action::Wait)
}

/// Move toward the head of the cached path. A stale path is dropped.
fn follow_path(agent: &ActorState, ai: &mut AiState) -> Option<Action> {
    let next = *ai.path.first()?;
    let direction = Direction::toward(agent.position, next)
        .filter(|_| agent.position.chebyshev(next) == 1);
    if direction.is_none() {
        ai.path.clear();
    }
    direction.map(Action::Move)
}

#[cfg(test)]
mod tests;
