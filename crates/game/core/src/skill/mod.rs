//! Skills and abilities.
//!
//! A [`Skill`] is an immutable prototype: costs, a cooldown length and a
//! [`SkillDirective`] saying what it does. Each actor tracks its own
//! cooldowns in an [`AbilitySet`], so prototypes can be shared freely
//! between actors and wands.
//!
//! [`activate`] is the single entry point. It assumes readiness has been
//! checked (the Skill action does this and reports a recoverable error);
//! activating a skill that is not ready is a logic error.

mod abilities;
mod error;
mod unit;

pub use abilities::AbilitySet;
pub use error::SkillError;
pub use unit::{AreaForm, CombatUnit, UnitShape};

use crate::action::Impossible;
use crate::env::ActionContext;
use crate::state::{Direction, EntityId, GameState, Position, Tick};
use crate::stats::PoolKind;

/// Resources spent when a skill fires.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SkillCost {
    pub mp: i32,
    pub sp: i32,
    pub se: i32,
    pub time: Tick,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SkillDirective {
    Combat(CombatUnit),
    /// Jump to a vacant tile within `range` (Chebyshev). 0 means unlimited.
    Teleport { range: u32 },
    /// Run up to `distance` tiles toward the target, stopping when blocked.
    Dash { distance: u32 },
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Skill {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cost: SkillCost,
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_cooldown: u32,
    pub directive: SkillDirective,
}

impl Skill {
    pub fn new(
        name: impl Into<String>,
        cost: SkillCost,
        max_cooldown: u32,
        directive: SkillDirective,
    ) -> Self {
        Self {
            name: name.into(),
            cost,
            max_cooldown,
            directive,
        }
    }

    /// Whether the skill is aimed at a tile.
    pub fn needs_target(&self) -> bool {
        match &self.directive {
            SkillDirective::Combat(unit) => unit.needs_target(),
            SkillDirective::Teleport { .. } | SkillDirective::Dash { .. } => true,
        }
    }
}

/// What an activation did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SkillOutcome {
    /// Actors hit by combat units.
    pub affected: u32,
    /// Tiles moved by movement directives.
    pub travelled: u32,
    pub time_spent: Tick,
}

/// Fires `skill` for `user` at `target`, then charges its costs and starts
/// its cooldown on the user's ability set.
pub fn activate(
    user: EntityId,
    skill: &Skill,
    target: Position,
    state: &mut GameState,
    ctx: &mut ActionContext<'_>,
) -> Result<SkillOutcome, SkillError> {
    let actor = state.actor(user).ok_or(SkillError::UnknownActor(user))?;
    if !actor.abilities.is_ready(skill, &actor.stats) {
        return Err(SkillError::NotReady {
            skill: skill.name.clone(),
        });
    }

    let mut outcome = match &skill.directive {
        SkillDirective::Combat(unit) => SkillOutcome {
            affected: unit.execute(user, target, state, ctx)?,
            ..SkillOutcome::default()
        },
        SkillDirective::Teleport { range } => teleport(user, *range, target, state, ctx)?,
        SkillDirective::Dash { distance } => dash(user, skill, *distance, target, state, ctx)?,
    };

    let actor = state
        .actor_mut(user)
        .ok_or(SkillError::UnknownActor(user))?;
    actor.stats.adjust_pool(PoolKind::Mp, -skill.cost.mp);
    actor.stats.adjust_pool(PoolKind::Sp, -skill.cost.sp);
    actor.stats.adjust_pool(PoolKind::Se, -skill.cost.se);
    if actor.stats.time.try_spend(skill.cost.time).is_some() {
        outcome.time_spent = outcome.time_spent + skill.cost.time;
    }
    actor.abilities.start_cooldown(skill);
    tracing::debug!(actor = %user, skill = %skill.name, ?outcome, "skill activated");
    Ok(outcome)
}

fn teleport(
    user: EntityId,
    range: u32,
    target: Position,
    state: &mut GameState,
    ctx: &mut ActionContext<'_>,
) -> Result<SkillOutcome, SkillError> {
    let origin = state
        .actor(user)
        .ok_or(SkillError::UnknownActor(user))?
        .position;
    let distance = origin.chebyshev(target);
    if range > 0 && distance > range {
        return Err(Impossible::OutOfRange.into());
    }
    if !state.is_vacant(ctx.map(), target) {
        return Err(Impossible::Blocked.into());
    }
    if let Some(actor) = state.actor_mut(user) {
        actor.position = target;
    }
    Ok(SkillOutcome {
        travelled: distance,
        ..SkillOutcome::default()
    })
}

fn dash(
    user: EntityId,
    skill: &Skill,
    distance: u32,
    target: Position,
    state: &mut GameState,
    ctx: &mut ActionContext<'_>,
) -> Result<SkillOutcome, SkillError> {
    let origin = state
        .actor(user)
        .ok_or(SkillError::UnknownActor(user))?
        .position;
    let direction = Direction::toward(origin, target).ok_or(SkillError::InvalidDirective {
        skill: skill.name.clone(),
        reason: "dash needs a non-zero direction",
    })?;

    let step_cost = ctx.config().dash_step_cost;
    let reserved = skill.cost.time;
    let mut outcome = SkillOutcome::default();
    let mut position = origin;
    for _ in 0..distance {
        let next = position.step(direction);
        if !state.is_vacant(ctx.map(), next) {
            break;
        }
        let Some(actor) = state.actor_mut(user) else {
            break;
        };
        if !actor.stats.time.can_afford(step_cost + reserved) {
            break;
        }
        actor.stats.time.try_spend(step_cost);
        actor.position = next;
        position = next;
        outcome.travelled += 1;
        outcome.time_spent = outcome.time_spent + step_cost;
    }
    Ok(outcome)
}
