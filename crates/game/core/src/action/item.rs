//! Consumable items.

use crate::action::transition::{ActionTransition, charge};
use crate::action::{ActionError, ActionOutcome, Impossible};
use crate::combat::AttackType;
use crate::env::{ActionContext, field_of_view};
use crate::state::{
    ActorState, Consumable, ConsumableEffect, EntityId, GameState, ItemKind, Position, Tick,
};

/// Use the consumable in an inventory slot, optionally aimed at a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct UseItemAction {
    slot: usize,
    target: Option<Position>,
}

impl UseItemAction {
    pub(crate) fn new(slot: usize, target: Option<Position>) -> Self {
        Self { slot, target }
    }

    fn consumable(actor: &ActorState, slot: usize) -> Result<&Consumable, Impossible> {
        let item = actor.inventory.get(slot).ok_or(Impossible::NoSuchItem)?;
        match &item.kind {
            ItemKind::Consumable(consumable) => Ok(consumable),
            _ => Err(Impossible::NotUsable),
        }
    }

    fn aimed(&self, actor: &ActorState, ctx: &ActionContext<'_>) -> Result<Position, Impossible> {
        let target = self.target.ok_or(Impossible::NeedsTarget)?;
        if !field_of_view(ctx.map(), actor.position, actor.sight_range()).contains(target) {
            return Err(Impossible::NotVisible);
        }
        Ok(target)
    }

    fn confusion_target(
        &self,
        actor: &ActorState,
        state: &GameState,
        ctx: &ActionContext<'_>,
    ) -> Result<EntityId, Impossible> {
        let target = self.aimed(actor, ctx)?;
        let victim = state
            .living_actor_at(target)
            .ok_or(Impossible::NeedsTarget)?;
        if victim.id == actor.id {
            return Err(Impossible::ConfuseSelf);
        }
        Ok(victim.id)
    }

    /// Closest visible living actor strictly within `range + 1`.
    fn lightning_target(
        actor: &ActorState,
        state: &GameState,
        ctx: &ActionContext<'_>,
        range: u32,
    ) -> Result<EntityId, Impossible> {
        let visible = field_of_view(ctx.map(), actor.position, actor.sight_range());
        let mut closest = range as f32 + 1.0;
        let mut chosen = None;
        for other in &state.actors {
            if other.id == actor.id || !other.is_alive() || !visible.contains(other.position) {
                continue;
            }
            let distance = actor.position.euclidean(other.position);
            if distance < closest {
                closest = distance;
                chosen = Some(other.id);
            }
        }
        chosen.ok_or(Impossible::NoEnemyClose)
    }

    fn fireball_victims(
        &self,
        actor: &ActorState,
        state: &GameState,
        ctx: &ActionContext<'_>,
        radius: u32,
    ) -> Result<Vec<EntityId>, Impossible> {
        let target = self.aimed(actor, ctx)?;
        let victims: Vec<EntityId> = state
            .actors
            .iter()
            .filter(|other| other.is_alive() && other.position.euclidean(target) <= radius as f32)
            .map(|other| other.id)
            .collect();
        if victims.is_empty() {
            return Err(Impossible::NoTargetsInRadius);
        }
        Ok(victims)
    }
}

impl ActionTransition for UseItemAction {
    fn pre_validate(
        &self,
        actor: &ActorState,
        state: &GameState,
        ctx: &ActionContext<'_>,
    ) -> Result<Tick, ActionError> {
        let consumable = Self::consumable(actor, self.slot)?;
        match &consumable.effect {
            ConsumableEffect::Heal { .. } => {
                if actor.stats.pools.hp.is_full() {
                    return Err(Impossible::HealthFull.into());
                }
            }
            ConsumableEffect::Confuse { .. } => {
                self.confusion_target(actor, state, ctx)?;
            }
            ConsumableEffect::Lightning { range, .. } => {
                Self::lightning_target(actor, state, ctx, *range)?;
            }
            ConsumableEffect::Fireball { radius, .. } => {
                self.fireball_victims(actor, state, ctx, *radius)?;
            }
            ConsumableEffect::Apply(_) => {}
        }
        Ok(consumable.time_cost)
    }

    /// The item is used up once its effect has landed.
    fn apply(
        &self,
        actor: EntityId,
        cost: Tick,
        state: &mut GameState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<ActionOutcome, ActionError> {
        let user = state
            .actor(actor)
            .ok_or(ActionError::UnknownActor(actor))?;
        let name = user
            .inventory
            .get(self.slot)
            .map(|item| item.name.clone())
            .ok_or(Impossible::NoSuchItem)?;
        let effect = Self::consumable(user, self.slot)?.effect.clone();
        let is_player = user.is_player();

        match effect {
            ConsumableEffect::Heal { amount, effect } => {
                let user = state
                    .actor_mut(actor)
                    .ok_or(ActionError::UnknownActor(actor))?;
                let recovered = user.stats.heal(amount);
                if let Some(effect) = &effect {
                    user.apply_effect(effect);
                }
                if is_player {
                    ctx.narrate(format!("You consume the {name}, and recover {recovered} HP!"));
                }
            }
            ConsumableEffect::Confuse { turns } => {
                let victim = self.confusion_target(user, state, ctx)?;
                if let Some(target) = state.actor_mut(victim) {
                    if let Some(ai) = target.ai.as_mut() {
                        ai.confuse(turns);
                    }
                    let message = format!(
                        "The eyes of the {} look vacant, as it starts to stumble around!",
                        target.name
                    );
                    ctx.narrate(message);
                }
            }
            ConsumableEffect::Lightning { damage, range } => {
                let victim = Self::lightning_target(user, state, ctx, range)?;
                if let Some(target) = state.actor(victim) {
                    let message = format!(
                        "A lightning bolt strikes the {} with a loud thunder, for {damage} damage!",
                        target.name
                    );
                    ctx.narrate(message);
                }
                state.apply_damage(victim, damage, Some(actor), AttackType::Magic, &mut *ctx.log);
            }
            ConsumableEffect::Fireball { damage, radius } => {
                let victims = self.fireball_victims(user, state, ctx, radius)?;
                for victim in victims {
                    if let Some(target) = state.actor(victim) {
                        let message = format!(
                            "The {} is engulfed in a fiery explosion, taking {damage} damage!",
                            target.name
                        );
                        ctx.narrate(message);
                    }
                    state.apply_damage(victim, damage, Some(actor), AttackType::Magic, &mut *ctx.log);
                }
            }
            ConsumableEffect::Apply(effect) => {
                let user = state
                    .actor_mut(actor)
                    .ok_or(ActionError::UnknownActor(actor))?;
                user.apply_effect(&effect);
                if is_player {
                    ctx.narrate(format!("You use the {name}."));
                }
            }
        }

        // The fireball may have killed the user; the budget is charged anyway.
        let outcome = charge(state, actor, cost)?;
        if let Some(user) = state.actor_mut(actor) {
            user.inventory.remove(self.slot);
        }
        tracing::debug!(%actor, item = %name, "consumable used");
        Ok(outcome)
    }
}
