//! End-of-segment bookkeeping.

use crate::effects::EffectEvent;
use crate::env::MessageLog;
use crate::state::{EntityId, GameState};

/// Runs one actor's upkeep in fixed order: status effects, conditions,
/// cooldowns, then a budget refill.
///
/// Damage from effects can defeat the actor; that goes through the usual
/// Lifesaving / Final Breath / death resolution.
pub(crate) fn run(id: EntityId, state: &mut GameState, log: &mut dyn MessageLog) {
    let Some(actor) = state.actor_mut(id) else {
        return;
    };
    if !actor.is_alive() {
        return;
    }

    for event in actor.effects.update(&mut actor.stats) {
        match event {
            EffectEvent::Ticked { name, pool, change } => {
                tracing::trace!(actor = %id, effect = %name, %pool, change, "effect ticked");
            }
            EffectEvent::Expired { name } => {
                tracing::debug!(actor = %id, effect = %name, "effect expired");
            }
        }
    }
    let settled = actor.resolve_defeat();
    if let Some(saved_by) = settled.saved_by {
        log.push(format!("{} is saved by {saved_by}!", actor.name));
    }

    for name in actor.conditions.update() {
        tracing::debug!(actor = %id, condition = %name, "condition expired");
    }
    actor.abilities.tick_cooldowns();
    actor.stats.time.refill();

    if settled.killed {
        state.credit_kill(id, log);
    }
}
