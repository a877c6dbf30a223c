//! Item-user bootstrap: gear upkeep an NPC does before it fights.

use super::{AiState, perception};
use crate::action::Action;
use crate::action::weapon::{self, WeaponFlags};
use crate::combat::AttackType;
use crate::env::ActionContext;
use crate::path;
use crate::state::{ActorState, AmmoKind, GameState, Item, ItemKind, Weapon};
use crate::stats::PoolKind;

/// First gear chore that applies, in priority order.
pub(super) fn plan(
    agent: &ActorState,
    ai: &mut AiState,
    state: &GameState,
    ctx: &ActionContext<'_>,
) -> Option<Action> {
    pick_up_here(agent, state)
        .or_else(|| equip_weapon(agent))
        .or_else(|| equip_quiver(agent))
        .or_else(|| load(agent))
        .or_else(|| seek_supplies(agent, ai, state, ctx))
}

/// Picks up the item underfoot when it is worth carrying.
fn pick_up_here(agent: &ActorState, state: &GameState) -> Option<Action> {
    let index = *state.items_at(agent.position).first()?;
    let item = &state.items.get(index)?.item;
    (is_useful(agent, item) && agent.inventory.can_accept(item)).then_some(Action::Pickup)
}

/// Weapons and containers are always worth having; ammunition only when it
/// feeds the held ranged weapon.
fn is_useful(agent: &ActorState, item: &Item) -> bool {
    match &item.kind {
        ItemKind::Weapon(_) | ItemKind::Container(_) => true,
        ItemKind::Ammo(ammo) => agent
            .equipment
            .weapon()
            .and_then(|held| weapon::ranged_profile(held.category))
            .and_then(|profile| profile.ammo)
            .is_some_and(|kind| kind == ammo.kind),
        _ => false,
    }
}

/// Equips the strongest usable weapon when empty-handed or when the held
/// weapon cannot attack.
fn equip_weapon(agent: &ActorState) -> Option<Action> {
    if agent
        .equipment
        .weapon()
        .is_some_and(|held| is_usable(agent, held))
    {
        return None;
    }
    agent
        .inventory
        .items()
        .iter()
        .enumerate()
        .filter_map(|(slot, item)| item.weapon().map(|held| (slot, held)))
        .filter(|(_, held)| is_usable(agent, held))
        .max_by_key(|(_, held)| held.damage.average())
        .map(|(slot, _)| Action::Equip { slot })
}

fn equip_quiver(agent: &ActorState) -> Option<Action> {
    if agent.equipment.container.is_some() {
        return None;
    }
    let kind = needed_ammo(agent)?;
    let profile = weapon::ranged_profile(agent.equipment.weapon()?.category)?;
    if !profile.has(WeaponFlags::NEEDS_CONTAINER) {
        return None;
    }
    agent
        .inventory
        .position(|item| item.container().is_some_and(|quiver| quiver.accepts == kind))
        .map(|slot| Action::Equip { slot })
}

/// Loads carried rounds into an empty ranged weapon or quiver.
fn load(agent: &ActorState) -> Option<Action> {
    let held = agent.equipment.weapon()?;
    let profile = weapon::ranged_profile(held.category)?;
    if weapon::rounds_available(&agent.equipment, &profile) > 0 {
        return None;
    }
    if profile.has(WeaponFlags::NEEDS_CONTAINER) && agent.equipment.quiver().is_none() {
        return None;
    }
    let kind = profile.ammo?;
    carried_ammo(agent, kind).map(|slot| Action::Load { slot })
}

/// Walks toward visible ammunition, or a melee weapon, when the held ranged
/// weapon is dry and nothing to reload is carried.
fn seek_supplies(
    agent: &ActorState,
    ai: &mut AiState,
    state: &GameState,
    ctx: &ActionContext<'_>,
) -> Option<Action> {
    let kind = needed_ammo(agent)?;
    if carried_ammo(agent, kind).is_some() {
        return None;
    }
    let supply = perception::nearest_visible_item(ctx.map(), agent, state, |item| {
        agent.inventory.can_accept(item) && is_supply(item, kind)
    })?;
    ai.path = path::approach_path(
        ctx.map(),
        state,
        ctx.config().blocking_penalty,
        agent.position,
        &[supply],
    );
    tracing::debug!(actor = %agent.id, %supply, "heading for supplies");
    super::follow_path(agent, ai)
}

/// Ammo kind the held ranged weapon is out of, if it is out.
fn needed_ammo(agent: &ActorState) -> Option<AmmoKind> {
    let profile = weapon::ranged_profile(agent.equipment.weapon()?.category)?;
    if weapon::rounds_available(&agent.equipment, &profile) > 0 {
        return None;
    }
    profile.ammo
}

fn carried_ammo(agent: &ActorState, kind: AmmoKind) -> Option<usize> {
    agent
        .inventory
        .position(|item| item.ammo().is_some_and(|ammo| ammo.kind == kind))
}

fn is_supply(item: &Item, kind: AmmoKind) -> bool {
    match &item.kind {
        ItemKind::Ammo(ammo) => ammo.kind == kind,
        ItemKind::Weapon(held) => weapon::can_melee(held.category),
        _ => false,
    }
}

/// Whether the agent could attack with `held` right now.
fn is_usable(agent: &ActorState, held: &Weapon) -> bool {
    match held.attack_type() {
        AttackType::Melee => true,
        AttackType::Magic => held.mp_cost <= agent.stats.max_for(PoolKind::Mp),
        AttackType::Ranged => {
            held.loaded_rounds() > 0
                || weapon::ranged_profile(held.category)
                    .and_then(|profile| profile.ammo)
                    .is_some_and(|kind| {
                        carried_ammo(agent, kind).is_some()
                            || agent
                                .equipment
                                .quiver()
                                .is_some_and(|quiver| quiver.accepts == kind && quiver.rounds() > 0)
                    })
        }
    }
}
