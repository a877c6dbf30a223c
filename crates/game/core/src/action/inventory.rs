//! Inventory handling: equip, unequip, load, pickup and drop.

use crate::action::transition::{ActionTransition, charge};
use crate::action::weapon::{self, WeaponFlags, WeaponProfile};
use crate::action::{ActionError, ActionOutcome, Impossible};
use crate::env::ActionContext;
use crate::state::{ActorState, Ammo, EntityId, EquipSlot, GameState, Item, ItemKind, Tick};

fn item_at(actor: &ActorState, slot: usize) -> Result<&Item, Impossible> {
    actor.inventory.get(slot).ok_or(Impossible::NoSuchItem)
}

fn holder_mut(state: &mut GameState, actor: EntityId) -> Result<&mut ActorState, ActionError> {
    state
        .actor_mut(actor)
        .ok_or(ActionError::UnknownActor(actor))
}

/// Move an inventory item into its equipment slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct EquipAction {
    slot: usize,
}

impl EquipAction {
    pub(crate) fn new(slot: usize) -> Self {
        Self { slot }
    }
}

impl ActionTransition for EquipAction {
    fn pre_validate(
        &self,
        actor: &ActorState,
        _state: &GameState,
        ctx: &ActionContext<'_>,
    ) -> Result<Tick, ActionError> {
        if !item_at(actor, self.slot)?.is_equippable() {
            return Err(Impossible::NotEquippable.into());
        }
        Ok(ctx.config().equip_cost)
    }

    fn apply(
        &self,
        actor: EntityId,
        cost: Tick,
        state: &mut GameState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<ActionOutcome, ActionError> {
        let outcome = charge(state, actor, cost)?;
        let holder = holder_mut(state, actor)?;
        let item = holder
            .inventory
            .remove(self.slot)
            .ok_or(Impossible::NoSuchItem)?;
        let name = item.name.clone();
        let displaced = match holder.equipment.equip(item) {
            Ok(displaced) => displaced,
            Err(item) => {
                // Validated as equippable; put it back untouched.
                let restored = holder.inventory.add(item);
                debug_assert!(restored.is_ok(), "removed item must fit back");
                return Err(Impossible::NotEquippable.into());
            }
        };
        let is_player = holder.is_player();
        let removed = displaced.map(|old| {
            let old_name = old.name.clone();
            // The equipped item just freed a slot.
            let stored = holder.inventory.add(old);
            debug_assert!(stored.is_ok(), "displaced item must fit the freed slot");
            old_name
        });

        if is_player {
            if let Some(old_name) = removed {
                ctx.narrate(format!("You remove the {old_name}."));
            }
            ctx.narrate(format!("You equip the {name}."));
        }
        Ok(outcome)
    }
}

/// Move an equipped item back into the inventory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct UnequipAction {
    slot: EquipSlot,
}

impl UnequipAction {
    pub(crate) fn new(slot: EquipSlot) -> Self {
        Self { slot }
    }
}

impl ActionTransition for UnequipAction {
    fn pre_validate(
        &self,
        actor: &ActorState,
        _state: &GameState,
        ctx: &ActionContext<'_>,
    ) -> Result<Tick, ActionError> {
        let item = actor
            .equipment
            .slot(self.slot)
            .ok_or(Impossible::NoSuchItem)?;
        if !actor.inventory.can_accept(item) {
            return Err(Impossible::InventoryFull.into());
        }
        Ok(ctx.config().equip_cost)
    }

    fn apply(
        &self,
        actor: EntityId,
        cost: Tick,
        state: &mut GameState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<ActionOutcome, ActionError> {
        let outcome = charge(state, actor, cost)?;
        let holder = holder_mut(state, actor)?;
        let item = holder
            .equipment
            .unequip(self.slot)
            .ok_or(Impossible::NoSuchItem)?;
        let name = item.name.clone();
        if let Err(item) = holder.inventory.add(item) {
            let restored = holder.equipment.equip(item);
            debug_assert!(
                matches!(restored, Ok(None)),
                "unequipped item must return to its empty slot"
            );
            return Err(Impossible::InventoryFull.into());
        }
        if holder.is_player() {
            ctx.narrate(format!("You remove the {name}."));
        }
        Ok(outcome)
    }
}

/// Load ammunition into the held ranged weapon, or into the quiver for bows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct LoadAction {
    slot: usize,
}

impl LoadAction {
    pub(crate) fn new(slot: usize) -> Self {
        Self { slot }
    }

    /// Rounds the destination still has room for.
    fn room(actor: &ActorState, profile: &WeaponProfile, ammo: &Ammo) -> Result<u32, Impossible> {
        let (held, capacity) = if profile.has(WeaponFlags::NEEDS_CONTAINER) {
            let quiver = actor.equipment.quiver().ok_or(Impossible::NoQuiver)?;
            if quiver.accepts != ammo.kind {
                return Err(Impossible::WrongAmmo);
            }
            (quiver.contents.as_ref(), quiver.capacity)
        } else {
            let held = actor
                .equipment
                .weapon()
                .ok_or(Impossible::NotRangedWeapon)?;
            (held.loaded.as_ref(), held.capacity)
        };
        if held.is_some_and(|stack| !stack.stacks_with(ammo)) {
            return Err(Impossible::WrongAmmo);
        }
        let current = held.map_or(0, |stack| stack.quantity);
        match capacity.saturating_sub(current) {
            0 => Err(Impossible::AmmoFull),
            room => Ok(room),
        }
    }

    fn profile(actor: &ActorState) -> Result<WeaponProfile, Impossible> {
        actor
            .equipment
            .weapon()
            .and_then(|held| weapon::ranged_profile(held.category))
            .ok_or(Impossible::NotRangedWeapon)
    }
}

impl ActionTransition for LoadAction {
    fn pre_validate(
        &self,
        actor: &ActorState,
        _state: &GameState,
        _ctx: &ActionContext<'_>,
    ) -> Result<Tick, ActionError> {
        let profile = Self::profile(actor)?;
        let ammo = item_at(actor, self.slot)?
            .ammo()
            .ok_or(Impossible::WrongAmmo)?;
        if profile.ammo != Some(ammo.kind) {
            return Err(Impossible::WrongAmmo.into());
        }
        Self::room(actor, &profile, ammo)?;

        if profile.has(WeaponFlags::RELOAD_ENDS_TURN) {
            Ok(actor.stats.time.current())
        } else {
            Ok(profile.reload_time)
        }
    }

    /// Moves what fits; any overflow stays in its inventory slot.
    fn apply(
        &self,
        actor: EntityId,
        cost: Tick,
        state: &mut GameState,
        _ctx: &mut ActionContext<'_>,
    ) -> Result<ActionOutcome, ActionError> {
        let holder = holder_mut(state, actor)?;
        let profile = Self::profile(holder)?;
        let stack = item_at(holder, self.slot)?
            .ammo()
            .ok_or(Impossible::WrongAmmo)?;
        let room = Self::room(holder, &profile, stack)?;

        let destination = if profile.has(WeaponFlags::NEEDS_CONTAINER) {
            holder.equipment.quiver_mut().map(|quiver| &mut quiver.contents)
        } else {
            holder.equipment.weapon_mut().map(|held| &mut held.loaded)
        };
        let Some(destination) = destination else {
            return Err(Impossible::NotRangedWeapon.into());
        };
        let Some(ItemKind::Ammo(stack)) = holder
            .inventory
            .get_mut(self.slot)
            .map(|item| &mut item.kind)
        else {
            return Err(Impossible::WrongAmmo.into());
        };
        let loaded = stack.split(room);
        let emptied = stack.quantity == 0;
        let moved = loaded.quantity;
        if let Some(existing) = destination.as_mut() {
            existing.quantity += moved;
        } else {
            *destination = Some(loaded);
        }
        if emptied {
            holder.inventory.remove(self.slot);
        }
        tracing::debug!(%actor, moved, "ammunition loaded");

        if profile.has(WeaponFlags::RELOAD_ENDS_TURN) {
            Ok(ActionOutcome::spent(holder.stats.time.exhaust()))
        } else {
            charge(state, actor, cost)
        }
    }
}

/// Pick up the first item lying under the actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PickupAction;

impl ActionTransition for PickupAction {
    fn pre_validate(
        &self,
        actor: &ActorState,
        state: &GameState,
        ctx: &ActionContext<'_>,
    ) -> Result<Tick, ActionError> {
        let index = state
            .items_at(actor.position)
            .first()
            .copied()
            .ok_or(Impossible::NothingToPickUp)?;
        if !actor.inventory.can_accept(&state.items[index].item) {
            return Err(Impossible::InventoryFull.into());
        }
        Ok(ctx.config().pickup_cost)
    }

    fn apply(
        &self,
        actor: EntityId,
        cost: Tick,
        state: &mut GameState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<ActionOutcome, ActionError> {
        let position = holder_mut(state, actor)?.position;
        let index = state
            .items_at(position)
            .first()
            .copied()
            .ok_or(Impossible::NothingToPickUp)?;
        let item = state.take_item(index).ok_or(Impossible::NothingToPickUp)?;
        let message = match item.ammo() {
            Some(ammo) if ammo.quantity > 1 => {
                format!("You picked up {} {}s!", ammo.quantity, item.name)
            }
            _ => format!("You picked up the {}!", item.name),
        };

        let holder = holder_mut(state, actor)?;
        let is_player = holder.is_player();
        if let Err(item) = holder.inventory.add(item) {
            state.place_item(position, item);
            return Err(Impossible::InventoryFull.into());
        }
        let outcome = charge(state, actor, cost)?;
        if is_player {
            ctx.narrate(message);
        }
        Ok(outcome)
    }
}

/// Drop an inventory item on the actor's tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct DropAction {
    slot: usize,
}

impl DropAction {
    pub(crate) fn new(slot: usize) -> Self {
        Self { slot }
    }
}

impl ActionTransition for DropAction {
    fn pre_validate(
        &self,
        actor: &ActorState,
        _state: &GameState,
        ctx: &ActionContext<'_>,
    ) -> Result<Tick, ActionError> {
        item_at(actor, self.slot)?;
        Ok(ctx.config().drop_cost)
    }

    fn apply(
        &self,
        actor: EntityId,
        cost: Tick,
        state: &mut GameState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<ActionOutcome, ActionError> {
        let outcome = charge(state, actor, cost)?;
        let holder = holder_mut(state, actor)?;
        let item = holder
            .inventory
            .remove(self.slot)
            .ok_or(Impossible::NoSuchItem)?;
        let (position, is_player) = (holder.position, holder.is_player());
        if is_player {
            ctx.narrate(format!("You dropped the {}.", item.name));
        }
        state.place_item(position, item);
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::action::tests::{fighter, run};
    use crate::combat::Element;
    use crate::state::{AmmoKind, Armor, Container, DamageDice, Position, Weapon, WeaponCategory};

    fn ammo(kind: AmmoKind, name: &str, quantity: u32) -> Item {
        Item::new(
            name,
            ItemKind::Ammo(Ammo {
                kind,
                name: name.into(),
                quantity,
                damage: 1,
                element: Element::Normal,
            }),
        )
    }

    fn wielding(category: WeaponCategory, capacity: u32) -> ActorState {
        let mut actor = fighter("Player", 1, 1);
        actor.equipment.weapon = Some(Item::new(
            category.to_string(),
            ItemKind::Weapon(
                Weapon::new(category, Element::Normal, DamageDice::fixed(2)).with_capacity(capacity),
            ),
        ));
        actor
    }

    #[test]
    fn load_moves_what_fits_and_keeps_the_rest() {
        let mut state = GameState::new(1);
        let mut gunner = wielding(WeaponCategory::Gun, 6);
        gunner.inventory.add(ammo(AmmoKind::Bullet, "Bullet", 10)).unwrap();
        state.add_player(gunner).unwrap();

        let (result, _) = run(&mut state, |state, ctx| {
            Action::Load { slot: 0 }.perform(EntityId::PLAYER, state, ctx)
        });
        // Reloading a gun takes the rest of the turn.
        assert_eq!(result.unwrap().spent, Tick::whole(6));
        let player = state.player().unwrap();
        assert_eq!(player.equipment.weapon().unwrap().loaded_rounds(), 6);
        assert_eq!(player.inventory.get(0).and_then(Item::ammo).unwrap().quantity, 4);
    }

    #[test]
    fn partial_load_leaves_the_remainder_in_place() {
        let mut state = GameState::new(1);
        let mut gunner = wielding(WeaponCategory::Gun, 6);
        gunner.inventory.add(ammo(AmmoKind::Bullet, "Bullet", 8)).unwrap();
        gunner.inventory.add(ammo(AmmoKind::Arrow, "Arrow", 3)).unwrap();
        state.add_player(gunner).unwrap();

        let (result, _) = run(&mut state, |state, ctx| {
            Action::Load { slot: 0 }.perform(EntityId::PLAYER, state, ctx)
        });
        assert!(result.is_ok());
        let player = state.player().unwrap();
        let rounds_left = player.inventory.get(0).and_then(Item::ammo).unwrap();
        assert_eq!((rounds_left.kind, rounds_left.quantity), (AmmoKind::Bullet, 2));
        assert_eq!(player.inventory.get(1).and_then(Item::ammo).unwrap().quantity, 3);
        assert_eq!(player.inventory.len(), 2);
    }

    #[test]
    fn load_rejects_mismatches_and_full_weapons() {
        let mut state = GameState::new(1);
        let mut crossbowman = wielding(WeaponCategory::Crossbow, 1);
        crossbowman.inventory.add(ammo(AmmoKind::Arrow, "Arrow", 3)).unwrap();
        crossbowman.inventory.add(ammo(AmmoKind::Bolt, "Bolt", 3)).unwrap();
        state.add_player(crossbowman).unwrap();

        let (results, _) = run(&mut state, |state, ctx| {
            (
                Action::Load { slot: 0 }.perform(EntityId::PLAYER, state, ctx),
                Action::Load { slot: 1 }.perform(EntityId::PLAYER, state, ctx),
                Action::Load { slot: 1 }.perform(EntityId::PLAYER, state, ctx),
            )
        });
        assert_eq!(results.0, Err(Impossible::WrongAmmo.into()));
        assert_eq!(results.1.unwrap().spent, Tick::whole(3));
        assert_eq!(results.2, Err(Impossible::AmmoFull.into()));
        let player = state.player().unwrap();
        assert_eq!(player.equipment.weapon().unwrap().loaded_rounds(), 1);
        assert_eq!(player.inventory.get(1).and_then(Item::ammo).unwrap().quantity, 2);
    }

    #[test]
    fn bows_load_into_the_quiver() {
        let mut state = GameState::new(1);
        let mut archer = wielding(WeaponCategory::Bow, 0);
        archer.inventory.add(ammo(AmmoKind::Arrow, "Arrow", 5)).unwrap();
        state.add_player(archer).unwrap();

        let (missing, _) = run(&mut state, |state, ctx| {
            Action::Load { slot: 0 }.perform(EntityId::PLAYER, state, ctx)
        });
        assert_eq!(missing, Err(Impossible::NoQuiver.into()));

        state.actor_mut(EntityId::PLAYER).unwrap().equipment.container = Some(Item::new(
            "Quiver",
            ItemKind::Container(Container {
                accepts: AmmoKind::Arrow,
                capacity: 20,
                contents: None,
            }),
        ));
        let (loaded, _) = run(&mut state, |state, ctx| {
            Action::Load { slot: 0 }.perform(EntityId::PLAYER, state, ctx)
        });
        assert_eq!(loaded.unwrap().spent, Tick::ZERO);
        let player = state.player().unwrap();
        assert_eq!(player.equipment.quiver().unwrap().rounds(), 5);
        assert!(player.inventory.is_empty());
    }

    #[test]
    fn equip_swaps_the_old_item_back_into_the_pack() {
        let mut state = GameState::new(1);
        let mut player = fighter("Player", 1, 1);
        player.equipment.armor = Some(Item::new("Leather", ItemKind::Armor(Armor { defense: 1 })));
        player
            .inventory
            .add(Item::new("Chain Mail", ItemKind::Armor(Armor { defense: 3 })))
            .unwrap();
        player.inventory.add(ammo(AmmoKind::Bolt, "Bolt", 1)).unwrap();
        state.add_player(player).unwrap();

        let (results, log) = run(&mut state, |state, ctx| {
            (
                Action::Equip { slot: 1 }.perform(EntityId::PLAYER, state, ctx),
                Action::Equip { slot: 0 }.perform(EntityId::PLAYER, state, ctx),
            )
        });
        assert_eq!(results.0, Err(Impossible::NotEquippable.into()));
        assert_eq!(results.1.unwrap().spent, Tick::tenths(5));
        assert_eq!(
            log,
            vec![
                "You remove the Leather.".to_owned(),
                "You equip the Chain Mail.".to_owned()
            ]
        );
        let player = state.player().unwrap();
        assert_eq!(player.equipment.defense(), 3);
        assert!(player.inventory.position(|item| item.name == "Leather").is_some());
    }

    #[test]
    fn pickup_merges_ammo_and_drop_puts_items_down() {
        let mut state = GameState::new(1);
        let mut player = fighter("Player", 1, 1);
        player.inventory.add(ammo(AmmoKind::Arrow, "Arrow", 4)).unwrap();
        state.add_player(player).unwrap();
        state.place_item(Position::new(1, 1), ammo(AmmoKind::Arrow, "Arrow", 6));

        let (results, log) = run(&mut state, |state, ctx| {
            (
                Action::Pickup.perform(EntityId::PLAYER, state, ctx),
                Action::Pickup.perform(EntityId::PLAYER, state, ctx),
                Action::Drop { slot: 0 }.perform(EntityId::PLAYER, state, ctx),
            )
        });
        assert_eq!(results.0.unwrap().spent, Tick::tenths(5));
        assert_eq!(results.1, Err(Impossible::NothingToPickUp.into()));
        assert_eq!(results.2.unwrap().spent, Tick::tenths(1));
        assert_eq!(log[0], "You picked up 6 Arrows!");
        assert_eq!(log[1], "You dropped the Arrow.");

        let player = state.player().unwrap();
        assert!(player.inventory.is_empty());
        assert_eq!(player.stats.time.current(), Tick::tenths(54));
        let dropped = state.items_at(Position::new(1, 1));
        assert_eq!(state.items[dropped[0]].item.ammo().unwrap().quantity, 10);
    }

    #[test]
    fn full_inventory_refuses_pickup() {
        let mut state = GameState::new(1);
        let mut player = fighter("Player", 1, 1);
        while !player.inventory.is_full() {
            player
                .inventory
                .add(Item::new("Rag", ItemKind::Armor(Armor { defense: 0 })))
                .unwrap();
        }
        state.add_player(player).unwrap();
        state.place_item(
            Position::new(1, 1),
            Item::new("Plate", ItemKind::Armor(Armor { defense: 5 })),
        );
        let (result, _) = run(&mut state, |state, ctx| {
            Action::Pickup.perform(EntityId::PLAYER, state, ctx)
        });
        assert_eq!(result, Err(Impossible::InventoryFull.into()));
        assert_eq!(state.items.len(), 1);
    }
}
