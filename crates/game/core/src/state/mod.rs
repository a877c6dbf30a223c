//! Authoritative game state.
//!
//! [`GameState`] owns every actor and every item on the floor. Actors are
//! kept in spawn order, which is also the order the scheduler runs them in.
//! Everything else borrows from here for the duration of one call.
pub mod error;
pub mod types;

pub use error::StateError;
pub use types::{
    ActorState, Ammo, AmmoKind, Armor, Consumable, ConsumableEffect, Container, DamageDice,
    DamageLog, DamageRecord, DamageTaken, Direction, EntityId, EquipSlot, Equipment, Faction,
    FactionSet, GroundItem, Inventory, Item, ItemKind, Level, Personality, Position,
    ResourceMeter, Tick, Weapon, WeaponCategory,
};

use crate::combat::AttackType;
use crate::env::{MapOracle, MessageLog};

/// Canonical snapshot of the simulation.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// Set once at game start. Combined with `round` for every RNG stream.
    pub game_seed: u64,
    /// Completed rounds.
    pub round: u64,
    /// Never reused. 0 is reserved for the player.
    next_entity_id: u32,
    /// Spawn order.
    pub actors: Vec<ActorState>,
    pub items: Vec<GroundItem>,
}

impl GameState {
    pub fn new(game_seed: u64) -> Self {
        Self {
            game_seed,
            round: 0,
            next_entity_id: 1,
            actors: Vec::new(),
            items: Vec::new(),
        }
    }

    fn allocate_entity_id(&mut self) -> Result<EntityId, StateError> {
        let id = EntityId(self.next_entity_id.max(1));
        self.next_entity_id = id
            .0
            .checked_add(1)
            .ok_or(StateError::EntityIdOverflow { current: id.0 })?;
        Ok(id)
    }

    fn ensure_vacant(&self, actor: &ActorState) -> Result<(), StateError> {
        if !actor.blocks_movement {
            return Ok(());
        }
        match self.blocking_actor_at(actor.position) {
            Some(occupant) => Err(StateError::PositionOccupied {
                position: actor.position,
                occupant: occupant.id,
            }),
            None => Ok(()),
        }
    }

    /// Adds the player under [`EntityId::PLAYER`].
    pub fn add_player(&mut self, mut actor: ActorState) -> Result<EntityId, StateError> {
        if self.actor(EntityId::PLAYER).is_some() {
            return Err(StateError::DuplicatePlayer);
        }
        self.ensure_vacant(&actor)?;
        actor.id = EntityId::PLAYER;
        actor.ai = None;
        self.actors.push(actor);
        Ok(EntityId::PLAYER)
    }

    /// Adds a non-player actor with a freshly allocated id.
    pub fn spawn(&mut self, mut actor: ActorState) -> Result<EntityId, StateError> {
        self.ensure_vacant(&actor)?;
        let id = self.allocate_entity_id()?;
        actor.id = id;
        tracing::debug!(%id, name = %actor.name, position = %actor.position, "spawned actor");
        self.actors.push(actor);
        Ok(id)
    }

    pub fn actor(&self, id: EntityId) -> Option<&ActorState> {
        self.actors.iter().find(|actor| actor.id == id)
    }

    pub fn actor_mut(&mut self, id: EntityId) -> Option<&mut ActorState> {
        self.actors.iter_mut().find(|actor| actor.id == id)
    }

    pub fn player(&self) -> Option<&ActorState> {
        self.actor(EntityId::PLAYER)
    }

    /// Ids in spawn order.
    pub fn actor_ids(&self) -> Vec<EntityId> {
        self.actors.iter().map(|actor| actor.id).collect()
    }

    pub fn blocking_actor_at(&self, position: Position) -> Option<&ActorState> {
        self.actors
            .iter()
            .find(|actor| actor.blocks_movement && actor.position == position)
    }

    pub fn living_actor_at(&self, position: Position) -> Option<&ActorState> {
        self.actors
            .iter()
            .find(|actor| actor.is_alive() && actor.position == position)
    }

    /// Walkable and free of blocking actors.
    pub fn is_vacant(&self, map: &dyn MapOracle, position: Position) -> bool {
        map.is_walkable(position) && self.blocking_actor_at(position).is_none()
    }

    /// Indices into `items` lying on `position`.
    pub fn items_at(&self, position: Position) -> Vec<usize> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, ground)| ground.position == position)
            .map(|(index, _)| index)
            .collect()
    }

    pub fn place_item(&mut self, position: Position, item: Item) {
        self.items.push(GroundItem { position, item });
    }

    pub fn take_item(&mut self, index: usize) -> Option<Item> {
        (index < self.items.len()).then(|| self.items.remove(index).item)
    }

    /// Applies a hit to `target`, narrating deaths and crediting experience
    /// to the last damage source. Returns `None` for unknown targets.
    pub fn apply_damage(
        &mut self,
        target: EntityId,
        amount: i32,
        source: Option<EntityId>,
        attack: AttackType,
        log: &mut dyn MessageLog,
    ) -> Option<DamageTaken> {
        let round = self.round;
        let victim = self.actor_mut(target)?;
        let outcome = victim.take_damage(amount, source, attack, round);

        if let Some(saved_by) = outcome.saved_by {
            log.push(format!("{} is saved by {saved_by}!", victim.name));
        }
        if outcome.killed {
            self.credit_kill(target, log);
        }
        Some(outcome)
    }

    /// Announces a death and credits its experience to the most recent
    /// damage source.
    pub fn credit_kill(&mut self, victim: EntityId, log: &mut dyn MessageLog) {
        let Some(corpse) = self.actor(victim) else {
            return;
        };
        log.push(corpse.death_message());
        let xp = corpse.level.xp_given;
        let killer = corpse.damage_log.last_source();
        if let Some(killer) = killer.and_then(|id| self.actor_mut(id))
            && killer.is_alive()
            && killer.level.add_xp(xp)
        {
            tracing::debug!(killer = %killer.id, xp, "experience awarded");
            if killer.is_player() {
                log.push(format!("You gain {xp} experience points."));
                if killer.level.requires_level_up() {
                    log.push("You feel stronger!".to_owned());
                }
            }
        }
    }
}
