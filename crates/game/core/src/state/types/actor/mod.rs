//! Actor state.
//!
//! - `ActorState`: stats, loadout, effects and AI of one creature
//! - `Equipment`: weapon, armor and container slots
//! - `Inventory`: bounded item storage

pub mod equipment;
pub mod inventory;

pub use equipment::{EquipSlot, Equipment};
pub use inventory::Inventory;

use super::{DamageLog, DamageRecord, EntityId, FactionSet, Level, Personality, Position};
use crate::ai::AiState;
use crate::combat::{AttackType, Combatant, ElementalTypes};
use crate::effects::{Conditions, EffectChange, StatusEffect, StatusEffects, condition_names};
use crate::skill::AbilitySet;
use crate::stats::{ActorStats, PoolKind, StatKind};

/// Complete state of one actor.
///
/// # Invariants
///
/// - Pools stay within `[0, max]`; every change goes through `ActorStats`.
/// - A dead actor (hp 0) has no AI and does not block movement.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorState {
    pub id: EntityId,
    pub name: String,
    pub position: Position,
    pub stats: ActorStats,
    pub elements: ElementalTypes,
    pub factions: FactionSet,
    /// `None` for the player and for corpses.
    pub ai: Option<AiState>,
    pub abilities: AbilitySet,
    pub effects: StatusEffects,
    pub conditions: Conditions,
    pub damage_log: DamageLog,
    pub level: Level,
    pub personality: Personality,
    pub equipment: Equipment,
    pub inventory: Inventory,
    pub blocks_movement: bool,
}

/// Result of [`ActorState::take_damage`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageTaken {
    /// Hit points actually removed.
    pub dealt: i32,
    pub killed: bool,
    /// Condition that kept the actor alive, if any.
    pub saved_by: Option<&'static str>,
}

impl ActorState {
    pub fn new(
        id: EntityId,
        name: impl Into<String>,
        position: Position,
        stats: ActorStats,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            position,
            stats,
            elements: ElementalTypes::default(),
            factions: FactionSet::default(),
            ai: None,
            abilities: AbilitySet::default(),
            effects: StatusEffects::default(),
            conditions: Conditions::default(),
            damage_log: DamageLog::default(),
            level: Level::default(),
            personality: Personality::default(),
            equipment: Equipment::empty(),
            inventory: Inventory::empty(),
            blocks_movement: true,
        }
    }

    pub fn with_elements(mut self, elements: ElementalTypes) -> Self {
        self.elements = elements;
        self
    }

    pub fn with_factions(mut self, factions: FactionSet) -> Self {
        self.factions = factions;
        self
    }

    pub fn with_ai(mut self, ai: AiState) -> Self {
        self.ai = Some(ai);
        self
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn with_personality(mut self, personality: Personality) -> Self {
        self.personality = personality;
        self
    }

    pub fn with_equipment(mut self, equipment: Equipment) -> Self {
        self.equipment = equipment;
        self
    }

    pub fn with_inventory(mut self, inventory: Inventory) -> Self {
        self.inventory = inventory;
        self
    }

    pub fn with_abilities(mut self, abilities: AbilitySet) -> Self {
        self.abilities = abilities;
        self
    }

    pub fn is_alive(&self) -> bool {
        self.stats.is_alive()
    }

    pub fn is_player(&self) -> bool {
        self.id.is_player()
    }

    pub fn sight_range(&self) -> u32 {
        self.stats.sight_range()
    }

    pub fn is_hostile_to(&self, other: &ActorState) -> bool {
        self.factions.is_hostile_to(&other.factions)
    }

    /// Borrowed view for damage calculation.
    pub fn combatant(&self) -> Combatant<'_> {
        Combatant::new(&self.stats, self.elements, self.equipment.defense())
    }

    /// Applies (or stacks) a status effect. Harmful effects bounce off a
    /// holder of Debuff Block.
    pub fn apply_effect(&mut self, effect: &StatusEffect) -> EffectChange {
        if self.conditions.has(condition_names::DEBUFF_BLOCK) && is_harmful(effect) {
            tracing::debug!(actor = %self.id, effect = %effect.name, "effect blocked");
            return EffectChange::Rejected;
        }
        self.effects.add(effect, &mut self.stats, &mut self.conditions)
    }

    /// Removes hit points and resolves what happens at zero.
    ///
    /// Positive hits from a known source land in the damage log. At zero hp
    /// a Lifesaving condition is consumed for a full heal; otherwise Final
    /// Breath leaves the actor at 1 hp; otherwise the actor dies.
    pub fn take_damage(
        &mut self,
        amount: i32,
        source: Option<EntityId>,
        attack: AttackType,
        round: u64,
    ) -> DamageTaken {
        let mut outcome = DamageTaken {
            dealt: 0,
            killed: false,
            saved_by: None,
        };
        if amount <= 0 || !self.is_alive() {
            return outcome;
        }

        outcome.dealt = -self.stats.adjust_pool(PoolKind::Hp, -amount);
        if let Some(source) = source {
            self.damage_log.record(DamageRecord {
                source,
                amount: outcome.dealt,
                attack,
                round,
            });
        }
        let settled = self.resolve_defeat();
        outcome.killed = settled.killed;
        outcome.saved_by = settled.saved_by;
        outcome
    }

    /// Settles an actor whose hp just reached zero by any means: Lifesaving
    /// is consumed for a full heal, else Final Breath holds at 1 hp, else the
    /// actor dies. No-op while hp is above zero.
    pub fn resolve_defeat(&mut self) -> DamageTaken {
        let mut outcome = DamageTaken {
            dealt: 0,
            killed: false,
            saved_by: None,
        };
        if self.is_alive() {
            return outcome;
        }

        if self.conditions.consume(condition_names::LIFESAVING) {
            let full = self.stats.pools.hp.maximum();
            self.stats.pools.hp.set(full);
            outcome.saved_by = Some(condition_names::LIFESAVING);
        } else if self.conditions.has(condition_names::FINAL_BREATH) {
            self.stats.pools.hp.set(1);
            outcome.saved_by = Some(condition_names::FINAL_BREATH);
        } else {
            self.die();
            outcome.killed = true;
        }
        outcome
    }

    /// Turns the actor into a corpse.
    pub fn die(&mut self) {
        self.stats.pools.hp.set(0);
        if !self.name.starts_with("remains of ") {
            self.name = format!("remains of {}", self.name);
        }
        self.blocks_movement = false;
        self.ai = None;
    }

    /// Message announcing this actor's death.
    pub fn death_message(&self) -> String {
        if self.is_player() {
            "You died!".to_owned()
        } else {
            let name = self.name.trim_start_matches("remains of ");
            format!("{name} is dead!")
        }
    }

    /// Spends a pending level-up on one stat.
    pub fn increase_level(&mut self, stat: StatKind) -> bool {
        if !self.level.requires_level_up() {
            return false;
        }
        self.level.advance();
        self.stats.modify_stat(stat, 1);
        true
    }
}

fn is_harmful(effect: &StatusEffect) -> bool {
    effect.per_tick.iter().any(|tick| tick.amount < 0)
        || effect.modifiers.iter().any(|modifier| modifier.amount < 0)
}
