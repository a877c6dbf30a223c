//! Status effects and conditions.

use delve_core::effects::{Condition, ModifierTarget, StatusEffect, condition_names};
use delve_core::stats::{PoolKind, StatKind};

pub fn poison() -> StatusEffect {
    StatusEffect::new("Poison", 4).with_tick(PoolKind::Hp, -10)
}

pub fn regeneration() -> StatusEffect {
    StatusEffect::new("Regeneration", 6).with_tick(PoolKind::Hp, 15)
}

/// Temporary +20 to maximum hp.
pub fn health_potion() -> StatusEffect {
    StatusEffect::new("Health Potion", 5).with_modifier(ModifierTarget::MaxPool(PoolKind::Hp), 20)
}

pub fn strength_buff() -> StatusEffect {
    StatusEffect::new("Strength Buff", 3)
        .with_modifier(ModifierTarget::Stat(StatKind::Strength), 10)
}

pub fn slow() -> StatusEffect {
    StatusEffect::new("Slow", 4).with_modifier(ModifierTarget::Stat(StatKind::Agility), -5)
}

pub fn stunned() -> Condition {
    Condition::new(condition_names::STUNNED, 2)
}

pub fn petrified() -> Condition {
    Condition::new(condition_names::PETRIFIED, 100)
}

pub fn sleep() -> Condition {
    Condition::new(condition_names::SLEEP, 30)
}

/// Loses the segment one time in four.
pub fn paralyzed() -> Condition {
    Condition::new(condition_names::PARALYZED, 25).with_chance(25)
}

pub fn debuff_block() -> Condition {
    Condition::new(condition_names::DEBUFF_BLOCK, 5)
}

pub fn final_breath() -> Condition {
    Condition::permanent(condition_names::FINAL_BREATH)
}

pub fn lifesaving() -> Condition {
    Condition::permanent(condition_names::LIFESAVING).consumable()
}

/// Every catalog status effect.
pub fn all_effects() -> Vec<StatusEffect> {
    vec![
        poison(),
        regeneration(),
        health_potion(),
        strength_buff(),
        slow(),
    ]
}

pub fn effect(name: &str) -> Option<StatusEffect> {
    all_effects().into_iter().find(|effect| effect.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effects_are_found_by_name() {
        assert_eq!(effect("Poison"), Some(poison()));
        assert_eq!(effect("Regeneration").unwrap().duration, 6);
        assert!(effect("Curse").is_none());
    }

    #[test]
    fn lifesaving_is_spent_on_use() {
        assert!(lifesaving().consumable);
        assert!(lifesaving().permanent);
        assert!(!final_breath().consumable);
        assert_eq!(paralyzed().chance, Some(25));
    }
}
