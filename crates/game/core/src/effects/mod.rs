//! Status effect and condition bookkeeping.
//!
//! Both collections live on the actor and are advanced by the scheduler's
//! upkeep: status effects first, then conditions.

mod condition;
mod status;

pub use condition::{Condition, Conditions, names as condition_names};
pub use status::{
    EffectChange, EffectEvent, ModifierTarget, StatModifier, StatusEffect, StatusEffects,
    TickModifier,
};
