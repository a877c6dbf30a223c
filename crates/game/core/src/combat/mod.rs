//! Combat resolution.
//!
//! Everything here is a pure query over borrowed actor data: components
//! evaluate against a stat block, the element table answers matchups, and
//! [`DamageCalculator`] folds them into one integer. Applying the result is
//! the caller's job (see `ActorState::take_damage`).

pub mod components;
pub mod damage;
pub mod element;

pub use components::DamageComponent;
pub use damage::{AttackType, Combatant, DamageCalculator, DamageRequest};
pub use element::{Element, ElementalTypes, Matchup};
