//! Deterministic combat and cognition rules for a turn-based dungeon crawler.
//!
//! `delve-core` defines the canonical rules (damage, actions, skills, status
//! effects, NPC decisions, round scheduling) as pure APIs over an explicit
//! [`GameState`]. Randomness, map geometry and tunables are injected through
//! [`GameEnv`], so the same seed always replays the same game. All round
//! progression flows through [`engine::GameEngine`].
pub mod action;
pub mod ai;
pub mod combat;
pub mod config;
pub mod effects;
pub mod engine;
pub mod env;
pub mod error;
pub mod path;
pub mod skill;
pub mod state;
pub mod stats;

pub use action::{Action, ActionError, ActionOutcome, Impossible};
pub use ai::{AiMode, AiState, StepOutcome};
pub use combat::{AttackType, DamageCalculator, DamageComponent, Element, ElementalTypes};
pub use config::GameConfig;
pub use effects::{Condition, Conditions, StatusEffect, StatusEffects};
pub use engine::{GameEngine, RoundReport, TurnError};
pub use env::{
    ActionContext, Dice, GameEnv, GridMap, MapOracle, MessageLog, PcgRng, RngOracle, TracingLog,
};
pub use error::{ErrorContext, ErrorSeverity, GameError};
pub use path::InfluenceMap;
pub use skill::{AbilitySet, Skill, SkillDirective};
pub use state::{ActorState, Direction, EntityId, GameState, Item, Position, Tick};
pub use stats::{ActorStats, PoolKind, StatBlock};
