//! Read-only world data and the explicit context handed to every action.
//!
//! Oracles expose static map geometry and deterministic randomness. The
//! [`GameEnv`] aggregate bundles them with the rule configuration;
//! [`ActionContext`] adds the mutable per-segment pieces (dice stream and
//! message sink) so no call reaches for global engine state.
mod error;
mod log;
mod map;
mod rng;

pub use error::OracleError;
pub use log::{MessageLog, NullLog, TracingLog};
pub use map::{
    FieldOfView, GridMap, MapDimensions, MapOracle, StaticTile, TerrainKind, field_of_view,
    has_line_of_sight, is_visible, line,
};
pub use rng::{Dice, PcgRng, RngOracle, compute_seed};

use crate::config::GameConfig;

/// Aggregates read-only oracles required by the action pipeline.
#[derive(Clone, Copy)]
pub struct GameEnv<'a> {
    map: &'a dyn MapOracle,
    rng: &'a dyn RngOracle,
    config: &'a GameConfig,
}

impl<'a> GameEnv<'a> {
    pub fn new(map: &'a dyn MapOracle, rng: &'a dyn RngOracle, config: &'a GameConfig) -> Self {
        Self { map, rng, config }
    }

    pub fn map(&self) -> &'a dyn MapOracle {
        self.map
    }

    pub fn rng(&self) -> &'a dyn RngOracle {
        self.rng
    }

    pub fn config(&self) -> &'a GameConfig {
        self.config
    }
}

/// Everything one actor segment needs beyond the game state itself.
pub struct ActionContext<'a> {
    pub env: GameEnv<'a>,
    pub dice: Dice<'a>,
    pub log: &'a mut dyn MessageLog,
}

impl<'a> ActionContext<'a> {
    pub fn new(env: GameEnv<'a>, dice: Dice<'a>, log: &'a mut dyn MessageLog) -> Self {
        Self { env, dice, log }
    }

    #[inline]
    pub fn map(&self) -> &'a dyn MapOracle {
        self.env.map()
    }

    #[inline]
    pub fn config(&self) -> &'a GameConfig {
        self.env.config()
    }

    pub fn narrate(&mut self, message: impl Into<String>) {
        self.log.push(message.into());
    }
}
