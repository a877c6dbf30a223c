//! Influence-map pathfinding.
//!
//! A [`CostMap`] prices every tile from the static layout plus the blocking
//! actors on it. An [`InfluenceMap`] is a Dijkstra distance field over those
//! costs, seeded at one or more goals. Descending it greedily approaches the
//! goals; descending the inverted flee field runs from them.
//!
//! Both are rebuilt for every query and never stored.
mod cost;
mod field;

pub use cost::CostMap;
pub use field::InfluenceMap;

use crate::env::MapOracle;
use crate::state::{GameState, Position};

/// Steps from `from` toward the nearest of `goals`, start excluded.
pub fn approach_path(
    map: &dyn MapOracle,
    state: &GameState,
    penalty: u32,
    from: Position,
    goals: &[Position],
) -> Vec<Position> {
    let costs = CostMap::build(map, state, penalty);
    InfluenceMap::approach(&costs, goals).descend(from)
}

/// Steps from `from` away from `threats`, start excluded.
pub fn flee_path(
    map: &dyn MapOracle,
    state: &GameState,
    penalty: u32,
    scale: f32,
    from: Position,
    threats: &[Position],
) -> Vec<Position> {
    let costs = CostMap::build(map, state, penalty);
    InfluenceMap::flee(&costs, threats, scale).descend(from)
}
