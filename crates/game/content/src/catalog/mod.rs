//! Built-in content catalog.
//!
//! Every entry is a constructor returning a fresh value, so callers can
//! tweak what they get without touching anyone else's copy.

pub mod actors;
pub mod effects;
pub mod items;
pub mod skills;

pub use actors::ActorTemplate;

use delve_core::env::{GridMap, OracleError};
use delve_core::state::Position;

/// Two rooms joined by a corridor, with a pillar in the west room.
pub const ARENA: [&str; 9] = [
    "####################",
    "#......#############",
    "#.#....#############",
    "#..................#",
    "#......#######.....#",
    "#......#######.....#",
    "##############.....#",
    "##############.....#",
    "####################",
];

/// The demo arena with its room centres registered for wandering.
pub fn arena() -> Result<GridMap, OracleError> {
    Ok(GridMap::parse(&ARENA)?.with_rooms(vec![Position::new(3, 3), Position::new(16, 5)]))
}
