//! Map data loader.
//!
//! Maps are glyph rows plus the room centres idle monsters wander between:
//!
//! ```ron
//! (
//!     rows: [
//!         "#####",
//!         "#...#",
//!         "#####",
//!     ],
//!     rooms: [(2, 1)],
//! )
//! ```

use std::path::Path;

use delve_core::env::{GridMap, MapOracle};
use delve_core::state::Position;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Map data structure for RON files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapSpec {
    pub rows: Vec<String>,
    #[serde(default)]
    pub rooms: Vec<(i32, i32)>,
}

impl MapSpec {
    /// Builds the grid, checking that every room centre is walkable.
    pub fn build(&self) -> LoadResult<GridMap> {
        let rows: Vec<&str> = self.rows.iter().map(String::as_str).collect();
        let rooms: Vec<Position> = self
            .rooms
            .iter()
            .map(|&(x, y)| Position::new(x, y))
            .collect();
        let map = GridMap::parse(&rows)?;
        if let Some(room) = rooms.iter().find(|&&room| !map.is_walkable(room)) {
            anyhow::bail!("room centre {room} is not walkable");
        }
        Ok(map.with_rooms(rooms))
    }
}

/// Loader for map data from RON files.
pub struct MapLoader;

impl MapLoader {
    pub fn load(path: &Path) -> LoadResult<GridMap> {
        let content = read_file(path)?;
        let spec: MapSpec = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse map RON: {}", e))?;
        spec.build()
            .map_err(|e| anyhow::anyhow!("Invalid map {}: {}", path.display(), e))
    }
}
