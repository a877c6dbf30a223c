//! Actor roster loader.
//!
//! A roster places actors on a map. Each entry either names a catalog
//! template or spells one out inline:
//!
//! ```ron
//! [
//!     (template: Catalog("player"), position: (2, 2)),
//!     (template: Catalog("orc"), position: (9, 3)),
//!     (template: Custom((
//!         name: "Rat",
//!         stats: (constitution: 2, awareness: 8),
//!         factions: (members: [Wildlife], hostile: [Player]),
//!         ai: true,
//!     )), position: (4, 5)),
//! ]
//! ```

use std::path::Path;

use delve_core::config::GameConfig;
use delve_core::state::{ActorState, GameState, Position};
use serde::Deserialize;

use crate::catalog::{ActorTemplate, actors};
use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Clone, Deserialize)]
pub enum TemplateRef {
    Catalog(String),
    Custom(ActorTemplate),
}

#[derive(Debug, Clone, Deserialize)]
struct RosterEntry {
    template: TemplateRef,
    position: (i32, i32),
}

/// A resolved roster entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub template: ActorTemplate,
    pub position: Position,
}

impl Placement {
    pub fn spawn(&self, config: &GameConfig) -> ActorState {
        self.template.spawn(self.position, config)
    }
}

/// Loader for actor rosters from RON files.
pub struct ActorLoader;

impl ActorLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<Placement>> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid roster {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<Vec<Placement>> {
        let entries: Vec<RosterEntry> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse actor roster RON: {}", e))?;

        entries
            .into_iter()
            .map(|entry| {
                let template = match entry.template {
                    TemplateRef::Catalog(key) => actors::template(&key)
                        .ok_or_else(|| anyhow::anyhow!("unknown actor template '{key}'"))?,
                    TemplateRef::Custom(template) => template,
                };
                let (x, y) = entry.position;
                Ok(Placement {
                    template,
                    position: Position::new(x, y),
                })
            })
            .collect()
    }

    /// Spawns a roster into a fresh state. The first entry without an AI
    /// becomes the player; everything else spawns in roster order.
    pub fn populate(
        placements: &[Placement],
        game_seed: u64,
        config: &GameConfig,
    ) -> LoadResult<GameState> {
        let mut state = GameState::new(game_seed);
        let mut has_player = false;
        for placement in placements {
            let actor = placement.spawn(config);
            if !has_player && !placement.template.ai {
                state.add_player(actor)?;
                has_player = true;
            } else {
                state.spawn(actor)?;
            }
        }
        if !has_player {
            anyhow::bail!("roster has no player");
        }
        Ok(state)
    }
}
