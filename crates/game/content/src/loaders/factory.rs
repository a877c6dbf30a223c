//! Content factory for building a playable setup from a data directory.

use std::path::{Path, PathBuf};

use delve_core::GameConfig;
use delve_core::env::GridMap;

use crate::loaders::{ActorLoader, ConfigLoader, LoadResult, MapLoader, Placement};

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── actors.ron
/// └── maps/
///     └── arena.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load game configuration from `config.toml`, or the defaults when the
    /// file does not exist.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::info!(path = %path.display(), "no config file, using defaults");
            return Ok(GameConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load a map from `maps/{name}.ron`.
    pub fn load_map(&self, name: &str) -> LoadResult<GridMap> {
        let path = self.data_dir.join("maps").join(format!("{name}.ron"));
        MapLoader::load(&path)
    }

    /// Load the actor roster from `actors.ron`.
    pub fn load_actors(&self) -> LoadResult<Vec<Placement>> {
        let path = self.data_dir.join("actors.ron");
        ActorLoader::load(&path)
    }
}

#[cfg(test)]
mod tests {
    use delve_core::env::MapOracle;
    use delve_core::state::{Position, Tick};

    use super::*;

    fn write(dir: &Path, relative: &str, content: &str) {
        let path = dir.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_config().unwrap(), GameConfig::default());
    }

    #[test]
    fn loads_a_complete_data_directory() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "config.toml", "move_cost = 2\n");
        write(
            dir.path(),
            "maps/hall.ron",
            r########"(rows: ["#####", "#...#", "#####"], rooms: [(2, 1)])"########,
        );
        write(
            dir.path(),
            "actors.ron",
            r#"[(template: Catalog("player"), position: (1, 1))]"#,
        );

        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_config().unwrap().move_cost, Tick::whole(2));
        let map = factory.load_map("hall").unwrap();
        assert_eq!(map.room_centers(), &[Position::new(2, 1)]);
        let roster = factory.load_actors().unwrap();
        assert_eq!(roster[0].position, Position::new(1, 1));
    }

    #[test]
    fn missing_map_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let error = ContentFactory::new(dir.path()).load_map("void").unwrap_err();
        assert!(error.to_string().contains("void.ron"));
    }
}
