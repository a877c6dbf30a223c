//! Content loaders for reading game data from files.
//!
//! TOML carries rule tunables, RON carries maps and actor rosters. Every
//! loader reports failures as [`LoadResult`] errors naming the offending file.

pub mod actors;
pub mod config;
pub mod factory;
pub mod map;

pub use actors::{ActorLoader, Placement, TemplateRef};
pub use config::{ConfigLoader, ConfigOverride};
pub use factory::ContentFactory;
pub use map::{MapLoader, MapSpec};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
