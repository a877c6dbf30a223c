//! Content for the delve combat core.
//!
//! The [`catalog`] holds the built-in actors, items, skills and effects as
//! plain constructors. With the `loaders` feature the same types can be read
//! from data files: TOML for rule tunables, RON for maps and actor rosters.

pub mod catalog;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::ActorTemplate;

#[cfg(feature = "loaders")]
pub use loaders::{
    ActorLoader, ConfigLoader, ConfigOverride, ContentFactory, LoadResult, MapLoader, MapSpec,
    Placement, TemplateRef,
};
