//! Actor statistics.
//!
//! ```text
//! [ Attributes (StatBlock) ]  strength .. charisma, mutated by effects/levels
//!      ↓
//! [ Derived values ]          power, sight, crit, pool maximums
//!      ↓
//! [ Resources (Pools) ]       hp/mp/sp/se meters clamped to their maximums
//! ```
//!
//! Maximums are recomputed from the core block whenever it changes; current
//! pool values are the only stored resource state.

pub mod actor;
pub mod attributes;
pub mod resources;

pub use actor::ActorStats;
pub use attributes::{StatBlock, StatKind};
pub use resources::{PoolBonus, PoolKind, Pools, TimeBudget};
