pub mod actor;
pub mod common;
pub mod faction;
pub mod item;
pub mod personality;
pub mod progress;

pub use actor::{ActorState, DamageTaken, EquipSlot, Equipment, Inventory};
pub use common::{Direction, EntityId, Position, ResourceMeter, Tick};
pub use faction::{Faction, FactionSet};
pub use item::{
    Ammo, AmmoKind, Armor, Consumable, ConsumableEffect, Container, DamageDice, GroundItem, Item,
    ItemKind, Weapon, WeaponCategory,
};
pub use personality::Personality;
pub use progress::{DamageLog, DamageRecord, Level};
