//! Action layer.
//!
//! Every way an actor can spend time is a variant of [`Action`]. Each variant
//! is carried out by a small transition type that validates against the
//! untouched state first and only then mutates it, so an action either
//! commits fully or fails with nothing charged.
//!
//! # Module Structure
//!
//! - `error`: [`Impossible`] (recoverable, user-facing) and [`ActionError`]
//! - `weapon`: `(AttackType, WeaponCategory)` behaviour table
//! - `movement`: move and wait
//! - `combat`: melee, ranged and magic attacks, skill use
//! - `inventory`: equip, unequip, load, pickup, drop
//! - `item`: consumables

mod combat;
pub mod error;
mod inventory;
mod item;
mod movement;
mod transition;
pub mod weapon;

pub use error::{ActionError, Impossible};
pub use weapon::{WeaponFlags, WeaponProfile};

use combat::{MagicAction, MeleeAction, RangedAction, SkillAction};
use inventory::{DropAction, EquipAction, LoadAction, PickupAction, UnequipAction};
use item::UseItemAction;
use movement::{MoveAction, WaitAction};

use crate::env::ActionContext;
use crate::state::{Direction, EntityId, EquipSlot, GameState, Position, Tick};

/// A single intent. Inventory slots index into the actor's inventory.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Action {
    Move(Direction),
    /// Attack whoever stands in `direction`, otherwise step there.
    Bump(Direction),
    Melee(Direction),
    Ranged(Position),
    Magic(Position),
    UseItem {
        slot: usize,
        target: Option<Position>,
    },
    Equip {
        slot: usize,
    },
    Unequip(EquipSlot),
    /// Load the ammunition in `slot` into the held ranged weapon (or quiver).
    Load {
        slot: usize,
    },
    Pickup,
    Drop {
        slot: usize,
    },
    Skill {
        name: String,
        target: Position,
    },
    /// Give up the rest of the budget.
    Wait,
}

/// What a successful action cost.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActionOutcome {
    pub spent: Tick,
}

impl ActionOutcome {
    pub const fn spent(spent: Tick) -> Self {
        Self { spent }
    }
}

impl Action {
    /// Performs the action for `actor`.
    ///
    /// Recoverable rejections come back as [`ActionError::Impossible`] and
    /// leave the state untouched.
    pub fn perform(
        &self,
        actor: EntityId,
        state: &mut GameState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<ActionOutcome, ActionError> {
        let outcome = match self {
            Action::Move(direction) => transition::run(&MoveAction::new(*direction), actor, state, ctx),
            Action::Bump(direction) => return self.bump(*direction, actor, state, ctx),
            Action::Melee(direction) => {
                transition::run(&MeleeAction::new(*direction), actor, state, ctx)
            }
            Action::Ranged(target) => transition::run(&RangedAction::new(*target), actor, state, ctx),
            Action::Magic(target) => transition::run(&MagicAction::new(*target), actor, state, ctx),
            Action::UseItem { slot, target } => {
                transition::run(&UseItemAction::new(*slot, *target), actor, state, ctx)
            }
            Action::Equip { slot } => transition::run(&EquipAction::new(*slot), actor, state, ctx),
            Action::Unequip(slot) => transition::run(&UnequipAction::new(*slot), actor, state, ctx),
            Action::Load { slot } => transition::run(&LoadAction::new(*slot), actor, state, ctx),
            Action::Pickup => transition::run(&PickupAction, actor, state, ctx),
            Action::Drop { slot } => transition::run(&DropAction::new(*slot), actor, state, ctx),
            Action::Skill { name, target } => {
                transition::run(&SkillAction::new(name, *target), actor, state, ctx)
            }
            Action::Wait => transition::run(&WaitAction, actor, state, ctx),
        };
        match &outcome {
            Ok(done) => tracing::trace!(actor = %actor, action = ?self, spent = %done.spent, "action performed"),
            Err(error) => tracing::trace!(actor = %actor, action = ?self, %error, "action rejected"),
        }
        outcome
    }

    fn bump(
        &self,
        direction: Direction,
        actor: EntityId,
        state: &mut GameState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<ActionOutcome, ActionError> {
        let origin = state
            .actor(actor)
            .ok_or(ActionError::UnknownActor(actor))?
            .position;
        let resolved = if state.living_actor_at(origin.step(direction)).is_some() {
            Action::Melee(direction)
        } else {
            Action::Move(direction)
        };
        resolved.perform(actor, state, ctx)
    }
}
