//! Action errors.
//!
//! [`Impossible`] is the recoverable family: the attempt was rejected before
//! anything changed and its Display text is what the player reads.
//! [`ActionError`] wraps it together with the logic errors that must
//! propagate.

use crate::error::{ErrorSeverity, GameError};
use crate::skill::SkillError;
use crate::state::EntityId;

/// An attempt that cannot be carried out right now. Nothing was charged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Impossible {
    #[error("That way is blocked.")]
    Blocked,
    #[error("You do not have enough time.")]
    NotEnoughTime,
    #[error("You do not have enough mana.")]
    NotEnoughMana,
    #[error("Your inventory is full.")]
    InventoryFull,
    #[error("There is nothing here to pick up.")]
    NothingToPickUp,
    #[error("You don't have that item.")]
    NoSuchItem,
    #[error("That item cannot be equipped.")]
    NotEquippable,
    #[error("That item cannot be used.")]
    NotUsable,
    #[error("Nothing to attack.")]
    NothingToAttack,
    #[error("You don't have an appropriate weapon.")]
    NoAppropriateWeapon,
    #[error("You are wielding a non-ranged weapon (or not wielding a weapon).")]
    NotRangedWeapon,
    #[error("You are wielding a non-magic weapon (or not wielding a weapon).")]
    NotMagicWeapon,
    #[error("You don't have a direct line of fire.")]
    NoLineOfFire,
    #[error("You wouldn't land a shot from this distance.")]
    OutOfRange,
    #[error("You cannot target an area that you cannot see.")]
    NotVisible,
    #[error("You cannot target yourself!")]
    TargetSelf,
    #[error("There is no target at this location.")]
    NoTargetAtLocation,
    #[error("There are no targets in the radius.")]
    NoTargetsInRadius,
    #[error("No enemy is close enough to strike.")]
    NoEnemyClose,
    #[error("No ammo.")]
    NoAmmo,
    #[error("No quiver.")]
    NoQuiver,
    #[error("Wrong ammo type.")]
    WrongAmmo,
    #[error("Ammo is already full.")]
    AmmoFull,
    #[error("Your health is already full.")]
    HealthFull,
    #[error("You cannot confuse yourself!")]
    ConfuseSelf,
    #[error("You must select an enemy to target.")]
    NeedsTarget,
    #[error("Skill is on cooldown.")]
    SkillOnCooldown,
    #[error("Not enough resources (MP, SP, SE) to use this skill.")]
    NotEnoughResources,
    #[error("You don't know that skill.")]
    UnknownSkill,
}

impl GameError for Impossible {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        use Impossible::*;
        match self {
            Blocked => "IMPOSSIBLE_BLOCKED",
            NotEnoughTime => "IMPOSSIBLE_NOT_ENOUGH_TIME",
            NotEnoughMana => "IMPOSSIBLE_NOT_ENOUGH_MANA",
            InventoryFull => "IMPOSSIBLE_INVENTORY_FULL",
            NothingToPickUp => "IMPOSSIBLE_NOTHING_TO_PICK_UP",
            NoSuchItem => "IMPOSSIBLE_NO_SUCH_ITEM",
            NotEquippable => "IMPOSSIBLE_NOT_EQUIPPABLE",
            NotUsable => "IMPOSSIBLE_NOT_USABLE",
            NothingToAttack => "IMPOSSIBLE_NOTHING_TO_ATTACK",
            NoAppropriateWeapon => "IMPOSSIBLE_NO_APPROPRIATE_WEAPON",
            NotRangedWeapon => "IMPOSSIBLE_NOT_RANGED_WEAPON",
            NotMagicWeapon => "IMPOSSIBLE_NOT_MAGIC_WEAPON",
            NoLineOfFire => "IMPOSSIBLE_NO_LINE_OF_FIRE",
            OutOfRange => "IMPOSSIBLE_OUT_OF_RANGE",
            NotVisible => "IMPOSSIBLE_NOT_VISIBLE",
            TargetSelf => "IMPOSSIBLE_TARGET_SELF",
            NoTargetAtLocation => "IMPOSSIBLE_NO_TARGET_AT_LOCATION",
            NoTargetsInRadius => "IMPOSSIBLE_NO_TARGETS_IN_RADIUS",
            NoEnemyClose => "IMPOSSIBLE_NO_ENEMY_CLOSE",
            NoAmmo => "IMPOSSIBLE_NO_AMMO",
            NoQuiver => "IMPOSSIBLE_NO_QUIVER",
            WrongAmmo => "IMPOSSIBLE_WRONG_AMMO",
            AmmoFull => "IMPOSSIBLE_AMMO_FULL",
            HealthFull => "IMPOSSIBLE_HEALTH_FULL",
            ConfuseSelf => "IMPOSSIBLE_CONFUSE_SELF",
            NeedsTarget => "IMPOSSIBLE_NEEDS_TARGET",
            SkillOnCooldown => "IMPOSSIBLE_SKILL_ON_COOLDOWN",
            NotEnoughResources => "IMPOSSIBLE_NOT_ENOUGH_RESOURCES",
            UnknownSkill => "IMPOSSIBLE_UNKNOWN_SKILL",
        }
    }
}

/// Errors surfaced by [`Action::perform`](super::Action::perform).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    #[error(transparent)]
    Impossible(#[from] Impossible),

    #[error("actor {0} not found")]
    UnknownActor(EntityId),

    /// Dead actors cannot act; the scheduler should have skipped them.
    #[error("actor {0} is dead")]
    ActorDead(EntityId),

    #[error(transparent)]
    Skill(#[from] SkillError),
}

impl ActionError {
    /// The user-facing rejection, if this is one.
    pub fn as_impossible(&self) -> Option<Impossible> {
        match self {
            Self::Impossible(reason) => Some(*reason),
            Self::Skill(SkillError::Impossible(reason)) => Some(*reason),
            _ => None,
        }
    }
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Impossible(reason) => reason.severity(),
            Self::UnknownActor(_) | Self::ActorDead(_) => ErrorSeverity::Internal,
            Self::Skill(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Impossible(reason) => reason.error_code(),
            Self::UnknownActor(_) => "ACTION_UNKNOWN_ACTOR",
            Self::ActorDead(_) => "ACTION_ACTOR_DEAD",
            Self::Skill(error) => error.error_code(),
        }
    }
}
