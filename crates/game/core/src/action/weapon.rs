//! Weapon behaviour table.
//!
//! Instead of one action type per weapon family, behaviour is looked up by
//! `(AttackType, WeaponCategory)` and described with a handful of flags.

use bitflags::bitflags;

use crate::action::Impossible;
use crate::combat::AttackType;
use crate::skill::{AbilitySet, Skill};
use crate::state::{ActorState, AmmoKind, Equipment, Tick, Weapon, WeaponCategory};

bitflags! {
    /// Capabilities of a weapon profile.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct WeaponFlags: u8 {
        /// Each attack consumes one round.
        const USES_AMMO        = 1 << 0;
        /// Rounds are drawn from the equipped container, not the weapon.
        const NEEDS_CONTAINER  = 1 << 1;
        /// Rounds are loaded into the weapon itself.
        const RELOADS          = 1 << 2;
        /// Keeps firing while time and rounds last.
        const MULTI_SHOT       = 1 << 3;
        /// Usable for bump attacks.
        const CAN_MELEE        = 1 << 4;
        const COSTS_MANA       = 1 << 5;
        /// Fires carried skills instead of a direct attack.
        const CASTS_SKILLS     = 1 << 6;
        /// Reloading uses up the rest of the turn.
        const RELOAD_ENDS_TURN = 1 << 7;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WeaponProfile {
    /// Cost of one attack (one shot for multi-shot weapons).
    pub time: Tick,
    pub reload_time: Tick,
    pub ammo: Option<AmmoKind>,
    pub flags: WeaponFlags,
}

impl WeaponProfile {
    const fn new(time: Tick, flags: WeaponFlags) -> Self {
        Self {
            time,
            reload_time: Tick::ZERO,
            ammo: None,
            flags,
        }
    }

    const fn with_ammo(mut self, ammo: AmmoKind, reload_time: Tick) -> Self {
        self.ammo = Some(ammo);
        self.reload_time = reload_time;
        self
    }

    pub fn has(&self, flag: WeaponFlags) -> bool {
        self.flags.contains(flag)
    }
}

/// Behaviour of `category` when used for an `attack`. `None` when the
/// combination makes no sense (a bow in melee, a sword at range).
pub fn profile(attack: AttackType, category: WeaponCategory) -> Option<WeaponProfile> {
    use AttackType::*;
    use WeaponCategory::*;

    let profile = match (attack, category) {
        (Melee, Sword | Axe) => WeaponProfile::new(Tick::whole(5), WeaponFlags::CAN_MELEE),
        (Melee, Dagger) => WeaponProfile::new(Tick::whole(4), WeaponFlags::CAN_MELEE),
        (Melee, Staff) => WeaponProfile::new(Tick::whole(5), WeaponFlags::CAN_MELEE),

        (Ranged, Bow) => WeaponProfile::new(
            Tick::whole(5),
            WeaponFlags::USES_AMMO.union(WeaponFlags::NEEDS_CONTAINER),
        )
        .with_ammo(AmmoKind::Arrow, Tick::ZERO),
        (Ranged, Crossbow) => WeaponProfile::new(
            Tick::whole(2),
            WeaponFlags::USES_AMMO.union(WeaponFlags::RELOADS),
        )
        .with_ammo(AmmoKind::Bolt, Tick::whole(3)),
        (Ranged, Gun) => WeaponProfile::new(
            Tick::tenths(15),
            WeaponFlags::USES_AMMO
                .union(WeaponFlags::RELOADS)
                .union(WeaponFlags::MULTI_SHOT)
                .union(WeaponFlags::RELOAD_ENDS_TURN),
        )
        .with_ammo(AmmoKind::Bullet, Tick::ZERO),

        (Magic, Staff) => WeaponProfile::new(
            Tick::whole(5),
            WeaponFlags::COSTS_MANA.union(WeaponFlags::CAN_MELEE),
        ),
        (Magic, Orb) => WeaponProfile::new(Tick::whole(4), WeaponFlags::COSTS_MANA),
        (Magic, Wand) => WeaponProfile::new(Tick::ZERO, WeaponFlags::CASTS_SKILLS),

        _ => return None,
    };
    Some(profile)
}

/// Profile for loading ammunition into whatever ranged weapon is held.
pub fn ranged_profile(category: WeaponCategory) -> Option<WeaponProfile> {
    profile(AttackType::Ranged, category)
}

/// Rounds the held ranged weapon can fire without reloading.
pub fn rounds_available(equipment: &Equipment, profile: &WeaponProfile) -> u32 {
    if profile.has(WeaponFlags::NEEDS_CONTAINER) {
        equipment.quiver().map_or(0, |quiver| quiver.rounds())
    } else {
        equipment.weapon().map_or(0, |weapon| weapon.loaded_rounds())
    }
}

/// First wand spell the holder could cast now: off cooldown and affordable.
pub fn ready_wand_skill<'a>(
    holder: &'a ActorState,
    wand: &'a Weapon,
) -> Result<&'a Skill, Impossible> {
    let mut cooling = false;
    for spell in &wand.skills {
        if holder.abilities.cooldown(&spell.name) > 0 {
            cooling = true;
            continue;
        }
        if AbilitySet::can_afford(spell, &holder.stats) {
            return Ok(spell);
        }
    }
    if cooling {
        Err(Impossible::SkillOnCooldown)
    } else {
        Err(Impossible::NotEnoughResources)
    }
}

/// Whether a weapon of `category` may be used for bump attacks.
pub fn can_melee(category: WeaponCategory) -> bool {
    profile(AttackType::Melee, category).is_some_and(|p| p.has(WeaponFlags::CAN_MELEE))
}
