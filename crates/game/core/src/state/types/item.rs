//! Item data: weapons, armor, ammunition, containers and consumables.
//!
//! Items are plain data owned by whoever holds them (an inventory, an
//! equipment slot, or the floor). Concrete catalogs live in content crates.

use crate::combat::{AttackType, Element};
use crate::effects::StatusEffect;
use crate::env::Dice;
use crate::skill::Skill;
use crate::state::Tick;

/// Dice expression `count`d`sides` + `bonus`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageDice {
    pub count: u32,
    pub sides: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bonus: i32,
}

impl DamageDice {
    pub const fn new(count: u32, sides: u32, bonus: i32) -> Self {
        Self {
            count,
            sides,
            bonus,
        }
    }

    /// A roll that always yields `value`.
    pub const fn fixed(value: i32) -> Self {
        Self::new(0, 0, value)
    }

    /// Expected value, rounded down.
    pub fn average(&self) -> i32 {
        (self.count * (self.sides + 1) / 2) as i32 + self.bonus
    }

    pub fn roll(&self, dice: &mut Dice<'_>) -> i32 {
        let rolled: u32 = (0..self.count)
            .filter(|_| self.sides > 0)
            .map(|_| dice.range(1, self.sides))
            .sum();
        rolled as i32 + self.bonus
    }
}

/// Weapon family. Together with the attack type it selects a behaviour
/// profile (see `action::weapon`).
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum WeaponCategory {
    Sword,
    Dagger,
    Axe,
    Bow,
    Crossbow,
    Gun,
    Staff,
    Orb,
    Wand,
}

impl WeaponCategory {
    /// Attack type the weapon is normally used with.
    pub const fn attack_type(self) -> AttackType {
        match self {
            Self::Sword | Self::Dagger | Self::Axe => AttackType::Melee,
            Self::Bow | Self::Crossbow | Self::Gun => AttackType::Ranged,
            Self::Staff | Self::Orb | Self::Wand => AttackType::Magic,
        }
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AmmoKind {
    Arrow,
    Bolt,
    Bullet,
}

/// A stack of ammunition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ammo {
    pub kind: AmmoKind,
    pub name: String,
    pub quantity: u32,
    /// Flat damage added to every shot.
    pub damage: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub element: Element,
}

impl Ammo {
    /// Two stacks merge when they are the same ammunition.
    pub fn stacks_with(&self, other: &Ammo) -> bool {
        self.kind == other.kind
            && self.name == other.name
            && self.damage == other.damage
            && self.element == other.element
    }

    /// Splits off up to `amount` rounds, leaving the rest in `self`.
    pub fn split(&mut self, amount: u32) -> Ammo {
        let taken = amount.min(self.quantity);
        self.quantity -= taken;
        Ammo {
            quantity: taken,
            ..self.clone()
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weapon {
    pub category: WeaponCategory,
    #[cfg_attr(feature = "serde", serde(default))]
    pub element: Element,
    pub damage: DamageDice,
    /// Reach in tiles for ranged and magic attacks.
    #[cfg_attr(feature = "serde", serde(default))]
    pub range: u32,
    /// Mana spent per magic attack.
    #[cfg_attr(feature = "serde", serde(default))]
    pub mp_cost: i32,
    /// Rounds a crossbow or gun holds once loaded.
    #[cfg_attr(feature = "serde", serde(default))]
    pub capacity: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub loaded: Option<Ammo>,
    /// Spells carried by a wand.
    #[cfg_attr(feature = "serde", serde(default))]
    pub skills: Vec<Skill>,
}

impl Weapon {
    pub fn new(category: WeaponCategory, element: Element, damage: DamageDice) -> Self {
        Self {
            category,
            element,
            damage,
            range: 0,
            mp_cost: 0,
            capacity: 0,
            loaded: None,
            skills: Vec::new(),
        }
    }

    pub fn with_range(mut self, range: u32) -> Self {
        self.range = range;
        self
    }

    pub fn with_mp_cost(mut self, mp_cost: i32) -> Self {
        self.mp_cost = mp_cost;
        self
    }

    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_skills(mut self, skills: Vec<Skill>) -> Self {
        self.skills = skills;
        self
    }

    pub fn attack_type(&self) -> AttackType {
        self.category.attack_type()
    }

    pub fn loaded_rounds(&self) -> u32 {
        self.loaded.as_ref().map_or(0, |ammo| ammo.quantity)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Armor {
    pub defense: i32,
}

/// Ammunition holder worn in the container slot (a quiver).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Container {
    pub accepts: AmmoKind,
    pub capacity: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub contents: Option<Ammo>,
}

impl Container {
    pub fn rounds(&self) -> u32 {
        self.contents.as_ref().map_or(0, |ammo| ammo.quantity)
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ConsumableEffect {
    /// Restore hp, optionally applying an effect as well.
    Heal {
        amount: i32,
        #[cfg_attr(feature = "serde", serde(default))]
        effect: Option<StatusEffect>,
    },
    /// Scramble the target's AI for a number of turns.
    Confuse { turns: u32 },
    /// Strike the closest visible actor within range.
    Lightning { damage: i32, range: u32 },
    /// Damage every actor around a visible tile.
    Fireball { damage: i32, radius: u32 },
    /// Apply a status effect to the user.
    Apply(StatusEffect),
}

impl ConsumableEffect {
    pub fn needs_target(&self) -> bool {
        matches!(self, Self::Confuse { .. } | Self::Fireball { .. })
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Consumable {
    pub time_cost: Tick,
    pub effect: ConsumableEffect,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ItemKind {
    Weapon(Weapon),
    Armor(Armor),
    Ammo(Ammo),
    Container(Container),
    Consumable(Consumable),
}

/// Anything that can sit in an inventory, an equipment slot, or on the floor.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub name: String,
    pub kind: ItemKind,
}

impl Item {
    pub fn new(name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn weapon(&self) -> Option<&Weapon> {
        match &self.kind {
            ItemKind::Weapon(weapon) => Some(weapon),
            _ => None,
        }
    }

    pub fn weapon_mut(&mut self) -> Option<&mut Weapon> {
        match &mut self.kind {
            ItemKind::Weapon(weapon) => Some(weapon),
            _ => None,
        }
    }

    pub fn ammo(&self) -> Option<&Ammo> {
        match &self.kind {
            ItemKind::Ammo(ammo) => Some(ammo),
            _ => None,
        }
    }

    pub fn container(&self) -> Option<&Container> {
        match &self.kind {
            ItemKind::Container(container) => Some(container),
            _ => None,
        }
    }

    pub fn is_equippable(&self) -> bool {
        matches!(
            self.kind,
            ItemKind::Weapon(_) | ItemKind::Armor(_) | ItemKind::Container(_)
        )
    }
}

/// An item lying on a map tile.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroundItem {
    pub position: crate::state::Position,
    pub item: Item,
}
