//! Elemental types and their matchup table.

/// Elemental affinity of an attack, a weapon, a skill unit, or an actor.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Element {
    #[default]
    Normal,
    Fire,
    Water,
    Wind,
    Earth,
    Light,
    Dark,
    Electric,
    Ice,
    Metal,
    Grass,
    Pure,
    Primal,
}

/// How a defending type reacts to an incoming element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Matchup {
    Neutral,
    Resists,
    Weak,
    Immune,
}

impl Element {
    /// Incoming elements this type takes reduced damage from.
    pub const fn resistances(self) -> &'static [Element] {
        use Element::*;
        match self {
            Normal => &[],
            Fire => &[Fire, Wind, Ice, Metal, Grass],
            Water => &[Fire, Water, Light],
            Wind => &[Wind, Grass],
            Earth => &[Fire],
            Light => &[Light, Primal],
            Dark => &[Dark, Grass, Primal],
            Electric => &[Wind, Electric],
            Ice => &[Water, Ice],
            Metal => &[Wind, Light, Electric, Ice, Grass],
            Grass => &[Water, Earth, Light, Grass],
            Pure => &[Primal],
            Primal => &[Fire, Water, Earth, Wind],
        }
    }

    pub const fn weaknesses(self) -> &'static [Element] {
        use Element::*;
        match self {
            Normal => &[],
            Fire => &[Water, Earth],
            Water => &[Electric, Ice, Grass],
            Wind => &[Fire, Electric, Ice],
            Earth => &[Water, Wind, Ice, Grass],
            Light => &[Dark, Grass],
            Dark => &[Pure],
            Electric => &[Earth, Primal],
            Ice => &[Fire, Metal, Primal],
            Metal => &[Fire, Earth, Primal],
            Grass => &[Fire, Wind, Dark, Electric, Ice, Primal],
            Pure => &[Light],
            Primal => &[Light, Dark, Pure],
        }
    }

    pub const fn immunities(self) -> &'static [Element] {
        use Element::*;
        match self {
            Wind => &[Earth],
            Earth => &[Electric],
            Dark => &[Light],
            Metal => &[Dark],
            Pure => &[Dark],
            Primal => &[Primal],
            _ => &[],
        }
    }

    /// Reaction of `self` as a defending type to an `attack` element.
    /// Immunity wins over resistance, which wins over weakness.
    pub fn matchup(self, attack: Element) -> Matchup {
        if self.immunities().contains(&attack) {
            Matchup::Immune
        } else if self.resistances().contains(&attack) {
            Matchup::Resists
        } else if self.weaknesses().contains(&attack) {
            Matchup::Weak
        } else {
            Matchup::Neutral
        }
    }
}

/// The (up to two) elemental types of an actor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementalTypes {
    pub primary: Element,
    #[cfg_attr(feature = "serde", serde(default))]
    pub secondary: Option<Element>,
}

impl ElementalTypes {
    pub const fn single(primary: Element) -> Self {
        Self {
            primary,
            secondary: None,
        }
    }

    pub const fn dual(primary: Element, secondary: Element) -> Self {
        Self {
            primary,
            secondary: Some(secondary),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Element> {
        std::iter::once(self.primary).chain(self.secondary)
    }

    pub fn contains(&self, element: Element) -> bool {
        self.iter().any(|own| own == element)
    }

    /// Combined damage multiplier for an incoming element.
    ///
    /// Starts at 1.0; each slot adds −0.25 for a resistance or +0.25 for a
    /// weakness. Immunity on either slot makes the whole multiplier 0.
    pub fn resistance_modifier(&self, attack: Element) -> f32 {
        let mut modifier = 1.0;
        for defending in self.iter() {
            match defending.matchup(attack) {
                Matchup::Immune => return 0.0,
                Matchup::Resists => modifier -= 0.25,
                Matchup::Weak => modifier += 0.25,
                Matchup::Neutral => {}
            }
        }
        modifier
    }
}
