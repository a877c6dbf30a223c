//! Core attributes.

/// The seven core attributes that define an actor.
///
/// - **strength**: melee bonus, power, critical multiplier
/// - **dexterity**: critical chance
/// - **agility**: movement-related effects
/// - **constitution**: hp and sp pools
/// - **magic**: mp pool and magical attack
/// - **awareness**: sight range
/// - **charisma**: se pool
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatBlock {
    pub strength: i32,
    pub dexterity: i32,
    pub agility: i32,
    pub constitution: i32,
    pub magic: i32,
    pub awareness: i32,
    pub charisma: i32,
}

impl StatBlock {
    pub fn get(&self, kind: StatKind) -> i32 {
        match kind {
            StatKind::Strength => self.strength,
            StatKind::Dexterity => self.dexterity,
            StatKind::Agility => self.agility,
            StatKind::Constitution => self.constitution,
            StatKind::Magic => self.magic,
            StatKind::Awareness => self.awareness,
            StatKind::Charisma => self.charisma,
        }
    }

    pub fn get_mut(&mut self, kind: StatKind) -> &mut i32 {
        match kind {
            StatKind::Strength => &mut self.strength,
            StatKind::Dexterity => &mut self.dexterity,
            StatKind::Agility => &mut self.agility,
            StatKind::Constitution => &mut self.constitution,
            StatKind::Magic => &mut self.magic,
            StatKind::Awareness => &mut self.awareness,
            StatKind::Charisma => &mut self.charisma,
        }
    }

    pub fn modify(&mut self, kind: StatKind, amount: i32) {
        *self.get_mut(kind) += amount;
    }
}

impl Default for StatBlock {
    fn default() -> Self {
        Self {
            strength: 10,
            dexterity: 10,
            agility: 10,
            constitution: 10,
            magic: 10,
            awareness: 10,
            charisma: 10,
        }
    }
}

/// Selects one attribute of a [`StatBlock`].
#[derive(
    Clone,
    Copy,
    Debug,
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
pub enum StatKind {
    Strength,
    Dexterity,
    Agility,
    Constitution,
    Magic,
    Awareness,
    Charisma,
}

impl StatKind {
    pub const ALL: [StatKind; 7] = [
        StatKind::Strength,
        StatKind::Dexterity,
        StatKind::Agility,
        StatKind::Constitution,
        StatKind::Magic,
        StatKind::Awareness,
        StatKind::Charisma,
    ];
}
