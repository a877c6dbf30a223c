//! Faction membership and hostility.

use std::collections::BTreeSet;

/// Allegiance groups an actor may belong to or be hostile toward.
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
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Faction {
    Player,
    Human,
    Goblin,
    Orc,
    Undead,
    Wildlife,
}

/// Which factions an actor belongs to and which it treats as enemies.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FactionSet {
    pub members: BTreeSet<Faction>,
    pub hostile: BTreeSet<Faction>,
}

impl FactionSet {
    pub fn new(
        members: impl IntoIterator<Item = Faction>,
        hostile: impl IntoIterator<Item = Faction>,
    ) -> Self {
        Self {
            members: members.into_iter().collect(),
            hostile: hostile.into_iter().collect(),
        }
    }

    fn lists_as_enemy(&self, other: &FactionSet) -> bool {
        self.hostile.iter().any(|enemy| other.members.contains(enemy))
    }

    /// Hostile if either side lists one of the other's factions as an enemy.
    pub fn is_hostile_to(&self, other: &FactionSet) -> bool {
        self.lists_as_enemy(other) || other.lists_as_enemy(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hostility_is_symmetric_or() {
        let player = FactionSet::new([Faction::Player], []);
        let goblin = FactionSet::new([Faction::Goblin], [Faction::Player]);
        let deer = FactionSet::new([Faction::Wildlife], []);
        assert!(player.is_hostile_to(&goblin));
        assert!(goblin.is_hostile_to(&player));
        assert!(!player.is_hostile_to(&deer));
        assert!(!goblin.is_hostile_to(&deer));
    }

    #[test]
    fn faction_names_parse() {
        assert_eq!("undead".parse::<Faction>(), Ok(Faction::Undead));
        assert_eq!(Faction::Wildlife.to_string(), "wildlife");
    }
}
