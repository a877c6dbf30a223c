//! Actor templates.
//!
//! A template is the spawnable description of a creature. [`ActorTemplate::spawn`]
//! turns it into a fresh [`ActorState`] at a position; the state assigns the id.

use delve_core::ai::AiState;
use delve_core::combat::{Element, ElementalTypes};
use delve_core::config::GameConfig;
use delve_core::state::{
    ActorState, EntityId, Faction, FactionSet, Item, Level, Personality, Position,
};
use delve_core::stats::{ActorStats, PoolBonus, StatBlock};

use super::items;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorTemplate {
    pub name: String,
    pub stats: StatBlock,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bonus: PoolBonus,
    #[cfg_attr(feature = "serde", serde(default))]
    pub elements: Vec<Element>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub factions: FactionSet,
    #[cfg_attr(feature = "serde", serde(default))]
    pub level: Level,
    #[cfg_attr(feature = "serde", serde(default))]
    pub personality: Personality,
    /// Whether the actor runs an AI at all.
    #[cfg_attr(feature = "serde", serde(default))]
    pub ai: bool,
    /// Picks up, equips and reloads gear on its own.
    #[cfg_attr(feature = "serde", serde(default))]
    pub item_user: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub equipment: Vec<Item>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub inventory: Vec<Item>,
}

impl ActorTemplate {
    pub fn new(name: impl Into<String>, stats: StatBlock) -> Self {
        Self {
            name: name.into(),
            stats,
            bonus: PoolBonus::default(),
            elements: Vec::new(),
            factions: FactionSet::default(),
            level: Level::default(),
            personality: Personality::default(),
            ai: false,
            item_user: false,
            equipment: Vec::new(),
            inventory: Vec::new(),
        }
    }

    /// Elemental types from the first one or two listed elements.
    pub fn elemental_types(&self) -> ElementalTypes {
        match self.elements.as_slice() {
            [] => ElementalTypes::default(),
            [primary] => ElementalTypes::single(*primary),
            [primary, secondary, ..] => ElementalTypes::dual(*primary, *secondary),
        }
    }

    /// Builds a fresh actor with full pools and the given time budget.
    ///
    /// Unequippable items and inventory beyond capacity are dropped with a
    /// warning. A later item for an occupied slot replaces the earlier one.
    pub fn spawn(&self, position: Position, config: &GameConfig) -> ActorState {
        let stats = ActorStats::new(self.stats, self.bonus, config.time_budget);
        let mut actor = ActorState::new(EntityId(0), self.name.clone(), position, stats)
            .with_elements(self.elemental_types())
            .with_factions(self.factions.clone())
            .with_level(self.level)
            .with_personality(self.personality.clone());
        if self.ai {
            let ai = AiState::hostile();
            actor = actor.with_ai(if self.item_user { ai.item_user() } else { ai });
        }
        for item in &self.equipment {
            match actor.equipment.equip(item.clone()) {
                Ok(None) => {}
                Ok(Some(replaced)) => {
                    tracing::warn!(actor = %self.name, item = %replaced.name, "equipment slot taken twice");
                }
                Err(item) => {
                    tracing::warn!(actor = %self.name, item = %item.name, "item cannot be equipped");
                }
            }
        }
        for item in &self.inventory {
            if let Err(item) = actor.inventory.add(item.clone()) {
                tracing::warn!(actor = %self.name, item = %item.name, "inventory full");
            }
        }
        actor
    }

    pub fn with_equipment(mut self, item: Item) -> Self {
        self.equipment.push(item);
        self
    }

    pub fn with_inventory(mut self, item: Item) -> Self {
        self.inventory.push(item);
        self
    }
}

fn stats(
    strength: i32,
    dexterity: i32,
    agility: i32,
    constitution: i32,
    magic: i32,
    awareness: i32,
    charisma: i32,
) -> StatBlock {
    StatBlock {
        strength,
        dexterity,
        agility,
        constitution,
        magic,
        awareness,
        charisma,
    }
}

fn monster(name: &str, core: StatBlock, level: Level) -> ActorTemplate {
    ActorTemplate {
        factions: FactionSet::new([Faction::Orc], [Faction::Player]),
        level,
        ai: true,
        ..ActorTemplate::new(name, core)
    }
}

pub fn player() -> ActorTemplate {
    ActorTemplate {
        bonus: PoolBonus {
            hp: 70,
            mp: 20,
            sp: 25,
            se: 1,
        },
        factions: FactionSet::new([Faction::Player], []),
        level: Level {
            level_up_base: 200,
            ..Level::default()
        },
        ..ActorTemplate::new("Player", stats(100, 15, 10, 100, 15, 100, 10))
    }
    .with_equipment(items::dagger())
    .with_inventory(items::healing_draught())
}

pub fn orc() -> ActorTemplate {
    monster(
        "Orc",
        stats(15, 5, 6, 15, 5, 8, 5),
        Level {
            level_up_base: 150,
            xp_given: 50,
            ..Level::default()
        },
    )
}

/// Skittish and quick; runs as soon as it sees an enemy.
pub fn kobold() -> ActorTemplate {
    ActorTemplate {
        personality: Personality::default().with_trait(Personality::FEARFUL, 100),
        ..monster(
            "Kobold",
            stats(15, 30, 30, 5, 5, 32, 5),
            Level {
                level_up_base: 50,
                xp_given: 10,
                ..Level::default()
            },
        )
    }
}

pub fn troll() -> ActorTemplate {
    ActorTemplate {
        bonus: PoolBonus {
            hp: 10,
            ..PoolBonus::default()
        },
        ..monster(
            "Troll",
            stats(20, 3, 4, 20, 3, 4, 3),
            Level {
                level_up_base: 250,
                xp_given: 100,
                ..Level::default()
            },
        )
    }
}

/// Orc with a pistol and spare bullets that reloads and rearms itself.
pub fn orc_gunner() -> ActorTemplate {
    ActorTemplate {
        item_user: true,
        ..orc()
    }
    .with_equipment(items::pistol())
    .with_inventory(items::bullets(6))
}

/// Every catalog actor.
pub fn all_actors() -> Vec<ActorTemplate> {
    vec![player(), orc(), kobold(), troll(), orc_gunner()]
}

/// Looks a template up by its snake_case key (`"orc_gunner"`).
pub fn template(key: &str) -> Option<ActorTemplate> {
    let found = match key {
        "player" => player(),
        "orc" => orc(),
        "kobold" => kobold(),
        "troll" => troll(),
        "orc_gunner" => orc_gunner(),
        _ => return None,
    };
    Some(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use delve_core::stats::PoolKind;

    #[test]
    fn player_pools_include_bonuses() {
        let hero = player().spawn(Position::new(2, 2), &GameConfig::default());
        assert_eq!(hero.stats.max_for(PoolKind::Hp), 270);
        assert_eq!(hero.stats.max_for(PoolKind::Mp), 35);
        assert_eq!(hero.equipment.weapon().unwrap().damage.sides, 6);
        assert_eq!(hero.inventory.len(), 1);
        assert!(hero.ai.is_none());
    }

    #[test]
    fn monsters_are_hostile_and_thinking() {
        let config = GameConfig::default();
        let hero = player().spawn(Position::ORIGIN, &config);
        for template in [orc(), kobold(), troll()] {
            let monster = template.spawn(Position::new(3, 3), &config);
            assert!(monster.is_hostile_to(&hero), "{}", monster.name);
            assert!(monster.ai.is_some());
        }
        let kobold = kobold().spawn(Position::ORIGIN, &config);
        assert_eq!(kobold.personality.trait_value(Personality::FEARFUL), 100);
    }

    #[test]
    fn gunner_spawns_armed_and_stocked() {
        let gunner = orc_gunner().spawn(Position::ORIGIN, &GameConfig::default());
        assert!(gunner.ai.as_ref().unwrap().item_user);
        assert_eq!(gunner.equipment.weapon().unwrap().capacity, 3);
        assert_eq!(gunner.inventory.items()[0].ammo().unwrap().quantity, 6);
    }
}
