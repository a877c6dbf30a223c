//! Conditions: lightweight named flags with a countdown.
//!
//! Unlike status effects, conditions never stack and carry no per-tick
//! payload. Re-adding a condition replaces the previous entry of that name.

use std::collections::BTreeMap;

use crate::config::GameConfig;
use crate::env::Dice;
use crate::state::EntityId;

/// Well-known condition names the rules react to.
pub mod names {
    pub const STUNNED: &str = "Stunned";
    pub const PETRIFIED: &str = "Petrified";
    pub const SLEEP: &str = "Sleep";
    pub const PARALYZED: &str = "Paralyzed";
    pub const DEBUFF_BLOCK: &str = "Debuff Block";
    pub const FINAL_BREATH: &str = "Final Breath";
    pub const LIFESAVING: &str = "Lifesaving";
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Condition {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub duration: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub permanent: bool,
    /// Removed the first time it is used.
    #[cfg_attr(feature = "serde", serde(default))]
    pub consumable: bool,
    /// Percent chance the condition triggers when checked.
    #[cfg_attr(feature = "serde", serde(default))]
    pub chance: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub accuracy: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub target: Option<EntityId>,
}

impl Condition {
    pub fn new(name: impl Into<String>, duration: i32) -> Self {
        Self {
            name: name.into(),
            duration,
            permanent: false,
            consumable: false,
            chance: None,
            accuracy: None,
            target: None,
        }
    }

    pub fn permanent(name: impl Into<String>) -> Self {
        Self {
            permanent: true,
            ..Self::new(name, 0)
        }
    }

    pub fn consumable(mut self) -> Self {
        self.consumable = true;
        self
    }

    pub fn with_chance(mut self, chance: u32) -> Self {
        self.chance = Some(chance);
        self
    }

    pub fn with_target(mut self, target: EntityId) -> Self {
        self.target = Some(target);
        self
    }
}

/// Per-actor condition map, iterated in name order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Conditions {
    entries: BTreeMap<String, Condition>,
}

impl Conditions {
    /// Inserts or replaces by name. Returns false when the map is full and
    /// the name is new.
    pub fn add(&mut self, condition: Condition) -> bool {
        if self.entries.len() >= GameConfig::MAX_CONDITIONS
            && !self.entries.contains_key(&condition.name)
        {
            return false;
        }
        self.entries.insert(condition.name.clone(), condition);
        true
    }

    pub fn remove(&mut self, name: &str) -> Option<Condition> {
        self.entries.remove(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Condition> {
        self.entries.get(name)
    }

    pub fn duration(&self, name: &str) -> i32 {
        self.entries.get(name).map_or(0, |condition| condition.duration)
    }

    /// Uses up a consumable condition. Returns whether one was present.
    pub fn consume(&mut self, name: &str) -> bool {
        match self.entries.get(name) {
            Some(condition) if condition.consumable => {
                self.entries.remove(name);
                true
            }
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Condition> {
        self.entries.values()
    }

    /// One upkeep tick: non-permanent durations drop by one and entries at
    /// zero or below are removed. Returns the names that expired.
    pub fn update(&mut self) -> Vec<String> {
        let mut expired = Vec::new();
        self.entries.retain(|name, condition| {
            if condition.permanent {
                return true;
            }
            condition.duration -= 1;
            if condition.duration <= 0 {
                expired.push(name.clone());
                false
            } else {
                true
            }
        });
        expired
    }

    /// Whether the holder loses its turn segment. Stun, sleep and
    /// petrification always do; paralysis does on its chance roll.
    pub fn prevents_action(&self, dice: &mut Dice<'_>) -> bool {
        if [names::STUNNED, names::SLEEP, names::PETRIFIED]
            .iter()
            .any(|name| self.has(name))
        {
            return true;
        }
        self.get(names::PARALYZED)
            .is_some_and(|paralysis| dice.percent(paralysis.chance.unwrap_or(100)))
    }
}
