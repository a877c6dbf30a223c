use std::collections::BTreeMap;

/// Named personality traits and preferences, each an integer weight.
///
/// Missing traits read as 0. The AI consults `fearful` (percent chance to
/// flee on sighting an enemy).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Personality {
    pub traits: BTreeMap<String, i32>,
    pub preferences: BTreeMap<String, i32>,
}

impl Personality {
    pub const FEARFUL: &'static str = "fearful";

    pub fn with_trait(mut self, name: impl Into<String>, value: i32) -> Self {
        self.traits.insert(name.into(), value);
        self
    }

    pub fn trait_value(&self, name: &str) -> i32 {
        self.traits.get(name).copied().unwrap_or(0)
    }

    pub fn has_trait(&self, name: &str) -> bool {
        self.traits.contains_key(name)
    }

    pub fn preference_value(&self, name: &str) -> i32 {
        self.preferences.get(name).copied().unwrap_or(0)
    }
}
