//! Experience, levels, and the incoming-damage log used for kill credit.

use arrayvec::ArrayVec;

use crate::combat::AttackType;
use crate::config::GameConfig;
use crate::state::EntityId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Level {
    pub current_level: u32,
    pub current_xp: u32,
    /// Zero disables experience gain entirely.
    pub level_up_base: u32,
    pub level_up_factor: u32,
    /// Experience granted to whoever lands the killing blow.
    pub xp_given: u32,
}

impl Default for Level {
    fn default() -> Self {
        Self {
            current_level: 1,
            current_xp: 0,
            level_up_base: 0,
            level_up_factor: 150,
            xp_given: 0,
        }
    }
}

impl Level {
    pub fn experience_to_next_level(&self) -> u32 {
        self.level_up_base + self.current_level * self.level_up_factor
    }

    pub fn requires_level_up(&self) -> bool {
        self.current_xp > self.experience_to_next_level()
    }

    /// Adds experience; returns whether anything was gained.
    pub fn add_xp(&mut self, xp: u32) -> bool {
        if xp == 0 || self.level_up_base == 0 {
            return false;
        }
        self.current_xp += xp;
        true
    }

    /// Spends the threshold and advances one level.
    pub fn advance(&mut self) {
        self.current_xp = self
            .current_xp
            .saturating_sub(self.experience_to_next_level());
        self.current_level += 1;
    }
}

/// One incoming hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageRecord {
    pub source: EntityId,
    pub amount: i32,
    pub attack: AttackType,
    pub round: u64,
}

/// Most recent incoming hits, oldest first. Full logs drop the oldest entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageLog {
    records: ArrayVec<DamageRecord, { GameConfig::MAX_DAMAGE_LOG }>,
}

impl DamageLog {
    pub fn record(&mut self, record: DamageRecord) {
        if self.records.is_full() {
            self.records.remove(0);
        }
        self.records.push(record);
    }

    pub fn records(&self) -> &[DamageRecord] {
        &self.records
    }

    /// Who dealt the most recent damage; the killer when hp just hit zero.
    pub fn last_source(&self) -> Option<EntityId> {
        self.records.last().map(|record| record.source)
    }
}
