//! Per-actor stat aggregate with derived values.

use super::{PoolBonus, PoolKind, Pools, StatBlock, StatKind, TimeBudget};
use crate::state::{ResourceMeter, Tick};

/// Core attributes, pool bonuses, current pools and time budget of one actor.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorStats {
    pub core: StatBlock,
    pub bonus: PoolBonus,
    pub pools: Pools,
    pub time: TimeBudget,
}

impl ActorStats {
    /// Builds stats with every pool full.
    pub fn new(core: StatBlock, bonus: PoolBonus, time_budget: Tick) -> Self {
        let mut stats = Self {
            core,
            bonus,
            pools: Pools::default(),
            time: TimeBudget::full(time_budget),
        };
        for kind in PoolKind::ALL {
            *stats.pools.get_mut(kind) = ResourceMeter::full(stats.max_for(kind));
        }
        stats
    }

    /// Maximum of a pool derived from the core block.
    ///
    /// hp = bonus + 2·con, mp = bonus + magic, sp = bonus + con,
    /// se = bonus + charisma/20.
    pub fn max_for(&self, kind: PoolKind) -> i32 {
        let base = match kind {
            PoolKind::Hp => 2 * self.core.constitution,
            PoolKind::Mp => self.core.magic,
            PoolKind::Sp => self.core.constitution,
            PoolKind::Se => self.core.charisma / 20,
        };
        self.bonus.get(kind) + base
    }

    /// Re-derives every pool maximum, clamping current values.
    pub fn recompute_maximums(&mut self) {
        for kind in PoolKind::ALL {
            let maximum = self.max_for(kind);
            self.pools.get_mut(kind).set_maximum(maximum);
        }
    }

    pub fn modify_stat(&mut self, kind: StatKind, amount: i32) {
        self.core.modify(kind, amount);
        self.recompute_maximums();
    }

    pub fn modify_pool_bonus(&mut self, kind: PoolKind, amount: i32) {
        self.bonus.modify(kind, amount);
        self.recompute_maximums();
    }

    /// Adds `delta` to a pool and returns the clamped change.
    pub fn adjust_pool(&mut self, kind: PoolKind, delta: i32) -> i32 {
        self.pools.get_mut(kind).adjust(delta)
    }

    pub fn pool(&self, kind: PoolKind) -> i32 {
        self.pools.get(kind).current()
    }

    /// Restores hp up to the maximum, returning the amount recovered.
    pub fn heal(&mut self, amount: i32) -> i32 {
        self.adjust_pool(PoolKind::Hp, amount.max(0))
    }

    pub fn hp(&self) -> i32 {
        self.pools.hp.current()
    }

    pub fn is_alive(&self) -> bool {
        self.hp() > 0
    }

    /// Unarmed striking power.
    pub fn power(&self) -> i32 {
        self.core.strength / 5
    }

    pub fn magical_attack(&self) -> i32 {
        self.core.magic
    }

    /// round(log2(awareness)) + 2 tiles.
    pub fn sight_range(&self) -> u32 {
        let awareness = self.core.awareness.max(1) as f32;
        awareness.log2().round() as u32 + 2
    }

    /// Critical chance in percent.
    pub fn crit_chance(&self, base: u32) -> u32 {
        base + (self.core.dexterity.max(0) as u32) / 10
    }

    pub fn crit_multiplier(&self) -> f32 {
        1.5 + self.core.strength.max(0) as f32 / 200.0
    }
}

impl Default for ActorStats {
    fn default() -> Self {
        Self::new(
            StatBlock::default(),
            PoolBonus::default(),
            crate::config::GameConfig::DEFAULT_TIME_BUDGET,
        )
    }
}
