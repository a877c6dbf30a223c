//! Resource pools and the per-segment time budget.

use crate::state::{ResourceMeter, Tick};

/// Enum representing individual resource pools.
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
pub enum PoolKind {
    /// Health.
    Hp,
    /// Mana, spent by magic weapons and spells.
    Mp,
    /// Stamina.
    Sp,
    /// Spirit energy.
    Se,
}

impl PoolKind {
    pub const ALL: [PoolKind; 4] = [PoolKind::Hp, PoolKind::Mp, PoolKind::Sp, PoolKind::Se];
}

/// Flat additions to pool maximums from race, gear, or effects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PoolBonus {
    pub hp: i32,
    pub mp: i32,
    pub sp: i32,
    pub se: i32,
}

impl PoolBonus {
    pub fn get(&self, kind: PoolKind) -> i32 {
        match kind {
            PoolKind::Hp => self.hp,
            PoolKind::Mp => self.mp,
            PoolKind::Sp => self.sp,
            PoolKind::Se => self.se,
        }
    }

    pub fn modify(&mut self, kind: PoolKind, amount: i32) {
        let slot = match kind {
            PoolKind::Hp => &mut self.hp,
            PoolKind::Mp => &mut self.mp,
            PoolKind::Sp => &mut self.sp,
            PoolKind::Se => &mut self.se,
        };
        *slot += amount;
    }
}

/// Current resource meters (stored state).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pools {
    pub hp: ResourceMeter,
    pub mp: ResourceMeter,
    pub sp: ResourceMeter,
    pub se: ResourceMeter,
}

impl Pools {
    pub fn get(&self, kind: PoolKind) -> &ResourceMeter {
        match kind {
            PoolKind::Hp => &self.hp,
            PoolKind::Mp => &self.mp,
            PoolKind::Sp => &self.sp,
            PoolKind::Se => &self.se,
        }
    }

    pub fn get_mut(&mut self, kind: PoolKind) -> &mut ResourceMeter {
        match kind {
            PoolKind::Hp => &mut self.hp,
            PoolKind::Mp => &mut self.mp,
            PoolKind::Sp => &mut self.sp,
            PoolKind::Se => &mut self.se,
        }
    }
}

/// Time available to an actor inside its current segment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeBudget {
    current: Tick,
    maximum: Tick,
}

impl TimeBudget {
    pub fn full(maximum: Tick) -> Self {
        Self {
            current: maximum,
            maximum,
        }
    }

    #[inline]
    pub fn current(&self) -> Tick {
        self.current
    }

    #[inline]
    pub fn maximum(&self) -> Tick {
        self.maximum
    }

    pub fn can_afford(&self, cost: Tick) -> bool {
        self.current >= cost
    }

    /// Deducts `cost` if the whole amount is available; never goes negative.
    pub fn try_spend(&mut self, cost: Tick) -> Option<Tick> {
        let remaining = self.current.checked_sub(cost)?;
        self.current = remaining;
        Some(remaining)
    }

    /// Consumes whatever is left.
    pub fn exhaust(&mut self) -> Tick {
        std::mem::replace(&mut self.current, Tick::ZERO)
    }

    pub fn refill(&mut self) {
        self.current = self.maximum;
    }

    pub fn set_maximum(&mut self, maximum: Tick) {
        self.maximum = maximum;
        self.current = self.current.min(maximum);
    }

    pub fn is_exhausted(&self) -> bool {
        self.current.is_zero()
    }
}
