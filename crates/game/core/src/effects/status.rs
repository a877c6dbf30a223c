//! Status effects: named, stacking modifiers with duration and delay.

use arrayvec::ArrayVec;

use super::{Condition, Conditions};
use crate::config::GameConfig;
use crate::stats::{ActorStats, PoolKind, StatKind};

/// What an instantaneous modifier changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ModifierTarget {
    Stat(StatKind),
    MaxPool(PoolKind),
}

/// Applied when the effect lands, reversed when it expires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatModifier {
    pub target: ModifierTarget,
    pub amount: i32,
}

/// Applied every upkeep once the delay has run out, scaled by stacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickModifier {
    pub pool: PoolKind,
    pub amount: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    /// Stacking key.
    pub name: String,
    pub duration: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub permanent: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub can_delay: bool,
    /// Upkeeps to wait before the effect starts counting down and ticking.
    #[cfg_attr(feature = "serde", serde(default))]
    pub delay: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub modifiers: Vec<StatModifier>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub per_tick: Vec<TickModifier>,
    /// Conditions granted to the holder when the effect lands.
    #[cfg_attr(feature = "serde", serde(default))]
    pub conditions: Vec<Condition>,
    #[cfg_attr(feature = "serde", serde(default = "one"))]
    pub stacks: u32,
    /// Stack count the modifiers are currently applied with.
    #[cfg_attr(feature = "serde", serde(default))]
    applied_stacks: u32,
}

#[cfg(feature = "serde")]
fn one() -> u32 {
    1
}

impl StatusEffect {
    pub fn new(name: impl Into<String>, duration: i32) -> Self {
        Self {
            name: name.into(),
            duration,
            permanent: false,
            can_delay: false,
            delay: 0,
            modifiers: Vec::new(),
            per_tick: Vec::new(),
            conditions: Vec::new(),
            stacks: 1,
            applied_stacks: 0,
        }
    }

    pub fn with_modifier(mut self, target: ModifierTarget, amount: i32) -> Self {
        self.modifiers.push(StatModifier { target, amount });
        self
    }

    pub fn with_tick(mut self, pool: PoolKind, amount: i32) -> Self {
        self.per_tick.push(TickModifier { pool, amount });
        self
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn with_delay(mut self, delay: u32) -> Self {
        self.can_delay = true;
        self.delay = delay;
        self
    }

    pub fn permanent(mut self) -> Self {
        self.permanent = true;
        self
    }

    fn shift_modifiers(&self, stats: &mut ActorStats, stacks: i32) {
        for modifier in &self.modifiers {
            let amount = modifier.amount * stacks;
            match modifier.target {
                ModifierTarget::Stat(kind) => stats.modify_stat(kind, amount),
                ModifierTarget::MaxPool(kind) => stats.modify_pool_bonus(kind, amount),
            }
        }
    }

    /// Brings applied modifiers in line with the current stack count.
    ///
    /// Only the difference is applied, so a raised maximum never dips and
    /// clamps the current pool on the way.
    fn reapply(&mut self, stats: &mut ActorStats) {
        if self.modifiers.is_empty() {
            return;
        }
        let delta = self.stacks as i32 - self.applied_stacks as i32;
        if delta != 0 {
            self.shift_modifiers(stats, delta);
        }
        self.applied_stacks = self.stacks;
    }

    fn reverse(&mut self, stats: &mut ActorStats) {
        self.shift_modifiers(stats, -(self.applied_stacks as i32));
        self.applied_stacks = 0;
    }

    fn process_delay(&mut self) {
        self.delay = if self.can_delay {
            self.delay.saturating_sub(1)
        } else {
            0
        };
    }

    pub fn is_active(&self) -> bool {
        self.delay == 0
    }
}

/// What adding an effect did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectChange {
    Applied,
    Stacked { stacks: u32 },
    /// The effect list is full.
    Rejected,
}

/// Something that happened during an upkeep tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EffectEvent {
    Ticked {
        name: String,
        pool: PoolKind,
        change: i32,
    },
    Expired {
        name: String,
    },
}

/// Active effects on one actor, at most one entry per name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    active: ArrayVec<StatusEffect, { GameConfig::MAX_STATUS_EFFECTS }>,
}

impl StatusEffects {
    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.active.iter()
    }

    pub fn get(&self, name: &str) -> Option<&StatusEffect> {
        self.active.iter().find(|effect| effect.name == name)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Adds a clone of `effect`, or stacks it onto an active effect of the
    /// same name (stacks + 1, durations summed, modifiers re-applied).
    pub fn add(
        &mut self,
        effect: &StatusEffect,
        stats: &mut ActorStats,
        conditions: &mut Conditions,
    ) -> EffectChange {
        if let Some(existing) = self.active.iter_mut().find(|e| e.name == effect.name) {
            existing.stacks += 1;
            existing.duration += effect.duration;
            existing.reapply(stats);
            return EffectChange::Stacked {
                stacks: existing.stacks,
            };
        }

        if self.active.is_full() {
            tracing::warn!(effect = %effect.name, "status effect list full; dropping effect");
            return EffectChange::Rejected;
        }

        let mut clone = effect.clone();
        clone.stacks = 1;
        clone.applied_stacks = 0;
        clone.reapply(stats);
        for condition in &clone.conditions {
            conditions.add(condition.clone());
        }
        self.active.push(clone);
        EffectChange::Applied
    }

    /// Removes an effect by name, reversing its modifiers.
    pub fn remove(&mut self, name: &str, stats: &mut ActorStats) -> Option<StatusEffect> {
        let index = self.active.iter().position(|effect| effect.name == name)?;
        let mut effect = self.active.remove(index);
        effect.reverse(stats);
        Some(effect)
    }

    /// One upkeep tick.
    ///
    /// Delays count down first. Non-permanent effects without remaining
    /// delay lose one duration; those reaching zero are reversed and removed.
    /// Survivors without delay apply their per-tick changes × stacks.
    ///
    /// The expiring upkeep does not tick: an effect added with duration `n`
    /// ticks `n - 1` times.
    pub fn update(&mut self, stats: &mut ActorStats) -> Vec<EffectEvent> {
        let mut events = Vec::new();
        let mut index = 0;
        while index < self.active.len() {
            let effect = &mut self.active[index];
            effect.process_delay();
            if !effect.permanent && effect.is_active() {
                effect.duration -= 1;
            }

            if !effect.permanent && effect.duration <= 0 {
                let mut expired = self.active.remove(index);
                expired.reverse(stats);
                events.push(EffectEvent::Expired { name: expired.name });
                continue;
            }

            if effect.is_active() {
                for tick in &effect.per_tick {
                    let change = stats.adjust_pool(tick.pool, tick.amount * effect.stacks as i32);
                    events.push(EffectEvent::Ticked {
                        name: effect.name.clone(),
                        pool: tick.pool,
                        change,
                    });
                }
            }
            index += 1;
        }
        events
    }
}
