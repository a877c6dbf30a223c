//! Damage components: leaf contributions to a skill unit's base damage.

use crate::stats::{StatBlock, StatKind};

/// A pure function of an attacker's stats producing a non-negative amount.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DamageComponent {
    /// Constant amount.
    Flat { value: f32 },
    /// `max(coefficient × stat, min)`.
    Scaling {
        coefficient: f32,
        stat: StatKind,
        min: f32,
    },
    /// `fixed × max(⌊stat / divisor⌋, min)`.
    StatModified {
        fixed: f32,
        divisor: i32,
        stat: StatKind,
        min: f32,
    },
}

impl DamageComponent {
    pub const fn flat(value: f32) -> Self {
        Self::Flat { value }
    }

    pub const fn scaling(coefficient: f32, stat: StatKind) -> Self {
        Self::Scaling {
            coefficient,
            stat,
            min: 1.0,
        }
    }

    pub const fn stat_modified(fixed: f32, divisor: i32, stat: StatKind) -> Self {
        Self::StatModified {
            fixed,
            divisor,
            stat,
            min: 0.0,
        }
    }

    pub fn evaluate(&self, stats: &StatBlock) -> f32 {
        let amount = match *self {
            Self::Flat { value } => value,
            Self::Scaling {
                coefficient,
                stat,
                min,
            } => (coefficient * stats.get(stat) as f32).max(min),
            Self::StatModified {
                fixed,
                divisor,
                stat,
                min,
            } => {
                let steps = if divisor > 0 {
                    stats.get(stat).div_euclid(divisor) as f32
                } else {
                    0.0
                };
                fixed * steps.max(min)
            }
        };
        amount.max(0.0)
    }
}

/// Sum of every component, capped at `max_damage`.
pub fn total(components: &[DamageComponent], stats: &StatBlock, max_damage: f32) -> f32 {
    components
        .iter()
        .map(|component| component.evaluate(stats))
        .sum::<f32>()
        .min(max_damage)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> StatBlock {
        StatBlock {
            magic: 23,
            strength: 4,
            ..StatBlock::default()
        }
    }

    #[test]
    fn scaling_respects_its_floor() {
        let weak = DamageComponent::scaling(0.1, StatKind::Strength);
        assert_eq!(weak.evaluate(&stats()), 1.0);
        let strong = DamageComponent::scaling(2.0, StatKind::Magic);
        assert_eq!(strong.evaluate(&stats()), 46.0);
    }

    #[test]
    fn stat_modified_uses_whole_steps() {
        let component = DamageComponent::stat_modified(3.0, 5, StatKind::Magic);
        assert_eq!(component.evaluate(&stats()), 12.0);
        let negative = DamageComponent::flat(-4.0);
        assert_eq!(negative.evaluate(&stats()), 0.0);
    }

    #[test]
    fn total_is_capped() {
        let components = [
            DamageComponent::flat(30.0),
            DamageComponent::scaling(2.0, StatKind::Magic),
        ];
        assert_eq!(total(&components, &stats(), 50.0), 50.0);
        assert_eq!(total(&components, &stats(), 500.0), 76.0);
    }
}
