//! Per-actor skill list and cooldown bookkeeping.

use std::collections::BTreeMap;

use arrayvec::ArrayVec;

use super::Skill;
use crate::config::GameConfig;
use crate::stats::{ActorStats, PoolKind};

/// Skills an actor knows, plus remaining cooldowns keyed by skill name.
///
/// Cooldowns are kept here rather than on the skill so that two actors
/// holding the same skill (or passing a wand around) never share one.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilitySet {
    skills: ArrayVec<Skill, { GameConfig::MAX_ABILITIES }>,
    #[cfg_attr(feature = "serde", serde(default))]
    cooldowns: BTreeMap<String, u32>,
}

impl AbilitySet {
    pub fn with_skills(skills: impl IntoIterator<Item = Skill>) -> Self {
        let mut set = Self::default();
        for skill in skills {
            if set.learn(skill).is_err() {
                break;
            }
        }
        set
    }

    /// Learns a skill. Returns it back if the list is full or the name is
    /// already known.
    pub fn learn(&mut self, skill: Skill) -> Result<(), Skill> {
        if self.get(&skill.name).is_some() {
            return Err(skill);
        }
        self.skills.try_push(skill).map_err(|error| error.element())
    }

    pub fn get(&self, name: &str) -> Option<&Skill> {
        self.skills.iter().find(|skill| skill.name == name)
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    pub fn cooldown(&self, name: &str) -> u32 {
        self.cooldowns.get(name).copied().unwrap_or(0)
    }

    pub fn can_afford(skill: &Skill, stats: &ActorStats) -> bool {
        stats.pool(PoolKind::Mp) >= skill.cost.mp
            && stats.pool(PoolKind::Sp) >= skill.cost.sp
            && stats.pool(PoolKind::Se) >= skill.cost.se
            && stats.time.can_afford(skill.cost.time)
    }

    /// Off cooldown and affordable.
    pub fn is_ready(&self, skill: &Skill, stats: &ActorStats) -> bool {
        self.cooldown(&skill.name) == 0 && Self::can_afford(skill, stats)
    }

    pub fn start_cooldown(&mut self, skill: &Skill) {
        if skill.max_cooldown > 0 {
            self.cooldowns.insert(skill.name.clone(), skill.max_cooldown);
        }
    }

    /// Upkeep: every running cooldown loses one turn.
    pub fn tick_cooldowns(&mut self) {
        self.cooldowns.retain(|_, remaining| {
            *remaining = remaining.saturating_sub(1);
            *remaining > 0
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skill::{SkillCost, SkillDirective};
    use crate::state::Tick;

    fn blink() -> Skill {
        Skill::new(
            "Blink",
            SkillCost {
                mp: 5,
                ..SkillCost::default()
            },
            2,
            SkillDirective::Teleport { range: 4 },
        )
    }

    #[test]
    fn cooldowns_belong_to_the_holder() {
        let stats = ActorStats::default();
        let mut first = AbilitySet::with_skills([blink()]);
        let second = AbilitySet::with_skills([blink()]);
        first.start_cooldown(&blink());
        assert!(!first.is_ready(&blink(), &stats));
        assert!(second.is_ready(&blink(), &stats));

        first.tick_cooldowns();
        assert_eq!(first.cooldown("Blink"), 1);
        first.tick_cooldowns();
        assert!(first.is_ready(&blink(), &stats));
    }

    #[test]
    fn readiness_checks_every_cost() {
        let mut stats = ActorStats::default();
        let set = AbilitySet::with_skills([blink()]);
        assert!(set.is_ready(&blink(), &stats));
        stats.adjust_pool(PoolKind::Mp, -8);
        assert!(!set.is_ready(&blink(), &stats));

        let slow = Skill::new(
            "Slow Cast",
            SkillCost {
                time: Tick::whole(7),
                ..SkillCost::default()
            },
            0,
            SkillDirective::Teleport { range: 1 },
        );
        assert!(!set.is_ready(&slow, &ActorStats::default()));
    }

    #[test]
    fn duplicate_names_are_refused() {
        let mut set = AbilitySet::with_skills([blink()]);
        assert!(set.learn(blink()).is_err());
        assert_eq!(set.skills().len(), 1);
    }
}
