//! Skill prototypes.
//!
//! Prototypes are plain values. Cooldowns are tracked by whoever learns the
//! skill (or holds the wand carrying it), never on the prototype.

use delve_core::combat::{DamageComponent, Element};
use delve_core::skill::{CombatUnit, Skill, SkillCost, SkillDirective};
use delve_core::state::Tick;
use delve_core::stats::StatKind;

fn cost(mp: i32, sp: i32, time: Tick) -> SkillCost {
    SkillCost {
        mp,
        sp,
        se: 0,
        time,
    }
}

/// 25 fire damage in a radius of 3 around a visible tile.
pub fn fireball() -> Skill {
    Skill::new(
        "Fireball",
        cost(5, 0, Tick::tenths(15)),
        2,
        SkillDirective::Combat(CombatUnit::area(
            Element::Fire,
            vec![DamageComponent::flat(25.0)],
            3,
        )),
    )
}

/// Single-target fire bolt that grows with the caster's magic.
pub fn firebolt() -> Skill {
    Skill::new(
        "Firebolt",
        cost(3, 0, Tick::whole(1)),
        1,
        SkillDirective::Combat(
            CombatUnit::single_target(
                Element::Fire,
                vec![
                    DamageComponent::flat(6.0),
                    DamageComponent::scaling(0.5, StatKind::Magic),
                ],
            )
            .with_cap(40.0),
        ),
    )
}

/// Hits every adjacent actor.
pub fn whirlwind() -> Skill {
    Skill::new(
        "Whirlwind",
        cost(0, 10, Tick::whole(3)),
        3,
        SkillDirective::Combat(CombatUnit::melee_area(
            Element::Normal,
            vec![DamageComponent::stat_modified(4.0, 10, StatKind::Strength)],
        )),
    )
}

pub fn power_shot() -> Skill {
    Skill::new(
        "Power Shot",
        cost(0, 5, Tick::whole(2)),
        1,
        SkillDirective::Combat(CombatUnit::single_target(
            Element::Normal,
            vec![DamageComponent::flat(10.0)],
        )),
    )
}

pub fn blink() -> Skill {
    Skill::new(
        "Blink",
        cost(10, 0, Tick::tenths(15)),
        2,
        SkillDirective::Teleport { range: 6 },
    )
}

pub fn dash() -> Skill {
    Skill::new(
        "Dash",
        cost(0, 15, Tick::whole(1)),
        3,
        SkillDirective::Dash { distance: 5 },
    )
}

/// Every catalog skill.
pub fn all_skills() -> Vec<Skill> {
    vec![fireball(), firebolt(), whirlwind(), power_shot(), blink(), dash()]
}

pub fn skill(name: &str) -> Option<Skill> {
    all_skills().into_iter().find(|skill| skill.name == name)
}
