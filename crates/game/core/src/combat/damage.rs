//! Damage resolution pipeline.

use crate::combat::{Element, ElementalTypes, components};
use crate::config::GameConfig;
use crate::env::Dice;
use crate::skill::CombatUnit;
use crate::state::{Ammo, Weapon};
use crate::stats::ActorStats;

/// How an attack is delivered. Selects the attack bonus and whether armor
/// applies.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AttackType {
    Melee,
    Ranged,
    Magic,
}

/// Read-only view of one side of an exchange.
#[derive(Clone, Copy, Debug)]
pub struct Combatant<'a> {
    pub stats: &'a ActorStats,
    pub types: ElementalTypes,
    /// Armor defense; ignored by magic attacks.
    pub defense: i32,
}

impl<'a> Combatant<'a> {
    pub fn new(stats: &'a ActorStats, types: ElementalTypes, defense: i32) -> Self {
        Self {
            stats,
            types,
            defense,
        }
    }
}

/// Inputs to a single damage calculation.
#[derive(Clone, Copy, Debug)]
pub struct DamageRequest<'a> {
    pub attacker: Combatant<'a>,
    pub attack: AttackType,
    pub defender: Option<Combatant<'a>>,
    pub weapon: Option<&'a Weapon>,
    pub ammo: Option<&'a Ammo>,
    pub unit: Option<&'a CombatUnit>,
    /// Skip the critical roll (damage previews).
    pub simulate: bool,
    /// Critical chance every attacker starts with, in percent.
    pub base_crit_chance: u32,
}

impl<'a> DamageRequest<'a> {
    pub fn new(attacker: Combatant<'a>, attack: AttackType) -> Self {
        Self {
            attacker,
            attack,
            defender: None,
            weapon: None,
            ammo: None,
            unit: None,
            simulate: false,
            base_crit_chance: GameConfig::DEFAULT_BASE_CRIT_CHANCE,
        }
    }

    pub fn against(mut self, defender: Combatant<'a>) -> Self {
        self.defender = Some(defender);
        self
    }

    pub fn with_weapon(mut self, weapon: Option<&'a Weapon>) -> Self {
        self.weapon = weapon;
        self
    }

    pub fn with_ammo(mut self, ammo: Option<&'a Ammo>) -> Self {
        self.ammo = ammo;
        self
    }

    pub fn with_unit(mut self, unit: &'a CombatUnit) -> Self {
        self.unit = Some(unit);
        self
    }

    pub fn with_base_crit(mut self, base_crit_chance: u32) -> Self {
        self.base_crit_chance = base_crit_chance;
        self
    }

    pub fn simulated(mut self) -> Self {
        self.simulate = true;
        self
    }

    /// Element the attack lands as.
    pub fn element(&self) -> Element {
        if self.attack == AttackType::Ranged
            && let Some(ammo) = self.ammo
        {
            return ammo.element;
        }
        self.unit
            .map(|unit| unit.element)
            .or(self.weapon.map(|weapon| weapon.element))
            .unwrap_or_default()
    }
}

/// Folds weapon roll, components, elements, defense and crits into damage.
pub struct DamageCalculator;

impl DamageCalculator {
    /// Final damage for `request`. May be zero or negative; callers treat
    /// anything at or below zero as a miss.
    ///
    /// ```text
    /// provisional = (base + bonus) × (1 + proficiency + passive) × stab
    ///             × resistance − defense
    /// critical    = ((base + bonus) × … × resistance − defense/2) × crit_multiplier
    /// ```
    pub fn calculate(request: &DamageRequest<'_>, dice: &mut Dice<'_>) -> i32 {
        let base = Self::base(request, dice);
        let bonus = Self::attack_bonus(request);
        let element = request.element();
        let stab = Self::stab(request, element);
        let secondary = 1.0 + Self::proficiency_bonus() + Self::passive_bonus();

        let mut damage = (base + bonus) * secondary * stab;
        let Some(defender) = request.defender else {
            tracing::trace!(damage, "damage preview without defender");
            return damage.round() as i32;
        };

        damage *= defender.types.resistance_modifier(element);
        let defense = match request.attack {
            AttackType::Magic => 0.0,
            AttackType::Melee | AttackType::Ranged => defender.defense as f32,
        };

        let attacker = request.attacker.stats;
        let crit_chance = attacker.crit_chance(request.base_crit_chance);
        let result = if !request.simulate && dice.percent(crit_chance) {
            tracing::debug!(damage, defense, "critical hit");
            (damage - defense / 2.0) * attacker.crit_multiplier()
        } else {
            damage - defense
        };
        result.round() as i32
    }

    fn base(request: &DamageRequest<'_>, dice: &mut Dice<'_>) -> f32 {
        let weapon = request
            .weapon
            .map_or(0, |weapon| weapon.damage.roll(dice)) as f32;
        let unit = request.unit.map_or(0.0, |unit| {
            components::total(
                &unit.components,
                &request.attacker.stats.core,
                unit.max_damage,
            )
        });
        weapon + unit
    }

    fn attack_bonus(request: &DamageRequest<'_>) -> f32 {
        let stats = request.attacker.stats;
        let mut bonus = 0.0;
        if request.unit.is_none() {
            bonus += match request.attack {
                AttackType::Melee => stats.core.strength as f32 / 5.0,
                AttackType::Magic => stats.magical_attack() as f32,
                AttackType::Ranged => 0.0,
            };
        }
        if let Some(ammo) = request.ammo {
            bonus += ammo.damage as f32;
        }
        bonus
    }

    /// Same-type attack bonus.
    fn stab(request: &DamageRequest<'_>, element: Element) -> f32 {
        if request.attack == AttackType::Ranged
            && let Some(ammo) = request.ammo
        {
            let native = request
                .unit
                .map(|unit| unit.element)
                .or(request.weapon.map(|weapon| weapon.element));
            if native.is_some_and(|native| native != ammo.element) {
                return 1.0;
            }
        }

        let mut stab = 1.0;
        if request.attacker.types.contains(element) {
            stab += 0.25;
        }
        if request.weapon.is_some_and(|weapon| weapon.element == element) {
            stab += 0.25;
        }
        if request.unit.is_some_and(|unit| unit.element == element) {
            stab += 0.25;
        }
        stab
    }

    // Proficiency and passive modifiers are not modelled yet.
    fn proficiency_bonus() -> f32 {
        0.0
    }

    fn passive_bonus() -> f32 {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::DamageComponent;
    use crate::env::RngOracle;
    use crate::state::{AmmoKind, DamageDice, WeaponCategory};
    use crate::stats::{PoolBonus, StatBlock, StatKind};

    /// Every d100 lands on `(value % 100) + 1`.
    struct FixedRoll(u32);

    impl RngOracle for FixedRoll {
        fn next_u32(&self, _seed: u64) -> u32 {
            self.0
        }
    }

    const NO_CRIT: FixedRoll = FixedRoll(99);
    const ALWAYS_CRIT: FixedRoll = FixedRoll(0);

    fn stats(strength: i32, magic: i32) -> ActorStats {
        ActorStats::new(
            StatBlock {
                strength,
                magic,
                ..StatBlock::default()
            },
            PoolBonus::default(),
            GameConfig::DEFAULT_TIME_BUDGET,
        )
    }

    fn fire_sword() -> Weapon {
        Weapon::new(WeaponCategory::Sword, Element::Fire, DamageDice::fixed(10))
    }

    #[test]
    fn matching_types_on_attacker_and_weapon_give_forty() {
        let attacker_stats = stats(100, 10);
        let defender_stats = stats(10, 10);
        let sword = fire_sword();
        let request = DamageRequest::new(
            Combatant::new(&attacker_stats, ElementalTypes::single(Element::Fire), 0),
            AttackType::Melee,
        )
        .against(Combatant::new(&defender_stats, ElementalTypes::default(), 5))
        .with_weapon(Some(&sword));

        let mut dice = Dice::new(&NO_CRIT, 7);
        assert_eq!(DamageCalculator::calculate(&request, &mut dice), 40);
    }

    #[test]
    fn critical_hit_halves_defense_then_multiplies() {
        let attacker_stats = stats(100, 10);
        let defender_stats = stats(10, 10);
        let sword = fire_sword();
        let request = DamageRequest::new(
            Combatant::new(&attacker_stats, ElementalTypes::single(Element::Fire), 0),
            AttackType::Melee,
        )
        .against(Combatant::new(&defender_stats, ElementalTypes::default(), 5))
        .with_weapon(Some(&sword));

        // (45 - 2.5) × (1.5 + 100/200) = 85
        let mut dice = Dice::new(&ALWAYS_CRIT, 7);
        assert_eq!(DamageCalculator::calculate(&request, &mut dice), 85);

        let mut dice = Dice::new(&ALWAYS_CRIT, 7);
        assert_eq!(
            DamageCalculator::calculate(&request.simulated(), &mut dice),
            40
        );
    }

    #[test]
    fn immunity_zeroes_damage_before_defense() {
        let attacker_stats = stats(50, 10);
        let defender_stats = stats(10, 10);
        let spear = Weapon::new(WeaponCategory::Sword, Element::Electric, DamageDice::fixed(12));
        let request = DamageRequest::new(
            Combatant::new(&attacker_stats, ElementalTypes::default(), 0),
            AttackType::Melee,
        )
        .against(Combatant::new(
            &defender_stats,
            ElementalTypes::dual(Element::Grass, Element::Earth),
            0,
        ))
        .with_weapon(Some(&spear));

        let mut dice = Dice::new(&NO_CRIT, 1);
        assert_eq!(DamageCalculator::calculate(&request, &mut dice), 0);
    }

    #[test]
    fn magic_ignores_armor_and_adds_magic_stat() {
        let attacker_stats = stats(10, 12);
        let defender_stats = stats(10, 10);
        let orb = Weapon::new(WeaponCategory::Orb, Element::Water, DamageDice::fixed(6));
        let request = DamageRequest::new(
            Combatant::new(&attacker_stats, ElementalTypes::default(), 0),
            AttackType::Magic,
        )
        .against(Combatant::new(&defender_stats, ElementalTypes::default(), 50))
        .with_weapon(Some(&orb));

        // (6 + 12) × 1.25 (weapon element)
        let mut dice = Dice::new(&NO_CRIT, 3);
        assert_eq!(DamageCalculator::calculate(&request, &mut dice), 23);
    }

    #[test]
    fn ammo_element_mismatch_forfeits_stab() {
        let attacker_stats = stats(10, 10);
        let bow = Weapon::new(WeaponCategory::Bow, Element::Fire, DamageDice::fixed(8));
        let arrow = Ammo {
            kind: AmmoKind::Arrow,
            name: "Frost Arrow".into(),
            quantity: 1,
            damage: 2,
            element: Element::Ice,
        };
        let request = DamageRequest::new(
            Combatant::new(&attacker_stats, ElementalTypes::single(Element::Ice), 0),
            AttackType::Ranged,
        )
        .with_weapon(Some(&bow))
        .with_ammo(Some(&arrow));

        assert_eq!(request.element(), Element::Ice);
        let mut dice = Dice::new(&NO_CRIT, 3);
        assert_eq!(DamageCalculator::calculate(&request, &mut dice), 10);
    }

    #[test]
    fn unit_components_replace_attack_bonus() {
        let attacker_stats = stats(100, 20);
        let unit = CombatUnit::single_target(
            Element::Fire,
            vec![
                DamageComponent::flat(5.0),
                DamageComponent::scaling(0.5, StatKind::Magic),
            ],
        );
        let request = DamageRequest::new(
            Combatant::new(&attacker_stats, ElementalTypes::default(), 0),
            AttackType::Ranged,
        )
        .with_unit(&unit);

        // (5 + 10) × 1.25 (unit element), no strength bonus
        let mut dice = Dice::new(&NO_CRIT, 3);
        assert_eq!(DamageCalculator::calculate(&request, &mut dice), 19);
    }
}
