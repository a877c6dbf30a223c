//! Attacks: melee, ranged, magic, and skill use.

use crate::action::transition::{ActionTransition, charge};
use crate::action::weapon::{self, WeaponFlags, WeaponProfile};
use crate::action::{ActionError, ActionOutcome, Impossible};
use crate::combat::{AttackType, DamageCalculator, DamageRequest};
use crate::env::{ActionContext, has_line_of_sight};
use crate::skill::{self, AbilitySet, Skill};
use crate::state::{ActorState, Ammo, Direction, EntityId, GameState, Position, Tick, Weapon};
use crate::stats::PoolKind;

/// "Orc attacks Player for 3 hit points." and friends.
fn narrate_hit(ctx: &mut ActionContext<'_>, attacker: &str, verb: &str, target: &str, damage: i32) {
    let attacker = capitalize(attacker);
    if damage > 0 {
        ctx.narrate(format!("{attacker} {verb} {target} for {damage} hit points."));
    } else {
        ctx.narrate(format!("{attacker} {verb} {target} but does no damage."));
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Rolls one hit and applies it. Returns whether the defender died.
fn strike(
    attacker: EntityId,
    defender: EntityId,
    attack: AttackType,
    verb: &str,
    ammo: Option<&Ammo>,
    state: &mut GameState,
    ctx: &mut ActionContext<'_>,
) -> Result<bool, ActionError> {
    let (damage, attacker_name, defender_name) = {
        let source = state
            .actor(attacker)
            .ok_or(ActionError::UnknownActor(attacker))?;
        let target = state
            .actor(defender)
            .ok_or(ActionError::UnknownActor(defender))?;
        let weapon = source
            .equipment
            .weapon()
            .filter(|weapon| weapon_applies(weapon, attack));
        let request = DamageRequest::new(source.combatant(), attack)
            .against(target.combatant())
            .with_weapon(weapon)
            .with_ammo(ammo)
            .with_base_crit(ctx.config().base_crit_chance);
        let damage = DamageCalculator::calculate(&request, &mut ctx.dice);
        (damage, source.name.clone(), target.name.clone())
    };

    narrate_hit(ctx, &attacker_name, verb, &defender_name, damage);
    let taken = state.apply_damage(defender, damage, Some(attacker), attack, &mut *ctx.log);
    tracing::debug!(%attacker, %defender, %attack, damage, "attack resolved");
    Ok(taken.is_some_and(|taken| taken.killed))
}

fn weapon_applies(weapon: &Weapon, attack: AttackType) -> bool {
    match attack {
        AttackType::Melee => weapon::can_melee(weapon.category),
        AttackType::Ranged | AttackType::Magic => {
            weapon::profile(attack, weapon.category).is_some()
        }
    }
}

/// Living actor on `target` other than `actor`.
fn victim_at(
    actor: &ActorState,
    state: &GameState,
    target: Position,
) -> Result<EntityId, Impossible> {
    if target == actor.position {
        return Err(Impossible::TargetSelf);
    }
    state
        .living_actor_at(target)
        .map(|victim| victim.id)
        .ok_or(Impossible::NothingToAttack)
}

/// Strike an adjacent tile, with the held weapon or bare-handed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct MeleeAction {
    direction: Direction,
}

impl MeleeAction {
    pub(crate) fn new(direction: Direction) -> Self {
        Self { direction }
    }
}

impl ActionTransition for MeleeAction {
    fn pre_validate(
        &self,
        actor: &ActorState,
        state: &GameState,
        ctx: &ActionContext<'_>,
    ) -> Result<Tick, ActionError> {
        let target = actor.position.step(self.direction);
        state
            .living_actor_at(target)
            .ok_or(Impossible::NothingToAttack)?;

        match actor.equipment.weapon() {
            None => Ok(ctx.config().unarmed_cost),
            Some(held) => weapon::profile(AttackType::Melee, held.category)
                .filter(|profile| profile.has(WeaponFlags::CAN_MELEE))
                .map(|profile| profile.time)
                .ok_or_else(|| Impossible::NoAppropriateWeapon.into()),
        }
    }

    fn apply(
        &self,
        actor: EntityId,
        cost: Tick,
        state: &mut GameState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<ActionOutcome, ActionError> {
        let origin = state
            .actor(actor)
            .ok_or(ActionError::UnknownActor(actor))?
            .position;
        let defender = state
            .living_actor_at(origin.step(self.direction))
            .map(|victim| victim.id)
            .ok_or(Impossible::NothingToAttack)?;
        let outcome = charge(state, actor, cost)?;
        strike(actor, defender, AttackType::Melee, "attacks", None, state, ctx)?;
        Ok(outcome)
    }
}

/// Fire the held bow, crossbow or gun at a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct RangedAction {
    target: Position,
}

impl RangedAction {
    pub(crate) fn new(target: Position) -> Self {
        Self { target }
    }

    fn profile(actor: &ActorState) -> Result<(&Weapon, WeaponProfile), Impossible> {
        let held = actor.equipment.weapon().ok_or(Impossible::NotRangedWeapon)?;
        let profile = weapon::ranged_profile(held.category).ok_or(Impossible::NotRangedWeapon)?;
        Ok((held, profile))
    }

    /// Takes one round from wherever this weapon feeds from.
    fn draw_round(actor: &mut ActorState, profile: &WeaponProfile) -> Option<Ammo> {
        let source = if profile.has(WeaponFlags::NEEDS_CONTAINER) {
            &mut actor.equipment.quiver_mut()?.contents
        } else {
            &mut actor.equipment.weapon_mut()?.loaded
        };
        let stack = source.as_mut()?;
        let round = stack.split(1);
        if stack.quantity == 0 {
            *source = None;
        }
        (round.quantity > 0).then_some(round)
    }
}

impl ActionTransition for RangedAction {
    fn pre_validate(
        &self,
        actor: &ActorState,
        state: &GameState,
        ctx: &ActionContext<'_>,
    ) -> Result<Tick, ActionError> {
        let (held, profile) = Self::profile(actor)?;
        if !has_line_of_sight(ctx.map(), actor.position, self.target) {
            return Err(Impossible::NoLineOfFire.into());
        }
        if actor.position.euclidean(self.target) > held.range as f32 {
            return Err(Impossible::OutOfRange.into());
        }
        victim_at(actor, state, self.target)?;
        if profile.has(WeaponFlags::NEEDS_CONTAINER) && actor.equipment.quiver().is_none() {
            return Err(Impossible::NoQuiver.into());
        }
        if weapon::rounds_available(&actor.equipment, &profile) == 0 {
            return Err(Impossible::NoAmmo.into());
        }
        Ok(profile.time)
    }

    /// Multi-shot weapons keep firing while time and rounds last and stop
    /// on a kill. Shots already fired stay spent.
    fn apply(
        &self,
        actor: EntityId,
        cost: Tick,
        state: &mut GameState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<ActionOutcome, ActionError> {
        let shooter = state
            .actor(actor)
            .ok_or(ActionError::UnknownActor(actor))?;
        let (_, profile) = Self::profile(shooter)?;
        let defender = victim_at(shooter, state, self.target)?;

        let mut spent = Tick::ZERO;
        loop {
            let shooter = state
                .actor_mut(actor)
                .ok_or(ActionError::UnknownActor(actor))?;
            let Some(round) = Self::draw_round(shooter, &profile) else {
                break;
            };
            spent = spent + charge(state, actor, cost)?.spent;
            let killed = strike(
                actor,
                defender,
                AttackType::Ranged,
                "shoots",
                Some(&round),
                state,
                ctx,
            )?;

            if killed || !profile.has(WeaponFlags::MULTI_SHOT) {
                break;
            }
            let shooter = state
                .actor(actor)
                .ok_or(ActionError::UnknownActor(actor))?;
            if !shooter.is_alive()
                || !shooter.stats.time.can_afford(cost)
                || weapon::rounds_available(&shooter.equipment, &profile) == 0
            {
                break;
            }
        }
        Ok(ActionOutcome::spent(spent))
    }
}

/// Channel the held staff or orb at a tile, or fire a wand's spell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct MagicAction {
    target: Position,
}

impl MagicAction {
    pub(crate) fn new(target: Position) -> Self {
        Self { target }
    }

    fn profile(actor: &ActorState) -> Result<(&Weapon, WeaponProfile), Impossible> {
        let held = actor.equipment.weapon().ok_or(Impossible::NotMagicWeapon)?;
        let profile =
            weapon::profile(AttackType::Magic, held.category).ok_or(Impossible::NotMagicWeapon)?;
        Ok((held, profile))
    }
}

impl ActionTransition for MagicAction {
    fn pre_validate(
        &self,
        actor: &ActorState,
        state: &GameState,
        ctx: &ActionContext<'_>,
    ) -> Result<Tick, ActionError> {
        if !has_line_of_sight(ctx.map(), actor.position, self.target) {
            return Err(Impossible::NoLineOfFire.into());
        }
        let (held, profile) = Self::profile(actor)?;
        if profile.has(WeaponFlags::CASTS_SKILLS) {
            return Ok(weapon::ready_wand_skill(actor, held)?.cost.time);
        }

        if held.range > 0 && actor.position.euclidean(self.target) > held.range as f32 {
            return Err(Impossible::OutOfRange.into());
        }
        if actor.stats.pool(PoolKind::Mp) < held.mp_cost {
            return Err(Impossible::NotEnoughMana.into());
        }
        victim_at(actor, state, self.target)?;
        Ok(profile.time)
    }

    fn apply(
        &self,
        actor: EntityId,
        cost: Tick,
        state: &mut GameState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<ActionOutcome, ActionError> {
        let caster = state
            .actor(actor)
            .ok_or(ActionError::UnknownActor(actor))?;
        let (held, profile) = Self::profile(caster)?;
        if profile.has(WeaponFlags::CASTS_SKILLS) {
            let spell = weapon::ready_wand_skill(caster, held)?.clone();
            let outcome = skill::activate(actor, &spell, self.target, state, ctx)?;
            return Ok(ActionOutcome::spent(outcome.time_spent));
        }

        let mp_cost = held.mp_cost;
        let defender = victim_at(caster, state, self.target)?;
        let outcome = charge(state, actor, cost)?;
        if let Some(caster) = state.actor_mut(actor) {
            caster.stats.adjust_pool(PoolKind::Mp, -mp_cost);
        }
        strike(
            actor,
            defender,
            AttackType::Magic,
            "fires magic energy at",
            None,
            state,
            ctx,
        )?;
        Ok(outcome)
    }
}

/// Use a learned skill, or one carried by the held wand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct SkillAction<'a> {
    name: &'a str,
    target: Position,
}

impl<'a> SkillAction<'a> {
    pub(crate) fn new(name: &'a str, target: Position) -> Self {
        Self { name, target }
    }

    fn lookup<'s>(&self, actor: &'s ActorState) -> Result<&'s Skill, Impossible> {
        actor
            .abilities
            .get(self.name)
            .or_else(|| {
                actor
                    .equipment
                    .weapon()
                    .and_then(|held| held.skills.iter().find(|spell| spell.name == self.name))
            })
            .ok_or(Impossible::UnknownSkill)
    }
}

impl ActionTransition for SkillAction<'_> {
    fn pre_validate(
        &self,
        actor: &ActorState,
        _state: &GameState,
        _ctx: &ActionContext<'_>,
    ) -> Result<Tick, ActionError> {
        let found = self.lookup(actor)?;
        if !actor.stats.time.can_afford(found.cost.time) {
            return Err(Impossible::NotEnoughTime.into());
        }
        if actor.abilities.cooldown(&found.name) > 0 {
            return Err(Impossible::SkillOnCooldown.into());
        }
        if !AbilitySet::can_afford(found, &actor.stats) {
            return Err(Impossible::NotEnoughResources.into());
        }
        Ok(found.cost.time)
    }

    fn apply(
        &self,
        actor: EntityId,
        _cost: Tick,
        state: &mut GameState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<ActionOutcome, ActionError> {
        let user = state
            .actor(actor)
            .ok_or(ActionError::UnknownActor(actor))?;
        let found = self.lookup(user)?.clone();
        let outcome = skill::activate(actor, &found, self.target, state, ctx)?;
        Ok(ActionOutcome::spent(outcome.time_spent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::action::tests::{fighter, run};
    use crate::combat::{DamageComponent, Element};
    use crate::skill::{CombatUnit, SkillCost, SkillDirective};
    use crate::state::{AmmoKind, Container, DamageDice, Item, ItemKind, WeaponCategory};

    fn bullets(quantity: u32) -> Ammo {
        Ammo {
            kind: AmmoKind::Bullet,
            name: "Bullet".into(),
            quantity,
            damage: 1,
            element: Element::Normal,
        }
    }

    fn gunner(loaded: u32) -> ActorState {
        let mut gun = Weapon::new(WeaponCategory::Gun, Element::Normal, DamageDice::fixed(3))
            .with_range(6)
            .with_capacity(6);
        gun.loaded = Some(bullets(loaded));
        let mut actor = fighter("Player", 1, 1);
        actor.equipment.weapon = Some(Item::new("Pistol", ItemKind::Weapon(gun)));
        actor
    }

    #[test]
    fn gun_empties_the_budget_one_shot_at_a_time() {
        let mut state = GameState::new(1);
        state.add_player(gunner(6)).unwrap();
        let mut ogre = fighter("Ogre", 4, 1);
        ogre.stats.modify_pool_bonus(PoolKind::Hp, 100);
        ogre.stats.heal(100);
        let ogre = state.spawn(ogre).unwrap();

        let (result, log) = run(&mut state, |state, ctx| {
            Action::Ranged(Position::new(4, 1)).perform(EntityId::PLAYER, state, ctx)
        });
        // 6 time at 1.5 per shot: four shots of (3 + 1) × 1.25.
        assert_eq!(result.unwrap().spent, Tick::whole(6));
        assert_eq!(log.len(), 4);
        assert_eq!(log[0], "Player shoots Ogre for 5 hit points.");
        let player = state.player().unwrap();
        assert_eq!(player.equipment.weapon().unwrap().loaded_rounds(), 2);
        assert_eq!(state.actor(ogre).unwrap().stats.hp(), 100);
    }

    #[test]
    fn gun_stops_on_a_kill_and_keeps_the_rest() {
        let mut state = GameState::new(1);
        state.add_player(gunner(6)).unwrap();
        let mut rat = fighter("Rat", 3, 1);
        rat.stats.pools.hp.set(8);
        let rat = state.spawn(rat).unwrap();

        let (result, _) = run(&mut state, |state, ctx| {
            Action::Ranged(Position::new(3, 1)).perform(EntityId::PLAYER, state, ctx)
        });
        assert_eq!(result.unwrap().spent, Tick::whole(3));
        assert!(!state.actor(rat).unwrap().is_alive());
        let player = state.player().unwrap();
        assert_eq!(player.equipment.weapon().unwrap().loaded_rounds(), 4);
        assert_eq!(player.stats.time.current(), Tick::whole(3));
    }

    #[test]
    fn ranged_checks_run_in_order_without_charging() {
        let mut state = GameState::new(1);
        state.add_player(gunner(0)).unwrap();
        state.spawn(fighter("Orc", 3, 1)).unwrap();
        state.spawn(fighter("Troll", 8, 1)).unwrap();

        let (results, _) = run(&mut state, |state, ctx| {
            (
                Action::Ranged(Position::new(7, 4)).perform(EntityId::PLAYER, state, ctx),
                Action::Ranged(Position::new(8, 1)).perform(EntityId::PLAYER, state, ctx),
                Action::Ranged(Position::new(2, 2)).perform(EntityId::PLAYER, state, ctx),
                Action::Ranged(Position::new(3, 1)).perform(EntityId::PLAYER, state, ctx),
            )
        });
        // The pillar at (5, 3) sits on the line to (7, 4).
        assert_eq!(results.0, Err(Impossible::NoLineOfFire.into()));
        assert_eq!(results.1, Err(Impossible::OutOfRange.into()));
        assert_eq!(results.2, Err(Impossible::NothingToAttack.into()));
        assert_eq!(results.3, Err(Impossible::NoAmmo.into()));
        assert_eq!(
            state.player().unwrap().stats.time.current(),
            Tick::whole(6)
        );
    }

    #[test]
    fn bow_draws_from_the_quiver() {
        let mut state = GameState::new(1);
        let mut archer = fighter("Player", 1, 1);
        archer.equipment.weapon = Some(Item::new(
            "Bow",
            ItemKind::Weapon(
                Weapon::new(WeaponCategory::Bow, Element::Normal, DamageDice::fixed(3))
                    .with_range(8),
            ),
        ));
        state.add_player(archer).unwrap();
        state.spawn(fighter("Orc", 4, 2)).unwrap();

        let (missing, _) = run(&mut state, |state, ctx| {
            Action::Ranged(Position::new(4, 2)).perform(EntityId::PLAYER, state, ctx)
        });
        assert_eq!(missing, Err(Impossible::NoQuiver.into()));

        state.actor_mut(EntityId::PLAYER).unwrap().equipment.container = Some(Item::new(
            "Quiver",
            ItemKind::Container(Container {
                accepts: AmmoKind::Arrow,
                capacity: 20,
                contents: Some(Ammo {
                    kind: AmmoKind::Arrow,
                    name: "Arrow".into(),
                    quantity: 1,
                    damage: 2,
                    element: Element::Normal,
                }),
            }),
        ));
        let (shot, log) = run(&mut state, |state, ctx| {
            Action::Ranged(Position::new(4, 2)).perform(EntityId::PLAYER, state, ctx)
        });
        assert_eq!(shot.unwrap().spent, Tick::whole(5));
        assert_eq!(log, vec!["Player shoots Orc for 6 hit points.".to_owned()]);
        let player = state.player().unwrap();
        assert!(player.equipment.quiver().unwrap().contents.is_none());
    }

    #[test]
    fn staff_costs_mana_and_ignores_armor() {
        let mut state = GameState::new(1);
        let mut mage = fighter("Player", 1, 1);
        mage.equipment.weapon = Some(Item::new(
            "Staff",
            ItemKind::Weapon(
                Weapon::new(WeaponCategory::Staff, Element::Normal, DamageDice::fixed(2))
                    .with_mp_cost(4),
            ),
        ));
        state.add_player(mage).unwrap();
        let mut knight = fighter("Knight", 3, 1);
        knight.equipment.armor = Some(Item::new(
            "Plate",
            ItemKind::Armor(crate::state::Armor { defense: 50 }),
        ));
        let knight = state.spawn(knight).unwrap();

        let (result, log) = run(&mut state, |state, ctx| {
            Action::Magic(Position::new(3, 1)).perform(EntityId::PLAYER, state, ctx)
        });
        assert_eq!(result.unwrap().spent, Tick::whole(5));
        // (2 rolled + 10 magic) × 1.25 for the staff's own element.
        assert_eq!(state.actor(knight).unwrap().stats.hp(), 5);
        assert_eq!(
            log,
            vec!["Player fires magic energy at Knight for 15 hit points.".to_owned()]
        );
        assert_eq!(state.player().unwrap().stats.pool(PoolKind::Mp), 6);
    }

    fn firebolt() -> Skill {
        Skill::new(
            "Firebolt",
            SkillCost {
                mp: 5,
                time: Tick::whole(2),
                ..SkillCost::default()
            },
            2,
            SkillDirective::Combat(CombatUnit::single_target(
                Element::Fire,
                vec![DamageComponent::flat(6.0)],
            )),
        )
    }

    #[test]
    fn wand_fires_its_skill_and_tracks_cooldown_on_the_holder() {
        let mut state = GameState::new(1);
        let mut mage = fighter("Player", 1, 1);
        mage.equipment.weapon = Some(Item::new(
            "Wand of Fire",
            ItemKind::Weapon(
                Weapon::new(WeaponCategory::Wand, Element::Fire, DamageDice::fixed(0))
                    .with_skills(vec![firebolt()]),
            ),
        ));
        state.add_player(mage).unwrap();
        state.spawn(fighter("Orc", 3, 1)).unwrap();

        let (results, _) = run(&mut state, |state, ctx| {
            (
                Action::Magic(Position::new(3, 1)).perform(EntityId::PLAYER, state, ctx),
                Action::Magic(Position::new(3, 1)).perform(EntityId::PLAYER, state, ctx),
            )
        });
        assert_eq!(results.0.unwrap().spent, Tick::whole(2));
        assert_eq!(results.1, Err(Impossible::SkillOnCooldown.into()));
        let player = state.player().unwrap();
        assert_eq!(player.abilities.cooldown("Firebolt"), 2);
        assert_eq!(player.stats.pool(PoolKind::Mp), 5);
    }

    #[test]
    fn skill_action_reports_recoverable_reasons() {
        let mut state = GameState::new(1);
        let mut mage = fighter("Player", 1, 1);
        mage.abilities.learn(firebolt()).unwrap();
        mage.stats.pools.mp.set(2);
        state.add_player(mage).unwrap();
        state.spawn(fighter("Orc", 3, 1)).unwrap();

        let skill = |name: &str| Action::Skill {
            name: name.to_owned(),
            target: Position::new(3, 1),
        };
        let (results, _) = run(&mut state, |state, ctx| {
            (
                skill("Meteor").perform(EntityId::PLAYER, state, ctx),
                skill("Firebolt").perform(EntityId::PLAYER, state, ctx),
            )
        });
        assert_eq!(results.0, Err(Impossible::UnknownSkill.into()));
        assert_eq!(results.1, Err(Impossible::NotEnoughResources.into()));
        let error = results.1.unwrap_err();
        assert!(crate::error::GameError::severity(&error).is_recoverable());
    }
}
