//! Combat units: the damage-dealing payload of a skill.

use super::SkillError;
use crate::action::Impossible;
use crate::combat::{AttackType, DamageCalculator, DamageComponent, DamageRequest, Element};
use crate::config::GameConfig;
use crate::effects::StatusEffect;
use crate::env::{ActionContext, field_of_view};
use crate::state::{EntityId, GameState, Position};

/// Which way an area unit is delivered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AreaForm {
    /// Centred on a visible target tile.
    Ranged,
    /// Everything adjacent to the user.
    Melee,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum UnitShape {
    SingleTarget,
    Area { radius: u32, form: AreaForm },
}

/// Recursive damage payload. Stateless; cooldowns live in `AbilitySet`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatUnit {
    pub element: Element,
    pub components: Vec<DamageComponent>,
    /// Cap on the summed component value.
    pub max_damage: f32,
    pub shape: UnitShape,
    /// Applied to every actor the unit hits.
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<StatusEffect>,
    /// Run after this unit against the same target.
    #[cfg_attr(feature = "serde", serde(default))]
    pub children: Vec<CombatUnit>,
}

impl CombatUnit {
    fn with_shape(element: Element, components: Vec<DamageComponent>, shape: UnitShape) -> Self {
        Self {
            element,
            components,
            max_damage: f32::MAX,
            shape,
            effects: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn single_target(element: Element, components: Vec<DamageComponent>) -> Self {
        Self::with_shape(element, components, UnitShape::SingleTarget)
    }

    pub fn area(element: Element, components: Vec<DamageComponent>, radius: u32) -> Self {
        Self::with_shape(
            element,
            components,
            UnitShape::Area {
                radius,
                form: AreaForm::Ranged,
            },
        )
    }

    /// Area unit with the default radius.
    pub fn blast(element: Element, components: Vec<DamageComponent>) -> Self {
        Self::area(element, components, GameConfig::DEFAULT_AREA_RADIUS)
    }

    pub fn melee_area(element: Element, components: Vec<DamageComponent>) -> Self {
        Self::with_shape(
            element,
            components,
            UnitShape::Area {
                radius: 1,
                form: AreaForm::Melee,
            },
        )
    }

    pub fn with_cap(mut self, max_damage: f32) -> Self {
        self.max_damage = max_damage;
        self
    }

    pub fn with_effect(mut self, effect: StatusEffect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn with_child(mut self, child: CombatUnit) -> Self {
        self.children.push(child);
        self
    }

    /// Whether the unit needs a target tile chosen by the user.
    pub fn needs_target(&self) -> bool {
        !matches!(
            self.shape,
            UnitShape::Area {
                form: AreaForm::Melee,
                ..
            }
        )
    }

    /// Resolves this unit and its children. Returns how many actors were hit.
    ///
    /// Validation happens before any damage lands. A root unit rejects an
    /// empty blast radius; children silently hit nothing instead.
    pub fn execute(
        &self,
        user: EntityId,
        target: Position,
        state: &mut GameState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<u32, SkillError> {
        self.execute_inner(user, target, state, ctx, true)
    }

    fn execute_inner(
        &self,
        user: EntityId,
        target: Position,
        state: &mut GameState,
        ctx: &mut ActionContext<'_>,
        is_root: bool,
    ) -> Result<u32, SkillError> {
        let (victims, attack) = match self.select_victims(user, target, state, ctx, is_root) {
            Ok(selection) => selection,
            Err(reason) if !is_root => {
                tracing::trace!(%reason, "child unit found nothing to hit");
                return Ok(0);
            }
            Err(reason) => return Err(reason.into()),
        };

        let mut hits = 0;
        for victim in &victims {
            let damage = {
                let attacker = state.actor(user).ok_or(SkillError::UnknownActor(user))?;
                let Some(defender) = state.actor(*victim) else {
                    continue;
                };
                let weapon = attacker
                    .equipment
                    .weapon()
                    .filter(|weapon| self.weapon_contributes(weapon.attack_type()));
                let request = DamageRequest::new(attacker.combatant(), attack)
                    .against(defender.combatant())
                    .with_weapon(weapon)
                    .with_unit(self)
                    .with_base_crit(ctx.config().base_crit_chance);
                DamageCalculator::calculate(&request, &mut ctx.dice)
            };

            if let Some(name) = state.actor(*victim).map(|actor| actor.name.clone()) {
                ctx.narrate(format!("The {name} is hit, taking {} damage!", damage.max(0)));
            }
            state.apply_damage(*victim, damage, Some(user), attack, &mut *ctx.log);
            if let Some(actor) = state.actor_mut(*victim)
                && actor.is_alive()
            {
                for effect in &self.effects {
                    actor.apply_effect(effect);
                }
            }
            hits += 1;
        }

        for child in &self.children {
            hits += child.execute_inner(user, target, state, ctx, false)?;
        }
        Ok(hits)
    }

    fn weapon_contributes(&self, weapon: AttackType) -> bool {
        match self.shape {
            UnitShape::Area {
                form: AreaForm::Ranged,
                ..
            } => weapon == AttackType::Magic,
            UnitShape::Area {
                form: AreaForm::Melee,
                ..
            } => weapon == AttackType::Melee,
            UnitShape::SingleTarget => weapon != AttackType::Melee,
        }
    }

    fn select_victims(
        &self,
        user: EntityId,
        target: Position,
        state: &GameState,
        ctx: &ActionContext<'_>,
        is_root: bool,
    ) -> Result<(Vec<EntityId>, AttackType), Impossible> {
        let Some(caster) = state.actor(user) else {
            return Err(Impossible::NothingToAttack);
        };
        let origin = caster.position;

        if self.needs_target()
            && !field_of_view(ctx.map(), origin, caster.sight_range()).contains(target)
        {
            return Err(Impossible::NotVisible);
        }

        match self.shape {
            UnitShape::Area {
                radius,
                form: AreaForm::Ranged,
            } => {
                let victims: Vec<EntityId> = state
                    .actors
                    .iter()
                    .filter(|actor| {
                        actor.is_alive() && actor.position.euclidean(target) <= radius as f32
                    })
                    .map(|actor| actor.id)
                    .collect();
                if victims.is_empty() && is_root {
                    return Err(Impossible::NoTargetsInRadius);
                }
                Ok((victims, AttackType::Magic))
            }
            UnitShape::Area {
                radius,
                form: AreaForm::Melee,
            } => {
                let victims = state
                    .actors
                    .iter()
                    .filter(|actor| {
                        actor.id != user
                            && actor.is_alive()
                            && actor.position.chebyshev(origin) <= radius
                    })
                    .map(|actor| actor.id)
                    .collect();
                Ok((victims, AttackType::Melee))
            }
            UnitShape::SingleTarget => {
                if target == origin {
                    return Err(Impossible::TargetSelf);
                }
                let victim = state
                    .living_actor_at(target)
                    .ok_or(Impossible::NoTargetAtLocation)?;
                Ok((vec![victim.id], AttackType::Ranged))
            }
        }
    }
}
