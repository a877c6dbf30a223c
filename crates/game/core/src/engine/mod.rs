//! Round scheduling.
//!
//! [`GameEngine`] drives one round at a time: the player spends its whole
//! budget first, then every living NPC runs its AI in spawn order. Each
//! actor's segment ends with upkeep (effects, conditions, cooldowns, budget
//! refill). Every segment draws from its own dice stream seeded by
//! `(game_seed, round, actor)`, so a round replays identically.

mod error;
mod upkeep;

pub use error::TurnError;

use crate::action::{Action, Impossible};
use crate::ai;
use crate::env::{ActionContext, Dice, GameEnv, MessageLog, compute_seed};
use crate::error::{ErrorContext, GameError};
use crate::state::{EntityId, GameState, Tick};
use crate::stats::StatKind;

/// Summary of one [`advance_round`](GameEngine::advance_round).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoundReport {
    /// Round number that was played.
    pub round: u64,
    /// Player actions that went through.
    pub performed: usize,
    /// Player actions rejected as impossible, in queue order.
    pub rejected: Vec<Impossible>,
    pub player_spent: Tick,
    /// NPCs whose segment ran (including ones that lost it to a condition).
    pub npc_segments: usize,
    /// Actors that lost their segment to stun, sleep, petrification or
    /// paralysis.
    pub skipped: Vec<EntityId>,
    pub player_alive: bool,
}

/// Authoritative driver for [`GameState`].
pub struct GameEngine<'a> {
    state: &'a mut GameState,
    env: GameEnv<'a>,
}

impl<'a> GameEngine<'a> {
    pub fn new(state: &'a mut GameState, env: GameEnv<'a>) -> Self {
        Self { state, env }
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    /// Spends one pending level-up of `actor` on `stat`. Returns `false` when
    /// none is pending.
    pub fn level_up(&mut self, actor: EntityId, stat: StatKind) -> Result<bool, TurnError> {
        let target = self
            .state
            .actor_mut(actor)
            .ok_or(TurnError::UnknownActor(actor))?;
        let raised = target.increase_level(stat);
        if raised {
            tracing::info!(
                actor = %actor,
                level = target.level.current_level,
                stat = %stat,
                "level up"
            );
        }
        Ok(raised)
    }

    /// Dice stream for one actor's segment. `stream` 0 drives actions, 1 the
    /// condition check that may cost the segment.
    fn dice(&self, actor: EntityId, stream: u32) -> Dice<'a> {
        let seed = compute_seed(self.state.game_seed, self.state.round, actor.0, stream);
        Dice::new(self.env.rng(), seed)
    }

    /// Plays one round.
    ///
    /// `player_actions` are tried in order until the player's budget is
    /// spent or the queue runs dry. Rejected actions are narrated and
    /// skipped. Logic errors from any actor abort the round.
    pub fn advance_round(
        &mut self,
        player_actions: &[Action],
        log: &mut dyn MessageLog,
    ) -> Result<RoundReport, TurnError> {
        if self.state.player().is_none() {
            return Err(TurnError::NoPlayer);
        }
        let mut report = RoundReport {
            round: self.state.round,
            ..RoundReport::default()
        };
        tracing::debug!(round = report.round, "round started");

        self.player_segment(player_actions, &mut report, log)?;

        for id in self.state.actor_ids() {
            let ready = self
                .state
                .actor(id)
                .is_some_and(|actor| !actor.is_player() && actor.is_alive() && actor.ai.is_some());
            if ready {
                self.npc_segment(id, &mut report, log)?;
                report.npc_segments += 1;
            }
        }

        report.player_alive = self.state.player().is_some_and(|p| p.is_alive());
        self.state.round += 1;
        tracing::debug!(
            round = report.round,
            performed = report.performed,
            npc_segments = report.npc_segments,
            "round finished"
        );
        Ok(report)
    }

    fn player_segment(
        &mut self,
        actions: &[Action],
        report: &mut RoundReport,
        log: &mut dyn MessageLog,
    ) -> Result<(), TurnError> {
        let id = EntityId::PLAYER;
        if !self.begin_segment(id, report) {
            upkeep::run(id, self.state, log);
            return Ok(());
        }

        let mut ctx = ActionContext::new(self.env, self.dice(id, 0), log);
        for action in actions {
            let Some(player) = self.state.player() else {
                break;
            };
            if !player.is_alive() || player.stats.time.is_exhausted() {
                break;
            }
            match action.perform(id, self.state, &mut ctx) {
                Ok(outcome) => {
                    report.performed += 1;
                    report.player_spent = report.player_spent + outcome.spent;
                }
                Err(error) => match error.as_impossible() {
                    Some(reason) if error.severity().is_recoverable() => {
                        tracing::debug!(action = ?action, %reason, "player action rejected");
                        ctx.narrate(reason.to_string());
                        report.rejected.push(reason);
                    }
                    _ => {
                        let mut context = ErrorContext::new(self.state.round).with_actor(id);
                        if let Some(player) = self.state.player() {
                            context = context.with_position(player.position);
                        }
                        return Err(TurnError::action(error, context));
                    }
                },
            }
        }

        upkeep::run(id, self.state, &mut *ctx.log);
        Ok(())
    }

    fn npc_segment(
        &mut self,
        id: EntityId,
        report: &mut RoundReport,
        log: &mut dyn MessageLog,
    ) -> Result<(), TurnError> {
        if !self.begin_segment(id, report) {
            upkeep::run(id, self.state, log);
            return Ok(());
        }

        let cap = self.env.config().max_ai_steps_per_segment;
        let mut ctx = ActionContext::new(self.env, self.dice(id, 0), log);
        for _ in 0..cap {
            let outcome = ai::step(id, self.state, &mut ctx)?;
            let exhausted = self
                .state
                .actor(id)
                .is_none_or(|actor| !actor.is_alive() || actor.stats.time.is_exhausted());
            if exhausted || outcome.ends_segment() {
                break;
            }
        }

        upkeep::run(id, self.state, &mut *ctx.log);
        Ok(())
    }

    /// Refills the budget and checks whether a condition takes the segment
    /// away. Returns `false` when the actor loses its segment.
    fn begin_segment(&mut self, id: EntityId, report: &mut RoundReport) -> bool {
        let mut dice = self.dice(id, 1);
        let Some(actor) = self.state.actor_mut(id) else {
            return false;
        };
        if !actor.is_alive() {
            return false;
        }
        actor.stats.time.refill();
        if actor.conditions.prevents_action(&mut dice) {
            actor.stats.time.exhaust();
            tracing::debug!(actor = %id, "segment lost to a condition");
            report.skipped.push(id);
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::tests::{FixedRoll, arena, fighter};
    use crate::ai::AiState;
    use crate::config::GameConfig;
    use crate::effects::{Condition, condition_names};
    use crate::state::{Direction, Faction, FactionSet, Position};

    fn play(state: &mut GameState, actions: &[Action]) -> (Result<RoundReport, TurnError>, Vec<String>) {
        let map = arena();
        let rng = FixedRoll(99);
        let config = GameConfig::default();
        let mut log: Vec<String> = Vec::new();
        let report = {
            let mut engine = GameEngine::new(state, GameEnv::new(&map, &rng, &config));
            engine.advance_round(actions, &mut log)
        };
        (report, log)
    }

    fn orc(x: i32, y: i32) -> crate::state::ActorState {
        fighter("Orc", x, y)
            .with_factions(FactionSet::new([Faction::Orc], [Faction::Player]))
            .with_ai(AiState::hostile())
    }

    #[test]
    fn player_acts_first_then_npcs_in_spawn_order() {
        let mut state = GameState::new(7);
        state.add_player(fighter("Player", 1, 1)).unwrap();
        let orc = state.spawn(orc(3, 1)).unwrap();

        let (report, log) = play(&mut state, &[Action::Move(Direction::East)]);
        let report = report.unwrap();
        assert_eq!(report.round, 0);
        assert_eq!(report.performed, 1);
        assert_eq!(report.npc_segments, 1);
        assert!(report.player_alive);
        assert_eq!(state.round, 1);
        // The orc finds the player adjacent after the step and swings.
        assert_eq!(log, vec!["Orc attacks Player for 2 hit points.".to_owned()]);
        assert_eq!(state.actor(orc).unwrap().position, Position::new(3, 1));
        // Upkeep refilled everyone.
        assert_eq!(
            state.player().unwrap().stats.time.current(),
            GameConfig::DEFAULT_TIME_BUDGET
        );
    }

    #[test]
    fn rejected_player_actions_are_narrated_and_skipped() {
        let mut state = GameState::new(7);
        state.add_player(fighter("Player", 1, 1)).unwrap();
        let (report, log) = play(
            &mut state,
            &[
                Action::Move(Direction::North),
                Action::Move(Direction::East),
                Action::Move(Direction::East),
            ],
        );
        let report = report.unwrap();
        assert_eq!(
            report.rejected,
            vec![Impossible::Blocked, Impossible::NotEnoughTime]
        );
        assert_eq!(report.performed, 1);
        assert_eq!(
            log,
            vec![
                "That way is blocked.".to_owned(),
                "You do not have enough time.".to_owned()
            ]
        );
        assert_eq!(state.player().unwrap().position, Position::new(2, 1));
    }

    #[test]
    fn stunned_actors_lose_their_segment() {
        let mut state = GameState::new(7);
        state.add_player(fighter("Player", 1, 1)).unwrap();
        let mut stunned = orc(2, 1);
        stunned
            .conditions
            .add(Condition::new(condition_names::STUNNED, 2));
        let orc = state.spawn(stunned).unwrap();

        let (report, log) = play(&mut state, &[]);
        let report = report.unwrap();
        assert_eq!(report.skipped, vec![orc]);
        assert!(log.is_empty());
        assert_eq!(state.actor(orc).unwrap().conditions.duration(condition_names::STUNNED), 1);
    }

    #[test]
    fn missing_player_is_fatal() {
        let mut state = GameState::new(7);
        let (report, _) = play(&mut state, &[]);
        assert_eq!(report, Err(TurnError::NoPlayer));
    }

    #[test]
    fn level_up_spends_pending_experience() {
        let mut state = GameState::new(7);
        state.add_player(fighter("Player", 1, 1)).unwrap();
        state.actor_mut(EntityId::PLAYER).unwrap().level.level_up_base = 200;

        let map = arena();
        let rng = FixedRoll(99);
        let config = GameConfig::default();
        let mut engine = GameEngine::new(&mut state, GameEnv::new(&map, &rng, &config));
        assert_eq!(engine.level_up(EntityId::PLAYER, StatKind::Strength), Ok(false));
        assert_eq!(
            engine.level_up(EntityId(9), StatKind::Strength),
            Err(TurnError::UnknownActor(EntityId(9)))
        );

        engine.state.actor_mut(EntityId::PLAYER).unwrap().level.add_xp(351);
        assert_eq!(engine.level_up(EntityId::PLAYER, StatKind::Strength), Ok(true));
        let player = engine.state().player().unwrap();
        assert_eq!(player.level.current_level, 2);
        assert_eq!(player.stats.core.strength, 11);
    }
}
