//! Whole-round scenarios driven through `GameEngine`.

use delve_core::combat::{AttackType, Element, ElementalTypes};
use delve_core::effects::condition_names;
use delve_core::env::{GameEnv, GridMap, PcgRng, RngOracle};
use delve_core::state::{
    ActorState, DamageDice, EntityId, Faction, FactionSet, GameState, Item, ItemKind, Level,
    Personality, Position, Tick, Weapon, WeaponCategory,
};
use delve_core::stats::{ActorStats, PoolKind, StatBlock};
use delve_core::{
    Action, AiMode, AiState, Condition, Direction, GameConfig, GameEngine, Impossible, RoundReport,
    StatusEffect,
};

/// Every raw draw is 99, so every d100 is 100: no crits, no lucky rolls.
struct FixedRoll;

impl RngOracle for FixedRoll {
    fn next_u32(&self, _seed: u64) -> u32 {
        99
    }
}

fn arena() -> GridMap {
    GridMap::parse(&[
        "##########",
        "#........#",
        "#........#",
        "#....#...#",
        "#........#",
        "##########",
    ])
    .unwrap()
}

fn body(name: &str, x: i32, y: i32, constitution: i32) -> ActorState {
    let stats = ActorStats::new(
        StatBlock {
            strength: 10,
            constitution,
            magic: 10,
            awareness: 32,
            ..StatBlock::default()
        },
        Default::default(),
        GameConfig::DEFAULT_TIME_BUDGET,
    );
    ActorState::new(EntityId(0), name, Position::new(x, y), stats)
        .with_elements(ElementalTypes::single(Element::Pure))
}

fn player(x: i32, y: i32) -> ActorState {
    body("Player", x, y, 10).with_factions(FactionSet::new([Faction::Player], []))
}

fn orc(x: i32, y: i32) -> ActorState {
    body("Orc", x, y, 10)
        .with_factions(FactionSet::new([Faction::Orc], [Faction::Player]))
        .with_ai(AiState::hostile())
}

fn play_round(
    state: &mut GameState,
    rng: &dyn RngOracle,
    actions: &[Action],
    log: &mut Vec<String>,
) -> RoundReport {
    let map = arena();
    let config = GameConfig::default();
    let mut engine = GameEngine::new(state, GameEnv::new(&map, rng, &config));
    engine.advance_round(actions, log).unwrap()
}

#[test]
fn second_move_in_a_round_is_rejected_and_costs_nothing() {
    let mut state = GameState::new(3);
    state.add_player(player(1, 1)).unwrap();
    let mut log = Vec::new();

    let report = play_round(
        &mut state,
        &FixedRoll,
        &[Action::Move(Direction::East), Action::Move(Direction::East)],
        &mut log,
    );
    assert_eq!(report.performed, 1);
    assert_eq!(report.player_spent, Tick::whole(4));
    assert_eq!(report.rejected, vec![Impossible::NotEnoughTime]);
    assert_eq!(log, vec!["You do not have enough time.".to_owned()]);
    assert_eq!(state.player().unwrap().position, Position::new(2, 1));
}

#[test]
fn stacked_poison_ticks_for_twenty_at_upkeep() {
    let mut state = GameState::new(3);
    // constitution 20 gives 40 hp
    let mut victim =
        body("Player", 1, 1, 20).with_factions(FactionSet::new([Faction::Player], []));
    let poison = StatusEffect::new("Poison", 4).with_tick(PoolKind::Hp, -10);
    victim.apply_effect(&poison);
    victim.apply_effect(&poison);
    let stacked = victim.effects.get("Poison").unwrap();
    assert_eq!((stacked.stacks, stacked.duration), (2, 8));
    state.add_player(victim).unwrap();

    play_round(&mut state, &FixedRoll, &[], &mut Vec::new());
    let player = state.player().unwrap();
    assert_eq!(player.stats.pool(PoolKind::Hp), 20);
    assert_eq!(player.effects.get("Poison").unwrap().duration, 7);
}

#[test]
fn fearful_monster_runs_from_the_player() {
    let mut state = GameState::new(11);
    state.add_player(player(1, 2)).unwrap();
    let coward = orc(4, 2).with_personality(Personality::default().with_trait("fearful", 100));
    let coward = state.spawn(coward).unwrap();

    play_round(&mut state, &PcgRng, &[], &mut Vec::new());
    let actor = state.actor(coward).unwrap();
    assert_eq!(actor.ai.as_ref().unwrap().mode, AiMode::Fleeing);
    assert!(actor.position.chebyshev(Position::new(1, 2)) > 3);
}

#[test]
fn killing_blow_credits_experience_to_the_player() {
    let mut state = GameState::new(3);
    let mut hero = player(1, 1).with_level(Level {
        level_up_base: 200,
        ..Level::default()
    });
    hero.equipment.weapon = Some(Item::new(
        "Greatsword",
        ItemKind::Weapon(Weapon::new(
            WeaponCategory::Sword,
            Element::Normal,
            DamageDice::fixed(30),
        )),
    ));
    state.add_player(hero).unwrap();
    let victim = orc(2, 1).with_level(Level {
        xp_given: 35,
        ..Level::default()
    });
    let victim = state.spawn(victim).unwrap();

    let mut log = Vec::new();
    let report = play_round(
        &mut state,
        &FixedRoll,
        &[Action::Melee(Direction::East)],
        &mut log,
    );
    assert_eq!(report.npc_segments, 0);
    assert!(log.contains(&"Orc is dead!".to_owned()));
    assert!(log.contains(&"You gain 35 experience points.".to_owned()));
    assert_eq!(state.player().unwrap().level.current_xp, 35);

    let corpse = state.actor(victim).unwrap();
    assert_eq!(corpse.name, "remains of Orc");
    assert!(corpse.ai.is_none());
    assert!(!corpse.blocks_movement);
}

#[test]
fn confusion_wears_off_after_its_turns() {
    let mut state = GameState::new(5);
    state.add_player(player(1, 1)).unwrap();
    let mut dazed = orc(7, 4);
    if let Some(ai) = dazed.ai.as_mut() {
        ai.confuse(1);
    }
    let dazed = state.spawn(dazed).unwrap();

    let mut log = Vec::new();
    play_round(&mut state, &PcgRng, &[], &mut log);
    assert!(state.actor(dazed).unwrap().ai.as_ref().unwrap().mode.is_confused());

    play_round(&mut state, &PcgRng, &[], &mut log);
    assert!(log.contains(&"The Orc is no longer confused.".to_owned()));
    assert_eq!(
        state.actor(dazed).unwrap().ai.as_ref().unwrap().mode,
        AiMode::Hostile
    );
}

#[test]
fn sleepers_skip_their_segment_but_still_tick() {
    let mut state = GameState::new(5);
    state.add_player(player(1, 1)).unwrap();
    let mut sleeper = orc(2, 1);
    sleeper
        .conditions
        .add(Condition::new(condition_names::SLEEP, 3));
    let sleeper = state.spawn(sleeper).unwrap();

    let mut log = Vec::new();
    let report = play_round(&mut state, &FixedRoll, &[], &mut log);
    assert_eq!(report.skipped, vec![sleeper]);
    assert!(log.is_empty());
    assert_eq!(state.player().unwrap().stats.pool(PoolKind::Hp), 20);
    assert_eq!(
        state
            .actor(sleeper)
            .unwrap()
            .conditions
            .duration(condition_names::SLEEP),
        2
    );
}

#[test]
fn pools_never_leave_their_bounds() {
    let mut state = GameState::new(5);
    let mut healthy = player(1, 1);
    healthy.apply_effect(&StatusEffect::new("Regeneration", 6).with_tick(PoolKind::Hp, 15));
    state.add_player(healthy).unwrap();
    let orc = state.spawn(orc(7, 4)).unwrap();

    play_round(&mut state, &FixedRoll, &[], &mut Vec::new());
    assert_eq!(state.player().unwrap().stats.pool(PoolKind::Hp), 20);

    let mut log = Vec::new();
    let taken = state
        .apply_damage(orc, 1_000, Some(EntityId::PLAYER), AttackType::Melee, &mut log)
        .unwrap();
    assert!(taken.killed);
    assert_eq!(state.actor(orc).unwrap().stats.pool(PoolKind::Hp), 0);
}

#[test]
fn same_seed_replays_the_same_game() {
    fn setup() -> GameState {
        let mut state = GameState::new(2024);
        state.add_player(player(1, 1)).unwrap();
        state.spawn(orc(8, 4)).unwrap();
        state
            .spawn(orc(6, 1).with_personality(Personality::default().with_trait("fearful", 40)))
            .unwrap();
        state
    }

    let mut first = setup();
    let mut second = setup();
    let mut first_log = Vec::new();
    let mut second_log = Vec::new();
    for _ in 0..6 {
        let actions = [Action::Wait];
        let a = play_round(&mut first, &PcgRng, &actions, &mut first_log);
        let b = play_round(&mut second, &PcgRng, &actions, &mut second_log);
        assert_eq!(a, b);
    }
    assert_eq!(first, second);
    assert_eq!(first_log, second_log);
    assert_eq!(first.round, 6);
}
