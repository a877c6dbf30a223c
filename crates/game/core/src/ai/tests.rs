use super::*;
use crate::action::tests::{FixedRoll, arena, fighter};
use crate::combat::Element;
use crate::config::GameConfig;
use crate::env::{Dice, GameEnv, GridMap};
use crate::error::ErrorSeverity;
use crate::skill::SkillError;
use crate::state::{
    Ammo, AmmoKind, Armor, DamageDice, Faction, FactionSet, Item, ItemKind, Position, WeaponCategory,
};

fn player(x: i32, y: i32) -> ActorState {
    fighter("Player", x, y).with_factions(FactionSet::new([Faction::Player], []))
}

fn orc(x: i32, y: i32) -> ActorState {
    fighter("Orc", x, y)
        .with_factions(FactionSet::new([Faction::Orc], [Faction::Player]))
        .with_ai(AiState::hostile())
}

/// Every d100 lands on 100, so coins come up tails and fear needs 100.
fn run_on<T>(
    map: &GridMap,
    state: &mut GameState,
    f: impl FnOnce(&mut GameState, &mut ActionContext<'_>) -> T,
) -> (T, Vec<String>) {
    let rng = FixedRoll(99);
    let config = GameConfig::default();
    let mut log: Vec<String> = Vec::new();
    let result = {
        let env = GameEnv::new(map, &rng, &config);
        let mut ctx = ActionContext::new(env, Dice::new(&rng, 0), &mut log);
        f(state, &mut ctx)
    };
    (result, log)
}

fn ai_of(state: &GameState, id: EntityId) -> &AiState {
    state.actor(id).unwrap().ai.as_ref().unwrap()
}

fn refill(state: &mut GameState, id: EntityId) {
    state.actor_mut(id).unwrap().stats.time.refill();
}

#[test]
fn adjacent_enemy_is_attacked_in_melee() {
    let mut state = GameState::new(1);
    state.add_player(player(1, 1)).unwrap();
    let orc = state.spawn(orc(2, 1)).unwrap();

    let (outcome, log) = run_on(&arena(), &mut state, |state, ctx| step(orc, state, ctx));
    assert_eq!(
        outcome.unwrap(),
        StepOutcome::Acted {
            action: Action::Melee(Direction::West),
            spent: Tick::whole(5),
        }
    );
    assert_eq!(log, vec!["Orc attacks Player for 2 hit points.".to_owned()]);
    assert_eq!(ai_of(&state, orc).target, Some(EntityId::PLAYER));
    assert_eq!(ai_of(&state, orc).mode, AiMode::Hostile);
}

#[test]
fn distant_enemy_is_approached_until_time_runs_out() {
    let mut state = GameState::new(1);
    state.add_player(player(1, 1)).unwrap();
    let orc = state.spawn(orc(6, 1)).unwrap();

    let (outcomes, _) = run_on(&arena(), &mut state, |state, ctx| {
        (step(orc, state, ctx), step(orc, state, ctx))
    });
    assert_eq!(
        outcomes.0.unwrap(),
        StepOutcome::Acted {
            action: Action::Move(Direction::West),
            spent: Tick::whole(4),
        }
    );
    assert_eq!(
        outcomes.1.unwrap(),
        StepOutcome::Waited {
            spent: Tick::whole(2)
        }
    );
    assert_eq!(state.actor(orc).unwrap().position, Position::new(5, 1));
}

#[test]
fn fearful_actor_always_flees_on_sight() {
    let mut state = GameState::new(1);
    state.add_player(player(1, 1)).unwrap();
    let coward = orc(3, 1).with_personality(Personality::default().with_trait("fearful", 100));
    let coward = state.spawn(coward).unwrap();

    let (outcome, _) = run_on(&arena(), &mut state, |state, ctx| {
        step(coward, state, ctx)
    });
    assert!(matches!(
        outcome.unwrap(),
        StepOutcome::Acted {
            action: Action::Move(_),
            ..
        }
    ));
    assert_eq!(ai_of(&state, coward).mode, AiMode::Fleeing);
    let position = state.actor(coward).unwrap().position;
    assert!(position.chebyshev(Position::new(1, 1)) > 2);
}

#[test]
fn confusion_stumbles_then_wears_off() {
    let mut state = GameState::new(1);
    state.add_player(player(1, 1)).unwrap();
    let mut dazed = orc(3, 3);
    if let Some(ai) = dazed.ai.as_mut() {
        ai.confuse(2);
    }
    let dazed = state.spawn(dazed).unwrap();
    let map = arena();

    for _ in 0..2 {
        refill(&mut state, dazed);
        let (outcome, log) = run_on(&map, &mut state, |state, ctx| step(dazed, state, ctx));
        assert_eq!(
            outcome.unwrap(),
            StepOutcome::Waited {
                spent: Tick::whole(6)
            }
        );
        assert!(log.is_empty());
    }
    // South-east once onto open floor, then into the wall.
    assert_eq!(state.actor(dazed).unwrap().position, Position::new(4, 4));
    assert!(matches!(
        ai_of(&state, dazed).mode,
        AiMode::Confused {
            turns_remaining: 0,
            ..
        }
    ));

    refill(&mut state, dazed);
    let (outcome, log) = run_on(&map, &mut state, |state, ctx| step(dazed, state, ctx));
    assert!(outcome.is_ok());
    assert_eq!(log[0], "The Orc is no longer confused.");
    assert_eq!(ai_of(&state, dazed).mode, AiMode::Hostile);
}

#[test]
fn idle_actor_heads_for_a_room() {
    let mut state = GameState::new(1);
    let orc = state.spawn(orc(6, 4)).unwrap();
    let map = arena().with_rooms(vec![Position::new(8, 4)]);

    let (outcome, _) = run_on(&map, &mut state, |state, ctx| step(orc, state, ctx));
    assert_eq!(
        outcome.unwrap(),
        StepOutcome::Acted {
            action: Action::Move(Direction::East),
            spent: Tick::whole(4),
        }
    );
    assert_eq!(ai_of(&state, orc).path, vec![Position::new(8, 4)]);
}

#[test]
fn idle_actor_without_rooms_waits() {
    let mut state = GameState::new(1);
    let orc = state.spawn(orc(6, 4)).unwrap();
    let (outcome, _) = run_on(&arena(), &mut state, |state, ctx| step(orc, state, ctx));
    assert_eq!(
        outcome.unwrap(),
        StepOutcome::Waited {
            spent: Tick::whole(6)
        }
    );
}

#[test]
fn lost_target_is_forgotten_and_flight_ends() {
    let mut state = GameState::new(1);
    // The pillar at (5, 3) hides the player.
    state.add_player(player(4, 3)).unwrap();
    let mut runner = orc(6, 3);
    if let Some(ai) = runner.ai.as_mut() {
        ai.mode = AiMode::Fleeing;
        ai.target = Some(EntityId::PLAYER);
    }
    let runner = state.spawn(runner).unwrap();

    let (outcome, _) = run_on(&arena(), &mut state, |state, ctx| step(runner, state, ctx));
    assert!(outcome.unwrap().ends_segment());
    let ai = ai_of(&state, runner);
    assert_eq!(ai.target, None);
    assert_eq!(ai.mode, AiMode::Hostile);
}

#[test]
fn item_user_picks_up_and_equips_a_weapon() {
    let mut state = GameState::new(1);
    let scavenger = orc(4, 2).with_ai(AiState::hostile().item_user());
    let scavenger = state.spawn(scavenger).unwrap();
    state.place_item(
        Position::new(4, 2),
        Item::new(
            "Sword",
            ItemKind::Weapon(Weapon::new(
                WeaponCategory::Sword,
                Element::Normal,
                DamageDice::new(1, 6, 0),
            )),
        ),
    );

    let (outcomes, _) = run_on(&arena(), &mut state, |state, ctx| {
        (step(scavenger, state, ctx), step(scavenger, state, ctx))
    });
    assert_eq!(
        outcomes.0.unwrap(),
        StepOutcome::Acted {
            action: Action::Pickup,
            spent: Tick::tenths(5),
        }
    );
    assert_eq!(
        outcomes.1.unwrap(),
        StepOutcome::Acted {
            action: Action::Equip { slot: 0 },
            spent: Tick::tenths(5),
        }
    );
    let actor = state.actor(scavenger).unwrap();
    assert_eq!(actor.equipment.weapon.as_ref().unwrap().name, "Sword");
    assert!(state.items.is_empty());
}

fn bolts(quantity: u32) -> Item {
    Item::new(
        "Bolt",
        ItemKind::Ammo(Ammo {
            kind: AmmoKind::Bolt,
            name: "Bolt".into(),
            quantity,
            damage: 4,
            element: Element::Normal,
        }),
    )
}

#[test]
fn item_user_leaves_gear_it_cannot_use() {
    let mut state = GameState::new(1);
    let scavenger = state
        .spawn(orc(4, 2).with_ai(AiState::hostile().item_user()))
        .unwrap();
    let mut dry = gunner(0);
    if let Some(ai) = dry.ai.as_mut() {
        ai.item_user = true;
    }
    let picky_gunner = state.spawn(dry).unwrap();
    state.place_item(Position::new(4, 2), bolts(5));
    state.place_item(
        Position::new(6, 1),
        Item::new("Chainmail", ItemKind::Armor(Armor { defense: 4 })),
    );

    let (outcomes, _) = run_on(&arena(), &mut state, |state, ctx| {
        (step(scavenger, state, ctx), step(picky_gunner, state, ctx))
    });
    for outcome in [outcomes.0.unwrap(), outcomes.1.unwrap()] {
        assert_ne!(
            outcome,
            StepOutcome::Acted {
                action: Action::Pickup,
                spent: Tick::tenths(5),
            }
        );
    }
    assert!(state.actor(scavenger).unwrap().inventory.is_empty());
    assert_eq!(state.items.len(), 2);
}

#[test]
fn dry_gunner_picks_up_matching_rounds() {
    let mut state = GameState::new(1);
    let mut dry = gunner(0);
    if let Some(ai) = dry.ai.as_mut() {
        ai.item_user = true;
    }
    let shooter = state.spawn(dry).unwrap();
    state.place_item(
        Position::new(6, 1),
        Item::new(
            "Bullet",
            ItemKind::Ammo(Ammo {
                kind: AmmoKind::Bullet,
                name: "Bullet".into(),
                quantity: 4,
                damage: 1,
                element: Element::Normal,
            }),
        ),
    );

    let (outcome, _) = run_on(&arena(), &mut state, |state, ctx| step(shooter, state, ctx));
    assert_eq!(
        outcome.unwrap(),
        StepOutcome::Acted {
            action: Action::Pickup,
            spent: Tick::tenths(5),
        }
    );
}

fn gunner(rounds: u32) -> ActorState {
    let mut gun = Weapon::new(WeaponCategory::Gun, Element::Normal, DamageDice::fixed(3))
        .with_range(8)
        .with_capacity(6);
    gun.loaded = (rounds > 0).then(|| Ammo {
        kind: AmmoKind::Bullet,
        name: "Bullet".into(),
        quantity: rounds,
        damage: 1,
        element: Element::Normal,
    });
    let mut actor = orc(6, 1);
    actor.equipment.weapon = Some(Item::new("Pistol", ItemKind::Weapon(gun)));
    actor
}

#[test]
fn loaded_gunner_shoots_from_range() {
    let mut state = GameState::new(1);
    state.add_player(player(1, 1)).unwrap();
    let shooter = state.spawn(gunner(2)).unwrap();

    let (outcome, _) = run_on(&arena(), &mut state, |state, ctx| step(shooter, state, ctx));
    assert_eq!(
        outcome.unwrap(),
        StepOutcome::Acted {
            action: Action::Ranged(Position::new(1, 1)),
            spent: Tick::whole(3),
        }
    );
    assert_eq!(state.player().unwrap().stats.hp(), 10);
}

#[test]
fn dry_gunner_puts_the_gun_away_when_adjacent() {
    let mut state = GameState::new(1);
    state.add_player(player(5, 1)).unwrap();
    let shooter = state.spawn(gunner(0)).unwrap();

    let (outcome, _) = run_on(&arena(), &mut state, |state, ctx| step(shooter, state, ctx));
    assert_eq!(
        outcome.unwrap(),
        StepOutcome::Acted {
            action: Action::Unequip(EquipSlot::Weapon),
            spent: Tick::tenths(5),
        }
    );
    let actor = state.actor(shooter).unwrap();
    assert!(actor.equipment.weapon.is_none());
    assert_eq!(actor.inventory.len(), 1);
}

#[test]
fn dead_and_mindless_actors_are_idle() {
    let mut state = GameState::new(1);
    state.add_player(player(1, 1)).unwrap();
    let orc = state.spawn(orc(3, 3)).unwrap();
    state.actor_mut(orc).unwrap().die();

    let (outcomes, _) = run_on(&arena(), &mut state, |state, ctx| {
        (
            step(orc, state, ctx),
            step(EntityId::PLAYER, state, ctx),
            step(EntityId(77), state, ctx),
        )
    });
    assert_eq!(outcomes.0.unwrap(), StepOutcome::Idle);
    assert_eq!(outcomes.1.unwrap(), StepOutcome::Idle);
    assert_eq!(outcomes.2, Err(TurnError::UnknownActor(EntityId(77))));
}

#[test]
fn logic_errors_escape_instead_of_becoming_waits() {
    let mut state = GameState::new(1);
    state.add_player(player(1, 1)).unwrap();
    let orc = state.spawn(orc(3, 3)).unwrap();
    let budget = state.actor(orc).unwrap().stats.time.current();

    let (outcomes, _) = run_on(&arena(), &mut state, |state, ctx| {
        (
            recover(orc, ActionError::UnknownActor(EntityId(42)), state, ctx),
            recover(
                orc,
                SkillError::NotReady {
                    skill: "Firebolt".into(),
                }
                .into(),
                state,
                ctx,
            ),
        )
    });
    for outcome in [outcomes.0, outcomes.1] {
        let error = outcome.unwrap_err();
        assert_eq!(error.severity(), ErrorSeverity::Internal);
        let context = error.context().unwrap();
        assert_eq!(context.actor, Some(orc));
        assert_eq!(context.position, Some(Position::new(3, 3)));
    }
    assert_eq!(state.actor(orc).unwrap().stats.time.current(), budget);

    let (waited, _) = run_on(&arena(), &mut state, |state, ctx| {
        recover(orc, Impossible::Blocked.into(), state, ctx)
    });
    assert!(matches!(waited.unwrap(), StepOutcome::Waited { .. }));
    assert_eq!(state.actor(orc).unwrap().stats.time.current(), Tick::ZERO);
}
