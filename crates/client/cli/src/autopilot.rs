//! Player autopilot for the demo.
//!
//! Heads for the nearest living enemy along the influence map and bumps into
//! it once adjacent. Drinks the healing draught when badly hurt.
use delve_core::env::MapOracle;
use delve_core::path::approach_path;
use delve_core::state::{ActorState, GameState};
use delve_core::stats::PoolKind;
use delve_core::{Action, Direction, GameConfig};

/// Actions the player queues for the coming round.
pub fn plan(state: &GameState, map: &dyn MapOracle, config: &GameConfig) -> Vec<Action> {
    let Some(player) = state.player() else {
        return Vec::new();
    };

    if let Some(slot) = healing_slot(player) {
        return vec![Action::UseItem { slot, target: None }];
    }

    let enemies: Vec<_> = state
        .actors
        .iter()
        .filter(|actor| actor.is_alive() && actor.is_hostile_to(player))
        .map(|actor| actor.position)
        .collect();
    if enemies.is_empty() {
        return vec![Action::Wait];
    }

    if let Some(&adjacent) = enemies
        .iter()
        .find(|&&enemy| player.position.chebyshev(enemy) == 1)
        && let Some(direction) = Direction::toward(player.position, adjacent)
    {
        return vec![Action::Bump(direction)];
    }

    let path = approach_path(map, state, config.blocking_penalty, player.position, &enemies);
    match path
        .first()
        .and_then(|&next| Direction::toward(player.position, next))
    {
        Some(direction) => vec![Action::Bump(direction)],
        None => vec![Action::Wait],
    }
}

/// Inventory slot of a healing item when hp is under a third.
fn healing_slot(player: &ActorState) -> Option<usize> {
    let maximum = player.stats.max_for(PoolKind::Hp);
    if player.stats.hp() * 3 >= maximum {
        return None;
    }
    player
        .inventory
        .items()
        .iter()
        .position(|item| item.name.contains("Healing"))
}
