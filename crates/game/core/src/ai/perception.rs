use crate::env::{MapOracle, is_visible};
use crate::state::{ActorState, EntityId, GameState, Item, Position};

pub(crate) fn can_see(map: &dyn MapOracle, agent: &ActorState, position: Position) -> bool {
    is_visible(map, agent.position, position, agent.sight_range())
}

/// Living actors hostile to `agent` that it can see, in spawn order.
pub(crate) fn visible_enemies(
    map: &dyn MapOracle,
    agent: &ActorState,
    state: &GameState,
) -> Vec<EntityId> {
    state
        .actors
        .iter()
        .filter(|other| other.id != agent.id && other.is_alive())
        .filter(|other| agent.is_hostile_to(other))
        .filter(|other| can_see(map, agent, other.position))
        .map(|other| other.id)
        .collect()
}

/// Closest visible floor item matching `wanted`.
pub(crate) fn nearest_visible_item(
    map: &dyn MapOracle,
    agent: &ActorState,
    state: &GameState,
    wanted: impl Fn(&Item) -> bool,
) -> Option<Position> {
    state
        .items
        .iter()
        .filter(|ground| wanted(&ground.item))
        .filter(|ground| can_see(map, agent, ground.position))
        .min_by_key(|ground| agent.position.chebyshev(ground.position))
        .map(|ground| ground.position)
}
