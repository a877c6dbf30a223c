use crate::env::{MapDimensions, MapOracle};
use crate::state::{GameState, Position};

/// Per-tile entry cost. `None` marks impassable tiles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CostMap {
    dimensions: MapDimensions,
    costs: Vec<Option<u32>>,
}

impl CostMap {
    /// Walkable tiles cost 1; tiles holding a blocking actor add `penalty`.
    ///
    /// A lower penalty makes pursuers queue behind each other in corridors,
    /// a higher one makes them route around to surround the goal.
    pub fn build(map: &dyn MapOracle, state: &GameState, penalty: u32) -> Self {
        let dimensions = map.dimensions();
        let mut costs: Vec<Option<u32>> = (0..dimensions.area())
            .map(|index| map.is_walkable(dimensions.position(index)).then_some(1))
            .collect();

        for actor in state.actors.iter().filter(|actor| actor.blocks_movement) {
            if let Some(index) = dimensions.index(actor.position)
                && let Some(cost) = costs[index].as_mut()
            {
                *cost += penalty;
            }
        }

        Self { dimensions, costs }
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    pub fn cost(&self, position: Position) -> Option<u32> {
        self.dimensions
            .index(position)
            .and_then(|index| self.costs[index])
    }

    pub fn is_passable(&self, position: Position) -> bool {
        self.cost(position).is_some()
    }
}
