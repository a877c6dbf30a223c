use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::CostMap;
use crate::env::MapDimensions;
use crate::state::{Direction, Position};

/// Multipliers on the entry cost of a tile: 2 for a cardinal step, 3 for a
/// diagonal one.
const CARDINAL_STEP: i64 = 2;
const DIAGONAL_STEP: i64 = 3;

/// Distance field over a [`CostMap`]. `None` marks unreachable tiles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InfluenceMap {
    dimensions: MapDimensions,
    distances: Vec<Option<i64>>,
}

impl InfluenceMap {
    /// Field whose values grow with the travel cost to the nearest goal.
    pub fn approach(costs: &CostMap, goals: &[Position]) -> Self {
        let dimensions = costs.dimensions();
        let mut distances = vec![None; dimensions.area()];
        for goal in goals {
            if let Some(index) = dimensions.index(*goal) {
                distances[index] = Some(0);
            }
        }
        relax(costs, &mut distances);
        Self {
            dimensions,
            distances,
        }
    }

    /// Field that rewards distance from the goals.
    ///
    /// The approach field is scaled by `-scale` and relaxed again, so
    /// descending it leads away from the goals while still preferring open
    /// ground over dead ends. An agent boxed into a corner beside a goal may
    /// have to slip past it to reach open ground.
    pub fn flee(costs: &CostMap, goals: &[Position], scale: f32) -> Self {
        let mut field = Self::approach(costs, goals);
        for distance in field.distances.iter_mut().flatten() {
            *distance = (*distance as f64 * -(scale as f64)) as i64;
        }
        relax(costs, &mut field.distances);
        field
    }

    pub fn distance(&self, position: Position) -> Option<i64> {
        self.dimensions
            .index(position)
            .and_then(|index| self.distances[index])
    }

    /// Greedy walk to ever lower neighbours.
    ///
    /// Neighbours are tried in [`Direction::ALL`] order and the first lowest
    /// wins. The start tile is excluded; the walk ends at a local minimum.
    pub fn descend(&self, from: Position) -> Vec<Position> {
        let mut path = Vec::new();
        let Some(mut value) = self.distance(from) else {
            return path;
        };
        let mut current = from;

        loop {
            let next = Direction::ALL
                .iter()
                .map(|direction| current.step(*direction))
                .filter_map(|position| self.distance(position).map(|d| (position, d)))
                .filter(|(_, distance)| *distance < value)
                .min_by_key(|(_, distance)| *distance);

            match next {
                Some((position, distance)) => {
                    path.push(position);
                    current = position;
                    value = distance;
                }
                None => return path,
            }
        }
    }
}

/// Dijkstra relaxation seeded with every known distance.
fn relax(costs: &CostMap, distances: &mut [Option<i64>]) {
    let dimensions = costs.dimensions();
    let mut frontier: BinaryHeap<Reverse<(i64, usize)>> = distances
        .iter()
        .enumerate()
        .filter_map(|(index, distance)| distance.map(|d| Reverse((d, index))))
        .collect();

    while let Some(Reverse((distance, index))) = frontier.pop() {
        if distances[index].is_some_and(|known| known < distance) {
            continue;
        }
        let position = dimensions.position(index);

        for direction in Direction::ALL {
            let neighbour = position.step(direction);
            let Some(cost) = costs.cost(neighbour) else {
                continue;
            };
            let Some(slot) = dimensions.index(neighbour) else {
                continue;
            };
            let step = if direction.is_diagonal() {
                DIAGONAL_STEP
            } else {
                CARDINAL_STEP
            };
            let candidate = distance + step * i64::from(cost);
            if distances[slot].is_none_or(|known| candidate < known) {
                distances[slot] = Some(candidate);
                frontier.push(Reverse((candidate, slot)));
            }
        }
    }
}
