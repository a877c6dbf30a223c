use std::collections::HashSet;

use super::OracleError;
use crate::state::Position;

/// Static map oracle exposing immutable layout information.
pub trait MapOracle {
    fn dimensions(&self) -> MapDimensions;
    fn tile(&self, position: Position) -> Option<StaticTile>;

    /// Centres of the rooms the level was generated from. Idle agents wander
    /// toward one of these.
    fn room_centers(&self) -> &[Position] {
        &[]
    }

    fn contains(&self, position: Position) -> bool {
        self.dimensions().contains(position)
    }

    fn is_walkable(&self, position: Position) -> bool {
        self.tile(position).is_some_and(StaticTile::is_passable)
    }

    fn is_transparent(&self, position: Position) -> bool {
        self.tile(position).is_some_and(StaticTile::is_transparent)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapDimensions {
    pub width: u32,
    pub height: u32,
}

impl MapDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }

    /// Row-major index of an in-bounds position.
    pub fn index(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| position.y as usize * self.width as usize + position.x as usize)
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn position(&self, index: usize) -> Position {
        let width = self.width as usize;
        Position::new((index % width) as i32, (index / width) as i32)
    }
}

/// Immutable descriptor for a tile in the static layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StaticTile {
    terrain: TerrainKind,
}

impl StaticTile {
    pub const fn new(terrain: TerrainKind) -> Self {
        Self { terrain }
    }

    pub fn terrain(self) -> TerrainKind {
        self.terrain
    }

    pub fn is_passable(self) -> bool {
        self.terrain.is_passable()
    }

    pub fn is_transparent(self) -> bool {
        self.terrain.is_transparent()
    }
}

/// Canonical terrain classes for static map tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TerrainKind {
    Floor,
    Wall,
    Void,
    Water,
}

impl TerrainKind {
    pub fn is_passable(self) -> bool {
        matches!(self, TerrainKind::Floor)
    }

    pub fn is_transparent(self) -> bool {
        matches!(self, TerrainKind::Floor | TerrainKind::Water)
    }

    fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            '.' => Some(TerrainKind::Floor),
            '#' => Some(TerrainKind::Wall),
            '~' => Some(TerrainKind::Water),
            ' ' => Some(TerrainKind::Void),
            _ => None,
        }
    }
}

/// Dense grid implementation of [`MapOracle`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridMap {
    dimensions: MapDimensions,
    tiles: Vec<TerrainKind>,
    rooms: Vec<Position>,
}

impl GridMap {
    /// A map of the given size filled with one terrain kind.
    pub fn filled(width: u32, height: u32, terrain: TerrainKind) -> Self {
        let dimensions = MapDimensions::new(width, height);
        Self {
            dimensions,
            tiles: vec![terrain; dimensions.area()],
            rooms: Vec::new(),
        }
    }

    /// Parses rows of glyphs: `.` floor, `#` wall, `~` water, space void.
    pub fn parse(rows: &[&str]) -> Result<Self, OracleError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.chars().count());
        if width == 0 {
            return Err(OracleError::EmptyLayout);
        }

        let mut tiles = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(OracleError::RaggedRow { row: y });
            }
            for (x, glyph) in row.chars().enumerate() {
                let terrain = TerrainKind::from_glyph(glyph).ok_or(OracleError::UnknownGlyph {
                    glyph,
                    position: Position::new(x as i32, y as i32),
                })?;
                tiles.push(terrain);
            }
        }

        Ok(Self {
            dimensions: MapDimensions::new(width as u32, height as u32),
            tiles,
            rooms: Vec::new(),
        })
    }

    pub fn with_rooms(mut self, rooms: Vec<Position>) -> Self {
        self.rooms = rooms;
        self
    }

    pub fn set(&mut self, position: Position, terrain: TerrainKind) -> Result<(), OracleError> {
        let index = self
            .dimensions
            .index(position)
            .ok_or(OracleError::PositionOutOfBounds(position))?;
        self.tiles[index] = terrain;
        Ok(())
    }
}

impl MapOracle for GridMap {
    fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn tile(&self, position: Position) -> Option<StaticTile> {
        self.dimensions
            .index(position)
            .map(|index| StaticTile::new(self.tiles[index]))
    }

    fn room_centers(&self) -> &[Position] {
        &self.rooms
    }
}

/// Bresenham line from `from` to `to`, both endpoints included.
pub fn line(from: Position, to: Position) -> Vec<Position> {
    let dx = (to.x - from.x).abs();
    let dy = -(to.y - from.y).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (from.x, from.y);
    let mut points = Vec::with_capacity((dx - dy) as usize + 1);

    loop {
        points.push(Position::new(x, y));
        if x == to.x && y == to.y {
            break;
        }
        let doubled = 2 * err;
        if doubled >= dy {
            err += dy;
            x += sx;
        }
        if doubled <= dx {
            err += dx;
            y += sy;
        }
    }
    points
}

/// True when every tile strictly between the endpoints is transparent.
pub fn has_line_of_sight(map: &dyn MapOracle, from: Position, to: Position) -> bool {
    let points = line(from, to);
    let interior = points.len().saturating_sub(1);
    points
        .iter()
        .take(interior)
        .skip(1)
        .all(|point| map.is_transparent(*point))
}

/// Whether `target` lies within `radius` of `origin` with a clear line.
pub fn is_visible(map: &dyn MapOracle, origin: Position, target: Position, radius: u32) -> bool {
    origin.euclidean(target) <= radius as f32 + 0.5 && has_line_of_sight(map, origin, target)
}

/// Set of tiles visible from a point.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldOfView {
    visible: HashSet<Position>,
}

impl FieldOfView {
    pub fn contains(&self, position: Position) -> bool {
        self.visible.contains(&position)
    }

    pub fn len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Position> {
        self.visible.iter()
    }
}

/// Computes the tiles within `radius` of `origin` that have line of sight.
pub fn field_of_view(map: &dyn MapOracle, origin: Position, radius: u32) -> FieldOfView {
    let mut visible = HashSet::new();
    if !map.contains(origin) {
        return FieldOfView { visible };
    }

    let reach = radius as i32;
    for y in (origin.y - reach)..=(origin.y + reach) {
        for x in (origin.x - reach)..=(origin.x + reach) {
            let target = Position::new(x, y);
            if map.contains(target) && is_visible(map, origin, target, radius) {
                visible.insert(target);
            }
        }
    }
    FieldOfView { visible }
}
