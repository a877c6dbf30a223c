use std::fmt;

/// Unique identifier for any actor or item tracked in the state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl EntityId {
    /// Reserved identifier for the controllable player character.
    pub const PLAYER: Self = Self(0);

    /// Returns true if this entity represents the player.
    #[inline]
    pub const fn is_player(self) -> bool {
        self.0 == Self::PLAYER.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::PLAYER
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Discrete grid position expressed in tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// King-move distance; adjacency is `chebyshev(other) <= 1`.
    pub fn chebyshev(self, other: Position) -> u32 {
        (self.x - other.x)
            .unsigned_abs()
            .max((self.y - other.y).unsigned_abs())
    }

    /// Straight-line distance, used for area radii.
    pub fn euclidean(self, other: Position) -> f32 {
        let dx = (self.x - other.x) as f32;
        let dy = (self.y - other.y) as f32;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.offset(dx, dy)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the eight king-move directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// Fixed neighbour order. Descent and random walks iterate in this order.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, -1),
        }
    }

    pub const fn is_diagonal(self) -> bool {
        let (dx, dy) = self.delta();
        dx != 0 && dy != 0
    }

    /// Direction of a unit step from `from` toward `to`, if they differ.
    pub fn toward(from: Position, to: Position) -> Option<Self> {
        let dx = (to.x - from.x).signum();
        let dy = (to.y - from.y).signum();
        Self::from_delta(dx, dy)
    }

    pub fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|direction| direction.delta() == (dx.signum(), dy.signum()))
    }
}

/// Time budget unit, stored in tenths so fractional action costs stay exact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u32);

impl Tick {
    pub const ZERO: Self = Self(0);

    /// `n` whole time units.
    pub const fn whole(n: u32) -> Self {
        Self(n * 10)
    }

    /// `n` tenths of a time unit.
    pub const fn tenths(n: u32) -> Self {
        Self(n)
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn checked_sub(self, rhs: Tick) -> Option<Tick> {
        self.0.checked_sub(rhs.0).map(Tick)
    }

    pub fn saturating_sub(self, rhs: Tick) -> Tick {
        Tick(self.0.saturating_sub(rhs.0))
    }
}

impl std::ops::Add for Tick {
    type Output = Tick;
    fn add(self, rhs: Tick) -> Tick {
        Tick(self.0 + rhs.0)
    }
}

impl std::ops::Mul<u32> for Tick {
    type Output = Tick;
    fn mul(self, rhs: u32) -> Tick {
        Tick(self.0 * rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

/// Integer resource meter (hp, mp, sp, se) whose current value is always
/// kept inside `[0, maximum]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    current: i32,
    maximum: i32,
}

impl ResourceMeter {
    /// A full meter.
    pub fn full(maximum: i32) -> Self {
        let maximum = maximum.max(0);
        Self {
            current: maximum,
            maximum,
        }
    }

    pub fn new(current: i32, maximum: i32) -> Self {
        let mut meter = Self::full(maximum);
        meter.set(current);
        meter
    }

    #[inline]
    pub fn current(&self) -> i32 {
        self.current
    }

    #[inline]
    pub fn maximum(&self) -> i32 {
        self.maximum
    }

    pub fn set(&mut self, value: i32) {
        self.current = value.clamp(0, self.maximum);
    }

    /// Adds `delta` and returns the change actually applied after clamping.
    pub fn adjust(&mut self, delta: i32) -> i32 {
        let before = self.current;
        self.set(before.saturating_add(delta));
        self.current - before
    }

    /// Changes the maximum, pulling the current value down if needed.
    pub fn set_maximum(&mut self, maximum: i32) {
        self.maximum = maximum.max(0);
        self.current = self.current.min(self.maximum);
    }

    pub fn is_empty(&self) -> bool {
        self.current == 0
    }

    pub fn is_full(&self) -> bool {
        self.current == self.maximum
    }
}
