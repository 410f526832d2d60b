//! # Game Module
//!
//! Core world representation and the discrete-event game facade.
//!
//! This module contains the fundamental building blocks of the crawler:
//! - Tile, room and room-graph representation
//! - Game state driven by discrete host events
//! - Queued auto-walking along computed paths

pub mod autowalk;
pub mod state;
pub mod world;

pub use autowalk::*;
pub use state::*;
pub use world::*;

use serde::{Deserialize, Serialize};

/// Represents a 2D integer coordinate.
///
/// The same type addresses tiles inside a room grid and rooms on the
/// dungeon lattice; the two spaces never mix.
///
/// # Examples
///
/// ```
/// use dungeon_crawler::Position;
///
/// let pos = Position::new(10, 5);
/// assert_eq!(pos.x, 10);
/// assert_eq!(pos.y, 5);
///
/// let adjacent = pos.cardinal_adjacent_positions();
/// assert_eq!(adjacent.len(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the origin position (0, 0).
    pub fn origin() -> Self {
        Self::new(0, 0)
    }

    /// Calculates the Manhattan distance to another position.
    ///
    /// # Examples
    ///
    /// ```
    /// use dungeon_crawler::Position;
    ///
    /// let pos1 = Position::new(0, 0);
    /// let pos2 = Position::new(3, 4);
    /// assert_eq!(pos1.manhattan_distance(pos2), 7);
    /// ```
    pub fn manhattan_distance(self, other: Position) -> u32 {
        ((self.x - other.x).abs() + (self.y - other.y).abs()) as u32
    }

    /// Returns the 4 cardinal adjacent positions in up, down, left, right order.
    pub fn cardinal_adjacent_positions(self) -> [Position; 4] {
        [
            self + Direction::North.to_delta(),
            self + Direction::South.to_delta(),
            self + Direction::West.to_delta(),
            self + Direction::East.to_delta(),
        ]
    }

    /// Returns the neighbouring position one step in `direction`.
    pub fn step(self, direction: Direction) -> Position {
        self + direction.to_delta()
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Position {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Orthogonal directions for movement and lattice adjacency.
///
/// North is negative y both inside a room and on the lattice, so a room's
/// top edge (row 0) faces its northern neighbour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Converts a direction to a position delta.
    ///
    /// # Examples
    ///
    /// ```
    /// use dungeon_crawler::{Direction, Position};
    ///
    /// let delta = Direction::North.to_delta();
    /// assert_eq!(delta, Position::new(0, -1));
    /// ```
    pub fn to_delta(self) -> Position {
        match self {
            Direction::North => Position::new(0, -1),
            Direction::South => Position::new(0, 1),
            Direction::East => Position::new(1, 0),
            Direction::West => Position::new(-1, 0),
        }
    }

    /// Converts a position delta to a direction.
    ///
    /// Returns None if the delta isn't a single orthogonal step.
    pub fn from_delta(delta: Position) -> Option<Direction> {
        match (delta.x, delta.y) {
            (0, -1) => Some(Direction::North),
            (0, 1) => Some(Direction::South),
            (1, 0) => Some(Direction::East),
            (-1, 0) => Some(Direction::West),
            _ => None,
        }
    }

    /// Returns the direction pointing the other way.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    /// Returns all 4 directions in lattice scan order: west, east, south, north.
    pub fn all() -> [Direction; 4] {
        [
            Direction::West,
            Direction::East,
            Direction::South,
            Direction::North,
        ]
    }
}
