//! # Game Module
//!
//! Core game state management, grid representation, and the turn rules.
//!
//! This module contains the fundamental building blocks of a Warren session:
//! - Grid storage and tile types
//! - Unit records for the player and the enemy roster
//! - Single-step movement shared by every unit
//! - Combat resolution and the Won / Lost state machine
//! - Player actions parsed from boundary tokens

pub mod actions;
pub mod combat;
pub mod entities;
pub mod movement;
pub mod state;
pub mod world;

pub use actions::*;
pub use combat::*;
pub use entities::*;
pub use movement::*;
pub use state::*;
pub use world::*;

use serde::{Deserialize, Serialize};

/// Represents a 2D coordinate on the grid.
///
/// # Examples
///
/// ```
/// use warren::Position;
///
/// let pos = Position::new(10, 5);
/// assert_eq!(pos.x, 10);
/// assert_eq!(pos.y, 5);
/// assert_eq!(pos.chebyshev_distance(Position::new(11, 4)), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
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

    /// Calculates the Chebyshev (king-move) distance to another position.
    pub fn chebyshev_distance(self, other: Position) -> u32 {
        (self.x - other.x)
            .unsigned_abs()
            .max((self.y - other.y).unsigned_abs())
    }

    /// Returns the position one step away in `direction`.
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

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Directions a unit can step in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Left,
    Down,
    Right,
}

impl Direction {
    /// All four directions, in the order random enemy moves index into.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Left,
        Direction::Down,
        Direction::Right,
    ];

    /// Converts a direction to a position delta.
    ///
    /// # Examples
    ///
    /// ```
    /// use warren::{Direction, Position};
    ///
    /// assert_eq!(Direction::Up.to_delta(), Position::new(0, -1));
    /// assert_eq!(Direction::Right.to_delta(), Position::new(1, 0));
    /// ```
    pub fn to_delta(self) -> Position {
        match self {
            Direction::Up => Position::new(0, -1),
            Direction::Left => Position::new(-1, 0),
            Direction::Down => Position::new(0, 1),
            Direction::Right => Position::new(1, 0),
        }
    }

    /// Lower-case name used in `move:<direction>` tokens.
    pub fn name(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Left => "left",
            Direction::Down => "down",
            Direction::Right => "right",
        }
    }
}

impl std::str::FromStr for Direction {
    type Err = crate::WarrenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "left" => Ok(Direction::Left),
            "down" => Ok(Direction::Down),
            "right" => Ok(Direction::Right),
            other => Err(crate::WarrenError::InvalidAction(format!(
                "unknown direction '{}'",
                other
            ))),
        }
    }
}
