//! # Entity Module
//!
//! Unit records for the player and the enemy roster.

use crate::{Position, TileType};
use serde::{Deserialize, Serialize};

/// Identifies a unit in events and log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitId {
    Player,
    Enemy(u32),
}

impl UnitId {
    /// The tile marker a unit with this id leaves on the grid.
    pub fn marker(self) -> TileType {
        match self {
            UnitId::Player => TileType::Player,
            UnitId::Enemy(_) => TileType::Enemy,
        }
    }
}

impl std::fmt::Display for UnitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnitId::Player => write!(f, "player"),
            UnitId::Enemy(id) => write!(f, "enemy #{}", id),
        }
    }
}

/// Starting stats for a kind of unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitStats {
    /// Health a freshly spawned unit starts with
    pub max_hp: i32,
    /// Damage dealt per hit
    pub attack_power: i32,
}

impl UnitStats {
    pub fn new(max_hp: i32, attack_power: i32) -> Self {
        Self {
            max_hp,
            attack_power,
        }
    }

    /// Default player stats.
    pub fn player() -> Self {
        Self::new(
            crate::config::PLAYER_MAX_HP,
            crate::config::PLAYER_ATTACK_POWER,
        )
    }

    /// Default enemy stats.
    pub fn enemy() -> Self {
        Self::new(
            crate::config::ENEMIES_MAX_HP,
            crate::config::ENEMIES_INITIAL_ATTACK_POWER,
        )
    }
}

/// A unit on the grid: the player or one enemy.
///
/// # Examples
///
/// ```
/// use warren::{Position, TileType, Unit, UnitStats};
///
/// let mut enemy = Unit::enemy(3, UnitStats::new(30, 5), Position::new(2, 2));
/// assert_eq!(enemy.marker(), TileType::Enemy);
///
/// enemy.take_damage(30);
/// assert!(enemy.is_dead());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub hp: i32,
    pub attack_power: i32,
    pub position: Position,
}

impl Unit {
    /// Creates a player record at `position`.
    pub fn player(stats: UnitStats, position: Position) -> Self {
        Self {
            id: UnitId::Player,
            hp: stats.max_hp,
            attack_power: stats.attack_power,
            position,
        }
    }

    /// Creates an enemy record at `position`.
    pub fn enemy(id: u32, stats: UnitStats, position: Position) -> Self {
        Self {
            id: UnitId::Enemy(id),
            hp: stats.max_hp,
            attack_power: stats.attack_power,
            position,
        }
    }

    /// The tile type this unit paints onto the grid.
    pub fn marker(&self) -> TileType {
        self.id.marker()
    }

    pub fn is_dead(&self) -> bool {
        self.hp <= 0
    }

    /// Subtracts `damage` from hp. Hp may go negative.
    pub fn take_damage(&mut self, damage: i32) {
        self.hp -= damage;
    }
}
