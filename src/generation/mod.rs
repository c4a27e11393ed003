//! # Generation Module
//!
//! Procedural content generation for the dungeon: rooms, passages, item
//! markers and unit placement.
//!
//! All generators draw from a [`RandomSource`] handed in by the caller, so a
//! seeded RNG reproduces the same dungeon every time.

pub mod dungeon;
pub mod encounters;
pub mod items;

pub use dungeon::*;
pub use encounters::*;
pub use items::*;

use crate::game::{Position, UnitStats};
use crate::{WarrenError, WarrenResult};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Inclusive uniform integer source used by every generation and combat draw.
///
/// Implemented for every [`rand::RngCore`], so `StdRng`, `SmallRng` and the
/// mock RNGs all plug in directly.
pub trait RandomSource {
    /// Returns an integer in `min..=max`.
    ///
    /// # Panics
    ///
    /// Panics if `min > max`. Configurations are validated up front so
    /// generation never asks for an empty range.
    fn uniform_int(&mut self, min: i32, max: i32) -> i32;
}

impl<R: RngCore> RandomSource for R {
    fn uniform_int(&mut self, min: i32, max: i32) -> i32 {
        rand::Rng::gen_range(self, min..=max)
    }
}

/// Room count and size ranges.
///
/// Sizes are spans: a room drawn with size `s` covers `s + 1` tiles along
/// that axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomConfig {
    /// Minimum number of rooms per dungeon
    pub min_count: u32,
    /// Maximum number of rooms per dungeon
    pub max_count: u32,
    /// Minimum room span
    pub min_size: u32,
    /// Maximum room span
    pub max_size: u32,
}

impl RoomConfig {
    pub fn new(min_count: u32, max_count: u32, min_size: u32, max_size: u32) -> Self {
        Self {
            min_count,
            max_count,
            min_size,
            max_size,
        }
    }

    /// Checks that every draw this config implies has a non-empty range on a
    /// `width` x `height` grid.
    pub fn validate(&self, width: u32, height: u32) -> WarrenResult<()> {
        if self.min_count > self.max_count {
            return Err(WarrenError::InvalidConfiguration(format!(
                "room count range {}..={} is empty",
                self.min_count, self.max_count
            )));
        }
        if self.min_size > self.max_size {
            return Err(WarrenError::InvalidConfiguration(format!(
                "room size range {}..={} is empty",
                self.min_size, self.max_size
            )));
        }
        if self.max_count > i32::MAX as u32 {
            return Err(WarrenError::InvalidConfiguration(format!(
                "room count {} is too large",
                self.max_count
            )));
        }
        // x0 is drawn from 0..=width-1-size, so the largest room must leave room for it.
        if width == 0 || height == 0 || self.max_size > width - 1 || self.max_size > height - 1 {
            return Err(WarrenError::InvalidConfiguration(format!(
                "room size up to {} does not fit a {}x{} grid",
                self.max_size, width, height
            )));
        }
        Ok(())
    }
}

impl Default for RoomConfig {
    fn default() -> Self {
        use crate::config::*;
        Self::new(
            DEFAULT_MIN_ROOMS,
            DEFAULT_MAX_ROOMS,
            DEFAULT_MIN_ROOM_SIZE,
            DEFAULT_MAX_ROOM_SIZE,
        )
    }
}

/// How many of each cosmetic item marker to place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemConfig {
    pub sword_count: u32,
    pub potion_count: u32,
}

impl ItemConfig {
    pub fn new(sword_count: u32, potion_count: u32) -> Self {
        Self {
            sword_count,
            potion_count,
        }
    }
}

impl Default for ItemConfig {
    fn default() -> Self {
        Self::new(
            crate::config::DEFAULT_SWORD_COUNT,
            crate::config::DEFAULT_POTION_COUNT,
        )
    }
}

/// Configuration for a whole session.
///
/// Controls the grid size, room layout, item and enemy counts, and the stats
/// units spawn with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Grid width in tiles
    pub width: u32,
    /// Grid height in tiles
    pub height: u32,
    /// Room count and size ranges
    pub rooms: RoomConfig,
    /// Item marker counts
    pub items: ItemConfig,
    /// Number of enemies to spawn
    pub enemy_count: u32,
    /// Player starting stats
    pub player: UnitStats,
    /// Enemy starting stats
    pub enemy: UnitStats,
}

impl GenerationConfig {
    /// Creates the default configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use warren::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(12345);
    /// assert_eq!(config.width, 40);
    /// assert!(config.rooms.max_size >= config.rooms.min_size);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new(seed: u64) -> Self {
        use crate::config::*;
        Self {
            seed,
            width: DEFAULT_DUNGEON_WIDTH,
            height: DEFAULT_DUNGEON_HEIGHT,
            rooms: RoomConfig::default(),
            items: ItemConfig::default(),
            enemy_count: DEFAULT_ENEMY_COUNT,
            player: UnitStats::player(),
            enemy: UnitStats::enemy(),
        }
    }

    /// Creates a configuration for testing with smaller, simpler dungeons.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            seed,
            width: 20,
            height: 12,
            rooms: RoomConfig::new(2, 4, 1, 4),
            items: ItemConfig::new(1, 3),
            enemy_count: 3,
            player: UnitStats::player(),
            enemy: UnitStats::enemy(),
        }
    }

    /// Validates the configuration before anything is generated.
    pub fn validate(&self) -> WarrenResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(WarrenError::InvalidConfiguration(format!(
                "grid must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width > i32::MAX as u32 || self.height > i32::MAX as u32 {
            return Err(WarrenError::InvalidConfiguration(format!(
                "grid {}x{} exceeds the coordinate range",
                self.width, self.height
            )));
        }
        self.rooms.validate(self.width, self.height)?;

        // Placements sample with replacement, so more than one per cell only stacks markers.
        let cells = self.width as u64 * self.height as u64;
        for (label, count) in [
            ("enemy", self.enemy_count),
            ("sword", self.items.sword_count),
            ("potion", self.items.potion_count),
        ] {
            if count as u64 > cells {
                return Err(WarrenError::InvalidConfiguration(format!(
                    "{} count {} exceeds the {} cells of a {}x{} grid",
                    label, count, cells, self.width, self.height
                )));
            }
        }

        for (label, stats) in [("player", self.player), ("enemy", self.enemy)] {
            if stats.max_hp <= 0 {
                return Err(WarrenError::InvalidConfiguration(format!(
                    "{} max hp must be positive, got {}",
                    label, stats.max_hp
                )));
            }
            if stats.attack_power < 0 {
                return Err(WarrenError::InvalidConfiguration(format!(
                    "{} attack power must not be negative, got {}",
                    label, stats.attack_power
                )));
            }
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// An axis-aligned room with inclusive corners.
///
/// # Examples
///
/// ```
/// use warren::{Position, Room};
///
/// let room = Room::new(1, 1, 3, 3);
/// assert_eq!(room.width(), 3);
/// assert!(room.contains(Position::new(2, 2)));
/// assert!(!room.contains(Position::new(4, 2)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Room {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl Room {
    /// Creates a room from its inclusive corners.
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn top_left(&self) -> Position {
        Position::new(self.x0, self.y0)
    }

    pub fn bottom_right(&self) -> Position {
        Position::new(self.x1, self.y1)
    }

    /// Width in tiles.
    pub fn width(&self) -> u32 {
        (self.x1 - self.x0 + 1) as u32
    }

    /// Height in tiles.
    pub fn height(&self) -> u32 {
        (self.y1 - self.y0 + 1) as u32
    }

    /// Checks if a position is inside this room.
    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.x0 && pos.x <= self.x1 && pos.y >= self.y0 && pos.y <= self.y1
    }

    /// Whether the corners are ordered and lie inside a `width` x `height` grid.
    pub fn fits(&self, width: u32, height: u32) -> bool {
        self.x0 >= 0
            && self.y0 >= 0
            && self.x0 <= self.x1
            && self.y0 <= self.y1
            && (self.x1 as i64) < width as i64
            && (self.y1 as i64) < height as i64
    }
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;
    use crate::game::{Grid, Tile, TileType};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Creates a seeded random number generator from the config.
    pub fn create_rng(config: &GenerationConfig) -> StdRng {
        StdRng::seed_from_u64(config.seed)
    }

    /// Snapshots the ground tiles, failing if `needed` draws would have to
    /// sample from an empty set.
    pub fn ground_snapshot(grid: &Grid, needed: u32, what: &str) -> WarrenResult<Vec<Tile>> {
        let ground = grid.tiles_of_type(TileType::Ground);
        if ground.is_empty() && needed > 0 {
            return Err(WarrenError::GenerationFailed(format!(
                "no ground tiles left to place {}",
                what
            )));
        }
        Ok(ground)
    }

    /// Picks one tile from a non-empty snapshot, with replacement.
    pub fn sample_position<R: RandomSource>(snapshot: &[Tile], rng: &mut R) -> Position {
        let index = rng.uniform_int(0, snapshot.len() as i32 - 1);
        snapshot[index as usize].position
    }

    /// Validates that a carved dungeon meets basic requirements.
    pub fn validate_dungeon(grid: &Grid, rooms: &[Room]) -> WarrenResult<()> {
        if grid.count_of(TileType::Ground) == 0 {
            return Err(WarrenError::GenerationFailed(
                "Dungeon has no ground tiles".to_string(),
            ));
        }

        if let Some(room) = rooms
            .iter()
            .find(|room| !room.fits(grid.width(), grid.height()))
        {
            return Err(WarrenError::GenerationFailed(format!(
                "room {:?} lies outside the {}x{} grid",
                room,
                grid.width(),
                grid.height()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Grid, TileType};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generation_config_creation() {
        let config = GenerationConfig::new(12345);
        assert_eq!(config.seed, 12345);
        assert_eq!(config.height, 24);
        assert!(config.rooms.min_count <= config.rooms.max_count);
        assert!(config.rooms.min_size <= config.rooms.max_size);
        assert!(config.validate().is_ok());
        assert!(GenerationConfig::for_testing(1).validate().is_ok());
    }

    #[test]
    fn test_invalid_configurations() {
        let mut config = GenerationConfig::for_testing(1);
        config.rooms.min_size = 5;
        config.rooms.max_size = 3;
        assert!(matches!(
            config.validate(),
            Err(WarrenError::InvalidConfiguration(_))
        ));

        let mut config = GenerationConfig::for_testing(1);
        config.rooms.min_count = 6;
        config.rooms.max_count = 2;
        assert!(config.validate().is_err());

        let mut config = GenerationConfig::for_testing(1);
        config.rooms.max_size = config.height;
        assert!(config.validate().is_err());

        let mut config = GenerationConfig::for_testing(1);
        config.width = 0;
        assert!(config.validate().is_err());

        let mut config = GenerationConfig::for_testing(1);
        config.enemy.max_hp = 0;
        assert!(config.validate().is_err());

        let mut config = GenerationConfig::for_testing(1);
        config.player.attack_power = -1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_placement_counts_are_bounded_by_the_grid() {
        let mut config = GenerationConfig::new(1);
        config.enemy_count = 4_000_000_000;
        assert!(matches!(
            config.validate(),
            Err(WarrenError::InvalidConfiguration(_))
        ));

        let mut config = GenerationConfig::for_testing(1);
        config.items.potion_count = config.width * config.height + 1;
        assert!(config.validate().is_err());

        let mut config = GenerationConfig::for_testing(1);
        config.items.sword_count = config.width * config.height;
        config.enemy_count = config.width * config.height;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_largest_room_that_fits() {
        let config = RoomConfig::new(1, 1, 0, 4);
        assert!(config.validate(5, 5).is_ok());
        assert!(config.validate(4, 5).is_err());
    }

    #[test]
    fn test_room_geometry() {
        let room = Room::new(5, 5, 14, 12);
        assert_eq!(room.top_left(), Position::new(5, 5));
        assert_eq!(room.bottom_right(), Position::new(14, 12));
        assert_eq!(room.width(), 10);
        assert_eq!(room.height(), 8);

        assert!(room.contains(Position::new(5, 5)));
        assert!(room.contains(Position::new(14, 12)));
        assert!(!room.contains(Position::new(4, 5)));
        assert!(!room.contains(Position::new(15, 12)));
    }

    #[test]
    fn test_single_tile_room() {
        let room = Room::new(3, 3, 3, 3);
        assert_eq!((room.width(), room.height()), (1, 1));
        assert!(room.fits(4, 4));
        assert!(!room.fits(3, 4));
    }

    #[test]
    fn test_uniform_int_is_inclusive() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut seen_min = false;
        let mut seen_max = false;
        for _ in 0..500 {
            let value = rng.uniform_int(2, 4);
            assert!((2..=4).contains(&value));
            seen_min |= value == 2;
            seen_max |= value == 4;
        }
        assert!(seen_min && seen_max);
        assert_eq!(rng.uniform_int(7, 7), 7);
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let config = GenerationConfig::new(12345);
        let mut a = utils::create_rng(&config);
        let mut b = utils::create_rng(&config);
        let draws_a: Vec<i32> = (0..10).map(|_| a.uniform_int(0, 100)).collect();
        let draws_b: Vec<i32> = (0..10).map(|_| b.uniform_int(0, 100)).collect();
        assert_eq!(draws_a, draws_b);
    }

    #[test]
    fn test_ground_snapshot_requires_ground() {
        let grid = Grid::new(3, 3);
        assert!(utils::ground_snapshot(&grid, 0, "nothing").unwrap().is_empty());
        assert!(matches!(
            utils::ground_snapshot(&grid, 1, "a sword"),
            Err(WarrenError::GenerationFailed(_))
        ));
    }

    #[test]
    fn test_validate_dungeon() {
        let mut grid = Grid::new(10, 10);
        assert!(utils::validate_dungeon(&grid, &[]).is_err());

        grid.set_tile_type(Position::new(5, 5), TileType::Ground).unwrap();
        assert!(utils::validate_dungeon(&grid, &[Room::new(5, 5, 5, 5)]).is_ok());
        assert!(utils::validate_dungeon(&grid, &[Room::new(5, 5, 10, 5)]).is_err());
    }
}
