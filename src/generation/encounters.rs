//! # Unit Spawning
//!
//! Places the player and the enemy roster on ground tiles.

use crate::game::{Grid, Unit, UnitStats};
use crate::generation::utils;
use crate::{RandomSource, WarrenResult};
use log::debug;

/// Units created by a spawn pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnedUnits {
    pub player: Unit,
    pub enemies: Vec<Unit>,
}

/// Spawns units from a single ground snapshot, with replacement.
///
/// Units can land on each other. The tile shows whichever
/// marker was written last, while every unit record keeps its own position.
#[derive(Debug, Clone, Default)]
pub struct UnitSpawner;

impl UnitSpawner {
    pub fn new() -> Self {
        Self
    }

    /// Spawns the player, then `enemy_count` enemies with ids `0..enemy_count`.
    pub fn add_units<R: RandomSource>(
        &self,
        grid: &mut Grid,
        enemy_count: u32,
        player_stats: UnitStats,
        enemy_stats: UnitStats,
        rng: &mut R,
    ) -> WarrenResult<SpawnedUnits> {
        let ground = utils::ground_snapshot(grid, 1, "the player")?;

        let player = Unit::player(player_stats, utils::sample_position(&ground, rng));
        grid.set_tile_type(player.position, player.marker())?;

        let mut enemies = Vec::with_capacity(enemy_count as usize);
        for id in 0..enemy_count {
            let enemy = Unit::enemy(id, enemy_stats, utils::sample_position(&ground, rng));
            grid.set_tile_type(enemy.position, enemy.marker())?;
            enemies.push(enemy);
        }

        debug!(
            "Spawned player at {} and {} enemies",
            player.position,
            enemies.len()
        );
        Ok(SpawnedUnits { player, enemies })
    }
}
