//! # Movement
//!
//! Single-step moves shared by the player and every enemy.
//!
//! A move either succeeds completely (source cleared, unit position updated,
//! destination marked) or leaves the grid and the unit untouched.

use crate::{Direction, Grid, Position, RandomSource, TileType, Unit, WarrenResult};
use log::trace;

/// A completed single-tile move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub from: Position,
    pub to: Position,
}

/// Checks whether a unit may enter `position`.
///
/// Out-of-bounds cells, walls and cells showing another unit all block.
pub fn can_step_into(grid: &Grid, position: Position) -> bool {
    grid.tile_type(position)
        .map(TileType::is_passable)
        .unwrap_or(false)
}

/// Moves `unit` one tile in `direction` if the destination is open.
///
/// Returns the step taken, or `None` when the move was blocked. Blocked moves
/// are not errors; nothing changes.
pub fn move_unit(
    grid: &mut Grid,
    unit: &mut Unit,
    direction: Direction,
) -> WarrenResult<Option<Step>> {
    let from = unit.position;
    let to = from.step(direction);

    if !can_step_into(grid, to) {
        trace!("{} blocked moving {} from {}", unit.id, direction.name(), from);
        return Ok(None);
    }

    grid.set_tile_type(from, TileType::Ground)?;
    unit.position = to;
    grid.set_tile_type(to, unit.marker())?;

    trace!("{} moved {} from {} to {}", unit.id, direction.name(), from, to);
    Ok(Some(Step { from, to }))
}

/// Picks one of the four directions uniformly.
pub fn random_direction<R: RandomSource + ?Sized>(rng: &mut R) -> Direction {
    let index = rng.uniform_int(0, Direction::ALL.len() as i32 - 1);
    Direction::ALL[index as usize]
}
