//! # Item Placement
//!
//! Scatters cosmetic sword and potion markers over the carved ground.

use crate::game::{Grid, Tile, TileType};
use crate::generation::utils;
use crate::{ItemConfig, RandomSource, WarrenResult};
use log::debug;

/// Places item markers by sampling a frozen ground snapshot.
///
/// The snapshot is taken once before anything is placed and sampled with
/// replacement. Two items can land on the same tile; the later write wins.
#[derive(Debug, Clone, Default)]
pub struct ItemPlacer;

impl ItemPlacer {
    pub fn new() -> Self {
        Self
    }

    /// Places all swords, then all potions.
    ///
    /// Returns each placement in order as the tile it wrote.
    pub fn add_items<R: RandomSource>(
        &self,
        grid: &mut Grid,
        config: &ItemConfig,
        rng: &mut R,
    ) -> WarrenResult<Vec<Tile>> {
        let total = config.sword_count.saturating_add(config.potion_count);
        let ground = utils::ground_snapshot(grid, total, "items")?;

        let mut placed = Vec::with_capacity(total as usize);
        for (item, count) in [
            (TileType::Sword, config.sword_count),
            (TileType::Potion, config.potion_count),
        ] {
            for _ in 0..count {
                let position = utils::sample_position(&ground, rng);
                grid.set_tile_type(position, item)?;
                placed.push(Tile::new(item, position));
            }
        }

        debug!(
            "Placed {} swords and {} potions",
            config.sword_count, config.potion_count
        );
        Ok(placed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Position;
    use crate::WarrenError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn grid_with_ground(width: u32, height: u32) -> Grid {
        let mut grid = Grid::new(width, height);
        grid.fill_rect(
            Position::new(0, 0),
            Position::new(width as i32 - 1, height as i32 - 1),
            TileType::Ground,
        )
        .unwrap();
        grid
    }

    #[test]
    fn test_items_land_on_ground() {
        let mut grid = Grid::new(10, 10);
        grid.fill_rect(Position::new(2, 2), Position::new(6, 6), TileType::Ground).unwrap();
        let mut rng = StdRng::seed_from_u64(5);

        let placed = ItemPlacer::new()
            .add_items(&mut grid, &ItemConfig::new(2, 4), &mut rng)
            .unwrap();

        assert_eq!(placed.len(), 6);
        assert!(placed[..2].iter().all(|t| t.tile_type == TileType::Sword));
        assert!(placed[2..].iter().all(|t| t.tile_type == TileType::Potion));
        for tile in &placed {
            assert!(tile.position.x >= 2 && tile.position.x <= 6);
            assert!(tile.position.y >= 2 && tile.position.y <= 6);
        }
        let markers = grid.count_of(TileType::Sword) + grid.count_of(TileType::Potion);
        assert!(markers >= 1 && markers <= 6);
    }

    #[test]
    fn test_single_ground_tile_takes_every_item() {
        let mut grid = Grid::new(3, 3);
        let only = Position::new(1, 1);
        grid.set_tile_type(only, TileType::Ground).unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        let placed = ItemPlacer::new()
            .add_items(&mut grid, &ItemConfig::new(2, 0), &mut rng)
            .unwrap();

        assert_eq!(placed.len(), 2);
        assert!(placed.iter().all(|t| t.position == only));
        assert_eq!(grid.tile_type(only), Some(TileType::Sword));
    }

    #[test]
    fn test_last_item_written_wins() {
        let mut grid = Grid::new(3, 3);
        let only = Position::new(2, 0);
        grid.set_tile_type(only, TileType::Ground).unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        ItemPlacer::new()
            .add_items(&mut grid, &ItemConfig::new(1, 1), &mut rng)
            .unwrap();

        assert_eq!(grid.tile_type(only), Some(TileType::Potion));
        assert_eq!(grid.count_of(TileType::Sword), 0);
    }

    #[test]
    fn test_snapshot_is_taken_before_placing() {
        // With a frozen snapshot every draw can hit a tile that already holds an item.
        let mut grid = grid_with_ground(2, 1);
        let mut rng = StdRng::seed_from_u64(11);

        let placed = ItemPlacer::new()
            .add_items(&mut grid, &ItemConfig::new(0, 40), &mut rng)
            .unwrap();

        assert_eq!(placed.len(), 40);
        assert_eq!(grid.count_of(TileType::Potion), 2);
    }

    #[test]
    fn test_no_ground_is_an_error_only_when_items_are_requested() {
        let mut grid = Grid::new(4, 4);
        let mut rng = StdRng::seed_from_u64(0);
        let placer = ItemPlacer::new();

        assert!(placer
            .add_items(&mut grid, &ItemConfig::new(0, 0), &mut rng)
            .unwrap()
            .is_empty());
        assert!(matches!(
            placer.add_items(&mut grid, &ItemConfig::new(1, 0), &mut rng),
            Err(WarrenError::GenerationFailed(_))
        ));
    }
}
