//! # World Module
//!
//! Grid storage and tile definitions.
//!
//! The grid is the single source of truth for what a cell displays. Units keep
//! their own logical position as well, and the movement rules keep the two in
//! step.

use crate::{Position, WarrenError, WarrenResult};
use serde::{Deserialize, Serialize};

/// What a single cell currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileType {
    /// Uncarved rock
    Wall,
    /// Walkable floor
    Ground,
    /// The player marker
    Player,
    /// An enemy marker
    Enemy,
    /// A cosmetic sword marker
    Sword,
    /// A cosmetic potion marker
    Potion,
}

impl TileType {
    /// Whether a unit may step onto a tile of this type.
    ///
    /// Item markers are walkable, units and walls are not.
    pub fn is_passable(self) -> bool {
        matches!(self, TileType::Ground | TileType::Sword | TileType::Potion)
    }

    /// Whether this is one of the item markers.
    pub fn is_item(self) -> bool {
        matches!(self, TileType::Sword | TileType::Potion)
    }

    /// Character used by the text display.
    pub fn glyph(self) -> char {
        match self {
            TileType::Wall => '#',
            TileType::Ground => '.',
            TileType::Player => '@',
            TileType::Enemy => 'E',
            TileType::Sword => '/',
            TileType::Potion => '!',
        }
    }
}

/// One grid cell: its type and coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub tile_type: TileType,
    pub position: Position,
}

impl Tile {
    /// Creates a tile of the given type at `position`.
    pub fn new(tile_type: TileType, position: Position) -> Self {
        Self {
            tile_type,
            position,
        }
    }
}

/// Fixed-size row-major tile storage.
///
/// # Examples
///
/// ```
/// use warren::{Grid, Position, TileType};
///
/// let mut grid = Grid::new(5, 4);
/// assert_eq!(grid.tiles().len(), 20);
/// assert_eq!(grid.tile_type(Position::new(2, 2)), Some(TileType::Wall));
///
/// grid.set_tile_type(Position::new(2, 2), TileType::Ground).unwrap();
/// assert_eq!(grid.count_of(TileType::Ground), 1);
/// assert!(grid.set_tile_type(Position::new(5, 0), TileType::Ground).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Creates a grid with every cell set to [`TileType::Wall`].
    pub fn new(width: u32, height: u32) -> Self {
        let mut tiles = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                tiles.push(Tile::new(TileType::Wall, Position::new(x, y)));
            }
        }

        Self {
            width,
            height,
            tiles,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Checks whether `position` lies inside the grid.
    pub fn is_in_bounds(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as u32) < self.width
            && (position.y as u32) < self.height
    }

    fn index(&self, position: Position) -> Option<usize> {
        if self.is_in_bounds(position) {
            Some(position.y as usize * self.width as usize + position.x as usize)
        } else {
            None
        }
    }

    fn out_of_bounds(&self, position: Position) -> WarrenError {
        WarrenError::OutOfBounds {
            x: position.x,
            y: position.y,
            width: self.width,
            height: self.height,
        }
    }

    /// Gets the tile at `position`.
    pub fn tile(&self, position: Position) -> Option<&Tile> {
        self.index(position).map(|index| &self.tiles[index])
    }

    /// Gets the tile type at `position`.
    pub fn tile_type(&self, position: Position) -> Option<TileType> {
        self.tile(position).map(|tile| tile.tile_type)
    }

    /// Overwrites the type of the tile at `position`.
    pub fn set_tile_type(&mut self, position: Position, tile_type: TileType) -> WarrenResult<()> {
        let index = self
            .index(position)
            .ok_or_else(|| self.out_of_bounds(position))?;
        self.tiles[index].tile_type = tile_type;
        Ok(())
    }

    /// Sets every tile in the inclusive rectangle to `tile_type`.
    pub fn fill_rect(
        &mut self,
        top_left: Position,
        bottom_right: Position,
        tile_type: TileType,
    ) -> WarrenResult<()> {
        for y in top_left.y..=bottom_right.y {
            for x in top_left.x..=bottom_right.x {
                self.set_tile_type(Position::new(x, y), tile_type)?;
            }
        }
        Ok(())
    }

    /// All tiles in row-major order.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Copies out every tile of the given type.
    ///
    /// The result is a snapshot; later grid writes do not show up in it.
    pub fn tiles_of_type(&self, tile_type: TileType) -> Vec<Tile> {
        self.tiles
            .iter()
            .filter(|tile| tile.tile_type == tile_type)
            .copied()
            .collect()
    }

    /// Counts tiles of the given type.
    pub fn count_of(&self, tile_type: TileType) -> usize {
        self.tiles
            .iter()
            .filter(|tile| tile.tile_type == tile_type)
            .count()
    }
}
