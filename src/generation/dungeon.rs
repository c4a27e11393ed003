//! # Dungeon Generation
//!
//! Room carving and border-to-border passages.
//!
//! Rooms are dropped at random with no overlap checks. Every room then gets
//! one full-width row and one full-height column of ground through it. Those
//! strips all reach the grid edges, so every room is connected to every other
//! room through the border without a separate connectivity pass.

use crate::game::{Grid, Position, TileType};
use crate::{RandomSource, Room, RoomConfig, WarrenError, WarrenResult};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

/// A full-span strip of ground carved through a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Passage {
    /// Row `y`, from column 0 to the last column
    Row(i32),
    /// Column `x`, from row 0 to the last row
    Column(i32),
}

impl Passage {
    /// Whether the strip passes through `room`.
    pub fn crosses(&self, room: &Room) -> bool {
        match *self {
            Passage::Row(y) => y >= room.y0 && y <= room.y1,
            Passage::Column(x) => x >= room.x0 && x <= room.x1,
        }
    }
}

/// Room-and-passage dungeon carver.
///
/// # Examples
///
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use warren::{Grid, MapGenerator, RoomConfig, TileType};
///
/// let mut grid = Grid::new(20, 12);
/// let mut rng = StdRng::seed_from_u64(1);
/// let generator = MapGenerator::new();
///
/// let rooms = generator
///     .add_rooms(&mut grid, &RoomConfig::new(2, 4, 1, 4), &mut rng)
///     .unwrap();
/// generator.add_passages(&mut grid, &rooms, &mut rng).unwrap();
/// assert!(grid.count_of(TileType::Ground) > 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MapGenerator;

impl MapGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Carves a random number of rooms and returns them in carving order.
    pub fn add_rooms<R: RandomSource>(
        &self,
        grid: &mut Grid,
        config: &RoomConfig,
        rng: &mut R,
    ) -> WarrenResult<Vec<Room>> {
        config.validate(grid.width(), grid.height())?;

        let room_count = rng.uniform_int(config.min_count as i32, config.max_count as i32);
        let mut rooms = Vec::with_capacity(room_count as usize);

        for _ in 0..room_count {
            let room = self.room_candidate(grid, config, rng);
            self.carve_room(grid, &room)?;
            rooms.push(room);
        }

        debug!("Carved {} rooms", rooms.len());
        Ok(rooms)
    }

    /// Draws one room that lies fully inside the grid.
    fn room_candidate<R: RandomSource>(
        &self,
        grid: &Grid,
        config: &RoomConfig,
        rng: &mut R,
    ) -> Room {
        let room_width = rng.uniform_int(config.min_size as i32, config.max_size as i32);
        let room_height = rng.uniform_int(config.min_size as i32, config.max_size as i32);

        let x0 = rng.uniform_int(0, grid.width() as i32 - 1 - room_width);
        let y0 = rng.uniform_int(0, grid.height() as i32 - 1 - room_height);

        Room::new(x0, y0, x0 + room_width, y0 + room_height)
    }

    /// Sets every tile of `room` to ground.
    pub fn carve_room(&self, grid: &mut Grid, room: &Room) -> WarrenResult<()> {
        if !room.fits(grid.width(), grid.height()) {
            return Err(WarrenError::OutOfBounds {
                x: room.x1,
                y: room.y1,
                width: grid.width(),
                height: grid.height(),
            });
        }
        trace!("Carving room {:?}", room);
        grid.fill_rect(room.top_left(), room.bottom_right(), TileType::Ground)
    }

    /// Carves one row and one column through every room.
    ///
    /// Returns the passages in carving order: row then column, room by room.
    pub fn add_passages<R: RandomSource>(
        &self,
        grid: &mut Grid,
        rooms: &[Room],
        rng: &mut R,
    ) -> WarrenResult<Vec<Passage>> {
        let mut passages = Vec::with_capacity(rooms.len() * 2);

        for room in rooms {
            let y = rng.uniform_int(room.y0, room.y1);
            self.carve_passage(grid, Passage::Row(y))?;
            passages.push(Passage::Row(y));

            let x = rng.uniform_int(room.x0, room.x1);
            self.carve_passage(grid, Passage::Column(x))?;
            passages.push(Passage::Column(x));
        }

        debug!("Carved {} passages", passages.len());
        Ok(passages)
    }

    /// Sets a full row or column to ground.
    pub fn carve_passage(&self, grid: &mut Grid, passage: Passage) -> WarrenResult<()> {
        let last_x = grid.width() as i32 - 1;
        let last_y = grid.height() as i32 - 1;
        match passage {
            Passage::Row(y) => {
                grid.fill_rect(Position::new(0, y), Position::new(last_x, y), TileType::Ground)
            }
            Passage::Column(x) => {
                grid.fill_rect(Position::new(x, 0), Position::new(x, last_y), TileType::Ground)
            }
        }
    }
}
