//! # Game State Module
//!
//! The session aggregate and its setup pipeline.
//!
//! [`GameState`] exclusively owns the grid, the room list, the player and the
//! enemy roster. Setup runs once (grid → rooms → passages → items → units) and
//! afterwards the state only changes through [`GameState::move_player`] and
//! [`GameState::attack_enemies`].

use crate::generation::utils;
use crate::{
    GenerationConfig, Grid, ItemConfig, ItemPlacer, MapGenerator, Passage, Position, RandomSource,
    Room, RoomConfig, Tile, TileType, Unit, UnitId, UnitSpawner, WarrenError, WarrenResult,
};
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Terminal-state flags.
///
/// `is_game_on` is cleared by either ending; `is_game_over` tells them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameFlags {
    pub is_game_on: bool,
    pub is_game_over: bool,
}

impl GameFlags {
    pub fn playing() -> Self {
        Self {
            is_game_on: true,
            is_game_over: false,
        }
    }

    pub fn status(&self) -> GameStatus {
        match (self.is_game_on, self.is_game_over) {
            (true, _) => GameStatus::Playing,
            (false, false) => GameStatus::Won,
            (false, true) => GameStatus::Lost,
        }
    }
}

impl Default for GameFlags {
    fn default() -> Self {
        Self::playing()
    }
}

/// Where the session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    /// Every enemy was defeated
    Won,
    /// The player's hp dropped to zero or below
    Lost,
}

/// Something that happened during an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A unit took a step
    UnitMoved {
        unit: UnitId,
        from: Position,
        to: Position,
    },
    /// The player stepped onto an item marker
    ItemTrampled { item: TileType, position: Position },
    /// One unit hit another
    UnitAttacked {
        attacker: UnitId,
        target: UnitId,
        damage: i32,
        remaining_hp: i32,
    },
    /// An enemy was removed from the roster
    EnemyDefeated { enemy: UnitId, position: Position },
    GameWon,
    GameLost,
}

/// Per-session counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatistics {
    /// Player actions dispatched
    pub turns: u64,
    /// Successful player steps
    pub steps_taken: u64,
    /// Damage the player dealt
    pub damage_dealt: u64,
    /// Damage the player took
    pub damage_taken: u64,
    pub enemies_defeated: u32,
    pub items_stepped_on: u32,
}

impl GameStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates statistics based on a game event.
    pub fn update_from_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::UnitMoved {
                unit: UnitId::Player,
                ..
            } => {
                self.steps_taken += 1;
            }
            GameEvent::ItemTrampled { .. } => {
                self.items_stepped_on += 1;
            }
            GameEvent::UnitAttacked {
                attacker, damage, ..
            } => {
                let damage = (*damage).max(0) as u64;
                if *attacker == UnitId::Player {
                    self.damage_dealt += damage;
                } else {
                    self.damage_taken += damage;
                }
            }
            GameEvent::EnemyDefeated { .. } => {
                self.enemies_defeated += 1;
            }
            _ => {}
        }
    }
}

/// Unit section of a [`GameSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitsSnapshot {
    pub player: Unit,
    pub enemies: Vec<Unit>,
}

/// Read-only copy of everything a presenter needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub width: u32,
    pub height: u32,
    pub tiles: Vec<Tile>,
    pub rooms: Vec<Room>,
    pub units: UnitsSnapshot,
    pub flags: GameFlags,
    pub status: GameStatus,
}

impl GameSnapshot {
    /// Serializes the snapshot to pretty JSON.
    pub fn to_json(&self) -> WarrenResult<String> {
        serde_json::to_string_pretty(self).map_err(WarrenError::from)
    }
}

/// Central game state containing the whole session.
///
/// # Examples
///
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use warren::{Direction, GameEvent, GameState, GenerationConfig, UnitId};
///
/// let config = GenerationConfig::for_testing(12345);
/// let mut rng = StdRng::seed_from_u64(config.seed);
/// let mut state = GameState::generate(config, &mut rng).unwrap();
///
/// let start = state.player.position;
/// let events = state.move_player(Direction::Up, &mut rng).unwrap();
/// assert_eq!(state.statistics.turns, 1);
/// // A blocked step emits no move for the player.
/// let moved = events
///     .iter()
///     .any(|event| matches!(event, GameEvent::UnitMoved { unit: UnitId::Player, .. }));
/// assert_eq!(moved, state.player.position != start);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Configuration the session was built from
    pub config: GenerationConfig,
    /// Tile storage
    pub grid: Grid,
    /// Rooms in carving order
    pub rooms: Vec<Room>,
    /// Passages in carving order
    pub passages: Vec<Passage>,
    /// The player unit
    pub player: Unit,
    /// Live enemies in roster order
    pub enemies: Vec<Unit>,
    /// Terminal-state flags
    pub flags: GameFlags,
    /// Session counters
    pub statistics: GameStatistics,
}

impl GameState {
    /// Validates `config` and creates an all-wall grid with no rooms or units.
    ///
    /// The player record exists from the start but is only placed on the grid
    /// by [`GameState::add_units`] or [`GameState::place_player`].
    pub fn new(config: GenerationConfig) -> WarrenResult<Self> {
        config.validate()?;

        let grid = Grid::new(config.width, config.height);
        let player = Unit::player(config.player, Position::origin());

        Ok(Self {
            config,
            grid,
            rooms: Vec::new(),
            passages: Vec::new(),
            player,
            enemies: Vec::new(),
            flags: GameFlags::playing(),
            statistics: GameStatistics::new(),
        })
    }

    /// Runs the full setup pipeline from `config`.
    pub fn generate<R: RandomSource>(config: GenerationConfig, rng: &mut R) -> WarrenResult<Self> {
        info!(
            "Generating {}x{} dungeon with seed {}",
            config.width, config.height, config.seed
        );

        let mut state = Self::new(config)?;
        let rooms = state.config.rooms;
        let items = state.config.items;
        let enemy_count = state.config.enemy_count;

        state.add_rooms(&rooms, rng)?;
        state.add_passages(rng)?;
        utils::validate_dungeon(&state.grid, &state.rooms)?;
        state.add_items(&items, rng)?;
        state.add_units(enemy_count, rng)?;

        info!(
            "Dungeon ready: {} rooms, {} enemies, player at {}",
            state.rooms.len(),
            state.enemies.len(),
            state.player.position
        );
        Ok(state)
    }

    /// Carves random rooms and records them.
    pub fn add_rooms<R: RandomSource>(
        &mut self,
        config: &RoomConfig,
        rng: &mut R,
    ) -> WarrenResult<()> {
        let rooms = MapGenerator::new().add_rooms(&mut self.grid, config, rng)?;
        self.rooms.extend(rooms);
        Ok(())
    }

    /// Carves and records one specific room.
    pub fn add_room(&mut self, room: Room) -> WarrenResult<()> {
        MapGenerator::new().carve_room(&mut self.grid, &room)?;
        self.rooms.push(room);
        Ok(())
    }

    /// Carves a row and a column through every recorded room.
    pub fn add_passages<R: RandomSource>(&mut self, rng: &mut R) -> WarrenResult<()> {
        let passages = MapGenerator::new().add_passages(&mut self.grid, &self.rooms, rng)?;
        self.passages.extend(passages);
        Ok(())
    }

    /// Scatters item markers over the current ground.
    pub fn add_items<R: RandomSource>(
        &mut self,
        config: &ItemConfig,
        rng: &mut R,
    ) -> WarrenResult<()> {
        ItemPlacer::new().add_items(&mut self.grid, config, rng)?;
        Ok(())
    }

    /// Spawns the player and `enemy_count` enemies on the current ground.
    pub fn add_units<R: RandomSource>(
        &mut self,
        enemy_count: u32,
        rng: &mut R,
    ) -> WarrenResult<()> {
        let spawned = UnitSpawner::new().add_units(
            &mut self.grid,
            enemy_count,
            self.config.player,
            self.config.enemy,
            rng,
        )?;
        self.player = spawned.player;
        self.enemies = spawned.enemies;
        self.flags = GameFlags::playing();
        Ok(())
    }

    /// Puts the player at `position` and marks the tile.
    pub fn place_player(&mut self, position: Position) -> WarrenResult<()> {
        self.grid.set_tile_type(position, TileType::Player)?;
        self.player.position = position;
        Ok(())
    }

    /// Appends an enemy with the configured stats at `position`.
    pub fn place_enemy(&mut self, position: Position) -> WarrenResult<UnitId> {
        self.grid.set_tile_type(position, TileType::Enemy)?;
        let next_id = self
            .enemies
            .iter()
            .filter_map(|enemy| match enemy.id {
                UnitId::Enemy(id) => Some(id + 1),
                UnitId::Player => None,
            })
            .max()
            .unwrap_or(0);
        let enemy = Unit::enemy(next_id, self.config.enemy, position);
        let id = enemy.id;
        self.enemies.push(enemy);
        Ok(id)
    }

    /// Current status derived from the flags.
    pub fn status(&self) -> GameStatus {
        self.flags.status()
    }

    pub fn is_playing(&self) -> bool {
        self.status() == GameStatus::Playing
    }

    /// Copies out the state for presentation.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            width: self.grid.width(),
            height: self.grid.height(),
            tiles: self.grid.tiles().to_vec(),
            rooms: self.rooms.clone(),
            units: UnitsSnapshot {
                player: self.player.clone(),
                enemies: self.enemies.clone(),
            },
            flags: self.flags,
            status: self.status(),
        }
    }

    /// Marks the session won.
    pub(crate) fn declare_won(&mut self, events: &mut Vec<GameEvent>) {
        self.flags = GameFlags {
            is_game_on: false,
            is_game_over: false,
        };
        info!("All enemies defeated, game won");
        events.push(GameEvent::GameWon);
    }

    /// Marks the session lost.
    pub(crate) fn declare_lost(&mut self, events: &mut Vec<GameEvent>) {
        self.flags = GameFlags {
            is_game_on: false,
            is_game_over: true,
        };
        info!("Player defeated, game lost");
        events.push(GameEvent::GameLost);
    }

    /// Closes out one player action.
    pub(crate) fn finish_turn(&mut self, events: &[GameEvent]) {
        self.statistics.turns += 1;
        for event in events {
            self.statistics.update_from_event(event);
        }
        debug!(
            "Turn {} done: {} events, player hp {}, {} enemies left",
            self.statistics.turns,
            events.len(),
            self.player.hp,
            self.enemies.len()
        );
    }
}
