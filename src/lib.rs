//! # Warren
//!
//! A procedurally carved tile dungeon with turn-based movement and combat.
//!
//! ## Architecture Overview
//!
//! Warren keeps the whole session in one owned [`GameState`] and drives it
//! through a handful of synchronous entry points:
//!
//! - **Grid**: row-major tile storage, the only record of what occupies a cell
//! - **Generation**: room carving, border-to-border passages, item and unit placement
//! - **Movement**: single-step moves shared by the player and the enemies
//! - **Combat**: adjacency attacks and the Playing → Won / Lost state machine
//! - **Boundary**: key mapping, a text renderer and the `warren` binary
//!
//! Every random draw goes through [`RandomSource`], so a session built from a
//! seeded RNG replays exactly.
//!
//! ```
//! use rand::{rngs::StdRng, SeedableRng};
//! use warren::{GameState, GameStatus, GenerationConfig};
//!
//! let config = GenerationConfig::for_testing(7);
//! let mut rng = StdRng::seed_from_u64(config.seed);
//! let state = GameState::generate(config, &mut rng).unwrap();
//! assert_eq!(state.status(), GameStatus::Playing);
//! ```

pub mod game;
pub mod generation;
pub mod input;
pub mod rendering;

pub use game::*;
pub use generation::*;
pub use input::*;
pub use rendering::*;

/// Core error type for the Warren engine.
#[derive(thiserror::Error, Debug)]
pub enum WarrenError {
    /// A coordinate fell outside the grid
    #[error("position ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
    },

    /// Generation parameters cannot produce a valid dungeon
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Generation could not place requested content
    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    /// An action token was not recognised
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Result type used throughout the Warren codebase.
pub type WarrenResult<T> = Result<T, WarrenError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Default dungeon width in tiles
    pub const DEFAULT_DUNGEON_WIDTH: u32 = 40;

    /// Default dungeon height in tiles
    pub const DEFAULT_DUNGEON_HEIGHT: u32 = 24;

    /// Room count range (inclusive)
    pub const DEFAULT_MIN_ROOMS: u32 = 5;
    pub const DEFAULT_MAX_ROOMS: u32 = 10;

    /// Room span range (inclusive). A span of 0 is a one-tile-wide room.
    pub const DEFAULT_MIN_ROOM_SIZE: u32 = 2;
    pub const DEFAULT_MAX_ROOM_SIZE: u32 = 7;

    /// Item markers placed per session
    pub const DEFAULT_SWORD_COUNT: u32 = 2;
    pub const DEFAULT_POTION_COUNT: u32 = 10;

    /// Enemies spawned per session
    pub const DEFAULT_ENEMY_COUNT: u32 = 10;

    /// Default player starting health
    pub const PLAYER_MAX_HP: i32 = 100;

    /// Default player damage per hit
    pub const PLAYER_ATTACK_POWER: i32 = 25;

    /// Default enemy starting health
    pub const ENEMIES_MAX_HP: i32 = 50;

    /// Default enemy damage per hit
    pub const ENEMIES_INITIAL_ATTACK_POWER: i32 = 10;
}
