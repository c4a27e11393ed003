//! # Display Management
//!
//! Turns a [`GameSnapshot`] into plain text for the terminal.

use crate::game::{GameSnapshot, GameStatus};

/// Text renderer for game snapshots.
#[derive(Debug, Clone)]
pub struct TextDisplay {
    /// Whether to print the status line under the map
    pub show_status: bool,
}

impl Default for TextDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl TextDisplay {
    /// Creates a display that prints the map and the status line.
    ///
    /// # Examples
    ///
    /// ```
    /// use warren::{GameState, GenerationConfig, TextDisplay};
    ///
    /// let state = GameState::new(GenerationConfig::for_testing(1)).unwrap();
    /// let text = TextDisplay::new().render(&state.snapshot());
    /// assert!(text.starts_with("####"));
    /// ```
    pub fn new() -> Self {
        Self { show_status: true }
    }

    /// Renders the map, one line per row, followed by the status line.
    pub fn render(&self, snapshot: &GameSnapshot) -> String {
        let width = snapshot.width.max(1) as usize;
        let mut out = String::with_capacity((width + 1) * snapshot.height as usize + 64);

        for row in snapshot.tiles.chunks(width) {
            out.extend(row.iter().map(|tile| tile.tile_type.glyph()));
            out.push('\n');
        }

        if self.show_status {
            out.push_str(&self.status_line(snapshot));
            out.push('\n');
        }
        out
    }

    /// One-line summary of the player and the roster.
    pub fn status_line(&self, snapshot: &GameSnapshot) -> String {
        let player = &snapshot.units.player;
        let status = match snapshot.status {
            GameStatus::Playing => "playing",
            GameStatus::Won => "you won",
            GameStatus::Lost => "you lost",
        };
        format!(
            "HP {}  ATK {}  enemies {}  [{}]",
            player.hp,
            player.attack_power,
            snapshot.units.enemies.len(),
            status
        )
    }

    /// Key reference shown for the help input.
    pub fn help_text(&self) -> &'static str {
        "Keys: w/a/s/d or k/h/j/l = move, space or f = attack, ? = help, q = quit\n\
         Tokens: move:up, move:left, move:down, move:right, attack"
    }
}
