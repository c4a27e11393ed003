//! # Input Module
//!
//! Maps raw keys and text tokens to player inputs.
//!
//! Nothing here touches game state. Unknown keys map to `None` and are simply
//! never dispatched.

use crate::game::{Direction, PlayerAction};

/// Player input types that can be processed by the input handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerInput {
    /// A game action to dispatch
    Action(PlayerAction),
    /// Show help information
    Help,
    /// Quit the game
    Quit,
}

/// Input handler for processing player commands.
pub struct InputHandler {
    /// Whether to enable Vi-style movement keys (hjkl)
    pub vi_keys_enabled: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Creates a new input handler.
    ///
    /// # Examples
    ///
    /// ```
    /// use warren::{Direction, InputHandler, PlayerAction, PlayerInput};
    ///
    /// let input_handler = InputHandler::new();
    /// assert_eq!(
    ///     input_handler.key_to_input('w'),
    ///     Some(PlayerInput::Action(PlayerAction::Move(Direction::Up)))
    /// );
    /// assert_eq!(input_handler.key_to_input('z'), None);
    /// ```
    pub fn new() -> Self {
        Self {
            vi_keys_enabled: true,
        }
    }

    /// Maps a single key press.
    pub fn key_to_input(&self, key: char) -> Option<PlayerInput> {
        let movement = |direction| Some(PlayerInput::Action(PlayerAction::Move(direction)));

        match key.to_ascii_lowercase() {
            'w' => movement(Direction::Up),
            'a' => movement(Direction::Left),
            's' => movement(Direction::Down),
            'd' => movement(Direction::Right),
            'k' if self.vi_keys_enabled => movement(Direction::Up),
            'h' if self.vi_keys_enabled => movement(Direction::Left),
            'j' if self.vi_keys_enabled => movement(Direction::Down),
            'l' if self.vi_keys_enabled => movement(Direction::Right),
            ' ' | 'f' => Some(PlayerInput::Action(PlayerAction::Attack)),
            '?' => Some(PlayerInput::Help),
            'q' => Some(PlayerInput::Quit),
            _ => None,
        }
    }

    /// Maps one line of terminal input.
    ///
    /// A line holding a full token (`move:up`, `attack`) or a word (`help`,
    /// `quit`) yields that one input. A line made only of known keys is read
    /// key by key. Anything else, including a mistyped token, yields nothing.
    pub fn line_to_inputs(&self, line: &str) -> Vec<PlayerInput> {
        let trimmed = line.trim_end_matches(['\r', '\n']);
        match trimmed.trim().to_ascii_lowercase().as_str() {
            "help" => return vec![PlayerInput::Help],
            "quit" | "exit" => return vec![PlayerInput::Quit],
            _ => {}
        }
        if let Ok(action) = trimmed.parse::<PlayerAction>() {
            return vec![PlayerInput::Action(action)];
        }

        if trimmed.contains(':') {
            return Vec::new();
        }
        trimmed
            .chars()
            .map(|key| self.key_to_input(key))
            .collect::<Option<Vec<_>>>()
            .unwrap_or_default()
    }
}
