//! # Actions
//!
//! The two things a player can do on their turn, and the tokens that name them.
//!
//! Tokens are `move:<direction>` (`up`, `left`, `down`, `right`) and `attack`.

use crate::{Direction, GameEvent, GameState, RandomSource, WarrenError, WarrenResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A single player action.
///
/// # Examples
///
/// ```
/// use warren::{Direction, PlayerAction};
///
/// let action: PlayerAction = "move:left".parse().unwrap();
/// assert_eq!(action, PlayerAction::Move(Direction::Left));
/// assert_eq!(action.to_string(), "move:left");
/// assert!("jump".parse::<PlayerAction>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAction {
    Move(Direction),
    Attack,
}

impl PlayerAction {
    /// Runs the action against `state`, including every enemy reaction.
    pub fn execute<R: RandomSource>(
        &self,
        state: &mut GameState,
        rng: &mut R,
    ) -> WarrenResult<Vec<GameEvent>> {
        match *self {
            PlayerAction::Move(direction) => state.move_player(direction, rng),
            PlayerAction::Attack => state.attack_enemies(rng),
        }
    }
}

impl FromStr for PlayerAction {
    type Err = WarrenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_ascii_lowercase();
        if token == "attack" {
            return Ok(PlayerAction::Attack);
        }
        match token.split_once(':') {
            Some(("move", direction)) => Ok(PlayerAction::Move(direction.parse()?)),
            _ => Err(WarrenError::InvalidAction(format!(
                "unknown action token '{}'",
                s.trim()
            ))),
        }
    }
}

impl std::fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerAction::Move(direction) => write!(f, "move:{}", direction.name()),
            PlayerAction::Attack => write!(f, "attack"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GenerationConfig, Position, Room, RoomConfig};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_token_parsing() {
        assert_eq!(
            "move:up".parse::<PlayerAction>().unwrap(),
            PlayerAction::Move(Direction::Up)
        );
        assert_eq!(
            "MOVE:Right".parse::<PlayerAction>().unwrap(),
            PlayerAction::Move(Direction::Right)
        );
        assert_eq!(
            " attack ".parse::<PlayerAction>().unwrap(),
            PlayerAction::Attack
        );
    }

    #[test]
    fn test_unknown_tokens_are_rejected() {
        for token in ["", "move", "move:", "move:northeast", "attack:now", "wait"] {
            assert!(
                matches!(
                    token.parse::<PlayerAction>(),
                    Err(WarrenError::InvalidAction(_))
                ),
                "token {:?} should be rejected",
                token
            );
        }
    }

    #[test]
    fn test_display_matches_parsing() {
        for action in [
            PlayerAction::Attack,
            PlayerAction::Move(Direction::Up),
            PlayerAction::Move(Direction::Down),
        ] {
            assert_eq!(action.to_string().parse::<PlayerAction>().unwrap(), action);
        }
    }

    #[test]
    fn test_execute_dispatches() {
        let config = GenerationConfig {
            width: 5,
            height: 5,
            rooms: RoomConfig::new(1, 1, 0, 2),
            ..GenerationConfig::for_testing(1)
        };
        let mut state = GameState::new(config).unwrap();
        state.add_room(Room::new(1, 1, 3, 3)).unwrap();
        state.place_player(Position::new(2, 2)).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        PlayerAction::Move(Direction::Right)
            .execute(&mut state, &mut rng)
            .unwrap();
        assert_eq!(state.player.position, Position::new(3, 2));

        PlayerAction::Attack.execute(&mut state, &mut rng).unwrap();
        assert_eq!(state.statistics.turns, 2);
    }
}
