//! # Combat
//!
//! Adjacency attacks and the Playing → Won / Lost transitions.
//!
//! Both player actions walk the enemy roster exactly once, in roster order.
//! Moving never damages enemies and never checks for a win. Attacking does
//! both. The pass stops early as soon as the player is defeated.

use crate::game::movement::{self, random_direction};
use crate::{
    Direction, GameEvent, GameState, Position, RandomSource, TileType, UnitId, WarrenResult,
};
use log::debug;

/// True when two positions touch, diagonals included.
///
/// # Examples
///
/// ```
/// use warren::{adjacent, Position};
///
/// assert!(adjacent(Position::new(2, 2), Position::new(3, 3)));
/// assert!(adjacent(Position::new(2, 2), Position::new(2, 2)));
/// assert!(!adjacent(Position::new(2, 2), Position::new(4, 2)));
/// ```
pub fn adjacent(a: Position, b: Position) -> bool {
    a.chebyshev_distance(b) <= 1
}

impl GameState {
    /// Moves the player one step, then lets every enemy react.
    ///
    /// Adjacent enemies hit the player; the rest wander one random step.
    /// A blocked player move still gives the enemies their turn.
    pub fn move_player<R: RandomSource>(
        &mut self,
        direction: Direction,
        rng: &mut R,
    ) -> WarrenResult<Vec<GameEvent>> {
        let mut events = Vec::new();

        let destination = self.grid.tile_type(self.player.position.step(direction));
        if let Some(step) = movement::move_unit(&mut self.grid, &mut self.player, direction)? {
            events.push(GameEvent::UnitMoved {
                unit: UnitId::Player,
                from: step.from,
                to: step.to,
            });
            if let Some(item) = destination.filter(|tile| tile.is_item()) {
                events.push(GameEvent::ItemTrampled {
                    item,
                    position: step.to,
                });
            }
        }

        for index in 0..self.enemies.len() {
            if adjacent(self.enemies[index].position, self.player.position) {
                self.enemy_strikes_player(index, &mut events);
                if self.check_player_defeated(&mut events) {
                    break;
                }
            } else {
                self.wander(index, rng, &mut events)?;
            }
        }

        self.finish_turn(&events);
        Ok(events)
    }

    /// Attacks every adjacent enemy once; non-adjacent enemies wander instead.
    ///
    /// Each hit enemy retaliates immediately, even when the hit killed it.
    /// Dead enemies leave the roster and their tile returns to ground. The
    /// game is won as soon as the roster is empty.
    pub fn attack_enemies<R: RandomSource>(&mut self, rng: &mut R) -> WarrenResult<Vec<GameEvent>> {
        let mut events = Vec::new();
        let mut index = 0;

        while index < self.enemies.len() {
            if !adjacent(self.enemies[index].position, self.player.position) {
                self.wander(index, rng, &mut events)?;
                index += 1;
                continue;
            }

            let damage = self.player.attack_power;
            let enemy = &mut self.enemies[index];
            enemy.take_damage(damage);
            debug!("player hits {} for {} ({} hp left)", enemy.id, damage, enemy.hp);
            events.push(GameEvent::UnitAttacked {
                attacker: UnitId::Player,
                target: enemy.id,
                damage,
                remaining_hp: enemy.hp,
            });

            self.enemy_strikes_player(index, &mut events);
            let lost = self.check_player_defeated(&mut events);

            if self.enemies[index].is_dead() {
                let enemy = self.enemies.remove(index);
                self.grid.set_tile_type(enemy.position, TileType::Ground)?;
                debug!("{} defeated at {}", enemy.id, enemy.position);
                events.push(GameEvent::EnemyDefeated {
                    enemy: enemy.id,
                    position: enemy.position,
                });
            } else {
                index += 1;
            }

            if lost {
                break;
            }
            if self.enemies.is_empty() {
                self.declare_won(&mut events);
                break;
            }
        }

        self.finish_turn(&events);
        Ok(events)
    }

    /// The enemy at `index` hits the player once.
    fn enemy_strikes_player(&mut self, index: usize, events: &mut Vec<GameEvent>) {
        let enemy = &self.enemies[index];
        self.player.take_damage(enemy.attack_power);
        debug!(
            "{} hits player for {} ({} hp left)",
            enemy.id, enemy.attack_power, self.player.hp
        );
        events.push(GameEvent::UnitAttacked {
            attacker: enemy.id,
            target: UnitId::Player,
            damage: enemy.attack_power,
            remaining_hp: self.player.hp,
        });
    }

    /// Switches to Lost if the player is dead. Returns whether it did.
    fn check_player_defeated(&mut self, events: &mut Vec<GameEvent>) -> bool {
        if self.player.is_dead() {
            self.declare_lost(events);
            true
        } else {
            false
        }
    }

    /// The enemy at `index` tries one step in a random direction.
    fn wander<R: RandomSource>(
        &mut self,
        index: usize,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) -> WarrenResult<()> {
        let direction = random_direction(rng);
        let enemy = &mut self.enemies[index];
        if let Some(step) = movement::move_unit(&mut self.grid, enemy, direction)? {
            events.push(GameEvent::UnitMoved {
                unit: enemy.id,
                from: step.from,
                to: step.to,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameStatus, GenerationConfig, Room, RoomConfig, UnitStats};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// 7x7 grid with ground at 1..=5 on both axes, player in the middle.
    fn arena(enemy_stats: UnitStats) -> GameState {
        let config = GenerationConfig {
            width: 7,
            height: 7,
            rooms: RoomConfig::new(1, 1, 0, 2),
            enemy: enemy_stats,
            ..GenerationConfig::for_testing(1)
        };
        let mut state = GameState::new(config).unwrap();
        state.add_room(Room::new(1, 1, 5, 5)).unwrap();
        state.place_player(Position::new(3, 3)).unwrap();
        state
    }

    fn consistent(state: &GameState) -> bool {
        state.grid.tile_type(state.player.position) == Some(TileType::Player)
            && state
                .enemies
                .iter()
                .all(|e| state.grid.tile_type(e.position) == Some(TileType::Enemy))
    }

    #[test]
    fn test_adjacency_includes_diagonals() {
        let center = Position::new(3, 3);
        for dy in -1..=1 {
            for dx in -1..=1 {
                assert!(adjacent(center, Position::new(3 + dx, 3 + dy)));
            }
        }
        assert!(!adjacent(center, Position::new(5, 3)));
        assert!(!adjacent(center, Position::new(1, 1)));
    }

    #[test]
    fn test_move_player_lets_adjacent_enemy_strike() {
        let mut state = arena(UnitStats::new(50, 10));
        state.place_enemy(Position::new(3, 1)).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let events = state.move_player(Direction::Up, &mut rng).unwrap();

        assert_eq!(state.player.position, Position::new(3, 2));
        assert_eq!(state.player.hp, 90);
        assert_eq!(state.enemies[0].hp, 50);
        assert_eq!(state.enemies[0].position, Position::new(3, 1));
        assert!(events.contains(&GameEvent::UnitAttacked {
            attacker: UnitId::Enemy(0),
            target: UnitId::Player,
            damage: 10,
            remaining_hp: 90,
        }));
        assert_eq!(state.status(), GameStatus::Playing);
        assert_eq!(state.statistics.damage_taken, 10);
        assert_eq!(state.statistics.steps_taken, 1);
    }

    #[test]
    fn test_move_player_never_wins_or_removes_enemies() {
        let mut state = arena(UnitStats::new(1, 0));
        state.place_enemy(Position::new(3, 2)).unwrap();
        state.enemies[0].hp = 0;
        let mut rng = StdRng::seed_from_u64(2);

        state.move_player(Direction::Down, &mut rng).unwrap();

        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.status(), GameStatus::Playing);
    }

    #[test]
    fn test_far_enemies_wander_and_stay_consistent() {
        let mut state = arena(UnitStats::new(50, 10));
        state.place_enemy(Position::new(1, 1)).unwrap();
        state.place_enemy(Position::new(5, 5)).unwrap();
        let mut rng = StdRng::seed_from_u64(99);

        for _ in 0..20 {
            state.move_player(Direction::Left, &mut rng).unwrap();
            state.move_player(Direction::Right, &mut rng).unwrap();
            assert!(consistent(&state));
            assert_eq!(state.grid.count_of(TileType::Player), 1);
        }
        for enemy in &state.enemies {
            assert!(Room::new(1, 1, 5, 5).contains(enemy.position));
        }
    }

    #[test]
    fn test_attack_skips_far_enemies() {
        let mut state = arena(UnitStats::new(50, 10));
        state.place_enemy(Position::new(1, 1)).unwrap();
        let mut rng = StdRng::seed_from_u64(5);

        let events = state.attack_enemies(&mut rng).unwrap();

        assert_eq!(state.enemies[0].hp, 50);
        assert_eq!(state.player.hp, 100);
        assert!(events
            .iter()
            .all(|e| !matches!(e, GameEvent::UnitAttacked { .. })));
    }

    #[test]
    fn test_attack_damages_and_takes_retaliation() {
        let mut state = arena(UnitStats::new(50, 10));
        state.place_enemy(Position::new(4, 4)).unwrap();
        let mut rng = StdRng::seed_from_u64(5);

        state.attack_enemies(&mut rng).unwrap();

        assert_eq!(state.enemies[0].hp, 25);
        assert_eq!(state.player.hp, 90);
        assert_eq!(state.statistics.damage_dealt, 25);
        assert_eq!(state.status(), GameStatus::Playing);
    }

    #[test]
    fn test_killing_one_of_two_enemies_does_not_win() {
        let mut state = arena(UnitStats::new(20, 1));
        state.place_enemy(Position::new(2, 2)).unwrap();
        state.place_enemy(Position::new(4, 3)).unwrap();
        state.enemies[1].hp = 100;
        let mut rng = StdRng::seed_from_u64(5);

        let events = state.attack_enemies(&mut rng).unwrap();

        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].id, UnitId::Enemy(1));
        assert_eq!(state.enemies[0].hp, 75);
        assert_eq!(state.grid.tile_type(Position::new(2, 2)), Some(TileType::Ground));
        assert_eq!(state.player.hp, 98);
        assert!(events.contains(&GameEvent::EnemyDefeated {
            enemy: UnitId::Enemy(0),
            position: Position::new(2, 2),
        }));
        assert_eq!(state.status(), GameStatus::Playing);
    }

    #[test]
    fn test_defeated_enemy_still_retaliates() {
        let mut state = arena(UnitStats::new(10, 7));
        state.place_enemy(Position::new(2, 3)).unwrap();
        let mut rng = StdRng::seed_from_u64(5);

        state.attack_enemies(&mut rng).unwrap();

        assert!(state.enemies.is_empty());
        assert_eq!(state.player.hp, 93);
        assert_eq!(state.status(), GameStatus::Won);
    }

    #[test]
    fn test_lost_stops_the_pass() {
        let mut state = arena(UnitStats::new(50, 60));
        state.place_enemy(Position::new(2, 2)).unwrap();
        state.place_enemy(Position::new(4, 4)).unwrap();
        state.player.hp = 50;
        let mut rng = StdRng::seed_from_u64(5);

        state.attack_enemies(&mut rng).unwrap();

        assert_eq!(state.status(), GameStatus::Lost);
        assert_eq!(state.player.hp, -10);
        assert_eq!(state.enemies[0].hp, 25);
        // The second enemy was never reached.
        assert_eq!(state.enemies[1].hp, 50);
        assert!(consistent(&state));
    }

    #[test]
    fn test_lost_wins_over_won_in_the_same_hit() {
        let mut state = arena(UnitStats::new(10, 100));
        state.place_enemy(Position::new(3, 4)).unwrap();
        let mut rng = StdRng::seed_from_u64(5);

        state.attack_enemies(&mut rng).unwrap();

        assert!(state.enemies.is_empty());
        assert_eq!(state.grid.tile_type(Position::new(3, 4)), Some(TileType::Ground));
        assert_eq!(state.status(), GameStatus::Lost);
    }

    #[test]
    fn test_each_action_counts_a_turn() {
        let mut state = arena(UnitStats::new(50, 10));
        let mut rng = StdRng::seed_from_u64(5);
        state.move_player(Direction::Up, &mut rng).unwrap();
        state.attack_enemies(&mut rng).unwrap();
        assert_eq!(state.statistics.turns, 2);
    }
}
