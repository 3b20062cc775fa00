use serde::{Deserialize, Serialize};

use super::action::Direction;
use super::state::Position;

/// Width of the playing field in cells
pub const GRID_WIDTH: i32 = 30;
/// Height of the playing field in cells
pub const GRID_HEIGHT: i32 = 20;

/// Points for the regular food item
pub const FOOD_POINTS: u32 = 10;
/// Points for the timed bonus item
pub const BONUS_POINTS: u32 = 50;
/// Score span covered by one level
pub const POINTS_PER_LEVEL: u32 = 50;
/// Extra ticks per second gained per level
pub const RATE_PER_LEVEL: u32 = 2;

/// A bonus lives this many seconds worth of ticks
pub const BONUS_LIFETIME_SECS: u32 = 5;
/// A bonus is offered roughly every this many seconds worth of ticks
pub const BONUS_INTERVAL_SECS: u32 = 15;

/// Entries kept in the high-score table
pub const HIGH_SCORE_CAPACITY: usize = 5;

/// Where and how a snake enters the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub position: Position,
    pub direction: Direction,
}

/// Configuration for a match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Ticks per second at level 1
    pub base_tick_rate: u32,
    /// Frame rate of the start and game-over screens
    pub idle_frame_rate: u32,
    /// Spawn of player one (left side, heading right)
    pub spawn_one: SpawnPoint,
    /// Spawn of player two (right side, heading left)
    pub spawn_two: SpawnPoint,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            base_tick_rate: 10,
            idle_frame_rate: 30,
            spawn_one: SpawnPoint {
                position: Position::new(GRID_WIDTH / 4, GRID_HEIGHT / 2),
                direction: Direction::Right,
            },
            spawn_two: SpawnPoint {
                position: Position::new(3 * GRID_WIDTH / 4, GRID_HEIGHT / 2),
                direction: Direction::Left,
            },
        }
    }
}

impl GameConfig {
    /// Default layout with a custom base speed
    pub fn with_base_rate(base_tick_rate: u32) -> Self {
        Self {
            base_tick_rate: base_tick_rate.max(1),
            ..Default::default()
        }
    }

    /// Level reached when the leading player holds `max_score`
    pub fn level_for(max_score: u32) -> u32 {
        1 + max_score / POINTS_PER_LEVEL
    }

    /// Ticks per second at the given level
    pub fn tick_rate(&self, level: u32) -> u32 {
        self.base_tick_rate + level.saturating_sub(1) * RATE_PER_LEVEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.base_tick_rate, 10);
        assert_eq!(config.idle_frame_rate, 30);
        assert_eq!(config.spawn_one.position, Position::new(7, 10));
        assert_eq!(config.spawn_one.direction, Direction::Right);
        assert_eq!(config.spawn_two.position, Position::new(22, 10));
        assert_eq!(config.spawn_two.direction, Direction::Left);
    }

    #[test]
    fn test_level_bands() {
        assert_eq!(GameConfig::level_for(0), 1);
        assert_eq!(GameConfig::level_for(49), 1);
        assert_eq!(GameConfig::level_for(50), 2);
        assert_eq!(GameConfig::level_for(99), 2);
        assert_eq!(GameConfig::level_for(100), 3);

        let mut previous = 1;
        for score in (0..500).step_by(10) {
            let level = GameConfig::level_for(score);
            assert!(level >= previous);
            previous = level;
        }
    }

    #[test]
    fn test_tick_rate() {
        let config = GameConfig::default();
        assert_eq!(config.tick_rate(1), 10);
        assert_eq!(config.tick_rate(2), 12);
        assert_eq!(config.tick_rate(4), 16);

        let slow = GameConfig::with_base_rate(0);
        assert_eq!(slow.tick_rate(1), 1);
    }

    #[test]
    fn test_config_serialization() {
        let config = GameConfig::with_base_rate(6);
        let json = serde_json::to_string(&config).unwrap();
        let restored: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.base_tick_rate, 6);
        assert_eq!(restored.spawn_two, config.spawn_two);
    }
}
