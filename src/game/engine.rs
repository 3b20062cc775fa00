use std::collections::HashSet;

use rand::Rng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use super::{
    action::{Direction, Player},
    config::{BONUS_INTERVAL_SECS, BONUS_POINTS, FOOD_POINTS, GameConfig},
    food::{Bonus, FoodManager},
    state::{Position, Snake},
};
use crate::scores::{HighScores, ScoreStore, load_or_default};

/// Lifecycle of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the begin signal
    Start,
    /// Simulation running
    Playing,
    /// At least one snake died; waiting for restart or quit
    GameOver,
}

/// How a match ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    Won(Player),
    Draw,
}

/// Named sound events for the audio layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    FoodEaten,
    BonusEaten,
    MatchEnded,
}

impl Cue {
    pub fn name(self) -> &'static str {
        match self {
            Cue::FoodEaten => "food-eaten",
            Cue::BonusEaten => "bonus-eaten",
            Cue::MatchEnded => "match-ended",
        }
    }
}

/// Read-only view of one snake
#[derive(Debug, Clone, Copy)]
pub struct SnakeView<'a> {
    pub body: &'a [Position],
    pub direction: Direction,
    pub alive: bool,
}

impl<'a> From<&'a Snake> for SnakeView<'a> {
    fn from(snake: &'a Snake) -> Self {
        Self {
            body: &snake.body,
            direction: snake.direction,
            alive: snake.alive,
        }
    }
}

/// Everything a renderer needs, borrowed from the match
#[derive(Debug, Clone)]
pub struct Snapshot<'a> {
    pub phase: Phase,
    pub snakes: [SnakeView<'a>; 2],
    pub scores: [u32; 2],
    pub level: u32,
    pub tick_rate: u32,
    pub food: Option<Position>,
    pub bonus: Option<Bonus>,
    pub winner: Option<MatchResult>,
    pub high_scores: &'a [u32],
}

impl Snapshot<'_> {
    pub fn snake(&self, player: Player) -> &SnakeView<'_> {
        &self.snakes[player.index()]
    }

    pub fn score(&self, player: Player) -> u32 {
        self.scores[player.index()]
    }
}

/// Two-player match: owns both snakes, the food and the score table
pub struct Match<R: Rng = StdRng> {
    config: GameConfig,
    phase: Phase,
    snakes: [Snake; 2],
    scores: [u32; 2],
    level: u32,
    winner: Option<MatchResult>,
    food: FoodManager<R>,
    /// Ticks since the last bonus was placed
    bonus_spawn_ticks: u32,
    high_scores: HighScores,
    store: Box<dyn ScoreStore>,
}

impl<R: Rng> Match<R> {
    /// Create a match in the start phase, loading the score table from `store`
    pub fn new(config: GameConfig, rng: R, store: Box<dyn ScoreStore>) -> Self {
        let high_scores = HighScores::from_vec(load_or_default(store.as_ref()));
        let snakes = [
            Snake::new(config.spawn_one.position, config.spawn_one.direction),
            Snake::new(config.spawn_two.position, config.spawn_two.direction),
        ];

        let mut game = Self {
            config,
            phase: Phase::Start,
            snakes,
            scores: [0; 2],
            level: 1,
            winner: None,
            food: FoodManager::new(rng),
            bonus_spawn_ticks: 0,
            high_scores,
            store,
        };
        game.relocate_food();
        game
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn winner(&self) -> Option<MatchResult> {
        self.winner
    }

    pub fn score(&self, player: Player) -> u32 {
        self.scores[player.index()]
    }

    pub fn snake(&self, player: Player) -> &Snake {
        &self.snakes[player.index()]
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    /// Current ticks per second, shared by both players
    pub fn tick_rate(&self) -> u32 {
        self.config.tick_rate(self.level)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Start -> Playing
    pub fn begin(&mut self) {
        if self.phase != Phase::Start {
            return;
        }
        info!("Match started");
        self.phase = Phase::Playing;
    }

    /// GameOver -> Playing with a fresh field. The score table is kept.
    pub fn restart(&mut self) {
        if self.phase != Phase::GameOver {
            return;
        }

        for snake in &mut self.snakes {
            snake.reset();
        }
        self.scores = [0; 2];
        self.winner = None;
        self.level = 1;
        self.food.clear_bonus();
        self.bonus_spawn_ticks = 0;
        self.phase = Phase::Playing;
        self.relocate_food();

        info!("Match restarted");
    }

    /// Queue a turn for one player's snake
    pub fn steer(&mut self, player: Player, direction: Direction) {
        if self.phase == Phase::Playing {
            self.snakes[player.index()].set_direction(direction);
        }
    }

    /// Advance the simulation by one tick and return the cues it produced
    pub fn tick(&mut self) -> Vec<Cue> {
        let mut cues = Vec::new();
        if self.phase != Phase::Playing {
            return cues;
        }

        for snake in &mut self.snakes {
            snake.move_forward();
        }

        let [one, two] = &self.snakes;
        let crashed = |snake: &Snake, other: &Snake| {
            snake.check_wall_collision()
                || snake.check_self_collision()
                || snake.check_collision_with(other)
        };
        let mut dead = [crashed(one, two), crashed(two, one)];
        // Head-on: both heads on one cell
        if one.head() == two.head() {
            dead = [true, true];
        }

        if dead.iter().any(|&d| d) {
            self.finish(dead);
            cues.push(Cue::MatchEnded);
            return cues;
        }

        if self.food.food().is_none() {
            self.relocate_food();
        }

        for player in Player::ALL {
            let head = self.snakes[player.index()].head();
            if self.food.food() == Some(head) {
                self.award(player, FOOD_POINTS);
                self.relocate_food();
                cues.push(Cue::FoodEaten);
            }
        }

        for player in Player::ALL {
            let head = self.snakes[player.index()].head();
            if self.food.bonus().is_some_and(|b| b.position == head) {
                self.award(player, BONUS_POINTS);
                self.food.clear_bonus();
                cues.push(Cue::BonusEaten);
            }
        }

        self.food.tick_bonus();

        self.bonus_spawn_ticks += 1;
        if self.bonus_spawn_ticks >= BONUS_INTERVAL_SECS * self.tick_rate()
            && self.food.bonus().is_none()
        {
            let occupied = self.occupied_cells();
            let tick_rate = self.tick_rate();
            if self.food.spawn_bonus(&occupied, tick_rate).is_some() {
                self.bonus_spawn_ticks = 0;
            }
        }

        cues
    }

    /// Read-only view for rendering
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            phase: self.phase,
            snakes: [
                SnakeView::from(&self.snakes[0]),
                SnakeView::from(&self.snakes[1]),
            ],
            scores: self.scores,
            level: self.level,
            tick_rate: self.tick_rate(),
            food: self.food.food(),
            bonus: self.food.bonus(),
            winner: self.winner,
            high_scores: self.high_scores.as_slice(),
        }
    }

    /// Cells covered by either snake
    fn occupied_cells(&self) -> HashSet<Position> {
        self.snakes
            .iter()
            .flat_map(|snake| snake.body.iter().copied())
            .collect()
    }

    fn relocate_food(&mut self) {
        let occupied = self.occupied_cells();
        self.food.spawn_food(&occupied);
    }

    fn award(&mut self, player: Player, points: u32) {
        let idx = player.index();
        self.snakes[idx].grow();
        self.scores[idx] += points;

        let leader = self.scores[0].max(self.scores[1]);
        let level = GameConfig::level_for(leader);
        if level != self.level {
            debug!(level, tick_rate = self.config.tick_rate(level), "level changed");
        }
        self.level = level;
    }

    fn finish(&mut self, dead: [bool; 2]) {
        for (snake, &died) in self.snakes.iter_mut().zip(dead.iter()) {
            snake.alive = !died;
        }

        let result = match dead {
            [true, true] => MatchResult::Draw,
            [true, false] => MatchResult::Won(Player::Two),
            _ => MatchResult::Won(Player::One),
        };
        self.winner = Some(result);
        self.phase = Phase::GameOver;
        info!(?result, p1 = self.scores[0], p2 = self.scores[1], "Match over");

        for score in self.scores {
            self.high_scores.add(score);
        }
        if let Err(err) = self.store.save(self.high_scores.as_slice()) {
            warn!("Failed to save high scores: {:#}", err);
        }
    }
}
