use std::time::{Duration, Instant};

use crate::game::{MatchResult, Player};

/// Match clock plus a win tally for the current session
pub struct SessionStats {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub matches_played: u32,
    pub wins: [u32; 2],
    pub draws: u32,
    running: bool,
}

impl SessionStats {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            matches_played: 0,
            wins: [0; 2],
            draws: 0,
            running: false,
        }
    }

    pub fn update(&mut self) {
        if self.running {
            self.elapsed_time = self.start_time.elapsed();
        }
    }

    pub fn on_match_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.running = true;
    }

    /// Record the result and stop the clock
    pub fn on_match_over(&mut self, result: MatchResult) {
        self.update();
        self.running = false;
        self.matches_played += 1;
        match result {
            MatchResult::Won(player) => self.wins[player.index()] += 1,
            MatchResult::Draw => self.draws += 1,
        }
    }

    pub fn wins(&self, player: Player) -> u32 {
        self.wins[player.index()]
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }

    /// e.g. "P1 2 - 1 P2 (1 draw)"
    pub fn format_tally(&self) -> String {
        let draws = match self.draws {
            0 => String::new(),
            1 => " (1 draw)".to_string(),
            n => format!(" ({} draws)", n),
        };
        format!(
            "P1 {} - {} P2{}",
            self.wins(Player::One),
            self.wins(Player::Two),
            draws
        )
    }
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new()
    }
}
