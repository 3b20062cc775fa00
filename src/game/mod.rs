//! Core game logic for two-player Snake
//!
//! This module contains all the simulation logic without any I/O or rendering dependencies.
//! The terminal front-end only talks to it through [`Match`] and its [`Snapshot`].

pub mod action;
pub mod config;
pub mod engine;
pub mod food;
pub mod state;

// Re-export commonly used types
pub use action::{Direction, Player};
pub use config::{GameConfig, SpawnPoint};
pub use engine::{Cue, Match, MatchResult, Phase, SnakeView, Snapshot};
pub use food::{Bonus, FoodManager};
pub use state::{Grid, Position, Snake};
