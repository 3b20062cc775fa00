//! Snake Duel - two-player Snake in the terminal
//!
//! This library provides:
//! - Core simulation: snakes, food placement and the match state machine (game module)
//! - High-score table and its JSON persistence (scores module)
//! - Terminal front-end: key mapping, TUI rendering, audio cues (input, render, audio modules)
//! - Session statistics and the interactive game loop (metrics, modes modules)

pub mod audio;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod scores;
