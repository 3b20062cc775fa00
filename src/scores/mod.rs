//! High-score table and its persistence

pub mod store;
pub mod table;

pub use store::{JsonFileStore, MemoryStore, ScoreStore, load_or_default};
pub use table::HighScores;
