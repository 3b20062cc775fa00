use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use snake_duel::audio::{CueSink, Silent, TerminalBell};
use snake_duel::game::{GameConfig, Match};
use snake_duel::modes::HumanMode;
use snake_duel::scores::{JsonFileStore, MemoryStore, ScoreStore};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "snake_duel")]
#[command(version, about = "Two-player Snake in the terminal")]
struct Cli {
    /// High score file (JSON array)
    #[arg(long, default_value = "highscores.json")]
    scores: PathBuf,

    /// Keep high scores in memory only
    #[arg(long)]
    no_save: bool,

    /// Ticks per second at level 1
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..=60))]
    base_rate: u32,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Disable the terminal bell
    #[arg(long)]
    mute: bool,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = GameConfig::with_base_rate(cli.base_rate);
    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let store: Box<dyn ScoreStore> = if cli.no_save {
        Box::new(MemoryStore::new())
    } else {
        Box::new(JsonFileStore::new(&cli.scores))
    };
    let audio: Box<dyn CueSink> = if cli.mute {
        Box::new(Silent)
    } else {
        Box::new(TerminalBell::stderr())
    };

    info!(base_rate = config.base_tick_rate, scores = ?cli.scores, "Starting");

    let game = Match::new(config, rng, store);
    let mut human_mode = HumanMode::new(game, audio);
    human_mode.run().await?;

    Ok(())
}

/// Send tracing output to a file so it does not tear the TUI
fn init_logging(path: &Path) -> Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {:?}", path))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    Ok(())
}
