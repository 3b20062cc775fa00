use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use rand::Rng;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Instant, sleep_until};
use tracing::info;

use crate::audio::CueSink;
use crate::game::{Cue, Match, Phase};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::SessionStats;
use crate::render::Renderer;

pub struct HumanMode<R: Rng> {
    game: Match<R>,
    stats: SessionStats,
    renderer: Renderer,
    input_handler: InputHandler,
    audio: Box<dyn CueSink>,
    should_quit: bool,
}

impl<R: Rng> HumanMode<R> {
    pub fn new(game: Match<R>, audio: Box<dyn CueSink>) -> Self {
        Self {
            game,
            stats: SessionStats::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            audio,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut next_tick = Instant::now() + self.frame_interval();

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick, paced by the current level
                _ = sleep_until(next_tick) => {
                    self.update_game();
                    next_tick = Instant::now() + self.frame_interval();
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                info!("Quit requested");
                break;
            }

            self.stats.update();
            let snapshot = self.game.snapshot();
            terminal
                .draw(|frame| {
                    self.renderer.render(frame, &snapshot, &self.stats);
                })
                .context("Failed to draw frame")?;
        }

        Ok(())
    }

    /// Time until the next tick: the level's rate while playing, a fixed
    /// display rate on the start and game-over screens
    fn frame_interval(&self) -> Duration {
        let rate = match self.game.phase() {
            Phase::Playing => self.game.tick_rate(),
            Phase::Start | Phase::GameOver => self.game.config().idle_frame_rate,
        };
        Duration::from_millis(1000 / u64::from(rate.max(1)))
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            let action = self.input_handler.handle_key_event(key);
            self.apply(action);
        }
    }

    fn apply(&mut self, action: KeyAction) {
        match action {
            KeyAction::Steer(player, direction) => {
                self.game.steer(player, direction);
            }
            KeyAction::Confirm => match self.game.phase() {
                Phase::Start => {
                    self.game.begin();
                    self.stats.on_match_start();
                }
                Phase::GameOver => {
                    self.game.restart();
                    self.stats.on_match_start();
                }
                Phase::Playing => {}
            },
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
    }

    fn update_game(&mut self) {
        for cue in self.game.tick() {
            // Track game over
            if cue == Cue::MatchEnded {
                if let Some(result) = self.game.winner() {
                    self.stats.on_match_over(result);
                }
            }
            self.audio.play(cue);
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
