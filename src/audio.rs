//! Audio cues
//!
//! The game core only names its sound events; a [`CueSink`] decides how (or
//! whether) they are heard. A terminal has no tone generator, so the default
//! sink rings the bell.

use std::io::{self, Write};

use tracing::debug;

use crate::game::Cue;

pub trait CueSink {
    fn play(&mut self, cue: Cue);
}

/// Rings the terminal bell for every cue
pub struct TerminalBell<W: Write> {
    out: W,
}

impl TerminalBell<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> CueSink for TerminalBell<W> {
    fn play(&mut self, cue: Cue) {
        debug!(cue = cue.name(), "cue");
        // Bell write errors are ignored
        let _ = self.out.write_all(b"\x07").and_then(|_| self.out.flush());
    }
}

/// Swallows every cue
#[derive(Debug, Default)]
pub struct Silent;

impl CueSink for Silent {
    fn play(&mut self, cue: Cue) {
        debug!(cue = cue.name(), "cue (muted)");
    }
}
