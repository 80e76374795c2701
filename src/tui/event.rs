//! Terminal input for the dialog loop

use anyhow::Result;
use ratatui::crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use std::time::Duration;

use crate::config::Config;

/// What the dialog loop reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// No input this tick; the loop only polls the loaders
    Tick,
    /// A key press (or auto-repeat)
    Key(KeyEvent),
    /// The terminal changed size and needs a redraw
    Resize,
}

impl From<CrosstermEvent> for Event {
    fn from(event: CrosstermEvent) -> Self {
        match event {
            // Releases would double every keystroke on terminals that report them
            CrosstermEvent::Key(key) if key.kind != KeyEventKind::Release => Self::Key(key),
            CrosstermEvent::Resize(..) => Self::Resize,
            _ => Self::Tick,
        }
    }
}

/// Waits up to one tick for terminal input
#[derive(Debug, Clone, Copy)]
pub struct Handler {
    tick_rate: Duration,
}

impl Handler {
    /// A handler ticking at the configured loader poll rate
    ///
    /// A zero rate is bumped to one millisecond so the loop never spins.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            tick_rate: Duration::from_millis(config.tick_rate_ms.max(1)),
        }
    }

    /// Next event, or [`Event::Tick`] once the tick elapses
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read
    pub fn next(&self) -> Result<Event> {
        if event::poll(self.tick_rate)? {
            Ok(event::read()?.into())
        } else {
            Ok(Event::Tick)
        }
    }
}
