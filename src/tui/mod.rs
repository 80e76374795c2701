//! Terminal front end for the dialog
//!
//! Draws on stderr so that stdout stays free for the resolved commit id.

mod event;
pub mod input;
pub mod render;

pub use event::{Event, Handler};
pub use render::render;

use anyhow::Result;
use ratatui::crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::Backend, backend::CrosstermBackend};
use std::io;
use tracing::debug;

use crate::config::Config;
use crate::dialog::{DialogOutcome, GoToCommitDialog};

/// Run the dialog until it is confirmed or cancelled
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up, drawn to, or restored
pub fn run(mut dialog: GoToCommitDialog, config: &Config) -> Result<DialogOutcome> {
    enable_raw_mode()?;
    let mut stderr = io::stderr();
    execute!(stderr, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stderr);
    let mut terminal = Terminal::new(backend)?;

    let event_handler = Handler::new(config);
    let result = run_loop(&mut terminal, &mut dialog, &event_handler, config);
    dialog.close();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    dialog: &mut GoToCommitDialog,
    event_handler: &Handler,
    config: &Config,
) -> Result<DialogOutcome> {
    // Redraw only when input arrived or a list finished loading
    let mut dirty = true;
    loop {
        dirty |= dialog.poll_loaders();
        if dirty {
            terminal.draw(|frame| render::render(frame, dialog, config))?;
            dirty = false;
        }

        match event_handler.next()? {
            Event::Tick => {}
            Event::Resize => dirty = true,
            Event::Key(key) => {
                dirty = true;
                let Some(event) = input::map_key(dialog, key.code, key.modifiers) else {
                    continue;
                };
                debug!(?event, "Key mapped");
                if let Some(outcome) = dialog.handle(event) {
                    return Ok(outcome);
                }
            }
        }
    }
}
