//! Key handling
//!
//! Turns key presses into [`DialogEvent`]s. This is the only place that knows
//! which keys confirm: Enter on any field, and Enter on a highlighted list
//! entry (which commits that entry first).

use ratatui::crossterm::event::{KeyCode, KeyModifiers};

use crate::dialog::{DialogEvent, GoToCommitDialog};

/// Map a key press to a dialog event, given the dialog's current state
#[must_use]
pub fn map_key(
    dialog: &GoToCommitDialog,
    code: KeyCode,
    modifiers: KeyModifiers,
) -> Option<DialogEvent> {
    let combo = dialog.combo(dialog.focus());
    let ctrl = modifiers.contains(KeyModifiers::CONTROL);

    match code {
        KeyCode::Esc => Some(DialogEvent::Cancel),
        KeyCode::Char('c') if ctrl => Some(DialogEvent::Cancel),
        KeyCode::Char('u') if ctrl => Some(DialogEvent::ClearField),
        KeyCode::BackTab => Some(DialogEvent::FocusPrev),
        KeyCode::Tab if modifiers.contains(KeyModifiers::SHIFT) => Some(DialogEvent::FocusPrev),
        KeyCode::Tab => Some(DialogEvent::FocusNext),
        KeyCode::Enter => {
            if combo.and_then(|c| c.highlighted_entry()).is_some() {
                Some(DialogEvent::CommitHighlighted)
            } else {
                Some(DialogEvent::Confirm)
            }
        }
        KeyCode::Down if combo.is_some() => Some(DialogEvent::HighlightNext),
        KeyCode::Up if combo.is_some() => Some(DialogEvent::HighlightPrev),
        KeyCode::Backspace => Some(DialogEvent::Backspace),
        KeyCode::Char(c) if !ctrl && !modifiers.contains(KeyModifiers::ALT) => {
            Some(DialogEvent::Input(c))
        }
        _ => None,
    }
}
