//! Messages that drive the dialog

use crate::selector::Source;

/// A user intent, already decoupled from whatever produced it
///
/// The terminal adapter maps key presses to these; tests send them directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogEvent {
    /// Move focus to a specific input
    Focus(Source),
    /// Move focus to the next input in tab order
    FocusNext,
    /// Move focus to the previous input in tab order
    FocusPrev,
    /// Type a character into the focused input
    Input(char),
    /// Delete the last character of the focused input
    Backspace,
    /// Clear the focused input
    ClearField,
    /// Move the highlight down in the focused selector's list
    HighlightNext,
    /// Move the highlight up in the focused selector's list
    HighlightPrev,
    /// Pick the highlighted list entry; picking implies confirming
    CommitHighlighted,
    /// Go to the current candidate
    Confirm,
    /// Close without a selection
    Cancel,
}
