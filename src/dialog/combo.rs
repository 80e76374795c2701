//! Editable ref selector (tag or branch combo box)

use crate::git::RefEntry;
use crate::selector::match_by_display_name;

/// Text plus the loaded entry list of one combo box
///
/// The text is what the user typed (or the name of a committed entry). The
/// visible list is the loaded entries containing that text, case-insensitive;
/// the *selection*, however, is always an exact display-name match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefCombo {
    text: String,
    entries: Option<Vec<RefEntry>>,
    highlighted: Option<usize>,
    load_error: Option<String>,
}

impl RefCombo {
    /// Empty combo whose list is still loading
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the entry list has not arrived yet
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.entries.is_none()
    }

    /// Loaded entries, or `None` while loading
    #[must_use]
    pub fn entries(&self) -> Option<&[RefEntry]> {
        self.entries.as_deref()
    }

    /// Why the list is empty, if its load failed
    #[must_use]
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Install the loaded list
    pub fn load(&mut self, entries: Vec<RefEntry>) {
        self.entries = Some(entries);
        self.highlighted = None;
    }

    /// Record a failed load; the list becomes empty
    pub fn fail(&mut self, message: String) {
        self.entries = Some(Vec::new());
        self.highlighted = None;
        self.load_error = Some(message);
    }

    /// Replace the text
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.highlighted = None;
    }

    /// Append a typed character
    pub fn push_char(&mut self, c: char) {
        self.text.push(c);
        self.highlighted = None;
    }

    /// Delete the last character
    pub fn backspace(&mut self) {
        self.text.pop();
        self.highlighted = None;
    }

    /// Entry whose display name equals the text exactly
    ///
    /// `None` both when nothing matches and while the list is loading; use
    /// [`RefCombo::is_loading`] to tell them apart.
    #[must_use]
    pub fn exact_match(&self) -> Option<RefEntry> {
        self.entries
            .as_deref()
            .and_then(|entries| match_by_display_name(entries, &self.text))
    }

    /// Entries shown in the drop-down for the current text
    #[must_use]
    pub fn visible(&self) -> Vec<&RefEntry> {
        let Some(entries) = self.entries.as_deref() else {
            return Vec::new();
        };
        if self.text.is_empty() {
            return entries.iter().collect();
        }
        let needle = self.text.to_lowercase();
        entries
            .iter()
            .filter(|entry| entry.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Index into [`RefCombo::visible`] of the highlighted entry
    #[must_use]
    pub const fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// The highlighted entry, if any
    #[must_use]
    pub fn highlighted_entry(&self) -> Option<&RefEntry> {
        let idx = self.highlighted?;
        self.visible().get(idx).copied()
    }

    /// Move the highlight down, wrapping to the top
    pub fn highlight_next(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            self.highlighted = None;
            return;
        }
        self.highlighted = Some(match self.highlighted {
            Some(idx) if idx + 1 < len => idx + 1,
            Some(_) | None => 0,
        });
    }

    /// Move the highlight up, wrapping to the bottom
    pub fn highlight_prev(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            self.highlighted = None;
            return;
        }
        self.highlighted = Some(match self.highlighted {
            Some(idx) if idx > 0 => idx - 1,
            Some(_) | None => len - 1,
        });
    }
}
